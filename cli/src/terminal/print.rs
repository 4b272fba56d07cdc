use crate::terminal::{colors, logging::PRINT_TARGET};
use colored::*;
use tracing::info;
use unicode_width::UnicodeWidthStr;

pub const TOTAL_WIDTH: usize = 64;
const TREE_KEY_WIDTH: usize = 7;

#[macro_export]
macro_rules! mprint {
    () => {
        $crate::terminal::print::print("");
    };
    ($msg:expr) => {
        $crate::terminal::print::print($msg);
    };
}

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, "{msg}");
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ DHCPSCOUT v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .bright_black();

    print(&format!("{sep}{text}{sep}"));
}

pub fn header(msg: &str, q_level: u8) {
    if q_level > 0 {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn print_status<T: AsRef<str>>(msg: T) {
    let prefix: ColoredString = ">".color(colors::SEPARATOR);
    let message: String = format!("{} {}", prefix, msg.as_ref().color(colors::TEXT_DEFAULT));
    print(&message);
}

pub fn tree_head(idx: usize, name: &ColoredString) {
    let idx_str: String = format!("[{}]", idx.to_string().color(colors::ACCENT));
    print(&format!("{} {}", idx_str.color(colors::SEPARATOR), name));
}

pub fn as_tree_one_level(key_value_pair: Vec<(String, ColoredString)>) {
    for line in tree_lines(&key_value_pair) {
        print(&line);
    }
}

fn tree_lines(key_value_pair: &[(String, ColoredString)]) -> Vec<String> {
    key_value_pair
        .iter()
        .enumerate()
        .map(|(i, (key, value))| {
            let branch: ColoredString = if i + 1 != key_value_pair.len() {
                "├─".bright_black()
            } else {
                "└─".bright_black()
            };
            format!(
                " {} {}{}{} {}",
                branch,
                key.color(colors::TEXT_DEFAULT),
                ".".repeat(TREE_KEY_WIDTH.saturating_sub(key.len()))
                    .color(colors::SEPARATOR),
                ":".color(colors::SEPARATOR),
                value
            )
        })
        .collect()
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}{}", space, msg, space));
}

const NO_RESULTS: &str = r#"
             _   _  ___    ____  _   _  ____ ____
            | \ | |/ _ \  |  _ \| | | |/ ___|  _ \
            |  \| | | | | | | | | |_| | |   | |_) |
            | |\  | |_| | | |_| |  _  | |___|  __/
            |_| \_|\___/  |____/|_| |_|\____|_|
"#;

pub fn no_results() {
    print(&format!("{}", NO_RESULTS.yellow().bold()));
}
