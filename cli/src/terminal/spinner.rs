use std::time::Duration;

use colored::*;
use indicatif::ProgressStyle;
use tracing::Span;
use tracing_indicatif::span_ext::IndicatifSpanExt;

use crate::terminal::colors;

const TICK_STRINGS: &[&str] = &[
    "▁▁▁▁▁",
    "▁▂▂▂▁",
    "▁▄▂▄▁",
    "▂▄▆▄▂",
    "▄▆█▆▄",
    "▂▄▆▄▂",
    "▁▄▂▄▁",
    "▁▂▂▂▁",
];

/// Gives the collection span its spinner and the initial hint.
pub fn style_span(span: &Span, timeout: Duration, input_enabled: bool) {
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} {elapsed:.dim}") {
        span.pb_set_style(&style.tick_strings(TICK_STRINGS));
    }

    let hint: String = if input_enabled {
        format!("Listening up to {}s, press 'q' to finish early", timeout.as_secs())
    } else {
        format!("Listening up to {}s", timeout.as_secs())
    };
    span.pb_set_message(&hint.italic().to_string());
}

pub fn report_progress(span: &Span, count: usize) {
    span.pb_set_message(
        &format!(
            "Heard from {} so far...",
            format!("{} DHCP server(s)", count).green().bold()
        )
        .color(colors::TEXT_DEFAULT)
        .to_string(),
    );
}
