use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::bail;
use colored::*;
use tracing::{Instrument, Span, info, info_span, warn};

use crate::commands::AuditArgs;
use crate::mprint;
use crate::terminal::{colors, format, input::InputHandle, print, spinner};
use dhcpscout_common::config::ScanConfig;
use dhcpscout_common::network::server::{DiscoveredServer, RedlistEntry};
use dhcpscout_core::collector::ServerFoundCallback;
use dhcpscout_core::{Registry, ScanResult, classify, redlist, scanner};

pub async fn audit(args: AuditArgs) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();
    let AuditArgs { input, output, cfg } = args;

    let registry: Registry = load_registry(&input, &cfg)?;
    check_output_dir(&output)?;

    if !is_root::is_root() {
        warn!("Not running as root, opening a raw socket will most likely fail");
    }

    print::header("listening for dhcp servers", cfg.quiet);
    let span: Span = info_span!("collection", indicatif.pb_show = true);
    let mut input_handle = InputHandle::start(cfg.disable_input);
    spinner::style_span(&span, cfg.timeout, input_handle.is_watching());

    let progress_span: Span = span.clone();
    let on_found: ServerFoundCallback =
        Box::new(move |count| spinner::report_progress(&progress_span, count));

    let servers: Vec<DiscoveredServer> =
        scanner::perform_scan(&cfg, input_handle.interrupted(), Some(on_found))
            .instrument(span)
            .await?;
    drop(input_handle);

    conclude(&servers, &registry, &output, &cfg, start_time)
}

/// Classifies whatever was collected, writes the redlist and reports.
fn conclude(
    servers: &[DiscoveredServer],
    registry: &Registry,
    output: &Path,
    cfg: &ScanConfig,
    start_time: Instant,
) -> anyhow::Result<()> {
    let result: ScanResult = classify(servers, registry);
    print_verdicts(&result, registry, cfg);

    let entries: Vec<RedlistEntry> = result.redlist();
    redlist::report(&entries, output)?;
    print_redlist(&entries, output, cfg);

    print_summary(&result, start_time.elapsed(), cfg);
    Ok(())
}

fn load_registry(input: &Path, cfg: &ScanConfig) -> anyhow::Result<Registry> {
    let registry = Registry::load(input)?;

    if registry.is_empty() {
        warn!(
            "No authorized servers in {}, every responder will be reported",
            input.display()
        );
    } else if cfg.quiet == 0 {
        info!(
            "Loaded {} authorized server(s) from {} ({} row(s) skipped)",
            registry.len(),
            input.display(),
            registry.rejected().len()
        );
    }

    Ok(registry)
}

fn print_verdicts(result: &ScanResult, registry: &Registry, cfg: &ScanConfig) {
    if result.is_empty() {
        warn!(
            "No DHCP servers found on {} within {}s",
            cfg.interface,
            cfg.timeout.as_secs()
        );
        print::header("no dhcp servers found", cfg.quiet);
        if cfg.quiet == 0 {
            print::no_results();
        }
        return;
    }

    print::header("dhcp servers", cfg.quiet);

    let mut idx: usize = 0;
    for server in &result.authorized {
        let name: &str = registry.name_of(server.ip).unwrap_or("authorized");
        let head: ColoredString = format!("AUTHORIZED ({name})")
            .bold()
            .color(colors::AUTHORIZED);
        print_server(idx, head, server, cfg);
        idx += 1;
    }

    for server in &result.rogue {
        let head: ColoredString = "POSSIBLE ROGUE".bold().color(colors::ROGUE);
        print_server(idx, head, server, cfg);
        idx += 1;
    }
}

fn print_server(idx: usize, head: ColoredString, server: &DiscoveredServer, cfg: &ScanConfig) {
    if idx > 0 {
        mprint!();
    }

    match cfg.quiet {
        0 => {
            print::tree_head(idx, &head);
            print::as_tree_one_level(format::server_to_details(server));
        }
        _ => print::print_status(format!(
            "{} {} {}",
            head,
            server.ip.to_string().color(colors::IPV4_ADDR),
            server.mac.to_string().color(colors::MAC_ADDR)
        )),
    }
}

fn print_redlist(entries: &[RedlistEntry], output: &Path, cfg: &ScanConfig) {
    if entries.is_empty() {
        print::print_status(format!(
            "No rogue servers, wrote an empty redlist to {}",
            output.display()
        ));
        return;
    }

    print::header("redlist", cfg.quiet);
    for entry in entries {
        warn!(
            "{} --- {}",
            entry.ip.to_string().color(colors::IPV4_ADDR),
            entry.mac.to_string().color(colors::MAC_ADDR)
        );
    }
    print::print_status(format!("Redlist written to {}", output.display()));
}

fn print_summary(result: &ScanResult, total_time: Duration, cfg: &ScanConfig) {
    let rogue: ColoredString = match result.rogue.len() {
        0 => "0 rogue".bold().green(),
        n => format!("{n} rogue").bold().red(),
    };
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: ColoredString = format!(
        "Audit Complete: {} server(s), {} in {}",
        result.total(),
        rogue,
        total_time
    )
    .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(&output.to_string());
        }
        _ => print::print(&output.to_string()),
    }
}

/// Catches a redlist path in a missing directory before the listen window starts.
fn check_output_dir(output: &Path) -> anyhow::Result<()> {
    match output.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => bail!(
            "cannot write redlist to {}: directory {} does not exist",
            output.display(),
            dir.display()
        ),
        _ => Ok(()),
    }
}
