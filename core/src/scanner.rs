//! The network half of an audit pass: interface resolution, probe, collection.
//!
//! Classification and the redlist are left to the caller, which owns the
//! [`Registry`](crate::registry::Registry) and the resulting
//! [`ScanResult`](crate::classifier::ScanResult). Nothing is kept between runs.

use std::future::Future;

use dhcpscout_common::config::ScanConfig;
use dhcpscout_common::network::server::DiscoveredServer;
use dhcpscout_common::utils::interface::NetworkInterfaceExtension;
use pnet::datalink::NetworkInterface;
use tracing::info;

use crate::collector::{ResponseCollector, ServerFoundCallback};
use crate::error::AuditError;
use crate::network::channel::{self, EthernetHandle};
use crate::probe::{self, ProbeFrame};

/// Resolves the configured interface, broadcasts one DHCPDISCOVER and collects
/// the replies for `cfg.timeout` or until `interrupt` resolves.
///
/// Interface problems surface as [`AuditError::Config`] before anything is sent.
pub async fn perform_scan<F>(
    cfg: &ScanConfig,
    interrupt: F,
    on_server_found: Option<ServerFoundCallback>,
) -> Result<Vec<DiscoveredServer>, AuditError>
where
    F: Future<Output = ()>,
{
    let (intf, probe): (NetworkInterface, ProbeFrame) = probe::build(&cfg.interface)?;
    match intf.get_ipv4_addr() {
        Some(addr) => info!("Broadcasting DHCPDISCOVER on {} ({addr})", intf.name),
        None => info!("Broadcasting DHCPDISCOVER on {} (no IPv4 address)", intf.name),
    }
    let eth_handle: EthernetHandle = channel::start_capture(&intf)?;

    scan_with(eth_handle, &probe, cfg, interrupt, on_server_found).await
}

/// Runs the collection over an already opened capture channel.
pub async fn scan_with<F>(
    eth_handle: EthernetHandle,
    probe: &ProbeFrame,
    cfg: &ScanConfig,
    interrupt: F,
    on_server_found: Option<ServerFoundCallback>,
) -> Result<Vec<DiscoveredServer>, AuditError>
where
    F: Future<Output = ()>,
{
    let mut collector = ResponseCollector::new(eth_handle);
    if let Some(callback) = on_server_found {
        collector = collector.on_server_found(callback);
    }

    let servers = collector.collect(probe, cfg.timeout, interrupt).await?;
    info!("{} DHCP server(s) answered on {}", servers.len(), probe.interface);
    Ok(servers)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
