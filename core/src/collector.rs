//! Collection of DHCP replies within a bounded window.
//!
//! The probe is sent exactly once. Replies are then read until the timeout
//! elapses or the caller's interrupt future resolves, whichever comes first;
//! frames still queued at that point are dropped. Responders are keyed by
//! hardware address and a later reply overwrites the recorded addresses.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use dhcpscout_common::network::server::DiscoveredServer;
use dhcpscout_protocols as protocol;
use protocol::DhcpReply;
use pnet::util::MacAddr;
use tracing::{debug, info, trace, warn};

use crate::error::ScanError;
use crate::network::channel::EthernetHandle;
use crate::probe::ProbeFrame;

pub type ServerFoundCallback = Box<dyn Fn(usize) + Send + Sync>;

pub struct ResponseCollector {
    servers: HashMap<MacAddr, DiscoveredServer>,
    eth_handle: EthernetHandle,
    on_server_found: Option<ServerFoundCallback>,
}

impl ResponseCollector {
    pub fn new(eth_handle: EthernetHandle) -> Self {
        Self {
            servers: HashMap::new(),
            eth_handle,
            on_server_found: None,
        }
    }

    /// Called with the running number of distinct responders whenever a new one appears.
    pub fn on_server_found(mut self, callback: ServerFoundCallback) -> Self {
        self.on_server_found = Some(callback);
        self
    }

    /// Sends `probe` and gathers responders for at most `timeout`.
    ///
    /// An empty result is a normal outcome. When `interrupt` resolves first,
    /// the servers seen so far are returned.
    pub async fn collect<F>(
        mut self,
        probe: &ProbeFrame,
        timeout: Duration,
        interrupt: F,
    ) -> Result<Vec<DiscoveredServer>, ScanError>
    where
        F: Future<Output = ()>,
    {
        self.send_probe(probe)?;

        let deadline = tokio::time::sleep(timeout);
        tokio::pin!(deadline);
        tokio::pin!(interrupt);

        loop {
            tokio::select! {
                biased;

                _ = &mut interrupt => {
                    warn!("Collection interrupted, reporting {} server(s) found so far", self.servers.len());
                    break;
                }

                _ = &mut deadline => {
                    debug!("Collection window of {:.1}s elapsed", timeout.as_secs_f64());
                    break;
                }

                frame = self.eth_handle.rx.recv() => {
                    match frame {
                        Some(bytes) => self.process_frame(&bytes, probe.xid),
                        None => {
                            warn!("Capture channel closed before the collection window ended");
                            break;
                        }
                    }
                }
            }
        }

        Ok(self.servers.into_values().collect())
    }

    fn send_probe(&mut self, probe: &ProbeFrame) -> Result<(), ScanError> {
        match self.eth_handle.tx.send_to(probe.bytes(), None) {
            Some(Err(e)) => Err(ScanError::Send(e)),
            _ => {
                info!("Sent DHCPDISCOVER on {} (xid {:#010x})", probe.interface, probe.xid);
                Ok(())
            }
        }
    }

    fn process_frame(&mut self, bytes: &[u8], xid: u32) {
        let reply: DhcpReply = match protocol::parse_dhcp_reply(bytes) {
            Ok(reply) => reply,
            Err(e) => {
                trace!("Ignoring frame: {e}");
                return;
            }
        };

        if reply.message.xid != xid {
            debug!(
                "Ignoring reply from {} for foreign transaction {:#010x}",
                reply.src_mac, reply.message.xid
            );
            return;
        }

        self.record(reply);
    }

    fn record(&mut self, reply: DhcpReply) {
        let offered = Some(reply.message.yiaddr).filter(|ip| !ip.is_unspecified());
        let server_id = reply.message.server_identifier();

        match self.servers.get_mut(&reply.src_mac) {
            Some(server) => {
                server.ip = reply.src_ip;
                server.offered = offered;
                server.server_id = server_id;
                server.replies += 1;
                debug!("Another reply from {} ({})", reply.src_mac, reply.src_ip);
            }
            None => {
                let server = DiscoveredServer::new(reply.src_mac, reply.src_ip)
                    .with_offered(offered)
                    .with_server_id(server_id);
                info!(
                    "DHCP {} from {} ({})",
                    reply
                        .message
                        .message_type()
                        .map_or("reply".to_string(), |kind| kind.to_string()),
                    reply.src_ip,
                    reply.src_mac
                );
                self.servers.insert(reply.src_mac, server);

                if let Some(callback) = &self.on_server_found {
                    callback(self.servers.len());
                }
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
