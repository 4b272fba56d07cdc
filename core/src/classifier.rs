use dhcpscout_common::network::server::{DiscoveredServer, RedlistEntry};

use crate::registry::Registry;

/// Discovered servers split by whether their address is on the allow-list.
///
/// Both partitions are ordered by address, then hardware address, so the same
/// input set yields the same result whatever order replies arrived in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    pub authorized: Vec<DiscoveredServer>,
    pub rogue: Vec<DiscoveredServer>,
}

impl ScanResult {
    pub fn total(&self) -> usize {
        self.authorized.len() + self.rogue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn redlist(&self) -> Vec<RedlistEntry> {
        self.rogue.iter().map(RedlistEntry::from).collect()
    }
}

/// Labels every discovered server. An empty registry flags everything as rogue.
pub fn classify(discovered: &[DiscoveredServer], registry: &Registry) -> ScanResult {
    let (mut authorized, mut rogue): (Vec<DiscoveredServer>, Vec<DiscoveredServer>) = discovered
        .iter()
        .cloned()
        .partition(|server| registry.is_authorized(server.ip));

    authorized.sort_by_key(DiscoveredServer::sort_key);
    rogue.sort_by_key(DiscoveredServer::sort_key);

    ScanResult { authorized, rogue }
}
