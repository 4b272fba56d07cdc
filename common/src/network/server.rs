//! Records describing DHCP servers, both the trusted ones and the ones that answered.

use std::fmt;
use std::net::Ipv4Addr;
use std::time::Instant;

use pnet::util::MacAddr;

/// An entry of the allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedServer {
    pub name: String,
    pub ip: Ipv4Addr,
}

impl AuthorizedServer {
    pub fn new(name: impl Into<String>, ip: Ipv4Addr) -> Self {
        Self {
            name: name.into(),
            ip,
        }
    }
}

/// A server that replied to the probe during one scan.
///
/// Identity is the hardware address. `ip` is the IPv4 source of the most recent
/// reply from that address and is what gets classified; `offered` and
/// `server_id` are informational.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredServer {
    pub mac: MacAddr,
    pub ip: Ipv4Addr,
    pub first_seen: Instant,
    pub offered: Option<Ipv4Addr>,
    pub server_id: Option<Ipv4Addr>,
    /// Number of replies seen from this hardware address.
    pub replies: u32,
}

impl DiscoveredServer {
    pub fn new(mac: MacAddr, ip: Ipv4Addr) -> Self {
        Self {
            mac,
            ip,
            first_seen: Instant::now(),
            offered: None,
            server_id: None,
            replies: 1,
        }
    }

    pub fn with_offered(mut self, offered: Option<Ipv4Addr>) -> Self {
        self.offered = offered;
        self
    }

    pub fn with_server_id(mut self, server_id: Option<Ipv4Addr>) -> Self {
        self.server_id = server_id;
        self
    }

    /// Sort key independent of arrival order.
    pub fn sort_key(&self) -> (Ipv4Addr, [u8; 6]) {
        let mac = self.mac;
        (self.ip, [mac.0, mac.1, mac.2, mac.3, mac.4, mac.5])
    }
}

/// One line of the redlist: a rogue server as `ip,mac`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedlistEntry {
    pub ip: Ipv4Addr,
    pub mac: MacAddr,
}

impl From<&DiscoveredServer> for RedlistEntry {
    fn from(server: &DiscoveredServer) -> Self {
        Self {
            ip: server.ip,
            mac: server.mac,
        }
    }
}

impl fmt::Display for RedlistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.ip, self.mac)
    }
}
