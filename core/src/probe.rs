//! Construction of the single DHCPDISCOVER sent per scan.

use dhcpscout_common::network::interface::{self, InterfaceError};
use dhcpscout_protocols as protocol;
use pnet::datalink::NetworkInterface;
use pnet::util::MacAddr;
use tracing::debug;

use crate::error::ConfigError;

/// A ready-to-send discovery frame and the transaction id replies must echo.
#[derive(Debug, Clone)]
pub struct ProbeFrame {
    pub xid: u32,
    pub src_mac: MacAddr,
    pub interface: String,
    bytes: Vec<u8>,
}

impl ProbeFrame {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Resolves `interface_name` and builds the probe for it.
///
/// Fails before any packet is sent when the interface is absent or unusable.
pub fn build(interface_name: &str) -> Result<(NetworkInterface, ProbeFrame), ConfigError> {
    let interface: NetworkInterface = interface::resolve(interface_name)?;
    let probe: ProbeFrame = build_for(&interface)?;
    Ok((interface, probe))
}

pub fn build_for(interface: &NetworkInterface) -> Result<ProbeFrame, ConfigError> {
    build_with_xid(interface, rand::random())
}

fn build_with_xid(interface: &NetworkInterface, xid: u32) -> Result<ProbeFrame, ConfigError> {
    interface::check_usable(interface)?;
    let src_mac: MacAddr = interface
        .mac
        .ok_or_else(|| InterfaceError::NoMacAddress(interface.name.clone()))?;

    let bytes: Vec<u8> = protocol::create_discover_frame(src_mac, xid)?;
    debug!(
        "Built DHCPDISCOVER xid={xid:#010x} chaddr={src_mac} ({} bytes) for {}",
        bytes.len(),
        interface.name
    );

    Ok(ProbeFrame {
        xid,
        src_mac,
        interface: interface.name.clone(),
        bytes,
    })
}
