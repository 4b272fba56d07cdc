use pnet::packet::ethernet::{EtherType, EthernetPacket, MutableEthernetPacket};
use pnet::util::MacAddr;

use crate::error::PacketError;

pub const ETH_HDR_LEN: usize = 14;

pub fn create_frame(
    src_mac: MacAddr,
    dst_mac: MacAddr,
    ethertype: EtherType,
    payload: &[u8],
) -> Result<Vec<u8>, PacketError> {
    let mut buffer: Vec<u8> = vec![0u8; ETH_HDR_LEN + payload.len()];
    {
        let mut eth = MutableEthernetPacket::new(&mut buffer).ok_or(PacketError::EthernetBuffer)?;
        eth.set_source(src_mac);
        eth.set_destination(dst_mac);
        eth.set_ethertype(ethertype);
    }
    buffer[ETH_HDR_LEN..].copy_from_slice(payload);
    Ok(buffer)
}

pub fn get_packet_from_u8(bytes: &[u8]) -> Result<EthernetPacket<'_>, PacketError> {
    EthernetPacket::new(bytes).ok_or(PacketError::EthernetBuffer)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
