use std::net::Ipv4Addr;

use pnet::packet::Packet;
use pnet::packet::ip::IpNextHeaderProtocol;
use pnet::packet::ipv4::{self, Ipv4Packet, MutableIpv4Packet};

use crate::error::PacketError;

pub const IP_V4_HDR_LEN: usize = 20;

pub fn create_packet(
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
    next_protocol: IpNextHeaderProtocol,
    payload: &[u8],
) -> Result<Vec<u8>, PacketError> {
    let total_len: usize = IP_V4_HDR_LEN + payload.len();
    let total_len_u16: u16 =
        u16::try_from(total_len).map_err(|_| PacketError::Oversized(payload.len()))?;
    let mut buffer: Vec<u8> = vec![0u8; total_len];
    {
        let mut ipv4 = MutableIpv4Packet::new(&mut buffer).ok_or(PacketError::Ipv4Buffer)?;
        ipv4.set_version(4);
        ipv4.set_header_length(5); // 5 x 32 bits, no options
        ipv4.set_dscp(0);
        ipv4.set_ecn(0);
        ipv4.set_total_length(total_len_u16);
        ipv4.set_identification(rand::random());
        ipv4.set_flags(0);
        ipv4.set_fragment_offset(0);
        ipv4.set_ttl(64);
        ipv4.set_next_level_protocol(next_protocol);
        ipv4.set_source(src_addr);
        ipv4.set_destination(dst_addr);
        ipv4.set_payload(payload);

        ipv4.set_checksum(0);
        let csm = ipv4::checksum(&ipv4.to_immutable());
        ipv4.set_checksum(csm);
    }
    Ok(buffer)
}

pub fn get_packet_from_u8(bytes: &[u8]) -> Result<Ipv4Packet<'_>, PacketError> {
    let packet = Ipv4Packet::new(bytes).ok_or(PacketError::Ipv4Buffer)?;
    if packet.get_version() != 4 {
        return Err(PacketError::NotIpv4);
    }
    Ok(packet)
}

/// Payload bounded by the header's total length, so trailing ethernet padding is dropped.
pub fn bounded_payload<'a>(packet: &'a Ipv4Packet<'_>) -> &'a [u8] {
    let header_len = usize::from(packet.get_header_length()) * 4;
    let total_len = usize::from(packet.get_total_length());
    let raw = packet.packet();
    let end = total_len.clamp(header_len.min(raw.len()), raw.len());
    &raw[header_len.min(end)..end]
}
