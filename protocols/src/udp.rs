use std::net::Ipv4Addr;

use pnet::packet::udp::{self, MutableUdpPacket, UdpPacket};

use crate::error::PacketError;

pub const UDP_HDR_LEN: usize = 8;

/// Builds a datagram with the checksum computed over the ipv4 pseudo-header.
pub fn create_packet(
    src_addr: Ipv4Addr,
    dst_addr: Ipv4Addr,
    src_port: u16,
    dst_port: u16,
    payload: &[u8],
) -> Result<Vec<u8>, PacketError> {
    let total_len: usize = UDP_HDR_LEN + payload.len();
    let total_len_u16: u16 =
        u16::try_from(total_len).map_err(|_| PacketError::Oversized(payload.len()))?;
    let mut buffer: Vec<u8> = vec![0u8; total_len];
    {
        let mut udp: MutableUdpPacket =
            MutableUdpPacket::new(&mut buffer).ok_or(PacketError::UdpBuffer)?;
        udp.set_source(src_port);
        udp.set_destination(dst_port);
        udp.set_length(total_len_u16);
        udp.set_payload(payload);
        udp.set_checksum(0);
        let csm = udp::ipv4_checksum(&udp.to_immutable(), &src_addr, &dst_addr);
        udp.set_checksum(csm);
    }
    Ok(buffer)
}

pub fn get_packet_from_u8(bytes: &[u8]) -> Result<UdpPacket<'_>, PacketError> {
    UdpPacket::new(bytes).ok_or(PacketError::UdpBuffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::Packet;

    #[test]
    fn udp_packet_sets_ports_length_and_checksum() {
        let src = Ipv4Addr::UNSPECIFIED;
        let dst = Ipv4Addr::BROADCAST;
        let pkt = create_packet(src, dst, 68, 67, b"hello").unwrap();

        let parsed = get_packet_from_u8(&pkt).unwrap();
        assert_eq!(parsed.get_source(), 68);
        assert_eq!(parsed.get_destination(), 67);
        assert_eq!(parsed.get_length(), 13);
        assert_eq!(parsed.payload(), b"hello");
        assert_eq!(parsed.get_checksum(), udp::ipv4_checksum(&parsed, &src, &dst));
    }
}
