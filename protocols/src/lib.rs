//! Wire formats spoken by the scanner.
//!
//! Frames are built bottom-up (DHCP inside UDP inside IPv4 inside Ethernet) and
//! parsed top-down; every layer lives in its own module.

pub mod dhcp;
pub mod error;
pub mod ethernet;
pub mod ipv4;
pub mod udp;

use std::net::Ipv4Addr;

use pnet::packet::Packet;
use pnet::packet::ethernet::EtherTypes;
use pnet::packet::ip::IpNextHeaderProtocols;
use pnet::util::MacAddr;

pub use dhcp::{DhcpMessage, DhcpOption, MessageType};
pub use error::PacketError;

use dhcp::{BootpOp, DHCP_CLIENT_PORT, DHCP_SERVER_PORT};

/// A BOOTP reply together with the link and network addresses it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpReply {
    pub src_mac: MacAddr,
    pub src_ip: Ipv4Addr,
    pub message: DhcpMessage,
}

/// Builds the complete broadcast DHCPDISCOVER frame for `src_mac`.
pub fn create_discover_frame(src_mac: MacAddr, xid: u32) -> Result<Vec<u8>, PacketError> {
    let bootp: Vec<u8> = DhcpMessage::discover(src_mac, xid).encode()?;
    create_dhcp_frame(
        src_mac,
        MacAddr::broadcast(),
        Ipv4Addr::UNSPECIFIED,
        Ipv4Addr::BROADCAST,
        (DHCP_CLIENT_PORT, DHCP_SERVER_PORT),
        &bootp,
    )
}

/// Wraps an encoded BOOTP message in UDP, IPv4 and Ethernet headers.
pub fn create_dhcp_frame(
    src_mac: MacAddr,
    dst_mac: MacAddr,
    src_ip: Ipv4Addr,
    dst_ip: Ipv4Addr,
    (src_port, dst_port): (u16, u16),
    bootp: &[u8],
) -> Result<Vec<u8>, PacketError> {
    let datagram: Vec<u8> = udp::create_packet(src_ip, dst_ip, src_port, dst_port, bootp)?;
    let packet: Vec<u8> =
        ipv4::create_packet(src_ip, dst_ip, IpNextHeaderProtocols::Udp, &datagram)?;
    ethernet::create_frame(src_mac, dst_mac, EtherTypes::Ipv4, &packet)
}

/// Extracts a BOOTP reply (server port 67 to client port 68) from a raw frame.
///
/// The IPv4 source is reported as-is; nothing is assumed about which address
/// a server answers from.
pub fn parse_dhcp_reply(frame: &[u8]) -> Result<DhcpReply, PacketError> {
    let eth = ethernet::get_packet_from_u8(frame)?;
    if eth.get_ethertype() != EtherTypes::Ipv4 {
        return Err(PacketError::NotIpv4);
    }

    let ip = ipv4::get_packet_from_u8(eth.payload())?;
    if ip.get_next_level_protocol() != IpNextHeaderProtocols::Udp {
        return Err(PacketError::NotUdp);
    }

    let datagram = udp::get_packet_from_u8(ipv4::bounded_payload(&ip))?;
    let (src, dst) = (datagram.get_source(), datagram.get_destination());
    if src != DHCP_SERVER_PORT || dst != DHCP_CLIENT_PORT {
        return Err(PacketError::NotDhcpReply { src, dst });
    }

    let message = DhcpMessage::parse(datagram.payload())?;
    if message.op != BootpOp::Reply {
        return Err(PacketError::NotDhcpReply { src, dst });
    }

    Ok(DhcpReply {
        src_mac: eth.get_source(),
        src_ip: ip.get_source(),
        message,
    })
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use pnet::packet::ethernet::EthernetPacket;
    use pnet::packet::ipv4::Ipv4Packet;
    use pnet::packet::udp::UdpPacket;

    const CLIENT: MacAddr = MacAddr(0x00, 0x1b, 0x21, 0x01, 0x02, 0x03);
    const SERVER: MacAddr = MacAddr(0x52, 0x54, 0x00, 0x0a, 0x0b, 0x0c);

    fn offer_frame(xid: u32, src_ip: Ipv4Addr) -> Vec<u8> {
        let offer = DhcpMessage {
            op: BootpOp::Reply,
            yiaddr: Ipv4Addr::new(10, 0, 0, 50),
            options: vec![
                DhcpOption::MessageType(MessageType::Offer),
                DhcpOption::ServerIdentifier(src_ip),
            ],
            ..DhcpMessage::discover(CLIENT, xid)
        };
        create_dhcp_frame(
            SERVER,
            MacAddr::broadcast(),
            src_ip,
            Ipv4Addr::BROADCAST,
            (DHCP_SERVER_PORT, DHCP_CLIENT_PORT),
            &offer.encode().unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn discover_frame_is_broadcast_from_unspecified_address() {
        let frame = create_discover_frame(CLIENT, 0x1234_5678).unwrap();

        let eth = EthernetPacket::new(&frame).unwrap();
        assert_eq!(eth.get_destination(), MacAddr::broadcast());
        assert_eq!(eth.get_source(), CLIENT);
        assert_eq!(eth.get_ethertype(), EtherTypes::Ipv4);

        let ip = Ipv4Packet::new(eth.payload()).unwrap();
        assert_eq!(ip.get_source(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(ip.get_destination(), Ipv4Addr::BROADCAST);

        let datagram = UdpPacket::new(ip.payload()).unwrap();
        assert_eq!(datagram.get_source(), 68);
        assert_eq!(datagram.get_destination(), 67);

        let message = DhcpMessage::parse(datagram.payload()).unwrap();
        assert_eq!(message.op, BootpOp::Request);
        assert_eq!(message.xid, 0x1234_5678);
        assert_eq!(message.chaddr, CLIENT);
        assert_eq!(message.message_type(), Some(MessageType::Discover));
        assert_eq!(message.options.len(), 1);
    }

    #[test]
    fn parse_dhcp_reply_reads_offer() {
        let frame = offer_frame(42, Ipv4Addr::new(10, 0, 0, 1));
        let reply = parse_dhcp_reply(&frame).unwrap();

        assert_eq!(reply.src_mac, SERVER);
        assert_eq!(reply.src_ip, Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(reply.message.xid, 42);
        assert_eq!(reply.message.message_type(), Some(MessageType::Offer));
    }

    #[test]
    fn parse_dhcp_reply_accepts_unspecified_source() {
        let frame = offer_frame(42, Ipv4Addr::UNSPECIFIED);
        let reply = parse_dhcp_reply(&frame).unwrap();
        assert_eq!(reply.src_ip, Ipv4Addr::UNSPECIFIED);
    }

    #[test]
    fn parse_dhcp_reply_tolerates_ethernet_padding() {
        let mut frame = offer_frame(42, Ipv4Addr::new(10, 0, 0, 1));
        frame.extend_from_slice(&[0u8; 12]);
        assert!(parse_dhcp_reply(&frame).is_ok());
    }

    #[test]
    fn parse_dhcp_reply_rejects_own_discover() {
        let frame = create_discover_frame(CLIENT, 1).unwrap();
        assert_eq!(
            parse_dhcp_reply(&frame).unwrap_err(),
            PacketError::NotDhcpReply { src: 68, dst: 67 }
        );
    }

    #[test]
    fn parse_dhcp_reply_rejects_arp() {
        let frame =
            ethernet::create_frame(SERVER, MacAddr::broadcast(), EtherTypes::Arp, &[0u8; 28])
                .unwrap();
        assert_eq!(parse_dhcp_reply(&frame).unwrap_err(), PacketError::NotIpv4);
    }

    #[test]
    fn parse_dhcp_reply_rejects_short_bootp_payload() {
        let frame = create_dhcp_frame(
            SERVER,
            MacAddr::broadcast(),
            Ipv4Addr::new(10, 0, 0, 66),
            Ipv4Addr::BROADCAST,
            (DHCP_SERVER_PORT, DHCP_CLIENT_PORT),
            &[2u8; 100],
        )
        .unwrap();
        assert_eq!(parse_dhcp_reply(&frame).unwrap_err(), PacketError::BootpBuffer(100));
    }

    #[test]
    fn parse_dhcp_reply_rejects_tcp() {
        let packet = ipv4::create_packet(
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            IpNextHeaderProtocols::Tcp,
            &[0u8; 20],
        )
        .unwrap();
        let frame =
            ethernet::create_frame(SERVER, CLIENT, EtherTypes::Ipv4, &packet).unwrap();
        assert_eq!(parse_dhcp_reply(&frame).unwrap_err(), PacketError::NotUdp);
    }
}
