use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PacketError {
    #[error("buffer too small for an ethernet frame")]
    EthernetBuffer,
    #[error("buffer too small for an ipv4 packet")]
    Ipv4Buffer,
    #[error("buffer too small for a udp datagram")]
    UdpBuffer,
    #[error("buffer too small for a bootp message ({0} bytes)")]
    BootpBuffer(usize),
    #[error("payload of {0} bytes does not fit in a single frame")]
    Oversized(usize),
    #[error("frame does not carry ipv4")]
    NotIpv4,
    #[error("ipv4 packet does not carry udp")]
    NotUdp,
    #[error("udp datagram {src} -> {dst} is not a dhcp reply")]
    NotDhcpReply { src: u16, dst: u16 },
    #[error("bootp message is missing the dhcp magic cookie")]
    MissingMagicCookie,
    #[error("dhcp option {0} is truncated")]
    TruncatedOption(u8),
}
