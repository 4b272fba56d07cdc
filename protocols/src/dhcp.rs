//! BOOTP/DHCP message codec (RFC 2131, RFC 2132).
//!
//! Only the pieces needed to solicit offers and read the answers are modelled:
//! the fixed BOOTP header, the magic cookie, and a small set of typed options.
//! Options this crate does not know are kept as raw bytes.

use std::fmt;
use std::net::Ipv4Addr;

use pnet::packet::dhcp::{DhcpHardwareTypes, DhcpOperations, DhcpPacket, MutableDhcpPacket};
use pnet::util::MacAddr;

use crate::error::PacketError;

pub const DHCP_SERVER_PORT: u16 = 67;
pub const DHCP_CLIENT_PORT: u16 = 68;

/// Fixed BOOTP header, everything before the magic cookie.
pub const BOOTP_FIXED_LEN: usize = 236;
/// RFC 1542 minimum size of a BOOTP message.
pub const BOOTP_MIN_LEN: usize = 300;
pub const MAGIC_COOKIE: [u8; 4] = [99, 130, 83, 99];
pub const BROADCAST_FLAG: u16 = 0x8000;

const OPTION_PAD: u8 = 0;
const OPTION_MESSAGE_TYPE: u8 = 53;
const OPTION_SERVER_ID: u8 = 54;
const OPTION_END: u8 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootpOp {
    Request,
    Reply,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Discover = 1,
    Offer = 2,
    Request = 3,
    Decline = 4,
    Ack = 5,
    Nak = 6,
    Release = 7,
    Inform = 8,
}

impl MessageType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(MessageType::Discover),
            2 => Some(MessageType::Offer),
            3 => Some(MessageType::Request),
            4 => Some(MessageType::Decline),
            5 => Some(MessageType::Ack),
            6 => Some(MessageType::Nak),
            7 => Some(MessageType::Release),
            8 => Some(MessageType::Inform),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Discover => "DISCOVER",
            MessageType::Offer => "OFFER",
            MessageType::Request => "REQUEST",
            MessageType::Decline => "DECLINE",
            MessageType::Ack => "ACK",
            MessageType::Nak => "NAK",
            MessageType::Release => "RELEASE",
            MessageType::Inform => "INFORM",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DhcpOption {
    MessageType(MessageType),
    ServerIdentifier(Ipv4Addr),
    Other(u8, Vec<u8>),
}

impl DhcpOption {
    fn encode_into(&self, buffer: &mut Vec<u8>) {
        match self {
            DhcpOption::MessageType(kind) => {
                buffer.extend_from_slice(&[OPTION_MESSAGE_TYPE, 1, *kind as u8]);
            }
            DhcpOption::ServerIdentifier(ip) => {
                buffer.extend_from_slice(&[OPTION_SERVER_ID, 4]);
                buffer.extend_from_slice(&ip.octets());
            }
            DhcpOption::Other(code, data) => {
                // Longer values would need RFC 3396 splitting, never produced here.
                let len = data.len().min(usize::from(u8::MAX));
                buffer.push(*code);
                buffer.push(len as u8);
                buffer.extend_from_slice(&data[..len]);
            }
        }
    }

    fn decode(code: u8, data: &[u8]) -> Self {
        match (code, data) {
            (OPTION_MESSAGE_TYPE, [value]) => match MessageType::from_u8(*value) {
                Some(kind) => DhcpOption::MessageType(kind),
                None => DhcpOption::Other(code, data.to_vec()),
            },
            (OPTION_SERVER_ID, [a, b, c, d]) => {
                DhcpOption::ServerIdentifier(Ipv4Addr::new(*a, *b, *c, *d))
            }
            _ => DhcpOption::Other(code, data.to_vec()),
        }
    }
}

/// A BOOTP message carrying DHCP options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpMessage {
    pub op: BootpOp,
    pub xid: u32,
    pub flags: u16,
    pub ciaddr: Ipv4Addr,
    pub yiaddr: Ipv4Addr,
    pub siaddr: Ipv4Addr,
    pub giaddr: Ipv4Addr,
    pub chaddr: MacAddr,
    /// Options in wire order, without the trailing end option.
    pub options: Vec<DhcpOption>,
}

impl DhcpMessage {
    /// A DHCPDISCOVER asking servers to broadcast their offers back.
    pub fn discover(chaddr: MacAddr, xid: u32) -> Self {
        Self {
            op: BootpOp::Request,
            xid,
            flags: BROADCAST_FLAG,
            ciaddr: Ipv4Addr::UNSPECIFIED,
            yiaddr: Ipv4Addr::UNSPECIFIED,
            siaddr: Ipv4Addr::UNSPECIFIED,
            giaddr: Ipv4Addr::UNSPECIFIED,
            chaddr,
            options: vec![DhcpOption::MessageType(MessageType::Discover)],
        }
    }

    pub fn message_type(&self) -> Option<MessageType> {
        self.options.iter().find_map(|option| match option {
            DhcpOption::MessageType(kind) => Some(*kind),
            _ => None,
        })
    }

    pub fn server_identifier(&self) -> Option<Ipv4Addr> {
        self.options.iter().find_map(|option| match option {
            DhcpOption::ServerIdentifier(ip) => Some(*ip),
            _ => None,
        })
    }

    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        let mut options: Vec<u8> = Vec::with_capacity(64);
        options.extend_from_slice(&MAGIC_COOKIE);
        for option in &self.options {
            option.encode_into(&mut options);
        }
        options.push(OPTION_END);

        let total_len: usize = (BOOTP_FIXED_LEN + options.len()).max(BOOTP_MIN_LEN);
        let mut buffer: Vec<u8> = vec![0u8; total_len];
        {
            let mut bootp =
                MutableDhcpPacket::new(&mut buffer).ok_or(PacketError::BootpBuffer(total_len))?;
            bootp.set_op(match self.op {
                BootpOp::Request => DhcpOperations::Request,
                BootpOp::Reply => DhcpOperations::Reply,
            });
            bootp.set_htype(DhcpHardwareTypes::Ethernet);
            bootp.set_hlen(6);
            bootp.set_hops(0);
            bootp.set_xid(self.xid);
            bootp.set_secs(0);
            bootp.set_flags(self.flags);
            bootp.set_ciaddr(self.ciaddr);
            bootp.set_yiaddr(self.yiaddr);
            bootp.set_siaddr(self.siaddr);
            bootp.set_giaddr(self.giaddr);
            bootp.set_chaddr(self.chaddr);
        }

        // Options go in by hand, the remainder stays zero (pad).
        buffer[BOOTP_FIXED_LEN..BOOTP_FIXED_LEN + options.len()].copy_from_slice(&options);
        Ok(buffer)
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, PacketError> {
        // DhcpPacket::new accepts buffers shorter than the fixed header.
        if bytes.len() < BOOTP_FIXED_LEN + MAGIC_COOKIE.len() {
            return Err(PacketError::BootpBuffer(bytes.len()));
        }
        let bootp = DhcpPacket::new(bytes).ok_or(PacketError::BootpBuffer(bytes.len()))?;

        let raw_options: &[u8] = &bytes[BOOTP_FIXED_LEN..];
        let option_bytes: &[u8] = raw_options
            .strip_prefix(&MAGIC_COOKIE[..])
            .ok_or(PacketError::MissingMagicCookie)?;

        let op = if bootp.get_op() == DhcpOperations::Reply {
            BootpOp::Reply
        } else {
            BootpOp::Request
        };

        Ok(Self {
            op,
            xid: bootp.get_xid(),
            flags: bootp.get_flags(),
            ciaddr: bootp.get_ciaddr(),
            yiaddr: bootp.get_yiaddr(),
            siaddr: bootp.get_siaddr(),
            giaddr: bootp.get_giaddr(),
            chaddr: bootp.get_chaddr(),
            options: parse_options(option_bytes)?,
        })
    }
}

fn parse_options(mut bytes: &[u8]) -> Result<Vec<DhcpOption>, PacketError> {
    let mut options: Vec<DhcpOption> = Vec::new();

    while let Some((&code, rest)) = bytes.split_first() {
        match code {
            OPTION_PAD => bytes = rest,
            OPTION_END => break,
            _ => {
                let (&len, rest) = rest.split_first().ok_or(PacketError::TruncatedOption(code))?;
                let len = usize::from(len);
                if rest.len() < len {
                    return Err(PacketError::TruncatedOption(code));
                }
                options.push(DhcpOption::decode(code, &rest[..len]));
                bytes = &rest[len..];
            }
        }
    }

    Ok(options)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
