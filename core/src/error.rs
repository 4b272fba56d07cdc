//! Failure kinds of an audit run.
//!
//! Only [`RecordFormatError`] is recoverable: it is attached to the loaded
//! registry instead of aborting the load. Everything else ends the run.

use std::io;
use std::net::AddrParseError;
use std::path::PathBuf;

use dhcpscout_common::network::interface::InterfaceError;
use dhcpscout_protocols::PacketError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0}; set the interface explicitly with --interface <NAME> (see --list-interfaces)")]
    Interface(#[from] InterfaceError),
    #[error("could not build the discovery probe: {0}")]
    Probe(#[from] PacketError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("authorized server list {} does not exist", .0.display())]
    NotFound(PathBuf),
    #[error("could not read authorized server list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A registry row whose address column is not an IPv4 address.
#[derive(Debug, Error)]
#[error("line {line}: '{value}' is not an IPv4 address ({source})")]
pub struct RecordFormatError {
    pub line: u64,
    pub value: String,
    #[source]
    pub source: AddrParseError,
}

#[derive(Debug, Error)]
#[error("could not write redlist {}: {source}", .path.display())]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: csv::Error,
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("opening capture on {interface}: {source}")]
    Channel {
        interface: String,
        #[source]
        source: io::Error,
    },
    #[error("{0} does not provide an ethernet channel")]
    NotEthernet(String),
    #[error("sending the discovery probe: {0}")]
    Send(#[source] io::Error),
}

/// Any fatal condition of a run.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

impl From<InterfaceError> for AuditError {
    fn from(err: InterfaceError) -> Self {
        AuditError::Config(ConfigError::Interface(err))
    }
}
