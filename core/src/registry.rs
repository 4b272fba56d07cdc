//! The allow-list of DHCP servers that are expected on the segment.
//!
//! Source format is headerless CSV, `name,ipv4_address`, extra columns ignored.
//! Rows with fewer than two fields are dropped without comment; rows whose
//! address does not parse are logged, kept in [`Registry::rejected`], and
//! skipped. A duplicate address replaces the earlier row.

use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::net::Ipv4Addr;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use dhcpscout_common::network::server::AuthorizedServer;
use tracing::{debug, warn};

use crate::error::{LoadError, RecordFormatError};

#[derive(Debug, Default)]
pub struct Registry {
    servers: HashMap<Ipv4Addr, AuthorizedServer>,
    rejected: Vec<RecordFormatError>,
}

impl Registry {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            _ => LoadError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let registry = Self::from_reader(file).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Read {} authorized server(s) from {}", registry.len(), path.display());
        Ok(registry)
    }

    /// Reads registry rows from any source. Only I/O failures are errors.
    pub fn from_reader<R: io::Read>(reader: R) -> io::Result<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut registry = Self::default();

        for result in csv_reader.records() {
            let record: StringRecord = match result {
                Ok(record) => record,
                Err(e) => match e.into_kind() {
                    csv::ErrorKind::Io(err) => return Err(err),
                    other => {
                        warn!("Skipping unreadable registry row: {other:?}");
                        continue;
                    }
                },
            };
            registry.add_record(&record);
        }

        Ok(registry)
    }

    pub fn from_servers(servers: impl IntoIterator<Item = AuthorizedServer>) -> Self {
        let mut registry = Self::default();
        for server in servers {
            registry.insert(server);
        }
        registry
    }

    fn add_record(&mut self, record: &StringRecord) {
        let (Some(name), Some(raw_ip)) = (record.get(0), record.get(1)) else {
            return;
        };

        match raw_ip.parse::<Ipv4Addr>() {
            Ok(ip) => self.insert(AuthorizedServer::new(name, ip)),
            Err(source) => {
                let err = RecordFormatError {
                    line: record.position().map_or(0, |pos| pos.line()),
                    value: raw_ip.to_string(),
                    source,
                };
                warn!("Skipping authorized server entry, {err}");
                self.rejected.push(err);
            }
        }
    }

    fn insert(&mut self, server: AuthorizedServer) {
        if let Some(previous) = self.servers.insert(server.ip, server) {
            debug!("{} listed more than once, keeping the last entry", previous.ip);
        }
    }

    pub fn is_authorized(&self, ip: Ipv4Addr) -> bool {
        self.servers.contains_key(&ip)
    }

    pub fn name_of(&self, ip: Ipv4Addr) -> Option<&str> {
        self.servers.get(&ip).map(|server| server.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn rejected(&self) -> &[RecordFormatError] {
        &self.rejected
    }

    pub fn iter(&self) -> impl Iterator<Item = &AuthorizedServer> {
        self.servers.values()
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
