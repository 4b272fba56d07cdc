//! Persistence of rogue servers as headerless `ip,mac` lines.
//!
//! There is no transactional guarantee: a failed write may leave a partial
//! file behind.

use std::io;
use std::path::Path;

use csv::{Terminator, Writer, WriterBuilder};
use dhcpscout_common::network::server::RedlistEntry;
use tracing::info;

use crate::error::WriteError;

pub fn report(entries: &[RedlistEntry], path: impl AsRef<Path>) -> Result<(), WriteError> {
    let path = path.as_ref();
    let to_write_error = |source: csv::Error| WriteError {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = builder().from_path(path).map_err(to_write_error)?;
    write_entries(&mut writer, entries).map_err(to_write_error)?;

    info!("Wrote {} redlist record(s) to {}", entries.len(), path.display());
    Ok(())
}

/// Writes the entries to any sink, one record per line.
pub fn write_to<W: io::Write>(entries: &[RedlistEntry], sink: W) -> Result<(), csv::Error> {
    let mut writer = builder().from_writer(sink);
    write_entries(&mut writer, entries)
}

fn builder() -> WriterBuilder {
    let mut builder = WriterBuilder::new();
    builder.has_headers(false).terminator(Terminator::Any(b'\n'));
    builder
}

fn write_entries<W: io::Write>(
    writer: &mut Writer<W>,
    entries: &[RedlistEntry],
) -> Result<(), csv::Error> {
    for entry in entries {
        writer.write_record([entry.ip.to_string(), entry.mac.to_string()])?;
    }
    writer.flush()?;
    Ok(())
}
