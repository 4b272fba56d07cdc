//! Active discovery and classification of DHCP servers on a broadcast segment.
//!
//! * [`registry`] loads the allow-list of known-good servers.
//! * [`probe`] builds the DHCPDISCOVER for the chosen interface.
//! * [`collector`] sends it and gathers the replies within a time window.
//! * [`classifier`] splits responders into authorized and rogue.
//! * [`redlist`] persists the rogue ones.
//!
//! [`scanner`] wires these together for a single audit pass.

pub mod classifier;
pub mod collector;
pub mod error;
pub mod network;
pub mod probe;
pub mod redlist;
pub mod registry;
pub mod scanner;

pub use classifier::{ScanResult, classify};
pub use error::{AuditError, ConfigError, LoadError, RecordFormatError, ScanError, WriteError};
pub use registry::Registry;
