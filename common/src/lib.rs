//! Types and helpers shared by every `dhcpscout` crate.

pub mod config;
pub mod network;
pub mod utils;
