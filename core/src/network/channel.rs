//! Link-layer capture on the scan interface.
//!
//! Frames are read on a dedicated OS thread (the pnet receiver blocks) and
//! forwarded into a tokio channel so the collector can `select!` over them.
//! The thread stops as soon as the receiving half is dropped.

use std::io;
use std::time::Duration;

use pnet::datalink::{self, Channel, Config, DataLinkReceiver, DataLinkSender, NetworkInterface};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::error::ScanError;

const READ_TIMEOUT: Duration = Duration::from_millis(50);

/// Sending half of the raw channel plus the queue of captured frames.
pub struct EthernetHandle {
    pub tx: Box<dyn DataLinkSender>,
    pub rx: UnboundedReceiver<Vec<u8>>,
}

pub fn start_capture(intf: &NetworkInterface) -> Result<EthernetHandle, ScanError> {
    start_capture_with(intf, datalink::channel)
}

pub fn start_capture_with<F>(intf: &NetworkInterface, channel_opener: F) -> Result<EthernetHandle, ScanError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let (tx, rx) = open_eth_channel(intf, &capture_config(), channel_opener)?;
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    spawn_listener(intf.name.clone(), rx, queue_tx);
    Ok(EthernetHandle { tx, rx: queue_rx })
}

fn open_eth_channel<F>(
    intf: &NetworkInterface,
    cfg: &Config,
    channel_opener: F,
) -> Result<(Box<dyn DataLinkSender>, Box<dyn DataLinkReceiver>), ScanError>
where
    F: FnOnce(&NetworkInterface, Config) -> io::Result<Channel>,
{
    let ch: Channel = channel_opener(intf, *cfg).map_err(|source| ScanError::Channel {
        interface: intf.name.clone(),
        source,
    })?;
    match ch {
        Channel::Ethernet(tx, rx) => {
            debug!("Capture channel open on {}", intf.name);
            Ok((tx, rx))
        }
        _ => Err(ScanError::NotEthernet(intf.name.clone())),
    }
}

fn spawn_listener(name: String, mut rx: Box<dyn DataLinkReceiver>, queue: UnboundedSender<Vec<u8>>) {
    std::thread::spawn(move || {
        while !queue.is_closed() {
            match rx.next() {
                Ok(frame) => {
                    if queue.send(frame.to_vec()).is_err() {
                        break;
                    }
                }
                Err(e) if is_transient(&e) => continue,
                Err(e) => {
                    debug!("Capture on {name} stopped: {e}");
                    break;
                }
            }
        }
    });
}

fn is_transient(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted
    )
}

fn capture_config() -> Config {
    Config {
        read_timeout: Some(READ_TIMEOUT),
        ..Default::default()
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
