//! Resolution of the operator-supplied interface name into a usable link.
//!
//! The interface is never picked automatically for an audit; a missing or
//! unusable interface is always an error.

use pnet::datalink::{self, NetworkInterface};
use pnet::util::MacAddr;
#[cfg(target_os = "macos")]
use macos_impl::{is_physical, is_wireless};
#[cfg(target_os = "linux")]
use linux_impl::{is_physical, is_wireless};
#[cfg(not(any(target_os = "linux", target_os = "macos")))]
use fallback_impl::{is_physical, is_wireless};

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum InterfaceError {
    #[error("network interface '{name}' was not found (available: {})", available.join(", "))]
    NotFound { name: String, available: Vec<String> },
    #[error("network interface '{0}' is down")]
    IsDown(String),
    #[error("network interface '{0}' is a loopback device")]
    IsLoopback(String),
    #[error("network interface '{0}' has no hardware address")]
    NoMacAddress(String),
    #[error("network interface '{0}' does not support broadcast")]
    NotBroadcast(String),
    #[error("network interface '{0}' is a point-to-point link")]
    IsPointToPoint(String),
}

/// Looks up `name` among the interfaces of this host and checks it can carry a
/// broadcast DHCP exchange.
pub fn resolve(name: &str) -> Result<NetworkInterface, InterfaceError> {
    find_in(name, datalink::interfaces())
}

/// Returns every interface that could be handed to [`resolve`], wired links first.
pub fn candidates() -> Vec<NetworkInterface> {
    let mut interfaces: Vec<NetworkInterface> = datalink::interfaces()
        .into_iter()
        .filter(|interface| check_usable(interface).is_ok())
        .collect();

    interfaces.sort_by_key(|interface| !is_wired(interface));
    interfaces
}

pub fn find_in(
    name: &str,
    interfaces: Vec<NetworkInterface>,
) -> Result<NetworkInterface, InterfaceError> {
    let available: Vec<String> = interfaces.iter().map(|i| i.name.clone()).collect();

    let interface: NetworkInterface = interfaces
        .into_iter()
        .find(|interface| interface.name == name)
        .ok_or_else(|| InterfaceError::NotFound {
            name: name.to_string(),
            available,
        })?;

    check_usable(&interface)?;
    Ok(interface)
}

/// No IPv4 address is required, a host still waiting for its first lease has none.
pub fn check_usable(interface: &NetworkInterface) -> Result<(), InterfaceError> {
    let name = || interface.name.clone();

    if !interface.is_up() {
        return Err(InterfaceError::IsDown(name()));
    }
    if interface.is_loopback() {
        return Err(InterfaceError::IsLoopback(name()));
    }
    match interface.mac {
        None => return Err(InterfaceError::NoMacAddress(name())),
        Some(mac) if mac == MacAddr::zero() => return Err(InterfaceError::NoMacAddress(name())),
        Some(_) => {}
    }
    if !interface.is_broadcast() {
        return Err(InterfaceError::NotBroadcast(name()));
    }
    if interface.is_point_to_point() {
        return Err(InterfaceError::IsPointToPoint(name()));
    }

    Ok(())
}

fn is_wired(interface: &NetworkInterface) -> bool {
    is_physical(interface) && !is_wireless(interface)
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
    }
}

#[cfg(target_os = "macos")]
mod macos_impl {
    use super::*;
    use std::collections::HashSet;
    use std::process::Command;
    use std::sync::OnceLock;

    struct HardwarePorts {
        physical: HashSet<String>,
        wireless: HashSet<String>,
    }

    /// Asks `networksetup` once and caches the answer.
    fn hardware_ports() -> &'static HardwarePorts {
        static PORTS: OnceLock<HardwarePorts> = OnceLock::new();

        PORTS.get_or_init(|| {
            let mut physical = HashSet::new();
            let mut wireless = HashSet::new();

            if let Ok(output) = Command::new("networksetup").arg("-listallhardwareports").output() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                for line in stdout.lines() {
                    if let Some(device) = line.strip_prefix("Device: ") {
                        physical.insert(device.trim().to_string());
                    }
                }
            }

            for device in &physical {
                let is_wifi = Command::new("networksetup")
                    .arg("-getairportnetwork")
                    .arg(device)
                    .output()
                    .map(|out| out.status.success())
                    .unwrap_or(false);

                if is_wifi {
                    wireless.insert(device.clone());
                }
            }

            HardwarePorts { physical, wireless }
        })
    }

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        hardware_ports().physical.contains(&interface.name)
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        hardware_ports().wireless.contains(&interface.name)
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
mod fallback_impl {
    use super::*;

    pub fn is_physical(_interface: &NetworkInterface) -> bool {
        true
    }

    pub fn is_wireless(_interface: &NetworkInterface) -> bool {
        false
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
