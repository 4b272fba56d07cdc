use colored::*;
use pnet::datalink::NetworkInterface;

use crate::mprint;
use crate::terminal::{colors, format::Detail, print};
use dhcpscout_common::network::{interface, mac};
use dhcpscout_common::utils::interface::NetworkInterfaceExtension;

/// Prints the interfaces a probe could be sent from, preferred ones first.
pub fn list_interfaces(q_level: u8) {
    let candidates: Vec<NetworkInterface> = interface::candidates();
    print::header("usable interfaces", q_level);

    if candidates.is_empty() {
        tracing::warn!("No interface is up, broadcast capable and has a hardware address");
        return;
    }

    for (idx, intf) in candidates.iter().enumerate() {
        if idx > 0 {
            mprint!();
        }
        print::tree_head(idx, &intf.name.color(colors::PRIMARY));
        print::as_tree_one_level(interface_to_details(intf));
    }
}

fn interface_to_details(intf: &NetworkInterface) -> Vec<Detail> {
    let mut details: Vec<Detail> = intf
        .get_ipv4_nets()
        .iter()
        .map(|net| {
            let value: ColoredString = format!(
                "{}/{}",
                net.ip().to_string().color(colors::IPV4_ADDR),
                net.prefix()
            )
            .color(colors::SEPARATOR);
            ("IPv4".to_string(), value)
        })
        .collect();

    if let Some(mac_addr) = intf.mac {
        details.push((
            "MAC".to_string(),
            mac_addr.to_string().color(colors::MAC_ADDR),
        ));
        if let Some(vendor) = mac::get_vendor(mac_addr) {
            details.push(("Vendor".to_string(), vendor.color(colors::VENDOR)));
        }
    }

    details
}
