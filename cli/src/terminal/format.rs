use colored::*;
use dhcpscout_common::network::mac;
use dhcpscout_common::network::server::DiscoveredServer;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

/// Tree lines describing one responder, in display order.
pub fn server_to_details(server: &DiscoveredServer) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        (
            "IPv4".to_string(),
            server.ip.to_string().color(colors::IPV4_ADDR),
        ),
        (
            "MAC".to_string(),
            server.mac.to_string().color(colors::MAC_ADDR),
        ),
    ];

    if mac::is_locally_administered(server.mac) {
        details.push(("Vendor".to_string(), "locally administered".italic()));
    } else if let Some(vendor) = mac::get_vendor(server.mac) {
        details.push(("Vendor".to_string(), vendor.color(colors::VENDOR)));
    }

    if let Some(offered) = server.offered {
        details.push((
            "Offered".to_string(),
            offered.to_string().color(colors::IPV4_ADDR),
        ));
    }

    if let Some(server_id) = server.server_id.filter(|id| *id != server.ip) {
        details.push((
            "Srv-ID".to_string(),
            server_id.to_string().color(colors::ACCENT),
        ));
    }

    if server.replies > 1 {
        details.push(("Replies".to_string(), server.replies.to_string().normal()));
    }

    details
}
