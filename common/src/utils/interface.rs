use std::net::Ipv4Addr;

use pnet::datalink::NetworkInterface;
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

pub trait NetworkInterfaceExtension {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network>;
    fn get_ipv4_addr(&self) -> Option<Ipv4Addr>;
}

impl NetworkInterfaceExtension for NetworkInterface {
    fn get_ipv4_nets(&self) -> Vec<Ipv4Network> {
        self.ips
            .iter()
            .filter_map(|ip| {
                if let IpNetwork::V4(ipv4) = ip {
                    Some(*ipv4)
                } else {
                    None
                }
            })
            .collect()
    }

    fn get_ipv4_addr(&self) -> Option<Ipv4Addr> {
        self.get_ipv4_nets()
            .into_iter()
            .map(|net| net.ip())
            .find(|ip| !ip.is_loopback())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interface_with(ips: Vec<IpNetwork>) -> NetworkInterface {
        NetworkInterface {
            name: "eth0".into(),
            description: String::new(),
            index: 1,
            mac: None,
            ips,
            flags: 0,
        }
    }

    #[test]
    fn get_ipv4_addr_skips_ipv6_and_loopback() {
        let interface = interface_with(vec![
            IpNetwork::V6("fe80::1".parse().unwrap()),
            IpNetwork::V4("127.0.0.1/8".parse().unwrap()),
            IpNetwork::V4("10.0.0.7/24".parse().unwrap()),
        ]);
        assert_eq!(interface.get_ipv4_addr(), Some(Ipv4Addr::new(10, 0, 0, 7)));
        assert_eq!(interface.get_ipv4_nets().len(), 2);
    }

    #[test]
    fn get_ipv4_addr_is_none_before_first_lease() {
        let interface = interface_with(vec![IpNetwork::V6("fe80::1".parse().unwrap())]);
        assert_eq!(interface.get_ipv4_addr(), None);
    }
}
