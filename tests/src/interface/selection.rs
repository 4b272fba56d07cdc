use dhcpscout_common::network::interface::{self, InterfaceError};
use pnet::datalink::{MacAddr, NetworkInterface};

use super::util::{IFF_BROADCAST, IFF_LOOPBACK, IFF_POINTOPOINT, IFF_UP, ni, v4, v6};

/*************************************************************
                     Host interface fixtures
**************************************************************/

fn lo() -> NetworkInterface {
    ni("lo", 1, Some(MacAddr::zero()), &[v4(127, 0, 0, 1, 8)], IFF_UP | IFF_LOOPBACK)
}

fn enp9s0() -> NetworkInterface {
    ni(
        "enp9s0",
        2,
        Some(MacAddr(0x00, 0x1b, 0x21, 0x3a, 0x4f, 0x10)),
        &[v4(192, 168, 1, 20, 24), v6("fe80::21b:21ff:fe3a:4f10", 64)],
        IFF_UP | IFF_BROADCAST,
    )
}

fn eth1_no_lease() -> NetworkInterface {
    ni("eth1", 3, Some(MacAddr(0x00, 0x1b, 0x21, 0x3a, 0x4f, 0x11)), &[], IFF_UP | IFF_BROADCAST)
}

fn eth2_down() -> NetworkInterface {
    ni("eth2", 4, Some(MacAddr(0x00, 0x1b, 0x21, 0x3a, 0x4f, 0x12)), &[], IFF_BROADCAST)
}

fn tun0() -> NetworkInterface {
    ni("tun0", 5, None, &[v4(10, 8, 0, 2, 24)], IFF_UP | IFF_POINTOPOINT)
}

fn ppp0() -> NetworkInterface {
    ni(
        "ppp0",
        6,
        Some(MacAddr(0x02, 0, 0, 0, 0, 0x06)),
        &[v4(100, 64, 0, 7, 32)],
        IFF_UP | IFF_BROADCAST | IFF_POINTOPOINT,
    )
}

fn host() -> Vec<NetworkInterface> {
    vec![lo(), enp9s0(), eth1_no_lease(), eth2_down(), tun0(), ppp0()]
}

/*************************************************************
                     Resolution by name
**************************************************************/

#[test]
fn resolves_wired_interface_by_name() {
    assert_eq!(interface::find_in("enp9s0", host()), Ok(enp9s0()));
}

#[test]
fn interface_without_address_is_still_usable() {
    assert_eq!(interface::find_in("eth1", host()), Ok(eth1_no_lease()));
}

#[test]
fn unknown_name_lists_what_exists() {
    match interface::find_in("wlan9", host()) {
        Err(InterfaceError::NotFound { name, available }) => {
            assert_eq!(name, "wlan9");
            assert_eq!(available, vec!["lo", "enp9s0", "eth1", "eth2", "tun0", "ppp0"]);
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn name_match_is_exact() {
    assert!(matches!(
        interface::find_in("enp9s", host()),
        Err(InterfaceError::NotFound { .. })
    ));
}

/*************************************************************
                     Unusable links
**************************************************************/

#[test]
fn loopback_is_rejected() {
    assert_eq!(interface::find_in("lo", host()), Err(InterfaceError::IsLoopback("lo".into())));
}

#[test]
fn down_interface_is_rejected() {
    assert_eq!(interface::find_in("eth2", host()), Err(InterfaceError::IsDown("eth2".into())));
}

#[test]
fn tunnel_without_hardware_address_is_rejected() {
    assert_eq!(
        interface::find_in("tun0", host()),
        Err(InterfaceError::NoMacAddress("tun0".into()))
    );
}

#[test]
fn point_to_point_link_is_rejected() {
    assert_eq!(
        interface::find_in("ppp0", host()),
        Err(InterfaceError::IsPointToPoint("ppp0".into()))
    );
}

#[test]
fn only_broadcast_ethernet_links_pass_the_usability_check() {
    let usable: Vec<String> = host()
        .into_iter()
        .filter(|intf| interface::check_usable(intf).is_ok())
        .map(|intf| intf.name)
        .collect();
    assert_eq!(usable, vec!["enp9s0", "eth1"]);
}
