use std::fs;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::Duration;

use dhcpscout_common::config::ScanConfig;
use dhcpscout_common::network::server::DiscoveredServer;
use dhcpscout_core::network::channel::{self, EthernetHandle};
use dhcpscout_core::probe::{self, ProbeFrame};
use dhcpscout_core::{LoadError, Registry, ScanResult, classify, redlist, scanner};
use dhcpscout_protocols::dhcp::{BootpOp, DHCP_CLIENT_PORT, DHCP_SERVER_PORT};
use dhcpscout_protocols::{self as protocol, DhcpMessage, DhcpOption, MessageType};
use pnet::datalink::{self, MacAddr, NetworkInterface, dummy};
use tokio::sync::mpsc::{self, UnboundedSender};

const CLIENT: MacAddr = MacAddr(0x00, 0x1b, 0x21, 0x01, 0x02, 0x03);
const SERVER_AA: MacAddr = MacAddr(0xaa, 0xaa, 0xaa, 0xaa, 0xaa, 0xaa);
const SERVER_BB: MacAddr = MacAddr(0xbb, 0xbb, 0xbb, 0xbb, 0xbb, 0xbb);
const WINDOW: Duration = Duration::from_millis(200);

fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("dhcpscout-it-{name}-{}.csv", std::process::id()))
}

fn test_interface() -> NetworkInterface {
    NetworkInterface {
        mac: Some(CLIENT),
        flags: 0x1 | 0x2,
        ..dummy::dummy_interface(0)
    }
}

fn queue_handle() -> (EthernetHandle, UnboundedSender<Vec<u8>>) {
    let tx = match dummy::channel(&test_interface(), dummy::Config::default()) {
        Ok(datalink::Channel::Ethernet(tx, _)) => tx,
        _ => panic!("dummy channel must be ethernet"),
    };
    let (queue_tx, queue_rx) = mpsc::unbounded_channel();
    (EthernetHandle { tx, rx: queue_rx }, queue_tx)
}

fn offer(server: MacAddr, src_ip: Ipv4Addr, xid: u32) -> Vec<u8> {
    let message = DhcpMessage {
        op: BootpOp::Reply,
        yiaddr: Ipv4Addr::new(10, 0, 0, 100),
        options: vec![
            DhcpOption::MessageType(MessageType::Offer),
            DhcpOption::ServerIdentifier(src_ip),
        ],
        ..DhcpMessage::discover(CLIENT, xid)
    };
    protocol::create_dhcp_frame(
        server,
        MacAddr::broadcast(),
        src_ip,
        Ipv4Addr::BROADCAST,
        (DHCP_SERVER_PORT, DHCP_CLIENT_PORT),
        &message.encode().unwrap(),
    )
    .unwrap()
}

async fn scan(probe: &ProbeFrame, frames: Vec<Vec<u8>>) -> Vec<DiscoveredServer> {
    let (handle, queue) = queue_handle();
    for frame in frames {
        queue.send(frame).unwrap();
    }
    let cfg = ScanConfig::new("eth0").with_timeout(WINDOW);
    scanner::scan_with(handle, probe, &cfg, std::future::pending(), None)
        .await
        .unwrap()
}

#[tokio::test]
async fn unknown_responder_ends_up_on_the_redlist() {
    let input = scratch("known-input");
    let output = scratch("known-output");
    fs::write(&input, "core-switch,10.0.0.1\n").unwrap();

    let registry = Registry::load(&input).unwrap();
    let probe = probe::build_for(&test_interface()).unwrap();
    let servers = scan(
        &probe,
        vec![
            offer(SERVER_AA, Ipv4Addr::new(10, 0, 0, 1), probe.xid),
            offer(SERVER_BB, Ipv4Addr::new(10, 0, 0, 99), probe.xid),
        ],
    )
    .await;

    let result: ScanResult = classify(&servers, &registry);
    redlist::report(&result.redlist(), &output).unwrap();

    assert_eq!(result.authorized.len(), 1);
    assert_eq!(result.authorized[0].mac, SERVER_AA);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "10.0.0.99,bb:bb:bb:bb:bb:bb\n"
    );

    fs::remove_file(&input).unwrap();
    fs::remove_file(&output).unwrap();
}

#[tokio::test]
async fn silent_segment_writes_an_empty_redlist() {
    let input = scratch("silent-input");
    let output = scratch("silent-output");
    fs::write(&input, "core-switch,10.0.0.1\n").unwrap();
    fs::write(&output, "stale,entry\n").unwrap();

    let registry = Registry::load(&input).unwrap();
    let probe = probe::build_for(&test_interface()).unwrap();
    let servers = scan(&probe, vec![]).await;

    let result = classify(&servers, &registry);
    redlist::report(&result.redlist(), &output).unwrap();

    assert!(result.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "");

    fs::remove_file(&input).unwrap();
    fs::remove_file(&output).unwrap();
}

#[tokio::test]
async fn replies_to_another_transaction_are_not_reported() {
    let registry = Registry::from_servers(vec![]);
    let probe = probe::build_for(&test_interface()).unwrap();
    let servers = scan(
        &probe,
        vec![offer(SERVER_BB, Ipv4Addr::new(10, 0, 0, 99), probe.xid.wrapping_add(1))],
    )
    .await;

    assert!(classify(&servers, &registry).is_empty());
}

#[test]
fn missing_registry_fails_before_scanning() {
    let input = scratch("does-not-exist");
    let _ = fs::remove_file(&input);

    match Registry::load(&input) {
        Err(LoadError::NotFound(path)) => assert_eq!(path, input),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn probe_goes_out_and_replies_come_back_through_the_capture_thread() {
    let intf = test_interface();
    let probe = probe::build_for(&intf).unwrap();

    let mut dummy_cfg = dummy::Config::default();
    let inject = dummy_cfg.inject_handle().unwrap();
    let written = dummy_cfg.read_handle().unwrap();
    let opener = move |i: &NetworkInterface, _: datalink::Config| dummy::channel(i, dummy_cfg);
    let handle = channel::start_capture_with(&intf, opener).unwrap();

    inject
        .send(Ok(offer(SERVER_BB, Ipv4Addr::new(192, 168, 7, 1), probe.xid).into_boxed_slice()))
        .unwrap();

    let cfg = ScanConfig::new(intf.name.clone()).with_timeout(WINDOW);
    let servers = scanner::scan_with(handle, &probe, &cfg, std::future::pending(), None)
        .await
        .unwrap();

    assert_eq!(written.try_recv().unwrap().as_ref(), probe.bytes());
    assert_eq!(servers.len(), 1);
    assert_eq!(servers[0].ip, Ipv4Addr::new(192, 168, 7, 1));
    assert_eq!(servers[0].mac, SERVER_BB);
}
