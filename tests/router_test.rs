mod common;

use aprs_router::path::PathMatching;
use common::{CALLSIGN, TestNode, packet, station_config};
use std::sync::Arc;
use std::time::Duration;

#[test]
fn own_packets_produce_no_output() {
    let mut node = TestNode::started(station_config());

    for (dest, path) in [("APRS", "WIDE1-1"), ("APRS-1", ""), ("APRS", ""), ("APRS", "RFONLY")] {
        let report = node.route(packet(CALLSIGN, dest, path));
        assert!(report.received);
        assert!(!report.gated && !report.digipeated, "{} {}", dest, path);
    }

    assert!(node.to_aprs_is.is_empty());
    assert!(node.to_modem.is_empty());
}

#[test]
fn rf_only_paths_are_never_gated() {
    for matching in [PathMatching::Token, PathMatching::Substring] {
        let mut config = station_config();
        config.path_matching = matching;
        let mut node = TestNode::started(config);

        for path in [
            "RFONLY",
            "NOGATE",
            "TCPIP*",
            "WIDE1-1,RFONLY",
            "NOGATE,WIDE1-1",
            "TCPIP,NOGATE,RFONLY",
        ] {
            node.route(packet("DL1ABC-7", "APRS", path));
        }
        assert!(node.to_aprs_is.is_empty(), "{:?}", matching);
    }
}

#[test]
fn gated_copy_carries_q_construct() {
    let mut node = TestNode::started(station_config());

    node.route(packet("DL1ABC-7", "APRS", "WIDE1-1"));
    node.route(packet("DL1ABC-7", "APRS", ""));

    let gated = TestNode::drain(&node.to_aprs_is);
    assert_eq!(gated.len(), 2);
    assert_eq!(gated[0].path, "WIDE1-1,qAR,N0CALL");
    assert_eq!(gated[1].path, "qAR,N0CALL");
    assert_eq!(gated[1].encode(), "DL1ABC-7>APRS,qAR,N0CALL:!4903.50N/07201.75W-Test");
}

#[test]
fn alias_digipeat_rewrites_path_only() {
    let mut node = TestNode::started(station_config());

    let report = node.route(packet("DL1ABC-7", "APRS", "WIDE1-1"));
    assert!(report.gated && report.digipeated);

    let repeated = TestNode::drain(&node.to_modem);
    assert_eq!(repeated.len(), 1);
    assert_eq!(repeated[0].path, "N0CALL*");
    assert_eq!(repeated[0].destination, "APRS");
    assert_eq!(repeated[0].source, "DL1ABC-7");

    // the APRS-IS copy still has the original path
    let gated = TestNode::drain(&node.to_aprs_is);
    assert_eq!(gated[0].path, "WIDE1-1,qAR,N0CALL");
}

#[test]
fn destination_ssid_digipeat_strips_ssid() {
    let mut node = TestNode::started(station_config());

    node.route(packet("DL1ABC-7", "APRS-1", "WIDE2-1"));

    let repeated = TestNode::drain(&node.to_modem);
    assert_eq!(repeated.len(), 1);
    assert_eq!(repeated[0].destination, "APRS");
    assert_eq!(repeated[0].path, "N0CALL*");
}

#[test]
fn packets_through_this_station_are_not_repeated() {
    let mut node = TestNode::started(station_config());

    node.route(packet("DL1ABC-7", "APRS", "N0CALL*,WIDE1-1"));
    node.route(packet("DL1ABC-7", "APRS-1", "N0CALL*"));
    node.route(packet("DL1ABC-7", "APRS-2", "WIDE1-1,N0CALL"));

    assert!(node.to_modem.is_empty());
    // gating is unaffected by the digipeat loop check
    assert_eq!(node.to_aprs_is.len(), 3);
}

#[test]
fn neither_strategy_means_no_rf_output() {
    let mut config = station_config();
    config.aprs_is.active = false;
    let mut node = TestNode::started(config);

    let report = node.route(packet("DL1ABC-7", "APRS", "WIDE2-2"));
    assert!(report.received && !report.digipeated && !report.gated);
    assert!(node.to_modem.is_empty());
    assert!(node.to_aprs_is.is_empty());
}

#[test]
fn inbound_queue_is_consumed_one_per_cycle_in_order() {
    let mut node = TestNode::started(station_config());

    for source in ["AA1AA", "BB2BB", "CC3CC"] {
        node.from_modem
            .add_element(packet(source, "APRS", "WIDE1-1").into_shared());
    }

    node.cycle();
    assert_eq!(node.from_modem.len(), 2);
    node.cycle();
    node.cycle();
    assert!(node.from_modem.is_empty());
    assert!(!node.cycle().received);

    let sources: Vec<String> = TestNode::drain(&node.to_modem)
        .iter()
        .map(|p| p.source.clone())
        .collect();
    assert_eq!(sources, ["AA1AA", "BB2BB", "CC3CC"]);
}

#[test]
fn beacon_honours_both_toggles_independently() {
    for (aprs_is, digi_beacon) in [(false, false), (false, true), (true, false), (true, true)] {
        let mut config = station_config();
        config.aprs_is.active = aprs_is;
        config.digi.beacon = digi_beacon;
        let mut node = TestNode::new(config);

        // startup beacon, then exactly one more per elapsed period
        assert!(node.cycle().beacon);
        node.advance(Duration::from_secs(9 * 60 + 59));
        assert!(!node.cycle().beacon);
        node.advance(Duration::from_secs(1));
        assert!(node.cycle().beacon);
        assert!(!node.cycle().beacon);

        let expected = |on: bool| if on { 2 } else { 0 };
        assert_eq!(node.to_aprs_is.len(), expected(aprs_is), "{} {}", aprs_is, digi_beacon);
        assert_eq!(node.to_modem.len(), expected(digi_beacon), "{} {}", aprs_is, digi_beacon);
        // the display is notified regardless of toggles
        assert_eq!(node.display.len(), 2);
    }
}

#[test]
fn beacon_is_identical_across_firings() {
    let mut node = TestNode::new(station_config());

    node.cycle();
    node.advance(Duration::from_secs(600));
    node.cycle();

    let rf = TestNode::drain(&node.to_modem);
    let is = TestNode::drain(&node.to_aprs_is);
    assert_eq!(rf.len(), 2);
    assert_eq!(is.len(), 2);
    assert_eq!(rf[0].encode(), rf[1].encode());
    assert!(Arc::ptr_eq(&rf[0], &is[1]));
    assert_eq!(
        rf[0].encode(),
        "N0CALL>APLG01:=4903.50NL07201.75W&LoRa APRS iGate"
    );

    let frame = node.display.get_element().unwrap();
    assert_eq!(frame.header, "BEACON");
    assert!(frame.text.contains("APLG01"));
}

#[test]
fn status_line_tracks_next_beacon() {
    let mut node = TestNode::new(station_config());

    node.cycle();
    assert_eq!(node.router.state_info(), "beacon 10:0");
    node.advance(Duration::from_secs(125));
    node.cycle();
    assert_eq!(node.router.state_info(), "beacon 7:55");
}
