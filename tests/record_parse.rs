//! End-to-end decoding of hand-assembled MRT byte streams.
use bytes::{BufMut, BytesMut};
use mrtkit::models::*;
use mrtkit::{ErrorKind, MrtkitParser};
use std::io::Cursor;
use std::net::IpAddr;
use std::str::FromStr;

/// Frame a payload with an MRT common header.
fn mrt_record(timestamp: u32, entry_type: u16, sub_type: u16, body: &[u8]) -> Vec<u8> {
    let mut bytes = BytesMut::new();
    bytes.put_u32(timestamp);
    bytes.put_u16(entry_type);
    bytes.put_u16(sub_type);
    bytes.put_u32(body.len() as u32);
    bytes.put_slice(body);
    bytes.to_vec()
}

fn bgp_message(msg_type: u8, body: &[u8]) -> Vec<u8> {
    let mut bytes = BytesMut::new();
    bytes.put_slice(&[0xFF; 16]); // marker
    bytes.put_u16(19 + body.len() as u16);
    bytes.put_u8(msg_type);
    bytes.put_slice(body);
    bytes.to_vec()
}

fn parse_one(stream: Vec<u8>) -> MrtRecord {
    let mut parser = MrtkitParser::from_reader(Cursor::new(stream));
    let record = parser.next_record().unwrap().unwrap();
    assert!(parser.next_record().unwrap().is_none());
    record
}

/// Minimal TABLE_DUMP IPv4 record: one route from peer AS65000 with
/// ORIGIN, empty AS_PATH, and NEXT_HOP attributes.
#[test]
fn test_table_dump_ipv4_record() {
    let mut body = BytesMut::new();
    body.put_u16(0); // view
    body.put_u16(1); // sequence
    body.put_slice(&[192, 168, 0, 0]); // prefix
    body.put_u8(16); // prefix length
    body.put_u8(1); // status
    body.put_u32(0); // originated time
    body.put_slice(&[192, 168, 0, 1]); // peer ip
    body.put_u16(65000); // peer as (2 octets)
    let attrs: &[u8] = &[
        0x40, 0x01, 0x01, 0x00, // ORIGIN = IGP
        0x40, 0x02, 0x00, // AS_PATH, empty
        0x40, 0x03, 0x04, 192, 168, 0, 1, // NEXT_HOP
    ];
    body.put_u16(attrs.len() as u16);
    body.put_slice(attrs);

    let record = parse_one(mrt_record(0, 12, 1, &body));
    assert_eq!(record.common_header.entry_type, EntryType::TABLE_DUMP);
    assert_eq!(record.common_header.entry_subtype, 1);

    let MrtMessage::TableDumpMessage(td) = record.message else {
        panic!("expected TABLE_DUMP message");
    };
    assert_eq!(td.prefix.prefix.to_string(), "192.168.0.0/16");
    assert_eq!(td.peer_address, IpAddr::from_str("192.168.0.1").unwrap());
    assert_eq!(td.peer_asn, Asn::new_16bit(65000));
    assert_eq!(td.peer_asn.format(AsnFormat::Asplain), "65000");
    assert_eq!(td.attributes.origin(), Some(Origin::Igp));
    assert!(td.attributes.as_path().unwrap().is_empty());
    assert_eq!(
        td.attributes.next_hop(),
        Some(IpAddr::from_str("192.168.0.1").unwrap())
    );
}

/// TABLE_DUMP_V2 PEER_INDEX_TABLE with one IPv4 peer carrying a 2-octet
/// ASN.
#[test]
fn test_peer_index_table_record() {
    let mut body = BytesMut::new();
    body.put_slice(&[10, 0, 0, 1]); // collector bgp id
    body.put_u16(0); // empty view name
    body.put_u16(1); // one peer
    body.put_u8(0x00); // flags: IPv4 peer, 2-octet asn
    body.put_slice(&[10, 0, 0, 1]); // peer bgp id
    body.put_slice(&[192, 168, 0, 100]); // peer ip
    body.put_u16(65000);

    let record = parse_one(mrt_record(0, 13, 1, &body));
    let MrtMessage::TableDumpV2Message(TableDumpV2Message::PeerIndexTable(table)) =
        record.message
    else {
        panic!("expected PEER_INDEX_TABLE");
    };
    assert_eq!(table.peer_count(), 1);
    let peer = table.get_peer_by_id(&0).unwrap();
    assert_eq!(peer.peer_type.bits(), 0);
    assert_eq!(peer.peer_bgp_id.to_string(), "10.0.0.1");
    assert_eq!(peer.peer_address.to_string(), "192.168.0.100");
    assert_eq!(peer.peer_asn.format(AsnFormat::Asplain), "65000");
}

/// RIB_IPV4_UNICAST_ADDPATH: the path identifier sits on the RIB entry.
#[test]
fn test_rib_ipv4_unicast_addpath_record() {
    let mut body = BytesMut::new();
    body.put_u32(7); // sequence
    body.put_u8(8); // prefix length
    body.put_u8(10); // 10.0.0.0/8
    body.put_u16(1); // entry count
    body.put_u16(0); // peer index
    body.put_u32(0); // originated time
    body.put_u32(0x11223344); // path id
    let attrs: &[u8] = &[0x40, 0x01, 0x01, 0x01]; // ORIGIN = EGP
    body.put_u16(attrs.len() as u16);
    body.put_slice(attrs);

    let record = parse_one(mrt_record(0, 13, 8, &body));
    let MrtMessage::TableDumpV2Message(TableDumpV2Message::RibAfi(rib)) = record.message
    else {
        panic!("expected RIB message");
    };
    assert_eq!(rib.sequence_number, 7);
    assert_eq!(rib.prefix.prefix.to_string(), "10.0.0.0/8");
    assert_eq!(rib.rib_entries.len(), 1);
    assert_eq!(rib.rib_entries[0].path_id, Some(287454020));
    assert_eq!(rib.rib_entries[0].attributes.origin(), Some(Origin::Egp));
}

/// Non-ADDPATH RIB entries must not carry a path identifier.
#[test]
fn test_rib_ipv4_unicast_no_path_id() {
    let mut body = BytesMut::new();
    body.put_u32(1);
    body.put_u8(8);
    body.put_u8(10);
    body.put_u16(1);
    body.put_u16(0);
    body.put_u32(0);
    let attrs: &[u8] = &[0x40, 0x01, 0x01, 0x00];
    body.put_u16(attrs.len() as u16);
    body.put_slice(attrs);

    let record = parse_one(mrt_record(0, 13, 2, &body));
    let MrtMessage::TableDumpV2Message(TableDumpV2Message::RibAfi(rib)) = record.message
    else {
        panic!("expected RIB message");
    };
    assert_eq!(rib.rib_entries[0].path_id, None);
}

/// BGP4MP_MESSAGE_AS4 UPDATE announcing 2001:db8::/32 through
/// MP_REACH_NLRI with next hop fe80::1.
#[test]
fn test_bgp4mp_message_as4_mp_reach_ipv6() {
    // MP_REACH_NLRI attribute value
    let mut mp_reach = BytesMut::new();
    mp_reach.put_u16(2); // AFI IPv6
    mp_reach.put_u8(1); // SAFI unicast
    mp_reach.put_u8(16); // next hop length
    mp_reach.put_slice(&[0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
    mp_reach.put_u8(0); // reserved
    mp_reach.put_u8(32); // /32
    mp_reach.put_slice(&[0x20, 0x01, 0x0d, 0xb8]);

    let mut update = BytesMut::new();
    update.put_u16(0); // withdrawn length
    let mut attrs = BytesMut::new();
    attrs.put_slice(&[0x80, 0x0E, mp_reach.len() as u8]); // optional, MP_REACH_NLRI
    attrs.put_slice(&mp_reach);
    update.put_u16(attrs.len() as u16);
    update.put_slice(&attrs);

    let mut body = BytesMut::new();
    body.put_u32(196608); // peer AS (4 octets)
    body.put_u32(65001); // local AS
    body.put_u16(0); // ifindex
    body.put_u16(1); // AFI IPv4 peering
    body.put_slice(&[10, 0, 0, 1]);
    body.put_slice(&[10, 0, 0, 2]);
    body.put_slice(&bgp_message(2, &update));

    let record = parse_one(mrt_record(0, 16, 4, &body));
    let MrtMessage::Bgp4Mp(Bgp4MpEnum::Message(message)) = record.message else {
        panic!("expected BGP4MP message");
    };
    assert_eq!(message.peer_asn, Asn::new_32bit(196608));

    let BgpMessage::Update(update) = &message.bgp_message else {
        panic!("expected UPDATE");
    };
    let nlri = update.attributes.get_reachable().unwrap();
    assert_eq!(nlri.afi, Afi::Ipv6);
    assert_eq!(nlri.safi, Safi::Unicast);
    assert_eq!(
        nlri.next_hop,
        Some(NextHopAddress::Ipv6("fe80::1".parse().unwrap()))
    );
    assert_eq!(nlri.prefixes.len(), 1);
    assert_eq!(nlri.prefixes[0].prefix.to_string(), "2001:db8::/32");
    assert!(update.announced_prefixes.is_empty());
    assert!(update.withdrawn_prefixes.is_empty());
}

/// A RIB record whose prefix has non-zero bits beyond the declared length
/// is surfaced as a data error naming the dirty prefix, and the stream
/// continues with the next record.
#[test]
fn test_malformed_prefix_record() {
    let mut bad_body = BytesMut::new();
    bad_body.put_u32(1); // sequence
    bad_body.put_u8(22); // /22 with a bit set at position 24
    bad_body.put_slice(&[10, 0, 1]);
    bad_body.put_u16(0);

    let mut stream = mrt_record(0, 13, 2, &bad_body);
    // follow with a healthy record to prove resynchronization
    let mut good_body = BytesMut::new();
    good_body.put_u32(2);
    good_body.put_u8(8);
    good_body.put_u8(10);
    good_body.put_u16(0);
    stream.extend(mrt_record(0, 13, 2, &good_body));

    let mut parser = MrtkitParser::from_reader(Cursor::new(stream));
    let err = parser.next_record().unwrap_err();
    assert_eq!(err.error.kind(), ErrorKind::DataError);
    assert_eq!(err.error.to_string(), "Error: Invalid prefix 10.0.1.0/22");
    assert_eq!(err.header.unwrap().entry_type, EntryType::TABLE_DUMP_V2);
    assert!(err.bytes.is_some());

    let record = parser.next_record().unwrap().unwrap();
    let MrtMessage::TableDumpV2Message(TableDumpV2Message::RibAfi(rib)) = record.message
    else {
        panic!("expected RIB message");
    };
    assert_eq!(rib.sequence_number, 2);
    assert!(parser.next_record().unwrap().is_none());
}

/// An UPDATE whose NLRI region decodes to duplicate plain prefixes is
/// re-parsed in ADD-PATH mode, yielding distinct path identifiers.
#[test]
fn test_update_add_path_retry() {
    let _ = env_logger::builder().is_test(true).try_init();

    let mut update = BytesMut::new();
    update.put_u16(0); // withdrawn length
    update.put_u16(0); // attribute length
    // path id 1 + /0, path id 2 + /0
    update.put_slice(&hex::decode("00000001000000000200").unwrap());

    let mut body = BytesMut::new();
    body.put_u16(65000);
    body.put_u16(65001);
    body.put_u16(0);
    body.put_u16(1);
    body.put_slice(&[10, 0, 0, 1]);
    body.put_slice(&[10, 0, 0, 2]);
    body.put_slice(&bgp_message(2, &update));

    // plain BGP4MP_MESSAGE: no ADD-PATH signalled by the subtype
    let record = parse_one(mrt_record(0, 16, 1, &body));
    let MrtMessage::Bgp4Mp(Bgp4MpEnum::Message(message)) = record.message else {
        panic!("expected BGP4MP message");
    };
    assert_eq!(message.peer_asn, Asn::new_16bit(65000));
    let BgpMessage::Update(update) = &message.bgp_message else {
        panic!("expected UPDATE");
    };
    assert_eq!(update.announced_prefixes.len(), 2);
    assert_eq!(update.announced_prefixes[0].path_id, Some(1));
    assert_eq!(update.announced_prefixes[1].path_id, Some(2));
}

/// BGP4MP_ET carries an extra microsecond timestamp ahead of the body.
#[test]
fn test_bgp4mp_et_microsecond_timestamp() {
    let mut body = BytesMut::new();
    body.put_u32(123456); // microseconds
    body.put_u16(65000);
    body.put_u16(65001);
    body.put_u16(0);
    body.put_u16(1);
    body.put_slice(&[10, 0, 0, 1]);
    body.put_slice(&[10, 0, 0, 2]);
    body.put_u16(1); // Idle
    body.put_u16(2); // Connect

    let record = parse_one(mrt_record(1_600_000_000, 17, 0, &body));
    assert_eq!(record.common_header.entry_type, EntryType::BGP4MP_ET);
    assert_eq!(record.common_header.microsecond_timestamp, Some(123456));
    // length excludes the microsecond timestamp
    assert_eq!(record.common_header.length as usize, body.len() - 4);
    let MrtMessage::Bgp4Mp(Bgp4MpEnum::StateChange(change)) = record.message else {
        panic!("expected state change");
    };
    assert_eq!(change.old_state, BgpState::Idle);
    assert_eq!(change.new_state, BgpState::Connect);
}

/// BGP4MP state change with NOTIFICATION and OPEN messages mixed into one
/// stream, in file order.
#[test]
fn test_mixed_stream_order() {
    let mut state_change = BytesMut::new();
    state_change.put_u16(65000);
    state_change.put_u16(65001);
    state_change.put_u16(0);
    state_change.put_u16(1);
    state_change.put_slice(&[10, 0, 0, 1]);
    state_change.put_slice(&[10, 0, 0, 2]);
    state_change.put_u16(5);
    state_change.put_u16(6);

    let mut notification_body = BytesMut::new();
    notification_body.put_u16(65000);
    notification_body.put_u16(65001);
    notification_body.put_u16(0);
    notification_body.put_u16(1);
    notification_body.put_slice(&[10, 0, 0, 1]);
    notification_body.put_slice(&[10, 0, 0, 2]);
    notification_body.put_slice(&bgp_message(3, &[6, 2]));

    let mut stream = mrt_record(100, 16, 0, &state_change);
    stream.extend(mrt_record(200, 16, 1, &notification_body));

    let parser = MrtkitParser::from_reader(Cursor::new(stream));
    let records: Vec<MrtRecord> = parser.into_iter().collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].common_header.timestamp, 100);
    assert_eq!(records[1].common_header.timestamp, 200);

    let MrtMessage::Bgp4Mp(Bgp4MpEnum::Message(msg)) = &records[1].message else {
        panic!("expected message");
    };
    let BgpMessage::Notification(notification) = &msg.bgp_message else {
        panic!("expected NOTIFICATION");
    };
    assert_eq!(notification.error_name(), "Cease");
    assert_eq!(notification.subcode_name(), "Administrative Shutdown");
}

/// Re-decoding the same bytes yields an identical tree, and decoding a
/// concatenation yields the concatenation of the record streams.
#[test]
fn test_idempotent_and_concatenation() {
    let mut body = BytesMut::new();
    body.put_u32(1);
    body.put_u8(8);
    body.put_u8(10);
    body.put_u16(0);
    let file_a = mrt_record(10, 13, 2, &body);

    let mut body_b = BytesMut::new();
    body_b.put_u32(2);
    body_b.put_u8(16);
    body_b.put_slice(&[192, 168]);
    body_b.put_u16(0);
    let file_b = mrt_record(20, 13, 2, &body_b);

    let first = parse_one(file_a.clone());
    let again = parse_one(file_a.clone());
    assert_eq!(first, again);

    let mut concatenated = file_a;
    concatenated.extend(file_b.clone());
    let records: Vec<MrtRecord> = MrtkitParser::from_reader(Cursor::new(concatenated))
        .into_iter()
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], first);
    assert_eq!(records[1], parse_one(file_b));
}
