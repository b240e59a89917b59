use crate::models::*;
use std::net::IpAddr;

/// TABLE_DUMP (v1) message, RFC 6396 section 4.2.
///
/// AS numbers in this type are always 2 octets. The peer address field
/// nominally matches the subtype AFI, but some collectors emitted IPv4
/// peer addresses inside IPv6 dumps; the decoder preserves that quirk, so
/// `peer_address` may be V4 even when the prefix is V6.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableDumpMessage {
    pub view_number: u16,
    pub sequence_number: u16,
    pub prefix: NetworkPrefix,
    pub status: u8,
    pub originated_time: u32,
    pub peer_address: IpAddr,
    pub peer_asn: Asn,
    pub attributes: Attributes,
}
