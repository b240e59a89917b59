use crate::models::*;
use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

/// TABLE_DUMP_V2 subtypes, RFC 6396 section 4.3, extended by RFC 6397
/// (GEO_PEER_TABLE) and RFC 8050 (ADDPATH forms).
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum TableDumpV2Type {
    PeerIndexTable = 1,
    RibIpv4Unicast = 2,
    RibIpv4Multicast = 3,
    RibIpv6Unicast = 4,
    RibIpv6Multicast = 5,
    RibGeneric = 6,
    GeoPeerTable = 7,
    RibIpv4UnicastAddPath = 8,
    RibIpv4MulticastAddPath = 9,
    RibIpv6UnicastAddPath = 10,
    RibIpv6MulticastAddPath = 11,
    RibGenericAddPath = 12,
}

impl TableDumpV2Type {
    pub const fn is_addpath(&self) -> bool {
        matches!(
            self,
            TableDumpV2Type::RibIpv4UnicastAddPath
                | TableDumpV2Type::RibIpv4MulticastAddPath
                | TableDumpV2Type::RibIpv6UnicastAddPath
                | TableDumpV2Type::RibIpv6MulticastAddPath
                | TableDumpV2Type::RibGenericAddPath
        )
    }
}

#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TableDumpV2Message {
    PeerIndexTable(PeerIndexTable),
    RibAfi(RibAfiEntries),
    RibGeneric(RibGenericEntries),
}

bitflags! {
    /// Peer-entry flags byte: bit 0 selects an IPv6 peer address, bit 1 a
    /// 4-octet peer AS number.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct PeerType: u8 {
        const ADDRESS_FAMILY_IPV6 = 0x1;
        const AS_SIZE_32BIT = 0x2;
    }
}

/// One peer entry of a PEER_INDEX_TABLE.
#[derive(Debug, PartialEq, Copy, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Peer {
    pub peer_type: PeerType,
    pub peer_bgp_id: Ipv4Addr,
    pub peer_address: IpAddr,
    pub peer_asn: Asn,
}

/// PEER_INDEX_TABLE, RFC 6396 section 4.3.1.
///
/// RIB entries of the records that follow reference peers by index into
/// this table; the lookup maps are kept so callers can do that resolution
/// themselves (the decoder does not).
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PeerIndexTable {
    pub collector_bgp_id: Ipv4Addr,
    pub view_name: String,
    pub id_peer_map: HashMap<u16, Peer>,
    pub peer_addr_id_map: HashMap<IpAddr, u16>,
}

impl PeerIndexTable {
    pub fn peer_count(&self) -> u16 {
        self.id_peer_map.len() as u16
    }

    /// Get peer by index.
    pub fn get_peer_by_id(&self, peer_id: &u16) -> Option<&Peer> {
        self.id_peer_map.get(peer_id)
    }

    /// Get peer index by IP address.
    pub fn get_peer_id_by_addr(&self, peer_addr: &IpAddr) -> Option<u16> {
        self.peer_addr_id_map.get(peer_addr).copied()
    }
}

/// One RIB entry: peer index, originated time, optional ADD-PATH path
/// identifier, and the path attributes.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RibEntry {
    pub peer_index: u16,
    pub originated_time: u32,
    pub path_id: Option<u32>,
    pub attributes: Attributes,
}

/// AFI/SAFI-specific RIB record (RIB_IPV4_UNICAST and friends),
/// RFC 6396 section 4.3.2.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RibAfiEntries {
    pub rib_type: TableDumpV2Type,
    pub sequence_number: u32,
    pub prefix: NetworkPrefix,
    pub rib_entries: Vec<RibEntry>,
}

/// RIB_GENERIC[_ADDPATH] record, RFC 6396 section 4.3.3.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RibGenericEntries {
    pub rib_type: TableDumpV2Type,
    pub sequence_number: u32,
    pub afi: Afi,
    pub safi: Safi,
    pub nlri: Vec<NetworkPrefix>,
    pub rib_entries: Vec<RibEntry>,
}
