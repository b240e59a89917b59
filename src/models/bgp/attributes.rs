use crate::models::network::*;
use crate::models::{AsPath, Community, ExtendedCommunity, LargeCommunity};
use bitflags::bitflags;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};
use std::net::Ipv4Addr;

bitflags! {
    /// BGP path attribute flags octet, RFC 4271 section 4.3.
    ///
    /// The extended-length bit selects a 2-byte attribute length field.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct AttrFlags: u8 {
        const OPTIONAL   = 0b10000000;
        const TRANSITIVE = 0b01000000;
        const PARTIAL    = 0b00100000;
        const EXTENDED   = 0b00010000;
    }
}

/// Attribute type codes.
///
/// <https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-2>
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttrType {
    RESERVED,
    ORIGIN,
    AS_PATH,
    NEXT_HOP,
    MULTI_EXIT_DISCRIMINATOR,
    LOCAL_PREFERENCE,
    ATOMIC_AGGREGATE,
    AGGREGATOR,
    COMMUNITIES,
    ORIGINATOR_ID,
    CLUSTER_LIST,
    MP_REACHABLE_NLRI,
    MP_UNREACHABLE_NLRI,
    EXTENDED_COMMUNITIES,
    AS4_PATH,
    AS4_AGGREGATOR,
    PMSI_TUNNEL,
    TUNNEL_ENCAPSULATION,
    TRAFFIC_ENGINEERING,
    IPV6_ADDRESS_SPECIFIC_EXTENDED_COMMUNITIES,
    AIGP,
    BGP_LS_ATTRIBUTE,
    LARGE_COMMUNITIES,
    BGPSEC_PATH,
    ONLY_TO_CUSTOMER,
    ATTR_SET,
    DEVELOPMENT,
    /// Catch all for any unknown attribute types
    Unknown(u8),
}

impl From<u8> for AttrType {
    fn from(value: u8) -> Self {
        match value {
            0 => AttrType::RESERVED,
            1 => AttrType::ORIGIN,
            2 => AttrType::AS_PATH,
            3 => AttrType::NEXT_HOP,
            4 => AttrType::MULTI_EXIT_DISCRIMINATOR,
            5 => AttrType::LOCAL_PREFERENCE,
            6 => AttrType::ATOMIC_AGGREGATE,
            7 => AttrType::AGGREGATOR,
            8 => AttrType::COMMUNITIES,
            9 => AttrType::ORIGINATOR_ID,
            10 => AttrType::CLUSTER_LIST,
            14 => AttrType::MP_REACHABLE_NLRI,
            15 => AttrType::MP_UNREACHABLE_NLRI,
            16 => AttrType::EXTENDED_COMMUNITIES,
            17 => AttrType::AS4_PATH,
            18 => AttrType::AS4_AGGREGATOR,
            22 => AttrType::PMSI_TUNNEL,
            23 => AttrType::TUNNEL_ENCAPSULATION,
            24 => AttrType::TRAFFIC_ENGINEERING,
            25 => AttrType::IPV6_ADDRESS_SPECIFIC_EXTENDED_COMMUNITIES,
            26 => AttrType::AIGP,
            29 => AttrType::BGP_LS_ATTRIBUTE,
            32 => AttrType::LARGE_COMMUNITIES,
            33 => AttrType::BGPSEC_PATH,
            35 => AttrType::ONLY_TO_CUSTOMER,
            128 => AttrType::ATTR_SET,
            255 => AttrType::DEVELOPMENT,
            x => AttrType::Unknown(x),
        }
    }
}

impl From<AttrType> for u8 {
    fn from(value: AttrType) -> Self {
        match value {
            AttrType::RESERVED => 0,
            AttrType::ORIGIN => 1,
            AttrType::AS_PATH => 2,
            AttrType::NEXT_HOP => 3,
            AttrType::MULTI_EXIT_DISCRIMINATOR => 4,
            AttrType::LOCAL_PREFERENCE => 5,
            AttrType::ATOMIC_AGGREGATE => 6,
            AttrType::AGGREGATOR => 7,
            AttrType::COMMUNITIES => 8,
            AttrType::ORIGINATOR_ID => 9,
            AttrType::CLUSTER_LIST => 10,
            AttrType::MP_REACHABLE_NLRI => 14,
            AttrType::MP_UNREACHABLE_NLRI => 15,
            AttrType::EXTENDED_COMMUNITIES => 16,
            AttrType::AS4_PATH => 17,
            AttrType::AS4_AGGREGATOR => 18,
            AttrType::PMSI_TUNNEL => 22,
            AttrType::TUNNEL_ENCAPSULATION => 23,
            AttrType::TRAFFIC_ENGINEERING => 24,
            AttrType::IPV6_ADDRESS_SPECIFIC_EXTENDED_COMMUNITIES => 25,
            AttrType::AIGP => 26,
            AttrType::BGP_LS_ATTRIBUTE => 29,
            AttrType::LARGE_COMMUNITIES => 32,
            AttrType::BGPSEC_PATH => 33,
            AttrType::ONLY_TO_CUSTOMER => 35,
            AttrType::ATTR_SET => 128,
            AttrType::DEVELOPMENT => 255,
            AttrType::Unknown(x) => x,
        }
    }
}

/// Registry names for attribute codes deprecated by RFC 6938 and others.
pub fn get_deprecated_attr_type(attr_type: u8) -> Option<&'static str> {
    match attr_type {
        11 => Some("DPA"),
        12 => Some("ADVERTISER"),
        13 => Some("RCID_PATH/CLUSTER_ID"),
        19 => Some("SAFI Specific Attribute"),
        20 => Some("Connector Attribute"),
        21 => Some("AS_PATHLIMIT"),
        28 => Some("BGP Entropy Label Capability"),
        30 | 31 | 129 | 241 | 242 | 243 => Some("RFC8093"),
        _ => None,
    }
}

/// ORIGIN attribute values, RFC 4271.
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Origin {
    Igp = 0,
    Egp = 1,
    Incomplete = 2,
}

impl Display for Origin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::Igp => write!(f, "IGP"),
            Origin::Egp => write!(f, "EGP"),
            Origin::Incomplete => write!(f, "INCOMPLETE"),
        }
    }
}

/// MP_REACH_NLRI / MP_UNREACH_NLRI payload, RFC 4760.
///
/// For the truncated form embedded in TABLE_DUMP_V2 RIB entries
/// (RFC 6396 section 4.3.4) the AFI/SAFI are inherited from the enclosing
/// record and `prefixes` stays empty; only the next hop is carried.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nlri {
    pub afi: Afi,
    pub safi: Safi,
    pub next_hop: Option<NextHopAddress>,
    /// Route distinguisher preceding an L3VPN next hop.
    pub route_distinguisher: Option<RouteDistinguisher>,
    pub prefixes: Vec<NetworkPrefix>,
}

impl Nlri {
    pub const fn is_reachable(&self) -> bool {
        self.next_hop.is_some()
    }
}

/// One AIGP attribute TLV, RFC 7311. The value is the TLV's `length - 3`
/// bytes read as a big-endian number; a value wider than 8 bytes keeps
/// its low 64 bits (`length` preserves the declared width).
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AigpTlv {
    pub tlv_type: u8,
    pub length: u16,
    pub value: u64,
}

/// Raw bytes of an attribute kept verbatim (unknown or deprecated type).
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttrRaw {
    pub attr_type: AttrType,
    pub bytes: Vec<u8>,
}

/// Decoded attribute value.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeValue {
    Origin(Origin),
    AsPath {
        path: AsPath,
        is_as4: bool,
    },
    NextHop(std::net::IpAddr),
    MultiExitDiscriminator(u32),
    LocalPreference(u32),
    AtomicAggregate,
    Aggregator {
        asn: Asn,
        id: Ipv4Addr,
        is_as4: bool,
    },
    Communities(Vec<Community>),
    OriginatorId(Ipv4Addr),
    Clusters(Vec<Ipv4Addr>),
    MpReachNlri(Nlri),
    MpUnreachNlri(Nlri),
    ExtendedCommunities(Vec<ExtendedCommunity>),
    Aigp(Vec<AigpTlv>),
    LargeCommunities(Vec<LargeCommunity>),
    /// Nested attribute list, RFC 6368.
    AttrSet {
        origin_asn: Asn,
        attributes: Attributes,
    },
    Deprecated(AttrRaw),
    Unknown(AttrRaw),
}

impl AttributeValue {
    pub fn attr_type(&self) -> AttrType {
        match self {
            AttributeValue::Origin(_) => AttrType::ORIGIN,
            AttributeValue::AsPath { is_as4: false, .. } => AttrType::AS_PATH,
            AttributeValue::AsPath { is_as4: true, .. } => AttrType::AS4_PATH,
            AttributeValue::NextHop(_) => AttrType::NEXT_HOP,
            AttributeValue::MultiExitDiscriminator(_) => AttrType::MULTI_EXIT_DISCRIMINATOR,
            AttributeValue::LocalPreference(_) => AttrType::LOCAL_PREFERENCE,
            AttributeValue::AtomicAggregate => AttrType::ATOMIC_AGGREGATE,
            AttributeValue::Aggregator { is_as4: false, .. } => AttrType::AGGREGATOR,
            AttributeValue::Aggregator { is_as4: true, .. } => AttrType::AS4_AGGREGATOR,
            AttributeValue::Communities(_) => AttrType::COMMUNITIES,
            AttributeValue::OriginatorId(_) => AttrType::ORIGINATOR_ID,
            AttributeValue::Clusters(_) => AttrType::CLUSTER_LIST,
            AttributeValue::MpReachNlri(_) => AttrType::MP_REACHABLE_NLRI,
            AttributeValue::MpUnreachNlri(_) => AttrType::MP_UNREACHABLE_NLRI,
            AttributeValue::ExtendedCommunities(_) => AttrType::EXTENDED_COMMUNITIES,
            AttributeValue::Aigp(_) => AttrType::AIGP,
            AttributeValue::LargeCommunities(_) => AttrType::LARGE_COMMUNITIES,
            AttributeValue::AttrSet { .. } => AttrType::ATTR_SET,
            AttributeValue::Deprecated(raw) => raw.attr_type,
            AttributeValue::Unknown(raw) => raw.attr_type,
        }
    }
}

/// One path attribute: flags plus decoded value.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub flag: AttrFlags,
    pub value: AttributeValue,
}

impl Attribute {
    pub fn is_extended(&self) -> bool {
        self.flag.contains(AttrFlags::EXTENDED)
    }
}

/// Convenience wrapper for a decoded attribute list, in wire order.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attributes {
    pub inner: Vec<Attribute>,
}

impl Attributes {
    pub fn has_attr(&self, ty: AttrType) -> bool {
        self.inner.iter().any(|x| x.value.attr_type() == ty)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn origin(&self) -> Option<Origin> {
        self.inner.iter().find_map(|x| match &x.value {
            AttributeValue::Origin(v) => Some(*v),
            _ => None,
        })
    }

    pub fn as_path(&self) -> Option<&AsPath> {
        self.inner.iter().find_map(|x| match &x.value {
            AttributeValue::AsPath { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn next_hop(&self) -> Option<std::net::IpAddr> {
        self.inner.iter().find_map(|x| match &x.value {
            AttributeValue::NextHop(v) => Some(*v),
            _ => None,
        })
    }

    pub fn get_reachable(&self) -> Option<&Nlri> {
        self.inner.iter().find_map(|x| match &x.value {
            AttributeValue::MpReachNlri(v) => Some(v),
            _ => None,
        })
    }

    pub fn get_unreachable(&self) -> Option<&Nlri> {
        self.inner.iter().find_map(|x| match &x.value {
            AttributeValue::MpUnreachNlri(v) => Some(v),
            _ => None,
        })
    }
}

impl From<Vec<Attribute>> for Attributes {
    fn from(inner: Vec<Attribute>) -> Self {
        Attributes { inner }
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        Attributes {
            inner: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Attributes {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
