use crate::models::{Afi, Asn, Safi};
use num_enum::{FromPrimitive, IntoPrimitive};

/// Capability codes, RFC 5492.
///
/// <https://www.iana.org/assignments/capability-codes/capability-codes.xhtml>
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpCapabilityType {
    MULTIPROTOCOL_EXTENSIONS_FOR_BGP_4 = 1,
    ROUTE_REFRESH_CAPABILITY_FOR_BGP_4 = 2,
    OUTBOUND_ROUTE_FILTERING_CAPABILITY = 3,
    EXTENDED_NEXT_HOP_ENCODING = 5,
    BGP_EXTENDED_MESSAGE = 6,
    BGPSEC_CAPABILITY = 7,
    MULTIPLE_LABELS_CAPABILITY = 8,
    BGP_ROLE = 9,
    GRACEFUL_RESTART_CAPABILITY = 64,
    SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY = 65,
    SUPPORT_FOR_DYNAMIC_CAPABILITY = 67,
    MULTISESSION_BGP_CAPABILITY = 68,
    ADD_PATH_CAPABILITY = 69,
    ENHANCED_ROUTE_REFRESH_CAPABILITY = 70,
    LONG_LIVED_GRACEFUL_RESTART_CAPABILITY = 71,
    FQDN_CAPABILITY = 73,

    /// Catch-all type for any deprecated, unassigned, or reserved codes
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl BgpCapabilityType {
    pub const fn is_deprecated(&self) -> bool {
        matches!(self, BgpCapabilityType::Unknown(4 | 66 | 128 | 129 | 130 | 131))
    }

    pub const fn is_reserved(&self) -> bool {
        matches!(self, BgpCapabilityType::Unknown(0 | 255))
    }
}

/// Send/receive direction used by the ORF and ADD-PATH capabilities.
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum SendReceiveMode {
    Receive = 1,
    Send = 2,
    Both = 3,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Multiprotocol Extensions capability, RFC 2858: one AFI/SAFI pair.
///
/// The codes are kept raw so a capability advertising an address family the
/// decoder does not model (L2VPN and friends) still round-trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiprotocolCapability {
    pub afi: u16,
    pub safi: u8,
}

impl MultiprotocolCapability {
    pub fn afi(&self) -> Option<Afi> {
        Afi::try_from(self.afi).ok()
    }

    pub fn safi(&self) -> Option<Safi> {
        Safi::try_from(self.safi).ok()
    }
}

/// One entry of the Outbound Route Filtering capability, RFC 5291.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrfEntry {
    pub orf_type: u8,
    pub send_receive: SendReceiveMode,
}

/// Outbound Route Filtering capability, RFC 5291.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrfCapability {
    pub afi: u16,
    pub safi: u8,
    pub entries: Vec<OrfEntry>,
}

/// Per-address-family entry of the Graceful Restart capability, RFC 4724.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GracefulRestartEntry {
    pub afi: u16,
    pub safi: u8,
    pub flags: u8,
}

/// Graceful Restart capability, RFC 4724.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GracefulRestartCapability {
    /// High nibble of the first octet (restart-state and friends).
    pub flags: u8,
    /// Restart time in seconds, low 12 bits of the first two octets.
    pub restart_time: u16,
    pub entries: Vec<GracefulRestartEntry>,
}

/// One AFI/SAFI/direction triple of the ADD-PATH capability, RFC 7911.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddPathEntry {
    pub afi: u16,
    pub safi: u8,
    pub send_receive: SendReceiveMode,
}

/// Decoded capability value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CapabilityValue {
    Multiprotocol(MultiprotocolCapability),
    RouteRefresh,
    OutboundRouteFiltering(OrfCapability),
    GracefulRestart(GracefulRestartCapability),
    FourOctetAsNumber(Asn),
    AddPath(Vec<AddPathEntry>),
    /// Codes without a dedicated decoder keep their raw value bytes.
    Raw(Vec<u8>),
}

/// One capability entry from an OPEN message Capabilities parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capability {
    pub code: BgpCapabilityType,
    pub value: CapabilityValue,
}
