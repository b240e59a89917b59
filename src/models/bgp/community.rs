use num_enum::{FromPrimitive, IntoPrimitive};
use std::fmt::{Display, Formatter};

/// Regular BGP community, RFC 1997 (plus NO_PEER from RFC 3765).
///
/// Well-known values get their registry names; everything else displays as
/// `high16:low16`.
#[derive(Debug, PartialEq, Copy, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Community {
    NoExport,
    NoAdvertise,
    NoExportSubConfed,
    NoPeer,
    Custom(u16, u16),
}

impl From<u32> for Community {
    fn from(value: u32) -> Self {
        match value {
            0xffff_ff01 => Community::NoExport,
            0xffff_ff02 => Community::NoAdvertise,
            0xffff_ff03 => Community::NoExportSubConfed,
            0xffff_ff04 => Community::NoPeer,
            v => Community::Custom((v >> 16) as u16, (v & 0xffff) as u16),
        }
    }
}

impl From<Community> for u32 {
    fn from(value: Community) -> Self {
        match value {
            Community::NoExport => 0xffff_ff01,
            Community::NoAdvertise => 0xffff_ff02,
            Community::NoExportSubConfed => 0xffff_ff03,
            Community::NoPeer => 0xffff_ff04,
            Community::Custom(asn, value) => ((asn as u32) << 16) | value as u32,
        }
    }
}

impl Display for Community {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Community::NoExport => write!(f, "no-export"),
            Community::NoAdvertise => write!(f, "no-advertise"),
            Community::NoExportSubConfed => write!(f, "no-export-subconfed"),
            Community::NoPeer => write!(f, "no-peer"),
            Community::Custom(asn, value) => write!(f, "{asn}:{value}"),
        }
    }
}

/// Large community, RFC 8092, displayed as
/// `global_admin:local_data_1:local_data_2`.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LargeCommunity {
    pub global_admin: u32,
    pub local_data: [u32; 2],
}

impl LargeCommunity {
    pub fn new(global_admin: u32, local_data: [u32; 2]) -> LargeCommunity {
        LargeCommunity {
            global_admin,
            local_data,
        }
    }
}

impl Display for LargeCommunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.global_admin, self.local_data[0], self.local_data[1]
        )
    }
}

/// First-byte type field of an extended community, RFC 4360 / RFC 7153.
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ExtendedCommunityType {
    TransitiveTwoOctetAs = 0x00,
    TransitiveIpv4Addr = 0x01,
    TransitiveFourOctetAs = 0x02,
    TransitiveOpaque = 0x03,
    NonTransitiveTwoOctetAs = 0x40,
    NonTransitiveIpv4Addr = 0x41,
    NonTransitiveFourOctetAs = 0x42,
    NonTransitiveOpaque = 0x43,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Extended community, kept as the raw 8-octet wire value and displayed in
/// hexadecimal.
#[derive(Debug, PartialEq, Clone, Copy, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtendedCommunity {
    pub raw: [u8; 8],
}

impl ExtendedCommunity {
    pub const fn new(raw: [u8; 8]) -> ExtendedCommunity {
        ExtendedCommunity { raw }
    }

    pub fn community_type(&self) -> ExtendedCommunityType {
        ExtendedCommunityType::from(self.raw[0])
    }
}

impl Display for ExtendedCommunity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x")?;
        for byte in &self.raw {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
