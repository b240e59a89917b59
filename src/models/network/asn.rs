use std::cmp::Ordering;
use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash, Hasher};

/// AS number length: 16 or 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsnLength {
    Bits16,
    Bits32,
}

impl AsnLength {
    pub const fn is_four_byte(&self) -> bool {
        matches!(self, AsnLength::Bits32)
    }

    /// Encoded size in bytes.
    pub const fn byte_len(&self) -> usize {
        match self {
            AsnLength::Bits16 => 2,
            AsnLength::Bits32 => 4,
        }
    }
}

/// Textual representation for AS numbers, RFC 5396.
///
/// `Asplain` is plain decimal, `AsDot` switches to `high.low` only above
/// the 16-bit range, `AsDotPlus` always renders `high.low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AsnFormat {
    #[default]
    Asplain,
    AsDot,
    AsDotPlus,
}

/// ASN -- Autonomous System Number
#[derive(Clone, Copy, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "u32", into = "u32"))]
pub struct Asn {
    asn: u32,
    #[cfg_attr(feature = "serde", serde(skip_serializing, default))]
    four_byte: bool,
}

impl Ord for Asn {
    fn cmp(&self, other: &Self) -> Ordering {
        self.asn.cmp(&other.asn)
    }
}

impl Hash for Asn {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.asn.hash(state);
    }
}

impl PartialEq for Asn {
    fn eq(&self, other: &Self) -> bool {
        self.asn == other.asn
    }
}

impl PartialOrd for Asn {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Asn {
    pub const RESERVED: Self = Asn::new_16bit(0);
    #[doc(alias("AS_TRANS"))]
    pub const TRANSITION: Self = Asn::new_16bit(23456);

    /// Constructs a new 2-octet `Asn`.
    #[inline]
    pub const fn new_16bit(asn: u16) -> Self {
        Asn {
            asn: asn as u32,
            four_byte: false,
        }
    }

    /// Constructs a new 4-octet `Asn`.
    #[inline]
    pub const fn new_32bit(asn: u32) -> Self {
        Asn {
            asn,
            four_byte: true,
        }
    }

    /// Whether this ASN came off the wire in 4-octet encoding.
    pub const fn is_four_byte(&self) -> bool {
        self.four_byte
    }

    /// Checks if the given ASN is reserved for private use.
    ///
    /// <https://datatracker.ietf.org/doc/rfc6996/>
    #[inline]
    pub const fn is_private(&self) -> bool {
        matches!(self.asn, 64512..=65534 | 4200000000..=4294967294)
    }

    /// Render per the chosen representation, RFC 5396.
    pub fn format(&self, format: AsnFormat) -> String {
        match format {
            AsnFormat::Asplain => self.asn.to_string(),
            AsnFormat::AsDot if self.asn <= u16::MAX as u32 => self.asn.to_string(),
            AsnFormat::AsDot | AsnFormat::AsDotPlus => {
                format!("{}.{}", self.asn >> 16, self.asn & 0xffff)
            }
        }
    }
}

impl From<u32> for Asn {
    fn from(v: u32) -> Self {
        Asn::new_32bit(v)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.asn
    }
}

impl From<Asn> for u16 {
    fn from(value: Asn) -> Self {
        value.asn as u16
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.asn)
    }
}

impl Debug for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "AS{}", self.asn)
    }
}
