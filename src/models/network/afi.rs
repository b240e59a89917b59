use num_enum::{IntoPrimitive, TryFromPrimitive};

/// AFI -- Address Family Identifier
///
/// <https://www.iana.org/assignments/address-family-numbers/address-family-numbers.xhtml>
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Afi {
    Ipv4 = 1,
    Ipv6 = 2,
}

impl Afi {
    /// Maximum prefix length in bits for the address family.
    pub const fn max_prefix_len(&self) -> u8 {
        match self {
            Afi::Ipv4 => 32,
            Afi::Ipv6 => 128,
        }
    }

    /// Full address width in bytes.
    pub const fn address_width(&self) -> usize {
        match self {
            Afi::Ipv4 => 4,
            Afi::Ipv6 => 16,
        }
    }
}

/// SAFI -- Subsequent Address Family Identifier
///
/// <https://www.iana.org/assignments/safi-namespace/safi-namespace.xhtml>
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Safi {
    Unicast = 1,
    Multicast = 2,
    UnicastMulticast = 3,
    Vpls = 65,
    Evpn = 70,
    L3VpnUnicast = 128,
    L3VpnMulticast = 129,
}

impl Safi {
    /// L3VPN SAFIs prepend a label stack and route distinguisher to each
    /// NLRI.
    pub const fn is_l3vpn(&self) -> bool {
        matches!(self, Safi::L3VpnUnicast | Safi::L3VpnMulticast)
    }
}
