use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Next hop address carried in MP_REACH_NLRI.
///
/// An IPv6 next hop may carry a second, link-local address (RFC 2545) when
/// the encoded next-hop length is 32.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NextHopAddress {
    Ipv4(Ipv4Addr),
    Ipv6(Ipv6Addr),
    Ipv6LinkLocal(Ipv6Addr, Ipv6Addr),
}

impl NextHopAddress {
    /// The global (first) address, dropping any link-local companion.
    pub const fn addr(&self) -> IpAddr {
        match self {
            NextHopAddress::Ipv4(addr) => IpAddr::V4(*addr),
            NextHopAddress::Ipv6(addr) => IpAddr::V6(*addr),
            NextHopAddress::Ipv6LinkLocal(addr, _) => IpAddr::V6(*addr),
        }
    }
}

impl Display for NextHopAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NextHopAddress::Ipv4(addr) => write!(f, "{addr}"),
            NextHopAddress::Ipv6(addr) => write!(f, "{addr}"),
            NextHopAddress::Ipv6LinkLocal(addr, link_local) => {
                write!(f, "{addr} (link-local {link_local})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_addr() {
        let global = Ipv6Addr::from_str("2001:db8::1").unwrap();
        let ll = Ipv6Addr::from_str("fe80::1").unwrap();
        assert_eq!(
            NextHopAddress::Ipv6LinkLocal(global, ll).addr(),
            IpAddr::V6(global)
        );
    }
}
