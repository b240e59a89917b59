use std::fmt::{Debug, Display, Formatter};

/// Route Distinguisher: the 8-byte value prefixing L3VPN NLRI, rendered as
/// `high32:low32`.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteDistinguisher(u64);

impl RouteDistinguisher {
    pub const fn new(value: u64) -> Self {
        RouteDistinguisher(value)
    }

    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for RouteDistinguisher {
    fn from(value: u64) -> Self {
        RouteDistinguisher(value)
    }
}

impl Display for RouteDistinguisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0 >> 32, self.0 & 0xffff_ffff)
    }
}

impl Debug for RouteDistinguisher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let rd = RouteDistinguisher::new((65000u64 << 32) | 100);
        assert_eq!(rd.to_string(), "65000:100");
        assert_eq!(RouteDistinguisher::new(0).to_string(), "0:0");
    }
}
