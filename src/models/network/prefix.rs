use crate::models::RouteDistinguisher;
use ipnet::IpNet;
use smallvec::SmallVec;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

/// MPLS label stack preceding an L3VPN prefix.
///
/// Labels are kept as raw 3-byte (20-bit label + flags) wire values so the
/// bottom-of-stack and withdrawn markers stay visible.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MplsLabelStack {
    pub labels: SmallVec<[u32; 4]>,
}

impl MplsLabelStack {
    /// Bottom-of-stack bit in the third label byte, RFC 3032.
    pub const BOTTOM_OF_STACK: u32 = 0x01;
    /// Withdrawn-route sentinel label, RFC 3107.
    pub const WITHDRAWN: u32 = 0x80_0000;

    /// Bits consumed from the NLRI prefix-length field by this stack plus
    /// the 8-byte route distinguisher.
    pub fn nlri_overhead_bits(&self) -> usize {
        (3 * self.labels.len() + 8) * 8
    }
}

impl Display for MplsLabelStack {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for label in &self.labels {
            if !first {
                write!(f, "/")?;
            }
            // strip the 4 experimental/BoS bits for display
            write!(f, "{}", label >> 4)?;
            first = false;
        }
        Ok(())
    }
}

/// One NLRI: a network prefix, optionally preceded by an ADD-PATH path
/// identifier and, for L3VPN address families, a label stack and route
/// distinguisher.
#[derive(PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NetworkPrefix {
    pub prefix: IpNet,
    pub path_id: Option<u32>,
    pub labels: Option<MplsLabelStack>,
    pub route_distinguisher: Option<RouteDistinguisher>,
}

impl NetworkPrefix {
    pub fn new(prefix: IpNet, path_id: Option<u32>) -> NetworkPrefix {
        NetworkPrefix {
            prefix,
            path_id,
            labels: None,
            route_distinguisher: None,
        }
    }

    /// Attach the L3VPN label stack and route distinguisher.
    pub fn with_vpn(mut self, labels: MplsLabelStack, rd: RouteDistinguisher) -> NetworkPrefix {
        self.labels = Some(labels);
        self.route_distinguisher = Some(rd);
        self
    }
}

impl FromStr for NetworkPrefix {
    type Err = ipnet::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NetworkPrefix::new(IpNet::from_str(s)?, None))
    }
}

impl Display for NetworkPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix)
    }
}

// keep the debug output compact: prefix, then #path-id and RD only if set
impl Debug for NetworkPrefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(rd) = &self.route_distinguisher {
            write!(f, "{}:", rd)?;
        }
        write!(f, "{}", self.prefix)?;
        if let Some(path_id) = self.path_id {
            write!(f, "#{path_id}")?;
        }
        Ok(())
    }
}
