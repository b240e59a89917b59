use crate::models::{Afi, AsnLength, Safi};

/// Per-record parse context.
///
/// A fresh context is created for every MRT record; the outer decoders set
/// the fields before descending and the inner attribute/NLRI decoders read
/// them at the leaves:
///
/// - TABLE_DUMP bodies switch to 2-octet AS numbers;
/// - BGP4MP subtypes without `As4` in their name switch to 2-octet AS
///   numbers;
/// - subtypes with `Addpath` in their name turn on path identifiers;
/// - TABLE_DUMP_V2 RIB subtypes pin the address family, which the
///   truncated MP_REACH_NLRI form (RFC 6396 section 4.3.4) relies on;
/// - MP_REACH_NLRI overrides the address family from its own header before
///   its nested NLRI are parsed.
///
/// Nothing here outlives a record.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext {
    pub asn_len: AsnLength,
    pub add_path: bool,
    pub afi: Option<Afi>,
    pub safi: Option<Safi>,
}

impl Default for ParseContext {
    fn default() -> Self {
        ParseContext {
            asn_len: AsnLength::Bits32,
            add_path: false,
            afi: None,
            safi: None,
        }
    }
}

impl ParseContext {
    pub fn with_asn_len(mut self, asn_len: AsnLength) -> Self {
        self.asn_len = asn_len;
        self
    }

    pub fn with_add_path(mut self, add_path: bool) -> Self {
        self.add_path = add_path;
        self
    }

    pub fn with_af(mut self, afi: Afi, safi: Safi) -> Self {
        self.afi = Some(afi);
        self.safi = Some(safi);
        self
    }
}
