use crate::models::Asn;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::fmt::{Display, Formatter};

/// AS_PATH segment type, RFC 4271 plus the confederation forms of RFC 5065.
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AsPathSegmentType {
    AsSet = 1,
    AsSequence = 2,
    AsConfedSequence = 3,
    AsConfedSet = 4,
}

/// One AS_PATH segment: a set or sequence of AS numbers.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPathSegment {
    pub segment_type: AsPathSegmentType,
    pub asns: Vec<Asn>,
}

impl AsPathSegment {
    pub fn sequence<I: IntoIterator<Item = u32>>(asns: I) -> Self {
        AsPathSegment {
            segment_type: AsPathSegmentType::AsSequence,
            asns: asns.into_iter().map(Asn::new_32bit).collect(),
        }
    }

    pub fn set<I: IntoIterator<Item = u32>>(asns: I) -> Self {
        AsPathSegment {
            segment_type: AsPathSegmentType::AsSet,
            asns: asns.into_iter().map(Asn::new_32bit).collect(),
        }
    }
}

/// An AS_PATH or AS4_PATH attribute value.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AsPath {
    pub segments: Vec<AsPathSegment>,
}

impl AsPath {
    pub fn new(segments: Vec<AsPathSegment>) -> AsPath {
        AsPath { segments }
    }

    pub fn from_sequence<I: IntoIterator<Item = u32>>(asns: I) -> AsPath {
        AsPath {
            segments: vec![AsPathSegment::sequence(asns)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The origin AS: last ASN of the final sequence segment, if any.
    pub fn origin_asn(&self) -> Option<Asn> {
        match self.segments.last() {
            Some(seg) if seg.segment_type == AsPathSegmentType::AsSequence => {
                seg.asns.last().copied()
            }
            _ => None,
        }
    }
}

impl Display for AsPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, " ")?;
            }
            first = false;
            match segment.segment_type {
                AsPathSegmentType::AsSequence | AsPathSegmentType::AsConfedSequence => {
                    let mut inner_first = true;
                    for asn in &segment.asns {
                        if !inner_first {
                            write!(f, " ")?;
                        }
                        write!(f, "{asn}")?;
                        inner_first = false;
                    }
                }
                AsPathSegmentType::AsSet | AsPathSegmentType::AsConfedSet => {
                    write!(f, "{{")?;
                    let mut inner_first = true;
                    for asn in &segment.asns {
                        if !inner_first {
                            write!(f, ",")?;
                        }
                        write!(f, "{asn}")?;
                        inner_first = false;
                    }
                    write!(f, "}}")?;
                }
            }
        }
        Ok(())
    }
}
