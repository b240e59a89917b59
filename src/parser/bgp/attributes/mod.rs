mod attr_01_origin;
mod attr_02_17_as_path;
mod attr_03_next_hop;
mod attr_04_med;
mod attr_05_local_pref;
mod attr_07_18_aggregator;
mod attr_08_communities;
mod attr_09_originator;
mod attr_10_cluster;
mod attr_14_15_nlri;
mod attr_16_extended_communities;
mod attr_26_aigp;
mod attr_32_large_communities;
mod attr_128_attr_set;

use bytes::{Buf, Bytes};
use log::debug;

use crate::models::*;
use crate::parser::context::ParseContext;
use crate::parser::ReadUtils;
use crate::ParserError;

use crate::parser::bgp::attributes::attr_01_origin::parse_origin;
use crate::parser::bgp::attributes::attr_02_17_as_path::parse_as_path;
use crate::parser::bgp::attributes::attr_03_next_hop::parse_next_hop;
use crate::parser::bgp::attributes::attr_04_med::parse_med;
use crate::parser::bgp::attributes::attr_05_local_pref::parse_local_pref;
use crate::parser::bgp::attributes::attr_07_18_aggregator::parse_aggregator;
use crate::parser::bgp::attributes::attr_08_communities::parse_regular_communities;
use crate::parser::bgp::attributes::attr_09_originator::parse_originator_id;
use crate::parser::bgp::attributes::attr_10_cluster::parse_clusters;
use crate::parser::bgp::attributes::attr_14_15_nlri::{
    parse_mp_reach_nlri, parse_mp_unreach_nlri,
};
use crate::parser::bgp::attributes::attr_16_extended_communities::parse_extended_communities;
use crate::parser::bgp::attributes::attr_26_aigp::parse_aigp;
use crate::parser::bgp::attributes::attr_32_large_communities::parse_large_communities;
use crate::parser::bgp::attributes::attr_128_attr_set::parse_attr_set;

/// ATTR_SET may nest attribute lists; the wire format never legitimately
/// nests deeply, so recursion past this bound is treated as malformed.
pub(crate) const MAX_ATTR_SET_DEPTH: usize = 8;

/// Parse a BGP path-attribute region.
///
/// `data` holds the entirety of the attribute bytes; each attribute's
/// declared length delimits the region its decoder may read. A decoding
/// failure anywhere unwinds to the caller (the record is then surfaced
/// with its error); only unknown and deprecated attribute types are kept
/// as raw bytes instead of failing.
pub fn parse_attributes(data: Bytes, ctx: &ParseContext) -> Result<Attributes, ParserError> {
    parse_attributes_with_depth(data, ctx, 0)
}

pub(crate) fn parse_attributes_with_depth(
    mut data: Bytes,
    ctx: &ParseContext,
    depth: usize,
) -> Result<Attributes, ParserError> {
    let mut attributes: Vec<Attribute> = Vec::with_capacity(8);

    // each attribute is at least 3 bytes: flags(1) + type(1) + length(1)
    while data.remaining() >= 3 {
        let flag = AttrFlags::from_bits_retain(data.get_u8());
        let type_value = data.get_u8();
        let attr_length = match flag.contains(AttrFlags::EXTENDED) {
            false => data.read_u8()? as usize,
            true => data.read_u16()? as usize,
        };

        debug!("reading attribute: type -- {type_value}, length -- {attr_length}");

        data.require_n_remaining(attr_length)?;
        let mut attr_data = data.split_to(attr_length);

        let attr_type = AttrType::from(type_value);
        let value = match attr_type {
            AttrType::ORIGIN => parse_origin(attr_data)?,
            AttrType::AS_PATH => AttributeValue::AsPath {
                path: parse_as_path(attr_data, ctx.asn_len)?,
                is_as4: false,
            },
            AttrType::AS4_PATH => AttributeValue::AsPath {
                path: parse_as_path(attr_data, AsnLength::Bits32)?,
                is_as4: true,
            },
            AttrType::NEXT_HOP => parse_next_hop(attr_data)?,
            AttrType::MULTI_EXIT_DISCRIMINATOR => parse_med(attr_data)?,
            AttrType::LOCAL_PREFERENCE => parse_local_pref(attr_data)?,
            AttrType::ATOMIC_AGGREGATE => AttributeValue::AtomicAggregate,
            AttrType::AGGREGATOR => {
                let (asn, id) = parse_aggregator(attr_data, ctx.asn_len, false)?;
                AttributeValue::Aggregator {
                    asn,
                    id,
                    is_as4: false,
                }
            }
            AttrType::AS4_AGGREGATOR => {
                let (asn, id) = parse_aggregator(attr_data, AsnLength::Bits32, true)?;
                AttributeValue::Aggregator {
                    asn,
                    id,
                    is_as4: true,
                }
            }
            AttrType::COMMUNITIES => parse_regular_communities(attr_data)?,
            AttrType::ORIGINATOR_ID => parse_originator_id(attr_data)?,
            AttrType::CLUSTER_LIST => parse_clusters(attr_data)?,
            AttrType::MP_REACHABLE_NLRI => parse_mp_reach_nlri(attr_data, ctx)?,
            AttrType::MP_UNREACHABLE_NLRI => parse_mp_unreach_nlri(attr_data, ctx)?,
            AttrType::EXTENDED_COMMUNITIES => parse_extended_communities(attr_data)?,
            AttrType::AIGP => parse_aigp(attr_data)?,
            AttrType::LARGE_COMMUNITIES => parse_large_communities(attr_data)?,
            AttrType::ATTR_SET => {
                if depth >= MAX_ATTR_SET_DEPTH {
                    return Err(ParserError::ParseError(
                        "ATTR_SET nested too deeply".to_string(),
                    ));
                }
                parse_attr_set(attr_data, ctx, depth)?
            }
            attr_type => {
                // everything else is preserved verbatim: BGP-LS,
                // PMSI_TUNNEL, tunnel encapsulation, unassigned codes, ...
                let bytes = attr_data.read_n_bytes(attr_length)?;
                let raw = AttrRaw { attr_type, bytes };
                match get_deprecated_attr_type(type_value) {
                    Some(name) => {
                        debug!("deprecated attribute type: {type_value} - {name}");
                        AttributeValue::Deprecated(raw)
                    }
                    None => AttributeValue::Unknown(raw),
                }
            }
        };

        attributes.push(Attribute { flag, value });
    }

    if data.remaining() > 0 {
        return Err(ParserError::TruncatedMsg(format!(
            "Insufficient buffer {} < 3",
            data.remaining()
        )));
    }

    Ok(Attributes::from(attributes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_attribute_type() {
        let data = Bytes::from_static(&[0x40, 0xFE, 0x02, 0xAA, 0xBB]);
        let attributes = parse_attributes(data, &ParseContext::default()).unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(
            attributes.inner[0].value,
            AttributeValue::Unknown(AttrRaw {
                attr_type: AttrType::Unknown(254),
                bytes: vec![0xAA, 0xBB],
            })
        );
    }

    #[test]
    fn test_deprecated_attribute_type() {
        // type 11 (DPA) round-trips as raw bytes
        let data = Bytes::from_static(&[0xC0, 0x0B, 0x02, 0x01, 0x02]);
        let attributes = parse_attributes(data, &ParseContext::default()).unwrap();
        assert!(matches!(
            &attributes.inner[0].value,
            AttributeValue::Deprecated(raw) if raw.bytes == vec![0x01, 0x02]
        ));
    }

    #[test]
    fn test_zero_length_attribute() {
        // an empty AS_PATH decodes to that attribute with empty content
        let data = Bytes::from_static(&[0x40, 0x02, 0x00]);
        let attributes = parse_attributes(data, &ParseContext::default()).unwrap();
        assert_eq!(attributes.len(), 1);
        assert_eq!(
            attributes.inner[0].value,
            AttributeValue::AsPath {
                path: AsPath::default(),
                is_as4: false,
            }
        );
    }

    #[test]
    fn test_extended_length_flag() {
        // extended-length flag selects a 2-byte length field
        let data = Bytes::from_static(&[0x50, 0x01, 0x00, 0x01, 0x00]);
        let attributes = parse_attributes(data, &ParseContext::default()).unwrap();
        assert_eq!(
            attributes.inner[0].value,
            AttributeValue::Origin(Origin::Igp)
        );
        assert!(attributes.inner[0].is_extended());
    }

    #[test]
    fn test_aggregator_dispatch() {
        // AGGREGATOR with a 6-byte value decodes as 2-octet AS even in a
        // 4-octet session; AS4_AGGREGATOR is always 4+4
        let data = Bytes::from_static(&[
            0xC0, 0x07, 0x06, 0xfd, 0xe8, 10, 0, 0, 1, // AGGREGATOR AS65000
            0xC0, 0x12, 0x08, 0, 3, 0, 0, 10, 0, 0, 2, // AS4_AGGREGATOR AS196608
        ]);
        let attributes = parse_attributes(data, &ParseContext::default()).unwrap();
        assert_eq!(attributes.len(), 2);
        assert_eq!(
            attributes.inner[0].value,
            AttributeValue::Aggregator {
                asn: Asn::new_16bit(65000),
                id: "10.0.0.1".parse().unwrap(),
                is_as4: false,
            }
        );
        assert_eq!(
            attributes.inner[1].value,
            AttributeValue::Aggregator {
                asn: Asn::new_32bit(196608),
                id: "10.0.0.2".parse().unwrap(),
                is_as4: true,
            }
        );
    }

    #[test]
    fn test_short_as4_aggregator_is_error() {
        // a 6-byte AS4_AGGREGATOR must fail instead of downgrading to the
        // 2-octet form
        let data = Bytes::from_static(&[0xC0, 0x12, 0x06, 0xfd, 0xe8, 10, 0, 0, 1]);
        assert!(parse_attributes(data, &ParseContext::default()).is_err());
    }

    #[test]
    fn test_attribute_over_read_is_error() {
        // declared length 4 with only 1 byte available
        let data = Bytes::from_static(&[0x40, 0x01, 0x04, 0x00]);
        assert!(parse_attributes(data, &ParseContext::default()).is_err());
    }

    #[test]
    fn test_as_path_uses_context_width() {
        let data = Bytes::from_static(&[
            0x40, 0x02, 0x06, // AS_PATH, 6 bytes
            2, 2, // sequence of two
            0xfd, 0xe8, 0xfd, 0xe9, // AS65000 AS65001 as 16-bit
        ]);
        let ctx = ParseContext::default().with_asn_len(AsnLength::Bits16);
        let attributes = parse_attributes(data, &ctx).unwrap();
        let path = attributes.as_path().unwrap();
        assert_eq!(path, &AsPath::from_sequence([65000, 65001]));
    }

    #[test]
    fn test_multiple_attributes() {
        let data = Bytes::from_static(&[
            0x40, 0x01, 0x01, 0x00, // ORIGIN IGP
            0x40, 0x02, 0x00, // empty AS_PATH
            0x40, 0x03, 0x04, 192, 168, 0, 1, // NEXT_HOP
            0x80, 0x04, 0x04, 0x00, 0x00, 0x00, 0x0A, // MED 10
        ]);
        let attributes = parse_attributes(data, &ParseContext::default()).unwrap();
        assert_eq!(attributes.len(), 4);
        assert_eq!(attributes.origin(), Some(Origin::Igp));
        assert_eq!(
            attributes.next_hop(),
            Some("192.168.0.1".parse().unwrap())
        );
    }
}
