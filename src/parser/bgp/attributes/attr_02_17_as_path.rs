use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Parse an AS_PATH or AS4_PATH attribute: zero or more segments, each a
/// type byte, an ASN count, and that many AS numbers of the width given by
/// the caller (AS4_PATH is always parsed with 4-octet ASNs).
pub fn parse_as_path(mut input: Bytes, asn_len: AsnLength) -> Result<AsPath, ParserError> {
    let mut segments = Vec::with_capacity(1);
    while input.remaining() > 0 {
        segments.push(parse_as_path_segment(&mut input, asn_len)?);
    }
    Ok(AsPath::new(segments))
}

fn parse_as_path_segment(
    input: &mut Bytes,
    asn_len: AsnLength,
) -> Result<AsPathSegment, ParserError> {
    let type_value = input.read_u8()?;
    let segment_type = AsPathSegmentType::try_from(type_value).map_err(|_| {
        ParserError::ParseError(format!("Invalid AS path segment type: {type_value}"))
    })?;
    let count = input.read_u8()? as usize;
    let asns = input.read_asns(asn_len, count)?;
    Ok(AsPathSegment { segment_type, asns })
}
