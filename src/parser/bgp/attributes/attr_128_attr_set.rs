use crate::models::*;
use crate::parser::bgp::attributes::parse_attributes_with_depth;
use crate::parser::{ParseContext, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

/// ATTR_SET attribute, RFC 6368: a 4-byte origin AS followed by a nested
/// attribute list. The nested list goes back through the attribute parser
/// with an incremented depth; the wire format has no legitimate deep
/// nesting, so the bound protects against crafted input.
pub fn parse_attr_set(
    mut input: Bytes,
    ctx: &ParseContext,
    depth: usize,
) -> Result<AttributeValue, ParserError> {
    let origin_asn = input.read_asn(AsnLength::Bits32)?;
    let attributes = parse_attributes_with_depth(input, ctx, depth + 1)?;
    Ok(AttributeValue::AttrSet {
        origin_asn,
        attributes,
    })
}
