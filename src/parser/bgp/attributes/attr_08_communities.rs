use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// COMMUNITIES attribute: a stream of 4-byte values, RFC 1997.
pub fn parse_regular_communities(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let mut communities = Vec::with_capacity(input.remaining() / 4);
    while input.remaining() > 0 {
        communities.push(Community::from(input.read_u32()?));
    }
    Ok(AttributeValue::Communities(communities))
}
