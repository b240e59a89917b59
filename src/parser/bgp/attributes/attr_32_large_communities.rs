use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// LARGE_COMMUNITIES attribute: a stream of three 4-byte values, RFC 8092.
pub fn parse_large_communities(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let mut communities = Vec::with_capacity(input.remaining() / 12);
    while input.remaining() > 0 {
        let global_admin = input.read_u32()?;
        let local_data = [input.read_u32()?, input.read_u32()?];
        communities.push(LargeCommunity::new(global_admin, local_data));
    }
    Ok(AttributeValue::LargeCommunities(communities))
}
