use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// EXTENDED COMMUNITIES attribute: a stream of 8-byte values, RFC 4360.
/// Values are kept raw; the first octet names the community type.
pub fn parse_extended_communities(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let mut communities = Vec::with_capacity(input.remaining() / 8);
    while input.remaining() > 0 {
        input.require_n_remaining(8)?;
        let mut raw = [0u8; 8];
        input.copy_to_slice(&mut raw);
        communities.push(ExtendedCommunity::new(raw));
    }
    Ok(AttributeValue::ExtendedCommunities(communities))
}
