use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

pub fn parse_originator_id(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    Ok(AttributeValue::OriginatorId(input.read_ipv4_address()?))
}
