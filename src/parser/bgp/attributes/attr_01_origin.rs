use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;

pub fn parse_origin(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let value = input.read_u8()?;
    let origin = Origin::try_from(value)
        .map_err(|_| ParserError::ParseError(format!("Invalid ORIGIN value {value}")))?;
    Ok(AttributeValue::Origin(origin))
}
