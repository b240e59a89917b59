use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// AIGP attribute, RFC 7311: a stream of TLVs. Each TLV length covers the
/// 3-byte type/length header, leaving `length - 3` value bytes, read as a
/// big-endian number (8 bytes for the type-1 metric). The wire puts no
/// ceiling on the value width; values wider than 8 bytes keep their low
/// 64 bits.
pub fn parse_aigp(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let mut tlvs = vec![];
    while input.remaining() > 0 {
        let tlv_type = input.read_u8()?;
        let length = input.read_u16()?;
        if length < 3 {
            return Err(ParserError::ParseError(format!(
                "Invalid AIGP TLV length {length}"
            )));
        }
        let value_len = (length - 3) as usize;
        input.require_n_remaining(value_len)?;
        let mut value = 0u64;
        for _ in 0..value_len {
            value = (value << 8) | input.get_u8() as u64;
        }
        tlvs.push(AigpTlv {
            tlv_type,
            length,
            value,
        });
    }
    Ok(AttributeValue::Aigp(tlvs))
}
