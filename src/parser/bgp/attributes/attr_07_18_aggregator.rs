use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};
use std::net::Ipv4Addr;

/// AGGREGATOR and AS4_AGGREGATOR: an AS number and the aggregating router
/// id. AGGREGATOR distinguishes 2- from 4-octet AS numbers by the
/// attribute length (below 8 bytes it must be the 2-octet form);
/// AS4_AGGREGATOR (`is_as4`) is always 4+4 and a shorter value is an
/// error, never a downgrade.
pub fn parse_aggregator(
    mut input: Bytes,
    asn_len: AsnLength,
    is_as4: bool,
) -> Result<(Asn, Ipv4Addr), ParserError> {
    let asn_len = match is_as4 {
        true => AsnLength::Bits32,
        false => match input.remaining() < 8 {
            true => AsnLength::Bits16,
            false => asn_len,
        },
    };
    let asn = input.read_asn(asn_len)?;
    let aggregator = input.read_ipv4_address()?;
    Ok((asn, aggregator))
}
