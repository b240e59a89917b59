use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// CLUSTER_LIST attribute: a stream of 4-byte cluster ids, RFC 4456.
pub fn parse_clusters(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    let mut clusters = Vec::with_capacity(input.remaining() / 4);
    while input.remaining() > 0 {
        clusters.push(input.read_ipv4_address()?);
    }
    Ok(AttributeValue::Clusters(clusters))
}
