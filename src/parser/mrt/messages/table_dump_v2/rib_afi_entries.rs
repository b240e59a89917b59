use crate::models::*;
use crate::parser::bgp::attributes::parse_attributes;
use crate::parser::{ParseContext, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

/// Parse an AFI/SAFI-specific RIB record, RFC 6396 section 4.3.2 (ADDPATH
/// variants per RFC 8050).
///
/// The subtype pins the address family for the whole record; nested
/// truncated MP_REACH_NLRI attributes rely on that. Per RFC 6396 the
/// record-level prefix never carries a path identifier; in ADDPATH
/// subtypes the identifier sits on each RIB entry instead.
pub fn parse_rib_afi_entries(
    data: &mut Bytes,
    rib_type: TableDumpV2Type,
) -> Result<RibAfiEntries, ParserError> {
    let (afi, safi) = match rib_type {
        TableDumpV2Type::RibIpv4Unicast | TableDumpV2Type::RibIpv4UnicastAddPath => {
            (Afi::Ipv4, Safi::Unicast)
        }
        TableDumpV2Type::RibIpv4Multicast | TableDumpV2Type::RibIpv4MulticastAddPath => {
            (Afi::Ipv4, Safi::Multicast)
        }
        TableDumpV2Type::RibIpv6Unicast | TableDumpV2Type::RibIpv6UnicastAddPath => {
            (Afi::Ipv6, Safi::Unicast)
        }
        TableDumpV2Type::RibIpv6Multicast | TableDumpV2Type::RibIpv6MulticastAddPath => {
            (Afi::Ipv6, Safi::Multicast)
        }
        _ => {
            return Err(ParserError::ParseError(format!(
                "wrong RIB type for parsing: {rib_type:?}"
            )))
        }
    };

    let ctx = ParseContext::default()
        .with_add_path(rib_type.is_addpath())
        .with_af(afi, safi);

    let sequence_number = data.read_u32()?;
    let prefix = data.read_nlri_prefix(&afi, &safi, false)?;

    let entry_count = data.read_u16()?;
    let mut rib_entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        rib_entries.push(parse_rib_entry(data, &ctx)?);
    }

    Ok(RibAfiEntries {
        rib_type,
        sequence_number,
        prefix,
        rib_entries,
    })
}

/// One RIB entry: peer index, originated time, the ADD-PATH path
/// identifier when the subtype carries one, and the attribute region.
pub fn parse_rib_entry(
    input: &mut Bytes,
    ctx: &ParseContext,
) -> Result<RibEntry, ParserError> {
    let peer_index = input.read_u16()?;
    let originated_time = input.read_u32()?;
    let path_id = match ctx.add_path {
        true => Some(input.read_u32()?),
        false => None,
    };
    let attribute_length = input.read_u16()? as usize;

    input.require_n_remaining(attribute_length)?;
    let attr_data = input.split_to(attribute_length);
    let attributes = parse_attributes(attr_data, ctx)?;

    Ok(RibEntry {
        peer_index,
        originated_time,
        path_id,
        attributes,
    })
}
