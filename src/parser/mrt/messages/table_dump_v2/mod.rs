pub mod peer_index_table;
pub mod rib_afi_entries;
pub mod rib_generic_entries;

use crate::models::*;
use crate::ParserError;
use bytes::Bytes;

use peer_index_table::parse_peer_index_table;
use rib_afi_entries::parse_rib_afi_entries;
use rib_generic_entries::parse_rib_generic_entries;

/// Parse a TABLE_DUMP_V2 message, RFC 6396 section 4.3, dispatching on the
/// subtype. GEO_PEER_TABLE (RFC 6397) is recognized but its body is not
/// decoded.
pub fn parse_table_dump_v2_message(
    sub_type: u16,
    mut data: Bytes,
) -> Result<TableDumpV2Message, ParserError> {
    let v2_type = TableDumpV2Type::try_from(sub_type)?;
    let msg = match v2_type {
        TableDumpV2Type::PeerIndexTable => {
            TableDumpV2Message::PeerIndexTable(parse_peer_index_table(&mut data)?)
        }
        TableDumpV2Type::RibIpv4Unicast
        | TableDumpV2Type::RibIpv4Multicast
        | TableDumpV2Type::RibIpv6Unicast
        | TableDumpV2Type::RibIpv6Multicast
        | TableDumpV2Type::RibIpv4UnicastAddPath
        | TableDumpV2Type::RibIpv4MulticastAddPath
        | TableDumpV2Type::RibIpv6UnicastAddPath
        | TableDumpV2Type::RibIpv6MulticastAddPath => {
            TableDumpV2Message::RibAfi(parse_rib_afi_entries(&mut data, v2_type)?)
        }
        TableDumpV2Type::RibGeneric | TableDumpV2Type::RibGenericAddPath => {
            TableDumpV2Message::RibGeneric(parse_rib_generic_entries(&mut data, v2_type)?)
        }
        TableDumpV2Type::GeoPeerTable => {
            return Err(ParserError::Unsupported(
                "Unsupported TABLE_DUMP_V2 subtype: GEO_PEER_TABLE".to_string(),
            ))
        }
    };
    Ok(msg)
}
