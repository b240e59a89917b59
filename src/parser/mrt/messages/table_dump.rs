use crate::models::*;
use crate::parser::bgp::attributes::parse_attributes;
use crate::parser::{ParseContext, ReadUtils};
use crate::ParserError;
use bytes::Bytes;
use ipnet::IpNet;
use std::net::{IpAddr, Ipv6Addr};

/// Parse a TABLE_DUMP (v1) message, RFC 6396 section 4.2.
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |         View Number           |       Sequence Number         |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                        Prefix (variable)                      |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | Prefix Length |    Status     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                         Originated Time                       |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                    Peer IP Address (variable)                 |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |           Peer AS             |       Attribute Length        |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                   BGP Attribute... (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The prefix field is always the full address width; only the AS numbers
/// are fixed at 2 octets for this type.
///
/// Peer address quirk: some collectors wrote an IPv4 peer address into the
/// 16-byte peer field of IPv6 dumps, zero-padded on the right. When the 12
/// trailing bytes are all zero the field is taken as that IPv4 address;
/// otherwise as a regular IPv6 address.
pub fn parse_table_dump_message(
    sub_type: u16,
    mut data: Bytes,
) -> Result<TableDumpMessage, ParserError> {
    let afi = match sub_type {
        1 => Afi::Ipv4,
        2 => Afi::Ipv6,
        _ => {
            return Err(ParserError::Unsupported(format!(
                "Unsupported TABLE_DUMP subtype: {sub_type}"
            )))
        }
    };

    let view_number = data.read_u16()?;
    let sequence_number = data.read_u16()?;

    let prefix_addr = data.read_address(&afi)?;
    let prefix_len = data.read_u8()?;
    let prefix = IpNet::new(prefix_addr, prefix_len).map_err(|_| {
        ParserError::ParseError(format!("Invalid prefix length {prefix_len}"))
    })?;

    let status = data.read_u8()?;
    let originated_time = data.read_u32()?;

    let peer_address: IpAddr = match afi {
        Afi::Ipv4 => data.read_address(&afi)?,
        Afi::Ipv6 => {
            data.require_n_remaining(16)?;
            let head = data.read_ipv4_address()?;
            let tail = data.read_n_bytes(12)?;
            if tail.iter().all(|b| *b == 0) {
                IpAddr::V4(head)
            } else {
                let mut octets = [0u8; 16];
                octets[..4].copy_from_slice(&head.octets());
                octets[4..].copy_from_slice(&tail);
                IpAddr::V6(Ipv6Addr::from(octets))
            }
        }
    };

    // AS numbers in TABLE_DUMP are always 2 octets
    let peer_asn = Asn::new_16bit(data.read_u16()?);

    let attribute_length = data.read_u16()? as usize;
    data.require_n_remaining(attribute_length)?;
    let attr_data = data.split_to(attribute_length);
    let ctx = ParseContext::default().with_asn_len(AsnLength::Bits16);
    let attributes = parse_attributes(attr_data, &ctx)?;

    Ok(TableDumpMessage {
        view_number,
        sequence_number,
        prefix: NetworkPrefix::new(prefix, None),
        status,
        originated_time,
        peer_address,
        peer_asn,
        attributes,
    })
}
