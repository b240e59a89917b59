use crate::models::*;
use crate::parser::mrt::messages::table_dump_v2::rib_afi_entries::parse_rib_entry;
use crate::parser::{parse_nlri_list, ParseContext, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

/// Parse a RIB_GENERIC[_ADDPATH] record, RFC 6396 section 4.3.3.
///
/// The AFI field of this record occupies three bytes on the wire. The NLRI
/// region is sized by previewing its length byte (which also covers the
/// L3VPN label/RD overhead), then handed to the NLRI decoder whole.
pub fn parse_rib_generic_entries(
    data: &mut Bytes,
    rib_type: TableDumpV2Type,
) -> Result<RibGenericEntries, ParserError> {
    if !matches!(
        rib_type,
        TableDumpV2Type::RibGeneric | TableDumpV2Type::RibGenericAddPath
    ) {
        return Err(ParserError::ParseError(format!(
            "wrong RIB type for parsing: {rib_type:?}"
        )));
    }

    let sequence_number = data.read_u32()?;

    let afi_value = data.read_u24()?;
    let afi = u16::try_from(afi_value)
        .ok()
        .and_then(|v| Afi::try_from(v).ok())
        .ok_or_else(|| ParserError::ParseError(format!("Unknown AFI type: {afi_value}")))?;
    let safi = data.read_safi()?;

    // preview the prefix length byte to delimit the NLRI region
    data.require_n_remaining(1)?;
    let bit_len = data[0] as usize;
    let nlri_len = 1 + bit_len.div_ceil(8);
    data.require_n_remaining(nlri_len)?;
    let nlri_data = data.split_to(nlri_len);
    let nlri = parse_nlri_list(nlri_data, &afi, &safi, false)?;

    let ctx = ParseContext::default()
        .with_add_path(rib_type.is_addpath())
        .with_af(afi, safi);

    let entry_count = data.read_u16()?;
    let mut rib_entries = Vec::with_capacity(entry_count as usize);
    for _ in 0..entry_count {
        rib_entries.push(parse_rib_entry(data, &ctx)?);
    }

    Ok(RibGenericEntries {
        rib_type,
        sequence_number,
        afi,
        safi,
        nlri,
        rib_entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::{BufMut, BytesMut};

    #[test]
    fn test_parse_rib_generic() {
        let mut bytes = BytesMut::new();
        bytes.put_u32(9); // sequence
        bytes.put_slice(&[0x00, 0x00, 0x01]); // AFI IPv4, three bytes
        bytes.put_u8(1); // SAFI unicast
        bytes.put_u8(24); // NLRI: /24
        bytes.put_slice(&[192, 0, 2]);
        bytes.put_u16(1); // one entry
        bytes.put_u16(5); // peer index
        bytes.put_u32(0); // originated time
        let attrs: &[u8] = &[0x40, 0x01, 0x01, 0x00];
        bytes.put_u16(attrs.len() as u16);
        bytes.put_slice(attrs);

        let mut data = bytes.freeze();
        let rib = parse_rib_generic_entries(&mut data, TableDumpV2Type::RibGeneric).unwrap();
        assert_eq!(rib.sequence_number, 9);
        assert_eq!(rib.afi, Afi::Ipv4);
        assert_eq!(rib.safi, Safi::Unicast);
        assert_eq!(rib.nlri.len(), 1);
        assert_eq!(rib.nlri[0].prefix.to_string(), "192.0.2.0/24");
        assert_eq!(rib.rib_entries.len(), 1);
        assert_eq!(rib.rib_entries[0].peer_index, 5);
        assert_eq!(data.len(), 0);
    }

    #[test]
    fn test_parse_rib_generic_addpath() {
        let mut bytes = BytesMut::new();
        bytes.put_u32(1);
        bytes.put_slice(&[0x00, 0x00, 0x01]);
        bytes.put_u8(1);
        bytes.put_u8(0); // 0.0.0.0/0
        bytes.put_u16(1);
        bytes.put_u16(0);
        bytes.put_u32(0);
        bytes.put_u32(99); // path id on the entry
        bytes.put_u16(0);

        let mut data = bytes.freeze();
        let rib =
            parse_rib_generic_entries(&mut data, TableDumpV2Type::RibGenericAddPath).unwrap();
        assert_eq!(rib.nlri[0].prefix.to_string(), "0.0.0.0/0");
        assert_eq!(rib.rib_entries[0].path_id, Some(99));
    }

    #[test]
    fn test_unknown_afi() {
        let mut bytes = BytesMut::new();
        bytes.put_u32(1);
        bytes.put_slice(&[0x00, 0x00, 0x19]); // AFI 25 (L2VPN), not decodable
        bytes.put_u8(1);
        let mut data = bytes.freeze();
        let err =
            parse_rib_generic_entries(&mut data, TableDumpV2Type::RibGeneric).unwrap_err();
        assert_eq!(err.to_string(), "Error: Unknown AFI type: 25");
    }
}
