use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr};

/// Parse a PEER_INDEX_TABLE record, RFC 6396 section 4.3.1.
///
/// Each peer entry leads with a flags byte: bit 0 selects an IPv6 peer
/// address, bit 1 a 4-octet peer AS number.
pub fn parse_peer_index_table(data: &mut Bytes) -> Result<PeerIndexTable, ParserError> {
    let collector_bgp_id = Ipv4Addr::from(data.read_u32()?);

    let view_name_length = data.read_u16()?;
    let view_name = data.read_n_bytes_to_string(view_name_length as usize)?;

    let peer_count = data.read_u16()?;
    let mut peers = Vec::with_capacity(peer_count as usize);
    for _ in 0..peer_count {
        let peer_type = PeerType::from_bits_retain(data.read_u8()?);
        let afi = match peer_type.contains(PeerType::ADDRESS_FAMILY_IPV6) {
            true => Afi::Ipv6,
            false => Afi::Ipv4,
        };
        let asn_len = match peer_type.contains(PeerType::AS_SIZE_32BIT) {
            true => AsnLength::Bits32,
            false => AsnLength::Bits16,
        };

        let peer_bgp_id = Ipv4Addr::from(data.read_u32()?);
        let peer_address: IpAddr = data.read_address(&afi)?;
        let peer_asn = data.read_asn(asn_len)?;
        peers.push(Peer {
            peer_type,
            peer_bgp_id,
            peer_address,
            peer_asn,
        });
    }

    let mut id_peer_map = HashMap::new();
    let mut peer_addr_id_map = HashMap::new();
    for (id, peer) in peers.into_iter().enumerate() {
        id_peer_map.insert(id as u16, peer);
        peer_addr_id_map.insert(peer.peer_address, id as u16);
    }

    Ok(PeerIndexTable {
        collector_bgp_id,
        view_name,
        id_peer_map,
        peer_addr_id_map,
    })
}
