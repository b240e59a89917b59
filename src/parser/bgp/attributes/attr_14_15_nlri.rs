use crate::models::*;
use crate::parser::bgp::attributes::attr_03_next_hop::parse_mp_next_hop;
use crate::parser::{parse_nlri_list, ParseContext, ReadUtils};
use crate::ParserError;
use bytes::{Buf, Bytes};
use log::warn;

/// MP_REACH_NLRI attribute, RFC 4760 section 3:
///
/// ```text
/// +---------------------------------------------------------+
/// | Address Family Identifier (2 octets)                    |
/// +---------------------------------------------------------+
/// | Subsequent Address Family Identifier (1 octet)          |
/// +---------------------------------------------------------+
/// | Length of Next Hop Network Address (1 octet)            |
/// +---------------------------------------------------------+
/// | Network Address of Next Hop (variable)                  |
/// +---------------------------------------------------------+
/// | Reserved (1 octet)                                      |
/// +---------------------------------------------------------+
/// | Network Layer Reachability Information (variable)       |
/// +---------------------------------------------------------+
/// ```
///
/// Inside a TABLE_DUMP_V2 RIB entry the attribute appears in the truncated
/// form of RFC 6396 section 4.3.4: next-hop length and next hop only. The
/// AFI/SAFI of that form live on the enclosing record, so the truncation is
/// detected by the leading two bytes not naming a known AFI.
pub fn parse_mp_reach_nlri(
    mut input: Bytes,
    ctx: &ParseContext,
) -> Result<AttributeValue, ParserError> {
    let full_form = input.remaining() >= 2
        && Afi::try_from(u16::from_be_bytes([input[0], input[1]])).is_ok();

    if !full_form {
        let (afi, safi) = match (ctx.afi, ctx.safi) {
            (Some(afi), Some(safi)) => (afi, safi),
            _ => {
                return Err(ParserError::ParseError(
                    "Unknown AFI in MP_REACH_NLRI".to_string(),
                ))
            }
        };
        let next_hop_length = input.read_u8()? as usize;
        input.require_n_remaining(next_hop_length)?;
        let next_hop = parse_mp_next_hop(input.split_to(next_hop_length))?;
        return Ok(AttributeValue::MpReachNlri(Nlri {
            afi,
            safi,
            next_hop,
            route_distinguisher: None,
            prefixes: vec![],
        }));
    }

    let afi = input.read_afi()?;
    let safi = input.read_safi()?;
    let mut next_hop_length = input.read_u8()? as usize;

    // L3VPN next hops lead with an 8-byte route distinguisher
    let mut route_distinguisher = None;
    if safi.is_l3vpn() {
        if next_hop_length < 8 {
            return Err(ParserError::ParseError(format!(
                "Invalid L3VPN next hop length {next_hop_length}"
            )));
        }
        route_distinguisher = Some(input.read_rd()?);
        next_hop_length -= 8;
    }

    input.require_n_remaining(next_hop_length)?;
    let next_hop = parse_mp_next_hop(input.split_to(next_hop_length))?;

    if input.read_u8()? != 0 {
        warn!("MP_REACH_NLRI reserved byte not 0");
    }

    let prefixes = parse_nlri_list(input, &afi, &safi, ctx.add_path)?;
    Ok(AttributeValue::MpReachNlri(Nlri {
        afi,
        safi,
        next_hop,
        route_distinguisher,
        prefixes,
    }))
}

/// MP_UNREACH_NLRI attribute, RFC 4760 section 4: AFI, SAFI, withdrawn
/// NLRI to the end of the attribute.
pub fn parse_mp_unreach_nlri(
    mut input: Bytes,
    ctx: &ParseContext,
) -> Result<AttributeValue, ParserError> {
    let afi = input.read_afi()?;
    let safi = input.read_safi()?;
    let prefixes = parse_nlri_list(input, &afi, &safi, ctx.add_path)?;
    Ok(AttributeValue::MpUnreachNlri(Nlri {
        afi,
        safi,
        next_hop: None,
        route_distinguisher: None,
        prefixes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_mp_reach_simple() {
        let data = Bytes::from_static(&[
            0x00, 0x01, // AFI: IPv4
            0x01, // SAFI: unicast
            0x04, // next hop length: 4
            0xC0, 0x00, 0x02, 0x01, // next hop: 192.0.2.1
            0x00, // reserved
            0x18, 0xC0, 0x00, 0x02, // 192.0.2.0/24
        ]);
        let ctx = ParseContext::default();
        let attr = parse_mp_reach_nlri(data, &ctx).unwrap();
        let AttributeValue::MpReachNlri(nlri) = attr else {
            panic!("expected MP_REACH_NLRI");
        };
        assert_eq!(nlri.afi, Afi::Ipv4);
        assert_eq!(nlri.safi, Safi::Unicast);
        assert_eq!(
            nlri.next_hop,
            Some(NextHopAddress::Ipv4("192.0.2.1".parse().unwrap()))
        );
        assert_eq!(
            nlri.prefixes,
            vec![NetworkPrefix::from_str("192.0.2.0/24").unwrap()]
        );
    }

    #[test]
    fn test_parse_mp_reach_ipv6() {
        let mut data = vec![
            0x00, 0x02, // AFI: IPv6
            0x01, // SAFI: unicast
            0x10, // next hop length: 16
        ];
        data.extend([0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]); // fe80::1
        data.push(0x00); // reserved
        data.extend([0x20, 0x20, 0x01, 0x0d, 0xb8]); // 2001:db8::/32
        let ctx = ParseContext::default();
        let attr = parse_mp_reach_nlri(Bytes::from(data), &ctx).unwrap();
        let AttributeValue::MpReachNlri(nlri) = attr else {
            panic!("expected MP_REACH_NLRI");
        };
        assert_eq!(nlri.afi, Afi::Ipv6);
        assert_eq!(
            nlri.next_hop,
            Some(NextHopAddress::Ipv6("fe80::1".parse().unwrap()))
        );
        assert_eq!(nlri.prefixes.len(), 1);
        assert_eq!(nlri.prefixes[0].prefix.to_string(), "2001:db8::/32");
    }

    #[test]
    fn test_parse_mp_reach_truncated_form() {
        // next-hop length + next hop only; AFI/SAFI come from the record
        let data = Bytes::from_static(&[0x04, 0x0A, 0x00, 0x00, 0x01]);
        let ctx = ParseContext::default().with_af(Afi::Ipv4, Safi::Unicast);
        let attr = parse_mp_reach_nlri(data, &ctx).unwrap();
        let AttributeValue::MpReachNlri(nlri) = attr else {
            panic!("expected MP_REACH_NLRI");
        };
        assert_eq!(nlri.afi, Afi::Ipv4);
        assert_eq!(
            nlri.next_hop,
            Some(NextHopAddress::Ipv4("10.0.0.1".parse().unwrap()))
        );
        assert!(nlri.prefixes.is_empty());
    }

    #[test]
    fn test_parse_mp_reach_truncated_form_without_context() {
        let data = Bytes::from_static(&[0x04, 0x0A, 0x00, 0x00, 0x01]);
        let ctx = ParseContext::default();
        assert!(parse_mp_reach_nlri(data, &ctx).is_err());
    }

    #[test]
    fn test_parse_mp_unreach() {
        let data = Bytes::from_static(&[
            0x00, 0x01, // AFI: IPv4
            0x01, // SAFI: unicast
            0x18, 0xC0, 0x00, 0x02, // 192.0.2.0/24
        ]);
        let ctx = ParseContext::default();
        let attr = parse_mp_unreach_nlri(data, &ctx).unwrap();
        let AttributeValue::MpUnreachNlri(nlri) = attr else {
            panic!("expected MP_UNREACH_NLRI");
        };
        assert_eq!(nlri.next_hop, None);
        assert_eq!(nlri.prefixes.len(), 1);
    }

    #[test]
    fn test_parse_mp_reach_l3vpn_next_hop_rd() {
        let mut data = vec![
            0x00, 0x01, // AFI: IPv4
            0x80, // SAFI: L3VPN unicast
            0x0C, // next hop length: 12 (RD + IPv4)
        ];
        data.extend([0, 0, 0, 0, 0, 0, 0, 0]); // zero RD ahead of the next hop
        data.extend([10, 0, 0, 1]);
        data.push(0x00); // reserved
        // one VPN NLRI: 88 bits overhead + /24
        data.push(112);
        data.extend([0x00, 0x3e, 0x91]); // label 1001 bottom-of-stack
        data.extend([0x00, 0x00, 0xfd, 0xe8, 0x00, 0x00, 0x00, 0x01]); // RD 65000:1
        data.extend([10, 1, 1]);

        let ctx = ParseContext::default();
        let attr = parse_mp_reach_nlri(Bytes::from(data), &ctx).unwrap();
        let AttributeValue::MpReachNlri(nlri) = attr else {
            panic!("expected MP_REACH_NLRI");
        };
        assert_eq!(nlri.safi, Safi::L3VpnUnicast);
        assert_eq!(nlri.route_distinguisher.unwrap().to_string(), "0:0");
        assert_eq!(
            nlri.next_hop,
            Some(NextHopAddress::Ipv4("10.0.0.1".parse().unwrap()))
        );
        assert_eq!(nlri.prefixes.len(), 1);
        assert_eq!(
            nlri.prefixes[0].route_distinguisher.unwrap().to_string(),
            "65000:1"
        );
    }
}
