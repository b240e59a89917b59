use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// NEXT_HOP attribute: 4 bytes for IPv4, 16 for IPv6.
pub fn parse_next_hop(mut input: Bytes) -> Result<AttributeValue, ParserError> {
    match input.remaining() {
        4 => Ok(AttributeValue::NextHop(input.read_ipv4_address()?.into())),
        16 => Ok(AttributeValue::NextHop(input.read_ipv6_address()?.into())),
        n => Err(ParserError::ParseError(format!(
            "Invalid NEXT_HOP length {n}"
        ))),
    }
}

/// Next hop of an MP_REACH_NLRI attribute, sized by the declared next-hop
/// length: 4 (IPv4), 16 (IPv6) or 32 (IPv6 global + link-local, RFC 2545).
pub fn parse_mp_next_hop(mut input: Bytes) -> Result<Option<NextHopAddress>, ParserError> {
    let output = match input.remaining() {
        0 => None,
        4 => Some(NextHopAddress::Ipv4(input.read_ipv4_address()?)),
        16 => Some(NextHopAddress::Ipv6(input.read_ipv6_address()?)),
        32 => Some(NextHopAddress::Ipv6LinkLocal(
            input.read_ipv6_address()?,
            input.read_ipv6_address()?,
        )),
        n => {
            return Err(ParserError::ParseError(format!(
                "Invalid next hop length {n}"
            )))
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::IpAddr;
    use std::str::FromStr;

    #[test]
    fn test_parse_next_hop() {
        let ipv4 = Bytes::from_static(&[192, 0, 2, 1]);
        assert_eq!(
            parse_next_hop(ipv4).unwrap(),
            AttributeValue::NextHop(IpAddr::from_str("192.0.2.1").unwrap())
        );

        let ipv6 = Bytes::from_static(&[
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
        ]);
        assert_eq!(
            parse_next_hop(ipv6).unwrap(),
            AttributeValue::NextHop(IpAddr::from_str("2001:db8::1").unwrap())
        );

        assert!(parse_next_hop(Bytes::from_static(&[1, 2, 3])).is_err());
    }

    #[test]
    fn test_parse_mp_next_hop_link_local() {
        let mut data = vec![0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        data.extend([0xfe, 0x80, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1]);
        let next_hop = parse_mp_next_hop(Bytes::from(data)).unwrap();
        assert_eq!(
            next_hop,
            Some(NextHopAddress::Ipv6LinkLocal(
                "2001:db8::1".parse().unwrap(),
                "fe80::1".parse().unwrap(),
            ))
        );
    }

    #[test]
    fn test_parse_mp_next_hop_empty() {
        assert_eq!(parse_mp_next_hop(Bytes::new()).unwrap(), None);
    }
}
