use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Parse the body of a Capabilities optional parameter (type 2, RFC 5492):
/// one or more capability entries, each a code, a length, and `length`
/// value bytes.
pub fn parse_capabilities(mut data: Bytes) -> Result<Vec<Capability>, ParserError> {
    let mut capabilities = vec![];
    while data.remaining() > 0 {
        let code = BgpCapabilityType::from(data.read_u8()?);
        let cap_len = data.read_u8()? as usize;
        data.require_n_remaining(cap_len)?;
        let cap_data = data.split_to(cap_len);
        let value = parse_capability_value(code, cap_data)?;
        capabilities.push(Capability { code, value });
    }
    Ok(capabilities)
}

fn parse_capability_value(
    code: BgpCapabilityType,
    mut data: Bytes,
) -> Result<CapabilityValue, ParserError> {
    let value = match code {
        BgpCapabilityType::MULTIPROTOCOL_EXTENSIONS_FOR_BGP_4 => {
            let afi = data.read_u16()?;
            let _reserved = data.read_u8()?;
            let safi = data.read_u8()?;
            CapabilityValue::Multiprotocol(MultiprotocolCapability { afi, safi })
        }
        BgpCapabilityType::ROUTE_REFRESH_CAPABILITY_FOR_BGP_4 => CapabilityValue::RouteRefresh,
        BgpCapabilityType::OUTBOUND_ROUTE_FILTERING_CAPABILITY => {
            let afi = data.read_u16()?;
            let _reserved = data.read_u8()?;
            let safi = data.read_u8()?;
            let count = data.read_u8()? as usize;
            let mut entries = Vec::with_capacity(count);
            for _ in 0..count {
                entries.push(OrfEntry {
                    orf_type: data.read_u8()?,
                    send_receive: SendReceiveMode::from(data.read_u8()?),
                });
            }
            CapabilityValue::OutboundRouteFiltering(OrfCapability { afi, safi, entries })
        }
        BgpCapabilityType::GRACEFUL_RESTART_CAPABILITY => {
            let head = data.read_u16()?;
            let flags = (head >> 12) as u8;
            let restart_time = head & 0x0fff;
            let mut entries = vec![];
            while data.remaining() >= 4 {
                entries.push(GracefulRestartEntry {
                    afi: data.read_u16()?,
                    safi: data.read_u8()?,
                    flags: data.read_u8()?,
                });
            }
            CapabilityValue::GracefulRestart(GracefulRestartCapability {
                flags,
                restart_time,
                entries,
            })
        }
        BgpCapabilityType::SUPPORT_FOR_4_OCTET_AS_NUMBER_CAPABILITY => {
            CapabilityValue::FourOctetAsNumber(data.read_asn(AsnLength::Bits32)?)
        }
        BgpCapabilityType::ADD_PATH_CAPABILITY => {
            let mut entries = vec![];
            while data.remaining() >= 4 {
                entries.push(AddPathEntry {
                    afi: data.read_u16()?,
                    safi: data.read_u8()?,
                    send_receive: SendReceiveMode::from(data.read_u8()?),
                });
            }
            CapabilityValue::AddPath(entries)
        }
        _ => CapabilityValue::Raw(data.read_n_bytes(data.remaining())?),
    };
    Ok(value)
}
