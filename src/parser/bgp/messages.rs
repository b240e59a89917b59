use crate::models::*;
use crate::parser::bgp::attributes::parse_attributes;
use crate::parser::bgp::capabilities::parse_capabilities;
use crate::parser::{parse_nlri_list, ParseContext, ReadUtils};
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Parse one BGP message, RFC 4271 section 4.1:
///
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The marker is opaque and discarded. The declared length must be between
/// 19 and 4096 and bounds the body; a record that holds fewer bytes than
/// declared yields a body limited to what is available.
pub fn parse_bgp_message(
    data: &mut Bytes,
    ctx: &ParseContext,
) -> Result<BgpMessage, ParserError> {
    data.require_n_remaining(19)?;
    let total_size = data.remaining();

    // 16-octet marker
    data.advance(16);

    let length = data.read_u16()?;
    if !(19..=4096).contains(&length) {
        return Err(ParserError::ParseError(format!(
            "invalid BGP message length {length}"
        )));
    }
    let body_length = std::cmp::min(length as usize - 19, total_size - 19);

    let type_value = data.read_u8()?;
    let msg_type = BgpMessageType::try_from(type_value).map_err(|_| {
        ParserError::ParseError(format!("Unknown BGP message type: {type_value}"))
    })?;

    data.require_n_remaining(body_length)?;
    let mut body = data.split_to(body_length);

    Ok(match msg_type {
        BgpMessageType::Open => BgpMessage::Open(parse_bgp_open_message(&mut body)?),
        BgpMessageType::Update => BgpMessage::Update(parse_bgp_update_message(body, ctx)?),
        BgpMessageType::Notification => {
            BgpMessage::Notification(parse_bgp_notification_message(&mut body)?)
        }
        BgpMessageType::KeepAlive => BgpMessage::KeepAlive,
        BgpMessageType::RouteRefresh => {
            BgpMessage::RouteRefresh(parse_bgp_route_refresh_message(&mut body)?)
        }
    })
}

/// BGP OPEN, RFC 4271 section 4.2, with the optional parameters decoded.
/// A type-2 parameter carries capability entries (RFC 5492); everything
/// else is kept raw.
pub fn parse_bgp_open_message(input: &mut Bytes) -> Result<BgpOpenMessage, ParserError> {
    let version = input.read_u8()?;
    let asn = Asn::new_16bit(input.read_u16()?);
    let hold_time = input.read_u16()?;
    let sender_ip = input.read_ipv4_address()?;

    let opt_params_len = input.read_u8()? as usize;
    input.require_n_remaining(opt_params_len)?;
    let mut params_data = input.split_to(opt_params_len);

    let mut opt_params: Vec<OptParam> = vec![];
    while params_data.remaining() > 0 {
        let param_type = params_data.read_u8()?;
        let param_len = params_data.read_u8()? as usize;
        params_data.require_n_remaining(param_len)?;
        let param_data = params_data.split_to(param_len);

        // https://www.iana.org/assignments/bgp-parameters/bgp-parameters.xhtml#bgp-parameters-11
        let param_value = match param_type {
            2 => ParamValue::Capabilities(parse_capabilities(param_data)?),
            _ => ParamValue::Raw(param_data.to_vec()),
        };
        opt_params.push(OptParam {
            param_type,
            param_len: param_len as u16,
            param_value,
        });
    }

    Ok(BgpOpenMessage {
        version,
        asn,
        hold_time,
        sender_ip,
        opt_params,
    })
}

/// BGP UPDATE, RFC 4271 section 4.3. The legacy withdrawn and announced
/// NLRI fields are IPv4; multiprotocol routes ride in the MP_REACH_NLRI /
/// MP_UNREACH_NLRI attributes.
pub fn parse_bgp_update_message(
    mut input: Bytes,
    ctx: &ParseContext,
) -> Result<BgpUpdateMessage, ParserError> {
    let afi = Afi::Ipv4;
    let safi = Safi::Unicast;

    let withdrawn_length = input.read_u16()? as usize;
    input.require_n_remaining(withdrawn_length)?;
    let withdrawn_data = input.split_to(withdrawn_length);
    let withdrawn_prefixes = parse_nlri_list(withdrawn_data, &afi, &safi, ctx.add_path)?;

    let attribute_length = input.read_u16()? as usize;
    input.require_n_remaining(attribute_length)?;
    let attr_data = input.split_to(attribute_length);
    let attributes = parse_attributes(attr_data, ctx)?;

    // the remainder of the message is announced NLRI
    let announced_prefixes = parse_nlri_list(input, &afi, &safi, ctx.add_path)?;

    Ok(BgpUpdateMessage {
        withdrawn_prefixes,
        attributes,
        announced_prefixes,
    })
}

/// BGP NOTIFICATION, RFC 4271 section 4.5: error code, subcode, and the
/// remaining bytes as diagnostic data.
pub fn parse_bgp_notification_message(
    input: &mut Bytes,
) -> Result<BgpNotificationMessage, ParserError> {
    let error_code = input.read_u8()?;
    let error_subcode = input.read_u8()?;
    let data = input.read_n_bytes(input.remaining())?;
    Ok(BgpNotificationMessage {
        error_code,
        error_subcode,
        data,
    })
}

/// BGP ROUTE-REFRESH, RFC 2918: AFI, reserved byte, SAFI.
pub fn parse_bgp_route_refresh_message(
    input: &mut Bytes,
) -> Result<BgpRouteRefreshMessage, ParserError> {
    let afi = input.read_afi()?;
    let reserved = input.read_u8()?;
    let safi = input.read_safi()?;
    Ok(BgpRouteRefreshMessage {
        afi,
        reserved,
        safi,
    })
}
