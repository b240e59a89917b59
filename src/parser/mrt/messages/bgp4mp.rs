use crate::models::*;
use crate::parser::bgp::messages::parse_bgp_message;
use crate::parser::{ParseContext, ReadUtils};
use crate::ParserError;
use bytes::Bytes;

/// Parse a BGP4MP / BGP4MP_ET body, RFC 6396 section 4.4 and RFC 8050.
///
/// The subtype decides the AS number width (2 octets unless the name
/// carries `As4`) and whether NLRI carry path identifiers (`Addpath`
/// names). The deprecated BGP4MP_ENTRY and BGP4MP_SNAPSHOT subtypes are
/// rejected as unsupported.
pub fn parse_bgp4mp(sub_type: u16, mut input: Bytes) -> Result<Bgp4MpEnum, ParserError> {
    let bgp4mp_type = Bgp4MpType::try_from(sub_type)?;

    if matches!(bgp4mp_type, Bgp4MpType::Entry | Bgp4MpType::Snapshot) {
        return Err(ParserError::Unsupported(format!(
            "Unsupported BGP4MP subtype: {bgp4mp_type:?}"
        )));
    }

    let asn_len = match bgp4mp_type.is_as4() {
        true => AsnLength::Bits32,
        false => AsnLength::Bits16,
    };
    let ctx = ParseContext::default()
        .with_asn_len(asn_len)
        .with_add_path(bgp4mp_type.is_addpath());

    let msg = match bgp4mp_type {
        Bgp4MpType::StateChange | Bgp4MpType::StateChangeAs4 => {
            Bgp4MpEnum::StateChange(parse_bgp4mp_state_change(&mut input, bgp4mp_type, &ctx)?)
        }
        _ => Bgp4MpEnum::Message(parse_bgp4mp_message(&mut input, bgp4mp_type, &ctx)?),
    };
    Ok(msg)
}

/*
   0                   1                   2                   3
   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |         Peer AS Number        |        Local AS Number        |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |        Interface Index        |        Address Family         |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Peer IP Address (variable)               |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Local IP Address (variable)              |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                    BGP Message... (variable)
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+

  The AS4 variants widen the AS fields to 32 bits; the state-change form
  replaces the BGP message with old/new FSM state words.
*/
pub fn parse_bgp4mp_message(
    data: &mut Bytes,
    msg_type: Bgp4MpType,
    ctx: &ParseContext,
) -> Result<Bgp4MpMessage, ParserError> {
    let peer_asn = data.read_asn(ctx.asn_len)?;
    let local_asn = data.read_asn(ctx.asn_len)?;
    let interface_index = data.read_u16()?;
    let afi = data.read_afi()?;
    let peer_ip = data.read_address(&afi)?;
    let local_ip = data.read_address(&afi)?;
    let bgp_message = parse_bgp_message(data, ctx)?;

    Ok(Bgp4MpMessage {
        msg_type,
        peer_asn,
        local_asn,
        interface_index,
        afi,
        peer_ip,
        local_ip,
        bgp_message,
    })
}

pub fn parse_bgp4mp_state_change(
    input: &mut Bytes,
    msg_type: Bgp4MpType,
    ctx: &ParseContext,
) -> Result<Bgp4MpStateChange, ParserError> {
    let peer_asn = input.read_asn(ctx.asn_len)?;
    let local_asn = input.read_asn(ctx.asn_len)?;
    let interface_index = input.read_u16()?;
    let afi = input.read_afi()?;
    let peer_addr = input.read_address(&afi)?;
    let local_addr = input.read_address(&afi)?;
    let old_state = BgpState::try_from(input.read_u16()?)?;
    let new_state = BgpState::try_from(input.read_u16()?)?;
    Ok(Bgp4MpStateChange {
        msg_type,
        peer_asn,
        local_asn,
        interface_index,
        afi,
        peer_addr,
        local_addr,
        old_state,
        new_state,
    })
}
