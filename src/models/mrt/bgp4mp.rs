use crate::models::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::IpAddr;

/// BGP4MP subtypes, RFC 6396 section 4.4 and RFC 8050.
///
/// Subtypes whose name lacks `As4` carry 2-octet AS numbers; subtypes with
/// `Addpath` put 4-byte path identifiers in front of every NLRI.
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Bgp4MpType {
    StateChange = 0,
    Message = 1,
    Entry = 2,    // deprecated in RFC6396
    Snapshot = 3, // deprecated in RFC6396
    MessageAs4 = 4,
    StateChangeAs4 = 5,
    MessageLocal = 6,
    MessageAs4Local = 7,
    MessageAddpath = 8,
    MessageAs4Addpath = 9,
    MessageLocalAddpath = 10,
    MessageLocalAs4Addpath = 11,
}

impl Bgp4MpType {
    pub const fn is_as4(&self) -> bool {
        matches!(
            self,
            Bgp4MpType::MessageAs4
                | Bgp4MpType::StateChangeAs4
                | Bgp4MpType::MessageAs4Local
                | Bgp4MpType::MessageAs4Addpath
                | Bgp4MpType::MessageLocalAs4Addpath
        )
    }

    pub const fn is_addpath(&self) -> bool {
        matches!(
            self,
            Bgp4MpType::MessageAddpath
                | Bgp4MpType::MessageAs4Addpath
                | Bgp4MpType::MessageLocalAddpath
                | Bgp4MpType::MessageLocalAs4Addpath
        )
    }
}

/// BGP finite state machine states, RFC 4271 section 8.2.2. States 7 and 8
/// are emitted by quagga only.
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum BgpState {
    Idle = 1,
    Connect = 2,
    Active = 3,
    OpenSent = 4,
    OpenConfirm = 5,
    Established = 6,
    Clearing = 7,
    Deleted = 8,
}

#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bgp4MpEnum {
    StateChange(Bgp4MpStateChange),
    Message(Bgp4MpMessage),
}

/// BGP4MP_STATE_CHANGE[_AS4] body.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bgp4MpStateChange {
    pub msg_type: Bgp4MpType,
    pub peer_asn: Asn,
    pub local_asn: Asn,
    pub interface_index: u16,
    pub afi: Afi,
    pub peer_addr: IpAddr,
    pub local_addr: IpAddr,
    pub old_state: BgpState,
    pub new_state: BgpState,
}

/// BGP4MP_MESSAGE family body: the peer header plus one complete BGP
/// message.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bgp4MpMessage {
    pub msg_type: Bgp4MpType,
    pub peer_asn: Asn,
    pub local_asn: Asn,
    pub interface_index: u16,
    pub afi: Afi,
    pub peer_ip: IpAddr,
    pub local_ip: IpAddr,
    pub bgp_message: BgpMessage,
}
