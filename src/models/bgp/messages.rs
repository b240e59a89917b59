use crate::models::{
    Afi, Asn, Attributes, BgpErrorCode, Capability, NetworkPrefix, Safi,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::Ipv4Addr;

/// BGP message type octet, RFC 4271 (ROUTE-REFRESH from RFC 2918).
#[derive(Debug, TryFromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpMessageType {
    Open = 1,
    Update = 2,
    Notification = 3,
    KeepAlive = 4,
    RouteRefresh = 5,
}

/// A parsed BGP message. The 16-byte marker is validated for length and
/// discarded; the declared message length bounds the body.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BgpMessage {
    Open(BgpOpenMessage),
    Update(BgpUpdateMessage),
    Notification(BgpNotificationMessage),
    KeepAlive,
    RouteRefresh(BgpRouteRefreshMessage),
}

/// BGP OPEN message, RFC 4271 section 4.2.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpOpenMessage {
    pub version: u8,
    pub asn: Asn,
    pub hold_time: u16,
    pub sender_ip: Ipv4Addr,
    pub opt_params: Vec<OptParam>,
}

/// One OPEN optional parameter, RFC 3392.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptParam {
    pub param_type: u8,
    pub param_len: u16,
    pub param_value: ParamValue,
}

#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// Type 2: one or more capability entries, RFC 5492.
    Capabilities(Vec<Capability>),
    /// Anything else is kept raw (type 1 Authentication is deprecated).
    Raw(Vec<u8>),
}

/// BGP UPDATE message, RFC 4271 section 4.3. The legacy withdrawn and
/// announced NLRI fields are always IPv4.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpUpdateMessage {
    pub withdrawn_prefixes: Vec<NetworkPrefix>,
    pub attributes: Attributes,
    pub announced_prefixes: Vec<NetworkPrefix>,
}

/// BGP NOTIFICATION message, RFC 4271 section 4.5. Codes are surfaced both
/// numerically and resolved against the subcode registries.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpNotificationMessage {
    pub error_code: u8,
    pub error_subcode: u8,
    pub data: Vec<u8>,
}

impl BgpNotificationMessage {
    pub fn error(&self) -> BgpErrorCode {
        BgpErrorCode::from(self.error_code)
    }

    pub fn error_name(&self) -> &'static str {
        self.error().name()
    }

    pub fn subcode_name(&self) -> &'static str {
        self.error().subcode_name(self.error_subcode)
    }
}

/// BGP ROUTE-REFRESH message, RFC 2918.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BgpRouteRefreshMessage {
    pub afi: Afi,
    pub reserved: u8,
    pub safi: Safi,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_type_codes() {
        assert_eq!(BgpMessageType::try_from(2u8).unwrap(), BgpMessageType::Update);
        assert_eq!(
            BgpMessageType::try_from(5u8).unwrap(),
            BgpMessageType::RouteRefresh
        );
        assert!(BgpMessageType::try_from(6u8).is_err());
    }

    #[test]
    fn test_notification_names() {
        let msg = BgpNotificationMessage {
            error_code: 6,
            error_subcode: 2,
            data: vec![],
        };
        assert_eq!(msg.error_name(), "Cease");
        assert_eq!(msg.subcode_name(), "Administrative Shutdown");
    }
}
