//! BGP NOTIFICATION error code registries, RFC 4271 and extensions.
use num_enum::{FromPrimitive, IntoPrimitive};

/// Top-level NOTIFICATION error code.
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpErrorCode {
    MessageHeaderError = 1,
    OpenMessageError = 2,
    UpdateMessageError = 3,
    HoldTimerExpired = 4,
    FiniteStateMachineError = 5,
    Cease = 6,
    /// RFC 7313
    RouteRefreshMessageError = 7,
    #[num_enum(catch_all)]
    Unknown(u8),
}

impl BgpErrorCode {
    pub const fn name(&self) -> &'static str {
        match self {
            BgpErrorCode::MessageHeaderError => "Message Header Error",
            BgpErrorCode::OpenMessageError => "OPEN Message Error",
            BgpErrorCode::UpdateMessageError => "UPDATE Message Error",
            BgpErrorCode::HoldTimerExpired => "Hold Timer Expired",
            BgpErrorCode::FiniteStateMachineError => "Finite State Machine Error",
            BgpErrorCode::Cease => "Cease",
            BgpErrorCode::RouteRefreshMessageError => "ROUTE-REFRESH Message Error",
            BgpErrorCode::Unknown(_) => "Unknown",
        }
    }

    /// Resolve the subcode against the per-code registry. Unassigned values
    /// yield `"Unknown"`, never a missing entry.
    pub const fn subcode_name(&self, subcode: u8) -> &'static str {
        match self {
            BgpErrorCode::MessageHeaderError => match subcode {
                1 => "Connection Not Synchronized",
                2 => "Bad Message Length",
                3 => "Bad Message Type",
                _ => "Unknown",
            },
            BgpErrorCode::OpenMessageError => match subcode {
                1 => "Unsupported Version Number",
                2 => "Bad Peer AS",
                3 => "Bad BGP Identifier",
                4 => "Unsupported Optional Parameter",
                5 => "[Deprecated]",
                6 => "Unacceptable Hold Time",
                7 => "Unsupported Capability",
                _ => "Unknown",
            },
            BgpErrorCode::UpdateMessageError => match subcode {
                1 => "Malformed Attribute List",
                2 => "Unrecognized Well-known Attribute",
                3 => "Missing Well-known Attribute",
                4 => "Attribute Flags Error",
                5 => "Attribute Length Error",
                6 => "Invalid ORIGIN Attribute",
                7 => "[Deprecated]",
                8 => "Invalid NEXT_HOP Attribute",
                9 => "Optional Attribute Error",
                10 => "Invalid Network Field",
                11 => "Malformed AS_PATH",
                _ => "Unknown",
            },
            BgpErrorCode::FiniteStateMachineError => match subcode {
                0 => "Unspecified Error",
                1 => "Receive Unexpected Message in OpenSent State",
                2 => "Receive Unexpected Message in OpenConfirm State",
                3 => "Receive Unexpected Message in Established State",
                _ => "Unknown",
            },
            BgpErrorCode::Cease => match subcode {
                1 => "Maximum Number of Prefixes Reached",
                2 => "Administrative Shutdown",
                3 => "Peer De-configured",
                4 => "Administrative Reset",
                5 => "Connection Rejected",
                6 => "Other Configuration Change",
                7 => "Connection Collision Resolution",
                8 => "Out of Resources",
                _ => "Unknown",
            },
            BgpErrorCode::RouteRefreshMessageError => match subcode {
                1 => "Invalid Message Length",
                _ => "Unknown",
            },
            BgpErrorCode::HoldTimerExpired | BgpErrorCode::Unknown(_) => "Unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_totality() {
        // every (code, subcode) pair resolves to a name, "Unknown" included
        for code in 0..=255u8 {
            let error_code = BgpErrorCode::from(code);
            assert!(!error_code.name().is_empty());
            for subcode in 0..=255u8 {
                assert!(!error_code.subcode_name(subcode).is_empty());
            }
        }
    }

    #[test]
    fn test_known_subcodes() {
        assert_eq!(
            BgpErrorCode::UpdateMessageError.subcode_name(11),
            "Malformed AS_PATH"
        );
        assert_eq!(
            BgpErrorCode::Cease.subcode_name(2),
            "Administrative Shutdown"
        );
        assert_eq!(BgpErrorCode::from(99).subcode_name(1), "Unknown");
    }
}
