/*!
Error types used across the crate.

Two failure surfaces exist when walking an MRT file: the 12-byte common
header could not be framed at all ([`ErrorKind::HeaderError`]), or the
header framed fine and the declared payload failed to decode
([`ErrorKind::DataError`]). Neither aborts iteration; the stream reader
resynchronizes at the next header.
*/
use crate::models::{Afi, Bgp4MpType, BgpState, CommonHeader, EntryType, Safi, TableDumpV2Type};
use bytes::Bytes;
use num_enum::TryFromPrimitiveError;
use std::fmt::{Display, Formatter};
use std::io::ErrorKind as IoErrorKind;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum ParserError {
    IoError(io::Error),
    EofError(io::Error),
    /// Clean end of stream before a new header: not an error for callers.
    EofExpected,
    /// Fewer than 12 bytes available where a common header was expected.
    TruncatedHeader(usize),
    /// Top-level MRT type code outside the registry.
    UnrecognizedMrtType(u16),
    /// Known type whose body decoding is not performed (deprecated types,
    /// BGP4MP_ENTRY/BGP4MP_SNAPSHOT, unassigned subtypes).
    Unsupported(String),
    /// Payload-level decoding failure.
    ParseError(String),
    /// A length field promised more bytes than the region holds.
    TruncatedMsg(String),
}

impl Error for ParserError {}

impl Display for ParserError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParserError::IoError(e) => write!(f, "Error: {e}"),
            ParserError::EofError(e) => write!(f, "Error: {e}"),
            ParserError::EofExpected => write!(f, "Error: reach end of file"),
            ParserError::TruncatedHeader(n) => {
                write!(f, "Error: Invalid MRT header length {n} < 12")
            }
            ParserError::UnrecognizedMrtType(t) => {
                write!(f, "Error: Unknown MRT type {t}")
            }
            ParserError::Unsupported(s) => write!(f, "Error: {s}"),
            ParserError::ParseError(s) => write!(f, "Error: {s}"),
            ParserError::TruncatedMsg(s) => write!(f, "Error: {s}"),
        }
    }
}

/// The two error classes of the MRT framing model.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Framing failed before a payload could be delimited.
    HeaderError,
    /// Framing succeeded; the payload did not decode.
    DataError,
}

impl ParserError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            ParserError::IoError(_)
            | ParserError::EofError(_)
            | ParserError::EofExpected
            | ParserError::TruncatedHeader(_)
            | ParserError::UnrecognizedMrtType(_) => ErrorKind::HeaderError,
            ParserError::Unsupported(_)
            | ParserError::ParseError(_)
            | ParserError::TruncatedMsg(_) => ErrorKind::DataError,
        }
    }
}

/// A parse failure together with whatever was salvaged from the record:
/// the decoded common header (when framing succeeded) and the raw payload
/// bytes, so a broken record can still be inspected or archived.
#[derive(Debug)]
pub struct ParserErrorWithBytes {
    pub error: ParserError,
    pub header: Option<CommonHeader>,
    pub bytes: Option<Bytes>,
}

impl Display for ParserErrorWithBytes {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl Error for ParserErrorWithBytes {}

impl From<ParserError> for ParserErrorWithBytes {
    fn from(error: ParserError) -> Self {
        ParserErrorWithBytes {
            error,
            header: None,
            bytes: None,
        }
    }
}

impl From<io::Error> for ParserError {
    fn from(io_error: io::Error) -> Self {
        match io_error.kind() {
            IoErrorKind::UnexpectedEof => ParserError::EofError(io_error),
            _ => ParserError::IoError(io_error),
        }
    }
}

impl From<TryFromPrimitiveError<Bgp4MpType>> for ParserError {
    fn from(value: TryFromPrimitiveError<Bgp4MpType>) -> Self {
        ParserError::Unsupported(format!("Unsupported BGP4MP subtype: {}", value.number))
    }
}

impl From<TryFromPrimitiveError<BgpState>> for ParserError {
    fn from(value: TryFromPrimitiveError<BgpState>) -> Self {
        ParserError::ParseError(format!("cannot parse bgp4mp state: {}", value.number))
    }
}

impl From<TryFromPrimitiveError<TableDumpV2Type>> for ParserError {
    fn from(value: TryFromPrimitiveError<TableDumpV2Type>) -> Self {
        ParserError::Unsupported(format!(
            "Unsupported TABLE_DUMP_V2 subtype: {}",
            value.number
        ))
    }
}

impl From<TryFromPrimitiveError<EntryType>> for ParserError {
    fn from(value: TryFromPrimitiveError<EntryType>) -> Self {
        ParserError::UnrecognizedMrtType(value.number)
    }
}

impl From<TryFromPrimitiveError<Afi>> for ParserError {
    fn from(value: TryFromPrimitiveError<Afi>) -> Self {
        ParserError::ParseError(format!("Unknown AFI type: {}", value.number))
    }
}

impl From<TryFromPrimitiveError<Safi>> for ParserError {
    fn from(value: TryFromPrimitiveError<Safi>) -> Self {
        ParserError::ParseError(format!("Unknown SAFI type: {}", value.number))
    }
}
