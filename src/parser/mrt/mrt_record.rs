use crate::error::{ParserError, ParserErrorWithBytes};
use crate::models::*;
use crate::parser::mrt::messages::{
    parse_bgp4mp, parse_table_dump_message, parse_table_dump_v2_message,
};
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes, BytesMut};
use std::io::Read;

/// The four fixed fields of the 12-byte MRT common header, before the type
/// code has been validated against the registry.
struct RawHeader {
    timestamp: u32,
    entry_type: u16,
    entry_subtype: u16,
    length: u32,
}

/// Read the 12-byte common header. Returns `Ok(None)` on a clean end of
/// stream (no bytes at all); a partial header is a header error.
fn try_read_raw_header<T: Read>(input: &mut T) -> Result<Option<RawHeader>, ParserError> {
    let mut buffer = [0u8; 12];
    let mut read_total = 0;
    while read_total < buffer.len() {
        let n = input.read(&mut buffer[read_total..])?;
        if n == 0 {
            break;
        }
        read_total += n;
    }
    match read_total {
        0 => return Ok(None),
        12 => {}
        n => return Err(ParserError::TruncatedHeader(n)),
    }

    let mut data = &buffer[..];
    Ok(Some(RawHeader {
        timestamp: data.get_u32(),
        entry_type: data.get_u16(),
        entry_subtype: data.get_u16(),
        length: data.get_u32(),
    }))
}

/// Read one MRT record. `Ok(None)` signals a clean end of stream.
///
/// The declared payload length is always consumed from the reader, even
/// when the record turns out to be undecodable, so the stream stays
/// aligned on the next header. Decoding failures come back as
/// [`ParserErrorWithBytes`] carrying the decoded header (when the type was
/// recognizable) and the raw payload.
pub fn try_parse_mrt_record<T: Read>(
    input: &mut T,
) -> Result<Option<MrtRecord>, ParserErrorWithBytes> {
    let raw_header = match try_read_raw_header(input) {
        Ok(None) => return Ok(None),
        Ok(Some(header)) => header,
        Err(error) => {
            return Err(ParserErrorWithBytes {
                error,
                header: None,
                bytes: None,
            })
        }
    };

    // consume the whole payload before any validation: the length field
    // authoritatively delimits the record
    let mut buffer = BytesMut::zeroed(raw_header.length as usize);
    if let Err(io_err) = input.read_exact(&mut buffer) {
        return Err(ParserErrorWithBytes {
            error: ParserError::TruncatedMsg(format!(
                "Invalid MRT data length: {io_err}"
            )),
            header: None,
            bytes: Some(buffer.freeze()),
        });
    }
    let mut body = buffer.freeze();

    let entry_type = match EntryType::try_from(raw_header.entry_type) {
        Ok(t) => t,
        Err(e) => {
            return Err(ParserErrorWithBytes {
                error: e.into(),
                header: None,
                bytes: Some(body),
            })
        }
    };

    // ET types lead the payload with a microsecond timestamp
    let mut length = raw_header.length;
    let mut microsecond_timestamp = None;
    if entry_type.has_microsecond_timestamp() {
        match body.read_u32() {
            Ok(micro) => {
                microsecond_timestamp = Some(micro);
                length -= 4;
            }
            Err(error) => {
                return Err(ParserErrorWithBytes {
                    error,
                    header: None,
                    bytes: Some(body),
                })
            }
        }
    }

    let common_header = CommonHeader {
        timestamp: raw_header.timestamp,
        microsecond_timestamp,
        entry_type,
        entry_subtype: raw_header.entry_subtype,
        length,
    };

    match parse_mrt_body(entry_type, raw_header.entry_subtype, body.clone()) {
        Ok(message) => Ok(Some(MrtRecord {
            common_header,
            message,
        })),
        Err(error) => Err(ParserErrorWithBytes {
            error,
            header: Some(common_header),
            bytes: Some(body),
        }),
    }
}

/// Parse an MRT message body with the given entry type and subtype.
///
/// A fresh parse context is implied here: every body decoder derives its
/// AS width, ADD-PATH mode and address family from its own subtype before
/// descending.
pub fn parse_mrt_body(
    entry_type: EntryType,
    entry_subtype: u16,
    data: Bytes,
) -> Result<MrtMessage, ParserError> {
    match entry_type {
        EntryType::TABLE_DUMP => Ok(MrtMessage::TableDumpMessage(parse_table_dump_message(
            entry_subtype,
            data,
        )?)),
        EntryType::TABLE_DUMP_V2 => Ok(MrtMessage::TableDumpV2Message(
            parse_table_dump_v2_message(entry_subtype, data)?,
        )),
        EntryType::BGP4MP | EntryType::BGP4MP_ET => {
            Ok(MrtMessage::Bgp4Mp(parse_bgp4mp(entry_subtype, data)?))
        }
        // deprecated and non-BGP types are recognized by name only
        mrt_type => Err(ParserError::Unsupported(format!(
            "Unsupported MRT type: {mrt_type:?} subtype: {entry_subtype}"
        ))),
    }
}
