pub mod bgp;
pub mod context;
pub mod iters;
pub mod mrt;
pub mod utils;

pub use self::context::ParseContext;
pub use self::utils::{parse_nlri_list, ReadUtils};
pub use iters::{FallibleRecordIterator, RecordIterator};
pub use mrt::{parse_mrt_body, try_parse_mrt_record};

pub use crate::error::{ParserError, ParserErrorWithBytes};

use crate::io::get_reader;
use crate::models::MrtRecord;
use std::io::Read;

/// Pull-style MRT record reader.
///
/// Construct from a file path (compression is sniffed from the magic
/// bytes: `1F 8B` gzip, `42 5A 68` bzip2, anything else raw) or from any
/// pre-opened [`Read`]:
///
/// ```no_run
/// use mrtkit::MrtkitParser;
///
/// let parser = MrtkitParser::new("updates.20211001.0000.gz").unwrap();
/// for record in parser {
///     println!("{:?}", record.common_header);
/// }
/// ```
///
/// Iterating directly skips undecodable records (logging them at `warn`);
/// [`MrtkitParser::into_fallible_record_iter`] yields `Result`s carrying
/// each broken record's header and raw payload instead.
pub struct MrtkitParser<R> {
    reader: R,
}

impl MrtkitParser<Box<dyn Read>> {
    /// Open an MRT file on disk, transparently decompressing gzip and
    /// bzip2 input.
    pub fn new(path: &str) -> Result<MrtkitParser<Box<dyn Read>>, ParserError> {
        Ok(MrtkitParser {
            reader: get_reader(path)?,
        })
    }
}

impl<R: Read> MrtkitParser<R> {
    /// Build a parser over an already-opened byte stream. No compression
    /// sniffing is performed.
    pub fn from_reader(reader: R) -> MrtkitParser<R> {
        MrtkitParser { reader }
    }

    /// Read the next record. `Ok(None)` is a clean end of stream; an
    /// error leaves the underlying stream aligned on the following
    /// record, so calling again continues the file.
    pub fn next_record(&mut self) -> Result<Option<MrtRecord>, ParserErrorWithBytes> {
        try_parse_mrt_record(&mut self.reader)
    }
}
