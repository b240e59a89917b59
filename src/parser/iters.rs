/*!
Iterator implementations over MRT records.

Two flavors exist:
- [`RecordIterator`]: logs and skips records that fail to decode,
- [`FallibleRecordIterator`]: yields `Result`s so callers can inspect the
  failed record's header and raw bytes.

Both terminate on clean end of stream and keep going past broken records;
the framing layer has already realigned the stream on the next header.
*/
use crate::error::ParserErrorWithBytes;
use crate::models::MrtRecord;
use crate::parser::MrtkitParser;
use log::warn;
use std::io::Read;

/// Iterator that skips undecodable records, logging them at `warn` level.
pub struct RecordIterator<R> {
    parser: MrtkitParser<R>,
}

impl<R> RecordIterator<R> {
    pub(crate) fn new(parser: MrtkitParser<R>) -> Self {
        RecordIterator { parser }
    }
}

impl<R: Read> Iterator for RecordIterator<R> {
    type Item = MrtRecord;

    fn next(&mut self) -> Option<MrtRecord> {
        loop {
            match self.parser.next_record() {
                Ok(Some(record)) => return Some(record),
                Ok(None) => return None,
                Err(e) => {
                    warn!("skipping record: {e}");
                    continue;
                }
            }
        }
    }
}

/// Iterator that returns parsing errors to the caller instead of skipping
/// them. Each error carries the record's common header (when framing
/// succeeded) and its raw payload bytes for diagnostics.
pub struct FallibleRecordIterator<R> {
    parser: MrtkitParser<R>,
}

impl<R> FallibleRecordIterator<R> {
    pub(crate) fn new(parser: MrtkitParser<R>) -> Self {
        FallibleRecordIterator { parser }
    }
}

impl<R: Read> Iterator for FallibleRecordIterator<R> {
    type Item = Result<MrtRecord, ParserErrorWithBytes>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.parser.next_record() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// The default iterator skips broken records.
impl<R: Read> IntoIterator for MrtkitParser<R> {
    type Item = MrtRecord;
    type IntoIter = RecordIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        RecordIterator::new(self)
    }
}

impl<R: Read> MrtkitParser<R> {
    pub fn into_record_iter(self) -> RecordIterator<R> {
        RecordIterator::new(self)
    }

    /// Creates a fallible iterator over MRT records that surfaces parsing
    /// errors.
    ///
    /// ```no_run
    /// use mrtkit::MrtkitParser;
    ///
    /// let parser = MrtkitParser::new("updates.mrt").unwrap();
    /// for result in parser.into_fallible_record_iter() {
    ///     match result {
    ///         Ok(record) => println!("{:?}", record.common_header),
    ///         Err(e) => eprintln!("broken record: {e}"),
    ///     }
    /// }
    /// ```
    pub fn into_fallible_record_iter(self) -> FallibleRecordIterator<R> {
        FallibleRecordIterator::new(self)
    }
}
