/*!
`mrtkit` decodes MRT (Multi-threaded Routing Toolkit) routing archives:
TABLE_DUMP and TABLE_DUMP_V2 snapshots and BGP4MP message logs as written
by route collectors (RFC 6396, with the ADD-PATH extensions of RFC 8050
and the attribute extensions of RFC 7311 and friends).

# Examples

Iterate over the records of a local file (gzip or bzip2 compression is
detected from the file's magic bytes):

```no_run
use mrtkit::MrtkitParser;

let parser = MrtkitParser::new("rib.20230601.0000.bz2").unwrap();
for record in parser {
    println!("{:?}", record.common_header);
}
```

Records that fail to decode do not desynchronize the stream: the MRT
common header's length field delimits every record, so the reader skips
to the next one. Use the fallible iterator to look at broken records —
each error carries the decoded header and the raw payload bytes:

```no_run
use mrtkit::MrtkitParser;

let parser = MrtkitParser::new("updates.20230601.0000.gz").unwrap();
for result in parser.into_fallible_record_iter() {
    match result {
        Ok(record) => { /* process */ }
        Err(e) => eprintln!("bad record: {e} ({} raw bytes)",
            e.bytes.as_ref().map_or(0, |b| b.len())),
    }
}
```

# Data representation

Each [`MrtRecord`] pairs a [`models::CommonHeader`] with a fully decoded
message tree: RIB entries, peer tables, BGP messages, path attributes and
NLRI down to path identifiers and L3VPN label stacks. Enumerated wire
codes are kept as typed enums with `Unknown` catch-alls, so unassigned
codes still round-trip; attribute types without a decoder keep their raw
bytes.

A PEER_INDEX_TABLE record carries the peer array that later RIB records
reference by index; resolving those references across records is left to
the caller (see [`models::PeerIndexTable::get_peer_by_id`]).
*/
pub mod error;
pub mod io;
pub mod models;
pub mod parser;

pub use error::{ErrorKind, ParserError, ParserErrorWithBytes};
pub use models::MrtRecord;
pub use parser::*;
