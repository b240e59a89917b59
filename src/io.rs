//! Input acquisition: open a local MRT file and undo its compression.
use crate::ParserError;
use bzip2::read::BzDecoder;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];
const BZ2_MAGIC: [u8; 3] = [0x42, 0x5a, 0x68];

/// Open `path` and wrap it in the right decompressor based on the leading
/// magic bytes: `1F 8B` means gzip, `42 5A 68` bzip2, anything else is
/// read as-is. The file extension plays no part.
pub(crate) fn get_reader(path: &str) -> Result<Box<dyn Read>, ParserError> {
    let mut file = File::open(path)?;
    let mut magic = [0u8; 3];
    let n = file.read(&mut magic)?;
    file.seek(SeekFrom::Start(0))?;

    let reader: Box<dyn Read> = if n >= GZIP_MAGIC.len() && magic[..2] == GZIP_MAGIC {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else if n >= BZ2_MAGIC.len() && magic == BZ2_MAGIC {
        Box::new(BufReader::new(BzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("mrtkit-io-test-{}-{name}", std::process::id()));
        path
    }

    #[test]
    fn test_magic_sniffing_gzip() {
        let path = temp_path("sniff.gz");
        let payload = b"not really mrt but good enough";
        {
            let file = File::create(&path).unwrap();
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(payload).unwrap();
            encoder.finish().unwrap();
        }

        let mut reader = get_reader(path.to_str().unwrap()).unwrap();
        let mut decoded = vec![];
        reader.read_to_end(&mut decoded).unwrap();
        assert_eq!(decoded, payload);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_plain_file_passthrough() {
        let path = temp_path("plain");
        let payload = [0u8, 1, 2, 3];
        std::fs::write(&path, payload).unwrap();

        let mut reader = get_reader(path.to_str().unwrap()).unwrap();
        let mut read_back = vec![];
        reader.read_to_end(&mut read_back).unwrap();
        assert_eq!(read_back, payload);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        assert!(get_reader("/nonexistent/file.mrt").is_err());
    }
}
