use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;

/// Characters with a code point below this value are control characters
/// (newline, carriage return, tab, ...) and are stripped from the end of every line.
pub const CONTROL_CHAR_THRESHOLD: u32 = 0x20;

fn is_control(c: char) -> bool {
    (c as u32) < CONTROL_CHAR_THRESHOLD
}

///
/// Strip trailing control characters from a line, stopping at the first
/// character (from the end) at or above [CONTROL_CHAR_THRESHOLD].
///
/// An input made up only of control characters yields an empty string.
///
pub fn trim_control(line: &str) -> &str {
    line.trim_end_matches(is_control)
}

/// Byte-level counterpart of [trim_control] for residue buffers.
pub fn trim_control_bytes(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|&b| (b as u32) >= CONTROL_CHAR_THRESHOLD)
        .map_or(0, |i| i + 1);
    &line[..end]
}

///
/// Decode the raw bytes of an input file into text, transparently
/// decompressing gzip'd content when the file name ends in `.gz`.
///
/// # Arguments
///
/// - path: name of the file the bytes came from
/// - bytes: the file content
///
pub fn decode_input(path: &Path, bytes: Vec<u8>) -> io::Result<String> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));

    let bytes = match is_gzipped {
        true => {
            let mut decoded = Vec::new();
            MultiGzDecoder::new(bytes.as_slice()).read_to_end(&mut decoded)?;
            decoded
        }
        false => bytes,
    };

    String::from_utf8(bytes).map_err(|err| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{} is not valid UTF-8: {}", path.display(), err),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::Compression;
    use flate2::write::GzEncoder;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("MKV\r\n", "MKV")]
    #[case("MKV\n", "MKV")]
    #[case("MKV", "MKV")]
    #[case("M K\t\n", "M K")]
    #[case("\r\n\n", "")]
    #[case("", "")]
    fn test_trim_control(#[case] line: &str, #[case] expected: &str) {
        assert_eq!(trim_control(line), expected);
    }

    #[rstest]
    fn test_trim_keeps_interior_and_trailing_space() {
        // space sits at the threshold and is not a control character
        assert_eq!(trim_control("MK \r"), "MK ");
        assert_eq!(trim_control_bytes(b"MK \r"), b"MK ");
    }

    #[rstest]
    fn test_trim_control_bytes_all_control() {
        assert_eq!(trim_control_bytes(b"\r\n\x00"), b"");
    }

    #[rstest]
    fn test_decode_plain_input() {
        let text = decode_input(Path::new("ref.fasta"), b">ref\nMKV\n".to_vec()).unwrap();
        assert_eq!(text, ">ref\nMKV\n");
    }

    #[rstest]
    fn test_decode_gzipped_input() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"pvalue\n0.5\n").unwrap();
        let bytes = encoder.finish().unwrap();

        let text = decode_input(Path::new("pvalues.csv.gz"), bytes).unwrap();
        assert_eq!(text, "pvalue\n0.5\n");
    }

    #[rstest]
    fn test_decode_rejects_invalid_utf8() {
        let result = decode_input(Path::new("bad.csv"), vec![0xff, 0xfe]);
        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::InvalidData);
    }
}
