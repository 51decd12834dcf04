//! Turn the `input` argument into the text to speak.
//!
//! The argument is either `-` (read standard input), the path of an existing
//! file, or the literal text. Bytes read from stdin or a file are decoded
//! after sniffing their encoding, so Shift_JIS or UTF-16 files work as well
//! as UTF-8 ones. The result is always trimmed.

use std::borrow::Cow;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use thiserror::Error;
use tracing::debug;

/// Argument value meaning "read the text from standard input".
pub const STDIN_SENTINEL: &str = "-";

#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("failed to read {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: io::Error,
    },
    #[error("{origin} is not valid {encoding} text")]
    Malformed {
        origin: String,
        encoding: &'static str,
    },
}

/// Resolve `input` using the process's standard input for `-`.
pub fn resolve(input: &str) -> Result<String, DecodingError> {
    resolve_with(input, io::stdin().lock())
}

/// Resolve `input`, reading from `stdin` when it is `-`.
pub fn resolve_with<R: Read>(input: &str, mut stdin: R) -> Result<String, DecodingError> {
    let text = if input == STDIN_SENTINEL {
        let origin = "standard input";
        let mut raw = Vec::new();
        stdin
            .read_to_end(&mut raw)
            .map_err(|source| DecodingError::Read {
                origin: origin.into(),
                source,
            })?;
        decode(&raw, origin)?
    } else if Path::new(input).is_file() {
        let raw = fs::read(input).map_err(|source| DecodingError::Read {
            origin: input.into(),
            source,
        })?;
        decode(&raw, input)?
    } else {
        input.to_string()
    };
    Ok(text.trim().to_string())
}

/// Guess the encoding of `bytes`. Returns the encoding and the length of a
/// byte-order mark to skip.
pub fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
    if let Some(found) = Encoding::for_bom(bytes) {
        return found;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    (detector.guess(None, true), 0)
}

/// Decode `bytes` with the detected encoding. Malformed input is an error
/// rather than replacement characters.
pub fn decode(bytes: &[u8], origin: &str) -> Result<String, DecodingError> {
    let (encoding, bom_len) = detect_encoding(bytes);
    debug!(encoding = encoding.name(), origin, "detected text encoding");
    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .map(Cow::into_owned)
        .ok_or_else(|| DecodingError::Malformed {
            origin: origin.to_string(),
            encoding: encoding.name(),
        })
}
