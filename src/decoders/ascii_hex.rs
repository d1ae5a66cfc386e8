//! ASCIIHexDecode implementation.
//!
//! Pairs of hex digits to bytes; whitespace is skipped, `>` terminates, and
//! an odd trailing nibble is padded right with 0 (ISO 32000-1:2008, 7.4.2).

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCIIHexDecode filter implementation.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2);
        let mut high: Option<u8> = None;

        for &b in input {
            if b == b'>' {
                break;
            }
            if crate::scan::is_whitespace(b) {
                continue;
            }
            let nibble = match b {
                b'0'..=b'9' => b - b'0',
                b'a'..=b'f' => b - b'a' + 10,
                b'A'..=b'F' => b - b'A' + 10,
                _ => {
                    return Err(Error::InvalidStream(format!(
                        "ASCIIHexDecode: invalid character {:#04x}",
                        b
                    )))
                },
            };
            match high.take() {
                Some(h) => output.push((h << 4) | nibble),
                None => high = Some(nibble),
            }
        }
        if let Some(h) = high {
            output.push(h << 4);
        }
        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

/// Encode bytes as ASCII hex with the `>` terminator (test support and
/// round-trip checks).
pub fn encode_ascii_hex(data: &[u8]) -> Vec<u8> {
    let mut out: Vec<u8> = data
        .iter()
        .flat_map(|b| format!("{:02X}", b).into_bytes())
        .collect();
    out.push(b'>');
    out
}
