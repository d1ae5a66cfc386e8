//! ASCII85Decode implementation.
//!
//! Base-85 groups of five characters expand to four bytes. `z` is shorthand
//! for four zero bytes, `~>` ends the stream, and a partial final group of
//! n characters is padded with `u` then truncated to n-1 output bytes
//! (ISO 32000-1:2008, 7.4.3).

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

/// ASCII85Decode filter implementation.
pub struct Ascii85Decoder;

impl StreamDecoder for Ascii85Decoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 4 / 5);
        let mut group = [0u8; 5];
        let mut count = 0usize;
        let mut i = 0;

        // A leading <~ is emitted by some encoders; not part of the PDF form
        let data = input.strip_prefix(b"<~").unwrap_or(input);

        while i < data.len() {
            let b = data[i];
            if b == b'~' {
                break; // ~> terminator
            }
            if crate::scan::is_whitespace(b) {
                i += 1;
                continue;
            }
            if b == b'z' {
                if count != 0 {
                    return Err(Error::InvalidStream(
                        "ASCII85Decode: 'z' inside a group".to_string(),
                    ));
                }
                output.extend_from_slice(&[0, 0, 0, 0]);
                i += 1;
                continue;
            }
            if !(b'!'..=b'u').contains(&b) {
                return Err(Error::InvalidStream(format!(
                    "ASCII85Decode: invalid character {:#04x}",
                    b
                )));
            }
            group[count] = b;
            count += 1;
            if count == 5 {
                decode_group(&group, 5, &mut output)?;
                count = 0;
            }
            i += 1;
        }

        // Partial final group: pad with 'u' (84), keep count-1 bytes
        if count > 0 {
            if count == 1 {
                return Err(Error::InvalidStream(
                    "ASCII85Decode: single trailing character".to_string(),
                ));
            }
            for slot in group.iter_mut().skip(count) {
                *slot = b'u';
            }
            decode_group(&group, count, &mut output)?;
        }

        Ok(output)
    }

    fn name(&self) -> &str {
        "ASCII85Decode"
    }
}

/// Expand one 5-character group. `count` is the number of real (unpadded)
/// characters; the output keeps `count - 1` bytes.
fn decode_group(group: &[u8; 5], count: usize, output: &mut Vec<u8>) -> crate::error::Result<()> {
    let mut value: u32 = 0;
    for &c in group {
        let digit = (c - b'!') as u32;
        value = value
            .checked_mul(85)
            .and_then(|v| v.checked_add(digit))
            .ok_or_else(|| {
                Error::InvalidStream("ASCII85Decode: group value overflow".to_string())
            })?;
    }
    let bytes = value.to_be_bytes();
    output.extend_from_slice(&bytes[..count - 1]);
    Ok(())
}

/// Encode bytes as ASCII85 with the `~>` terminator (test support).
pub fn encode_ascii85(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    for chunk in data.chunks(4) {
        let mut padded = [0u8; 4];
        padded[..chunk.len()].copy_from_slice(chunk);
        let mut value = u32::from_be_bytes(padded);
        if value == 0 && chunk.len() == 4 {
            out.push(b'z');
            continue;
        }
        let mut digits = [0u8; 5];
        for d in digits.iter_mut().rev() {
            *d = (value % 85) as u8 + b'!';
            value /= 85;
        }
        out.extend_from_slice(&digits[..chunk.len() + 1]);
    }
    out.extend_from_slice(b"~>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii85_decode_simple() {
        // "Man " encodes to 9jqo^
        assert_eq!(Ascii85Decoder.decode(b"9jqo^~>").unwrap(), b"Man ");
    }

    #[test]
    fn test_ascii85_z_shorthand() {
        assert_eq!(Ascii85Decoder.decode(b"z~>").unwrap(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_ascii85_partial_group() {
        // "Hi" (2 bytes) encodes as a 3-character partial group
        let encoded = encode_ascii85(b"Hi");
        assert_eq!(Ascii85Decoder.decode(&encoded).unwrap(), b"Hi");
    }

    #[test]
    fn test_ascii85_whitespace_ignored(){
        let encoded = b"9jq\no^~>";
        assert_eq!(Ascii85Decoder.decode(encoded).unwrap(), b"Man ");
    }

    #[test]
    fn test_ascii85_round_trip_multiple_of_four() {
        let data: Vec<u8> = (0u8..=251).collect(); // 252 bytes, divisible by 4
        let encoded = encode_ascii85(&data);
        assert_eq!(Ascii85Decoder.decode(&encoded).unwrap(), data);
    }

    #[test]
    fn test_ascii85_round_trip_arbitrary_length() {
        for len in 0..10 {
            let data: Vec<u8> = (0..len).map(|i| (i * 37 + 11) as u8).collect();
            let encoded = encode_ascii85(&data);
            assert_eq!(Ascii85Decoder.decode(&encoded).unwrap(), data, "len {}", len);
        }
    }

    #[test]
    fn test_ascii85_invalid_character() {
        assert!(Ascii85Decoder.decode(b"9jqo\x7f~>").is_err());
    }

    #[test]
    fn test_ascii85_z_inside_group_rejected() {
        assert!(Ascii85Decoder.decode(b"9z~>").is_err());
    }

    #[test]
    fn test_ascii85_missing_terminator() {
        // EOD without ~> still decodes the complete groups
        assert_eq!(Ascii85Decoder.decode(b"9jqo^").unwrap(), b"Man ");
    }
}
