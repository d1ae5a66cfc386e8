//! FlateDecode (zlib/deflate) implementation.
//!
//! The workhorse filter: nearly every content stream in the wild is Flate
//! compressed. Truncated streams are tolerated by returning whatever bytes
//! were produced before the error, with a warning; streams with a damaged
//! zlib header are retried as raw deflate.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

/// FlateDecode filter implementation.
pub struct FlateDecoder;

impl StreamDecoder for FlateDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        let mut decoder = ZlibDecoder::new(input);

        let zlib_err = match decoder.read_to_end(&mut output) {
            Ok(_) => return Ok(output),
            Err(e) => {
                // Truncation tolerance: keep any prefix that inflated cleanly
                if !output.is_empty() {
                    log::warn!(
                        "FlateDecode partial recovery: {} bytes before error: {}",
                        output.len(),
                        e
                    );
                    return Ok(output);
                }
                e
            },
        };

        // Some producers emit raw deflate without the zlib wrapper
        output.clear();
        let mut deflate = DeflateDecoder::new(input);
        match deflate.read_to_end(&mut output) {
            Ok(_) => {
                log::info!("raw deflate recovery succeeded: {} bytes", output.len());
                return Ok(output);
            },
            Err(_) if !output.is_empty() => {
                log::warn!("raw deflate partial recovery: {} bytes", output.len());
                return Ok(output);
            },
            Err(_) => {},
        }

        // Last try: skip a corrupt 2-byte zlib header and read raw deflate
        if input.len() > 2 {
            output.clear();
            let mut deflate = DeflateDecoder::new(&input[2..]);
            if deflate.read_to_end(&mut output).is_ok() && !output.is_empty() {
                log::info!("deflate after header skip: {} bytes", output.len());
                return Ok(output);
            }
        }

        Err(Error::InvalidStream(format!(
            "FlateDecode failed: {} ({} compressed bytes)",
            zlib_err,
            input.len()
        )))
    }

    fn name(&self) -> &str {
        "FlateDecode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::ZlibEncoder;
    use std::io::Write;

    fn compress(data: &[u8]) -> Vec<u8> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn test_flate_round_trip() {
        let original = b"Hello, FlateDecode!";
        let decoded = FlateDecoder.decode(&compress(original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_flate_empty() {
        let decoded = FlateDecoder.decode(&compress(b"")).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_flate_large_repetitive() {
        let original = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ".repeat(1000);
        let decoded = FlateDecoder.decode(&compress(&original)).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_flate_deterministic() {
        let original = b"determinism check".repeat(10);
        let compressed = compress(&original);
        let a = FlateDecoder.decode(&compressed).unwrap();
        let b = FlateDecoder.decode(&compressed).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_flate_truncated_keeps_prefix() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(50);
        let compressed = compress(&original);
        // Chop the tail off; the inflated prefix should still come back
        let truncated = &compressed[..compressed.len() - 8];
        let decoded = FlateDecoder.decode(truncated).unwrap();
        assert!(!decoded.is_empty());
        assert!(original.starts_with(&decoded));
    }

    #[test]
    fn test_flate_raw_deflate_accepted() {
        use flate2::write::DeflateEncoder;
        let original = b"raw deflate stream without zlib wrapper";
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(original).unwrap();
        let compressed = encoder.finish().unwrap();
        let decoded = FlateDecoder.decode(&compressed).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_flate_garbage_rejected() {
        let result = FlateDecoder.decode(b"This is not zlib data at all....");
        assert!(result.is_err());
    }
}
