//! Pass-through decoders for image codecs.
//!
//! DCT (JPEG), JBIG2, JPX (JPEG 2000), and CCITT fax streams never carry
//! text, so their bytes are returned untransformed. Consumers that want the
//! pixels run their own codec over the raw payload.

use crate::decoders::StreamDecoder;
use crate::error::Result;

/// Identity decoder for image-codec filters.
pub struct PassthroughDecoder {
    name: &'static str,
}

impl PassthroughDecoder {
    /// Create a pass-through decoder reporting the given filter name.
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl StreamDecoder for PassthroughDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        Ok(input.to_vec())
    }

    fn name(&self) -> &str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough_identity() {
        let data = b"\xFF\xD8\xFF\xE0 jpeg soi";
        let decoder = PassthroughDecoder::new("DCTDecode");
        assert_eq!(decoder.decode(data).unwrap(), data);
        assert_eq!(decoder.name(), "DCTDecode");
    }
}
