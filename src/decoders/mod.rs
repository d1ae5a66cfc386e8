//! Stream decoder implementations for PDF filters.
//!
//! Decoders are chained per the stream's `/Filter` entry, each one consuming
//! the previous filter's output:
//!
//! - FlateDecode (zlib/deflate) — the common case
//! - ASCIIHexDecode, ASCII85Decode — text encodings
//! - LZWDecode — legacy compression
//! - RunLengthDecode — byte-oriented RLE
//! - DCTDecode / JBIG2Decode / JPXDecode / CCITTFaxDecode — pass-through
//!   (image codecs; never consumed for text)
//!
//! `/DecodeParms` entries are matched positionally with the filter chain and
//! currently carry the predictor configuration applied after Flate/LZW.

use crate::error::{Error, Result};
use crate::object::Dict;

mod ascii85;
mod ascii_hex;
mod flate;
mod lzw;
mod passthrough;
mod predictor;
mod runlength;

pub use ascii85::Ascii85Decoder;
pub use ascii_hex::AsciiHexDecoder;
pub use flate::FlateDecoder;
pub use lzw::LzwDecoder;
pub use passthrough::PassthroughDecoder;
pub use predictor::{DecodeParams, decode_predictor};
pub use runlength::RunLengthDecoder;

/// Hard bound on decoded output, shared by every filter in a chain.
pub const MAX_DECODED_SIZE: usize = crate::config::MAX_DECODED_STREAM;

/// Trait for PDF stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Filter name this decoder implements (e.g. "FlateDecode").
    fn name(&self) -> &str;
}

/// Look up a decoder by filter name.
///
/// Both the full names and the inline-image abbreviations (`Fl`, `AHx`,
/// `A85`, `LZW`, `RL`, `DCT`, `CCF`) are accepted.
fn decoder_for(filter_name: &str) -> Result<Box<dyn StreamDecoder>> {
    Ok(match filter_name {
        "FlateDecode" | "Fl" => Box::new(FlateDecoder),
        "ASCIIHexDecode" | "AHx" => Box::new(AsciiHexDecoder),
        "ASCII85Decode" | "A85" => Box::new(Ascii85Decoder),
        "LZWDecode" | "LZW" => Box::new(LzwDecoder),
        "RunLengthDecode" | "RL" => Box::new(RunLengthDecoder),
        "DCTDecode" | "DCT" => Box::new(PassthroughDecoder::new("DCTDecode")),
        "JBIG2Decode" => Box::new(PassthroughDecoder::new("JBIG2Decode")),
        "JPXDecode" => Box::new(PassthroughDecoder::new("JPXDecode")),
        "CCITTFaxDecode" | "CCF" => Box::new(PassthroughDecoder::new("CCITTFaxDecode")),
        _ => return Err(Error::UnsupportedFilter(filter_name.to_string())),
    })
}

/// Decode stream data through a filter chain.
///
/// `params[i]` parameterises `filters[i]`; a predictor configured on a
/// Flate/LZW stage is applied to that stage's output. Output is bounded by
/// [`MAX_DECODED_SIZE`] after every stage.
pub fn decode_chain(
    data: &[u8],
    filters: &[String],
    params: &[Option<DecodeParams>],
) -> Result<Vec<u8>> {
    let mut current = data.to_vec();

    for (i, filter_name) in filters.iter().enumerate() {
        let decoder = decoder_for(filter_name)?;
        current = decoder.decode(&current)?;

        if current.len() > MAX_DECODED_SIZE {
            return Err(Error::OutputTooLarge {
                size: current.len(),
                limit: MAX_DECODED_SIZE,
            });
        }

        if let Some(p) = params.get(i).and_then(|p| p.as_ref()) {
            if p.predictor != 1 {
                current = decode_predictor(&current, p)?;
            }
        }
    }

    Ok(current)
}

/// Decode with no parameters, for callers without a `/DecodeParms` entry.
pub fn decode_stream(data: &[u8], filters: &[String]) -> Result<Vec<u8>> {
    decode_chain(data, filters, &[])
}

/// Decode a stream object's payload given its dictionary.
///
/// Convenience wrapper used by the xref-stream and object-stream paths where
/// the dictionary is already at hand.
pub fn decode_with_dict(data: &[u8], dict: &Dict) -> Result<Vec<u8>> {
    let filters = crate::object::extract_filter_names(dict);
    let params = crate::object::extract_decode_params(dict, filters.len());
    decode_chain(data, &filters, &params)
}
