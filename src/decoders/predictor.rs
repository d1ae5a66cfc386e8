//! Predictor transforms applied after Flate/LZW decompression.
//!
//! Predictors (ISO 32000-1:2008, 7.4.4.4) encode row-differential data to
//! improve compression of image-like streams — including cross-reference
//! streams, which is why text extraction needs them. Supported:
//!
//! - Predictor 2: TIFF horizontal differencing
//! - Predictors 10-15: PNG row filters (None/Sub/Up/Average/Paeth), with a
//!   per-row filter tag byte

use crate::error::{Error, Result};
use crate::object::Dict;

/// Decode parameters from a `/DecodeParms` dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeParams {
    /// Predictor algorithm (1 = none, 2 = TIFF, 10-15 = PNG)
    pub predictor: i64,
    /// Samples per row
    pub columns: usize,
    /// Colour components per sample
    pub colors: usize,
    /// Bits per component
    pub bits_per_component: usize,
}

impl Default for DecodeParams {
    fn default() -> Self {
        Self {
            predictor: 1,
            columns: 1,
            colors: 1,
            bits_per_component: 8,
        }
    }
}

impl DecodeParams {
    /// Read parameters from a parms dictionary, defaulting missing entries.
    pub fn from_dict(dict: &Dict) -> Self {
        let int = |key: &str, default: i64| {
            dict.get(key).and_then(|o| o.as_integer()).unwrap_or(default)
        };
        Self {
            predictor: int("Predictor", 1),
            columns: int("Columns", 1).max(1) as usize,
            colors: int("Colors", 1).max(1) as usize,
            bits_per_component: int("BitsPerComponent", 8).max(1) as usize,
        }
    }

    /// Bytes of sample data per row, excluding any PNG filter tag.
    pub fn pixel_bytes_per_row(&self) -> usize {
        (self.columns * self.colors * self.bits_per_component).div_ceil(8)
    }

    /// Bytes per encoded row, including the PNG filter tag when applicable.
    pub fn bytes_per_row(&self) -> usize {
        let pixel = self.pixel_bytes_per_row();
        if self.predictor >= 10 { pixel + 1 } else { pixel }
    }

    /// Bytes per pixel, floored at 1 (the left-neighbour distance).
    fn bytes_per_pixel(&self) -> usize {
        ((self.colors * self.bits_per_component) / 8).max(1)
    }
}

/// Reverse the predictor transform.
pub fn decode_predictor(data: &[u8], params: &DecodeParams) -> Result<Vec<u8>> {
    match params.predictor {
        1 => Ok(data.to_vec()),
        2 => decode_tiff(data, params),
        10..=15 => decode_png(data, params),
        other => Err(Error::InvalidStream(format!("unsupported predictor: {}", other))),
    }
}

/// TIFF predictor 2: each sample is the delta from its left neighbour.
///
/// Exact only for 8-bit components; other widths are passed through
/// unchanged on a best-effort basis.
fn decode_tiff(data: &[u8], params: &DecodeParams) -> Result<Vec<u8>> {
    if params.bits_per_component != 8 {
        log::warn!(
            "TIFF predictor with {}-bit components: passing through",
            params.bits_per_component
        );
        return Ok(data.to_vec());
    }

    let row_len = params.pixel_bytes_per_row();
    if row_len == 0 || data.len() % row_len != 0 {
        return Err(Error::InvalidStream(format!(
            "predictor row size {} does not divide data length {}",
            row_len,
            data.len()
        )));
    }

    let colors = params.colors;
    let mut output = Vec::with_capacity(data.len());
    for row in data.chunks(row_len) {
        let row_start = output.len();
        for (i, &b) in row.iter().enumerate() {
            if i < colors {
                output.push(b);
            } else {
                let left = output[row_start + i - colors];
                output.push(b.wrapping_add(left));
            }
        }
    }
    Ok(output)
}

/// PNG predictors 10-15: a filter tag byte leads every row.
///
/// Predictor 15 lets the tag vary per row; 10-14 fix the expected filter,
/// but the tag byte is authoritative either way.
fn decode_png(data: &[u8], params: &DecodeParams) -> Result<Vec<u8>> {
    let row_len = params.bytes_per_row();
    let pixel_len = params.pixel_bytes_per_row();
    if row_len == 0 || data.len() % row_len != 0 {
        return Err(Error::InvalidStream(format!(
            "predictor row size {} does not divide data length {}",
            row_len,
            data.len()
        )));
    }

    let bpp = params.bytes_per_pixel();
    let rows = data.len() / row_len;
    let mut output: Vec<u8> = Vec::with_capacity(rows * pixel_len);

    for row_idx in 0..rows {
        let row = &data[row_idx * row_len..(row_idx + 1) * row_len];
        let tag = row[0];
        let encoded = &row[1..];
        let row_start = output.len();

        let prev_row = |out: &Vec<u8>, i: usize| -> u8 {
            if row_idx > 0 { out[(row_idx - 1) * pixel_len + i] } else { 0 }
        };

        match tag {
            0 => output.extend_from_slice(encoded),
            1 => {
                // Sub
                for (i, &b) in encoded.iter().enumerate() {
                    let left = if i >= bpp { output[row_start + i - bpp] } else { 0 };
                    output.push(b.wrapping_add(left));
                }
            },
            2 => {
                // Up
                for (i, &b) in encoded.iter().enumerate() {
                    let up = prev_row(&output, i);
                    output.push(b.wrapping_add(up));
                }
            },
            3 => {
                // Average
                for (i, &b) in encoded.iter().enumerate() {
                    let left = if i >= bpp { output[row_start + i - bpp] as u16 } else { 0 };
                    let up = prev_row(&output, i) as u16;
                    output.push(b.wrapping_add(((left + up) / 2) as u8));
                }
            },
            4 => {
                // Paeth
                for (i, &b) in encoded.iter().enumerate() {
                    let left = if i >= bpp { output[row_start + i - bpp] as i16 } else { 0 };
                    let up = prev_row(&output, i) as i16;
                    let up_left = if row_idx > 0 && i >= bpp {
                        output[(row_idx - 1) * pixel_len + i - bpp] as i16
                    } else {
                        0
                    };
                    output.push(b.wrapping_add(paeth(left, up, up_left) as u8));
                }
            },
            other => {
                return Err(Error::InvalidStream(format!("invalid PNG filter tag: {}", other)));
            },
        }
    }

    Ok(output)
}

/// Paeth filter function from the PNG specification.
fn paeth(a: i16, b: i16, c: i16) -> i16 {
    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
