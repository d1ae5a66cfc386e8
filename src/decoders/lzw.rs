//! LZWDecode implementation.
//!
//! PDF's LZW variant (ISO 32000-1:2008, 7.4.4):
//! - MSB-first bit order, 9- to 12-bit codes
//! - Clear code 256 resets the table, EOD code 257 terminates
//! - EarlyChange=1: the code width grows one code earlier than classic LZW
//!
//! The weezl crate (TIFF-style early change matches PDF's default) is tried
//! first; a spec-exact fallback covers streams weezl rejects.

use crate::decoders::StreamDecoder;
use crate::error::{Error, Result};

const CLEAR_CODE: u16 = 256;
const EOD_CODE: u16 = 257;
const FIRST_CODE: u16 = 258;
const MAX_CODE_BITS: u8 = 12;

/// LZWDecode filter implementation.
pub struct LzwDecoder;

impl StreamDecoder for LzwDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        match decode_weezl(input) {
            Ok(data) => Ok(data),
            Err(_) => decode_pdf_lzw(input),
        }
    }

    fn name(&self) -> &str {
        "LZWDecode"
    }
}

fn decode_weezl(input: &[u8]) -> Result<Vec<u8>> {
    use weezl::{BitOrder, decode::Decoder as WeezlDecoder};

    let mut decoder = WeezlDecoder::with_tiff_size_switch(BitOrder::Msb, 8);
    decoder.decode(input).map_err(|e| {
        log::warn!("weezl LZW decode failed: {:?}, using fallback", e);
        Error::InvalidStream(format!("LZWDecode: {:?}", e))
    })
}

/// Spec-exact fallback decoder, including EarlyChange handling.
fn decode_pdf_lzw(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    let mut table = init_table();
    let mut code_bits: u8 = 9;
    let mut next_code = FIRST_CODE;
    let mut reader = BitReader::new(input);
    let mut prev_code: Option<u16> = None;

    loop {
        // EarlyChange=1: widen when the next assignable code reaches
        // 2^bits - 1, one code before the table actually fills
        if code_bits < MAX_CODE_BITS && next_code == (1 << code_bits) - 1 {
            code_bits += 1;
        }

        let code = match reader.read_bits(code_bits) {
            Some(c) => c as u16,
            None => break,
        };

        if code == EOD_CODE {
            break;
        }
        if code == CLEAR_CODE {
            table = init_table();
            code_bits = 9;
            next_code = FIRST_CODE;
            prev_code = None;
            continue;
        }

        let entry = if (code as usize) < table.len() && code < next_code {
            table[code as usize].clone()
        } else if code == next_code {
            // KwKwK case: previous string plus its own first byte
            let prev = prev_code.ok_or_else(|| {
                Error::InvalidStream(format!("LZWDecode: orphan code {}", code))
            })?;
            let mut s = table[prev as usize].clone();
            s.push(table[prev as usize][0]);
            s
        } else {
            return Err(Error::InvalidStream(format!(
                "LZWDecode: invalid code {} (next {}, width {})",
                code, next_code, code_bits
            )));
        };

        output.extend_from_slice(&entry);

        if let Some(prev) = prev_code {
            if next_code < 4096 {
                let mut s = table[prev as usize].clone();
                s.push(entry[0]);
                if (next_code as usize) < table.len() {
                    table[next_code as usize] = s;
                } else {
                    table.push(s);
                }
                next_code += 1;
            }
        }
        prev_code = Some(code);
    }

    Ok(output)
}

fn init_table() -> Vec<Vec<u8>> {
    let mut table: Vec<Vec<u8>> = (0..=255u8).map(|b| vec![b]).collect();
    table.push(Vec::new()); // 256 clear
    table.push(Vec::new()); // 257 EOD
    table
}

/// MSB-first bit reader.
struct BitReader<'a> {
    data: &'a [u8],
    byte_pos: usize,
    bit_pos: u8,
}

impl<'a> BitReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            byte_pos: 0,
            bit_pos: 0,
        }
    }

    fn read_bits(&mut self, n: u8) -> Option<u32> {
        let mut result = 0u32;
        let mut remaining = n;
        while remaining > 0 {
            if self.byte_pos >= self.data.len() {
                return None;
            }
            let avail = 8 - self.bit_pos;
            let take = remaining.min(avail);
            let byte = self.data[self.byte_pos];
            let shift = avail - take;
            let mask = if take == 8 { 0xFF } else { ((1u16 << take) - 1) as u8 };
            let bits = (byte >> shift) & mask;
            result = (result << take) | bits as u32;
            self.bit_pos += take;
            if self.bit_pos == 8 {
                self.byte_pos += 1;
                self.bit_pos = 0;
            }
            remaining -= take;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimal MSB-first LZW encoder for round-trips.
    ///
    /// The emitted code widths follow the decoder's schedule exactly: the
    /// emitter simulates the decoder's table growth and widens precisely
    /// where the decoder will.
    struct Emitter {
        out: Vec<u8>,
        bitbuf: u32,
        bitcount: u8,
        width: u8,
        dec_next: u16,
        dec_has_prev: bool,
    }

    impl Emitter {
        fn new() -> Self {
            Self {
                out: Vec::new(),
                bitbuf: 0,
                bitcount: 0,
                width: 9,
                dec_next: FIRST_CODE,
                dec_has_prev: false,
            }
        }

        fn emit(&mut self, code: u16) {
            if self.width < MAX_CODE_BITS && self.dec_next == (1 << self.width) - 1 {
                self.width += 1;
            }
            self.bitbuf = (self.bitbuf << self.width) | code as u32;
            self.bitcount += self.width;
            while self.bitcount >= 8 {
                self.bitcount -= 8;
                self.out.push((self.bitbuf >> self.bitcount) as u8);
            }
            match code {
                CLEAR_CODE => {
                    self.dec_next = FIRST_CODE;
                    self.dec_has_prev = false;
                },
                EOD_CODE => {},
                _ => {
                    if self.dec_has_prev && self.dec_next < 4096 {
                        self.dec_next += 1;
                    }
                    self.dec_has_prev = true;
                },
            }
        }

        fn finish(mut self) -> Vec<u8> {
            if self.bitcount > 0 {
                self.out.push((self.bitbuf << (8 - self.bitcount)) as u8);
            }
            self.out
        }
    }

    fn encode_pdf_lzw(data: &[u8]) -> Vec<u8> {
        let mut emitter = Emitter::new();
        let mut dict: std::collections::HashMap<Vec<u8>, u16> =
            (0..=255u8).map(|b| (vec![b], b as u16)).collect();
        let mut next_code = FIRST_CODE;

        emitter.emit(CLEAR_CODE);

        let mut current: Vec<u8> = Vec::new();
        for &b in data {
            let mut candidate = current.clone();
            candidate.push(b);
            if dict.contains_key(&candidate) {
                current = candidate;
            } else {
                emitter.emit(dict[&current]);
                if next_code < 4096 {
                    dict.insert(candidate, next_code);
                    next_code += 1;
                }
                current = vec![b];
            }
        }
        if !current.is_empty() {
            emitter.emit(dict[&current]);
        }
        emitter.emit(EOD_CODE);
        emitter.finish()
    }

    #[test]
    fn test_lzw_round_trip_simple() {
        let original = b"ABCABCABCABC";
        let compressed = encode_pdf_lzw(original);
        assert_eq!(LzwDecoder.decode(&compressed).unwrap(), original);
    }

    #[test]
    fn test_lzw_round_trip_repetitive() {
        let original = b"The quick brown fox jumps over the lazy dog. ".repeat(20);
        let compressed = encode_pdf_lzw(&original);
        assert_eq!(LzwDecoder.decode(&compressed).unwrap(), original);
    }

    #[test]
    fn test_lzw_fallback_round_trip() {
        let original = b"aaaaaaaaaabbbbbbbbbbaaaa";
        let compressed = encode_pdf_lzw(original);
        assert_eq!(decode_pdf_lzw(&compressed).unwrap(), original);
    }

    #[test]
    fn test_lzw_empty() {
        let compressed = encode_pdf_lzw(b"");
        assert_eq!(LzwDecoder.decode(&compressed).unwrap(), b"");
    }

    #[test]
    fn test_bit_reader_msb_order() {
        // 0b1_0110_1010 packed MSB-first across two bytes
        let data = [0b10110101, 0b01000000];
        let mut r = BitReader::new(&data);
        assert_eq!(r.read_bits(9), Some(0b101101010));
        assert_eq!(r.read_bits(7), Some(0b1000000));
        assert_eq!(r.read_bits(1), None);
    }
}
