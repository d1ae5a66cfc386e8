//! ToUnicode CMap parsing.
//!
//! ToUnicode streams (ISO 32000-1:2008, 9.10.3) carry the authoritative
//! character-code to Unicode mapping for a font. Two section kinds matter:
//!
//! - `beginbfchar … endbfchar`: individual `<code> <target>` pairs, stored
//!   in a hash map for O(1) lookup;
//! - `beginbfrange … endbfrange`: either a contiguous `<lo> <hi> <start>`
//!   run, kept as a range record and binary-searched, or the array form
//!   `<lo> <hi> [<t0> <t1> …]`, expanded into the hash map.
//!
//! Targets longer than one code point (ligature expansions, surrogate
//! pairs) are decoded to full strings.

use crate::error::Result;
use regex::Regex;
use std::collections::HashMap;

/// One contiguous bfrange: codes `lo..=hi` map to `dst_start + (code - lo)`.
#[derive(Debug, Clone, PartialEq)]
struct BfRange {
    lo: u32,
    hi: u32,
    dst_start: u32,
}

/// A parsed ToUnicode CMap.
#[derive(Debug, Clone, Default)]
pub struct ToUnicodeCMap {
    /// Individual mappings from bfchar sections and array-form bfranges
    chars: HashMap<u32, String>,
    /// Contiguous bfrange records, sorted by `lo` for binary search
    ranges: Vec<BfRange>,
}

impl ToUnicodeCMap {
    /// Look up a character code.
    ///
    /// The hash map wins over ranges, matching the order PDF producers
    /// expect when a bfchar refines a broad bfrange.
    pub fn lookup(&self, code: u32) -> Option<String> {
        if let Some(s) = self.chars.get(&code) {
            return Some(s.clone());
        }
        // Binary search over disjoint sorted ranges
        let idx = self.ranges.partition_point(|r| r.hi < code);
        if let Some(r) = self.ranges.get(idx) {
            if r.lo <= code && code <= r.hi {
                let target = r.dst_start + (code - r.lo);
                return decode_target_value(target);
            }
        }
        None
    }

    /// Number of mappings (ranges count once).
    pub fn len(&self) -> usize {
        self.chars.len() + self.ranges.len()
    }

    /// Whether the CMap holds no mappings at all.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.ranges.is_empty()
    }
}

/// Parse a decoded ToUnicode stream.
pub fn parse_tounicode(data: &[u8]) -> Result<ToUnicodeCMap> {
    let content = String::from_utf8_lossy(data);
    let mut cmap = ToUnicodeCMap::default();

    for section in sections(&content, "beginbfchar", "endbfchar") {
        for line in section.lines() {
            if let Some((code, text)) = parse_bfchar_line(line) {
                log::trace!("bfchar {:#x} -> {:?}", code, text);
                cmap.chars.insert(code, text);
            }
        }
    }

    for section in sections(&content, "beginbfrange", "endbfrange") {
        for line in section.lines() {
            parse_bfrange_line(line, &mut cmap);
        }
    }

    cmap.ranges.sort_by_key(|r| r.lo);
    Ok(cmap)
}

/// Slice out every section between a begin and end marker.
fn sections<'a>(content: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut out = Vec::new();
    let mut rest = content;
    while let Some(b) = rest.find(begin) {
        let after = &rest[b + begin.len()..];
        match after.find(end) {
            Some(e) => {
                out.push(&after[..e]);
                rest = &after[e + end.len()..];
            },
            None => break,
        }
    }
    out
}

/// Hex token inside angle brackets, internal whitespace tolerated.
fn parse_hex_token(token: &str) -> Option<u32> {
    let cleaned: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    u32::from_str_radix(&cleaned, 16).ok()
}

/// Decode a target hex token to a Unicode string.
///
/// Four digits or fewer are a single code point; eight digits are either a
/// UTF-16 surrogate pair or two BMP code points (a two-character ligature
/// expansion); anything longer splits into four-digit UTF-16BE units.
fn decode_target(token: &str) -> Option<String> {
    let cleaned: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    if cleaned.len() <= 4 {
        let cp = u32::from_str_radix(&cleaned, 16).ok()?;
        return decode_target_value(cp);
    }

    // Decode as a sequence of UTF-16BE units with surrogate handling
    let mut units = Vec::new();
    let mut i = 0;
    while i + 4 <= cleaned.len() {
        units.push(u16::from_str_radix(&cleaned[i..i + 4], 16).ok()?);
        i += 4;
    }
    if i < cleaned.len() {
        // Trailing partial unit: pad right, consistent with hex strings
        let mut tail = cleaned[i..].to_string();
        while tail.len() < 4 {
            tail.push('0');
        }
        units.push(u16::from_str_radix(&tail, 16).ok()?);
    }
    let decoded: String = char::decode_utf16(units.into_iter())
        .map(|r| r.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect();
    if decoded.is_empty() { None } else { Some(decoded) }
}

/// Decode a computed range target.
///
/// Values above 0xFFFF that form a valid surrogate pair when split into two
/// 16-bit halves decode as UTF-16; otherwise the value is taken as a code
/// point directly.
fn decode_target_value(value: u32) -> Option<String> {
    if value > 0xFFFF {
        let high = (value >> 16) as u16;
        let low = (value & 0xFFFF) as u16;
        if (0xD800..=0xDBFF).contains(&high) && (0xDC00..=0xDFFF).contains(&low) {
            let cp = 0x10000 + (((high & 0x3FF) as u32) << 10) + (low & 0x3FF) as u32;
            return char::from_u32(cp).map(|c| c.to_string());
        }
    }
    char::from_u32(value).map(|c| c.to_string())
}

/// Parse one bfchar line: `<src> <dst>`.
fn parse_bfchar_line(line: &str) -> Option<(u32, String)> {
    lazy_static::lazy_static! {
        static ref RE: Regex = Regex::new(r"<([^>]*)>\s*<([^>]*)>").unwrap();
    }
    let caps = RE.captures(line)?;
    let code = parse_hex_token(&caps[1])?;
    let text = decode_target(&caps[2])?;
    Some((code, text))
}

/// Parse one bfrange line in either form, updating the CMap.
fn parse_bfrange_line(line: &str, cmap: &mut ToUnicodeCMap) {
    lazy_static::lazy_static! {
        static ref RE_ARRAY: Regex =
            Regex::new(r"<([^>]*)>\s*<([^>]*)>\s*\[((?:\s*<[^>]*>\s*)+)\]").unwrap();
        static ref RE_SEQ: Regex =
            Regex::new(r"<([^>]*)>\s*<([^>]*)>\s*<([^>]*)>").unwrap();
        static ref RE_HEX: Regex = Regex::new(r"<([^>]*)>").unwrap();
    }

    // Array form: one explicit target per code
    if let Some(caps) = RE_ARRAY.captures(line) {
        let (Some(lo), Some(hi)) = (parse_hex_token(&caps[1]), parse_hex_token(&caps[2])) else {
            return;
        };
        let span = (hi.saturating_sub(lo) as usize).saturating_add(1);
        let targets: Vec<String> = RE_HEX
            .captures_iter(&caps[3])
            .filter_map(|c| decode_target(&c[1]))
            .collect();
        if targets.len() != span {
            log::warn!(
                "bfrange array for {:#x}-{:#x} has {} targets, expected {}",
                lo,
                hi,
                targets.len(),
                span
            );
        }
        for (i, text) in targets.into_iter().take(span).enumerate() {
            cmap.chars.insert(lo + i as u32, text);
        }
        return;
    }

    // Contiguous form: kept as a range record
    if let Some(caps) = RE_SEQ.captures(line) {
        let (Some(lo), Some(hi), Some(dst_start)) = (
            parse_hex_token(&caps[1]),
            parse_hex_token(&caps[2]),
            parse_hex_token(&caps[3]),
        ) else {
            return;
        };
        if hi < lo {
            log::warn!("bfrange with hi {:#x} below lo {:#x}", hi, lo);
            return;
        }
        cmap.ranges.push(BfRange { lo, hi, dst_start });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfchar_single() {
        let cmap = parse_tounicode(b"beginbfchar\n<0041> <0041>\nendbfchar").unwrap();
        assert_eq!(cmap.lookup(0x41), Some("A".to_string()));
        assert_eq!(cmap.lookup(0x42), None);
    }

    #[test]
    fn test_bfchar_multiple() {
        let data = b"beginbfchar\n<01> <0058>\n<02> <0059>\nendbfchar";
        let cmap = parse_tounicode(data).unwrap();
        assert_eq!(cmap.lookup(1), Some("X".to_string()));
        assert_eq!(cmap.lookup(2), Some("Y".to_string()));
    }

    #[test]
    fn test_bfchar_ligature_expansion() {
        // one code expands to "fi"
        let cmap = parse_tounicode(b"beginbfchar\n<000C> <00660069>\nendbfchar").unwrap();
        assert_eq!(cmap.lookup(0x0C), Some("fi".to_string()));
    }

    #[test]
    fn test_bfchar_surrogate_pair() {
        // D835DF0C is U+1D70C (mathematical italic rho)
        let cmap = parse_tounicode(b"beginbfchar\n<0010> <D835DF0C>\nendbfchar").unwrap();
        assert_eq!(cmap.lookup(0x10), Some("\u{1D70C}".to_string()));
    }

    #[test]
    fn test_bfrange_contiguous_binary_search() {
        let cmap = parse_tounicode(b"beginbfrange\n<0020> <007E> <0020>\nendbfrange").unwrap();
        assert_eq!(cmap.lookup(0x20), Some(" ".to_string()));
        assert_eq!(cmap.lookup(0x41), Some("A".to_string()));
        assert_eq!(cmap.lookup(0x7E), Some("~".to_string()));
        assert_eq!(cmap.lookup(0x7F), None);
        assert_eq!(cmap.lookup(0x1F), None);
        // stored as a single range, not 95 entries
        assert_eq!(cmap.len(), 1);
    }

    #[test]
    fn test_bfrange_multiple_ranges_sorted() {
        let data = b"beginbfrange\n<0100> <0102> <0041>\n<0010> <0012> <0061>\nendbfrange";
        let cmap = parse_tounicode(data).unwrap();
        assert_eq!(cmap.lookup(0x11), Some("b".to_string()));
        assert_eq!(cmap.lookup(0x102), Some("C".to_string()));
    }

    #[test]
    fn test_bfrange_array_form() {
        let data = b"beginbfrange\n<005F> <0061> [<00660066> <00660069> <00660066006C>]\nendbfrange";
        let cmap = parse_tounicode(data).unwrap();
        assert_eq!(cmap.lookup(0x5F), Some("ff".to_string()));
        assert_eq!(cmap.lookup(0x60), Some("fi".to_string()));
        assert_eq!(cmap.lookup(0x61), Some("ffl".to_string()));
    }

    #[test]
    fn test_bfchar_overrides_bfrange() {
        let data = b"beginbfchar\n<0041> <0058>\nendbfchar\nbeginbfrange\n<0040> <0045> <0040>\nendbfrange";
        let cmap = parse_tounicode(data).unwrap();
        assert_eq!(cmap.lookup(0x41), Some("X".to_string()));
        assert_eq!(cmap.lookup(0x42), Some("B".to_string()));
    }

    #[test]
    fn test_whitespace_inside_brackets() {
        let cmap = parse_tounicode(b"beginbfchar\n< 00 41 > < 00 42 >\nendbfchar").unwrap();
        assert_eq!(cmap.lookup(0x41), Some("B".to_string()));
    }

    #[test]
    fn test_empty_cmap() {
        let cmap = parse_tounicode(b"").unwrap();
        assert!(cmap.is_empty());
        assert_eq!(cmap.lookup(0x41), None);
    }

    #[test]
    fn test_multiple_sections() {
        let data = b"beginbfchar\n<01> <0041>\nendbfchar\nbeginbfchar\n<02> <0042>\nendbfchar";
        let cmap = parse_tounicode(data).unwrap();
        assert_eq!(cmap.lookup(1), Some("A".to_string()));
        assert_eq!(cmap.lookup(2), Some("B".to_string()));
    }

    #[test]
    fn test_hex_case_insensitive() {
        let cmap = parse_tounicode(b"beginbfchar\n<00aB> <00aB>\nendbfchar").unwrap();
        assert_eq!(cmap.lookup(0xAB), Some("\u{AB}".to_string()));
    }

    #[test]
    fn test_range_target_above_bmp() {
        // range mapping into a surrogate-pair target
        let cmap =
            parse_tounicode(b"beginbfrange\n<0001> <0002> <D835DF0C>\nendbfrange").unwrap();
        assert_eq!(cmap.lookup(1), Some("\u{1D70C}".to_string()));
        assert_eq!(cmap.lookup(2), Some("\u{1D70D}".to_string()));
    }
}
