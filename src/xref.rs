//! Cross-reference index.
//!
//! The xref maps object numbers to byte offsets (or object-stream slots),
//! enabling random access into the PDF image. Both the classic `xref` table
//! (PDF 1.0-1.4) and cross-reference streams (PDF 1.5+) are supported;
//! incremental-update `/Prev` chains are followed and merged with
//! later definitions winning.

use crate::error::{Error, Result};
use crate::object::{Dict, Object};
use crate::parser::{parse_indirect_object, parse_object};
use crate::scan;
use std::collections::HashMap;

/// One cross-reference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XRefEntry {
    /// Object is free; resolves to Null
    Free,
    /// Object stored uncompressed at a byte offset
    InUse {
        /// Byte offset of `num gen obj`
        offset: u64,
        /// Generation recorded for the slot
        gen: u16,
    },
    /// Object lives inside an object stream
    Compressed {
        /// Object number of the containing /ObjStm
        objstm_num: u32,
        /// Index of the object within the stream
        index: u32,
    },
}

/// Cross-reference table with its trailer dictionary.
#[derive(Debug, Clone, Default)]
pub struct XRefTable {
    entries: HashMap<u32, XRefEntry>,
    trailer: Dict,
}

impl XRefTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry for an object number, if the table has one.
    pub fn get(&self, object_number: u32) -> Option<&XRefEntry> {
        self.entries.get(&object_number)
    }

    /// The merged trailer dictionary.
    pub fn trailer(&self) -> &Dict {
        &self.trailer
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert an entry unless a newer definition already claimed the slot.
    ///
    /// Sections are visited newest-first along the /Prev chain, so keeping
    /// the first insertion makes later (older) definitions lose.
    fn add_entry(&mut self, object_number: u32, entry: XRefEntry) {
        self.entries.entry(object_number).or_insert(entry);
    }

    /// Merge a trailer, keeping values already present.
    fn merge_trailer(&mut self, trailer: Dict) {
        for (key, value) in trailer {
            self.trailer.entry(key).or_insert(value);
        }
    }
}

/// Locate and parse the cross-reference information of a PDF image.
///
/// Finds `startxref` within the trailing 1024 bytes, parses the section it
/// points at, and follows the `/Prev` chain. When the recorded offset turns
/// out to be garbage, one reconstruction pass scans for the last `xref`
/// keyword in the image before giving up.
pub fn parse_xref(data: &[u8]) -> Result<XRefTable> {
    let offset = read_startxref_offset(data)?;

    match parse_chain(data, offset) {
        Ok(table) => Ok(table),
        Err(first_err) => {
            log::warn!(
                "xref at recorded offset {} unusable ({}); scanning for the last xref section",
                offset,
                first_err
            );
            let mut last = None;
            let mut pos = 0;
            while let Some(found) = scan::find_keyword(data, pos, b"xref") {
                // skip "startxref" matches
                if found < 5 || &data[found - 5..found] != b"start" {
                    last = Some(found);
                }
                pos = found + 4;
            }
            match last {
                Some(found) => parse_chain(data, found as u64),
                None => Err(first_err),
            }
        },
    }
}

/// Read the byte offset following the `startxref` keyword.
fn read_startxref_offset(data: &[u8]) -> Result<u64> {
    let keyword = scan::find_startxref(data)
        .ok_or_else(|| Error::InvalidXref("startxref not found in trailing 1024 bytes".to_string()))?;
    let pos = scan::skip_whitespace(data, keyword + b"startxref".len());
    let (value, _) = scan::parse_int(data, pos)
        .ok_or_else(|| Error::InvalidXref("no offset after startxref".to_string()))?;
    if value < 0 || value as usize >= data.len() {
        return Err(Error::InvalidXref(format!("startxref offset {} out of range", value)));
    }
    Ok(value as u64)
}

/// Parse the xref section at `offset` and every section its /Prev points at.
fn parse_chain(data: &[u8], offset: u64) -> Result<XRefTable> {
    let mut table = XRefTable::new();
    let mut next = Some(offset);
    let mut depth = 0u32;
    let mut seen = std::collections::HashSet::new();

    while let Some(offset) = next {
        if depth >= crate::config::MAX_XREF_CHAIN {
            return Err(Error::InvalidXref("xref /Prev chain too deep".to_string()));
        }
        if !seen.insert(offset) {
            log::warn!("xref /Prev chain revisits offset {}; stopping", offset);
            break;
        }
        depth += 1;

        let trailer = parse_section(data, offset, &mut table)?;
        next = trailer
            .get("Prev")
            .and_then(|o| o.as_integer())
            .filter(|&p| p >= 0 && (p as usize) < data.len())
            .map(|p| p as u64);
        table.merge_trailer(trailer);
    }

    if table.is_empty() {
        return Err(Error::InvalidXref("no usable xref entries".to_string()));
    }
    Ok(table)
}

/// Parse a single xref section, returning its trailer dictionary.
fn parse_section(data: &[u8], offset: u64, table: &mut XRefTable) -> Result<Dict> {
    let pos = scan::skip_whitespace(data, offset as usize);
    if data[pos..].starts_with(b"xref") {
        log::debug!("classic xref table at offset {}", offset);
        parse_classic_section(data, pos, table)
    } else {
        log::debug!("cross-reference stream at offset {}", offset);
        parse_stream_section(data, pos, table)
    }
}

/// Parse a classic `xref` table followed by its `trailer` dictionary.
///
/// ```text
/// xref
/// 0 6
/// 0000000000 65535 f
/// 0000000018 00000 n
/// ...
/// trailer
/// << /Size 6 /Root 1 0 R >>
/// ```
fn parse_classic_section(data: &[u8], pos: usize, table: &mut XRefTable) -> Result<Dict> {
    let mut pos = scan::skip_whitespace(data, pos + b"xref".len());

    loop {
        if data[pos..].starts_with(b"trailer") {
            pos += b"trailer".len();
            break;
        }

        // Subsection header: first-object count
        let (start_obj, used) = scan::parse_int(data, pos).ok_or_else(|| Error::InvalidXref(
            format!("expected subsection header at offset {}", pos),
        ))?;
        pos = scan::skip_whitespace(data, pos + used);
        let (count, used) = scan::parse_int(data, pos)
            .ok_or_else(|| Error::InvalidXref("subsection header missing count".to_string()))?;
        pos = scan::skip_whitespace(data, pos + used);

        if start_obj < 0 || count < 0 || count > 1_000_000 {
            return Err(Error::InvalidXref(format!(
                "implausible subsection header {} {}",
                start_obj, count
            )));
        }

        for i in 0..count as u32 {
            let (field1, used) = scan::parse_int(data, pos)
                .ok_or_else(|| Error::InvalidXref("truncated xref entry".to_string()))?;
            pos = scan::skip_whitespace(data, pos + used);
            let (field2, used) = scan::parse_int(data, pos)
                .ok_or_else(|| Error::InvalidXref("truncated xref entry".to_string()))?;
            pos = scan::skip_whitespace(data, pos + used);
            let kind = *data
                .get(pos)
                .ok_or_else(|| Error::InvalidXref("truncated xref entry".to_string()))?;
            pos = scan::skip_whitespace(data, pos + 1);

            let num = start_obj as u32 + i;
            match kind {
                b'n' => table.add_entry(
                    num,
                    XRefEntry::InUse {
                        offset: field1.max(0) as u64,
                        gen: field2.clamp(0, u16::MAX as i64) as u16,
                    },
                ),
                b'f' => table.add_entry(num, XRefEntry::Free),
                other => {
                    return Err(Error::InvalidXref(format!(
                        "xref entry type {:?} for object {}",
                        other as char, num
                    )))
                },
            }
        }
    }

    let (_, obj) = parse_object(&data[pos..])
        .map_err(|_| Error::InvalidXref("malformed trailer dictionary".to_string()))?;
    match obj {
        Object::Dictionary(d) => Ok(d),
        _ => Err(Error::InvalidXref("trailer is not a dictionary".to_string())),
    }
}

/// Parse a cross-reference stream (`/Type /XRef`).
///
/// The stream payload is a sequence of fixed-width binary records described
/// by `/W [w1 w2 w3]`, covering the subsections listed in `/Index` (default
/// `[0 /Size]`). Field 1 selects the entry type (default 1 when w1 = 0).
fn parse_stream_section(data: &[u8], pos: usize, table: &mut XRefTable) -> Result<Dict> {
    let (_, obj) = parse_indirect_object(&data[pos..])
        .map_err(|e| Error::InvalidXref(format!("xref stream object: {}", e)))?;
    let (dict, payload) = match obj {
        Object::Stream { dict, data } => {
            let decoded = crate::decoders::decode_with_dict(&data, &dict)
                .map_err(|e| Error::InvalidXref(format!("xref stream decode: {}", e)))?;
            (dict, decoded)
        },
        other => {
            return Err(Error::InvalidXref(format!(
                "xref offset points at {}, expected stream",
                other.type_name()
            )))
        },
    };

    let widths: Vec<usize> = dict
        .get("W")
        .and_then(|o| o.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|o| o.as_integer())
                .map(|w| w.max(0) as usize)
                .collect()
        })
        .unwrap_or_default();
    if widths.len() != 3 || widths.iter().sum::<usize>() == 0 || widths.iter().any(|&w| w > 8) {
        return Err(Error::InvalidXref(format!("bad /W array {:?}", widths)));
    }

    let size = dict
        .get("Size")
        .and_then(|o| o.as_integer())
        .ok_or_else(|| Error::InvalidXref("xref stream missing /Size".to_string()))?;

    // Subsections default to one run covering the whole size
    let index: Vec<(u32, u32)> = match dict.get("Index").and_then(|o| o.as_array()) {
        Some(arr) => arr
            .chunks(2)
            .filter_map(|pair| match pair {
                [a, b] => Some((
                    a.as_integer()?.max(0) as u32,
                    b.as_integer()?.max(0) as u32,
                )),
                _ => None,
            })
            .collect(),
        None => vec![(0, size.max(0) as u32)],
    };

    let record_len: usize = widths.iter().sum();
    let mut cursor = 0usize;

    for (start, count) in index {
        for i in 0..count {
            if cursor + record_len > payload.len() {
                log::warn!(
                    "xref stream payload ends early at record for object {}",
                    start + i
                );
                break;
            }
            let record = &payload[cursor..cursor + record_len];
            cursor += record_len;

            let mut fields = [0u64; 3];
            let mut at = 0;
            for (f, &w) in fields.iter_mut().zip(widths.iter()) {
                for &b in &record[at..at + w] {
                    *f = (*f << 8) | b as u64;
                }
                at += w;
            }
            // Missing type field means type 1
            let entry_type = if widths[0] == 0 { 1 } else { fields[0] };

            let num = start + i;
            match entry_type {
                0 => table.add_entry(num, XRefEntry::Free),
                1 => table.add_entry(
                    num,
                    XRefEntry::InUse {
                        offset: fields[1],
                        gen: fields[2].min(u16::MAX as u64) as u16,
                    },
                ),
                2 => table.add_entry(
                    num,
                    XRefEntry::Compressed {
                        objstm_num: fields[1] as u32,
                        index: fields[2] as u32,
                    },
                ),
                other => {
                    log::warn!("unknown xref stream entry type {} for object {}", other, num);
                },
            }
        }
    }

    Ok(dict)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLASSIC: &[u8] = b"%PDF-1.4
junk padding junk padding
xref
0 3
0000000000 65535 f
0000000018 00000 n
0000000077 00000 n
trailer
<< /Size 3 /Root 1 0 R >>
startxref
35
%%EOF";

    #[test]
    fn test_classic_xref() {
        let table = parse_xref(CLASSIC).unwrap();
        assert_eq!(table.get(0), Some(&XRefEntry::Free));
        assert_eq!(table.get(1), Some(&XRefEntry::InUse { offset: 18, gen: 0 }));
        assert_eq!(table.get(2), Some(&XRefEntry::InUse { offset: 77, gen: 0 }));
        assert_eq!(table.trailer().get("Size").unwrap().as_integer(), Some(3));
    }

    #[test]
    fn test_startxref_missing() {
        let result = parse_xref(b"%PDF-1.4 no cross reference here");
        assert!(matches!(result, Err(Error::InvalidXref(_))));
    }

    #[test]
    fn test_startxref_offset_out_of_range() {
        let data = b"%PDF-1.4\nstartxref\n999999\n%%EOF";
        assert!(matches!(parse_xref(data), Err(Error::InvalidXref(_))));
    }

    #[test]
    fn test_wrong_offset_reconstructs() {
        // startxref points into padding; the scan finds the real table
        let data = b"%PDF-1.4
xref
0 2
0000000000 65535 f
0000000018 00000 n
trailer
<< /Size 2 >>
startxref
4
%%EOF";
        // offset 4 lands inside "1.4\n" area - unusable, triggers the rescan
        let table = parse_xref(data).unwrap();
        assert_eq!(table.get(1), Some(&XRefEntry::InUse { offset: 18, gen: 0 }));
    }

    #[test]
    fn test_prev_chain_later_wins() {
        // Newest section redefines object 1; older /Prev section holds object 2
        let data = b"%PDF-1.4
xref
0 3
0000000000 65535 f
0000000011 00000 n
0000000022 00000 n
trailer
<< /Size 3 >>
xref
1 1
0000000099 00000 n
trailer
<< /Size 3 /Prev 9 >>
startxref
97
%%EOF";
        let table = parse_xref(data).unwrap();
        // newest (offset 100) wins for object 1
        assert_eq!(table.get(1), Some(&XRefEntry::InUse { offset: 99, gen: 0 }));
        // object 2 comes from the older section
        assert_eq!(table.get(2), Some(&XRefEntry::InUse { offset: 22, gen: 0 }));
    }

    #[test]
    fn test_xref_stream_section() {
        // Build an uncompressed xref stream: W [1 2 1], 3 objects
        let records: Vec<u8> = vec![
            0, 0, 0, 0xFF, // obj 0: free
            1, 0, 0x30, 0, // obj 1: in use at offset 0x30
            2, 0, 0x05, 0x02, // obj 2: compressed, objstm 5 index 2
        ];
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "9 0 obj\n<< /Type /XRef /Size 3 /W [1 2 1] /Length {} >>\nstream\n",
                records.len()
            )
            .as_bytes(),
        );
        body.extend_from_slice(&records);
        body.extend_from_slice(b"\nendstream\nendobj\n");

        let mut data = b"%PDF-1.5\n".to_vec();
        let stream_offset = data.len();
        data.extend_from_slice(&body);
        data.extend_from_slice(format!("startxref\n{}\n%%EOF", stream_offset).as_bytes());

        let table = parse_xref(&data).unwrap();
        assert_eq!(table.get(0), Some(&XRefEntry::Free));
        assert_eq!(table.get(1), Some(&XRefEntry::InUse { offset: 0x30, gen: 0 }));
        assert_eq!(
            table.get(2),
            Some(&XRefEntry::Compressed {
                objstm_num: 5,
                index: 2
            })
        );
    }

    #[test]
    fn test_xref_stream_with_index() {
        // Index [5 2]: records describe objects 5 and 6
        let records: Vec<u8> = vec![1, 0, 0x10, 0, 1, 0, 0x20, 0];
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "9 0 obj\n<< /Type /XRef /Size 7 /Index [5 2] /W [1 2 1] /Length {} >>\nstream\n",
                records.len()
            )
            .as_bytes(),
        );
        body.extend_from_slice(&records);
        body.extend_from_slice(b"\nendstream\nendobj\n");

        let mut data = b"%PDF-1.5\n".to_vec();
        let stream_offset = data.len();
        data.extend_from_slice(&body);
        data.extend_from_slice(format!("startxref\n{}\n%%EOF", stream_offset).as_bytes());

        let table = parse_xref(&data).unwrap();
        assert!(table.get(0).is_none());
        assert_eq!(table.get(5), Some(&XRefEntry::InUse { offset: 0x10, gen: 0 }));
        assert_eq!(table.get(6), Some(&XRefEntry::InUse { offset: 0x20, gen: 0 }));
    }
}
