//! Object stream parsing (PDF 1.5+).
//!
//! An object stream (`/Type /ObjStm`) packs many small objects into one
//! compressed stream. The decoded payload starts with `/N` pairs of
//! integers `(object number, offset)`, where offsets are relative to the
//! `/First` byte of the payload; the object bodies follow.

use crate::error::{Error, Result};
use crate::object::Object;
use crate::parser::parse_object;
use crate::scan;
use std::collections::HashMap;

/// Parse an object stream and extract every member object.
///
/// Returns a map from object number to parsed object. Members that fail to
/// parse are skipped with a warning so one bad slot does not lose the rest.
pub fn parse_object_stream(stream_obj: &Object) -> Result<HashMap<u32, Object>> {
    let dict = match stream_obj {
        Object::Stream { dict, .. } => dict,
        other => {
            return Err(Error::InvalidStream(format!(
                "object stream is {}, expected Stream",
                other.type_name()
            )))
        },
    };

    if let Some(type_name) = dict.get("Type").and_then(|o| o.as_name()) {
        if type_name != "ObjStm" {
            return Err(Error::InvalidStream(format!(
                "expected /Type /ObjStm, got /{}",
                type_name
            )));
        }
    }

    let n = dict
        .get("N")
        .and_then(|o| o.as_integer())
        .ok_or_else(|| Error::InvalidStream("object stream missing /N".to_string()))?;
    let first = dict
        .get("First")
        .and_then(|o| o.as_integer())
        .ok_or_else(|| Error::InvalidStream("object stream missing /First".to_string()))?;

    if !(0..=1_000_000).contains(&n) || !(0..=10_000_000).contains(&first) {
        return Err(Error::InvalidStream(format!(
            "implausible object stream header: /N {} /First {}",
            n, first
        )));
    }
    let n = n as usize;
    let first = first as usize;

    let payload = stream_obj.decode_stream_data()?;
    if payload.len() < first {
        return Err(Error::InvalidStream(format!(
            "object stream payload {} bytes, /First {}",
            payload.len(),
            first
        )));
    }

    let pairs = parse_header_pairs(&payload[..first], n)?;
    let bodies = &payload[first..];
    let mut result = HashMap::with_capacity(n);

    for (num, offset) in pairs {
        if offset >= bodies.len() {
            log::warn!(
                "object {} offset {} beyond object stream payload ({})",
                num,
                offset,
                bodies.len()
            );
            continue;
        }
        match parse_object(&bodies[offset..]) {
            Ok((_, obj)) => {
                result.insert(num, obj);
            },
            Err(e) => {
                log::warn!("object {} in object stream failed to parse: {:?}", num, e);
            },
        }
    }

    Ok(result)
}

/// Parse the `(num, offset)` pair sequence heading the payload.
fn parse_header_pairs(data: &[u8], count: usize) -> Result<Vec<(u32, usize)>> {
    let mut pairs = Vec::with_capacity(count);
    let mut pos = 0;

    for i in 0..count {
        pos = scan::skip_whitespace(data, pos);
        let (num, used) = scan::parse_int(data, pos).ok_or_else(|| Error::InvalidStream(
            format!("object stream header pair {} missing object number", i),
        ))?;
        pos = scan::skip_whitespace(data, pos + used);
        let (offset, used) = scan::parse_int(data, pos).ok_or_else(|| Error::InvalidStream(
            format!("object stream header pair {} missing offset", i),
        ))?;
        pos += used;

        if num < 0 || offset < 0 {
            return Err(Error::InvalidStream(format!(
                "negative object stream header pair: {} {}",
                num, offset
            )));
        }
        pairs.push((num as u32, offset as usize));
    }

    Ok(pairs)
}
