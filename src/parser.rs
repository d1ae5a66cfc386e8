//! PDF object parser.
//!
//! Recursive descent over the token layer: a token decides the object kind,
//! and composite types (arrays, dictionaries, streams) recurse into their
//! contents.
//!
//! Damage tolerance: unclosed arrays and dictionaries at EOF return what was
//! collected, and a stream whose `/Length` is missing or wrong is truncated
//! at the nearest `endstream` keyword. Callers decide whether such
//! recoveries are acceptable via the error policy.

use crate::error::{Error, Result};
use crate::lexer::{Token, token};
use crate::object::{Dict, Object, ObjectRef};
use nom::IResult;

/// Decode escape sequences in a PDF literal string (ISO 32000-1:2008,
/// 7.3.4.2).
///
/// Handles `\n \r \t \b \f \( \) \\`, octal escapes of 1-3 digits, and
/// line continuation (`\` followed by an EOL). Unknown escapes keep the
/// backslash literally.
pub fn decode_literal_string_escapes(raw: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        if raw[i] != b'\\' || i + 1 >= raw.len() {
            result.push(raw[i]);
            i += 1;
            continue;
        }
        match raw[i + 1] {
            b'n' => {
                result.push(b'\n');
                i += 2;
            },
            b'r' => {
                result.push(b'\r');
                i += 2;
            },
            b't' => {
                result.push(b'\t');
                i += 2;
            },
            b'b' => {
                result.push(0x08);
                i += 2;
            },
            b'f' => {
                result.push(0x0C);
                i += 2;
            },
            b'(' => {
                result.push(b'(');
                i += 2;
            },
            b')' => {
                result.push(b')');
                i += 2;
            },
            b'\\' => {
                result.push(b'\\');
                i += 2;
            },
            // Line continuation: the backslash-EOL pair vanishes
            b'\n' => {
                i += 2;
            },
            b'\r' => {
                i += 2;
                if i < raw.len() && raw[i] == b'\n' {
                    i += 1;
                }
            },
            c if (b'0'..b'8').contains(&c) => {
                let mut octal: u32 = 0;
                let mut len = 0;
                while len < 3 && i + 1 + len < raw.len() {
                    let d = raw[i + 1 + len];
                    if !(b'0'..b'8').contains(&d) {
                        break;
                    }
                    octal = octal * 8 + (d - b'0') as u32;
                    len += 1;
                }
                result.push((octal & 0xFF) as u8);
                i += 1 + len;
            },
            _ => {
                // Unknown escape: keep the backslash
                result.push(b'\\');
                i += 1;
            },
        }
    }

    result
}

/// Decode a hex string body to bytes.
///
/// Whitespace is skipped; an odd trailing nibble is padded right with 0.
pub fn decode_hex(hex_bytes: &[u8]) -> Result<Vec<u8>> {
    let mut result = Vec::with_capacity(hex_bytes.len() / 2 + 1);
    let mut high: Option<u8> = None;

    for &b in hex_bytes {
        if crate::scan::is_whitespace(b) {
            continue;
        }
        let nibble = match b {
            b'0'..=b'9' => b - b'0',
            b'a'..=b'f' => b - b'a' + 10,
            b'A'..=b'F' => b - b'A' + 10,
            _ => {
                return Err(Error::SyntaxError {
                    offset: 0,
                    reason: format!("invalid hex digit {:#04x}", b),
                })
            },
        };
        match high.take() {
            Some(h) => result.push((h << 4) | nibble),
            None => high = Some(nibble),
        }
    }
    // Odd digit count: pad the trailing nibble with 0
    if let Some(h) = high {
        result.push(h << 4);
    }
    Ok(result)
}

/// Parse a PDF object from input bytes.
///
/// Handles all object kinds including `num gen R` references (recognised by
/// two-token lookahead from an integer) and streams (a dictionary followed
/// by the `stream` keyword).
pub fn parse_object(input: &[u8]) -> IResult<&[u8], Object> {
    let (input, tok) = token(input)?;

    match tok {
        Token::Null => Ok((input, Object::Null)),
        Token::True => Ok((input, Object::Boolean(true))),
        Token::False => Ok((input, Object::Boolean(false))),
        Token::Real(r) => Ok((input, Object::Real(r))),
        Token::Name(name) => Ok((input, Object::Name(name))),

        Token::Integer(i) => {
            // Lookahead for `gen R` making this an indirect reference
            if i >= 0 {
                if let Ok((after_gen, Token::Integer(gen))) = token(input) {
                    if (0..=u16::MAX as i64).contains(&gen) {
                        if let Ok((after_r, Token::R)) = token(after_gen) {
                            return Ok((
                                after_r,
                                Object::Reference(ObjectRef::new(i as u32, gen as u16)),
                            ));
                        }
                    }
                }
            }
            Ok((input, Object::Integer(i)))
        },

        Token::LiteralString(bytes) => {
            Ok((input, Object::String(decode_literal_string_escapes(bytes))))
        },

        Token::HexString(hex) => match decode_hex(hex) {
            Ok(decoded) => Ok((input, Object::HexString(decoded))),
            Err(_) => Err(nom::Err::Failure(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Fail,
            ))),
        },

        Token::ArrayStart => parse_array(input),

        Token::DictStart => {
            let (remaining, dict) = parse_dictionary(input)?;
            // A dictionary directly followed by `stream` is a stream object
            if let Ok((body, Token::StreamStart)) = token(remaining) {
                let (rest, data) = parse_stream_data(body, &dict)?;
                return Ok((
                    rest,
                    Object::Stream {
                        dict,
                        data: bytes::Bytes::from(data),
                    },
                ));
            }
            Ok((remaining, Object::Dictionary(dict)))
        },

        _ => Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))),
    }
}

/// Parse the body of an indirect object at `num gen obj`.
///
/// Returns the object and the reference parsed from the header. Fails when
/// the header is not present at the given input.
pub fn parse_indirect_object(input: &[u8]) -> Result<(ObjectRef, Object)> {
    let err = |reason: &str| Error::SyntaxError {
        offset: 0,
        reason: reason.to_string(),
    };

    let (input, t1) = token(input).map_err(|_| err("expected object number"))?;
    let num = match t1 {
        Token::Integer(n) if n >= 0 => n as u32,
        _ => return Err(err("expected object number")),
    };
    let (input, t2) = token(input).map_err(|_| err("expected generation number"))?;
    let gen = match t2 {
        Token::Integer(g) if (0..=u16::MAX as i64).contains(&g) => g as u16,
        _ => return Err(err("expected generation number")),
    };
    let (input, t3) = token(input).map_err(|_| err("expected 'obj'"))?;
    if t3 != Token::ObjStart {
        return Err(err("expected 'obj' keyword"));
    }

    let (_, obj) = parse_object(input).map_err(|_| err("malformed object body"))?;
    Ok((ObjectRef::new(num, gen), obj))
}

/// Consume the stream body after the `stream` keyword.
///
/// The keyword must be followed by CRLF or LF (a lone CR or nothing is
/// tolerated with a warning). When `/Length` is an inline integer the body
/// is exactly that many bytes, verified against a following `endstream`; in
/// every other case (indirect, missing, wrong) the body is truncated at the
/// nearest `endstream` keyword.
fn parse_stream_data<'a>(input: &'a [u8], dict: &Dict) -> IResult<&'a [u8], Vec<u8>> {
    let input = if let Some(rest) = input.strip_prefix(b"\r\n") {
        rest
    } else if let Some(rest) = input.strip_prefix(b"\n") {
        rest
    } else if let Some(rest) = input.strip_prefix(b"\r") {
        log::warn!("stream keyword followed by bare CR; accepting");
        rest
    } else {
        log::warn!("no EOL after stream keyword; accepting");
        input
    };

    if let Some(length) = dict.get("Length").and_then(|o| o.as_integer()) {
        let length = length.max(0) as usize;
        if length <= input.len() {
            let body = &input[..length];
            let after = &input[length..];
            // The declared length is only trusted when endstream follows it
            if let Ok((rest, Token::StreamEnd)) = token(after) {
                return Ok((rest, body.to_vec()));
            }
            log::warn!(
                "stream /Length {} not followed by endstream; re-scanning",
                length
            );
        }
    }

    // Recovery: locate the nearest endstream and truncate there
    match crate::scan::find_keyword(input, 0, b"endstream") {
        Some(pos) => {
            let mut body = &input[..pos];
            // Drop the EOL that precedes endstream, if present
            if body.ends_with(b"\r\n") {
                body = &body[..body.len() - 2];
            } else if body.ends_with(b"\n") || body.ends_with(b"\r") {
                body = &body[..body.len() - 1];
            }
            let (rest, _) = token(&input[pos..])?; // consume endstream
            Ok((rest, body.to_vec()))
        },
        None => Err(nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Eof))),
    }
}

/// Parse a PDF array body after `[`.
fn parse_array(input: &[u8]) -> IResult<&[u8], Object> {
    let mut objects = Vec::new();
    let mut remaining = input;

    loop {
        match token(remaining) {
            Ok((inp, Token::ArrayEnd)) => return Ok((inp, Object::Array(objects))),
            Ok(_) => match parse_object(remaining) {
                Ok((inp, obj)) => {
                    objects.push(obj);
                    remaining = inp;
                },
                Err(e) => {
                    if remaining.is_empty() {
                        // Unclosed at EOF: keep what we have
                        return Ok((remaining, Object::Array(objects)));
                    }
                    return Err(e);
                },
            },
            Err(_) if remaining.is_empty() || crate::scan::skip_whitespace(remaining, 0) == remaining.len() => {
                return Ok((remaining, Object::Array(objects)));
            },
            Err(e) => return Err(e),
        }
    }
}

/// Parse a PDF dictionary body after `<<`.
///
/// Duplicate keys keep the last occurrence; insertion order is preserved.
fn parse_dictionary(input: &[u8]) -> IResult<&[u8], Dict> {
    let mut dict = Dict::new();
    let mut remaining = input;

    loop {
        match token(remaining) {
            Ok((inp, Token::DictEnd)) => return Ok((inp, dict)),
            Ok((inp, Token::Name(key))) => match parse_object(inp) {
                Ok((inp, value)) => {
                    dict.insert(key, value);
                    remaining = inp;
                },
                Err(e) => {
                    if inp.is_empty() {
                        return Ok((inp, dict));
                    }
                    return Err(e);
                },
            },
            Ok(_) => {
                // Key must be a name
                return Err(nom::Err::Error(nom::error::Error::new(
                    remaining,
                    nom::error::ErrorKind::Tag,
                )));
            },
            Err(_) if remaining.is_empty() || crate::scan::skip_whitespace(remaining, 0) == remaining.len() => {
                return Ok((remaining, dict));
            },
            Err(e) => return Err(e),
        }
    }
}
