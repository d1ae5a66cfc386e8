//! PDF object types.
//!
//! The object model is a tagged sum over the eight PDF types plus indirect
//! references. Dictionaries preserve key insertion order so iteration is
//! deterministic; duplicate keys keep the last occurrence. Stream payloads
//! are [`bytes::Bytes`], so slicing the PDF image into stream bodies never
//! copies.

use crate::decoders::DecodeParams;
use crate::error::{Error, Result};
use indexmap::IndexMap;

/// Dictionary type: name keys to objects, insertion order preserved.
pub type Dict = IndexMap<String, Object>;

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// Name (the bytes after /)
    Name(String),
    /// Literal string with escapes already decoded
    String(Vec<u8>),
    /// Hexadecimal string decoded to raw bytes
    HexString(Vec<u8>),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (ordered key-value pairs)
    Dictionary(Dict),
    /// Stream (dictionary + raw payload bytes)
    Stream {
        /// Stream dictionary
        dict: Dict,
        /// Raw (still encoded) stream data
        data: bytes::Bytes,
    },
    /// Indirect object reference
    Reference(ObjectRef),
}

/// Reference to an indirect object.
///
/// The resolver caches by object number alone; the generation is used only to
/// reject stale references against the xref entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    /// Object number
    pub num: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(num: u32, gen: u16) -> Self {
        Self { num, gen }
    }
}

impl std::fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.num, self.gen)
    }
}

impl Object {
    /// Human-readable type name, without the data.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::Name(_) => "Name",
            Object::String(_) => "String",
            Object::HexString(_) => "HexString",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream { .. } => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric value as f64 (integers widen).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// String bytes from either string flavour.
    pub fn as_string_bytes(&self) -> Option<&[u8]> {
        match self {
            Object::String(s) | Object::HexString(s) => Some(s),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Decode stream data through the `/Filter` chain.
    ///
    /// `/DecodeParms` entries are matched positionally: element *i* of an
    /// array parameterises filter *i*; a single dictionary applies to the
    /// first (usually only) filter. Non-stream objects error.
    pub fn decode_stream_data(&self) -> Result<Vec<u8>> {
        let (dict, data) = match self {
            Object::Stream { dict, data } => (dict, data),
            _ => {
                return Err(Error::InvalidStream(format!(
                    "expected Stream, found {}",
                    self.type_name()
                )))
            },
        };

        // Some producers pad the body with an EOL pair before the payload.
        let data = trim_leading_stream_whitespace(data);

        let filters = extract_filter_names(dict);
        if filters.is_empty() {
            return Ok(data.to_vec());
        }
        let params = extract_decode_params(dict, filters.len());
        crate::decoders::decode_chain(data, &filters, &params)
    }
}

/// Trim leading PDF whitespace from stream data.
///
/// Stream data begins immediately after the EOL following `stream`, but some
/// generators insert extra whitespace there.
fn trim_leading_stream_whitespace(data: &[u8]) -> &[u8] {
    let start = crate::scan::skip_whitespace(data, 0);
    &data[start..]
}

/// Extract filter names from the `/Filter` entry (name or array of names).
pub(crate) fn extract_filter_names(dict: &Dict) -> Vec<String> {
    let filter_obj = match dict.get("Filter").or_else(|| dict.get("F")) {
        Some(o) => o,
        None => return Vec::new(),
    };
    match filter_obj {
        Object::Name(name) => vec![name.clone()],
        Object::Array(arr) => arr
            .iter()
            .filter_map(|obj| obj.as_name().map(|s| s.to_string()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Extract per-filter decode parameters, positionally aligned with the
/// filter chain. Missing or null entries become `None`.
pub(crate) fn extract_decode_params(dict: &Dict, filter_count: usize) -> Vec<Option<DecodeParams>> {
    let mut out = vec![None; filter_count];
    let parms = match dict.get("DecodeParms").or_else(|| dict.get("DP")) {
        Some(o) => o,
        None => return out,
    };
    match parms {
        Object::Dictionary(d) => {
            if filter_count > 0 {
                out[0] = Some(DecodeParams::from_dict(d));
            }
        },
        Object::Array(arr) => {
            for (i, entry) in arr.iter().enumerate().take(filter_count) {
                if let Object::Dictionary(d) = entry {
                    out[i] = Some(DecodeParams::from_dict(d));
                }
            }
        },
        _ => {},
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict_of(entries: Vec<(&str, Object)>) -> Dict {
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn test_object_integer() {
        let obj = Object::Integer(42);
        assert_eq!(obj.as_integer(), Some(42));
        assert_eq!(obj.as_number(), Some(42.0));
        assert!(obj.as_name().is_none());
        assert!(!obj.is_null());
    }

    #[test]
    fn test_object_real_widening() {
        let obj = Object::Real(1.5);
        assert_eq!(obj.as_number(), Some(1.5));
        assert!(obj.as_integer().is_none());
    }

    #[test]
    fn test_object_string_flavours() {
        assert_eq!(Object::String(b"ab".to_vec()).as_string_bytes(), Some(&b"ab"[..]));
        assert_eq!(Object::HexString(vec![0xAB]).as_string_bytes(), Some(&[0xAB][..]));
        assert!(Object::Integer(1).as_string_bytes().is_none());
    }

    #[test]
    fn test_dictionary_preserves_insertion_order() {
        let mut d = Dict::new();
        d.insert("Zeta".to_string(), Object::Integer(1));
        d.insert("Alpha".to_string(), Object::Integer(2));
        d.insert("Mid".to_string(), Object::Integer(3));
        let keys: Vec<&str> = d.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_stream_dict_access() {
        let dict = dict_of(vec![("Length", Object::Integer(100))]);
        let obj = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"stream data"),
        };
        let d = obj.as_dict().unwrap();
        assert_eq!(d.get("Length").unwrap().as_integer(), Some(100));
    }

    #[test]
    fn test_object_ref_display() {
        assert_eq!(format!("{}", ObjectRef::new(10, 0)), "10 0 R");
    }

    #[test]
    fn test_decode_stream_no_filter() {
        let dict = dict_of(vec![("Length", Object::Integer(5))]);
        let obj = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"Hello"),
        };
        assert_eq!(obj.decode_stream_data().unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_stream_single_filter() {
        let dict = dict_of(vec![("Filter", Object::Name("ASCIIHexDecode".to_string()))]);
        let obj = Object::Stream {
            dict,
            data: bytes::Bytes::from_static(b"48656C6C6F>"),
        };
        assert_eq!(obj.decode_stream_data().unwrap(), b"Hello");
    }

    #[test]
    fn test_decode_stream_not_a_stream() {
        let result = Object::Integer(42).decode_stream_data();
        assert!(matches!(result, Err(Error::InvalidStream(_))));
    }

    #[test]
    fn test_extract_filter_names_single_and_array() {
        let d = dict_of(vec![("Filter", Object::Name("FlateDecode".to_string()))]);
        assert_eq!(extract_filter_names(&d), vec!["FlateDecode"]);

        let d = dict_of(vec![(
            "Filter",
            Object::Array(vec![
                Object::Name("ASCII85Decode".to_string()),
                Object::Name("FlateDecode".to_string()),
            ]),
        )]);
        assert_eq!(extract_filter_names(&d), vec!["ASCII85Decode", "FlateDecode"]);
    }

    #[test]
    fn test_decode_params_positional() {
        let inner = dict_of(vec![
            ("Predictor", Object::Integer(12)),
            ("Columns", Object::Integer(5)),
        ]);
        let d = dict_of(vec![
            (
                "Filter",
                Object::Array(vec![
                    Object::Name("ASCII85Decode".to_string()),
                    Object::Name("FlateDecode".to_string()),
                ]),
            ),
            (
                "DecodeParms",
                Object::Array(vec![Object::Null, Object::Dictionary(inner)]),
            ),
        ]);
        let params = extract_decode_params(&d, 2);
        assert!(params[0].is_none());
        let p = params[1].as_ref().unwrap();
        assert_eq!(p.predictor, 12);
        assert_eq!(p.columns, 5);
    }
}
