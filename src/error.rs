//! Error types for the PDF text-extraction library.
//!
//! Two layers of error reporting coexist:
//!
//! - [`Error`] is the crate-wide failure type returned from fallible
//!   operations. Structural failures (bad header, broken cross-reference
//!   table, reference cycles) abort processing; everything else is
//!   recoverable under a lenient [`crate::config::ErrorPolicy`].
//! - [`ErrorRecord`] entries accumulate on the document while extraction
//!   recovers past individual-object failures. They are observable after the
//!   fact via `Document::errors()`.

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid PDF header (expected '%PDF-')
    #[error("Invalid PDF header: expected '%PDF-', found '{0}'")]
    InvalidHeader(String),

    /// Cross-reference table or stream could not be located or parsed
    #[error("Invalid cross-reference table: {0}")]
    InvalidXref(String),

    /// Referenced object not found, free, or stale
    #[error("Object not found: {0} {1} R")]
    MissingObject(u32, u16),

    /// Stream body could not be read or decoded
    #[error("Invalid stream: {0}")]
    InvalidStream(String),

    /// Character code could not be mapped to Unicode
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// Syntax error at a specific byte offset
    #[error("Syntax error at byte {offset}: {reason}")]
    SyntaxError {
        /// Byte offset where parsing failed
        offset: usize,
        /// Reason for the failure
        reason: String,
    },

    /// Reference cycle detected (page tree or object graph)
    #[error("Circular reference detected: object {0} {1} R")]
    CircularReference(u32, u16),

    /// Decompressed output exceeded the hard size bound
    #[error("Decoded stream too large: {size} bytes exceeds limit {limit}")]
    OutputTooLarge {
        /// Produced size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },

    /// Stream filter not supported for decoding
    #[error("Unsupported filter: {0}")]
    UnsupportedFilter(String),

    /// Page index past the end of the document
    #[error("Page index {0} out of range (document has {1} pages)")]
    PageOutOfRange(usize, usize),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Coarse classification of an error, used for the per-document error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or mangled '%PDF-' header
    InvalidHeader,
    /// Unusable cross-reference information
    InvalidXref,
    /// Unresolvable indirect reference
    MissingObject,
    /// Undecodable stream body
    InvalidStream,
    /// Unmappable character code
    EncodingError,
    /// Malformed object syntax
    SyntaxError,
    /// Reference cycle
    CircularReference,
    /// Decompression output bound exceeded
    OutputTooLarge,
    /// Unknown /Filter name
    UnsupportedFilter,
}

impl Error {
    /// Classify this error for the error log.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidHeader(_) => ErrorKind::InvalidHeader,
            Error::InvalidXref(_) => ErrorKind::InvalidXref,
            Error::MissingObject(..) | Error::PageOutOfRange(..) => ErrorKind::MissingObject,
            Error::InvalidStream(_) | Error::Io(_) => ErrorKind::InvalidStream,
            Error::EncodingError(_) => ErrorKind::EncodingError,
            Error::SyntaxError { .. } => ErrorKind::SyntaxError,
            Error::CircularReference(..) => ErrorKind::CircularReference,
            Error::OutputTooLarge { .. } => ErrorKind::OutputTooLarge,
            Error::UnsupportedFilter(_) => ErrorKind::UnsupportedFilter,
        }
    }

    /// Whether this error is structural.
    ///
    /// Structural errors abort processing unless the policy sets
    /// `continue_on_parse_error`; object-level errors are recovered locally.
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidHeader | ErrorKind::InvalidXref | ErrorKind::CircularReference
        )
    }
}

/// One recovered failure, kept on the document for post-hoc inspection.
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    /// Classification of the failure
    pub kind: ErrorKind,
    /// Byte offset in the PDF image where the failure surfaced (0 if unknown)
    pub offset: u64,
    /// Human-readable description
    pub message: String,
}

impl ErrorRecord {
    /// Build a record from an error and the offset it surfaced at.
    pub fn from_error(err: &Error, offset: u64) -> Self {
        Self {
            kind: err.kind(),
            offset,
            message: err.to_string(),
        }
    }
}
