//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// Transparent wrapper for [`FormatError`]
    #[error(transparent)]
    #[diagnostic(transparent)]
    Format(#[from] FormatError),

    /// unsupported ou version {0}
    #[error("unsupported ou version {0}, expected 1 or 2")]
    #[diagnostic(code(zen_ou::version))]
    UnsupportedVersion(u32),

    /// could not return to the block stream after reading the field names
    #[error("could not restore stream position {position}")]
    RestorePosition {
        /// Offset the reader had to return to
        position: u64,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },

    /// bytes that are not valid in the selected codepage
    #[error("unable to decode {len} bytes at offset {offset} as {codepage}")]
    #[diagnostic(help("the archive was probably written with another codepage"))]
    Decode {
        /// Name of the codepage used
        codepage: &'static str,
        /// Number of bytes in the rejected string
        len: usize,
        /// Offset of the string payload
        offset: u64,
    },

    /// text that can not be represented in the selected codepage
    #[error("unable to encode {text:?} as {codepage}")]
    Unmappable {
        /// Name of the codepage used
        codepage: &'static str,
        /// The rejected text
        text: String,
    },
}

/// Structural problems found while decoding an archive
#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum FormatError {
    /// archive start marker not found
    #[error("archive start marker not found")]
    MissingStartMarker,

    /// the header terminator is followed by something other than a newline
    #[error("expected 'END' to end with 0x0A but found {found:#04x} at offset {offset}")]
    UnterminatedStartMarker {
        /// Byte that followed `END`
        found: u8,
        /// Offset of that byte
        offset: u64,
    },

    /// unknown type tag
    #[error("unable to parse type {tag:#04x} at offset {offset}")]
    UnknownTag {
        /// The tag byte
        tag: u8,
        /// Offset of the tag byte
        offset: u64,
    },

    /// unexpected tag in block body
    #[error("unexpected tag {tag:#04x} in block body at offset {offset}")]
    UnexpectedTag {
        /// The tag byte
        tag: u8,
        /// Offset of the tag byte
        offset: u64,
    },

    /// block marker that does not look like `[% Class 0 0]`
    #[error("unable to identify block {marker:?} at offset {offset}")]
    MalformedMarker {
        /// The rejected marker text
        marker: String,
        /// Offset of the marker string
        offset: u64,
    },

    /// field index outside of the field dictionary
    #[error("field index {index} at offset {offset} is outside of the {size} known field names")]
    FieldIndexOutOfRange {
        /// Referenced index
        index: u32,
        /// Size of the field dictionary
        size: usize,
        /// Offset of the field entry
        offset: u64,
    },

    /// dictionary entry that targets a slot past the declared count
    #[error("field name slot {index} at offset {offset} is outside of the declared {size} slots")]
    DictionaryIndexOutOfRange {
        /// Target slot
        index: u16,
        /// Declared number of slots
        size: usize,
        /// Offset of the dictionary entry
        offset: u64,
    },

    /// dictionary declaring more names than a 16 bit index can address
    #[error("field dictionary declares {count} names")]
    DictionaryTooLarge {
        /// Declared number of names
        count: u32,
    },

    /// `blockName`, `text` or `name` carrying something other than a string
    #[error("field {field:?} at offset {offset} must be a string but is {kind}")]
    PromotedFieldType {
        /// Field name
        field: String,
        /// Kind of the value found
        kind: &'static str,
        /// Offset of the field entry
        offset: u64,
    },

    /// premature end of stream
    #[error("unexpected end of archive at offset {offset}")]
    UnexpectedEof {
        /// Offset where the stream ran out
        offset: u64,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
