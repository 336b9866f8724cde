//! Conversion errors
//!
//! Fatal conditions raised while loading, parsing or emitting a mesh. Numeric
//! tokens never produce an error: the scanner reads malformed numbers as zero.

use std::fmt;
use std::path::PathBuf;

/// Vertex attribute kind, used to name the array an index points into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Position,
    Normal,
    TexCoord,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Position => "position",
            Attribute::Normal => "normal",
            Attribute::TexCoord => "texture coordinate",
        })
    }
}

/// Error type for OBJ -> Acorn conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Source file could not be read
    #[error("cannot open source file {}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line starts with a command the parser does not know
    #[error("unknown line {line} with command {text:?}")]
    UnrecognizedLine { line: usize, text: String },

    /// A face references an attribute that was never defined
    #[error("{attribute} index {index} out of range ({available} defined)")]
    IndexOutOfRange {
        attribute: Attribute,
        index: u32,
        available: usize,
    },

    /// Transform options outside their valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
