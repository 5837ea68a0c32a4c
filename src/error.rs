//! Error types for configuration model and interchange operations.

use thiserror::Error;

use crate::value::ValType;

/// Errors raised by model operations.
///
/// None of these abort a build pass: the tree builder turns each one into a
/// diagnostic and moves on to the next node.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// No descriptor is registered for the requested chunk type.
    #[error("no ChunkDesc known for type '{0}'")]
    UnknownChunkType(String),

    /// A value type name that is not in the type table.
    #[error("unknown value type '{0}'")]
    UnknownValType(String),

    /// A `num` attribute that is neither a count nor `var`/`variable`.
    #[error("invalid value count '{0}'")]
    InvalidNumValues(String),

    /// A token that cannot be read as a literal of the property's type.
    #[error("cannot read '{token}' as a {val_type} value")]
    InvalidLiteral { val_type: ValType, token: String },

    /// A value whose tag differs from the property's declared type.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: ValType, found: ValType },

    /// A slot index past the end of a fixed-size property.
    #[error("index {index} out of range for property '{property}' ({capacity} values)")]
    IndexOutOfRange {
        property: String,
        index: usize,
        capacity: usize,
    },

    /// A descriptor without its identifying token.
    #[error("{0} has no token")]
    MissingToken(&'static str),
}

/// Lower-layer failures that abort a whole read or write.
#[derive(Debug, Error)]
pub enum ConfigIoError {
    /// XML parsing or serialization error.
    #[error("XML error at position {position}: {message}")]
    Xml { position: u64, message: String },

    /// Text that is not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(String),

    /// Start and end tags that do not pair up.
    #[error("unbalanced document: {0}")]
    UnbalancedDocument(String),

    /// IO error during read/write.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigIoError {
    /// Create an XML error without a known position.
    pub fn xml(message: impl Into<String>) -> Self {
        Self::Xml {
            position: 0,
            message: message.into(),
        }
    }

    /// Create an XML error at a byte offset of the input.
    pub fn xml_at(position: u64, message: impl Into<String>) -> Self {
        Self::Xml {
            position,
            message: message.into(),
        }
    }

    /// Create a UTF-8 error.
    pub fn utf8(message: impl std::fmt::Display) -> Self {
        Self::Utf8(message.to_string())
    }
}
