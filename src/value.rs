//! Value types held in property slots.
//!
//! [`ValType`] is the closed set of kinds a property may declare, and
//! [`VarValue`] is a single tagged value of one of those kinds.

use std::borrow::Cow;
use std::fmt;

use crate::error::ConfigError;
use crate::model::ConfigChunk;
use crate::text::quote_token;

// ============================================================================
// VALUE TYPES
// ============================================================================

/// The kind of value a property holds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValType {
    Int,
    Float,
    Bool,
    #[default]
    String,
    /// Name of another chunk, resolved later by whoever owns the database.
    Chunk,
    /// A whole chunk stored inline.
    EmbeddedChunk,
}

impl ValType {
    /// Every value type, in declaration order.
    pub const ALL: [ValType; 6] = [
        ValType::Int,
        ValType::Float,
        ValType::Bool,
        ValType::String,
        ValType::Chunk,
        ValType::EmbeddedChunk,
    ];

    /// Look up a value type by its textual name (case-insensitive).
    pub fn from_token(name: &str) -> Result<Self, ConfigError> {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "int" | "integer" => Ok(Self::Int),
            "float" | "double" => Ok(Self::Float),
            "bool" | "boolean" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "chunk" => Ok(Self::Chunk),
            "embeddedchunk" => Ok(Self::EmbeddedChunk),
            _ => Err(ConfigError::UnknownValType(name.to_string())),
        }
    }

    /// The canonical textual name written by the serializer.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Chunk => "chunk",
            Self::EmbeddedChunk => "embeddedchunk",
        }
    }

    /// Returns true for the types whose values are parsed from text.
    pub fn is_primitive(&self) -> bool {
        !matches!(self, Self::EmbeddedChunk)
    }
}

impl fmt::Display for ValType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ============================================================================
// VALUES
// ============================================================================

/// A single typed value.
#[derive(Clone, Debug, PartialEq)]
pub enum VarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    /// Name of a chunk instance.
    Chunk(String),
    /// An inline chunk, or `None` for an unfilled slot.
    Embedded(Option<Box<ConfigChunk>>),
}

impl VarValue {
    /// The empty value of a type: zero, false, the empty string, or no chunk.
    pub fn empty(val_type: ValType) -> Self {
        match val_type {
            ValType::Int => Self::Int(0),
            ValType::Float => Self::Float(0.0),
            ValType::Bool => Self::Bool(false),
            ValType::String => Self::String(String::new()),
            ValType::Chunk => Self::Chunk(String::new()),
            ValType::EmbeddedChunk => Self::Embedded(None),
        }
    }

    /// Wrap a chunk as an embedded value.
    pub fn embedded(chunk: ConfigChunk) -> Self {
        Self::Embedded(Some(Box::new(chunk)))
    }

    /// Parse a literal token as a value of the given type.
    ///
    /// Embedded chunks have no literal form and always fail.
    pub fn parse(val_type: ValType, token: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidLiteral {
            val_type,
            token: token.to_string(),
        };
        match val_type {
            ValType::Int => token.parse().map(Self::Int).map_err(|_| invalid()),
            ValType::Float => token.parse().map(Self::Float).map_err(|_| invalid()),
            ValType::Bool => parse_bool(token).map(Self::Bool).ok_or_else(invalid),
            ValType::String => Ok(Self::String(token.to_string())),
            ValType::Chunk => Ok(Self::Chunk(token.to_string())),
            ValType::EmbeddedChunk => Err(invalid()),
        }
    }

    /// The type tag of this value.
    pub fn val_type(&self) -> ValType {
        match self {
            Self::Int(_) => ValType::Int,
            Self::Float(_) => ValType::Float,
            Self::Bool(_) => ValType::Bool,
            Self::String(_) => ValType::String,
            Self::Chunk(_) => ValType::Chunk,
            Self::Embedded(_) => ValType::EmbeddedChunk,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// The text of a string or chunk-reference value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Chunk(s) => Some(s),
            _ => None,
        }
    }

    /// The chunk held by an embedded value.
    pub fn as_chunk(&self) -> Option<&ConfigChunk> {
        match self {
            Self::Embedded(Some(chunk)) => Some(chunk),
            _ => None,
        }
    }

    /// The token form read back by the value tokenizer.
    ///
    /// Strings and chunk names are quoted when they need it (see
    /// [`quote_token`](crate::text::quote_token)). Embedded chunks, and text
    /// the tokenizer could not read back as one token, have no token form.
    pub fn to_token(&self) -> Option<String> {
        match self {
            Self::String(s) | Self::Chunk(s) => quote_token(s).map(Cow::into_owned),
            Self::Embedded(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for VarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(s) | Self::Chunk(s) => f.write_str(s),
            Self::Embedded(Some(chunk)) => write!(f, "<{}>", chunk.name()),
            Self::Embedded(None) => f.write_str("<none>"),
        }
    }
}

impl From<i64> for VarValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for VarValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for VarValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for VarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") || token == "1" {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") || token == "0" {
        Some(false)
    } else {
        None
    }
}
