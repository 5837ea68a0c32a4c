//! Property descriptors.

use std::fmt;

use crate::error::ConfigError;
use crate::value::{ValType, VarValue};

/// How many values a property holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NumValues {
    /// Exactly this many slots.
    Fixed(usize),
    /// Any number of slots, growing as values are set.
    Variable,
}

impl NumValues {
    /// Largest slot count a `num` attribute may declare.
    ///
    /// Fixed properties allocate every slot when they are created.
    pub const MAX_FIXED: usize = 4096;

    /// Parse a `num` attribute: `var`/`variable` or a count up to
    /// [`MAX_FIXED`](Self::MAX_FIXED).
    pub fn from_token(text: &str) -> Result<Self, ConfigError> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("var") || text.eq_ignore_ascii_case("variable") {
            return Ok(Self::Variable);
        }
        match text.parse::<usize>() {
            Ok(n) if n <= Self::MAX_FIXED => Ok(Self::Fixed(n)),
            _ => Err(ConfigError::InvalidNumValues(text.to_string())),
        }
    }

    /// The count as a signed number, with -1 standing for variable.
    pub fn as_i32(&self) -> i32 {
        match self {
            Self::Fixed(n) => i32::try_from(*n).unwrap_or(i32::MAX),
            Self::Variable => -1,
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable)
    }
}

impl Default for NumValues {
    fn default() -> Self {
        Self::Fixed(1)
    }
}

impl fmt::Display for NumValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Variable => f.write_str("var"),
        }
    }
}

/// Audience a property is meant for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserLevel {
    #[default]
    Beginner,
    Expert,
}

impl UserLevel {
    /// Parse a `userlevel` attribute. Unknown names give `None`.
    pub fn from_token(text: &str) -> Option<Self> {
        if text.eq_ignore_ascii_case("beginner") {
            Some(Self::Beginner)
        } else if text.eq_ignore_ascii_case("expert") {
            Some(Self::Expert)
        } else {
            None
        }
    }

    pub fn token(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Expert => "expert",
        }
    }

    /// Numeric level: 0 for beginner, 1 for expert.
    pub fn as_u8(&self) -> u8 {
        match self {
            Self::Beginner => 0,
            Self::Expert => 1,
        }
    }
}

/// A named alias for a property value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumEntry {
    pub label: String,
    pub value: String,
}

/// Schema for one property of a chunk type.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropertyDesc {
    token: String,
    name: String,
    val_type: ValType,
    num_values: NumValues,
    enums: Vec<EnumEntry>,
    value_labels: Vec<String>,
    help: String,
    user_level: UserLevel,
}

impl PropertyDesc {
    pub fn new(token: impl Into<String>, val_type: ValType) -> Self {
        Self {
            token: token.into(),
            val_type,
            ..Self::default()
        }
    }

    /// Set the value count (builder style).
    pub fn with_num_values(mut self, num_values: NumValues) -> Self {
        self.num_values = num_values;
        self
    }

    /// Add an enumeration entry (builder style).
    pub fn with_enum(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.append_enumeration(label, value);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Display name, falling back to the token when unset.
    pub fn name(&self) -> &str {
        if self.name.is_empty() { &self.token } else { &self.name }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn val_type(&self) -> ValType {
        self.val_type
    }

    pub fn set_val_type(&mut self, val_type: ValType) {
        self.val_type = val_type;
    }

    pub fn num_values(&self) -> NumValues {
        self.num_values
    }

    pub fn set_num_values(&mut self, num_values: NumValues) {
        self.num_values = num_values;
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = help.into();
    }

    pub fn user_level(&self) -> UserLevel {
        self.user_level
    }

    pub fn set_user_level(&mut self, level: UserLevel) {
        self.user_level = level;
    }

    /// Enumeration entries in declaration order.
    pub fn enums(&self) -> &[EnumEntry] {
        &self.enums
    }

    pub fn append_enumeration(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.enums.push(EnumEntry {
            label: label.into(),
            value: value.into(),
        });
    }

    /// Labels naming the value slots, in order.
    pub fn value_labels(&self) -> &[String] {
        &self.value_labels
    }

    pub fn append_value_label(&mut self, label: impl Into<String>) {
        self.value_labels.push(label.into());
    }

    /// Resolve a token through the enumeration table, falling back to a
    /// literal of this property's type when no entry has that label.
    ///
    /// An entry with a blank value stands for its own label.
    pub fn enum_value(&self, token: &str) -> Result<VarValue, ConfigError> {
        let literal = self
            .enums
            .iter()
            .find(|entry| entry.label == token)
            .map(|entry| {
                if entry.value.trim().is_empty() {
                    entry.label.as_str()
                } else {
                    entry.value.as_str()
                }
            })
            .unwrap_or(token);
        VarValue::parse(self.val_type, literal)
    }
}
