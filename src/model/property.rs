//! Property instances.

use std::sync::Arc;

use crate::error::ConfigError;
use crate::schema::{NumValues, PropertyDesc};
use crate::value::{ValType, VarValue};

/// The values of one property on a chunk.
///
/// Every stored value carries the descriptor's type. Fixed-count properties
/// start with that many empty values and never grow; variable properties
/// start empty and grow as slots are set.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    desc: Arc<PropertyDesc>,
    values: Vec<VarValue>,
}

impl Property {
    pub fn new(desc: Arc<PropertyDesc>) -> Self {
        let values = match desc.num_values() {
            NumValues::Fixed(n) => vec![VarValue::empty(desc.val_type()); n],
            NumValues::Variable => Vec::new(),
        };
        Self { desc, values }
    }

    pub fn desc(&self) -> &Arc<PropertyDesc> {
        &self.desc
    }

    pub fn token(&self) -> &str {
        self.desc.token()
    }

    pub fn val_type(&self) -> ValType {
        self.desc.val_type()
    }

    pub fn values(&self) -> &[VarValue] {
        &self.values
    }

    pub fn value(&self, index: usize) -> Option<&VarValue> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Store a value at a slot.
    ///
    /// Variable properties pad any gap with empty values.
    pub fn set_value(&mut self, value: VarValue, index: usize) -> Result<(), ConfigError> {
        let expected = self.desc.val_type();
        if value.val_type() != expected {
            return Err(ConfigError::TypeMismatch {
                expected,
                found: value.val_type(),
            });
        }

        match self.desc.num_values() {
            NumValues::Fixed(capacity) if index >= capacity => Err(ConfigError::IndexOutOfRange {
                property: self.desc.token().to_string(),
                index,
                capacity,
            }),
            NumValues::Fixed(_) => {
                self.values[index] = value;
                Ok(())
            }
            NumValues::Variable => {
                if index >= self.values.len() {
                    self.values.resize(index, VarValue::empty(expected));
                    self.values.push(value);
                } else {
                    self.values[index] = value;
                }
                Ok(())
            }
        }
    }

    /// Drop every value of a variable property. Fixed properties are reset
    /// to empty values instead.
    pub fn clear(&mut self) {
        let empty = VarValue::empty(self.desc.val_type());
        match self.desc.num_values() {
            NumValues::Fixed(_) => self.values.fill(empty),
            NumValues::Variable => self.values.clear(),
        }
    }
}
