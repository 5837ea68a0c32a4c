//! Coercion of property text into typed values.

use std::sync::Arc;

use crate::diagnostics::{Diagnostics, codes};
use crate::error::ConfigError;
use crate::model::Property;
use crate::text::ValueTokens;
use crate::value::{ValType, VarValue};

/// Tokenize `text` and store one value per token, starting at slot `start`.
///
/// Returns the slot after the last value stored, so that several text
/// fragments of one property keep numbering where the previous one stopped.
///
/// Chunk-reference tokens are stored as-is. Other primitive tokens go
/// through the descriptor's enumeration table and fall back to a literal of
/// the property's type. A token that is neither ends the fragment with an
/// error; a fixed-size property that runs out of slots ends it with a
/// warning.
pub fn parse_text_values(
    property: &mut Property,
    start: usize,
    text: &str,
    diagnostics: &mut Diagnostics,
) -> usize {
    let desc = Arc::clone(property.desc());
    let mut index = start;

    for token in ValueTokens::new(text) {
        let value = match desc.val_type() {
            ValType::Chunk => VarValue::Chunk(token.to_string()),
            ValType::String | ValType::Int | ValType::Float | ValType::Bool => {
                match desc.enum_value(token) {
                    Ok(value) => value,
                    Err(err) => {
                        diagnostics.error(
                            codes::INVALID_LITERAL,
                            format!("property '{}': {err}", desc.token()),
                        );
                        return index;
                    }
                }
            }
            ValType::EmbeddedChunk => {
                diagnostics.error(
                    codes::INTERNAL_COERCION,
                    format!(
                        "property '{}' holds embedded chunks and cannot take text values",
                        desc.token()
                    ),
                );
                return index;
            }
        };

        match property.set_value(value, index) {
            Ok(()) => {
                tracing::trace!("{}[{index}] = {token}", desc.token());
                index += 1;
            }
            Err(ConfigError::IndexOutOfRange { capacity, .. }) => {
                diagnostics.warning(
                    codes::TOO_MANY_VALUES,
                    format!(
                        "property '{}' takes {capacity} value(s); ignoring '{token}' and any after it",
                        desc.token()
                    ),
                );
                return index;
            }
            Err(err) => {
                diagnostics.error(
                    codes::INTERNAL_COERCION,
                    format!("property '{}': {err}", desc.token()),
                );
                return index;
            }
        }
    }

    index
}
