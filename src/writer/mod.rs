//! Text serializer: databases → document trees → XML text.
//!
//! The trees built here are the canonical form read back by
//! [`ChunkBuilder`](crate::builder::ChunkBuilder) and
//! [`DescBuilder`](crate::builder::DescBuilder). Properties and descriptors
//! are written in declaration order. String and chunk-reference values are
//! quoted when they hold whitespace; a value that cannot be written as one
//! token is replaced by an empty one and reported as
//! [`UNWRITABLE_VALUE`](crate::diagnostics::codes::UNWRITABLE_VALUE).

mod options;

pub use options::WriteOptions;

use crate::diagnostics::{Diagnostics, codes};
use crate::dom::{Element, Node, write_document};
use crate::error::ConfigIoError;
use crate::model::{ConfigChunk, ConfigChunkDB, Property};
use crate::schema::{ChunkDesc, ChunkDescDB, PropertyDesc, UserLevel};
use crate::value::VarValue;

/// Serialize a chunk database, along with warnings for any value that will
/// not read back unchanged.
pub fn write_chunk_database(
    db: &ConfigChunkDB,
    options: &WriteOptions,
) -> Result<(String, Diagnostics), ConfigIoError> {
    let mut diagnostics = Diagnostics::new();
    let document = chunk_database_document(db, &mut diagnostics);
    Ok((write_document(&document, options)?, diagnostics))
}

/// Serialize a descriptor database.
pub fn write_descriptor_database(
    db: &ChunkDescDB,
    options: &WriteOptions,
) -> Result<String, ConfigIoError> {
    write_document(&descriptor_database_document(db), options)
}

// ============================================================================
// CHUNKS
// ============================================================================

/// The `ConfigChunkDB` tree of a chunk database.
pub fn chunk_database_document(db: &ConfigChunkDB, diagnostics: &mut Diagnostics) -> Node {
    let mut root = Element::new("ConfigChunkDB");
    for chunk in db {
        root.push_child(chunk_element(chunk, diagnostics));
    }
    tracing::debug!("serializing {} chunks", db.len());
    Node::Document(vec![root.into()])
}

/// The element of one chunk, named after its type.
pub fn chunk_element(chunk: &ConfigChunk, diagnostics: &mut Diagnostics) -> Element {
    let mut element = Element::new(chunk.desc_token()).with_attribute("name", chunk.name());
    for property in chunk.properties() {
        element.push_child(property_element(chunk, property, diagnostics));
    }
    element
}

fn property_element(
    owner: &ConfigChunk,
    property: &Property,
    diagnostics: &mut Diagnostics,
) -> Element {
    let mut element = Element::new(property.token());
    let mut tokens = Vec::new();
    for (index, value) in property.values().iter().enumerate() {
        match value {
            VarValue::Embedded(Some(chunk)) => {
                element.push_child(chunk_element(chunk, diagnostics));
            }
            VarValue::Embedded(None) => {}
            other => match other.to_token() {
                Some(token) => tokens.push(token),
                None => {
                    // Keep the slot so later values stay in place.
                    diagnostics.warning(
                        codes::UNWRITABLE_VALUE,
                        format!(
                            "value {index} of property '{}' in chunk '{}' mixes quotes and \
                             whitespace; writing it as empty",
                            property.token(),
                            owner.name()
                        ),
                    );
                    tokens.push("\"\"".to_string());
                }
            },
        }
    }
    if !tokens.is_empty() {
        element.push_child(Node::text(tokens.join(" ")));
    }
    element
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

/// The `ChunkDescDB` tree of a descriptor database.
pub fn descriptor_database_document(db: &ChunkDescDB) -> Node {
    let mut root = Element::new("ChunkDescDB");
    for desc in db {
        root.push_child(chunk_desc_element(desc));
    }
    tracing::debug!("serializing {} chunk descriptors", db.len());
    Node::Document(vec![root.into()])
}

fn chunk_desc_element(desc: &ChunkDesc) -> Element {
    let mut element = Element::new("ChunkDesc")
        .with_attribute("token", desc.token())
        .with_attribute("name", desc.name());
    if !desc.help().is_empty() {
        element.push_child(Element::new("help").with_text(desc.help()));
    }
    for prop_desc in desc.property_descs() {
        element.push_child(property_desc_element(prop_desc));
    }
    if let Some(template) = desc.defaults() {
        element.push_child(Element::new("Defaults").with_child(template.clone()));
    }
    element
}

fn property_desc_element(desc: &PropertyDesc) -> Element {
    let mut element = Element::new("PropertyDesc")
        .with_attribute("token", desc.token())
        .with_attribute("name", desc.name())
        .with_attribute("type", desc.val_type().token())
        .with_attribute("num", desc.num_values().to_string());
    if desc.user_level() != UserLevel::default() {
        element.push_attribute("userlevel", desc.user_level().token());
    }
    for label in desc.value_labels() {
        element.push_child(Element::new("label").with_attribute("name", label.as_str()));
    }
    for entry in desc.enums() {
        let mut enumeration = Element::new("enumeration").with_attribute("name", entry.label.as_str());
        if !entry.value.is_empty() {
            enumeration.push_attribute("value", entry.value.as_str());
        }
        element.push_child(enumeration);
    }
    if !desc.help().is_empty() {
        element.push_child(Element::new("help").with_text(desc.help()));
    }
    element
}
