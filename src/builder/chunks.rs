//! Chunk database construction.

use super::{BuildOptions, parse_text_values};
use crate::diagnostics::{Diagnostics, codes};
use crate::dom::{Attribute, Element, Node};
use crate::error::ConfigError;
use crate::factory::ChunkFactory;
use crate::model::{ConfigChunk, ConfigChunkDB, Property};
use crate::value::{ValType, VarValue};

/// Element name of a chunk database.
const CHUNK_DB_ELEMENT: &str = "ConfigChunkDB";
/// Attribute that sets a chunk's instance name.
const NAME_ATTRIBUTE: &str = "name";

/// Builds chunks from document trees, resolving chunk types through a
/// [`ChunkFactory`].
pub struct ChunkBuilder<'a> {
    factory: &'a ChunkFactory,
    diagnostics: &'a mut Diagnostics,
    options: BuildOptions,
}

impl<'a> ChunkBuilder<'a> {
    pub fn new(factory: &'a ChunkFactory, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            factory,
            diagnostics,
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    /// Append every chunk found under `node` to `db`.
    ///
    /// Documents and fragments are searched recursively for a
    /// `ConfigChunkDB` element; chunks are added in document order.
    pub fn build_chunk_database(&mut self, db: &mut ConfigChunkDB, node: &Node) {
        match node {
            Node::Document(children) | Node::Fragment(children) => {
                for child in children {
                    self.build_chunk_database(db, child);
                }
            }
            Node::Element(element) if element.is_named(CHUNK_DB_ELEMENT) => {
                let before = db.len();
                for child in element.child_elements() {
                    if let Some(chunk) = self.build_chunk_element(child, self.options.use_defaults)
                    {
                        db.add(chunk);
                    }
                }
                tracing::debug!(
                    "built {} chunks ({} diagnostics so far)",
                    db.len() - before,
                    self.diagnostics.len()
                );
            }
            Node::Element(element) => {
                self.diagnostics.warning(
                    codes::UNRECOGNIZED_ELEMENT,
                    format!("unrecognized element '{}'", element.name),
                );
            }
            Node::Text(_)
            | Node::Comment(_)
            | Node::ProcessingInstruction { .. }
            | Node::Notation(_) => {}
            Node::Attribute(_) | Node::Other(_) => self.unexpected_node(node),
        }
    }

    /// Build a single chunk from an element, or from the first child of a
    /// document or fragment.
    pub fn build_config_chunk(&mut self, node: &Node, use_defaults: bool) -> Option<ConfigChunk> {
        match node {
            Node::Document(_) | Node::Fragment(_) => {
                let child = node.first_child()?;
                self.build_config_chunk(child, use_defaults)
            }
            Node::Element(element) => self.build_chunk_element(element, use_defaults),
            Node::Text(_)
            | Node::Comment(_)
            | Node::ProcessingInstruction { .. }
            | Node::Notation(_) => None,
            Node::Attribute(_) | Node::Other(_) => {
                self.unexpected_node(node);
                None
            }
        }
    }

    /// Build a chunk whose type is the element name.
    ///
    /// Attributes are applied first, then child elements in document order.
    /// An unknown type drops the whole element with an error.
    pub fn build_chunk_element(
        &mut self,
        element: &Element,
        use_defaults: bool,
    ) -> Option<ConfigChunk> {
        let mut chunk = match self.factory.create_chunk(&element.name, use_defaults) {
            Ok(chunk) => chunk,
            Err(err) => {
                self.diagnostics.error(
                    codes::UNKNOWN_CHUNK_TYPE,
                    format!("unable to create chunk: {err}"),
                );
                return None;
            }
        };
        tracing::trace!("building chunk of type '{}'", chunk.desc_token());

        for attribute in &element.attributes {
            self.build_attribute_property(&mut chunk, attribute);
        }
        for child in &element.children {
            self.build_property(&mut chunk, child);
        }
        Some(chunk)
    }

    /// Populate one property of `chunk` from an attribute or child element.
    pub fn build_property(&mut self, chunk: &mut ConfigChunk, node: &Node) {
        match node {
            Node::Attribute(attribute) => self.build_attribute_property(chunk, attribute),
            Node::Element(element) => self.build_element_property(chunk, element),
            Node::Text(_)
            | Node::Comment(_)
            | Node::ProcessingInstruction { .. }
            | Node::Notation(_) => {}
            Node::Document(_) | Node::Fragment(_) | Node::Other(_) => self.unexpected_node(node),
        }
    }

    fn build_attribute_property(&mut self, chunk: &mut ConfigChunk, attribute: &Attribute) {
        if attribute.name.eq_ignore_ascii_case(NAME_ATTRIBUTE) {
            chunk.set_name(attribute.value.as_str());
            return;
        }
        let Some(val_type) = chunk
            .desc()
            .property_desc(&attribute.name)
            .map(|desc| desc.val_type())
        else {
            self.no_such_property(chunk, &attribute.name);
            return;
        };
        // Embedded chunks have no text form; keep their current values.
        let property = if val_type == ValType::EmbeddedChunk {
            chunk.property_mut(&attribute.name)
        } else {
            start_values(chunk, &attribute.name)
        };
        if let Some(property) = property {
            parse_text_values(property, 0, &attribute.value, self.diagnostics);
        }
    }

    fn build_element_property(&mut self, chunk: &mut ConfigChunk, element: &Element) {
        let Some(val_type) = chunk
            .desc()
            .property_desc(&element.name)
            .map(|desc| desc.val_type())
        else {
            self.no_such_property(chunk, &element.name);
            return;
        };

        if val_type == ValType::EmbeddedChunk {
            let mut nested = Vec::new();
            for child in &element.children {
                if let Some(child_chunk) = self.build_config_chunk(child, self.options.use_defaults)
                {
                    nested.push(child_chunk);
                }
            }
            if let Some(property) = start_values(chunk, &element.name) {
                self.store_embedded(property, nested);
            }
            return;
        }

        let Some(property) = start_values(chunk, &element.name) else {
            return;
        };
        let mut index = 0;
        for child in &element.children {
            match child {
                Node::Text(text) => {
                    index = parse_text_values(property, index, text, self.diagnostics);
                }
                other => self.diagnostics.warning(
                    codes::UNEXPECTED_CHILD,
                    format!(
                        "unexpected {:?} node '{}' in value of property '{}'",
                        other.kind(),
                        other.name(),
                        element.name
                    ),
                ),
            }
        }
    }

    fn store_embedded(&mut self, property: &mut Property, chunks: Vec<ConfigChunk>) {
        for (index, chunk) in chunks.into_iter().enumerate() {
            match property.set_value(VarValue::embedded(chunk), index) {
                Ok(()) => {}
                Err(ConfigError::IndexOutOfRange { capacity, .. }) => {
                    self.diagnostics.warning(
                        codes::TOO_MANY_VALUES,
                        format!(
                            "property '{}' takes {capacity} chunk(s); ignoring the rest",
                            property.token()
                        ),
                    );
                    return;
                }
                Err(err) => {
                    self.diagnostics.error(
                        codes::INTERNAL_COERCION,
                        format!("property '{}': {err}", property.token()),
                    );
                    return;
                }
            }
        }
    }

    fn no_such_property(&mut self, chunk: &ConfigChunk, token: &str) {
        self.diagnostics.warning(
            codes::NO_SUCH_PROPERTY,
            format!(
                "no such property '{token}' in chunk '{}' of type '{}'",
                chunk.name(),
                chunk.desc_token()
            ),
        );
    }

    fn unexpected_node(&mut self, node: &Node) {
        self.diagnostics.warning(
            codes::UNEXPECTED_NODE_KIND,
            format!("unexpected {:?} node '{}'", node.kind(), node.name()),
        );
    }
}

/// Fetch a property about to receive values from slot 0.
///
/// Variable-count properties are emptied first so that values read from the
/// document replace any defaults rather than merging with them.
fn start_values<'c>(chunk: &'c mut ConfigChunk, token: &str) -> Option<&'c mut Property> {
    let property = chunk.property_mut(token)?;
    if property.desc().num_values().is_variable() {
        property.clear();
    }
    Some(property)
}
