//! Descriptor database construction.

use crate::diagnostics::{Diagnostics, codes};
use crate::dom::{Element, Node};
use crate::schema::{ChunkDesc, ChunkDescDB, NumValues, PropertyDesc, UserLevel};
use crate::value::ValType;

const DESC_DB_ELEMENT: &str = "ChunkDescDB";
const CHUNK_DESC_ELEMENT: &str = "ChunkDesc";
const PROPERTY_DESC_ELEMENT: &str = "PropertyDesc";
const HELP_ELEMENT: &str = "help";
const DEFAULTS_ELEMENT: &str = "Defaults";
const LABEL_ELEMENT: &str = "label";
const ENUMERATION_ELEMENT: &str = "enumeration";

/// Builds chunk descriptors from document trees.
///
/// `Defaults` subtrees are stored unresolved on their descriptor; they become
/// chunks only when the finished database is handed to
/// [`ChunkFactory::register_descriptors`](crate::factory::ChunkFactory::register_descriptors).
pub struct DescBuilder<'a> {
    diagnostics: &'a mut Diagnostics,
}

impl<'a> DescBuilder<'a> {
    pub fn new(diagnostics: &'a mut Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Append every descriptor found under `node` to `db`.
    pub fn build_chunk_desc_database(&mut self, db: &mut ChunkDescDB, node: &Node) {
        match node {
            Node::Document(children) | Node::Fragment(children) => {
                for child in children {
                    self.build_chunk_desc_database(db, child);
                }
            }
            Node::Element(element) if element.is_named(DESC_DB_ELEMENT) => {
                let before = db.len();
                for child in &element.children {
                    if let Some(desc) = self.build_chunk_desc(child) {
                        db.add(desc);
                    }
                }
                tracing::debug!(
                    "built {} chunk descriptors ({} diagnostics so far)",
                    db.len() - before,
                    self.diagnostics.len()
                );
            }
            Node::Element(element) => self.unrecognized(element),
            Node::Text(_)
            | Node::Comment(_)
            | Node::ProcessingInstruction { .. }
            | Node::Notation(_) => {}
            Node::Attribute(_) | Node::Other(_) => self.unexpected_node(node),
        }
    }

    /// Build a descriptor from a `ChunkDesc` element, or from the first child
    /// of a document or fragment.
    pub fn build_chunk_desc(&mut self, node: &Node) -> Option<ChunkDesc> {
        match node {
            Node::Document(_) | Node::Fragment(_) => {
                let child = node.first_child()?;
                self.build_chunk_desc(child)
            }
            Node::Element(element) if element.is_named(CHUNK_DESC_ELEMENT) => {
                self.build_chunk_desc_element(element)
            }
            Node::Element(element) => {
                self.unrecognized(element);
                None
            }
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

    fn build_chunk_desc_element(&mut self, element: &Element) -> Option<ChunkDesc> {
        let mut desc = ChunkDesc::default();
        let mut name = "";
        for attribute in &element.attributes {
            if attribute.name.eq_ignore_ascii_case("token") {
                desc.set_token(attribute.value.trim());
            } else if attribute.name.eq_ignore_ascii_case("name") {
                name = attribute.value.as_str();
            }
        }
        if desc.token().is_empty() {
            self.diagnostics.error(
                codes::MISSING_TOKEN,
                format!("ChunkDesc '{name}' has no token"),
            );
            return None;
        }
        let name = if name.trim().is_empty() {
            desc.token().to_string()
        } else {
            name.to_string()
        };
        desc.set_name(name);
        tracing::trace!("building ChunkDesc '{}'", desc.token());

        for child in &element.children {
            match child {
                Node::Element(child) => self.parse_chunk_desc_child_element(&mut desc, child),
                Node::Text(_)
                | Node::Comment(_)
                | Node::ProcessingInstruction { .. }
                | Node::Notation(_) => {}
                other => self.unexpected_node(other),
            }
        }
        Some(desc)
    }

    /// Apply one child element of a `ChunkDesc` to `desc`.
    pub fn parse_chunk_desc_child_element(&mut self, desc: &mut ChunkDesc, element: &Element) {
        if element.is_named(PROPERTY_DESC_ELEMENT) {
            let Some(prop_desc) = self.build_property_desc(element) else {
                return;
            };
            let token = prop_desc.token().to_string();
            if desc.add_property_desc(prop_desc).is_some() {
                self.diagnostics.warning(
                    codes::DUPLICATE_PROPERTY,
                    format!(
                        "ChunkDesc '{}' declares property '{token}' more than once; keeping the last",
                        desc.token()
                    ),
                );
            }
        } else if element.is_named(HELP_ELEMENT) {
            let help = self.help_text(element, desc.token());
            desc.set_help(help);
        } else if element.is_named(DEFAULTS_ELEMENT) {
            let mut templates = element.child_elements();
            if let Some(template) = templates.next() {
                desc.set_defaults(template.clone());
            }
            for extra in templates {
                self.diagnostics.warning(
                    codes::EXTRA_DEFAULT_CHUNK,
                    format!(
                        "ignoring extra default chunk '{}' in ChunkDesc '{}'",
                        extra.name,
                        desc.token()
                    ),
                );
            }
        } else {
            self.unrecognized(element);
        }
    }

    fn build_property_desc(&mut self, element: &Element) -> Option<PropertyDesc> {
        let mut prop_desc = PropertyDesc::default();
        let mut name = "";
        for attribute in &element.attributes {
            let value = attribute.value.as_str();
            match attribute.name.to_ascii_lowercase().as_str() {
                "token" => prop_desc.set_token(value.trim()),
                "name" => name = value,
                "type" => match ValType::from_token(value) {
                    Ok(val_type) => prop_desc.set_val_type(val_type),
                    Err(err) => {
                        self.diagnostics.error(
                            codes::UNKNOWN_VALUE_TYPE,
                            format!("PropertyDesc '{}': {err}", element_token(element)),
                        );
                        return None;
                    }
                },
                "num" => match NumValues::from_token(value) {
                    Ok(num_values) => prop_desc.set_num_values(num_values),
                    Err(err) => {
                        self.diagnostics.error(
                            codes::INVALID_NUM,
                            format!("PropertyDesc '{}': {err}", element_token(element)),
                        );
                        return None;
                    }
                },
                "userlevel" => {
                    if let Some(level) = UserLevel::from_token(value) {
                        prop_desc.set_user_level(level);
                    }
                }
                _ => {}
            }
        }
        if prop_desc.token().is_empty() {
            self.diagnostics
                .error(codes::MISSING_TOKEN, "PropertyDesc has no token");
            return None;
        }
        let name = if name.trim().is_empty() {
            prop_desc.token().to_string()
        } else {
            name.to_string()
        };
        prop_desc.set_name(name);

        for child in &element.children {
            match child {
                Node::Element(child) => self.parse_property_desc_child_element(&mut prop_desc, child),
                Node::Text(_)
                | Node::Comment(_)
                | Node::ProcessingInstruction { .. }
                | Node::Notation(_) => {}
                other => self.unexpected_node(other),
            }
        }
        Some(prop_desc)
    }

    /// Apply one child element of a `PropertyDesc` to `desc`.
    pub fn parse_property_desc_child_element(&mut self, desc: &mut PropertyDesc, element: &Element) {
        if element.is_named(LABEL_ELEMENT) {
            let mut label = "";
            for attribute in &element.attributes {
                if attribute.name.eq_ignore_ascii_case("name") {
                    label = attribute.value.as_str();
                } else {
                    self.unidentified_attribute(&attribute.name, "value label", desc.token());
                }
            }
            if !label.is_empty() {
                desc.append_value_label(label);
            }
        } else if element.is_named(ENUMERATION_ELEMENT) {
            let (mut label, mut value) = ("", "");
            for attribute in &element.attributes {
                if attribute.name.eq_ignore_ascii_case("name") {
                    label = attribute.value.as_str();
                } else if attribute.name.eq_ignore_ascii_case("value") {
                    value = attribute.value.as_str();
                } else {
                    self.unidentified_attribute(&attribute.name, "enumeration", desc.token());
                }
            }
            if !label.is_empty() {
                desc.append_enumeration(label, value);
            }
        } else if element.is_named(HELP_ELEMENT) {
            let help = self.help_text(element, desc.token());
            desc.set_help(help);
        } else {
            self.unrecognized(element);
        }
    }

    /// Concatenate the text children of a `help` element.
    fn help_text(&mut self, element: &Element, owner: &str) -> String {
        let mut help = String::new();
        for child in &element.children {
            match child {
                Node::Text(text) => help.push_str(text),
                other => self.diagnostics.warning(
                    codes::UNEXPECTED_CHILD,
                    format!(
                        "unexpected {:?} node '{}' in help text of '{owner}'",
                        other.kind(),
                        other.name()
                    ),
                ),
            }
        }
        help
    }

    fn unidentified_attribute(&mut self, name: &str, context: &str, owner: &str) {
        self.diagnostics.error(
            codes::UNIDENTIFIED_ATTRIBUTE,
            format!("unidentified attribute '{name}' in {context} of PropertyDesc '{owner}'"),
        );
    }

    fn unrecognized(&mut self, element: &Element) {
        self.diagnostics.warning(
            codes::UNRECOGNIZED_ELEMENT,
            format!("unrecognized element '{}'", element.name),
        );
    }

    fn unexpected_node(&mut self, node: &Node) {
        self.diagnostics.warning(
            codes::UNEXPECTED_NODE_KIND,
            format!("unexpected {:?} node '{}'", node.kind(), node.name()),
        );
    }
}

fn element_token(element: &Element) -> &str {
    element.attribute("token").unwrap_or("")
}
