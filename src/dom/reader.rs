//! XML text → document tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{Attribute, Element, Node};
use crate::error::ConfigIoError;

/// Parse raw XML into a [`Node::Document`].
///
/// Whitespace between top-level nodes is dropped; whitespace inside elements
/// is kept as text nodes. Any XML syntax error is returned as a single
/// failure and no partial tree is produced.
pub fn parse_document(input: &[u8]) -> Result<Node, ConfigIoError> {
    DocumentReader::default().read(input)
}

/// Builds the tree from the event stream, keeping open elements on a stack.
#[derive(Default)]
struct DocumentReader {
    open: Vec<Element>,
    top: Vec<Node>,
}

impl DocumentReader {
    fn read(mut self, input: &[u8]) -> Result<Node, ConfigIoError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();

        loop {
            let event = reader
                .read_event_into(&mut buf)
                .map_err(|e| ConfigIoError::xml_at(reader.error_position(), e.to_string()))?;

            match event {
                Event::Start(ref e) => {
                    let element = element_from_start(e)?;
                    self.open.push(element);
                }
                Event::Empty(ref e) => {
                    let element = element_from_start(e)?;
                    self.append(Node::Element(element));
                }
                Event::End(ref e) => {
                    let closing = std::str::from_utf8(e.name().as_ref())
                        .map_err(ConfigIoError::utf8)?
                        .to_string();
                    let element = self.open.pop().ok_or_else(|| {
                        ConfigIoError::UnbalancedDocument(format!(
                            "closing tag '{closing}' has no matching start tag"
                        ))
                    })?;
                    self.append(Node::Element(element));
                }
                Event::Text(ref e) => {
                    let text = e.unescape().map_err(|e| {
                        ConfigIoError::xml_at(reader.buffer_position(), e.to_string())
                    })?;
                    self.append_text(&text);
                }
                Event::CData(ref e) => {
                    let text = std::str::from_utf8(e).map_err(ConfigIoError::utf8)?;
                    self.append_text(text);
                }
                Event::Comment(ref e) => {
                    let text = std::str::from_utf8(e).map_err(ConfigIoError::utf8)?;
                    self.append(Node::Comment(text.to_string()));
                }
                Event::PI(ref e) => {
                    let target = std::str::from_utf8(e.target()).map_err(ConfigIoError::utf8)?;
                    let data = std::str::from_utf8(e.content()).map_err(ConfigIoError::utf8)?;
                    self.append(Node::ProcessingInstruction {
                        target: target.to_string(),
                        data: data.trim().to_string(),
                    });
                }
                Event::DocType(ref e) => {
                    let text = std::str::from_utf8(e).map_err(ConfigIoError::utf8)?;
                    self.append(Node::Other(text.trim().to_string()));
                }
                Event::Eof => break,
                // The XML declaration is not part of the tree.
                _ => {}
            }
            buf.clear();
        }

        if let Some(unclosed) = self.open.last() {
            return Err(ConfigIoError::UnbalancedDocument(format!(
                "element '{}' is never closed",
                unclosed.name
            )));
        }

        tracing::trace!("parsed document with {} top-level nodes", self.top.len());
        Ok(Node::Document(self.top))
    }

    fn append(&mut self, node: Node) {
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.top.push(node),
        }
    }

    /// Append text, merging with a directly preceding text node.
    fn append_text(&mut self, text: &str) {
        let siblings = match self.open.last_mut() {
            Some(parent) => &mut parent.children,
            None if text.trim().is_empty() => return,
            None => &mut self.top,
        };
        match siblings.last_mut() {
            Some(Node::Text(previous)) => previous.push_str(text),
            _ => siblings.push(Node::Text(text.to_string())),
        }
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element, ConfigIoError> {
    let qname = e.name();
    let name = std::str::from_utf8(qname.as_ref())
        .map_err(|e| ConfigIoError::xml(format!("Invalid tag name: {e}")))?;
    let mut element = Element::new(name);

    for attr_result in e.attributes() {
        let attr =
            attr_result.map_err(|e| ConfigIoError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ConfigIoError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ConfigIoError::xml(format!("Attribute value error: {e}")))?;
        element.attributes.push(Attribute::new(key, value.into_owned()));
    }

    Ok(element)
}
