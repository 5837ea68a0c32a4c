//! Document tree → XML text.

use std::io::Write;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use super::{Element, Node};
use crate::error::ConfigIoError;
use crate::text::{escape_attribute, escape_text};
use crate::writer::WriteOptions;

/// Serialize a tree as XML text.
///
/// Whitespace-only text nodes are not written; indentation comes from
/// `options` instead. Attribute and standalone node kinds that have no
/// textual position of their own are skipped.
pub fn write_document(node: &Node, options: &WriteOptions) -> Result<String, ConfigIoError> {
    let mut writer = if options.indent > 0 {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    } else {
        Writer::new(Vec::new())
    };

    if options.xml_declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| ConfigIoError::xml(format!("Write error: {e}")))?;
    }

    write_node(&mut writer, node)?;

    let mut output = writer.into_inner();
    output.push(b'\n');
    String::from_utf8(output).map_err(ConfigIoError::utf8)
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<(), ConfigIoError> {
    match node {
        Node::Document(children) | Node::Fragment(children) => {
            for child in children {
                write_node(writer, child)?;
            }
            Ok(())
        }
        Node::Element(element) => write_element(writer, element),
        Node::Text(text) if text.trim().is_empty() => Ok(()),
        Node::Text(text) => emit(writer, Event::Text(BytesText::from_escaped(escape_text(text)))),
        Node::Comment(text) => emit(writer, Event::Comment(BytesText::from_escaped(text.as_str()))),
        Node::ProcessingInstruction { target, data } => {
            emit(writer, Event::PI(BytesPI::new(format!("{target} {data}"))))
        }
        Node::Attribute(_) | Node::Notation(_) | Node::Other(_) => {
            tracing::trace!("skipping {:?} node while writing", node.kind());
            Ok(())
        }
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), ConfigIoError> {
    let mut start = BytesStart::new(element.name.as_str());
    for attribute in &element.attributes {
        let value = escape_attribute(&attribute.value);
        start.push_attribute((attribute.name.as_bytes(), value.as_bytes()));
    }

    if element.children.iter().all(Node::is_blank_text) {
        return emit(writer, Event::Empty(start));
    }

    emit(writer, Event::Start(start))?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    emit(writer, Event::End(BytesEnd::new(element.name.as_str())))
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<(), ConfigIoError> {
    writer
        .write_event(event)
        .map_err(|e| ConfigIoError::xml(format!("Write error: {e}")))
}
