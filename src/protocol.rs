//! Configuration command documents.
//!
//! A running application can be reconfigured by sending it documents whose
//! top-level elements are commands:
//!
//! ```xml
//! <apply_chunks>
//!   <ConfigChunkDB><Light name="desk" on="true"/></ConfigChunkDB>
//! </apply_chunks>
//! <request_current_chunks/>
//! ```
//!
//! This module turns such documents into [`ConfigCommand`]s; acting on them
//! is left to the caller.

use crate::builder::ChunkBuilder;
use crate::diagnostics::{Diagnostics, codes};
use crate::dom::{Element, Node, parse_document};
use crate::error::ConfigIoError;
use crate::factory::ChunkFactory;
use crate::model::ConfigChunkDB;

/// Protocol identifier of command documents (case-insensitive).
pub const PROTOCOL_NAME: &str = "xml_config";

/// Returns true if `id` names the command document protocol.
pub fn accepts_protocol(id: &str) -> bool {
    id.eq_ignore_ascii_case(PROTOCOL_NAME)
}

/// One command read from a command document.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigCommand {
    /// Add these chunks to the active configuration.
    ApplyChunks(ConfigChunkDB),
    /// Remove the chunks with these names from the active configuration.
    RemoveChunks(ConfigChunkDB),
    /// Send back the active chunk database.
    RequestCurrentChunks,
    /// Send back the registered descriptor database.
    RequestCurrentDescs,
}

/// Parse command document text and interpret it.
pub fn read_commands(
    source: &[u8],
    factory: &ChunkFactory,
) -> Result<(Vec<ConfigCommand>, Diagnostics), ConfigIoError> {
    let document = parse_document(source)?;
    let mut diagnostics = Diagnostics::new();
    let commands = interpret_commands(&document, factory, &mut diagnostics);
    Ok((commands, diagnostics))
}

/// Interpret every command element under `node`, in document order.
pub fn interpret_commands(
    node: &Node,
    factory: &ChunkFactory,
    diagnostics: &mut Diagnostics,
) -> Vec<ConfigCommand> {
    let mut commands = Vec::new();
    collect_commands(node, factory, diagnostics, &mut commands);
    tracing::debug!("interpreted {} configuration commands", commands.len());
    commands
}

fn collect_commands(
    node: &Node,
    factory: &ChunkFactory,
    diagnostics: &mut Diagnostics,
    commands: &mut Vec<ConfigCommand>,
) {
    match node {
        Node::Document(children) | Node::Fragment(children) => {
            for child in children {
                collect_commands(child, factory, diagnostics, commands);
            }
        }
        Node::Element(element) => {
            if let Some(command) = interpret_element(element, factory, diagnostics) {
                commands.push(command);
            }
        }
        _ => {}
    }
}

fn interpret_element(
    element: &Element,
    factory: &ChunkFactory,
    diagnostics: &mut Diagnostics,
) -> Option<ConfigCommand> {
    let name = element.name.to_ascii_lowercase();
    match name.as_str() {
        "apply_chunks" => Some(ConfigCommand::ApplyChunks(chunks_of(
            element,
            factory,
            diagnostics,
        ))),
        "remove_chunks" => Some(ConfigCommand::RemoveChunks(chunks_of(
            element,
            factory,
            diagnostics,
        ))),
        "request_current_chunks" => Some(ConfigCommand::RequestCurrentChunks),
        "request_current_descs" => Some(ConfigCommand::RequestCurrentDescs),
        "remove_descs" => {
            tracing::debug!("refusing remove_descs command");
            None
        }
        _ => {
            diagnostics.warning(
                codes::UNRECOGNIZED_ELEMENT,
                format!("unrecognized command '{}'", element.name),
            );
            None
        }
    }
}

fn chunks_of(
    element: &Element,
    factory: &ChunkFactory,
    diagnostics: &mut Diagnostics,
) -> ConfigChunkDB {
    let mut db = ConfigChunkDB::new();
    let mut builder = ChunkBuilder::new(factory, diagnostics);
    for child in &element.children {
        builder.build_chunk_database(&mut db, child);
    }
    db
}
