//! Tree builders: document trees → chunk and descriptor databases.
//!
//! Both builders walk a [`Node`](crate::dom::Node) tree recursively,
//! dispatching on the node kind and on case-insensitive element names.
//! Unexpected input is reported to a [`Diagnostics`](crate::diagnostics::Diagnostics)
//! collector and skipped; a builder never aborts a pass.
//!
//! ```text
//! ConfigChunkDB ─┬─ <ChunkType name=".." prop="..">     ChunkBuilder
//!                │     ├── <prop>values</prop>
//!                │     └── <embedded><ChunkType/></embedded>
//! ChunkDescDB ───┴─ <ChunkDesc token="..">              DescBuilder
//!                      ├── <PropertyDesc token type num userlevel>
//!                      │     ├── <label/> <enumeration/> <help/>
//!                      ├── <help/>
//!                      └── <Defaults><ChunkType/></Defaults>
//! ```

mod chunks;
mod descs;
mod values;

pub use chunks::ChunkBuilder;
pub use descs::DescBuilder;
pub use values::parse_text_values;

/// Options for building chunk databases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Create chunks pre-populated with every declared property and the
    /// type's default values.
    pub use_defaults: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { use_defaults: true }
    }
}
