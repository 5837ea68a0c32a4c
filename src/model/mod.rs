//! Instance model: chunks and their property values.
//!
//! ```text
//! ConfigChunkDB
//! └── ConfigChunk (name, → ChunkDesc)
//!     └── Property (→ PropertyDesc)
//!         └── VarValue*   (an embedded chunk value owns a nested ConfigChunk)
//! ```

mod chunk;
mod property;

pub use chunk::{ConfigChunk, ConfigChunkDB};
pub use property::Property;
