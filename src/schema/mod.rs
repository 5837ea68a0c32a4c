//! Schema model: what properties each chunk type may hold.
//!
//! ```text
//! ChunkDescDB
//! └── ChunkDesc (token, name, help, defaults template)
//!     └── PropertyDesc (token, type, count, enumerations, labels, help)
//! ```

mod chunk_desc;
mod property_desc;

pub use chunk_desc::{ChunkDesc, ChunkDescDB};
pub use property_desc::{EnumEntry, NumValues, PropertyDesc, UserLevel};
