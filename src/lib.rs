//! # jccl
//!
//! Schema-governed configuration chunks and their XML interchange.
//!
//! A *chunk* is a named, typed bag of properties. What properties a chunk
//! type may hold, with which value types and counts, is described by a
//! *chunk descriptor*. This crate converts between XML documents and the
//! two kinds of database ([`ConfigChunkDB`], [`ChunkDescDB`]), reporting
//! bad input as [`Diagnostics`] instead of failing.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! io, protocol → Read/write entry points, command documents
//!   ↓
//! builder      → Tree → databases (ChunkBuilder, DescBuilder)
//! writer       → Databases → tree → text
//!   ↓
//! factory      → Descriptor registry, resolved default chunks
//!   ↓
//! model        → ConfigChunk, Property, ConfigChunkDB
//! schema       → ChunkDesc, PropertyDesc, ChunkDescDB
//! value        → ValType, VarValue
//!   ↓
//! dom, text    → Document tree (quick-xml), tokenizer, escaping
//! diagnostics, error
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use jccl::{ChunkFactory, VarValue};
//!
//! let (factory, _) = ChunkFactory::from_descriptor_source(
//!     br#"<ChunkDescDB>
//!           <ChunkDesc token="Display">
//!             <PropertyDesc token="size" type="int" num="2"/>
//!           </ChunkDesc>
//!         </ChunkDescDB>"#,
//! )?;
//!
//! let (db, diagnostics) = jccl::io::read_chunk_database(
//!     br#"<ConfigChunkDB><Display name="main" size="640 480"/></ConfigChunkDB>"#,
//!     &factory,
//! )?;
//! assert!(diagnostics.is_empty());
//! assert_eq!(db.get("main").and_then(|c| c.value("size", 1)), Some(&VarValue::Int(480)));
//!
//! let (text, _) = jccl::io::write_chunk_database(&db)?;
//! assert!(text.contains("<size>640 480</size>"));
//! # Ok::<(), jccl::ConfigIoError>(())
//! ```

// ============================================================================
// MODULES (dependency order: text → dom → value/schema/model → factory → builder/writer → io)
// ============================================================================

/// Error types: model errors and read/write failures
pub mod error;

/// Diagnostics collector and codes
pub mod diagnostics;

/// Value tokenizer and XML escaping
pub mod text;

/// Document tree and its XML reader/writer
pub mod dom;

/// Value types and typed values
pub mod value;

/// Chunk and property descriptors
pub mod schema;

/// Chunk and property instances
pub mod model;

/// Descriptor registry that creates chunks
pub mod factory;

/// Tree → database builders
pub mod builder;

/// Database → tree → text serializer
pub mod writer;

/// Read/write entry points and file helpers
pub mod io;

/// Configuration command documents
pub mod protocol;

// Re-export commonly needed items
pub use builder::{BuildOptions, ChunkBuilder, DescBuilder};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use error::{ConfigError, ConfigIoError};
pub use factory::ChunkFactory;
pub use model::{ConfigChunk, ConfigChunkDB, Property};
pub use schema::{ChunkDesc, ChunkDescDB, EnumEntry, NumValues, PropertyDesc, UserLevel};
pub use value::{ValType, VarValue};
pub use writer::WriteOptions;
