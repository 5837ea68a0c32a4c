//! Reading and writing databases as text.
//!
//! `read_*` functions return a best-effort database together with the
//! warnings and errors met while building it; they fail outright only when
//! the source is not a well-formed document. `load_*` functions fold that
//! failure into the diagnostics as a single [`Severity::Failure`] entry and
//! return no database. Writing a chunk database reports values that would
//! not read back unchanged, in the same diagnostics form.
//!
//! [`Severity::Failure`]: crate::diagnostics::Severity::Failure
//!
//! ## Example
//!
//! ```
//! use jccl::ChunkFactory;
//! use jccl::io::read_chunk_database;
//!
//! let (factory, _) = ChunkFactory::from_descriptor_source(
//!     br#"<ChunkDescDB><ChunkDesc token="Light">
//!           <PropertyDesc token="on" type="bool"/>
//!         </ChunkDesc></ChunkDescDB>"#,
//! )?;
//! let (db, diagnostics) = read_chunk_database(
//!     br#"<ConfigChunkDB><Light name="desk" on="true"/></ConfigChunkDB>"#,
//!     &factory,
//! )?;
//! assert!(diagnostics.is_empty());
//! assert_eq!(db.get("desk").and_then(|c| c.value("on", 0)).and_then(|v| v.as_bool()), Some(true));
//! # Ok::<(), jccl::ConfigIoError>(())
//! ```

use std::path::Path;

use crate::builder::{BuildOptions, ChunkBuilder, DescBuilder};
use crate::diagnostics::Diagnostics;
use crate::dom::parse_document;
use crate::error::ConfigIoError;
use crate::factory::ChunkFactory;
use crate::model::ConfigChunkDB;
use crate::schema::ChunkDescDB;
use crate::writer::{self, WriteOptions};

// ============================================================================
// READING
// ============================================================================

/// Build a chunk database from document text.
pub fn read_chunk_database(
    source: &[u8],
    factory: &ChunkFactory,
) -> Result<(ConfigChunkDB, Diagnostics), ConfigIoError> {
    read_chunk_database_with(source, factory, BuildOptions::default())
}

/// Build a chunk database from document text with explicit build options.
pub fn read_chunk_database_with(
    source: &[u8],
    factory: &ChunkFactory,
    options: BuildOptions,
) -> Result<(ConfigChunkDB, Diagnostics), ConfigIoError> {
    let document = parse_document(source)?;
    let mut diagnostics = Diagnostics::new();
    let mut db = ConfigChunkDB::new();
    ChunkBuilder::new(factory, &mut diagnostics)
        .with_options(options)
        .build_chunk_database(&mut db, &document);
    Ok((db, diagnostics))
}

/// Build a descriptor database from document text.
///
/// `Defaults` templates stay unresolved until the database is registered
/// with a [`ChunkFactory`].
pub fn read_descriptor_database(
    source: &[u8],
) -> Result<(ChunkDescDB, Diagnostics), ConfigIoError> {
    let document = parse_document(source)?;
    let mut diagnostics = Diagnostics::new();
    let mut db = ChunkDescDB::new();
    DescBuilder::new(&mut diagnostics).build_chunk_desc_database(&mut db, &document);
    Ok((db, diagnostics))
}

// ============================================================================
// WRITING
// ============================================================================

/// Serialize a chunk database with the default options.
pub fn write_chunk_database(db: &ConfigChunkDB) -> Result<(String, Diagnostics), ConfigIoError> {
    writer::write_chunk_database(db, &WriteOptions::default())
}

/// Serialize a descriptor database with the default options.
pub fn write_descriptor_database(db: &ChunkDescDB) -> Result<String, ConfigIoError> {
    writer::write_descriptor_database(db, &WriteOptions::default())
}

// ============================================================================
// FILES
// ============================================================================

/// Read a chunk database file.
///
/// On an I/O or parse failure the database is `None` and the diagnostics
/// hold a failure entry.
pub fn load_chunk_database(
    path: impl AsRef<Path>,
    factory: &ChunkFactory,
) -> (Option<ConfigChunkDB>, Diagnostics) {
    let path = path.as_ref();
    let result = std::fs::read(path)
        .map_err(ConfigIoError::from)
        .and_then(|bytes| read_chunk_database(&bytes, factory));
    fold_failure(path, result)
}

/// Read a descriptor database file.
///
/// On an I/O or parse failure the database is `None` and the diagnostics
/// hold a failure entry.
pub fn load_descriptor_database(path: impl AsRef<Path>) -> (Option<ChunkDescDB>, Diagnostics) {
    let path = path.as_ref();
    let result = std::fs::read(path)
        .map_err(ConfigIoError::from)
        .and_then(|bytes| read_descriptor_database(&bytes));
    fold_failure(path, result)
}

/// Write a chunk database file, replacing any existing file.
pub fn save_chunk_database(
    path: impl AsRef<Path>,
    db: &ConfigChunkDB,
) -> Result<Diagnostics, ConfigIoError> {
    let (text, diagnostics) = write_chunk_database(db)?;
    std::fs::write(path, text)?;
    Ok(diagnostics)
}

/// Write a descriptor database file, replacing any existing file.
pub fn save_descriptor_database(
    path: impl AsRef<Path>,
    db: &ChunkDescDB,
) -> Result<(), ConfigIoError> {
    std::fs::write(path, write_descriptor_database(db)?)?;
    Ok(())
}

fn fold_failure<T>(
    path: &Path,
    result: Result<(T, Diagnostics), ConfigIoError>,
) -> (Option<T>, Diagnostics) {
    match result {
        Ok((db, diagnostics)) => {
            tracing::debug!(
                "loaded {} with {} diagnostics",
                path.display(),
                diagnostics.len()
            );
            (Some(db), diagnostics)
        }
        Err(err) => {
            let mut diagnostics = Diagnostics::new();
            diagnostics.failure(format!("cannot read {}", path.display()), err);
            (None, diagnostics)
        }
    }
}
