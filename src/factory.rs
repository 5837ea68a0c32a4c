//! Chunk factory: the descriptor registry chunks are created against.
//!
//! Registration is two-phase. Every descriptor of a database is registered
//! first; only then are the stashed `Defaults` templates built into chunks,
//! so a template may refer to any descriptor of the same database
//! regardless of declaration order.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::builder::ChunkBuilder;
use crate::diagnostics::{Diagnostics, codes};
use crate::error::{ConfigError, ConfigIoError};
use crate::model::ConfigChunk;
use crate::schema::{ChunkDesc, ChunkDescDB};

/// Registry of chunk descriptors and their resolved default chunks.
#[derive(Clone, Debug, Default)]
pub struct ChunkFactory {
    /// Keyed by lowercased descriptor token.
    descs: FxHashMap<String, Arc<ChunkDesc>>,
    /// Resolved `Defaults` templates, same keys.
    defaults: FxHashMap<String, ConfigChunk>,
}

impl ChunkFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory holding every descriptor of `db`.
    pub fn with_descriptors(db: &ChunkDescDB) -> (Self, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut factory = Self::new();
        factory.register_descriptors(db, &mut diagnostics);
        (factory, diagnostics)
    }

    /// Create a factory from descriptor database text.
    pub fn from_descriptor_source(source: &[u8]) -> Result<(Self, Diagnostics), ConfigIoError> {
        let (db, mut diagnostics) = crate::io::read_descriptor_database(source)?;
        let mut factory = Self::new();
        factory.register_descriptors(&db, &mut diagnostics);
        Ok((factory, diagnostics))
    }

    /// Register every descriptor of `db`, replacing earlier registrations
    /// with the same token, then resolve their default templates.
    pub fn register_descriptors(&mut self, db: &ChunkDescDB, diagnostics: &mut Diagnostics) {
        for desc in db {
            let key = desc.token().to_ascii_lowercase();
            self.defaults.remove(&key);
            self.descs.insert(key, Arc::clone(desc));
        }

        let mut resolved = Vec::new();
        {
            let mut builder = ChunkBuilder::new(self, diagnostics);
            for desc in db {
                let Some(template) = desc.defaults() else {
                    continue;
                };
                let Some(chunk) = builder.build_chunk_element(template, false) else {
                    continue;
                };
                resolved.push((Arc::clone(desc), chunk));
            }
        }

        for (desc, chunk) in resolved {
            // Compare the registered descriptor, not just the token: a later
            // descriptor in `db` with the same token replaces an earlier one.
            let registered = self.desc(desc.token()).is_some_and(|d| Arc::ptr_eq(d, &desc));
            if !registered {
                continue;
            }
            if !Arc::ptr_eq(chunk.desc(), &desc) {
                diagnostics.warning(
                    codes::DEFAULT_TYPE_MISMATCH,
                    format!(
                        "default chunk for '{}' has type '{}'",
                        desc.token(),
                        chunk.desc_token()
                    ),
                );
                continue;
            }
            self.defaults.insert(desc.token().to_ascii_lowercase(), chunk);
        }

        tracing::debug!(
            "registered {} chunk descriptors ({} with defaults)",
            self.descs.len(),
            self.defaults.len()
        );
    }

    /// Create a chunk of the given type.
    ///
    /// With `use_defaults`, the chunk holds every declared property and the
    /// type's default values; otherwise it starts without properties.
    pub fn create_chunk(&self, token: &str, use_defaults: bool) -> Result<ConfigChunk, ConfigError> {
        let key = token.to_ascii_lowercase();
        let desc = self
            .descs
            .get(&key)
            .ok_or_else(|| ConfigError::UnknownChunkType(token.to_string()))?;

        let mut chunk = ConfigChunk::new(Arc::clone(desc), use_defaults);
        if use_defaults {
            if let Some(defaults) = self.defaults.get(&key) {
                chunk.apply_defaults(defaults);
            }
        }
        Ok(chunk)
    }

    /// Look up a descriptor by token (case-insensitive).
    pub fn desc(&self, token: &str) -> Option<&Arc<ChunkDesc>> {
        self.descs.get(&token.to_ascii_lowercase())
    }

    /// The resolved default chunk of a type, if it declares one.
    pub fn default_chunk(&self, token: &str) -> Option<&ConfigChunk> {
        self.defaults.get(&token.to_ascii_lowercase())
    }

    /// Registered descriptors, in no particular order.
    pub fn descs(&self) -> impl Iterator<Item = &Arc<ChunkDesc>> {
        self.descs.values()
    }

    pub fn len(&self) -> usize {
        self.descs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }
}
