//! Chunk instances and chunk databases.

use std::sync::Arc;

use indexmap::IndexMap;

use super::Property;
use crate::schema::ChunkDesc;
use crate::value::VarValue;

/// A named instance of a chunk type.
///
/// Chunks are created through [`ChunkFactory`](crate::factory::ChunkFactory),
/// which binds them to their descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigChunk {
    desc: Arc<ChunkDesc>,
    name: String,
    /// Keyed by lowercased property token.
    properties: IndexMap<String, Property>,
}

impl ConfigChunk {
    /// Create a chunk named after its type.
    ///
    /// With `populate` set, every property the descriptor declares is created
    /// up front; otherwise properties appear as they are first written.
    pub(crate) fn new(desc: Arc<ChunkDesc>, populate: bool) -> Self {
        let mut chunk = Self {
            name: desc.token().to_string(),
            desc,
            properties: IndexMap::new(),
        };
        if populate {
            for prop_desc in chunk.desc.property_descs() {
                chunk.properties.insert(
                    prop_desc.token().to_ascii_lowercase(),
                    Property::new(Arc::clone(prop_desc)),
                );
            }
        }
        chunk
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn desc(&self) -> &Arc<ChunkDesc> {
        &self.desc
    }

    /// Token of this chunk's type.
    pub fn desc_token(&self) -> &str {
        self.desc.token()
    }

    /// Look up a property by token (case-insensitive).
    pub fn property(&self, token: &str) -> Option<&Property> {
        self.properties.get(token.to_ascii_lowercase().as_str())
    }

    /// Look up a property for writing, creating it if the descriptor declares
    /// the token but the chunk does not hold it yet.
    pub fn property_mut(&mut self, token: &str) -> Option<&mut Property> {
        let key = token.to_ascii_lowercase();
        if !self.properties.contains_key(key.as_str()) {
            let prop_desc = self.desc.property_desc(token)?;
            let property = Property::new(Arc::clone(prop_desc));
            self.properties.insert(key.clone(), property);
        }
        self.properties.get_mut(key.as_str())
    }

    /// A single value, by property token and slot.
    pub fn value(&self, token: &str, index: usize) -> Option<&VarValue> {
        self.property(token)?.value(index)
    }

    /// Properties held by this chunk, in descriptor declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.desc
            .property_descs()
            .iter()
            .filter_map(|prop_desc| self.property(prop_desc.token()))
    }

    /// Copy every property of `template` over this chunk's properties.
    pub(crate) fn apply_defaults(&mut self, template: &ConfigChunk) {
        for (key, property) in &template.properties {
            self.properties.insert(key.clone(), property.clone());
        }
    }
}

/// An ordered collection of chunks.
///
/// Insertion order is kept and is the order chunks are written in. Names are
/// not required to be unique; lookups return the first match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigChunkDB {
    chunks: Vec<ConfigChunk>,
}

impl ConfigChunkDB {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, chunk: ConfigChunk) {
        self.chunks.push(chunk);
    }

    /// Look up a chunk by instance name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&ConfigChunk> {
        self.chunks
            .iter()
            .find(|chunk| chunk.name().eq_ignore_ascii_case(name))
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ConfigChunk> {
        self.chunks
            .iter_mut()
            .find(|chunk| chunk.name().eq_ignore_ascii_case(name))
    }

    /// Remove the first chunk with the given name.
    pub fn remove(&mut self, name: &str) -> Option<ConfigChunk> {
        let index = self
            .chunks
            .iter()
            .position(|chunk| chunk.name().eq_ignore_ascii_case(name))?;
        Some(self.chunks.remove(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigChunk> {
        self.chunks.iter()
    }

    /// Chunk names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().map(|chunk| chunk.name())
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn clear(&mut self) {
        self.chunks.clear();
    }
}

impl<'a> IntoIterator for &'a ConfigChunkDB {
    type Item = &'a ConfigChunk;
    type IntoIter = std::slice::Iter<'a, ConfigChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.iter()
    }
}

impl IntoIterator for ConfigChunkDB {
    type Item = ConfigChunk;
    type IntoIter = std::vec::IntoIter<ConfigChunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks.into_iter()
    }
}

impl Extend<ConfigChunk> for ConfigChunkDB {
    fn extend<T: IntoIterator<Item = ConfigChunk>>(&mut self, iter: T) {
        self.chunks.extend(iter);
    }
}
