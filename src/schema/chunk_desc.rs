//! Chunk descriptors and descriptor databases.

use std::sync::Arc;

use super::PropertyDesc;
use crate::dom::Element;

/// Schema for a chunk type.
///
/// Property descriptors are kept in declaration order, which is also the
/// order chunk properties are created and written in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkDesc {
    token: String,
    name: String,
    properties: Vec<Arc<PropertyDesc>>,
    help: String,
    /// Template for default values, kept as an unresolved subtree until every
    /// descriptor it may refer to has been registered.
    defaults: Option<Element>,
}

impl ChunkDesc {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            ..Self::default()
        }
    }

    /// Add a property descriptor (builder style).
    pub fn with_property(mut self, desc: PropertyDesc) -> Self {
        self.add_property_desc(desc);
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = token.into();
    }

    /// Display name, falling back to the token when unset.
    pub fn name(&self) -> &str {
        if self.name.is_empty() { &self.token } else { &self.name }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn set_help(&mut self, help: impl Into<String>) {
        self.help = help.into();
    }

    /// Property descriptors in declaration order.
    pub fn property_descs(&self) -> &[Arc<PropertyDesc>] {
        &self.properties
    }

    /// Look up a property descriptor by token (case-insensitive).
    pub fn property_desc(&self, token: &str) -> Option<&Arc<PropertyDesc>> {
        self.properties
            .iter()
            .find(|desc| desc.token().eq_ignore_ascii_case(token))
    }

    /// Add a property descriptor.
    ///
    /// A descriptor whose token is already present replaces the earlier one
    /// in place; the replaced descriptor is returned.
    pub fn add_property_desc(&mut self, desc: PropertyDesc) -> Option<Arc<PropertyDesc>> {
        let desc = Arc::new(desc);
        match self
            .properties
            .iter_mut()
            .find(|existing| existing.token().eq_ignore_ascii_case(desc.token()))
        {
            Some(existing) => Some(std::mem::replace(existing, desc)),
            None => {
                self.properties.push(desc);
                None
            }
        }
    }

    /// The unresolved default-values subtree, if any.
    pub fn defaults(&self) -> Option<&Element> {
        self.defaults.as_ref()
    }

    pub fn set_defaults(&mut self, template: Element) {
        self.defaults = Some(template);
    }
}

/// An ordered collection of chunk descriptors.
///
/// The collection does not enforce unique tokens; lookups return the first
/// match.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChunkDescDB {
    descs: Vec<Arc<ChunkDesc>>,
}

impl ChunkDescDB {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, desc: ChunkDesc) {
        self.descs.push(Arc::new(desc));
    }

    /// Look up a descriptor by token (case-insensitive).
    pub fn get(&self, token: &str) -> Option<&Arc<ChunkDesc>> {
        self.descs
            .iter()
            .find(|desc| desc.token().eq_ignore_ascii_case(token))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<ChunkDesc>> {
        self.descs.iter()
    }

    /// Descriptor tokens in insertion order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.descs.iter().map(|desc| desc.token())
    }

    pub fn len(&self) -> usize {
        self.descs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descs.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChunkDescDB {
    type Item = &'a Arc<ChunkDesc>;
    type IntoIter = std::slice::Iter<'a, Arc<ChunkDesc>>;

    fn into_iter(self) -> Self::IntoIter {
        self.descs.iter()
    }
}
