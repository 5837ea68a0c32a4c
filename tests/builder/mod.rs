//! Tree builder tests
//!
//! Chunk and descriptor databases built from whole documents:
//! - Type dispatch and unknown chunk types
//! - Property population from attributes and child elements
//! - Multi-value text, enumerations and literal fallback
//! - Defaults and embedded chunks
//! - Serialize/rebuild round trips

pub mod tests_chunks;
pub mod tests_roundtrip;
pub mod tests_values;
