//! Output options

/// Options for writing databases as text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces per nesting level (0 writes everything on one line)
    pub indent: usize,
    /// Start the output with an `<?xml ...?>` declaration
    pub xml_declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            xml_declaration: true,
        }
    }
}

impl WriteOptions {
    /// Options for a single-line fragment without declaration
    pub fn compact() -> Self {
        Self {
            indent: 0,
            xml_declaration: false,
        }
    }
}
