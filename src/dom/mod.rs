//! In-memory document tree.
//!
//! The tree builders walk this structure rather than raw XML events. Every
//! node is one variant of the closed [`Node`] type, so the builders can
//! match on the node kind exhaustively.
//!
//! ```text
//! Node::Document
//! └── Node::Element  ConfigChunkDB
//!     ├── Node::Text     "\n  "
//!     ├── Node::Comment  " displays "
//!     └── Node::Element  Display  [name="main"]
//!         └── Node::Element  size
//!             └── Node::Text  "640 480"
//! ```

mod reader;
mod writer;

pub use reader::parse_document;
pub use writer::write_document;

/// The structural kind of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    DocumentFragment,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
    Notation,
    /// Anything else the parser surfaces (document type declarations).
    Other,
}

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Document(Vec<Node>),
    Fragment(Vec<Node>),
    Element(Element),
    Attribute(Attribute),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: String },
    Notation(String),
    Other(String),
}

impl Node {
    /// Create a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Document(_) => NodeKind::Document,
            Self::Fragment(_) => NodeKind::DocumentFragment,
            Self::Element(_) => NodeKind::Element,
            Self::Attribute(_) => NodeKind::Attribute,
            Self::Text(_) => NodeKind::Text,
            Self::Comment(_) => NodeKind::Comment,
            Self::ProcessingInstruction { .. } => NodeKind::ProcessingInstruction,
            Self::Notation(_) => NodeKind::Notation,
            Self::Other(_) => NodeKind::Other,
        }
    }

    /// The node name, using the `#text`-style names for unnamed kinds.
    pub fn name(&self) -> &str {
        match self {
            Self::Document(_) => "#document",
            Self::Fragment(_) => "#document-fragment",
            Self::Element(element) => &element.name,
            Self::Attribute(attribute) => &attribute.name,
            Self::Text(_) => "#text",
            Self::Comment(_) => "#comment",
            Self::ProcessingInstruction { target, .. } => target,
            Self::Notation(name) => name,
            Self::Other(_) => "#other",
        }
    }

    /// The node value: text content, attribute value or instruction data.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Attribute(attribute) => Some(&attribute.value),
            Self::Text(text) | Self::Comment(text) | Self::Other(text) => Some(text),
            Self::ProcessingInstruction { data, .. } => Some(data),
            Self::Document(_) | Self::Fragment(_) | Self::Element(_) | Self::Notation(_) => None,
        }
    }

    /// Child nodes in document order. Leaf kinds have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Document(children) | Self::Fragment(children) => children,
            Self::Element(element) => &element.children,
            _ => &[],
        }
    }

    pub fn first_child(&self) -> Option<&Node> {
        self.children().first()
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns true for text nodes holding only whitespace.
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// An element with its attributes and children.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    /// Attributes in document order.
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push_attribute(name, value);
        self
    }

    /// Add a child node (builder style).
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Add text content (builder style).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn push_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.push(Attribute::new(name, value));
    }

    pub fn push_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Case-insensitive name comparison.
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Look up an attribute value by name (case-insensitive).
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case(name))
            .map(|attribute| attribute.value.as_str())
    }

    /// Child elements, skipping text, comments and the rest.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }
}

/// A name/value attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
