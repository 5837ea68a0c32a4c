//! Diagnostics: non-fatal problem reporting for build passes.
//!
//! Builders never stop on bad input. Every problem they meet is recorded
//! here and the offending node is skipped; only lower-layer read failures
//! end a pass, and those are recorded as [`Severity::Failure`].

use std::fmt;
use std::sync::Arc;

use crate::error::ConfigIoError;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// Input was ignored; the build continued unchanged.
    Warning,
    /// The chunk, property or descriptor being built was abandoned.
    Error,
    /// The source could not be read at all.
    Failure,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Failure => "failure",
        })
    }
}

/// One recorded problem.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Stable code from [`codes`].
    pub code: &'static str,
    /// The diagnostic message.
    pub message: Arc<str>,
    /// Underlying cause, set for failures.
    pub cause: Option<Arc<ConfigIoError>>,
}

impl Diagnostic {
    /// Create a new warning diagnostic.
    pub fn warning(code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Create a new error diagnostic.
    pub fn error(code: &'static str, message: impl Into<Arc<str>>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            cause: None,
        }
    }

    /// Create a failure diagnostic wrapping the error that ended the read.
    pub fn failure(message: impl Into<Arc<str>>, cause: ConfigIoError) -> Self {
        Self {
            severity: Severity::Failure,
            code: codes::READ_FAILURE,
            message: message.into(),
            cause: Some(Arc::new(cause)),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(cause) = &self.cause {
            write!(f, " ({cause})")?;
        }
        Ok(())
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Diagnostic codes.
///
/// ## Code Ranges
///
/// - **W0001-W0099**: Ignored input, or output that will not read back
/// - **E0001-E0099**: Abandoned model objects
/// - **F0001-F0099**: Read failures
pub mod codes {
    // ========================================================================
    // WARNINGS (W0001-W0099)
    // ========================================================================

    /// Element name not expected at this position.
    pub const UNRECOGNIZED_ELEMENT: &str = "W0001";
    /// Node kind not expected at this position.
    pub const UNEXPECTED_NODE_KIND: &str = "W0002";
    /// Attribute or child element naming no property of the chunk type.
    pub const NO_SUCH_PROPERTY: &str = "W0003";
    /// Non-text child inside value or help text.
    pub const UNEXPECTED_CHILD: &str = "W0004";
    /// Property descriptor token declared twice on one chunk type.
    pub const DUPLICATE_PROPERTY: &str = "W0005";
    /// More values than a fixed-size property holds.
    pub const TOO_MANY_VALUES: &str = "W0006";
    /// More than one chunk inside a `Defaults` element.
    pub const EXTRA_DEFAULT_CHUNK: &str = "W0007";
    /// Default chunk whose type differs from its owning descriptor.
    pub const DEFAULT_TYPE_MISMATCH: &str = "W0008";
    /// Text value the serializer cannot write as a single token.
    pub const UNWRITABLE_VALUE: &str = "W0009";

    // ========================================================================
    // ERRORS (E0001-E0099)
    // ========================================================================

    /// Element naming no registered chunk type.
    pub const UNKNOWN_CHUNK_TYPE: &str = "E0001";
    /// Attribute not allowed on a `label` or `enumeration`.
    pub const UNIDENTIFIED_ATTRIBUTE: &str = "E0002";
    /// Malformed `num` attribute.
    pub const INVALID_NUM: &str = "E0003";
    /// Malformed `type` attribute.
    pub const UNKNOWN_VALUE_TYPE: &str = "E0004";
    /// Token that does not parse as the property's type.
    pub const INVALID_LITERAL: &str = "E0005";
    /// Descriptor without a token.
    pub const MISSING_TOKEN: &str = "E0006";
    /// Value that could not be stored in its property.
    pub const INTERNAL_COERCION: &str = "E0007";

    // ========================================================================
    // FAILURES (F0001-F0099)
    // ========================================================================

    /// Source could not be read or parsed.
    pub const READ_FAILURE: &str = "F0001";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during a build pass.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        tracing::trace!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning.
    pub fn warning(&mut self, code: &'static str, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::warning(code, message));
    }

    /// Add an error.
    pub fn error(&mut self, code: &'static str, message: impl Into<Arc<str>>) {
        self.add(Diagnostic::error(code, message));
    }

    /// Add a failure.
    pub fn failure(&mut self, message: impl Into<Arc<str>>, cause: ConfigIoError) {
        self.add(Diagnostic::failure(message, cause));
    }

    /// Append every diagnostic of another collector.
    pub fn extend(&mut self, other: Diagnostics) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Failure)
    }

    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
    }

    /// Check if there are any errors or failures.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity >= Severity::Error)
    }

    pub fn has_failure(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Count diagnostics carrying a code.
    pub fn count_code(&self, code: &str) -> usize {
        self.diagnostics.iter().filter(|d| d.code == code).count()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Take all diagnostics.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for diagnostic in &self.diagnostics {
            writeln!(f, "{diagnostic}")?;
        }
        Ok(())
    }
}
