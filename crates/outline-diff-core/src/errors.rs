use std::fmt::Debug;
use thiserror::Error;

/// Result type alias using OutlineError
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Label used in error messages when the parent is the absolute root.
pub const ROOT_LABEL: &str = "<root>";

/// Render an item identity for error reporting.
///
/// Identities are opaque to this crate, so errors carry their `Debug` form.
pub fn describe_id<I: Debug + ?Sized>(id: &I) -> String {
    format!("{:?}", id)
}

/// Render an optional parent identity, using [`ROOT_LABEL`] for the root.
pub fn describe_parent<I: Debug>(parent: Option<&I>) -> String {
    parent.map_or_else(|| ROOT_LABEL.to_string(), describe_id)
}

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Snapshot builder
    InvalidParent,
    UnknownSibling,
    UnknownIdentity,
    CycleDetected,
    DuplicateIdentity,
    IndexOutOfBounds,

    // Structural validation
    ForestInvariant,

    // Reconciliation
    InconsistentTree,

    // Text import
    InvalidText,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidParent => "ERR_INVALID_PARENT",
            ExErrorKind::UnknownSibling => "ERR_UNKNOWN_SIBLING",
            ExErrorKind::UnknownIdentity => "ERR_UNKNOWN_IDENTITY",
            ExErrorKind::CycleDetected => "ERR_CYCLE_DETECTED",
            ExErrorKind::DuplicateIdentity => "ERR_DUPLICATE_IDENTITY",
            ExErrorKind::IndexOutOfBounds => "ERR_INDEX_OUT_OF_BOUNDS",
            ExErrorKind::ForestInvariant => "ERR_FOREST_INVARIANT",
            ExErrorKind::InconsistentTree => "ERR_INCONSISTENT_TREE",
            ExErrorKind::InvalidText => "ERR_INVALID_TEXT",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries classification fields for programmatic handling plus free-form
/// context for debugging. Domain code returns [`OutlineError`]; boundaries
/// (logging, the CLI) convert into `ExError`.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    item_id: Option<String>,
    parent_id: Option<String>,
    line: Option<usize>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            item_id: None,
            parent_id: None,
            line: None,
            message: String::new(),
            source: None,
        }
    }

    /// Set the operation name
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Set the item identity involved
    pub fn with_item_id(mut self, id: impl Into<String>) -> Self {
        self.item_id = Some(id.into());
        self
    }

    /// Set the parent identity involved
    pub fn with_parent_id(mut self, id: impl Into<String>) -> Self {
        self.parent_id = Some(id.into());
        self
    }

    /// Set the 1-based input line (text import only)
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Set the human-readable message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Chain an underlying error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn line(&self) -> Option<usize> {
        self.line
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " {}:", op)?;
        }
        write!(f, " {}", self.message)?;
        if let Some(id) = &self.item_id {
            write!(f, " (item={})", id)?;
        }
        if let Some(parent) = &self.parent_id {
            write!(f, " (parent={})", parent)?;
        }
        if let Some(line) = self.line {
            write!(f, " (line={})", line)?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for snapshot, diff and reconciliation operations
///
/// Builder operations fail fast with one of these and leave the snapshot
/// untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    // ===== Builder Errors =====
    /// Parent identity is not present in the snapshot
    #[error("Invalid parent: {parent_id} is not in the snapshot")]
    InvalidParent { parent_id: String },

    /// Sibling identity used as an insertion anchor is not present
    #[error("Unknown sibling: {sibling_id}")]
    UnknownSibling { sibling_id: String },

    /// Identity is not present in the snapshot
    #[error("Unknown identity: {item_id}")]
    UnknownIdentity { item_id: String },

    /// Moving the item under the destination would create a cycle
    #[error("Cycle detected: cannot move {item_id} under {parent_id}")]
    CycleDetected { item_id: String, parent_id: String },

    /// Identity already present (or repeated in the same batch)
    #[error("Duplicate identity: {item_id}")]
    DuplicateIdentity { item_id: String },

    /// Destination index is past the end of the destination child list
    #[error("Index {index} out of bounds for {parent_id} with {len} children")]
    IndexOutOfBounds {
        parent_id: String,
        index: usize,
        len: usize,
    },

    // ===== Validation Errors =====
    /// A structural forest invariant does not hold
    #[error("Forest invariant violated: {reason}")]
    ForestInvariant { reason: String },

    // ===== Reconciliation Errors =====
    /// A tree control could not apply an edit to its current state
    #[error("Inconsistent tree: {reason}")]
    InconsistentTree { reason: String },

    // ===== Text Import Errors =====
    /// A line of outline text could not be interpreted
    #[error("Invalid outline text at line {line}: {reason}")]
    InvalidText { line: usize, reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OutlineError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            OutlineError::InvalidParent { .. } => ExErrorKind::InvalidParent,
            OutlineError::UnknownSibling { .. } => ExErrorKind::UnknownSibling,
            OutlineError::UnknownIdentity { .. } => ExErrorKind::UnknownIdentity,
            OutlineError::CycleDetected { .. } => ExErrorKind::CycleDetected,
            OutlineError::DuplicateIdentity { .. } => ExErrorKind::DuplicateIdentity,
            OutlineError::IndexOutOfBounds { .. } => ExErrorKind::IndexOutOfBounds,
            OutlineError::ForestInvariant { .. } => ExErrorKind::ForestInvariant,
            OutlineError::InconsistentTree { .. } => ExErrorKind::InconsistentTree,
            OutlineError::InvalidText { .. } => ExErrorKind::InvalidText,
            OutlineError::Serialization { .. } => ExErrorKind::Serialization,
            OutlineError::Internal { .. } => ExErrorKind::Internal,
        }
    }
}

/// Conversion from OutlineError to the canonical ExError
impl From<OutlineError> for ExError {
    fn from(err: OutlineError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        match err {
            OutlineError::InvalidParent { parent_id } => ExError::new(kind)
                .with_parent_id(parent_id)
                .with_message(message),

            OutlineError::UnknownSibling { sibling_id } => ExError::new(kind)
                .with_item_id(sibling_id)
                .with_message(message),

            OutlineError::UnknownIdentity { item_id }
            | OutlineError::DuplicateIdentity { item_id } => ExError::new(kind)
                .with_item_id(item_id)
                .with_message(message),

            OutlineError::CycleDetected { item_id, parent_id } => ExError::new(kind)
                .with_item_id(item_id)
                .with_parent_id(parent_id)
                .with_message(message),

            OutlineError::IndexOutOfBounds { parent_id, .. } => ExError::new(kind)
                .with_parent_id(parent_id)
                .with_message(message),

            OutlineError::InvalidText { line, .. } => {
                ExError::new(kind).with_line(line).with_message(message)
            }

            OutlineError::ForestInvariant { .. }
            | OutlineError::InconsistentTree { .. }
            | OutlineError::Serialization { .. }
            | OutlineError::Internal { .. } => ExError::new(kind).with_message(message),
        }
    }
}

impl From<serde_json::Error> for OutlineError {
    fn from(err: serde_json::Error) -> Self {
        OutlineError::Serialization {
            message: err.to_string(),
        }
    }
}
