//! Error and diagnostic types.
//!
//! Two severities are kept apart on purpose: a [`BuildError`] aborts the run,
//! a [`BuildWarning`] describes a single type or member that was skipped while
//! the rest of the model was still built.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors. Any of these stops the run before or during model construction.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The documentation comment file could not be parsed as XML.
    #[error("malformed documentation comments: {0}")]
    MalformedComments(String),

    /// The type surface could not be loaded or introspected at all.
    #[error("unable to load type surface from {path}: {reason}")]
    UnresolvableSurface { path: PathBuf, reason: String },

    /// A type signature in the surface did not follow reflection notation.
    #[error("invalid type signature '{signature}': {reason}")]
    InvalidSignature { signature: String, reason: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to render {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// What kind of input a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    UnsupportedType,
    UnsupportedMember,
    MalformedMember,
    DuplicateDocumentation,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::UnsupportedType => write!(f, "unsupported type"),
            WarningKind::UnsupportedMember => write!(f, "unsupported member"),
            WarningKind::MalformedMember => write!(f, "malformed member"),
            WarningKind::DuplicateDocumentation => write!(f, "duplicate documentation"),
        }
    }
}

/// A recoverable diagnostic emitted while building the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildWarning {
    pub kind: WarningKind,
    /// Qualified name of the type or member the warning is about
    pub subject: String,
    pub message: String,
}

impl BuildWarning {
    pub fn new(kind: WarningKind, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.kind, self.subject, self.message)
    }
}

pub type Result<T> = std::result::Result<T, BuildError>;
