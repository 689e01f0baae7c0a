//! Error taxonomy.
//!
//! Validation findings (missing keys, structure mismatches, type mismatches)
//! are never errors: they are data folded into a [`crate::report::Report`].
//! What lives here are the problems that stop a run from being configured or
//! from persisting its output, plus the per-document load warning which is
//! reported as data but still carries enough context to be forwarded.
use std::path::PathBuf;
use thiserror::Error;

/// A document could not be read or parsed.
///
/// Recoverable: the batch records it against the document and moves on.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{}: {message}", .path.display())]
pub struct ParseError {
    pub path: PathBuf,
    pub message: String,
}

/// Invalid or unreadable configuration (option bundle, templates, schemas).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {} at {at} → {message}", .path.display())]
    Parse {
        path: PathBuf,
        at: String,
        message: String,
    },

    #[error("unknown type name `{name}` at `{at}`")]
    UnknownType { name: String, at: String },

    #[error("array template at `{at}` must hold exactly one element template, found {found}")]
    ArrayTemplateArity { at: String, found: usize },

    #[error("{what} at `{at}` must be a mapping")]
    NotAMapping { what: &'static str, at: String },

    #[error("unsupported value in {what} at `{at}`: expected a type name or a mapping")]
    Unsupported { what: &'static str, at: String },

    #[error("glob pattern error: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),

    #[error("failed to read glob entry: {0}")]
    Glob(#[from] glob::GlobError),
}

/// Writing to a document or log sink failed. Always a hard failure.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize document for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
