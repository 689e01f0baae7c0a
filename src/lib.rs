//! Structural validation for batches of YAML/JSON documents.
//!
//! Each document is checked against up to three independent requirement
//! sets, any of which may be left out:
//!
//! - required top-level keys ([`keys::check_keys`])
//! - a nested shape template ([`structure::validate_structure`])
//! - a type schema ([`types::check_types`])
//!
//! [`batch::BatchValidator`] runs them over a set of files and folds the
//! outcome into a [`report::Report`].
pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod inference;
pub mod keys;
pub mod report;
pub mod source;
pub mod structure;
pub mod template;
pub mod types;

pub use batch::BatchValidator;
pub use config::{Options, RawOptions};
pub use document::{type_tag_of, TypeTag};
pub use error::{ConfigError, ParseError, SinkError};
pub use keys::{check_keys, RequiredKeys};
pub use report::{Report, ValidationResult};
pub use structure::{validate_structure, PathStyle};
pub use template::{ShapeTemplate, StructureTemplate};
pub use types::{check_types, TypeSchema};
