//! Document source and sinks: everything that touches the filesystem.
use std::path::{Path, PathBuf};
use serde_json::Value;

use crate::document::yaml_to_document;
use crate::error::{ConfigError, ParseError, SinkError};

// ————————————————————————————————————————————————————————————————————————————
// SOURCE
// ————————————————————————————————————————————————————————————————————————————

/// Read and parse one document. `.json` goes through serde_json, anything
/// else is treated as YAML (which also accepts plain JSON).
pub fn load_document(path: &Path) -> Result<Value, ParseError> {
    let source = std::fs::read_to_string(path).map_err(|error| ParseError {
        path: path.to_path_buf(),
        message: format!("cannot read file: {error}"),
    })?;
    parse_document(path, &source)
}

pub fn parse_document(path: &Path, source: &str) -> Result<Value, ParseError> {
    let fail = |message: String| ParseError { path: path.to_path_buf(), message };
    match extension(path).as_deref() {
        Some("json") => serde_json::from_str::<Value>(source)
            .map_err(|error| fail(format!("invalid JSON: {error}"))),
        _ => {
            let yaml = serde_yaml::from_str::<serde_yaml::Value>(source)
                .map_err(|error| fail(format!("invalid YAML: {error}")))?;
            yaml_to_document(&yaml).map_err(fail)
        }
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

// ————————————————————————————————————————————————————————————————————————————
// SINKS
// ————————————————————————————————————————————————————————————————————————————

/// Where the canonical JSON copy of `source` goes: same stem, `.json`.
pub fn json_output_path(source: &Path) -> PathBuf {
    source.with_extension("json")
}

/// Pretty-printed (two-space) JSON rendering of a document.
pub fn write_document(path: &Path, doc: &Value) -> Result<(), SinkError> {
    let json = serde_json::to_string_pretty(doc).map_err(|source| SinkError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    write_text(path, &json)
}

pub fn write_log(path: &Path, text: &str) -> Result<(), SinkError> {
    write_text(path, text)
}

pub fn write_text(path: &Path, text: &str) -> Result<(), SinkError> {
    let fail = |source| SinkError::Write { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(fail)?;
    }
    std::fs::write(path, text).map_err(fail)
}

// ————————————————————————————————————————————————————————————————————————————
// INPUT PATTERNS
// ————————————————————————————————————————————————————————————————————————————

/// Expand literal paths and glob patterns, keeping argument order.
pub fn resolve_file_path_patterns<I>(patterns: I) -> Result<Vec<PathBuf>, ConfigError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'['))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                matched_any = true;
                out.push(entry?);
            }
            if !matched_any {
                return Err(ConfigError::NoMatches(pattern.to_string()));
            }
        } else {
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
