//! Per-document results and the batch report they fold into.
//!
//! The report only stores *what* was found, as structured [`LogLine`]s.
//! Turning lines into terminal output (with color) is the caller's job;
//! [`Report::render_log`] gives the plain form that gets persisted.
use std::fmt;
use std::path::PathBuf;

use crate::error::ParseError;

// ------------------------------- Messages --------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    /// Shown on the error channel as it happens.
    Error,
    /// Only shown when verbose; always kept in the persisted log.
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Text(String),
    /// Keys or paths; rendered as a comma separated list.
    Words(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    pub level: Level,
    pub body: Body,
}

impl LogLine {
    pub fn error(text: impl Into<String>) -> Self {
        Self { level: Level::Error, body: Body::Text(text.into()) }
    }
    pub fn info(text: impl Into<String>) -> Self {
        Self { level: Level::Info, body: Body::Text(text.into()) }
    }
    pub fn words(words: Vec<String>) -> Self {
        Self { level: Level::Error, body: Body::Words(words) }
    }
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            Body::Text(text) => f.write_str(text),
            Body::Words(words) => f.write_str(&words.join(", ")),
        }
    }
}

// ---------------------------- Per-document -------------------------------- //

/// Outcome of checking one document. `None` means the check wasn't configured
/// (or couldn't run because the document failed to load).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationResult {
    pub path: PathBuf,
    pub parse_error: Option<ParseError>,
    pub structure_mismatches: Option<Vec<String>>,
    pub missing_keys: Option<Vec<String>>,
    pub type_match: Option<bool>,
}

impl ValidationResult {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }

    pub fn failed(&self) -> bool {
        self.parse_error.is_some()
            || self.structure_mismatches.as_ref().is_some_and(|m| !m.is_empty())
            || self.missing_keys.as_ref().is_some_and(|k| !k.is_empty())
            || self.type_match == Some(false)
    }

    /// Messages for this document, in check order.
    pub fn messages(&self) -> Vec<LogLine> {
        let path = self.path.display();
        let mut out = Vec::new();
        if let Some(err) = &self.parse_error {
            out.push(LogLine::error(err.to_string()));
        }
        if let Some(paths) = self.structure_mismatches.as_ref().filter(|m| !m.is_empty()) {
            out.push(LogLine::error(format!("{path} is not following the correct structure, missing:")));
            out.push(LogLine::words(paths.clone()));
        }
        if let Some(keys) = self.missing_keys.as_ref().filter(|k| !k.is_empty()) {
            out.push(LogLine::error(format!("{path} is missing the following keys:")));
            out.push(LogLine::words(keys.clone()));
        }
        if self.type_match == Some(false) {
            out.push(LogLine::error(format!("{path} is not matching the type requirements")));
        }
        out
    }
}

// ------------------------------- Report ----------------------------------- //

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_missing_keys: usize,
    pub files_with_type_mismatch: Vec<PathBuf>,
    pub log_lines: Vec<LogLine>,
}

impl Report {
    pub fn new() -> Self { Self::default() }

    /// Fold one document's result in. Call in input order.
    pub fn record(&mut self, result: &ValidationResult) {
        self.total_files += 1;
        self.files_with_errors += usize::from(result.failed());
        self.total_missing_keys += result.missing_keys.as_ref().map_or(0, Vec::len);
        if result.type_match == Some(false) {
            self.files_with_type_mismatch.push(result.path.clone());
        }
        self.log_lines.extend(result.messages());
    }

    /// Append the closing summary lines. Call once, after the last `record`.
    pub fn finish(&mut self) {
        let mismatched = self.files_with_type_mismatch.len();
        if mismatched > 0 {
            self.log_lines.push(LogLine::error(format!(
                "Type mismatching found in total of {mismatched} files"
            )));
        } else {
            self.log_lines.push(LogLine::info("No mismatching type requirements found."));
        }

        if self.total_missing_keys == 0 {
            self.log_lines.push(LogLine::info("All done. No missing keys found. Thank you."));
        } else {
            self.log_lines.push(LogLine::error(format!(
                "Found missing keys, total of: {}", self.total_missing_keys
            )));
        }
    }

    pub fn has_failures(&self) -> bool {
        self.files_with_errors > 0
    }

    pub fn summary(&self) -> String {
        format!(
            "Out of {} files, {} have validation errors",
            self.total_files, self.files_with_errors
        )
    }

    /// The whole message log as plain text, one line per entry.
    pub fn render_log(&self) -> String {
        self.log_lines
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean(path: &str) -> ValidationResult {
        ValidationResult {
            structure_mismatches: Some(vec![]),
            missing_keys: Some(vec![]),
            type_match: Some(true),
            ..ValidationResult::new(path)
        }
    }

    #[test]
    fn empty_batch_has_no_failures() {
        let mut report = Report::new();
        report.finish();
        assert_eq!(report.total_files, 0);
        assert_eq!(report.files_with_errors, 0);
        assert!(!report.has_failures());
        assert_eq!(report.summary(), "Out of 0 files, 0 have validation errors");
    }

    #[test]
    fn failures_are_counted_once_per_document() {
        let mut bad = clean("bad.yml");
        bad.missing_keys = Some(vec!["a".into(), "b".into()]);
        bad.structure_mismatches = Some(vec!["x.y".into()]);
        bad.type_match = Some(false);

        let mut report = Report::new();
        report.record(&clean("ok.yml"));
        report.record(&bad);
        report.record(&ValidationResult::new("unchecked.yml"));

        assert_eq!(report.total_files, 3);
        assert_eq!(report.files_with_errors, 1);
        assert_eq!(report.total_missing_keys, 2);
        assert_eq!(report.files_with_type_mismatch, [PathBuf::from("bad.yml")]);
    }

    #[test]
    fn messages_follow_check_order() {
        let mut result = clean("doc.yml");
        result.parse_error = Some(ParseError { path: "doc.yml".into(), message: "boom".into() });
        result.structure_mismatches = Some(vec!["a".into(), "b.c".into()]);
        result.missing_keys = Some(vec!["k".into()]);
        result.type_match = Some(false);

        let rendered: Vec<String> = result.messages().iter().map(ToString::to_string).collect();
        assert_eq!(rendered, [
            "doc.yml: boom",
            "doc.yml is not following the correct structure, missing:",
            "a, b.c",
            "doc.yml is missing the following keys:",
            "k",
            "doc.yml is not matching the type requirements",
        ]);
    }

    #[test]
    fn finish_reports_totals() {
        let mut bad = clean("bad.yml");
        bad.missing_keys = Some(vec!["a".into()]);
        bad.type_match = Some(false);
        let mut report = Report::new();
        report.record(&bad);
        report.finish();

        let log = report.render_log();
        assert!(log.ends_with(
            "Type mismatching found in total of 1 files\nFound missing keys, total of: 1"
        ), "{log}");
    }

    #[test]
    fn clean_run_logs_the_all_clear() {
        let mut report = Report::new();
        report.record(&clean("ok.yml"));
        report.finish();
        assert_eq!(
            report.render_log(),
            "No mismatching type requirements found.\nAll done. No missing keys found. Thank you."
        );
        assert!(report.log_lines.iter().all(|l| l.level == Level::Info));
    }
}
