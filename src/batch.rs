//! Batch validation: run the configured checks over every document and fold
//! the results into a [`Report`].
//!
//! Documents are independent, so loading and checking fan out over rayon's
//! pool. Results are collected back in input order before anything is
//! recorded, which keeps counts and the message log deterministic.
use std::path::{Path, PathBuf};
use std::sync::Arc;
use rayon::prelude::*;
use serde_json::Value;

use crate::config::Options;
use crate::error::{ParseError, SinkError};
use crate::keys::check_keys;
use crate::report::{Level, LogLine, Report, ValidationResult};
use crate::source::{json_output_path, load_document, write_document, write_log};
use crate::structure::validate_structure;
use crate::types::check_types;

/// Called with every load/parse problem and the path it happened on.
///
/// Runs on the thread driving [`BatchValidator::validate_with`], once per
/// failed document, in input order.
pub type WarningHook = Arc<dyn Fn(&ParseError, &Path) + Send + Sync>;

pub struct BatchValidator {
    options: Options,
    on_warning: Option<WarningHook>,
}

impl BatchValidator {
    pub fn new(options: Options) -> Self {
        Self { options, on_warning: None }
    }

    pub fn with_warning_hook(mut self, hook: impl Fn(&ParseError, &Path) + Send + Sync + 'static) -> Self {
        self.on_warning = Some(Arc::new(hook));
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Run the configured checks against an already parsed document.
    pub fn check_document(&self, path: &Path, doc: &Value) -> ValidationResult {
        let opts = &self.options;
        ValidationResult {
            path: path.to_path_buf(),
            parse_error: None,
            structure_mismatches: opts
                .structure
                .as_ref()
                .map(|t| validate_structure(doc, t, opts.path_style)),
            missing_keys: opts.keys.as_ref().map(|k| check_keys(doc, k)),
            type_match: opts.types.as_ref().map(|s| check_types(doc, s)),
        }
    }

    /// Load, optionally re-serialize, and check one document.
    ///
    /// A document that fails to load is reported as failed and skips the
    /// remaining checks; only a failing JSON write is an `Err`.
    pub fn check_file(&self, path: &Path) -> Result<ValidationResult, SinkError> {
        tracing::debug!(path = %path.display(), "validating");
        let doc = match load_document(path) {
            Ok(doc) => doc,
            Err(warning) => {
                return Ok(ValidationResult {
                    parse_error: Some(warning),
                    ..ValidationResult::new(path)
                });
            }
        };

        if self.options.write_json {
            let target = json_output_path(path);
            if target == path {
                tracing::warn!(path = %path.display(), "not overwriting source with its JSON copy");
            } else {
                write_document(&target, &doc)?;
            }
        }

        Ok(self.check_document(path, &doc))
    }

    pub fn validate(&self, paths: &[PathBuf]) -> Result<Report, SinkError> {
        self.validate_with(paths, |_| {})
    }

    /// Like [`validate`](Self::validate), handing every message line to
    /// `emit` in log order as it is recorded.
    ///
    /// Paths that don't exist are skipped with a warning and never counted.
    /// Lines and warning hook calls are delivered once every document has
    /// been checked.
    pub fn validate_with(
        &self,
        paths: &[PathBuf],
        mut emit: impl FnMut(&LogLine),
    ) -> Result<Report, SinkError> {
        let results = existing_sources(paths)
            .par_iter()
            .map(|path| self.check_file(path))
            .collect::<Result<Vec<_>, _>>()?;

        let mut report = Report::new();
        let mut emitted = 0;
        for result in &results {
            if let (Some(warning), Some(hook)) = (&result.parse_error, &self.on_warning) {
                hook(warning, &result.path);
            }
            report.record(result);
            report.log_lines[emitted..].iter().for_each(&mut emit);
            emitted = report.log_lines.len();
        }
        report.finish();
        report.log_lines[emitted..].iter().for_each(&mut emit);

        for line in report.log_lines.iter().filter(|l| l.level == Level::Info) {
            tracing::info!("{line}");
        }
        tracing::info!("{}", report.summary());

        if let Some(log) = &self.options.log {
            write_log(log, &report.render_log())?;
        }
        Ok(report)
    }
}

fn existing_sources(paths: &[PathBuf]) -> Vec<&PathBuf> {
    paths
        .iter()
        .filter(|path| {
            let exists = path.exists();
            if !exists {
                tracing::warn!("Source file \"{}\" not found.", path.display());
            }
            exists
        })
        .collect()
}
