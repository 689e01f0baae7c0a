//! Minimal CLI: validate → report | infer → template
use std::path::PathBuf;
use std::process::ExitCode;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use yaml_validator::config::{load_options, read_data_file, RawOptions};
use yaml_validator::keys::RequiredKeys;
use yaml_validator::report::{Body, Level, LogLine};
use yaml_validator::source::{load_document, resolve_file_path_patterns, write_text};
use yaml_validator::BatchValidator;

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// validate YAML/JSON documents against required keys, a shape template and a type schema
#[derive(Parser, Debug)]
#[command(name = "yaml-validator", version)]
pub struct CommandLineInterface {
    /// show the verbose summary (same as RUST_LOG=info)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// check every input and report missing keys, structure and type mismatches
    Validate(ValidateOut),
    /// infer the shape template shared by every input
    Template(TemplateOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more inputs. May be literal paths or quoted glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct ValidateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// YAML/JSON file with the option bundle (keys, structure, types, write_json, log)
    #[arg(long)]
    config: Option<PathBuf>,

    /// required top-level keys (comma separated or repeated)
    #[arg(long, value_delimiter = ',', num_args = 1..)]
    keys: Vec<String>,

    /// YAML/JSON file holding the shape template
    #[arg(long)]
    structure: Option<PathBuf>,

    /// YAML/JSON file holding the type schema
    #[arg(long)]
    types: Option<PathBuf>,

    /// write a pretty JSON copy next to every input
    #[arg(long, default_value_t = false)]
    write_json: bool,

    /// write the plain message log to this file
    #[arg(long)]
    log: Option<PathBuf>,

    /// address array elements by index (`items.0.id`) instead of sharing the array's path
    #[arg(long, default_value_t = false)]
    indexed_paths: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(clap::Parser, Debug)]
struct TemplateOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output format
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,

    /// output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn resolve(&self) -> Result<Vec<PathBuf>> {
        resolve_file_path_patterns(&self.input).context("failed to resolve input file paths")
    }
}

impl ValidateOut {
    /// Config file first, then flags on top.
    fn raw_options(&self) -> Result<RawOptions> {
        let mut raw = match &self.config {
            Some(path) => load_options(path)?,
            None => RawOptions::default(),
        };
        if !self.keys.is_empty() {
            raw.keys = Some(RequiredKeys::Many(self.keys.clone()));
        }
        if let Some(path) = &self.structure {
            raw.structure = Some(read_data_file::<Value>(path)?);
        }
        if let Some(path) = &self.types {
            raw.types = Some(read_data_file::<Value>(path)?);
        }
        raw.write_json |= self.write_json;
        raw.index_array_paths |= self.indexed_paths;
        if self.log.is_some() {
            raw.log = self.log.clone();
        }
        Ok(raw)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn init_tracing(&self) {
        let default = if self.verbose { "info" } else { "warn" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    pub fn run(&self) -> Result<ExitCode> {
        match &self.cmd {
            Command::Validate(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS)
                }

                let options = target.raw_options()?.compile()?;
                let paths = target.input_settings.resolve()?;
                let validator = BatchValidator::new(options);
                let report = validator.validate_with(&paths, print_line)?;

                eprintln!("{}", report.summary());
                if report.has_failures() {
                    Ok(ExitCode::FAILURE)
                } else {
                    Ok(ExitCode::SUCCESS)
                }
            }
            Command::Template(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(ExitCode::SUCCESS)
                }

                // 1) load every input (any failure here is fatal)
                let mut docs = Vec::new();
                for path in target.input_settings.resolve()? {
                    docs.push(load_document(&path)?);
                }

                // 2) join & lower
                let template = yaml_validator::inference::infer_from_documents(&docs);
                let value = yaml_validator::template::emit_structure(&template);

                // 3) print or write
                let src = match target.format {
                    Format::Json => serde_json::to_string_pretty(&value)?,
                    Format::Yaml => serde_yaml::to_string(&value)?,
                };
                if let Some(out) = target.out.as_ref() {
                    write_text(out, &src)?;
                } else {
                    println!("{src}");
                }
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

/// Errors go to stderr as they come; info lines are left to tracing.
fn print_line(line: &LogLine) {
    if line.level != Level::Error {
        return;
    }
    match &line.body {
        Body::Text(text) => eprintln!("{} {}", ">>".red(), text),
        Body::Words(words) => {
            let words = words
                .iter()
                .map(|w| w.bright_black().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            eprintln!("{} {}", ">>".red(), words);
        }
    }
}
