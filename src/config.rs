//! Option bundle: what to check and where to write.
//!
//! Options arrive as untyped data (a YAML/JSON config file, possibly
//! overridden by CLI flags) in [`RawOptions`], then get compiled once into
//! [`Options`], which is what the batch validator consumes.
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfigError;
use crate::keys::RequiredKeys;
use crate::structure::PathStyle;
use crate::template::{parse_structure, StructureTemplate};
use crate::types::{parse_types, TypeSchema};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawOptions {
    pub keys: Option<RequiredKeys>,
    pub structure: Option<Value>,
    pub types: Option<Value>,
    #[serde(alias = "writeJson")]
    pub write_json: bool,
    pub log: Option<PathBuf>,
    #[serde(alias = "indexArrayPaths")]
    pub index_array_paths: bool,
    pub yaml: Option<ParserOptions>,
}

/// Parser settings under `yaml:`. serde_yaml has no knobs to forward, so
/// only an empty mapping is accepted. The warning callback is set in code
/// through [`crate::BatchValidator::with_warning_hook`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParserOptions {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub keys: Option<RequiredKeys>,
    pub structure: Option<StructureTemplate>,
    pub types: Option<TypeSchema>,
    pub write_json: bool,
    pub log: Option<PathBuf>,
    pub path_style: PathStyle,
}

impl RawOptions {
    pub fn compile(self) -> Result<Options, ConfigError> {
        Ok(Options {
            keys: self.keys,
            structure: self.structure.as_ref().map(parse_structure).transpose()?,
            types: self.types.as_ref().map(parse_types).transpose()?,
            write_json: self.write_json,
            log: self.log,
            path_style: if self.index_array_paths { PathStyle::Indexed } else { PathStyle::Collapsed },
        })
    }
}

// ------------------------------ Loading ----------------------------------- //

pub fn load_options(path: &Path) -> Result<RawOptions, ConfigError> {
    read_data_file(path)
}

/// Read a YAML or JSON data file (by extension; YAML when unsure) into `T`.
pub fn read_data_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let src = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    from_str_with_path(path, &src)
}

/// Deserialize with a field path in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(path: &Path, src: &str) -> Result<T, ConfigError> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let fail = |at: String, message: String| ConfigError::Parse {
        path: path.to_path_buf(),
        at,
        message,
    };

    if is_json {
        let de = &mut serde_json::Deserializer::from_str(src);
        serde_path_to_error::deserialize::<_, T>(de)
            .map_err(|err| fail(err.path().to_string(), err.into_inner().to_string()))
    } else {
        let de = serde_yaml::Deserializer::from_str(src);
        serde_path_to_error::deserialize::<_, T>(de)
            .map_err(|err| fail(err.path().to_string(), err.into_inner().to_string()))
    }
}
