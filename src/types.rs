//! Type schema matching: one pass/fail answer per document.
//!
//! Unlike [`crate::structure`], nothing here says *where* a document went
//! wrong; callers that need paths should use a structure template instead.
use indexmap::IndexMap;
use serde_json::Value;

use crate::document::{has_tag, member, TypeTag};
use crate::error::ConfigError;
use crate::template::join_path;

pub type TypeSchema = IndexMap<String, TypeRule>;

#[derive(Debug, Clone, PartialEq)]
pub enum TypeRule {
    Is(TypeTag),
    /// Key must be a mapping that itself matches the nested schema.
    Nested(TypeSchema),
}

pub fn parse_types(v: &Value) -> Result<TypeSchema, ConfigError> {
    match v {
        Value::Object(map) => parse_rules(map, ""),
        _ => Err(ConfigError::NotAMapping { what: "types", at: "(root)".into() }),
    }
}

fn parse_rules(map: &serde_json::Map<String, Value>, parent: &str) -> Result<TypeSchema, ConfigError> {
    let mut out = TypeSchema::with_capacity(map.len());
    for (k, v) in map {
        let at = join_path(parent, k);
        let rule = match v {
            Value::String(name) => TypeTag::from_name(name)
                .map(TypeRule::Is)
                .ok_or_else(|| ConfigError::UnknownType { name: name.clone(), at: at.clone() })?,
            Value::Object(nested) => TypeRule::Nested(parse_rules(nested, &at)?),
            _ => return Err(ConfigError::Unsupported { what: "types", at }),
        };
        out.insert(k.clone(), rule);
    }
    Ok(out)
}

/// True iff every key declared in `schema` is present in `doc` with the
/// declared type.
pub fn check_types(doc: &Value, schema: &TypeSchema) -> bool {
    matches_rules(Some(doc), schema)
}

fn matches_rules(doc: Option<&Value>, schema: &TypeSchema) -> bool {
    schema.iter().all(|(key, rule)| {
        let value = member(doc, key);
        match rule {
            TypeRule::Is(tag) => has_tag(value, *tag),
            TypeRule::Nested(nested) => has_tag(value, TypeTag::Map) && matches_rules(value, nested),
        }
    })
}
