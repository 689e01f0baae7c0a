//! Shape templates: the nested "this key should exist and have that type"
//! requirement tree.
//!
//! Templates come from configuration data (YAML/JSON) and get converted
//! once, up front, into a tagged tree so the matcher never has to sniff
//! shapes at runtime:
//!
//! ```yaml
//! name: string
//! owner:
//!   email: string
//! items:
//!   - id: number
//! ```
use indexmap::IndexMap;
use serde_json::Value;

use crate::document::TypeTag;
use crate::error::ConfigError;

/// Root of a structure requirement. Always a mapping.
pub type StructureTemplate = IndexMap<String, ShapeTemplate>;

#[derive(Debug, Clone, PartialEq)]
pub enum ShapeTemplate {
    /// Nested mapping; key order is the order checks (and mismatches) come out in.
    Map(IndexMap<String, ShapeTemplate>),
    /// Applied to every element of the target sequence.
    Array(Box<ShapeTemplate>),
    /// Expected type of the value at this key.
    Leaf(TypeTag),
    /// Null, numeric or boolean template entries. Contribute nothing.
    Ignored,
}

// ------------------------------- Parsing ---------------------------------- //

/// Convert config data into a structure template.
pub fn parse_structure(v: &Value) -> Result<StructureTemplate, ConfigError> {
    match v {
        Value::Object(map) => parse_fields(map, ""),
        _ => Err(ConfigError::NotAMapping { what: "structure", at: "(root)".into() }),
    }
}

fn parse_fields(
    map: &serde_json::Map<String, Value>,
    parent: &str,
) -> Result<IndexMap<String, ShapeTemplate>, ConfigError> {
    let mut out = IndexMap::with_capacity(map.len());
    for (k, v) in map {
        let at = join_path(parent, k);
        out.insert(k.clone(), parse_entry(v, &at)?);
    }
    Ok(out)
}

fn parse_entry(v: &Value, at: &str) -> Result<ShapeTemplate, ConfigError> {
    match v {
        Value::String(name) => TypeTag::from_name(name)
            .map(ShapeTemplate::Leaf)
            .ok_or_else(|| ConfigError::UnknownType { name: name.clone(), at: at.to_string() }),
        Value::Array(xs) => match xs.as_slice() {
            [one] => Ok(ShapeTemplate::Array(Box::new(parse_entry(one, at)?))),
            _ => Err(ConfigError::ArrayTemplateArity { at: at.to_string(), found: xs.len() }),
        },
        Value::Object(map) => Ok(ShapeTemplate::Map(parse_fields(map, at)?)),
        Value::Null | Value::Bool(_) | Value::Number(_) => Ok(ShapeTemplate::Ignored),
    }
}

pub(crate) fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

// ------------------------------- Emission --------------------------------- //

/// Config-data form of a template; `parse_structure(&emit_structure(t)) == t`
/// for templates without `Ignored` entries.
pub fn emit_structure(t: &StructureTemplate) -> Value {
    Value::Object(t.iter().map(|(k, v)| (k.clone(), emit_entry(v))).collect())
}

fn emit_entry(t: &ShapeTemplate) -> Value {
    match t {
        ShapeTemplate::Map(fields) => emit_structure(fields),
        ShapeTemplate::Array(item) => Value::Array(vec![emit_entry(item)]),
        ShapeTemplate::Leaf(tag) => Value::from(tag.name()),
        ShapeTemplate::Ignored => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_nested_templates_in_key_order() {
        let t = parse_structure(&json!({
            "name": "string",
            "owner": { "email": "String" },
            "items": [{ "id": "number" }],
        })).unwrap();

        assert_eq!(t.keys().collect::<Vec<_>>(), ["name", "owner", "items"]);
        assert_eq!(t["name"], ShapeTemplate::Leaf(TypeTag::String));
        let ShapeTemplate::Map(owner) = &t["owner"] else { panic!("owner is not a map template") };
        assert_eq!(owner["email"], ShapeTemplate::Leaf(TypeTag::String));
        let ShapeTemplate::Array(item) = &t["items"] else { panic!("items is not an array template") };
        assert!(matches!(**item, ShapeTemplate::Map(_)));
    }

    #[test]
    fn scalar_template_values_are_ignored() {
        let t = parse_structure(&json!({ "a": null, "b": 3, "c": true })).unwrap();
        assert!(t.values().all(|v| *v == ShapeTemplate::Ignored));
    }

    #[test]
    fn unknown_type_names_are_reported_with_their_path() {
        let err = parse_structure(&json!({ "a": { "b": "date" } })).unwrap_err();
        match err {
            ConfigError::UnknownType { name, at } => {
                assert_eq!(name, "date");
                assert_eq!(at, "a.b");
            }
            other => panic!("expected UnknownType, got: {other}"),
        }
    }

    #[test]
    fn array_templates_need_exactly_one_element() {
        let err = parse_structure(&json!({ "tags": ["string", "number"] })).unwrap_err();
        assert!(matches!(err, ConfigError::ArrayTemplateArity { found: 2, .. }));
        let err = parse_structure(&json!({ "tags": [] })).unwrap_err();
        assert!(matches!(err, ConfigError::ArrayTemplateArity { found: 0, .. }));
    }

    #[test]
    fn root_must_be_a_mapping() {
        assert!(matches!(
            parse_structure(&json!(["string"])),
            Err(ConfigError::NotAMapping { .. })
        ));
    }

    #[test]
    fn emit_reproduces_the_config_form() {
        let src = json!({ "a": { "b": ["boolean"] }, "c": "null" });
        let t = parse_structure(&src).unwrap();
        assert_eq!(emit_structure(&t), json!({ "a": { "b": ["boolean"] }, "c": "null" }));
    }
}
