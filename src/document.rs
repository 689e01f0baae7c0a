//! Document tree model.
//!
//! A parsed document is a plain `serde_json::Value` (built with
//! `preserve_order`, so mapping keys keep their source order). Everything
//! that matches against documents talks about values through [`TypeTag`],
//! a closed set of runtime type names, instead of poking at the `Value`
//! variants directly.
use std::fmt;
use serde_json::Value;

// ------------------------------- Type tags -------------------------------- //

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TypeTag {
    String,
    Number,
    Boolean,
    Null,
    Map,
    Sequence,
}

impl TypeTag {
    /// Resolve a configured type name. Case-insensitive; accepts the common
    /// aliases people write in YAML configs.
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name.trim().to_ascii_lowercase().as_str() {
            "string" | "str" => TypeTag::String,
            "number" | "integer" | "int" | "float" => TypeTag::Number,
            "boolean" | "bool" => TypeTag::Boolean,
            "null" => TypeTag::Null,
            "object" | "map" | "mapping" => TypeTag::Map,
            "array" | "sequence" | "list" => TypeTag::Sequence,
            _ => return None,
        };
        Some(tag)
    }

    /// Canonical spelling, used when printing inferred templates.
    pub fn name(self) -> &'static str {
        match self {
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Null => "null",
            TypeTag::Map => "object",
            TypeTag::Sequence => "array",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn type_tag_of(v: &Value) -> TypeTag {
    match v {
        Value::Null      => TypeTag::Null,
        Value::Bool(_)   => TypeTag::Boolean,
        Value::Number(_) => TypeTag::Number,
        Value::String(_) => TypeTag::String,
        Value::Array(_)  => TypeTag::Sequence,
        Value::Object(_) => TypeTag::Map,
    }
}

/// True iff `v` is present and carries `tag`. Absent values match nothing.
pub fn has_tag(v: Option<&Value>, tag: TypeTag) -> bool {
    v.map(type_tag_of) == Some(tag)
}

/// Own top-level key lookup. Only mappings have keys.
pub fn member<'a>(doc: Option<&'a Value>, key: &str) -> Option<&'a Value> {
    match doc {
        Some(Value::Object(map)) => map.get(key),
        _ => None,
    }
}

// ------------------------------ YAML bridge ------------------------------- //

/// Convert a `serde_yaml::Value` into the document tree.
///
/// Number and boolean mapping keys are stringified. Tags are dropped and
/// the inner value kept. Anything else used as a key is rejected.
pub fn yaml_to_document(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Number(serde_json::Number::from(i)))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::Number(serde_json::Number::from(u)))
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Number(finite_number(f)))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => {
            let items: Result<Vec<Value>, String> = seq.iter().map(yaml_to_document).collect();
            Ok(Value::Array(items?))
        }
        serde_yaml::Value::Mapping(map) => {
            let mut out = serde_json::Map::new();
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                out.insert(key, yaml_to_document(v)?);
            }
            Ok(Value::Object(out))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_document(&tagged.value),
    }
}

/// The tree only holds finite numbers. `.inf` and `-.inf` saturate to the
/// largest finite magnitudes and `.nan` becomes zero, so all three still
/// tag as [`TypeTag::Number`].
fn finite_number(f: f64) -> serde_json::Number {
    let f = if f.is_nan() { 0.0 } else { f.clamp(f64::MIN, f64::MAX) };
    serde_json::Number::from_f64(f).unwrap_or_else(|| serde_json::Number::from(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn tags_cover_every_value_kind() {
        assert_eq!(type_tag_of(&json!("x")), TypeTag::String);
        assert_eq!(type_tag_of(&json!(1.5)), TypeTag::Number);
        assert_eq!(type_tag_of(&json!(false)), TypeTag::Boolean);
        assert_eq!(type_tag_of(&json!(null)), TypeTag::Null);
        assert_eq!(type_tag_of(&json!({})), TypeTag::Map);
        assert_eq!(type_tag_of(&json!([])), TypeTag::Sequence);
    }

    #[test]
    fn type_names_are_case_insensitive_with_aliases() {
        assert_eq!(TypeTag::from_name("Array"), Some(TypeTag::Sequence));
        assert_eq!(TypeTag::from_name("OBJECT"), Some(TypeTag::Map));
        assert_eq!(TypeTag::from_name("bool"), Some(TypeTag::Boolean));
        assert_eq!(TypeTag::from_name("integer"), Some(TypeTag::Number));
        assert_eq!(TypeTag::from_name("date"), None);
    }

    #[test]
    fn absent_values_match_no_tag() {
        assert!(!has_tag(None, TypeTag::Null));
        assert!(has_tag(Some(&json!(null)), TypeTag::Null));
    }

    #[test]
    fn member_only_looks_into_mappings() {
        let doc = json!({"a": 1});
        assert_eq!(member(Some(&doc), "a"), Some(&json!(1)));
        assert_eq!(member(Some(&doc), "b"), None);
        assert_eq!(member(Some(&json!(["a"])), "0"), None);
        assert_eq!(member(None, "a"), None);
    }

    #[test]
    fn yaml_conversion_keeps_key_order_and_stringifies_keys() {
        let src = "zeta: 1\nalpha: true\n3: three\nnested:\n  - 1.5\n  - ~\n";
        let yaml: serde_yaml::Value = serde_yaml::from_str(src).unwrap();
        let doc = yaml_to_document(&yaml).unwrap();

        let keys: Vec<&String> = doc.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "alpha", "3", "nested"]);
        assert_eq!(doc["3"], "three");
        assert_eq!(doc["nested"], json!([1.5, null]));
    }

    #[test]
    fn yaml_tags_are_dropped() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("value: !custom 12").unwrap();
        let doc = yaml_to_document(&yaml).unwrap();
        assert_eq!(doc, json!({"value": 12}));
    }

    #[test]
    fn non_finite_floats_load_as_numbers() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("up: .inf\ndown: -.inf\nodd: .nan\n").unwrap();
        let doc = yaml_to_document(&yaml).unwrap();
        for key in ["up", "down", "odd"] {
            assert_eq!(type_tag_of(&doc[key]), TypeTag::Number, "{key}");
        }
        assert_eq!(doc["up"].as_f64(), Some(f64::MAX));
        assert_eq!(doc["down"].as_f64(), Some(f64::MIN));
        assert_eq!(doc["odd"].as_f64(), Some(0.0));
    }
}
