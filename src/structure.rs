//! Shape matching: walk a document alongside a [`StructureTemplate`] and
//! collect the dotted paths that don't conform.
//!
//! Pure: every call builds and returns its own list, callers concatenate.
use serde_json::Value;

use crate::document::{has_tag, member};
use crate::template::{join_path, ShapeTemplate, StructureTemplate};

/// How mismatches inside sequence elements are addressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PathStyle {
    /// Elements share the sequence's path: `items.id` for any element.
    /// Several failing elements therefore report the same path repeatedly.
    #[default]
    Collapsed,
    /// Elements get their index appended: `items.0.id`, `items.3.id`.
    Indexed,
}

/// Paths in `doc` that are missing or carry the wrong type, in template order.
pub fn validate_structure(doc: &Value, template: &StructureTemplate, style: PathStyle) -> Vec<String> {
    walk_fields(Some(doc), template, "", style)
}

fn walk_fields(
    doc: Option<&Value>,
    fields: &StructureTemplate,
    parent: &str,
    style: PathStyle,
) -> Vec<String> {
    let mut not_found = Vec::new();
    for (key, entry) in fields {
        let current = join_path(parent, key);
        let value = member(doc, key);
        match entry {
            ShapeTemplate::Array(item) => match value {
                Some(Value::Array(xs)) => {
                    for (i, child) in xs.iter().enumerate() {
                        let at = element_path(&current, i, style);
                        not_found.extend(walk_element(child, item, &at, style));
                    }
                }
                _ => not_found.push(current),
            },
            ShapeTemplate::Leaf(tag) => {
                if !has_tag(value, *tag) {
                    not_found.push(current);
                }
            }
            // absent intermediates still walk every leaf beneath them
            ShapeTemplate::Map(nested) => {
                not_found.extend(walk_fields(value, nested, &current, style));
            }
            ShapeTemplate::Ignored => {}
        }
    }
    not_found
}

/// One sequence element against the array's element template.
fn walk_element(child: &Value, item: &ShapeTemplate, at: &str, style: PathStyle) -> Vec<String> {
    match item {
        ShapeTemplate::Map(fields) => walk_fields(Some(child), fields, at, style),
        ShapeTemplate::Leaf(tag) => {
            if has_tag(Some(child), *tag) { Vec::new() } else { vec![at.to_string()] }
        }
        ShapeTemplate::Array(inner) => match child {
            Value::Array(xs) => xs
                .iter()
                .enumerate()
                .flat_map(|(i, x)| walk_element(x, inner, &element_path(at, i, style), style))
                .collect(),
            _ => vec![at.to_string()],
        },
        ShapeTemplate::Ignored => Vec::new(),
    }
}

fn element_path(array_path: &str, index: usize, style: PathStyle) -> String {
    match style {
        PathStyle::Collapsed => array_path.to_string(),
        PathStyle::Indexed => format!("{array_path}.{index}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::parse_structure;
    use serde_json::json;

    fn check(doc: Value, template: Value) -> Vec<String> {
        let t = parse_structure(&template).unwrap();
        validate_structure(&doc, &t, PathStyle::Collapsed)
    }

    #[test]
    fn nested_leaf_matches() {
        assert!(check(json!({"a": {"b": "x"}}), json!({"a": {"b": "string"}})).is_empty());
    }

    #[test]
    fn nested_leaf_with_wrong_type() {
        assert_eq!(check(json!({"a": {"b": 1}}), json!({"a": {"b": "string"}})), ["a.b"]);
    }

    #[test]
    fn array_of_maps_matches() {
        let t = json!({"items": [{"id": "string"}]});
        assert!(check(json!({"items": [{"id": "1"}]}), t).is_empty());
    }

    #[test]
    fn array_element_mismatch_uses_the_array_path() {
        let t = json!({"items": [{"id": "string"}]});
        assert_eq!(check(json!({"items": [{"id": 1}]}), t), ["items.id"]);
    }

    #[test]
    fn sibling_element_mismatches_collapse_onto_one_path() {
        let t = json!({"items": [{"id": "string"}]});
        let doc = json!({"items": [{"id": 1}, {"id": "ok"}, {"name": "x"}]});
        assert_eq!(check(doc, t), ["items.id", "items.id"]);
    }

    #[test]
    fn indexed_style_appends_element_indices() {
        let t = parse_structure(&json!({"items": [{"id": "string"}], "tags": ["string"]})).unwrap();
        let doc = json!({"items": [{"id": "a"}, {"id": 2}], "tags": ["x", 3, "y"]});
        assert_eq!(validate_structure(&doc, &t, PathStyle::Indexed), ["items.1.id", "tags.1"]);
    }

    #[test]
    fn non_sequence_under_array_template_is_one_mismatch() {
        let t = json!({"items": [{"id": "string"}]});
        assert_eq!(check(json!({"items": {"id": "1"}}), t.clone()), ["items"]);
        assert_eq!(check(json!({}), t), ["items"]);
    }

    #[test]
    fn empty_sequence_satisfies_any_element_template() {
        assert!(check(json!({"items": []}), json!({"items": [{"id": "string"}]})).is_empty());
    }

    #[test]
    fn leaf_element_templates_check_each_element() {
        let t = json!({"tags": ["string"]});
        assert!(check(json!({"tags": ["a", "b"]}), t.clone()).is_empty());
        assert_eq!(check(json!({"tags": ["a", 1, false]}), t), ["tags", "tags"]);
    }

    #[test]
    fn missing_intermediate_reports_every_leaf_beneath_it() {
        let t = json!({"owner": {"name": "string", "contact": {"email": "string"}, "roles": ["string"]}});
        assert_eq!(
            check(json!({"other": 1}), t),
            ["owner.name", "owner.contact.email", "owner.roles"]
        );
    }

    #[test]
    fn ignored_template_entries_contribute_nothing() {
        assert!(check(json!({}), json!({"a": null, "b": 1, "c": false})).is_empty());
    }

    #[test]
    fn mismatches_follow_template_key_order() {
        let t = json!({"z": "string", "a": "number", "m": "boolean"});
        assert_eq!(check(json!({"a": "x", "m": 1}), t), ["z", "a", "m"]);
    }

    #[test]
    fn explicit_null_only_matches_null_leaf() {
        assert!(check(json!({"a": null}), json!({"a": "null"})).is_empty());
        assert_eq!(check(json!({}), json!({"a": "null"})), ["a"]);
    }

    #[test]
    fn nested_sequences() {
        let t = json!({"grid": [["number"]]});
        assert!(check(json!({"grid": [[1, 2], [3]]}), t.clone()).is_empty());
        assert_eq!(check(json!({"grid": [[1, "x"], 4]}), t), ["grid", "grid"]);
    }

    #[test]
    fn non_map_document_fails_every_leaf() {
        assert_eq!(check(json!(["a"]), json!({"a": "string", "b": {"c": "number"}})), ["a", "b.c"]);
    }
}
