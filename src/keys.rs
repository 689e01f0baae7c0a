//! Required top-level keys.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Either a single key or a list of keys; both spellings are accepted in
/// config files (`keys: name` / `keys: [name, version]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredKeys {
    One(String),
    Many(Vec<String>),
}

impl RequiredKeys {
    pub fn as_slice(&self) -> &[String] {
        match self {
            RequiredKeys::One(k) => std::slice::from_ref(k),
            RequiredKeys::Many(ks) => ks,
        }
    }
}

impl From<Vec<String>> for RequiredKeys {
    fn from(keys: Vec<String>) -> Self {
        RequiredKeys::Many(keys)
    }
}

impl From<&str> for RequiredKeys {
    fn from(key: &str) -> Self {
        RequiredKeys::One(key.to_string())
    }
}

/// Keys from `keys` that `doc` does not own at the top level, in input order.
/// A document that isn't a mapping is missing all of them.
pub fn check_keys(doc: &Value, keys: &RequiredKeys) -> Vec<String> {
    let map = doc.as_object();
    keys.as_slice()
        .iter()
        .filter(|k| !map.is_some_and(|m| m.contains_key(k.as_str())))
        .cloned()
        .collect()
}
