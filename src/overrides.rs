use log::{debug, info};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::config::has_extension;
use crate::error::{DocsError, Result};

/// How a target document combines with an external partial document.
///
/// Fields listed in `keyed` are mappings merged key by key, incoming keys replacing existing
/// ones. Fields listed in `appended` are lists extended with the incoming entries. Every other
/// top-level field is replaced by the incoming value.
#[derive(Debug, Clone, Copy)]
pub struct MergeRules {
    pub target: &'static str,
    pub keyed: &'static [&'static str],
    pub appended: &'static [&'static str],
}

/// Read one override file. `.yml`/`.yaml` files are parsed as YAML, everything else as JSON.
/// The document must be a mapping.
pub fn load_override_file(path: &Path) -> Result<Map<String, Value>> {
    debug!("Reading override file {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| DocsError::OverrideRead {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed: std::result::Result<Value, String> = if has_extension(path, &["yml", "yaml"]) {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    };

    match parsed {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DocsError::OverrideParse {
            path: path.to_path_buf(),
            message: format!("expected a mapping at the top level, found {}", kind_of(&other)),
        }),
        Err(message) => Err(DocsError::OverrideParse {
            path: path.to_path_buf(),
            message,
        }),
    }
}

/// Merge `incoming` into `base` following `rules`.
pub fn merge_documents(base: &mut Map<String, Value>, incoming: Map<String, Value>, rules: &MergeRules) {
    for (key, value) in incoming {
        let key_str = key.as_str();

        if rules.keyed.iter().any(|k| *k == key_str) {
            if let (Some(Value::Object(existing)), Value::Object(entries)) = (base.get_mut(key_str), &value) {
                for (entry_key, entry) in entries {
                    existing.insert(entry_key.clone(), entry.clone());
                }
                continue;
            }
        } else if rules.appended.iter().any(|k| *k == key_str) {
            if let (Some(Value::Array(existing)), Value::Array(entries)) = (base.get_mut(key_str), &value) {
                existing.extend(entries.iter().cloned());
                continue;
            }
        }

        base.insert(key, value);
    }
}

/// Merge every override file, in order, into `document`. Later files win on conflicting keys.
/// A missing or malformed file aborts the merge.
pub fn merge_override_files<D>(document: D, files: &[PathBuf], rules: &MergeRules) -> Result<D>
where
    D: Serialize + DeserializeOwned,
{
    if files.is_empty() {
        return Ok(document);
    }

    let mut merged = match serde_json::to_value(&document)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    for file in files {
        let incoming = load_override_file(file)?;
        debug!("Merging {} top-level fields from {:?}", incoming.len(), file);
        merge_documents(&mut merged, incoming, rules);
    }

    let document = serde_json::from_value(Value::Object(merged)).map_err(|source| {
        DocsError::OverrideShape {
            path: files.last().cloned().unwrap_or_default(),
            target: rules.target,
            source,
        }
    })?;

    info!("Merged {} override file(s)", files.len());
    Ok(document)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use serde_json::json;
    use tempfile::tempdir;

    const RULES: MergeRules = MergeRules {
        target: "test",
        keyed: &["paths", "definitions"],
        appended: &["item"],
    };

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Doc {
        title: String,
        #[serde(default)]
        paths: Map<String, Value>,
        #[serde(default)]
        item: Vec<Value>,
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_merge_documents_rules() {
        let mut base = object(json!({
            "title": "base",
            "host": "a.example.com",
            "paths": { "/a": { "get": {} }, "/foo": { "get": { "summary": "old" } } },
            "item": [1]
        }));
        let incoming = object(json!({
            "title": "incoming",
            "paths": { "/foo": { "post": {} }, "/b": {} },
            "definitions": { "Widget": { "type": "object" } },
            "item": [2, 3]
        }));

        merge_documents(&mut base, incoming, &RULES);

        assert_eq!(
            Value::Object(base),
            json!({
                "title": "incoming",
                "host": "a.example.com",
                "paths": { "/a": { "get": {} }, "/foo": { "post": {} }, "/b": {} },
                "item": [1, 2, 3],
                "definitions": { "Widget": { "type": "object" } }
            })
        );
    }

    #[test]
    fn test_later_files_win() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.json");
        let second = dir.path().join("second.yml");
        fs::write(
            &first,
            r#"{"title": "first", "paths": {"/foo": {"v": 1}, "/only-first": {}}}"#,
        )
        .unwrap();
        fs::write(&second, "paths:\n  /foo:\n    v: 2\n").unwrap();

        let doc = Doc {
            title: "base".to_string(),
            paths: Map::new(),
            item: Vec::new(),
        };
        let merged = merge_override_files(doc, &[first, second], &RULES).unwrap();

        assert_eq!(merged.title, "first");
        assert_eq!(merged.paths["/foo"], json!({ "v": 2 }));
        assert!(merged.paths.contains_key("/only-first"));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempdir().unwrap();
        let doc = Doc {
            title: "base".to_string(),
            paths: Map::new(),
            item: Vec::new(),
        };

        let err = merge_override_files(doc, &[dir.path().join("absent.json")], &RULES).unwrap_err();
        assert!(matches!(err, DocsError::OverrideRead { .. }));
    }

    #[test]
    fn test_unparsable_file_is_fatal() {
        let dir = tempdir().unwrap();
        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();

        let err = load_override_file(&broken).unwrap_err();
        assert!(matches!(err, DocsError::OverrideParse { .. }));

        let list = dir.path().join("list.json");
        fs::write(&list, "[1, 2]").unwrap();
        let err = load_override_file(&list).unwrap_err();
        assert!(matches!(err, DocsError::OverrideParse { .. }));
    }

    #[test]
    fn test_shape_mismatch_is_fatal() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("bad-title.json");
        fs::write(&file, r#"{"title": 42}"#).unwrap();
        let doc = Doc {
            title: "base".to_string(),
            paths: Map::new(),
            item: Vec::new(),
        };

        let err = merge_override_files(doc, &[file], &RULES).unwrap_err();
        assert!(matches!(err, DocsError::OverrideShape { target: "test", .. }));
    }
}
