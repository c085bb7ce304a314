#![allow(non_snake_case)]

use log::debug;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::declaration::ServiceDefinition;
use crate::error::{DocsError, Result};

/// Documentation settings read from the `custom.autoswagger` block of the service definition.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct DocsConfig {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default)]
    pub basePath: Option<String>,
    #[serde(default)]
    pub schemes: Option<Vec<String>>,
    /// Postman collection schema URL
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub postmanId: Option<String>,
    #[serde(default)]
    pub swaggerFiles: Vec<String>,
    #[serde(default)]
    pub apiKeyHeaders: Vec<String>,
}

impl DocsConfig {
    /// Override file paths, with relative entries resolved against `base_dir`.
    pub fn override_files(&self, base_dir: &Path) -> Vec<PathBuf> {
        self.swaggerFiles
            .iter()
            .map(|file| {
                let path = Path::new(file);
                if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    base_dir.join(path)
                }
            })
            .collect()
    }
}

/// A loaded service definition along with the directory it was read from.
#[derive(Debug, Clone)]
pub struct LoadedService {
    pub definition: ServiceDefinition,
    pub base_dir: PathBuf,
}

impl LoadedService {
    pub fn config(&self) -> DocsConfig {
        self.definition.docs_config()
    }
}

/// Read a service definition file. `.json` files are parsed as JSON, everything else as YAML.
pub fn load_service(path: impl AsRef<Path>) -> Result<LoadedService> {
    let path = path.as_ref();
    debug!("Loading service definition from {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| DocsError::ServiceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let definition = parse_service(path, &content)?;
    let base_dir = path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    debug!(
        "Loaded service '{}' with {} functions",
        definition.name(),
        definition.functions.len()
    );

    Ok(LoadedService {
        definition,
        base_dir,
    })
}

fn parse_service(path: &Path, content: &str) -> Result<ServiceDefinition> {
    let parsed = if has_extension(path, &["json"]) {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };

    parsed.map_err(|message| DocsError::ServiceParse {
        path: path.to_path_buf(),
        message,
    })
}

pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_service_yaml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("serverless.yml");
        let mut file = File::create(&file_path).unwrap();
        write!(
            file,
            r#"
service: users-api
custom:
  autoswagger:
    title: Users
    host: api.example.com
    basePath: /dev
    schemes: [https]
    swaggerFiles:
      - docs/extra.json
      - /abs/other.json
    apiKeyHeaders: [x-api-key]
functions: {{}}
"#
        )
        .unwrap();

        let loaded = load_service(&file_path).unwrap();
        let config = loaded.config();

        assert_eq!(loaded.definition.name(), "users-api");
        assert_eq!(config.title, Some("Users".to_string()));
        assert_eq!(config.host, Some("api.example.com".to_string()));
        assert_eq!(config.basePath, Some("/dev".to_string()));
        assert_eq!(config.schemes, Some(vec!["https".to_string()]));
        assert_eq!(config.apiKeyHeaders, vec!["x-api-key"]);
        assert_eq!(
            config.override_files(&loaded.base_dir),
            vec![dir.path().join("docs/extra.json"), PathBuf::from("/abs/other.json")]
        );
    }

    #[test]
    fn test_load_service_json() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("serverless.json");
        std::fs::write(&file_path, r#"{"service": "json-api", "functions": {}}"#).unwrap();

        let loaded = load_service(&file_path).unwrap();
        assert_eq!(loaded.definition.name(), "json-api");
        assert_eq!(loaded.config(), DocsConfig::default());
    }

    #[test]
    fn test_missing_service_file() {
        let dir = tempdir().unwrap();
        let err = load_service(dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, DocsError::ServiceRead { .. }));
    }

    #[test]
    fn test_malformed_service_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("serverless.yml");
        std::fs::write(&file_path, "functions: [unclosed").unwrap();

        let err = load_service(&file_path).unwrap_err();
        assert!(matches!(err, DocsError::ServiceParse { .. }));
    }
}
