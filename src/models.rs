#![allow(non_snake_case)]

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const SWAGGER_VERSION: &str = "2.0";
pub const POSTMAN_SCHEMA: &str = "https://schema.getpostman.com/json/collection/v2.1.0/collection.json";

/// Represents a complete Swagger 2.0 document
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Swagger {
    pub swagger: String,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub basePath: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub schemes: Vec<String>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(default)]
    pub definitions: IndexMap<String, serde_json::Value>,
    #[serde(default)]
    pub securityDefinitions: IndexMap<String, SecurityDefinition>,
    /// Top-level fields this model does not describe (`tags`, `externalDocs`, `x-*`, ...)
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for Swagger {
    fn default() -> Self {
        Self {
            swagger: SWAGGER_VERSION.to_string(),
            info: Info {
                title: String::new(),
                version: "1".to_string(),
                description: None,
                extra: IndexMap::new(),
            },
            host: None,
            basePath: None,
            schemes: vec!["http".to_string(), "https".to_string()],
            paths: IndexMap::new(),
            definitions: IndexMap::new(),
            securityDefinitions: IndexMap::new(),
            extra: IndexMap::new(),
        }
    }
}

/// Information about the API
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Info {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// A single path item with all its operations
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patch: Option<Operation>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl PathItem {
    /// Lowercase HTTP methods a path item can hold.
    pub const METHODS: [&'static str; 7] = ["get", "put", "post", "delete", "options", "head", "patch"];

    pub fn supports(method: &str) -> bool {
        Self::METHODS.iter().any(|m| *m == method)
    }

    /// The operation slot for a lowercase HTTP method, if Swagger 2.0 knows the method.
    pub fn operation_mut(&mut self, method: &str) -> Option<&mut Option<Operation>> {
        match method {
            "get" => Some(&mut self.get),
            "put" => Some(&mut self.put),
            "post" => Some(&mut self.post),
            "delete" => Some(&mut self.delete),
            "options" => Some(&mut self.options),
            "head" => Some(&mut self.head),
            "patch" => Some(&mut self.patch),
            _ => None,
        }
    }

    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        [
            &self.get,
            &self.put,
            &self.post,
            &self.delete,
            &self.options,
            &self.head,
            &self.patch,
        ]
        .into_iter()
        .flatten()
    }
}

/// An operation (endpoint) of the API
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub operationId: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub produces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub security: Vec<IndexMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Parameter for an operation. Generated parameters always carry `name`, `in` and `required`;
/// parameters read from override files may be bare `$ref`s and keep every key as written.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Parameter {
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub name: String,
    #[serde(rename = "in", skip_serializing_if = "String::is_empty", default)]
    pub in_type: String, // body, path, header, query
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub required: Option<bool>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none", default)]
    pub type_: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub items: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub collectionFormat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// API response
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub schema: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Security scheme definition
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SecurityDefinition {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub name: Option<String>,
    #[serde(rename = "in", skip_serializing_if = "Option::is_none", default)]
    pub in_type: Option<String>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

/// Represents a Postman v2.1 collection
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Collection {
    pub info: CollectionInfo,
    #[serde(default)]
    pub item: Vec<CollectionItem>,
    #[serde(default)]
    pub host: String,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            info: CollectionInfo {
                _postman_id: String::new(),
                name: "Postman collection".to_string(),
                description: String::new(),
                schema: POSTMAN_SCHEMA.to_string(),
                version: None,
            },
            item: Vec::new(),
            host: "example.com".to_string(),
            extra: IndexMap::new(),
        }
    }
}

/// Collection metadata
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct CollectionInfo {
    #[serde(default)]
    pub _postman_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub schema: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub version: Option<String>,
}

/// An entry of a collection's `item` list. Entries built from routes are typed; entries read
/// back from override files (requests, folders, scripts, bodies) are kept verbatim.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum CollectionItem {
    Imported(serde_json::Value),
    Request(Item),
}

/// A request in the collection
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Item {
    pub name: String,
    pub request: Request,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Request {
    pub method: String,
    #[serde(default)]
    pub header: Vec<Header>,
    pub url: Url,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Header {
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Url {
    pub raw: String,
    #[serde(default)]
    pub protocol: String,
    #[serde(default)]
    pub host: Vec<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub query: Vec<QueryParam>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub variable: Vec<Variable>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct QueryParam {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}

/// Path variable of a request URL
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Variable {
    pub key: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
}
