use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

use crate::config::DocsConfig;
use crate::overrides::MergeRules;
use crate::route::RouteEntry;

/// An output document shape. Every step takes the accumulated document by value and returns
/// the updated one.
pub trait DocumentFormat {
    type Document: Serialize + DeserializeOwned;

    /// The document every run starts from.
    fn default_document(&self, service_name: &str) -> Self::Document;

    /// Apply the scalar `custom.autoswagger` overrides that are present.
    fn apply_overrides(&self, document: Self::Document, config: &DocsConfig) -> Self::Document;

    fn merge_rules(&self) -> MergeRules;

    fn append_route(&self, document: Self::Document, route: &RouteEntry) -> Self::Document;

    /// Last pass once every route is in.
    fn finish(&self, document: Self::Document) -> Self::Document {
        document
    }
}

/// Selectable output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Swagger,
    Postman,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Swagger => write!(f, "Swagger"),
            Target::Postman => write!(f, "Postman collection"),
        }
    }
}
