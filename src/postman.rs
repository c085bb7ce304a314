use log::debug;

use crate::config::DocsConfig;
use crate::format::DocumentFormat;
use crate::models::{Collection, CollectionItem, Header, Item, QueryParam, Request, Url, Variable};
use crate::overrides::MergeRules;
use crate::route::{ParameterLocation, RouteEntry};

const DEFAULT_PROTOCOL: &str = "https";

/// Produces a Postman v2.1 collection.
///
/// Security requirements computed for a route have no place in a collection item and are not
/// emitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PostmanFormat {
    protocol: String,
    base_path: Option<String>,
}

impl PostmanFormat {
    pub fn new(config: &DocsConfig) -> Self {
        let protocol = config
            .schemes
            .as_ref()
            .and_then(|schemes| schemes.first().cloned())
            .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());

        let base_path = config
            .basePath
            .as_ref()
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty());

        Self { protocol, base_path }
    }

    fn url(&self, host: &str, route: &RouteEntry) -> Url {
        let full_path = match &self.base_path {
            Some(base) if base.starts_with('/') => format!("{}{}", base, route.normalized_path()),
            Some(base) => format!("/{}{}", base, route.normalized_path()),
            None => route.normalized_path(),
        };

        Url {
            raw: format!("{}{}", host, full_path),
            protocol: self.protocol.clone(),
            host: vec![host.to_string()],
            path: full_path
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(String::from)
                .collect(),
            query: route
                .parameters_in(ParameterLocation::Query)
                .map(|p| QueryParam {
                    key: p.name.clone(),
                    value: String::new(),
                    description: p.description.clone(),
                })
                .collect(),
            variable: route
                .parameters_in(ParameterLocation::Path)
                .map(|p| Variable {
                    key: p.name.clone(),
                    value: String::new(),
                    description: p.description.clone(),
                })
                .collect(),
        }
    }
}

impl Default for PostmanFormat {
    fn default() -> Self {
        Self::new(&DocsConfig::default())
    }
}

impl DocumentFormat for PostmanFormat {
    type Document = Collection;

    fn default_document(&self, _service_name: &str) -> Collection {
        Collection::default()
    }

    fn apply_overrides(&self, mut collection: Collection, config: &DocsConfig) -> Collection {
        if let Some(host) = &config.host {
            collection.host = host.clone();
        }
        if let Some(title) = &config.title {
            collection.info.name = title.clone();
        }
        if let Some(description) = &config.description {
            collection.info.description = description.clone();
        }
        if let Some(schema) = &config.schema {
            collection.info.schema = schema.clone();
        }
        if let Some(version) = &config.version {
            collection.info.version = Some(version.clone());
        }
        if let Some(postman_id) = &config.postmanId {
            collection.info._postman_id = postman_id.clone();
        }
        collection
    }

    fn merge_rules(&self) -> MergeRules {
        MergeRules {
            target: "Postman collection",
            keyed: &[],
            appended: &["item"],
        }
    }

    fn append_route(&self, mut collection: Collection, route: &RouteEntry) -> Collection {
        let content_types = route.consumes.iter().flatten().map(|media_type| Header {
            key: "Content-Type".to_string(),
            value: media_type.clone(),
            type_: "text".to_string(),
            description: None,
        });

        let headers = route.parameters_in(ParameterLocation::Header).map(|p| Header {
            key: p.name.clone(),
            value: p.value.clone().unwrap_or_default(),
            type_: "text".to_string(),
            description: p.description.clone(),
        });

        let item = Item {
            name: route.display_name().to_string(),
            request: Request {
                method: route.method.to_uppercase(),
                header: content_types.chain(headers).collect(),
                url: self.url(&collection.host, route),
                description: route.description.clone().unwrap_or_default(),
            },
        };

        debug!("Added request {} {}", item.request.method, item.request.url.raw);
        collection.item.push(CollectionItem::Request(item));
        collection
    }
}
