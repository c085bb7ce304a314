use indexmap::IndexSet;
use log::{debug, warn};
use serde_json::{json, Value};

use crate::config::DocsConfig;
use crate::format::DocumentFormat;
use crate::models::{Operation, Parameter, PathItem, Response, SecurityDefinition, Swagger};
use crate::overrides::MergeRules;
use crate::route::{ParameterEntry, RouteEntry};

const DEFAULT_MEDIA_TYPE: &str = "application/json";
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Produces a Swagger 2.0 document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwaggerFormat;

impl DocumentFormat for SwaggerFormat {
    type Document = Swagger;

    fn default_document(&self, service_name: &str) -> Swagger {
        let mut swagger = Swagger::default();
        swagger.info.title = service_name.to_string();
        swagger
    }

    fn apply_overrides(&self, mut swagger: Swagger, config: &DocsConfig) -> Swagger {
        if let Some(title) = &config.title {
            swagger.info.title = title.clone();
        }
        if let Some(description) = &config.description {
            swagger.info.description = Some(description.clone());
        }
        if let Some(version) = &config.version {
            swagger.info.version = version.clone();
        }
        if let Some(host) = &config.host {
            swagger.host = Some(host.clone());
        }
        if let Some(base_path) = &config.basePath {
            swagger.basePath = Some(base_path.clone());
        }
        if let Some(schemes) = &config.schemes {
            swagger.schemes = schemes.clone();
        }

        for header in &config.apiKeyHeaders {
            swagger.securityDefinitions.insert(
                header.clone(),
                SecurityDefinition {
                    type_: "apiKey".to_string(),
                    name: Some(header.clone()),
                    in_type: Some("header".to_string()),
                    ..Default::default()
                },
            );
        }

        swagger
    }

    fn merge_rules(&self) -> MergeRules {
        MergeRules {
            target: "Swagger",
            keyed: &["paths", "definitions", "securityDefinitions"],
            appended: &[],
        }
    }

    fn append_route(&self, mut swagger: Swagger, route: &RouteEntry) -> Swagger {
        let path = route.normalized_path();
        let method = route.method.to_lowercase();

        if !PathItem::supports(&method) {
            warn!(
                "Skipping {} {} of function '{}': method is not supported by Swagger 2.0",
                route.method, path, route.function_name
            );
            return swagger;
        }

        let path_item = swagger.paths.entry(path.clone()).or_default();
        if let Some(slot) = path_item.operation_mut(&method) {
            if slot.is_some() {
                warn!("Replacing existing operation {} {}", method, path);
            }
            *slot = Some(operation(route, &method));
            debug!("Added operation {} {}", method, path);
        }

        swagger
    }

    fn finish(&self, swagger: Swagger) -> Swagger {
        for name in missing_definitions(&swagger) {
            warn!("Schema '{}' is referenced but not defined in definitions", name);
        }
        swagger
    }
}

fn operation(route: &RouteEntry, method: &str) -> Operation {
    Operation {
        summary: Some(route.display_name().to_string()),
        description: Some(route.description.clone().unwrap_or_default()),
        tags: route.tags.clone(),
        operationId: Some(format!("{}.{}.{}", route.function_name, method, route.path)),
        consumes: media_types(route.consumes.as_ref()),
        produces: media_types(route.produces.as_ref()),
        parameters: route.parameters.iter().map(parameter).collect(),
        responses: route
            .responses
            .iter()
            .map(|(code, response)| {
                let response = Response {
                    description: Some(response.description.clone()),
                    schema: response.schema_ref.as_deref().map(schema_ref),
                    ..Default::default()
                };
                (code.clone(), response)
            })
            .collect(),
        security: route.security.clone(),
        ..Default::default()
    }
}

fn media_types(declared: Option<&Vec<String>>) -> Vec<String> {
    declared
        .cloned()
        .unwrap_or_else(|| vec![DEFAULT_MEDIA_TYPE.to_string()])
}

fn parameter(entry: &ParameterEntry) -> Parameter {
    let mut param = Parameter {
        name: entry.name.clone(),
        in_type: entry.location.as_str().to_string(),
        description: entry.description.clone(),
        required: Some(entry.required),
        type_: entry.type_.clone(),
        schema: entry.schema_ref.as_deref().map(schema_ref),
        default: entry.value.clone().map(Value::String),
        ..Default::default()
    };

    if let Some(items_type) = &entry.array_items_type {
        param.items = Some(json!({ "type": items_type }));
        param.collectionFormat = Some("multi".to_string());
    }

    param
}

fn schema_ref(reference: &str) -> Value {
    json!({ "$ref": reference })
}

/// Names referenced through `#/definitions/...` by any operation but absent from `definitions`.
pub fn missing_definitions(swagger: &Swagger) -> Vec<String> {
    let mut referenced: IndexSet<String> = IndexSet::new();

    for path_item in swagger.paths.values() {
        for operation in path_item.operations() {
            for param in &operation.parameters {
                for schema in param.schema.iter().chain(&param.items) {
                    collect_references(schema, &mut referenced);
                }
            }
            for response in operation.responses.values() {
                if let Some(schema) = &response.schema {
                    collect_references(schema, &mut referenced);
                }
            }
        }
    }

    referenced
        .into_iter()
        .filter(|name| !swagger.definitions.contains_key(name))
        .collect()
}

/// Collect every `#/definitions/` name referenced anywhere inside `schema`.
fn collect_references(schema: &Value, references: &mut IndexSet<String>) {
    match schema {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::String(reference) if key == "$ref" => {
                        if let Some(name) = reference.strip_prefix(DEFINITIONS_PREFIX) {
                            references.insert(name.to_string());
                        }
                    }
                    _ => collect_references(value, references),
                }
            }
        }
        Value::Array(values) => {
            for value in values {
                collect_references(value, references);
            }
        }
        _ => {}
    }
}
