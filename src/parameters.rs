use indexmap::IndexMap;
use log::{debug, warn};

use crate::declaration::{NativeParameter, ParameterInfo, PathParameterInfo, RouteDeclaration};
use crate::path_params::resolve_path_parameters;
use crate::route::{definition_ref, ParameterEntry, ParameterLocation, SecurityRequirement};

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const AUTHORIZATION_PLACEHOLDER: &str = "Token {{token}}";

const BODY_DESCRIPTION: &str = "Body required in the request";
const DEFAULT_ARRAY_ITEMS_TYPE: &str = "string";

/// Build every documentation parameter of a route: body, then path, header and query parameters.
/// No two entries share a `(location, name)` pair.
pub fn assemble_parameters(route: &RouteDeclaration) -> Vec<ParameterEntry> {
    let mut parameters: Vec<ParameterEntry> = Vec::new();

    if let Some(body_type) = &route.bodyType {
        push_unique(&mut parameters, body_parameter(body_type));
    }

    for param in resolve_path_parameters(&route.path, explicit_path_parameters(route).as_ref()) {
        push_unique(&mut parameters, param);
    }

    for param in header_parameters(route) {
        push_unique(&mut parameters, param);
    }

    for param in query_parameters(route) {
        push_unique(&mut parameters, param);
    }

    parameters
}

fn push_unique(parameters: &mut Vec<ParameterEntry>, param: ParameterEntry) {
    let duplicate = parameters
        .iter()
        .any(|p| p.location == param.location && p.name == param.name);

    if duplicate {
        debug!(
            "Skipping duplicate {} parameter '{}'",
            param.location.as_str(),
            param.name
        );
        return;
    }

    parameters.push(param);
}

fn body_parameter(body_type: &str) -> ParameterEntry {
    ParameterEntry {
        required: true,
        description: Some(BODY_DESCRIPTION.to_string()),
        schema_ref: Some(definition_ref(body_type)),
        ..ParameterEntry::new(ParameterLocation::Body, "body")
    }
}

/// `pathParameters` when given, otherwise the native `request.parameters.paths` block.
fn explicit_path_parameters(route: &RouteDeclaration) -> Option<IndexMap<String, PathParameterInfo>> {
    if let Some(explicit) = &route.pathParameters {
        return Some(explicit.clone());
    }

    let native = route.native_parameters()?.paths.as_ref()?;
    Some(
        native
            .iter()
            .map(|(name, param)| {
                let info = PathParameterInfo {
                    required: param.required(),
                    description: param.description().map(String::from),
                };
                (name.clone(), info)
            })
            .collect(),
    )
}

/// Synthesize explicit-style metadata from a native block: required flag only, string typed,
/// no description.
fn from_native(native: &IndexMap<String, NativeParameter>) -> IndexMap<String, ParameterInfo> {
    native
        .iter()
        .map(|(name, param)| {
            let info = ParameterInfo {
                required: param.required(),
                type_: Some("string".to_string()),
                description: None,
                arrayItemsType: None,
            };
            (name.clone(), info)
        })
        .collect()
}

fn header_parameters(route: &RouteDeclaration) -> Vec<ParameterEntry> {
    let native = route.native_parameters().and_then(|n| n.headers.as_ref());
    let source = match (&route.headerParameters, native) {
        (Some(explicit), _) => explicit.clone(),
        (None, Some(native)) => from_native(native),
        (None, None) => IndexMap::new(),
    };

    let mut headers: Vec<ParameterEntry> = source
        .iter()
        .map(|(name, info)| ParameterEntry {
            required: info.required.unwrap_or(false),
            type_: Some(info.type_.clone().unwrap_or_else(|| "string".to_string())),
            description: info.description.clone(),
            ..ParameterEntry::new(ParameterLocation::Header, name.as_str())
        })
        .collect();

    if route.authorization {
        let declared = headers
            .iter_mut()
            .find(|p| p.name.eq_ignore_ascii_case(AUTHORIZATION_HEADER));

        match declared {
            Some(header) => header.value = Some(AUTHORIZATION_PLACEHOLDER.to_string()),
            None => headers.push(ParameterEntry {
                required: true,
                type_: Some("string".to_string()),
                value: Some(AUTHORIZATION_PLACEHOLDER.to_string()),
                ..ParameterEntry::new(ParameterLocation::Header, AUTHORIZATION_HEADER)
            }),
        }
    }

    headers
}

fn query_parameters(route: &RouteDeclaration) -> Vec<ParameterEntry> {
    let native = route.native_parameters().and_then(|n| n.querystrings.as_ref());
    let source = match (&route.queryStringParameters, native) {
        (Some(explicit), _) => explicit.clone(),
        (None, Some(native)) => from_native(native),
        (None, None) => return Vec::new(),
    };

    source
        .iter()
        .map(|(name, info)| {
            let mut param = ParameterEntry {
                required: info.required.unwrap_or(false),
                type_: Some(info.type_.clone().unwrap_or_else(|| "string".to_string())),
                description: info.description.clone(),
                ..ParameterEntry::new(ParameterLocation::Query, name.as_str())
            };

            if param.is_array() {
                let items_type = match &info.arrayItemsType {
                    Some(items_type) => items_type.clone(),
                    None => {
                        warn!(
                            "Array query parameter '{}' on '{}' has no arrayItemsType, using '{}'",
                            name, route.path, DEFAULT_ARRAY_ITEMS_TYPE
                        );
                        DEFAULT_ARRAY_ITEMS_TYPE.to_string()
                    }
                };
                param.array_items_type = Some(items_type);
            }

            param
        })
        .collect()
}

/// Security requirements for a route: a single requirement holding a `name: []` entry for every
/// credential name, so all of them must accompany the request. A route-level `security` list
/// replaces the configured API key headers. No names, no requirement.
pub fn security_requirements(
    api_key_headers: &[String],
    route_security: Option<&[String]>,
) -> Vec<SecurityRequirement> {
    let requirement: SecurityRequirement = route_security
        .unwrap_or(api_key_headers)
        .iter()
        .map(|name| (name.clone(), Vec::new()))
        .collect();

    if requirement.is_empty() {
        Vec::new()
    } else {
        vec![requirement]
    }
}
