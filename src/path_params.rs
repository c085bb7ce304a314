use indexmap::IndexMap;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::declaration::PathParameterInfo;
use crate::route::{ParameterEntry, ParameterLocation};

static PATH_PARAM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{([^{}]+)\}").unwrap()
});

/// Names of the `{name}` placeholders in a path template, left to right, without duplicates.
/// A greedy placeholder such as `{proxy+}` yields `proxy`.
pub fn template_parameters(path: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for captures in PATH_PARAM_REGEX.captures_iter(path) {
        let name = captures[1].trim_end_matches('+').to_string();
        if !name.is_empty() && !names.contains(&name) {
            names.push(name);
        }
    }

    names
}

/// Resolve the path parameters of a route.
///
/// Explicitly described parameters come first, in mapping order, and take precedence over the
/// template. Placeholders nobody described follow in template order, always required.
pub fn resolve_path_parameters(
    path: &str,
    explicit: Option<&IndexMap<String, PathParameterInfo>>,
) -> Vec<ParameterEntry> {
    let mut remaining = template_parameters(path);
    let mut parameters = Vec::with_capacity(remaining.len());

    if let Some(explicit) = explicit {
        for (name, info) in explicit {
            match remaining.iter().position(|n| n == name) {
                Some(index) => {
                    remaining.remove(index);
                }
                None => warn!(
                    "Path parameter '{}' is documented but does not appear in path '{}'",
                    name, path
                ),
            }
            parameters.push(path_parameter(name, info.required, info.description.clone()));
        }
    }

    for name in remaining {
        debug!("Inferred path parameter '{}' from path '{}'", name, path);
        parameters.push(path_parameter(&name, None, None));
    }

    parameters
}

fn path_parameter(name: &str, required: Option<bool>, description: Option<String>) -> ParameterEntry {
    ParameterEntry {
        required: required.unwrap_or(true),
        description,
        type_: Some("string".to_string()),
        ..ParameterEntry::new(ParameterLocation::Path, name)
    }
}
