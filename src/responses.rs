use indexmap::IndexMap;

use crate::declaration::ResponseDeclaration;
use crate::route::{definition_ref, ResponseEntry};

/// Map declared responses to documentation entries, keeping declaration order.
/// Without declarations a single `200` entry is produced.
pub fn format_responses(
    declared: Option<&IndexMap<String, ResponseDeclaration>>,
) -> IndexMap<String, ResponseEntry> {
    let declared = match declared {
        Some(declared) if !declared.is_empty() => declared,
        _ => {
            let mut responses = IndexMap::new();
            responses.insert("200".to_string(), default_response("200"));
            return responses;
        }
    };

    declared
        .iter()
        .map(|(code, declaration)| {
            let response = match declaration {
                ResponseDeclaration::Description(description) => ResponseEntry {
                    description: description.clone(),
                    schema_ref: None,
                },
                ResponseDeclaration::Detailed {
                    description,
                    bodyType: body_type,
                } => ResponseEntry {
                    description: description
                        .clone()
                        .filter(|d| !d.is_empty())
                        .unwrap_or_else(|| default_description(code)),
                    schema_ref: body_type.as_deref().map(definition_ref),
                },
            };
            (code.clone(), response)
        })
        .collect()
}

fn default_response(code: &str) -> ResponseEntry {
    ResponseEntry {
        description: default_description(code),
        schema_ref: None,
    }
}

fn default_description(code: &str) -> String {
    format!("{} response", code)
}
