use log::{debug, info};

use crate::config::DocsConfig;
use crate::declaration::{HttpEvent, RouteDeclaration, ServiceDefinition};
use crate::format::DocumentFormat;
use crate::parameters::{assemble_parameters, security_requirements};
use crate::responses::format_responses;
use crate::route::RouteEntry;

/// A documented HTTP event together with the function that owns it.
#[derive(Debug, Clone, Copy)]
pub struct Route<'a> {
    pub function_name: &'a str,
    pub declaration: &'a RouteDeclaration,
}

/// Every HTTP event worth documenting, functions in declaration order and events in order
/// within each function. Excluded events and shorthand string events are left out.
pub fn collect_routes(service: &ServiceDefinition) -> Vec<Route<'_>> {
    let mut routes = Vec::new();

    for (function_name, function) in &service.functions {
        for event in &function.events {
            match event.http_trigger() {
                Some(HttpEvent::Declared(declaration)) if declaration.exclude => {
                    debug!(
                        "Excluding {} {} of function '{}'",
                        declaration.method, declaration.path, function_name
                    );
                }
                Some(HttpEvent::Declared(declaration)) => routes.push(Route {
                    function_name,
                    declaration,
                }),
                Some(HttpEvent::Shorthand(shorthand)) => {
                    debug!(
                        "Skipping shorthand event '{}' of function '{}'",
                        shorthand, function_name
                    );
                }
                None => {}
            }
        }
    }

    routes
}

/// Derive the format-neutral documentation entry of one route.
pub fn build_route_entry(route: &Route<'_>, config: &DocsConfig) -> RouteEntry {
    let declaration = route.declaration;

    RouteEntry {
        function_name: route.function_name.to_string(),
        method: declaration.method.clone(),
        path: declaration.path.clone(),
        summary: declaration.summary.clone(),
        description: declaration.description.clone(),
        tags: declaration.swaggerTags.clone().unwrap_or_default(),
        consumes: declaration.consumes.clone(),
        produces: declaration.produces.clone(),
        parameters: assemble_parameters(declaration),
        responses: format_responses(declaration.responses.as_ref()),
        security: security_requirements(&config.apiKeyHeaders, declaration.security.as_deref()),
    }
}

/// Append every qualifying route of `service` to `document`.
pub fn populate<F: DocumentFormat>(
    format: &F,
    document: F::Document,
    service: &ServiceDefinition,
    config: &DocsConfig,
) -> F::Document {
    let routes = collect_routes(service);
    info!("Documenting {} route(s)", routes.len());

    routes.iter().fold(document, |document, route| {
        let entry = build_route_entry(route, config);
        format.append_route(document, &entry)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::ParameterLocation;
    use pretty_assertions::assert_eq;

    fn service(yaml: &str) -> ServiceDefinition {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_collect_routes_filters_events() {
        let service = service(
            r#"
functions:
  users:
    handler: users.handler
    events:
      - http:
          method: get
          path: /users
      - http: GET /users/shorthand
      - http:
          method: delete
          path: /users/{id}
          exclude: true
      - schedule: rate(5 minutes)
      - httpApi:
          method: post
          path: /users
  health:
    handler: health.handler
    events:
      - httpApi:
          method: get
          path: /health
"#,
        );

        let routes = collect_routes(&service);
        let summary: Vec<(&str, &str, &str)> = routes
            .iter()
            .map(|r| (r.function_name, r.declaration.method.as_str(), r.declaration.path.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("users", "get", "/users"),
                ("users", "post", "/users"),
                ("health", "get", "/health"),
            ]
        );
    }

    #[test]
    fn test_get_user_scenario() {
        let service = service(
            r#"
functions:
  getUser:
    handler: users.get
    events:
      - http:
          method: GET
          path: /users/{id}
          queryStringParameters:
            verbose:
              required: false
              type: boolean
"#,
        );

        let routes = collect_routes(&service);
        assert_eq!(routes.len(), 1);
        let entry = build_route_entry(&routes[0], &DocsConfig::default());

        assert_eq!(entry.function_name, "getUser");
        assert_eq!(entry.display_name(), "getUser");
        assert_eq!(entry.parameters.len(), 2);

        let id = &entry.parameters[0];
        assert!(id.is(ParameterLocation::Path));
        assert_eq!(id.name, "id");
        assert!(id.required);
        assert_eq!(id.type_, Some("string".to_string()));

        let verbose = &entry.parameters[1];
        assert!(verbose.is(ParameterLocation::Query));
        assert_eq!(verbose.name, "verbose");
        assert!(!verbose.required);
        assert_eq!(verbose.type_, Some("boolean".to_string()));

        assert_eq!(entry.responses.len(), 1);
        assert_eq!(entry.responses["200"].description, "200 response");
        assert_eq!(entry.responses["200"].schema_ref, None);
        assert!(entry.security.is_empty());
    }

    #[test]
    fn test_security_from_config() {
        let service = service(
            r#"
functions:
  getUser:
    events:
      - http:
          method: get
          path: /users
      - http:
          method: get
          path: /partners
          security: [partner-key]
"#,
        );
        let config = DocsConfig {
            apiKeyHeaders: vec!["x-api-key".to_string()],
            ..Default::default()
        };

        let entries: Vec<RouteEntry> = collect_routes(&service)
            .iter()
            .map(|route| build_route_entry(route, &config))
            .collect();

        assert!(entries[0].security[0].contains_key("x-api-key"));
        assert_eq!(entries[1].security.len(), 1);
        assert!(entries[1].security[0].contains_key("partner-key"));
    }
}
