#![allow(non_snake_case)]

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer};
use serde_yaml::Value as YamlValue;

use crate::config::DocsConfig;

/// A Serverless-style service definition, reduced to what documentation needs.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServiceDefinition {
    #[serde(default)]
    pub service: Option<ServiceName>,
    #[serde(default)]
    pub custom: Option<CustomSection>,
    #[serde(default)]
    pub functions: IndexMap<String, FunctionDefinition>,
}

impl ServiceDefinition {
    pub fn name(&self) -> &str {
        match &self.service {
            Some(ServiceName::Plain(name)) => name,
            Some(ServiceName::Detailed { name }) => name,
            None => "",
        }
    }

    /// The `custom.autoswagger` block, or defaults when it is absent.
    pub fn docs_config(&self) -> DocsConfig {
        self.custom
            .as_ref()
            .and_then(|custom| custom.autoswagger.clone())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum ServiceName {
    Plain(String),
    Detailed { name: String },
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CustomSection {
    #[serde(default)]
    pub autoswagger: Option<DocsConfig>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct FunctionDefinition {
    #[serde(default)]
    pub handler: Option<String>,
    #[serde(default)]
    pub events: Vec<FunctionEvent>,
}

/// One entry of a function's `events` list. Only the two HTTP trigger kinds are modelled;
/// every other kind (`sqs`, `schedule`, ...) deserializes to an event with neither set.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct FunctionEvent {
    #[serde(default)]
    pub http: Option<HttpEvent>,
    #[serde(default)]
    pub httpApi: Option<HttpEvent>,
}

impl FunctionEvent {
    /// The HTTP trigger of this event. The legacy `http` key wins over `httpApi`.
    pub fn http_trigger(&self) -> Option<&HttpEvent> {
        self.http.as_ref().or(self.httpApi.as_ref())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum HttpEvent {
    /// `GET /users/{id}` style shorthand. Not supported for documentation.
    Shorthand(String),
    Declared(Box<RouteDeclaration>),
}

/// The structured form of an `http` or `httpApi` event.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RouteDeclaration {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub swaggerTags: Option<Vec<String>>,
    #[serde(default)]
    pub consumes: Option<Vec<String>>,
    #[serde(default)]
    pub produces: Option<Vec<String>>,
    #[serde(default)]
    pub bodyType: Option<String>,
    #[serde(default)]
    pub pathParameters: Option<IndexMap<String, PathParameterInfo>>,
    #[serde(default)]
    pub headerParameters: Option<IndexMap<String, ParameterInfo>>,
    #[serde(default)]
    pub queryStringParameters: Option<IndexMap<String, ParameterInfo>>,
    #[serde(default)]
    pub request: Option<NativeRequest>,
    #[serde(default, alias = "responseData", deserialize_with = "deserialize_responses")]
    pub responses: Option<IndexMap<String, ResponseDeclaration>>,
    #[serde(default, alias = "excluded")]
    pub exclude: bool,
    #[serde(default)]
    pub authorization: bool,
    #[serde(default)]
    pub security: Option<Vec<String>>,
}

impl RouteDeclaration {
    /// The framework-native parameter block (`request.parameters`), if any.
    pub fn native_parameters(&self) -> Option<&NativeParameters> {
        self.request.as_ref()?.parameters.as_ref()
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PathParameterInfo {
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Header or query string parameter metadata.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct ParameterInfo {
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default, rename = "type")]
    pub type_: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub arrayItemsType: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NativeRequest {
    #[serde(default)]
    pub parameters: Option<NativeParameters>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NativeParameters {
    #[serde(default)]
    pub paths: Option<IndexMap<String, NativeParameter>>,
    #[serde(default)]
    pub headers: Option<IndexMap<String, NativeParameter>>,
    #[serde(default)]
    pub querystrings: Option<IndexMap<String, NativeParameter>>,
}

/// A native parameter value: either the bare `required` flag or a small mapping.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum NativeParameter {
    Flag(bool),
    Detailed {
        #[serde(default)]
        required: Option<bool>,
        #[serde(default)]
        description: Option<String>,
    },
}

impl NativeParameter {
    pub fn required(&self) -> Option<bool> {
        match self {
            NativeParameter::Flag(required) => Some(*required),
            NativeParameter::Detailed { required, .. } => *required,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            NativeParameter::Flag(_) => None,
            NativeParameter::Detailed { description, .. } => description.as_deref(),
        }
    }
}

/// Status codes are usually written unquoted, so keys may arrive as numbers or strings.
fn deserialize_responses<'de, D>(
    deserializer: D,
) -> Result<Option<IndexMap<String, ResponseDeclaration>>, D::Error>
where
    D: Deserializer<'de>,
{
    let responses: Option<IndexMap<YamlValue, ResponseDeclaration>> = Option::deserialize(deserializer)?;
    let Some(responses) = responses else {
        return Ok(None);
    };

    responses
        .into_iter()
        .map(|(code, response)| {
            let code = match code {
                YamlValue::String(code) => code,
                YamlValue::Number(code) => code.to_string(),
                other => {
                    return Err(de::Error::custom(format!(
                        "expected a status code, found {:?}",
                        other
                    )))
                }
            };
            Ok((code, response))
        })
        .collect::<Result<IndexMap<_, _>, _>>()
        .map(Some)
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResponseDeclaration {
    Description(String),
    Detailed {
        #[serde(default)]
        description: Option<String>,
        #[serde(default)]
        bodyType: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_event_forms() {
        let yaml = r#"
functions:
  getUser:
    handler: src/users.get
    events:
      - http:
          method: get
          path: /users/{id}
          request:
            parameters:
              querystrings:
                verbose: false
                page:
                  required: true
      - http: GET /users
      - httpApi:
          method: post
          path: users
          exclude: true
      - sqs: arn:aws:sqs:region:000000000000:queue
"#;
        let service: ServiceDefinition = serde_yaml::from_str(yaml).unwrap();
        let events = &service.functions["getUser"].events;
        assert_eq!(events.len(), 4);

        match events[0].http_trigger() {
            Some(HttpEvent::Declared(route)) => {
                let query = route.native_parameters().unwrap().querystrings.as_ref().unwrap();
                assert_eq!(query["verbose"], NativeParameter::Flag(false));
                assert_eq!(query["page"].required(), Some(true));
            }
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(matches!(events[1].http_trigger(), Some(HttpEvent::Shorthand(_))));
        match events[2].http_trigger() {
            Some(HttpEvent::Declared(route)) => assert!(route.exclude),
            other => panic!("unexpected event: {:?}", other),
        }
        assert!(events[3].http_trigger().is_none());
    }

    #[test]
    fn test_http_wins_over_http_api() {
        let yaml = r#"
http:
  method: get
  path: /legacy
httpApi:
  method: get
  path: /gateway
"#;
        let event: FunctionEvent = serde_yaml::from_str(yaml).unwrap();
        match event.http_trigger() {
            Some(HttpEvent::Declared(route)) => assert_eq!(route.path, "/legacy"),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_response_declarations() {
        let yaml = r#"
"200":
  description: ok
  bodyType: Widget
"404": not found
"#;
        let responses: IndexMap<String, ResponseDeclaration> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            responses["404"],
            ResponseDeclaration::Description("not found".to_string())
        );
        assert_eq!(
            responses["200"],
            ResponseDeclaration::Detailed {
                description: Some("ok".to_string()),
                bodyType: Some("Widget".to_string()),
            }
        );
    }

    #[test]
    fn test_unquoted_status_codes() {
        let yaml = r#"
functions:
  getUser:
    events:
      - http:
          method: get
          path: /users/{id}
          responses:
            200:
              description: ok
            404: not found
            default: unexpected
"#;
        let service: ServiceDefinition = serde_yaml::from_str(yaml).unwrap();
        match service.functions["getUser"].events[0].http_trigger() {
            Some(HttpEvent::Declared(route)) => {
                let responses = route.responses.as_ref().unwrap();
                let codes: Vec<&str> = responses.keys().map(String::as_str).collect();
                assert_eq!(codes, vec!["200", "404", "default"]);
                assert_eq!(
                    responses["404"],
                    ResponseDeclaration::Description("not found".to_string())
                );
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_service_name_forms() {
        let plain: ServiceDefinition = serde_yaml::from_str("service: users-api").unwrap();
        assert_eq!(plain.name(), "users-api");

        let detailed: ServiceDefinition =
            serde_yaml::from_str("service:\n  name: users-api").unwrap();
        assert_eq!(detailed.name(), "users-api");
    }
}
