use indexmap::IndexMap;

/// Where a documented parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Body,
    Path,
    Header,
    Query,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Body => "body",
            ParameterLocation::Path => "path",
            ParameterLocation::Header => "header",
            ParameterLocation::Query => "query",
        }
    }
}

/// A documentation parameter, independent of the output format.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterEntry {
    pub location: ParameterLocation,
    pub name: String,
    pub required: bool,
    pub description: Option<String>,
    pub type_: Option<String>,
    pub schema_ref: Option<String>,
    pub array_items_type: Option<String>,
    /// Placeholder value, used for synthesized headers such as `Authorization`.
    pub value: Option<String>,
}

impl ParameterEntry {
    pub fn new(location: ParameterLocation, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
            required: false,
            description: None,
            type_: None,
            schema_ref: None,
            array_items_type: None,
            value: None,
        }
    }

    pub fn is(&self, location: ParameterLocation) -> bool {
        self.location == location
    }

    pub fn is_array(&self) -> bool {
        self.type_.as_deref() == Some("array")
    }
}

/// A documented response for one status code.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEntry {
    pub description: String,
    pub schema_ref: Option<String>,
}

/// `{ credential name: [scopes] }`
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// Everything the output adapters need to know about one route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteEntry {
    pub function_name: String,
    pub method: String,
    pub path: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub consumes: Option<Vec<String>>,
    pub produces: Option<Vec<String>>,
    pub parameters: Vec<ParameterEntry>,
    pub responses: IndexMap<String, ResponseEntry>,
    pub security: Vec<SecurityRequirement>,
}

impl RouteEntry {
    /// The path with a leading `/`.
    pub fn normalized_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }

    /// Summary, falling back to the owning function's name.
    pub fn display_name(&self) -> &str {
        match self.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary,
            _ => &self.function_name,
        }
    }

    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &ParameterEntry> {
        self.parameters.iter().filter(move |p| p.is(location))
    }
}

/// Build a `#/definitions/<name>` reference.
pub fn definition_ref(name: &str) -> String {
    format!("#/definitions/{}", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(path: &str, summary: Option<&str>) -> RouteEntry {
        RouteEntry {
            function_name: "listUsers".to_string(),
            method: "GET".to_string(),
            path: path.to_string(),
            summary: summary.map(String::from),
            description: None,
            tags: Vec::new(),
            consumes: None,
            produces: None,
            parameters: Vec::new(),
            responses: IndexMap::new(),
            security: Vec::new(),
        }
    }

    #[test]
    fn test_normalized_path() {
        assert_eq!(entry("users", None).normalized_path(), "/users");
        assert_eq!(entry("/users", None).normalized_path(), "/users");
    }

    #[test]
    fn test_display_name_falls_back_to_function() {
        assert_eq!(entry("/users", None).display_name(), "listUsers");
        assert_eq!(entry("/users", Some("")).display_name(), "listUsers");
        assert_eq!(entry("/users", Some("List users")).display_name(), "List users");
    }

    #[test]
    fn test_definition_ref() {
        assert_eq!(definition_ref("Widget"), "#/definitions/Widget");
    }
}
