use log::{debug, info};
use std::path::PathBuf;

use crate::collector::populate;
use crate::config::{DocsConfig, LoadedService};
use crate::declaration::ServiceDefinition;
use crate::error::Result;
use crate::format::{DocumentFormat, Target};
use crate::overrides::merge_override_files;
use crate::postman::PostmanFormat;
use crate::swagger::SwaggerFormat;

/// Runs one documentation pass over a service definition.
pub struct Generator {
    service: ServiceDefinition,
    config: DocsConfig,
    base_dir: PathBuf,
}

impl Generator {
    /// Create a new Generator instance
    pub fn new(service: ServiceDefinition, base_dir: impl Into<PathBuf>) -> Self {
        let config = service.docs_config();
        Self {
            service,
            config,
            base_dir: base_dir.into(),
        }
    }

    pub fn from_loaded(loaded: LoadedService) -> Self {
        Self::new(loaded.definition, loaded.base_dir)
    }

    /// Build the complete document for `format`: defaults, then scalar overrides, then override
    /// files, then one entry per qualifying route.
    pub fn build<F: DocumentFormat>(&self, format: &F) -> Result<F::Document> {
        let document = format.default_document(self.service.name());
        let document = format.apply_overrides(document, &self.config);

        let files = self.config.override_files(&self.base_dir);
        debug!("Override files: {:?}", files);
        let document = merge_override_files(document, &files, &format.merge_rules())?;

        let document = populate(format, document, &self.service, &self.config);
        Ok(format.finish(document))
    }

    /// Build the document for `target` as a JSON value.
    pub fn generate(&self, target: Target) -> Result<serde_json::Value> {
        info!("Generating {} for service '{}'", target, self.service.name());

        let value = match target {
            Target::Swagger => serde_json::to_value(self.build(&SwaggerFormat)?)?,
            Target::Postman => serde_json::to_value(self.build(&PostmanFormat::new(&self.config))?)?,
        };

        Ok(value)
    }

    /// Build the document for `target` and serialize it to a JSON string.
    pub fn render(&self, target: Target, pretty: bool) -> Result<String> {
        let value = self.generate(target)?;
        let json = if pretty {
            serde_json::to_string_pretty(&value)?
        } else {
            serde_json::to_string(&value)?
        };
        Ok(json)
    }
}
