use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Error, Debug)]
pub enum DocsError {
    #[error("Failed to read service definition {path:?}: {source}")]
    ServiceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid service definition {path:?}: {message}")]
    ServiceParse { path: PathBuf, message: String },

    #[error("Failed to read override file {path:?}: {source}")]
    OverrideRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid override file {path:?}: {message}")]
    OverrideParse { path: PathBuf, message: String },

    #[error("Override file {path:?} does not fit the {target} document: {source}")]
    OverrideShape {
        path: PathBuf,
        target: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

