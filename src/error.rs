use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read analyte catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{origin}:{line} malformed analyte row (expected 2 or 3 tab-separated columns)")]
    MalformedRow { origin: String, line: usize },
    #[error("{origin}:{line} empty analyte id or display name")]
    EmptyField { origin: String, line: usize },
    #[error("duplicate analyte id '{0}' in catalog")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("pathway '{0}' has no required analytes")]
    EmptyRequired(String),
    #[error("duplicate pathway id '{0}'")]
    DuplicateId(String),
    #[error("pathway '{pathway}' references unknown framework '{framework}'")]
    UnknownFramework { pathway: String, framework: String },
    #[error("cohort statistics for '{target}' have non-positive or non-finite sd")]
    InvalidCohortStats { target: String },
}

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("failed to read panel file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("panel file {0} lists no analytes")]
    Empty(PathBuf),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Error)]
#[error("pathway {pathway_id} failed validation: {}", .errors.join("; "))]
pub struct ValidationError {
    pub pathway_id: String,
    pub errors: Vec<String>,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Panel(#[from] PanelError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unknown panel '{0}'")]
    UnknownPanel(String),
}
