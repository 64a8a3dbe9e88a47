use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::diagnostics::ValidationMode;
use crate::error::ConfigError;
use crate::panels::DEFAULT_PANEL_ID;

/// Engine settings read from an optional JSON file. Command-line flags are
/// applied on top with [`EngineConfig::overlay`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Built-in panel id.
    pub panel: String,
    /// One-analyte-per-line panel file; takes precedence over `panel`.
    pub panel_file: Option<PathBuf>,
    pub registry_overlay: Option<PathBuf>,
    pub cohort_stats: Option<PathBuf>,
    pub validation: ValidationMode,
    /// 0 lets rayon pick.
    pub threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            panel: DEFAULT_PANEL_ID.to_string(),
            panel_file: None,
            registry_overlay: None,
            cohort_stats: None,
            validation: ValidationMode::Off,
            threads: 0,
        }
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub panel: Option<String>,
    pub panel_file: Option<PathBuf>,
    pub registry_overlay: Option<PathBuf>,
    pub cohort_stats: Option<PathBuf>,
    pub validation: Option<ValidationMode>,
    pub threads: Option<usize>,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: EngineConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        config.resolve_relative_to(path.parent().unwrap_or_else(|| Path::new("")));
        Ok(config)
    }

    pub fn overlay(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(panel) = overrides.panel {
            self.panel = panel;
            self.panel_file = None;
        }
        if overrides.panel_file.is_some() {
            self.panel_file = overrides.panel_file;
        }
        if overrides.registry_overlay.is_some() {
            self.registry_overlay = overrides.registry_overlay;
        }
        if overrides.cohort_stats.is_some() {
            self.cohort_stats = overrides.cohort_stats;
        }
        if let Some(mode) = overrides.validation {
            self.validation = mode;
        }
        if let Some(threads) = overrides.threads {
            self.threads = threads;
        }
        self
    }

    // Paths in a config file are relative to the file.
    fn resolve_relative_to(&mut self, base: &Path) {
        for path in [
            &mut self.panel_file,
            &mut self.registry_overlay,
            &mut self.cohort_stats,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
