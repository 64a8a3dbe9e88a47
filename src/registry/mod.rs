use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use tracing::{debug, info};

use crate::error::RegistryError;
use crate::model::pathway::PathwayDefinition;

pub mod cohort;
mod loader;

pub use cohort::CohortStatsConfig;

use loader::{
    BUILTIN_PATHWAYS_V1, RegistryFile, parse_registry, read_registry_file, validate_definitions,
    with_defaults,
};

/// The declarative pathway definitions, defaults merged and validated.
#[derive(Debug, Clone)]
pub struct PathwayRegistry {
    version: Option<String>,
    frameworks: BTreeMap<String, String>,
    pathways: Vec<PathwayDefinition>,
}

impl PathwayRegistry {
    /// Built-in definitions with the built-in cohort statistics applied.
    pub fn builtin_v1() -> Result<Self, RegistryError> {
        let mut registry = Self::from_json_str(BUILTIN_PATHWAYS_V1, "built-in registry v1")?;
        let applied = registry.apply_cohort_stats(&CohortStatsConfig::builtin_v1()?);
        debug!(pathways = registry.len(), cohort_targets = applied, "loaded built-in registry");
        Ok(registry)
    }

    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, RegistryError> {
        Self::from_file(parse_registry(content, origin)?)
    }

    pub fn load_file(path: &Path) -> Result<Self, RegistryError> {
        Self::from_file(read_registry_file(path)?)
    }

    fn from_file(file: RegistryFile) -> Result<Self, RegistryError> {
        let frameworks = file.frameworks;
        let mut pathways: Vec<PathwayDefinition> = file
            .pathways
            .into_iter()
            .map(|raw| with_defaults(raw, &frameworks))
            .collect();
        validate_definitions(&pathways, &frameworks)?;
        sort_definitions(&mut pathways);
        Ok(Self {
            version: file.version,
            frameworks,
            pathways,
        })
    }

    pub fn merge_overlay_file(self, path: &Path) -> Result<Self, RegistryError> {
        self.merge_overlay(read_registry_file(path)?)
    }

    pub fn merge_overlay_str(self, content: &str, origin: &str) -> Result<Self, RegistryError> {
        self.merge_overlay(parse_registry(content, origin)?)
    }

    /// Overlay entries replace built-ins with the same id; new ids are added.
    fn merge_overlay(mut self, overlay: RegistryFile) -> Result<Self, RegistryError> {
        self.frameworks.extend(overlay.frameworks);
        let user: Vec<PathwayDefinition> = overlay
            .pathways
            .into_iter()
            .map(|raw| with_defaults(raw, &self.frameworks))
            .collect();
        validate_definitions(&user, &self.frameworks)?;
        let (replaced, added) = {
            let mut user_map: HashMap<String, PathwayDefinition> =
                user.into_iter().map(|d| (d.id.clone(), d)).collect();
            let mut replaced = 0usize;
            for def in &mut self.pathways {
                if let Some(user_def) = user_map.remove(&def.id) {
                    *def = user_def;
                    replaced += 1;
                }
            }
            let added = user_map.len();
            self.pathways.extend(user_map.into_values());
            (replaced, added)
        };
        sort_definitions(&mut self.pathways);
        info!(replaced, added, pathways = self.pathways.len(), "merged registry overlay");
        Ok(self)
    }

    pub fn apply_cohort_stats(&mut self, stats: &CohortStatsConfig) -> usize {
        stats.apply(&mut self.pathways)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn frameworks(&self) -> &BTreeMap<String, String> {
        &self.frameworks
    }

    pub fn pathways(&self) -> &[PathwayDefinition] {
        &self.pathways
    }

    pub fn get(&self, id: &str) -> Option<&PathwayDefinition> {
        self.pathways.iter().find(|d| d.id == id)
    }

    pub fn len(&self) -> usize {
        self.pathways.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pathways.is_empty()
    }
}

fn sort_definitions(defs: &mut [PathwayDefinition]) {
    defs.sort_by(|a, b| {
        a.framework
            .cmp(&b.framework)
            .then(a.order.cmp(&b.order))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
#[path = "../../tests/src_inline/registry/tests.rs"]
mod tests;
