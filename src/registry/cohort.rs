use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::RegistryError;
use crate::model::pathway::{CohortStats, FaOxRatioStats, PathwayDefinition};

const BUILTIN_COHORT_STATS_V1: &str = include_str!("../../assets/cohort_stats_v1.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioCohortEntry {
    pub pathway_id: String,
    pub label: String,
    pub mean: f64,
    pub sd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaOxCohortEntry {
    pub pathway_id: String,
    #[serde(flatten)]
    pub stats: FaOxRatioStats,
}

/// Population statistics for transformed ratios. These are placeholders
/// until a matrix-matched cohort is available, so they live in data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortStatsConfig {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub ratios: Vec<RatioCohortEntry>,
    #[serde(default)]
    pub fa_ox: Vec<FaOxCohortEntry>,
}

impl CohortStatsConfig {
    pub fn builtin_v1() -> Result<Self, RegistryError> {
        Self::from_json_str(BUILTIN_COHORT_STATS_V1, "built-in cohort stats v1")
    }

    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content, &path.display().to_string())
    }

    pub fn from_json_str(content: &str, origin: &str) -> Result<Self, RegistryError> {
        let config: Self = serde_json::from_str(content).map_err(|source| RegistryError::Json {
            origin: origin.to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), RegistryError> {
        for entry in &self.ratios {
            if !(entry.sd.is_finite() && entry.sd > 0.0 && entry.mean.is_finite()) {
                return Err(RegistryError::InvalidCohortStats {
                    target: format!("{}/{}", entry.pathway_id, entry.label),
                });
            }
        }
        for entry in &self.fa_ox {
            let named = [("c2c0", &entry.stats.c2c0), ("medc0", &entry.stats.medc0)];
            for (name, stats) in named {
                if stats.as_ref().is_some_and(|s| !s.is_usable()) {
                    return Err(RegistryError::InvalidCohortStats {
                        target: format!("{}/{name}", entry.pathway_id),
                    });
                }
            }
        }
        Ok(())
    }

    /// Entries of `other` replace entries with the same target.
    pub fn merge(mut self, other: CohortStatsConfig) -> Self {
        for entry in other.ratios {
            self.ratios
                .retain(|e| !(e.pathway_id == entry.pathway_id && e.label == entry.label));
            self.ratios.push(entry);
        }
        for entry in other.fa_ox {
            self.fa_ox.retain(|e| e.pathway_id != entry.pathway_id);
            self.fa_ox.push(entry);
        }
        if other.version.is_some() {
            self.version = other.version;
        }
        self
    }

    /// Writes the statistics into matching definitions. Returns how many
    /// targets were applied; unmatched targets are logged.
    pub fn apply(&self, defs: &mut [PathwayDefinition]) -> usize {
        let mut applied = 0usize;
        for entry in &self.ratios {
            let target = defs
                .iter_mut()
                .find(|d| d.id == entry.pathway_id)
                .and_then(|d| {
                    d.calculations
                        .ratio_definitions
                        .iter_mut()
                        .find(|r| r.label == entry.label)
                });
            match target {
                Some(ratio) => {
                    ratio.ratio_cohort_stats = Some(CohortStats {
                        mean: entry.mean,
                        sd: entry.sd,
                        reference: entry.reference.clone(),
                    });
                    applied += 1;
                }
                None => warn!(
                    pathway_id = %entry.pathway_id,
                    label = %entry.label,
                    "cohort stats target ratio not found"
                ),
            }
        }
        for entry in &self.fa_ox {
            match defs.iter_mut().find(|d| d.id == entry.pathway_id) {
                Some(def) => {
                    def.calculations.fa_ox_ratio_stats = Some(entry.stats.clone());
                    applied += 1;
                }
                None => warn!(pathway_id = %entry.pathway_id, "cohort stats target pathway not found"),
            }
        }
        applied
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/registry/cohort.rs"]
mod tests;
