use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;
use crate::model::pathway::{
    CalculationSpec, MetaboliteLineDefinition, PathwayDefinition, PathwayDisplay, RatioDefinition,
    ScoreMethod,
};

pub(crate) const BUILTIN_PATHWAYS_V1: &str = include_str!("../../assets/pathways_v1.json");

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegistryFile {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub frameworks: BTreeMap<String, String>,
    pub pathways: Vec<RawPathway>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawPathway {
    pub id: String,
    pub framework: String,
    #[serde(default)]
    pub order: u32,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub required_analytes: Vec<String>,
    #[serde(default)]
    pub optional_analytes: Vec<String>,
    #[serde(default)]
    pub flow_label: Option<String>,
    #[serde(default)]
    pub metric_labels: Vec<String>,
    #[serde(default)]
    pub calculations: Option<RawCalculations>,
    #[serde(default)]
    pub pubmed_pmids: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawCalculations {
    #[serde(default)]
    pub pathway_score_method: Option<ScoreMethod>,
    #[serde(default)]
    pub score_strategy: Option<String>,
    #[serde(default)]
    pub ratio_definitions: Vec<RatioDefinition>,
    #[serde(default)]
    pub metabolite_lines: Option<Vec<MetaboliteLineDefinition>>,
    #[serde(default)]
    pub implemented: Option<bool>,
    #[serde(default)]
    pub fa_ox_ratio_stats: Option<crate::model::pathway::FaOxRatioStats>,
}

pub(crate) fn parse_registry(content: &str, origin: &str) -> Result<RegistryFile, RegistryError> {
    serde_json::from_str(content).map_err(|source| RegistryError::Json {
        origin: origin.to_string(),
        source,
    })
}

pub(crate) fn read_registry_file(path: &Path) -> Result<RegistryFile, RegistryError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_registry(&content, &path.display().to_string())
}

/// Fills display and calculation defaults: weighted-z scoring over the
/// required analytes, one z-score row per required analyte, implemented.
pub(crate) fn with_defaults(raw: RawPathway, frameworks: &BTreeMap<String, String>) -> PathwayDefinition {
    let default_lines = || {
        raw.required_analytes
            .iter()
            .map(|id| MetaboliteLineDefinition::z_score_line(id))
            .collect::<Vec<_>>()
    };

    let calculations = match raw.calculations {
        Some(calc) => CalculationSpec {
            pathway_score_method: calc.pathway_score_method.unwrap_or_default(),
            score_strategy: calc.score_strategy.filter(|s| !s.trim().is_empty()),
            ratio_definitions: calc.ratio_definitions,
            metabolite_lines: calc.metabolite_lines.unwrap_or_else(default_lines),
            implemented: calc.implemented.unwrap_or(true),
            fa_ox_ratio_stats: calc.fa_ox_ratio_stats,
        },
        None => CalculationSpec {
            pathway_score_method: ScoreMethod::WeightedZ,
            score_strategy: None,
            ratio_definitions: Vec::new(),
            metabolite_lines: default_lines(),
            implemented: true,
            fa_ox_ratio_stats: None,
        },
    };

    let framework_title = frameworks
        .get(&raw.framework)
        .cloned()
        .unwrap_or_else(|| raw.framework.clone());

    PathwayDefinition {
        framework_title,
        display: PathwayDisplay {
            flow_label: raw.flow_label,
            metric_labels: raw.metric_labels,
        },
        pubmed_pmids: dedupe_preserving_order(raw.pubmed_pmids),
        id: raw.id,
        framework: raw.framework,
        order: raw.order,
        title: raw.title,
        subtitle: raw.subtitle,
        required_analytes: raw.required_analytes,
        optional_analytes: raw.optional_analytes,
        calculations,
    }
}

pub(crate) fn validate_definitions(
    defs: &[PathwayDefinition],
    frameworks: &BTreeMap<String, String>,
) -> Result<(), RegistryError> {
    let mut seen = HashSet::with_capacity(defs.len());
    for def in defs {
        if def.required_analytes.is_empty() {
            return Err(RegistryError::EmptyRequired(def.id.clone()));
        }
        if !seen.insert(def.id.as_str()) {
            return Err(RegistryError::DuplicateId(def.id.clone()));
        }
        if !frameworks.is_empty() && !frameworks.contains_key(&def.framework) {
            return Err(RegistryError::UnknownFramework {
                pathway: def.id.clone(),
                framework: def.framework.clone(),
            });
        }
    }
    Ok(())
}

fn dedupe_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
