use serde::{Deserialize, Serialize};

use crate::model::analyte::RefRange;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreMethod {
    #[default]
    WeightedZ,
    RatioZ,
    RuleBased,
}

impl ScoreMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ScoreMethod::WeightedZ => "weightedZ",
            ScoreMethod::RatioZ => "ratioZ",
            ScoreMethod::RuleBased => "ruleBased",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatioTransform {
    #[default]
    #[serde(alias = "linear")]
    Raw,
    Log,
    Zscore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Baseline {
    CohortMedian,
    #[default]
    ReferenceMid,
    ReferenceUpper,
    ReferenceLower,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMetric {
    FoldChange,
    #[default]
    ZScore,
    Value,
}

/// Population statistics for a transformed ratio, supplied as configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortStats {
    pub mean: f64,
    pub sd: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl CohortStats {
    pub fn is_usable(&self) -> bool {
        self.mean.is_finite() && self.sd.is_finite() && self.sd > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatioDefinition {
    pub numerator_analyte_id: String,
    pub denominator_analyte_id: String,
    #[serde(default)]
    pub ratio_transform: RatioTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_ref_range: Option<RefRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio_cohort_stats: Option<CohortStats>,
    pub label: String,
}

impl RatioDefinition {
    pub fn new(numerator: &str, denominator: &str, transform: RatioTransform, label: &str) -> Self {
        Self {
            numerator_analyte_id: numerator.to_string(),
            denominator_analyte_id: denominator.to_string(),
            ratio_transform: transform,
            ratio_ref_range: None,
            ratio_cohort_stats: None,
            label: label.to_string(),
        }
    }

    pub fn with_cohort_stats(mut self, mean: f64, sd: f64) -> Self {
        self.ratio_cohort_stats = Some(CohortStats {
            mean,
            sd,
            reference: None,
        });
        self
    }

    pub fn with_ref_range(mut self, low: f64, high: f64) -> Self {
        self.ratio_ref_range = Some(RefRange::new(low, high));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaboliteLineDefinition {
    pub analyte_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_label: Option<String>,
    #[serde(default)]
    pub display_metric: DisplayMetric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<Baseline>,
}

impl MetaboliteLineDefinition {
    pub fn z_score_line(analyte_id: &str) -> Self {
        Self {
            analyte_id: analyte_id.to_string(),
            display_label: None,
            display_metric: DisplayMetric::ZScore,
            baseline: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaOxRatioStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c2c0: Option<CohortStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medc0: Option<CohortStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationSpec {
    pub pathway_score_method: ScoreMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_strategy: Option<String>,
    #[serde(default)]
    pub ratio_definitions: Vec<RatioDefinition>,
    #[serde(default)]
    pub metabolite_lines: Vec<MetaboliteLineDefinition>,
    pub implemented: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fa_ox_ratio_stats: Option<FaOxRatioStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayDisplay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_label: Option<String>,
    #[serde(default)]
    pub metric_labels: Vec<String>,
}

/// A registry entry after defaults have been merged in. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathwayDefinition {
    pub id: String,
    pub framework: String,
    pub framework_title: String,
    pub order: u32,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub required_analytes: Vec<String>,
    #[serde(default)]
    pub optional_analytes: Vec<String>,
    #[serde(default)]
    pub display: PathwayDisplay,
    pub calculations: CalculationSpec,
    #[serde(default)]
    pub pubmed_pmids: Vec<String>,
}

impl PathwayDefinition {
    /// A weighted-z pathway with default display rows, for definitions built in code.
    pub fn new(id: &str, framework: &str, title: &str, required: &[&str]) -> Self {
        let required_analytes: Vec<String> = required.iter().map(|s| s.to_string()).collect();
        let metabolite_lines = required_analytes
            .iter()
            .map(|id| MetaboliteLineDefinition::z_score_line(id))
            .collect();
        Self {
            id: id.to_string(),
            framework: framework.to_string(),
            framework_title: framework.to_string(),
            order: 0,
            title: title.to_string(),
            subtitle: None,
            required_analytes,
            optional_analytes: Vec::new(),
            display: PathwayDisplay::default(),
            calculations: CalculationSpec {
                pathway_score_method: ScoreMethod::WeightedZ,
                score_strategy: None,
                ratio_definitions: Vec::new(),
                metabolite_lines,
                implemented: true,
                fa_ox_ratio_stats: None,
            },
            pubmed_pmids: Vec::new(),
        }
    }

    pub fn with_optional(mut self, optional: &[&str]) -> Self {
        self.optional_analytes = optional.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_method(mut self, method: ScoreMethod) -> Self {
        self.calculations.pathway_score_method = method;
        self
    }

    pub fn with_strategy(mut self, strategy: &str) -> Self {
        self.calculations.score_strategy = Some(strategy.to_string());
        self
    }

    pub fn with_ratio(mut self, ratio: RatioDefinition) -> Self {
        self.calculations.ratio_definitions.push(ratio);
        self
    }

    pub fn score_strategy(&self) -> Option<&str> {
        self.calculations.score_strategy.as_deref()
    }

    pub fn ratio_definitions(&self) -> &[RatioDefinition] {
        &self.calculations.ratio_definitions
    }
}
