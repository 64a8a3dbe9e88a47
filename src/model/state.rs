use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::analyte::RefRange;
use crate::model::pathway::{DisplayMetric, RatioTransform, ScoreMethod};
use crate::model::thresholds::{Category, Severity};

/// Why a required analyte has no usable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingReason {
    MissingInPanel,
    MissingInSample,
    Unknown,
}

impl MissingReason {
    pub fn as_str(self) -> &'static str {
        match self {
            MissingReason::MissingInPanel => "missing_in_panel",
            MissingReason::MissingInSample => "missing_in_sample",
            MissingReason::Unknown => "unknown",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MissingReason::MissingInPanel => "Not included in this test panel",
            MissingReason::MissingInSample => "Missing / not reported",
            MissingReason::Unknown => "not available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsufficientReason {
    MissingInputs,
    NotImplemented,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathwayStatus {
    Computed,
    Insufficient,
    InsufficientData,
}

impl PathwayStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PathwayStatus::Computed => "computed",
            PathwayStatus::Insufficient => "insufficient",
            PathwayStatus::InsufficientData => "insufficient_data",
        }
    }
}

/// Present/required counts over the in-panel required analytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Completeness {
    pub present: Vec<String>,
    pub missing: Vec<String>,
    pub present_count: usize,
    pub required_count: usize,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayMatch {
    pub analyte_id: String,
    pub display_name: String,
    pub normalized: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Supplied z-score, or one derived from the analyte's own reference range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(default)]
    pub z_derived: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayDriver {
    pub analyte_id: String,
    pub display_label: String,
    pub z_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RatioZSource {
    CohortStats,
    RatioRefRange,
    DerivedRefRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathwayRatioState {
    pub label: String,
    /// Displayed value: ln(raw) for `log`, z for `zscore` when available, else raw.
    pub value: f64,
    pub raw_value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    pub transform: RatioTransform,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_range: Option<RefRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_source: Option<RatioZSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaboliteLineState {
    pub analyte_id: String,
    pub display_label: String,
    pub display_metric: DisplayMetric,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fold_change: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_range: Option<RefRange>,
    pub missing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInput {
    pub analyte_id: String,
    pub display_name: String,
    pub normalized: String,
    pub known: bool,
    pub in_panel: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ref_range: Option<RefRange>,
}

impl DebugInput {
    pub fn is_present(&self) -> bool {
        self.value.is_some_and(f64::is_finite) || self.z_score.is_some_and(f64::is_finite)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioDebug {
    pub label: String,
    pub numerator: DebugInput,
    pub denominator: DebugInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
}

/// Group medians and diagnostic ratio z-scores of the acylcarnitine strategy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaOxDetails {
    pub z_short: Option<f64>,
    pub z_medium: Option<f64>,
    pub z_long: Option<f64>,
    pub z_c0: Option<f64>,
    pub z_c2: Option<f64>,
    pub ratio_z_c2c0: Option<f64>,
    pub ratio_z_medc0: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugInfo {
    pub required_inputs: Vec<DebugInput>,
    pub optional_inputs: Vec<DebugInput>,
    #[serde(default)]
    pub ratios: Vec<RatioDebug>,
    pub score_method: ScoreMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_strategy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sigma: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Set when a ratio-only pathway had a ratio but no z-score to score it with.
    #[serde(default)]
    pub ratio_z_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fa_ox: Option<FaOxDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputedPathway {
    pub pathway_id: String,
    pub framework: String,
    pub title: String,
    pub severity: Severity,
    pub category: Category,
    pub score: f64,
    pub sigma: f64,
    pub matched: Vec<PathwayMatch>,
    pub drivers: Vec<PathwayDriver>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<PathwayRatioState>,
    #[serde(default)]
    pub ratios: Vec<PathwayRatioState>,
    pub metabolite_lines: Vec<MetaboliteLineState>,
    pub partial: bool,
    pub completeness: Completeness,
    pub debug: DebugInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsufficientPathway {
    pub pathway_id: String,
    pub framework: String,
    pub title: String,
    pub missing_analytes: Vec<String>,
    pub missing_reasons: BTreeMap<String, MissingReason>,
    pub reason: InsufficientReason,
    pub completeness: Completeness,
    pub debug: DebugInfo,
}

/// Outcome of scoring one pathway against one result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PathwayState {
    Computed(ComputedPathway),
    /// Absence caused by the sample (or by the engine, for `not_implemented`).
    Insufficient(InsufficientPathway),
    /// Absence explained by panel coverage or an unrecognized analyte id.
    InsufficientData(InsufficientPathway),
}

impl PathwayState {
    pub fn status(&self) -> PathwayStatus {
        match self {
            PathwayState::Computed(_) => PathwayStatus::Computed,
            PathwayState::Insufficient(_) => PathwayStatus::Insufficient,
            PathwayState::InsufficientData(_) => PathwayStatus::InsufficientData,
        }
    }

    pub fn pathway_id(&self) -> &str {
        match self {
            PathwayState::Computed(c) => &c.pathway_id,
            PathwayState::Insufficient(i) | PathwayState::InsufficientData(i) => &i.pathway_id,
        }
    }

    pub fn framework(&self) -> &str {
        match self {
            PathwayState::Computed(c) => &c.framework,
            PathwayState::Insufficient(i) | PathwayState::InsufficientData(i) => &i.framework,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            PathwayState::Computed(c) => &c.title,
            PathwayState::Insufficient(i) | PathwayState::InsufficientData(i) => &i.title,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, PathwayState::Computed(_))
    }

    pub fn as_computed(&self) -> Option<&ComputedPathway> {
        match self {
            PathwayState::Computed(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_insufficient(&self) -> Option<&InsufficientPathway> {
        match self {
            PathwayState::Computed(_) => None,
            PathwayState::Insufficient(i) | PathwayState::InsufficientData(i) => Some(i),
        }
    }

    pub fn completeness(&self) -> &Completeness {
        match self {
            PathwayState::Computed(c) => &c.completeness,
            PathwayState::Insufficient(i) | PathwayState::InsufficientData(i) => &i.completeness,
        }
    }

    pub fn debug(&self) -> &DebugInfo {
        match self {
            PathwayState::Computed(c) => &c.debug,
            PathwayState::Insufficient(i) | PathwayState::InsufficientData(i) => &i.debug,
        }
    }
}
