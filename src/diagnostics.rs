//! Post-computation checks on pathway states. The engine hands every state
//! to a [`DiagnosticsHook`]; what happens next is up to the hook.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;
use crate::math::metrics::{
    approximate_sd_from_range, baseline_from_ref_range, fold_change, safe_divide,
    z_from_value_and_ref,
};
use crate::model::analyte::RefRange;
use crate::model::pathway::{
    Baseline, DisplayMetric, PathwayDefinition, RatioDefinition, RatioTransform,
};
use crate::model::state::{
    ComputedPathway, InsufficientReason, MetaboliteLineState, PathwayState, RatioZSource,
};
use crate::model::thresholds::{Category, Severity};

pub const METRIC_TOLERANCE: f64 = 0.02;

pub trait DiagnosticsHook: Send + Sync {
    fn inspect(&self, def: &PathwayDefinition, state: &PathwayState);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiagnostics;

impl DiagnosticsHook for NoDiagnostics {
    fn inspect(&self, _def: &PathwayDefinition, _state: &PathwayState) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    #[default]
    Off,
    Warn,
    Strict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

fn close(value: Option<f64>, expected: Option<f64>) -> bool {
    match (value, expected) {
        (Some(v), Some(e)) if v.is_finite() && e.is_finite() => (v - e).abs() <= METRIC_TOLERANCE,
        _ => false,
    }
}

pub fn validate_pathway_state(def: &PathwayDefinition, state: &PathwayState) -> ValidationReport {
    let mut report = ValidationReport::default();
    match state {
        PathwayState::Computed(computed) => validate_computed(def, computed, &mut report),
        PathwayState::Insufficient(payload) | PathwayState::InsufficientData(payload) => {
            if payload.reason != InsufficientReason::NotImplemented
                && payload.missing_analytes.is_empty()
            {
                report
                    .warnings
                    .push("insufficient pathway lists no missing analytes".to_string());
            }
        }
    }
    report
}

fn validate_computed(def: &PathwayDefinition, state: &ComputedPathway, report: &mut ValidationReport) {
    if !state.sigma.is_finite() {
        report.errors.push("computed pathway has a non-finite sigma".to_string());
    } else if state.category != Category::from_sigma(state.sigma) {
        report.errors.push(format!(
            "category {} does not match sigma {:.3}",
            state.category.as_str(),
            state.sigma
        ));
    }
    if !state.score.is_finite() || state.score < 0.0 {
        report.errors.push("computed pathway has an invalid score".to_string());
    } else if state.severity != Severity::from_score(state.score) {
        report.errors.push(format!(
            "severity {} does not match score {:.3}",
            state.severity.as_str(),
            state.score
        ));
    }

    let missing: Vec<&str> = state
        .debug
        .required_inputs
        .iter()
        .filter(|input| !input.is_present())
        .map(|input| input.analyte_id.as_str())
        .collect();
    if !missing.is_empty() && !state.partial {
        report.errors.push(format!(
            "computed pathway is missing required inputs: {}",
            missing.join(", ")
        ));
    }
    if def.required_analytes.is_empty() {
        report
            .warnings
            .push("computed pathway has no required analytes".to_string());
    }
    if state.debug.ratio_z_fallback {
        report
            .warnings
            .push("ratio has no z-score; sigma and score fell back to 0".to_string());
    }

    for ratio_def in def.ratio_definitions() {
        validate_ratio(ratio_def, state, report);
    }
    for line in &state.metabolite_lines {
        validate_fold_change(line, report);
    }
}

fn validate_ratio(ratio_def: &RatioDefinition, state: &ComputedPathway, report: &mut ValidationReport) {
    let label = &ratio_def.label;
    let Some(ratio) = state.ratios.iter().find(|r| &r.label == label) else {
        report
            .warnings
            .push(format!("ratio {label} is missing from computed pathway"));
        return;
    };
    let Some(debug) = state.debug.ratios.iter().find(|r| &r.label == label) else {
        return;
    };
    let Some(raw) = safe_divide(debug.numerator.value, debug.denominator.value) else {
        report
            .errors
            .push(format!("ratio {label} cannot be recomputed from its inputs"));
        return;
    };

    let scaled = match ratio_def.ratio_transform {
        RatioTransform::Log => raw.ln(),
        RatioTransform::Raw | RatioTransform::Zscore => raw,
    };
    if ratio_def.ratio_transform != RatioTransform::Zscore && !close(Some(ratio.value), Some(scaled)) {
        report
            .errors
            .push(format!("ratio {label} does not match its inputs"));
    }
    if !close(Some(ratio.raw_value), Some(raw)) {
        report
            .errors
            .push(format!("ratio {label} raw value does not match its inputs"));
    }

    let expected_z = match ratio.z_source {
        Some(RatioZSource::CohortStats) => ratio_def
            .ratio_cohort_stats
            .as_ref()
            .and_then(|s| z_from_value_and_ref(Some(scaled), Some(s.mean), Some(s.sd))),
        Some(RatioZSource::RatioRefRange) => ratio.ref_range.and_then(|r| z_against(scaled, &r)),
        _ => None,
    };
    if let (Some(z), Some(expected)) = (ratio.z_score, expected_z) {
        if !close(Some(z), Some(expected)) {
            report
                .errors
                .push(format!("ratio {label} z-score does not match its reference"));
        }
    }
}

fn z_against(value: f64, range: &RefRange) -> Option<f64> {
    z_from_value_and_ref(
        Some(value),
        baseline_from_ref_range(Some(range), Baseline::ReferenceMid),
        approximate_sd_from_range(Some(range)),
    )
}

fn validate_fold_change(line: &MetaboliteLineState, report: &mut ValidationReport) {
    if line.display_metric != DisplayMetric::FoldChange || line.missing {
        return;
    }
    let Some(expected) = fold_change(line.value, line.baseline_value) else {
        return;
    };
    if !close(line.fold_change, Some(expected)) {
        report.errors.push(format!(
            "fold-change for {} does not match its baseline",
            line.display_label
        ));
    }
}

/// Runs [`validate_pathway_state`] on every state. Findings are logged;
/// in strict mode states with errors are also collected for the caller.
#[derive(Debug, Default)]
pub struct ValidatingDiagnostics {
    mode: ValidationMode,
    failures: Mutex<Vec<ValidationError>>,
}

impl ValidatingDiagnostics {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            failures: Mutex::new(Vec::new()),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn take_failures(&self) -> Vec<ValidationError> {
        let mut guard = self.failures.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *guard)
    }
}

impl DiagnosticsHook for ValidatingDiagnostics {
    fn inspect(&self, def: &PathwayDefinition, state: &PathwayState) {
        if self.mode == ValidationMode::Off {
            return;
        }
        let report = validate_pathway_state(def, state);
        for warning in &report.warnings {
            warn!(pathway_id = %def.id, %warning, "pathway validation warning");
        }
        for error in &report.errors {
            warn!(pathway_id = %def.id, %error, "pathway validation error");
        }
        if self.mode == ValidationMode::Strict && !report.errors.is_empty() {
            let mut guard = self.failures.lock().unwrap_or_else(|e| e.into_inner());
            guard.push(ValidationError {
                pathway_id: def.id.clone(),
                errors: report.errors,
            });
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/diagnostics.rs"]
mod tests;
