use super::*;
use crate::model::state::{Completeness, ComputedPathway, DebugInfo, PathwayRatioState};
use crate::model::pathway::ScoreMethod;

fn computed(sigma: f64, score: f64) -> ComputedPathway {
    ComputedPathway {
        pathway_id: "P".to_string(),
        framework: "A".to_string(),
        title: "P".to_string(),
        severity: Severity::from_score(score),
        category: Category::from_sigma(sigma),
        score,
        sigma,
        matched: Vec::new(),
        drivers: Vec::new(),
        ratio: None,
        ratios: Vec::new(),
        metabolite_lines: Vec::new(),
        partial: false,
        completeness: Completeness::default(),
        debug: DebugInfo {
            required_inputs: Vec::new(),
            optional_inputs: Vec::new(),
            ratios: Vec::new(),
            score_method: ScoreMethod::WeightedZ,
            score_strategy: None,
            sigma: Some(sigma),
            score: Some(score),
            ratio_z_fallback: false,
            fa_ox: None,
        },
    }
}

fn def() -> PathwayDefinition {
    PathwayDefinition::new("P", "A", "P", &["citric"])
}

#[test]
fn test_consistent_state_is_clean() {
    let state = PathwayState::Computed(computed(0.7, 1.2));
    assert!(validate_pathway_state(&def(), &state).is_clean());
}

#[test]
fn test_category_mismatch_is_error() {
    let mut payload = computed(0.7, 1.2);
    payload.category = Category::Stable;
    let report = validate_pathway_state(&def(), &PathwayState::Computed(payload));
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn test_non_finite_sigma_is_error() {
    let mut payload = computed(0.0, 0.0);
    payload.sigma = f64::NAN;
    let report = validate_pathway_state(&def(), &PathwayState::Computed(payload));
    assert!(!report.errors.is_empty());
}

#[test]
fn test_missing_ratio_and_fallback_warn() {
    let mut payload = computed(0.0, 0.0);
    payload.debug.ratio_z_fallback = true;
    let def = def().with_ratio(RatioDefinition::new("citric", "malic", RatioTransform::Raw, "C/M"));
    let report = validate_pathway_state(&def, &PathwayState::Computed(payload));
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 2);
}

#[test]
fn test_ratio_value_mismatch_is_error() {
    use crate::model::state::{DebugInput, RatioDebug};

    let input = |id: &str, value: f64| DebugInput {
        analyte_id: id.to_string(),
        display_name: id.to_string(),
        normalized: id.to_string(),
        known: true,
        in_panel: true,
        value: Some(value),
        unit: None,
        z_score: None,
        ref_range: None,
    };
    let mut payload = computed(0.0, 0.0);
    payload.ratios.push(PathwayRatioState {
        label: "C/M".to_string(),
        value: 5.0,
        raw_value: 2.0,
        z_score: None,
        transform: RatioTransform::Raw,
        ref_range: None,
        z_source: None,
    });
    payload.debug.ratios.push(RatioDebug {
        label: "C/M".to_string(),
        numerator: input("citric", 4.0),
        denominator: input("malic", 2.0),
        value: Some(5.0),
        z_score: None,
    });
    let def = def().with_ratio(RatioDefinition::new("citric", "malic", RatioTransform::Raw, "C/M"));
    let report = validate_pathway_state(&def, &PathwayState::Computed(payload));
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn test_insufficient_without_missing_warns() {
    use crate::model::state::InsufficientPathway;
    use std::collections::BTreeMap;

    let base = computed(0.0, 0.0);
    let payload = InsufficientPathway {
        pathway_id: "P".to_string(),
        framework: "A".to_string(),
        title: "P".to_string(),
        missing_analytes: Vec::new(),
        missing_reasons: BTreeMap::new(),
        reason: InsufficientReason::MissingInputs,
        completeness: Completeness::default(),
        debug: base.debug,
    };
    let report = validate_pathway_state(&def(), &PathwayState::Insufficient(payload.clone()));
    assert_eq!(report.warnings.len(), 1);

    let not_implemented = InsufficientPathway {
        reason: InsufficientReason::NotImplemented,
        ..payload
    };
    let report = validate_pathway_state(&def(), &PathwayState::Insufficient(not_implemented));
    assert!(report.is_clean());
}

#[test]
fn test_strict_mode_collects_failures() {
    let mut payload = computed(0.7, 1.2);
    payload.severity = Severity::Significant;
    let state = PathwayState::Computed(payload);

    let warn_only = ValidatingDiagnostics::new(ValidationMode::Warn);
    warn_only.inspect(&def(), &state);
    assert!(warn_only.take_failures().is_empty());

    let strict = ValidatingDiagnostics::new(ValidationMode::Strict);
    strict.inspect(&def(), &state);
    let failures = strict.take_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].pathway_id, "P");
    assert!(strict.take_failures().is_empty());
}
