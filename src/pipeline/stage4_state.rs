use std::cmp::Ordering;
use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::analytes::AnalyteCatalog;
use crate::diagnostics::DiagnosticsHook;
use crate::math::metrics::{baseline_from_ref_range, fold_change, normalize_zero, resolve_z};
use crate::model::analyte::AnalyteResult;
use crate::model::pathway::{DisplayMetric, PathwayDefinition, ScoreMethod};
use crate::model::state::{
    ComputedPathway, DebugInfo, InsufficientPathway, InsufficientReason, MetaboliteLineState,
    PathwayDriver, PathwayRatioState, PathwayState, RatioDebug,
};
use crate::model::thresholds::{Category, Severity};
use crate::panels::PanelCatalog;
use crate::pipeline::stage1_inputs::{
    AnalyteInput, ResultLookup, build_matches, collect_inputs, debug_input, debug_inputs,
};
use crate::pipeline::stage2_missing::{
    MissingAssessment, classify_missing, fold_ratio_inputs, fold_unresolved_ratio_inputs,
};
use crate::pipeline::stage3_ratios::compute_ratio_states;
use crate::strategies::{
    MissingList, NITRIC_OXIDE, StrategyInput, StrategyOutcome, StrategyRegistry, StrategyScore,
};

pub const MAX_DRIVERS: usize = 3;
const PARTIAL_MIN_PRESENT: usize = 2;

/// Collaborators shared by every pathway evaluation. All borrowed, all `Sync`.
#[derive(Clone, Copy)]
pub struct EngineContext<'a> {
    pub catalog: &'a AnalyteCatalog,
    pub panel: &'a dyn PanelCatalog,
    pub strategies: &'a StrategyRegistry,
    pub diagnostics: &'a dyn DiagnosticsHook,
}

pub fn compute_pathway_state(
    def: &PathwayDefinition,
    results: &[AnalyteResult],
    ctx: &EngineContext<'_>,
) -> PathwayState {
    let lookup = ResultLookup::build(results, ctx.catalog);
    evaluate_pathway(def, &lookup, ctx)
}

/// Evaluates every definition against one result set. The lookup is built
/// once; output order follows `defs`.
pub fn compute_pathway_states(
    defs: &[PathwayDefinition],
    results: &[AnalyteResult],
    ctx: &EngineContext<'_>,
) -> Vec<PathwayState> {
    let started = Instant::now();
    let lookup = ResultLookup::build(results, ctx.catalog);
    let states: Vec<PathwayState> = defs
        .par_iter()
        .map(|def| evaluate_pathway(def, &lookup, ctx))
        .collect();
    info!(
        pathways = states.len(),
        results = results.len(),
        matched_results = lookup.len(),
        duplicate_results = lookup.duplicates(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "pathway states computed"
    );
    states
}

pub fn evaluate_pathway(
    def: &PathwayDefinition,
    lookup: &ResultLookup<'_>,
    ctx: &EngineContext<'_>,
) -> PathwayState {
    let state = evaluate_inner(def, lookup, ctx);
    debug!(pathway_id = %def.id, status = state.status().as_str(), "pathway evaluated");
    ctx.diagnostics.inspect(def, &state);
    state
}

fn evaluate_inner(
    def: &PathwayDefinition,
    lookup: &ResultLookup<'_>,
    ctx: &EngineContext<'_>,
) -> PathwayState {
    let catalog = lookup.catalog();
    let debug = DebugInfo {
        required_inputs: debug_inputs(&def.required_analytes, lookup, ctx.panel),
        optional_inputs: debug_inputs(&def.optional_analytes, lookup, ctx.panel),
        ratios: Vec::new(),
        score_method: def.calculations.pathway_score_method,
        score_strategy: def.calculations.score_strategy.clone(),
        sigma: None,
        score: None,
        ratio_z_fallback: false,
        fa_ox: None,
    };
    let mut assessment = classify_missing(&debug.required_inputs);
    let all_required: Vec<String> = def
        .required_analytes
        .iter()
        .map(|id| catalog.label_for(id))
        .collect();

    if !assessment.unknown_labels.is_empty() {
        let missing = std::mem::take(&mut assessment.unknown_labels);
        return insufficient(def, true, missing, assessment, InsufficientReason::MissingInputs, debug);
    }

    if !def.calculations.implemented {
        return insufficient(def, false, all_required, assessment, InsufficientReason::NotImplemented, debug);
    }

    fold_ratio_inputs(def, lookup, ctx.panel, &mut assessment);

    let allow_partial =
        def.score_strategy() == Some(NITRIC_OXIDE) && assessment.present_count >= PARTIAL_MIN_PRESENT;
    let has_missing_in_panel = assessment.has_missing_in_panel();
    if !assessment.missing_labels.is_empty() && (has_missing_in_panel || !allow_partial) {
        let missing = assessment.missing_labels.clone();
        return insufficient(
            def,
            has_missing_in_panel,
            missing,
            assessment,
            InsufficientReason::MissingInputs,
            debug,
        );
    }

    let required = collect_inputs(&def.required_analytes, lookup);
    let optional = collect_inputs(&def.optional_analytes, lookup);
    let ratios = compute_ratio_states(def.ratio_definitions(), lookup);

    if def.calculations.pathway_score_method == ScoreMethod::RatioZ
        && !def.ratio_definitions().is_empty()
        && ratios.is_empty()
    {
        fold_unresolved_ratio_inputs(def, lookup, &mut assessment);
        let missing = assessment.missing_labels.clone();
        return insufficient(def, false, missing, assessment, InsufficientReason::MissingInputs, debug);
    }

    let Some(strategy) = ctx.strategies.resolve(&def.calculations) else {
        return insufficient(def, false, all_required, assessment, InsufficientReason::NotImplemented, debug);
    };

    let input = StrategyInput {
        definition: def,
        lookup,
        required: &required,
        optional: &optional,
        ratios: &ratios,
    };
    let score = match strategy(&input) {
        StrategyOutcome::Scored(score) => score,
        StrategyOutcome::Insufficient(list) => {
            let missing = match list {
                MissingList::AllRequired => all_required,
                MissingList::Detected => assessment.missing_labels.clone(),
            };
            return insufficient(def, false, missing, assessment, InsufficientReason::MissingInputs, debug);
        }
        StrategyOutcome::NotImplemented => {
            return insufficient(def, false, all_required, assessment, InsufficientReason::NotImplemented, debug);
        }
    };

    computed(def, lookup, ctx.panel, &required, &optional, ratios, score, assessment, allow_partial, debug)
}

fn insufficient(
    def: &PathwayDefinition,
    explained_by_panel: bool,
    missing_analytes: Vec<String>,
    assessment: MissingAssessment,
    reason: InsufficientReason,
    debug: DebugInfo,
) -> PathwayState {
    let payload = InsufficientPathway {
        pathway_id: def.id.clone(),
        framework: def.framework.clone(),
        title: def.title.clone(),
        missing_analytes,
        missing_reasons: assessment.reasons,
        reason,
        completeness: assessment.completeness,
        debug,
    };
    if explained_by_panel {
        PathwayState::InsufficientData(payload)
    } else {
        PathwayState::Insufficient(payload)
    }
}

#[allow(clippy::too_many_arguments)]
fn computed(
    def: &PathwayDefinition,
    lookup: &ResultLookup<'_>,
    panel: &dyn PanelCatalog,
    required: &[AnalyteInput<'_>],
    optional: &[AnalyteInput<'_>],
    ratios: Vec<PathwayRatioState>,
    score: StrategyScore,
    assessment: MissingAssessment,
    allow_partial: bool,
    mut debug: DebugInfo,
) -> PathwayState {
    let catalog = lookup.catalog();
    let inputs: Vec<&AnalyteInput<'_>> = required.iter().chain(optional.iter()).collect();

    debug.ratios = def
        .ratio_definitions()
        .iter()
        .map(|ratio| {
            let state = ratios.iter().find(|r| r.label == ratio.label);
            RatioDebug {
                label: ratio.label.clone(),
                numerator: debug_input(&ratio.numerator_analyte_id, lookup, panel),
                denominator: debug_input(&ratio.denominator_analyte_id, lookup, panel),
                value: state.map(|r| r.value),
                z_score: state.and_then(|r| r.z_score),
            }
        })
        .collect();
    debug.sigma = Some(score.sigma);
    debug.score = Some(score.score);
    debug.ratio_z_fallback = score.ratio_z_fallback;
    debug.fa_ox = score.fa_ox;

    PathwayState::Computed(ComputedPathway {
        pathway_id: def.id.clone(),
        framework: def.framework.clone(),
        title: def.title.clone(),
        severity: Severity::from_score(score.score),
        category: Category::from_sigma(score.sigma),
        score: score.score,
        sigma: score.sigma,
        matched: build_matches(&inputs, catalog),
        drivers: top_drivers(def, &inputs, catalog),
        ratio: ratios.first().cloned(),
        ratios,
        metabolite_lines: metabolite_lines(def, lookup),
        partial: allow_partial && assessment.present_count < assessment.required_count,
        completeness: assessment.completeness,
        debug,
    })
}

/// Up to three analytes with the largest |z|; ties break on analyte id.
pub fn top_drivers(
    def: &PathwayDefinition,
    inputs: &[&AnalyteInput<'_>],
    catalog: &AnalyteCatalog,
) -> Vec<PathwayDriver> {
    let mut seen = HashSet::new();
    let mut candidates: Vec<(&AnalyteInput<'_>, f64)> = inputs
        .iter()
        .filter_map(|input| Some((*input, input.z?)))
        .filter(|(input, _)| seen.insert(input.key.clone()))
        .collect();
    candidates.sort_by(|(a, za), (b, zb)| {
        zb.abs()
            .partial_cmp(&za.abs())
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.analyte_id.cmp(b.analyte_id))
    });

    candidates
        .into_iter()
        .take(MAX_DRIVERS)
        .map(|(input, z)| {
            let override_label = def
                .calculations
                .metabolite_lines
                .iter()
                .find(|line| catalog.normalize(&line.analyte_id) == input.key)
                .and_then(|line| line.display_label.clone());
            PathwayDriver {
                analyte_id: input.analyte_id.to_string(),
                display_label: override_label.unwrap_or_else(|| catalog.label_for(input.analyte_id)),
                z_score: normalize_zero(z),
                value: input.result.and_then(AnalyteResult::numeric_value),
                unit: input.result.and_then(|r| r.unit.clone()),
            }
        })
        .collect()
}

/// Display rows for catalog-known analytes; rows without a result are marked missing.
pub fn metabolite_lines(def: &PathwayDefinition, lookup: &ResultLookup<'_>) -> Vec<MetaboliteLineState> {
    let catalog = lookup.catalog();
    def.calculations
        .metabolite_lines
        .iter()
        .filter(|line| catalog.is_known(&line.analyte_id))
        .map(|line| {
            let display_label = line
                .display_label
                .clone()
                .unwrap_or_else(|| catalog.label_for(&line.analyte_id));
            let Some(result) = lookup.get(&line.analyte_id) else {
                return MetaboliteLineState {
                    analyte_id: line.analyte_id.clone(),
                    display_label,
                    display_metric: line.display_metric,
                    value: None,
                    value_text: None,
                    unit: None,
                    z_score: None,
                    fold_change: None,
                    baseline_value: None,
                    ref_range: None,
                    missing: true,
                };
            };
            let value = result.numeric_value();
            let (baseline_value, fold) = if line.display_metric == DisplayMetric::FoldChange {
                let baseline = baseline_from_ref_range(
                    result.ref_range.as_ref(),
                    line.baseline.unwrap_or_default(),
                );
                (baseline, fold_change(value, baseline))
            } else {
                (None, None)
            };
            MetaboliteLineState {
                analyte_id: line.analyte_id.clone(),
                display_label,
                display_metric: line.display_metric,
                value,
                value_text: result.value_text.clone(),
                unit: result.unit.clone(),
                z_score: resolve_z(result).map(normalize_zero),
                fold_change: fold.map(normalize_zero),
                baseline_value: baseline_value.map(normalize_zero),
                ref_range: result.ref_range,
                missing: false,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_state.rs"]
mod tests;
