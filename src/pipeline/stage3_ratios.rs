use crate::math::metrics::{
    approximate_sd_from_range, baseline_from_ref_range, normalize_zero, safe_divide,
    z_from_value_and_ref,
};
use crate::model::analyte::{AnalyteResult, RefRange};
use crate::model::pathway::{Baseline, RatioDefinition, RatioTransform};
use crate::model::state::{PathwayRatioState, RatioZSource};
use crate::pipeline::stage1_inputs::ResultLookup;

/// Ratio band implied by the two analytes' own reference ranges:
/// `[num.low / den.high, num.high / den.low]`, ordered.
pub fn derive_ratio_ref_range(
    numerator: Option<&AnalyteResult>,
    denominator: Option<&AnalyteResult>,
) -> Option<RefRange> {
    let num = numerator?.ref_range?;
    let den = denominator?.ref_range?;
    let low = safe_divide(num.finite_low(), den.finite_high())?;
    let high = safe_divide(num.finite_high(), den.finite_low())?;
    Some(RefRange::new(low.min(high), low.max(high)))
}

/// Moves a raw-scale range onto the scale of `transform`. Log needs both bounds positive.
fn transform_range(range: RefRange, transform: RatioTransform) -> Option<RefRange> {
    let (low, high) = range.bounds()?;
    match transform {
        RatioTransform::Log => {
            if low <= 0.0 || high <= 0.0 {
                return None;
            }
            Some(RefRange::new(low.ln(), high.ln()))
        }
        RatioTransform::Raw | RatioTransform::Zscore => Some(range),
    }
}

fn z_against_range(value: f64, range: &RefRange) -> Option<f64> {
    z_from_value_and_ref(
        Some(value),
        baseline_from_ref_range(Some(range), Baseline::ReferenceMid),
        approximate_sd_from_range(Some(range)),
    )
}

/// Returns `None` when the ratio cannot be formed: a missing or zero
/// denominator, or a non-positive ratio under the log transform.
pub fn compute_ratio_state(
    definition: &RatioDefinition,
    lookup: &ResultLookup<'_>,
) -> Option<PathwayRatioState> {
    let numerator = lookup.get(&definition.numerator_analyte_id);
    let denominator = lookup.get(&definition.denominator_analyte_id);
    let raw = safe_divide(
        numerator.and_then(AnalyteResult::numeric_value),
        denominator.and_then(AnalyteResult::numeric_value),
    )?;

    let transform = definition.ratio_transform;
    let scaled = match transform {
        RatioTransform::Log if raw <= 0.0 => return None,
        RatioTransform::Log => raw.ln(),
        RatioTransform::Raw | RatioTransform::Zscore => raw,
    };

    let explicit = definition
        .ratio_ref_range
        .and_then(|r| transform_range(r, transform));
    let derived = derive_ratio_ref_range(numerator, denominator)
        .and_then(|r| transform_range(r, transform));

    let cohort_z = definition
        .ratio_cohort_stats
        .as_ref()
        .filter(|stats| stats.is_usable())
        .and_then(|stats| z_from_value_and_ref(Some(scaled), Some(stats.mean), Some(stats.sd)));

    let (z_score, z_source) = if let Some(z) = cohort_z {
        (Some(z), Some(RatioZSource::CohortStats))
    } else if let Some(z) = explicit.as_ref().and_then(|r| z_against_range(scaled, r)) {
        (Some(z), Some(RatioZSource::RatioRefRange))
    } else if let Some(z) = derived.as_ref().and_then(|r| z_against_range(scaled, r)) {
        (Some(z), Some(RatioZSource::DerivedRefRange))
    } else {
        (None, None)
    };

    let value = match (transform, z_score) {
        (RatioTransform::Zscore, Some(z)) => z,
        _ => scaled,
    };

    Some(PathwayRatioState {
        label: definition.label.clone(),
        value: normalize_zero(value),
        raw_value: normalize_zero(raw),
        z_score: z_score.map(normalize_zero),
        transform,
        ref_range: explicit.or(derived),
        z_source,
    })
}

/// States for every definition that can be formed, in definition order.
pub fn compute_ratio_states(
    definitions: &[RatioDefinition],
    lookup: &ResultLookup<'_>,
) -> Vec<PathwayRatioState> {
    definitions
        .iter()
        .filter_map(|def| compute_ratio_state(def, lookup))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_ratios.rs"]
mod tests;
