use crate::model::analyte::{AnalyteResult, RefRange};
use crate::model::pathway::Baseline;

/// `a / b` when both are finite and `b != 0`.
pub fn safe_divide(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    let (a, b) = (a?, b?);
    if !a.is_finite() || !b.is_finite() || b == 0.0 {
        return None;
    }
    let q = a / b;
    q.is_finite().then_some(q)
}

pub fn z_from_value_and_ref(value: Option<f64>, mean: Option<f64>, sd: Option<f64>) -> Option<f64> {
    let (value, mean, sd) = (value?, mean?, sd?);
    if !value.is_finite() || !mean.is_finite() || !sd.is_finite() || sd <= 0.0 {
        return None;
    }
    let z = (value - mean) / sd;
    z.is_finite().then_some(z)
}

pub fn baseline_from_ref_range(range: Option<&RefRange>, preference: Baseline) -> Option<f64> {
    let range = range?;
    match preference {
        Baseline::ReferenceLower => range.finite_low(),
        Baseline::ReferenceUpper => range.finite_high(),
        // No cohort distribution exists at the single-analyte level.
        Baseline::ReferenceMid | Baseline::CohortMedian => {
            let (low, high) = range.bounds()?;
            Some((low + high) / 2.0)
        }
    }
}

/// Treats the published range as roughly mean ± 2 SD.
pub fn approximate_sd_from_range(range: Option<&RefRange>) -> Option<f64> {
    let (low, high) = range?.bounds()?;
    let sd = (high - low) / 4.0;
    (sd > 0.0 && sd.is_finite()).then_some(sd)
}

pub fn fold_change(value: Option<f64>, baseline: Option<f64>) -> Option<f64> {
    safe_divide(value, baseline)
}

/// Maps `-0.0` to `0.0`; every other value passes through.
pub fn normalize_zero(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

/// Supplied z-score when finite, else one derived from the result's own range.
pub fn resolve_z(result: &AnalyteResult) -> Option<f64> {
    if let Some(z) = result.finite_z() {
        return Some(z);
    }
    derived_z(result)
}

pub fn derived_z(result: &AnalyteResult) -> Option<f64> {
    let range = result.ref_range.as_ref();
    z_from_value_and_ref(
        result.numeric_value(),
        baseline_from_ref_range(range, Baseline::ReferenceMid),
        approximate_sd_from_range(range),
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/math/metrics.rs"]
mod tests;
