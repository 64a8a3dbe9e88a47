use std::cmp::Ordering;

/// Weighted mean over the components that have a finite value, with the
/// weights of the surviving components renormalized to sum to 1.
pub fn weighted_blend(components: &[(Option<f64>, f64)]) -> Option<f64> {
    let mut total_weight = 0.0;
    let mut acc = 0.0;
    for &(value, weight) in components {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            continue;
        };
        if !weight.is_finite() || weight <= 0.0 {
            continue;
        }
        total_weight += weight;
        acc += weight * value;
    }
    if total_weight <= 0.0 {
        return None;
    }
    let blended = acc / total_weight;
    blended.is_finite().then_some(blended)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; even-length inputs average the two middle values.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

pub fn max_abs<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    values.into_iter().map(f64::abs).fold(None, |acc, v| match acc {
        Some(m) if m >= v => Some(m),
        _ => Some(v),
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/math/blend.rs"]
mod tests;
