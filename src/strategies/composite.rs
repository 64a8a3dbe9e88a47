use crate::math::blend::{max_abs, mean, weighted_blend};
use crate::strategies::{MissingList, StrategyInput, StrategyOutcome, StrategyScore};

const BCAA_CORE_WEIGHT: f64 = 0.65;
const BCAA_CATABOLITE_WEIGHT: f64 = 0.35;

const REDOX_RATIOS: [(&str, f64); 2] = [("Ketone redox ratio", 0.2), ("Cytosolic redox ratio", 0.1)];
const AROMATIC_RATIOS: [(&str, f64); 2] = [("Phe:Tyr ratio", 0.2), ("Kyn:Trp ratio", 0.1)];
const CORE_WEIGHT: f64 = 0.7;

const NO_CORE_WEIGHT: f64 = 0.6;
const NO_RATIO_WEIGHT: f64 = 0.4;
const NO_PAIRS: [(&str, &str); 2] = [("citrulline", "arginine"), ("ornithine", "arginine")];

/// Branched-chain amino acids blended with their optional catabolites.
pub fn bcaa_oxidation(input: &StrategyInput<'_>) -> StrategyOutcome {
    let Some(core) = mean(&input.required_z()) else {
        return StrategyOutcome::Insufficient(MissingList::AllRequired);
    };
    let catabolites = mean(&input.optional_z());
    let Some(weighted) = weighted_blend(&[
        (Some(core), BCAA_CORE_WEIGHT),
        (catabolites, BCAA_CATABOLITE_WEIGHT),
    ]) else {
        return StrategyOutcome::Insufficient(MissingList::AllRequired);
    };
    StrategyOutcome::Scored(StrategyScore::new(weighted, weighted.abs()))
}

pub fn redox_pressure(input: &StrategyInput<'_>) -> StrategyOutcome {
    core_with_ratios(input, &REDOX_RATIOS)
}

pub fn aromatic_balance(input: &StrategyInput<'_>) -> StrategyOutcome {
    core_with_ratios(input, &AROMATIC_RATIOS)
}

fn core_with_ratios(input: &StrategyInput<'_>, ratios: &[(&str, f64)]) -> StrategyOutcome {
    let Some(core) = mean(&input.required_z()) else {
        return StrategyOutcome::Insufficient(MissingList::AllRequired);
    };
    let mut components = vec![(Some(core), CORE_WEIGHT)];
    components.extend(ratios.iter().map(|(label, w)| (input.ratio_z(label), *w)));
    blend_with_core(&components, core, MissingList::AllRequired)
}

/// Core amino acids plus the mean of the citrulline and ornithine deltas
/// against arginine. Needs two core z-scores.
pub fn nitric_oxide(input: &StrategyInput<'_>) -> StrategyOutcome {
    let core_zs = input.required_z();
    if core_zs.len() < 2 {
        return StrategyOutcome::Insufficient(MissingList::Detected);
    }
    let Some(core) = mean(&core_zs) else {
        return StrategyOutcome::Insufficient(MissingList::Detected);
    };
    let core_z = |id: &str| {
        let key = input.lookup.catalog().normalize(id);
        input.required.iter().find(|i| i.key == key).and_then(|i| i.z)
    };
    let deltas: Vec<f64> = NO_PAIRS
        .iter()
        .filter_map(|(num, den)| Some(core_z(num)? - core_z(den)?))
        .collect();
    blend_with_core(
        &[(Some(core), NO_CORE_WEIGHT), (mean(&deltas), NO_RATIO_WEIGHT)],
        core,
        MissingList::Detected,
    )
}

/// Sigma is the renormalized blend; score is the largest |z| among the
/// available components and the core.
fn blend_with_core(components: &[(Option<f64>, f64)], core: f64, missing: MissingList) -> StrategyOutcome {
    let Some(weighted) = weighted_blend(components) else {
        return StrategyOutcome::Insufficient(missing);
    };
    let available = components
        .iter()
        .filter_map(|(z, _)| z.filter(|v| v.is_finite()))
        .chain(std::iter::once(core));
    let score = max_abs(available).unwrap_or(0.0);
    StrategyOutcome::Scored(StrategyScore::new(weighted, score))
}
