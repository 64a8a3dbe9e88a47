use crate::math::blend::{median, weighted_blend};
use crate::math::metrics::{normalize_zero, z_from_value_and_ref};
use crate::model::pathway::CohortStats;
use crate::model::state::FaOxDetails;
use crate::strategies::{MissingList, StrategyInput, StrategyOutcome, StrategyScore};

pub const SHORT_CHAIN: [&str; 5] = [
    "propionylcarnitine",
    "butyrylcarnitine",
    "isobutyrylcarnitine",
    "isovalerylcarnitine",
    "valerylcarnitine",
];
pub const MEDIUM_CHAIN: [&str; 4] = [
    "hexanoylcarnitine",
    "octanoylcarnitine",
    "decanoylcarnitine",
    "lauroylcarnitine",
];
pub const LONG_CHAIN: [&str; 3] = ["myristoylcarnitine", "palmitoylcarnitine", "stearoylcarnitine"];

const FREE_CARNITINE: &str = "carnitine";
const ACETYLCARNITINE: &str = "acetylcarnitine";
const OCTANOYLCARNITINE: &str = "octanoylcarnitine";
const DECANOYLCARNITINE: &str = "decanoylcarnitine";

const MEDIUM_WEIGHT: f64 = 0.35;
const LONG_WEIGHT: f64 = 0.2;
const SHORT_WEIGHT: f64 = 0.15;
const C0_WEIGHT: f64 = 0.15;
const C2_WEIGHT: f64 = 0.15;

fn group_median(input: &StrategyInput<'_>, group: &[&str]) -> Option<f64> {
    let zs: Vec<f64> = group.iter().filter_map(|id| input.z_for(id)).collect();
    median(&zs)
}

/// z of ln(numerator / c0) against cohort stats; both values must be positive.
fn log_ratio_z(numerator: Option<f64>, c0: Option<f64>, stats: Option<&CohortStats>) -> Option<f64> {
    let (numerator, c0) = (numerator?, c0?);
    if numerator <= 0.0 || c0 <= 0.0 {
        return None;
    }
    let stats = stats?;
    z_from_value_and_ref(Some((numerator / c0).ln()), Some(stats.mean), Some(stats.sd))
        .map(normalize_zero)
}

/// Acylcarnitine chain-length medians blended with the C0 and C2 anchors.
/// The C2/C0 and medium/C0 log-ratio z-scores are reported but not scored.
pub fn fa_ox_grouped(input: &StrategyInput<'_>) -> StrategyOutcome {
    let z_short = group_median(input, &SHORT_CHAIN);
    let z_medium = group_median(input, &MEDIUM_CHAIN);
    let z_long = group_median(input, &LONG_CHAIN);
    let z_c0 = input.z_for(FREE_CARNITINE);
    let z_c2 = input.z_for(ACETYLCARNITINE);

    let Some(weighted) = weighted_blend(&[
        (z_medium, MEDIUM_WEIGHT),
        (z_long, LONG_WEIGHT),
        (z_short, SHORT_WEIGHT),
        (z_c0, C0_WEIGHT),
        (z_c2, C2_WEIGHT),
    ]) else {
        return StrategyOutcome::Insufficient(MissingList::AllRequired);
    };

    let stats = input.definition.calculations.fa_ox_ratio_stats.as_ref();
    let c0 = input.lookup.numeric_value(FREE_CARNITINE);
    let c2 = input.lookup.numeric_value(ACETYLCARNITINE);
    let medium_numerator = match (
        input.lookup.numeric_value(OCTANOYLCARNITINE),
        input.lookup.numeric_value(DECANOYLCARNITINE),
    ) {
        (Some(c8), Some(c10)) => Some(c8 + c10),
        (None, Some(c10)) => Some(c10),
        (Some(c8), None) => Some(c8),
        (None, None) => None,
    };

    let mut score = StrategyScore::new(weighted, weighted.abs());
    score.fa_ox = Some(FaOxDetails {
        z_short,
        z_medium,
        z_long,
        z_c0,
        z_c2,
        ratio_z_c2c0: log_ratio_z(c2, c0, stats.and_then(|s| s.c2c0.as_ref())),
        ratio_z_medc0: log_ratio_z(medium_numerator, c0, stats.and_then(|s| s.medc0.as_ref())),
    });
    StrategyOutcome::Scored(score)
}
