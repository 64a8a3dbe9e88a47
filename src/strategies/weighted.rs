use crate::math::blend::{max_abs, mean};
use crate::strategies::{MissingList, StrategyInput, StrategyOutcome, StrategyScore};

/// Mean z over every matched analyte for sigma; the largest |z| for score.
pub fn weighted_z(input: &StrategyInput<'_>) -> StrategyOutcome {
    let mut zs = input.required_z();
    zs.extend(input.optional_z());
    let (Some(sigma), Some(score)) = (mean(&zs), max_abs(zs.iter().copied())) else {
        return StrategyOutcome::Insufficient(MissingList::AllRequired);
    };
    StrategyOutcome::Scored(StrategyScore::new(sigma, score))
}
