use crate::strategies::{StrategyInput, StrategyOutcome, StrategyScore};

/// Scores the primary ratio's z-score. A ratio without a z scores 0 and is
/// flagged as a fallback so reports and validation can surface it.
pub fn ratio_z(input: &StrategyInput<'_>) -> StrategyOutcome {
    let Some(ratio) = input.primary_ratio() else {
        return StrategyOutcome::NotImplemented;
    };
    match ratio.z_score {
        Some(z) => StrategyOutcome::Scored(StrategyScore::new(z, z.abs())),
        None => {
            let mut score = StrategyScore::new(0.0, 0.0);
            score.ratio_z_fallback = true;
            StrategyOutcome::Scored(score)
        }
    }
}
