use serde::{Deserialize, Serialize};

use crate::model::state::PathwayState;
use crate::model::thresholds::Severity;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathwaySummary {
    pub total: usize,
    pub significant: usize,
    pub mild: usize,
    pub normal: usize,
    /// Every non-computed state, whatever its sub-reason.
    pub insufficient: usize,
}

impl PathwaySummary {
    pub fn add(&mut self, state: &PathwayState) {
        self.total += 1;
        match state.as_computed().map(|c| c.severity) {
            Some(Severity::Significant) => self.significant += 1,
            Some(Severity::Mild) => self.mild += 1,
            Some(Severity::Normal) => self.normal += 1,
            None => self.insufficient += 1,
        }
    }

    pub fn computed(&self) -> usize {
        self.total - self.insufficient
    }
}

pub fn summarize_pathway_states(states: &[PathwayState]) -> PathwaySummary {
    states.iter().fold(PathwaySummary::default(), |mut acc, state| {
        acc.add(state);
        acc
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_summary.rs"]
mod tests;
