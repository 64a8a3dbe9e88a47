//! Scoring strategies. Each strategy is a pure function from the joined
//! inputs of one pathway to a sigma/score pair, or a reason it cannot score.

use std::collections::HashMap;

use crate::math::metrics::normalize_zero;
use crate::model::pathway::{CalculationSpec, PathwayDefinition, ScoreMethod};
use crate::model::state::{FaOxDetails, PathwayRatioState};
use crate::pipeline::stage1_inputs::{AnalyteInput, ResultLookup};

pub mod composite;
pub mod fa_ox;
pub mod ratio;
pub mod weighted;

pub const WEIGHTED_Z: &str = "weightedZ";
pub const RATIO_Z: &str = "ratioZ";
pub const BCAA_OXIDATION: &str = "bcaaOxidation";
pub const REDOX_PRESSURE: &str = "redoxPressure";
pub const AROMATIC_BALANCE: &str = "aromaticBalance";
pub const NITRIC_OXIDE: &str = "nitricOxide";
pub const FA_OX_GROUPED: &str = "faOxGrouped";
pub const HYDROXYBUTYRATE_SIGNAL: &str = "hydroxybutyrateSignal";

pub struct StrategyInput<'a> {
    pub definition: &'a PathwayDefinition,
    pub lookup: &'a ResultLookup<'a>,
    pub required: &'a [AnalyteInput<'a>],
    pub optional: &'a [AnalyteInput<'a>],
    pub ratios: &'a [PathwayRatioState],
}

impl StrategyInput<'_> {
    pub fn required_z(&self) -> Vec<f64> {
        self.required.iter().filter_map(|i| i.z).collect()
    }

    pub fn optional_z(&self) -> Vec<f64> {
        self.optional.iter().filter_map(|i| i.z).collect()
    }

    pub fn z_for(&self, analyte_id: &str) -> Option<f64> {
        self.lookup.resolved_z(analyte_id)
    }

    pub fn ratio_z(&self, label: &str) -> Option<f64> {
        self.ratios
            .iter()
            .find(|r| r.label == label)
            .and_then(|r| r.z_score)
    }

    pub fn primary_ratio(&self) -> Option<&PathwayRatioState> {
        self.ratios.first()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyScore {
    pub sigma: f64,
    pub score: f64,
    pub fa_ox: Option<FaOxDetails>,
    pub ratio_z_fallback: bool,
}

impl StrategyScore {
    pub fn new(sigma: f64, score: f64) -> Self {
        Self {
            sigma: normalize_zero(sigma),
            score: normalize_zero(score),
            fa_ox: None,
            ratio_z_fallback: false,
        }
    }
}

/// Which labels an insufficient strategy reports as missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingList {
    AllRequired,
    Detected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StrategyOutcome {
    Scored(StrategyScore),
    Insufficient(MissingList),
    NotImplemented,
}

pub type StrategyFn = fn(&StrategyInput<'_>) -> StrategyOutcome;

#[derive(Clone)]
pub struct StrategyRegistry {
    by_name: HashMap<String, StrategyFn>,
}

impl std::fmt::Debug for StrategyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("StrategyRegistry").field("names", &names).finish()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl StrategyRegistry {
    pub fn empty() -> Self {
        Self {
            by_name: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(WEIGHTED_Z, weighted::weighted_z);
        registry.register(RATIO_Z, ratio::ratio_z);
        registry.register(BCAA_OXIDATION, composite::bcaa_oxidation);
        registry.register(REDOX_PRESSURE, composite::redox_pressure);
        registry.register(AROMATIC_BALANCE, composite::aromatic_balance);
        registry.register(NITRIC_OXIDE, composite::nitric_oxide);
        registry.register(FA_OX_GROUPED, fa_ox::fa_ox_grouped);
        registry.register(HYDROXYBUTYRATE_SIGNAL, weighted::weighted_z);
        registry
    }

    /// Registers or replaces a strategy. Returns the previous one, if any.
    pub fn register(&mut self, name: &str, strategy: StrategyFn) -> Option<StrategyFn> {
        self.by_name.insert(name.to_string(), strategy)
    }

    pub fn get(&self, name: &str) -> Option<StrategyFn> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// A named strategy wins over the method default. `ruleBased` has no
    /// default; an unregistered name resolves to nothing.
    pub fn resolve(&self, calculations: &CalculationSpec) -> Option<StrategyFn> {
        match calculations.score_strategy.as_deref() {
            Some(name) => self.get(name),
            None => match calculations.pathway_score_method {
                ScoreMethod::WeightedZ => self.get(WEIGHTED_Z),
                ScoreMethod::RatioZ => self.get(RATIO_Z),
                ScoreMethod::RuleBased => None,
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/strategies/mod.rs"]
mod tests;
