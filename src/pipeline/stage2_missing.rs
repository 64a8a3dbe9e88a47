use std::collections::BTreeMap;

use crate::model::pathway::PathwayDefinition;
use crate::model::state::{Completeness, DebugInput, MissingReason};
use crate::panels::PanelCatalog;
use crate::pipeline::stage1_inputs::ResultLookup;

#[derive(Debug, Clone, Default)]
pub struct MissingAssessment {
    /// Display labels of missing required analytes, in definition order.
    pub missing_labels: Vec<String>,
    pub reasons: BTreeMap<String, MissingReason>,
    /// Labels of required ids the analyte catalog does not recognize.
    pub unknown_labels: Vec<String>,
    pub present_count: usize,
    pub required_count: usize,
    pub completeness: Completeness,
}

impl MissingAssessment {
    pub fn has_missing_in_panel(&self) -> bool {
        has_missing_in_panel(&self.reasons)
    }

    fn push_missing(&mut self, label: &str) -> bool {
        if self.missing_labels.iter().any(|l| l == label) {
            return false;
        }
        self.missing_labels.push(label.to_string());
        true
    }
}

pub fn reason_for(input: &DebugInput) -> MissingReason {
    if !input.known || !input.in_panel {
        MissingReason::MissingInPanel
    } else {
        MissingReason::MissingInSample
    }
}

pub fn classify_missing(required: &[DebugInput]) -> MissingAssessment {
    let mut out = MissingAssessment {
        required_count: required.len(),
        ..MissingAssessment::default()
    };
    for input in required {
        if !input.known {
            out.unknown_labels.push(input.display_name.clone());
            out.reasons
                .insert(input.analyte_id.clone(), MissingReason::MissingInPanel);
            if !input.is_present() {
                out.push_missing(&input.display_name);
            }
            continue;
        }
        if input.is_present() {
            out.present_count += 1;
            continue;
        }
        out.push_missing(&input.display_name);
        out.reasons.insert(input.analyte_id.clone(), reason_for(input));
    }
    out.completeness = compute_completeness(required);
    out
}

/// Completeness over required analytes the panel offers.
pub fn compute_completeness(required: &[DebugInput]) -> Completeness {
    let mut completeness = Completeness::default();
    for input in required.iter().filter(|input| input.in_panel) {
        completeness.required_count += 1;
        if input.is_present() {
            completeness.present_count += 1;
            completeness.present.push(input.display_name.clone());
        } else {
            completeness.missing.push(input.display_name.clone());
        }
    }
    completeness.fraction = if completeness.required_count == 0 {
        0.0
    } else {
        completeness.present_count as f64 / completeness.required_count as f64
    };
    completeness
}

pub fn has_missing_in_panel(reasons: &BTreeMap<String, MissingReason>) -> bool {
    reasons.values().any(|r| *r == MissingReason::MissingInPanel)
}

/// Ratio numerators and denominators that are required but have no result
/// at all join the missing list.
pub fn fold_ratio_inputs(
    def: &PathwayDefinition,
    lookup: &ResultLookup<'_>,
    panel: &dyn PanelCatalog,
    assessment: &mut MissingAssessment,
) {
    let catalog = lookup.catalog();
    let required_keys: Vec<String> = def
        .required_analytes
        .iter()
        .map(|id| catalog.normalize(id))
        .collect();

    for ratio in def.ratio_definitions() {
        for id in [&ratio.numerator_analyte_id, &ratio.denominator_analyte_id] {
            let key = catalog.normalize(id);
            if !required_keys.contains(&key) || lookup.contains(id) {
                continue;
            }
            let label = catalog.label_for(id);
            if assessment.push_missing(&label) {
                let reason = if catalog.is_known(id) && panel.is_in_panel(id) {
                    MissingReason::MissingInSample
                } else {
                    MissingReason::MissingInPanel
                };
                assessment.reasons.entry(id.clone()).or_insert(reason);
            }
        }
    }
}

/// Adds ratio inputs that block every ratio from forming. Existing reasons
/// are kept; new ones are `unknown`.
pub fn fold_unresolved_ratio_inputs(
    def: &PathwayDefinition,
    lookup: &ResultLookup<'_>,
    assessment: &mut MissingAssessment,
) {
    let catalog = lookup.catalog();
    for ratio in def.ratio_definitions() {
        let num = lookup.numeric_value(&ratio.numerator_analyte_id);
        let den = lookup.numeric_value(&ratio.denominator_analyte_id);
        if crate::math::metrics::safe_divide(num, den).is_some() {
            continue;
        }
        let blocked = [
            (&ratio.numerator_analyte_id, num.is_none()),
            (&ratio.denominator_analyte_id, den.is_none_or(|v| v == 0.0)),
        ];
        for (id, is_blocking) in blocked {
            if !is_blocking {
                continue;
            }
            assessment.push_missing(&catalog.label_for(id));
            assessment
                .reasons
                .entry(id.clone())
                .or_insert(MissingReason::Unknown);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_missing.rs"]
mod tests;
