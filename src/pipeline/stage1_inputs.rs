use std::collections::HashMap;

use crate::analytes::AnalyteCatalog;
use crate::math::metrics::{derived_z, resolve_z};
use crate::model::analyte::AnalyteResult;
use crate::model::state::{DebugInput, PathwayMatch};
use crate::panels::PanelCatalog;

/// Results keyed by normalized name. The first result for a key wins;
/// later duplicates are counted and ignored.
#[derive(Debug, Clone)]
pub struct ResultLookup<'a> {
    catalog: &'a AnalyteCatalog,
    by_key: HashMap<String, &'a AnalyteResult>,
    duplicates: usize,
}

impl<'a> ResultLookup<'a> {
    pub fn build(results: &'a [AnalyteResult], catalog: &'a AnalyteCatalog) -> Self {
        let mut by_key = HashMap::with_capacity(results.len());
        let mut duplicates = 0usize;
        for result in results {
            let key = catalog.normalize(&result.name);
            if key.is_empty() {
                continue;
            }
            if by_key.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            by_key.insert(key, result);
        }
        Self {
            catalog,
            by_key,
            duplicates,
        }
    }

    pub fn catalog(&self) -> &'a AnalyteCatalog {
        self.catalog
    }

    pub fn get(&self, analyte_id: &str) -> Option<&'a AnalyteResult> {
        self.by_key.get(&self.catalog.normalize(analyte_id)).copied()
    }

    pub fn contains(&self, analyte_id: &str) -> bool {
        self.get(analyte_id).is_some()
    }

    pub fn numeric_value(&self, analyte_id: &str) -> Option<f64> {
        self.get(analyte_id).and_then(AnalyteResult::numeric_value)
    }

    pub fn resolved_z(&self, analyte_id: &str) -> Option<f64> {
        self.get(analyte_id).and_then(resolve_z)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

/// One definition analyte joined with its result and resolved z-score.
#[derive(Debug, Clone)]
pub struct AnalyteInput<'a> {
    pub analyte_id: &'a str,
    pub key: String,
    pub result: Option<&'a AnalyteResult>,
    pub z: Option<f64>,
}

impl AnalyteInput<'_> {
    pub fn is_present(&self) -> bool {
        self.result.is_some_and(AnalyteResult::has_measurement)
    }
}

pub fn collect_inputs<'a>(ids: &'a [String], lookup: &ResultLookup<'a>) -> Vec<AnalyteInput<'a>> {
    ids.iter()
        .map(|id| {
            let result = lookup.get(id);
            AnalyteInput {
                analyte_id: id.as_str(),
                key: lookup.catalog().normalize(id),
                result,
                z: result.and_then(resolve_z),
            }
        })
        .collect()
}

pub fn debug_input(
    analyte_id: &str,
    lookup: &ResultLookup<'_>,
    panel: &dyn PanelCatalog,
) -> DebugInput {
    let catalog = lookup.catalog();
    let result = lookup.get(analyte_id);
    DebugInput {
        analyte_id: analyte_id.to_string(),
        display_name: catalog.label_for(analyte_id),
        normalized: catalog.normalize(analyte_id),
        known: catalog.is_known(analyte_id),
        in_panel: panel.is_in_panel(analyte_id),
        value: result.and_then(AnalyteResult::numeric_value),
        unit: result.and_then(|r| r.unit.clone()),
        z_score: result.and_then(AnalyteResult::finite_z),
        ref_range: result.and_then(|r| r.ref_range),
    }
}

pub fn debug_inputs(
    ids: &[String],
    lookup: &ResultLookup<'_>,
    panel: &dyn PanelCatalog,
) -> Vec<DebugInput> {
    ids.iter().map(|id| debug_input(id, lookup, panel)).collect()
}

/// Matched analytes: required then optional, those with any result at all.
pub fn build_matches(inputs: &[&AnalyteInput<'_>], catalog: &AnalyteCatalog) -> Vec<PathwayMatch> {
    inputs
        .iter()
        .filter_map(|input| {
            let result = input.result?;
            let def = catalog.get(input.analyte_id);
            Some(PathwayMatch {
                analyte_id: def
                    .map(|d| d.id.clone())
                    .unwrap_or_else(|| input.analyte_id.to_string()),
                display_name: catalog.label_for(input.analyte_id),
                normalized: input.key.clone(),
                value: result.numeric_value(),
                unit: result.unit.clone(),
                z_score: input.z,
                z_derived: result.finite_z().is_none() && derived_z(result).is_some(),
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_inputs.rs"]
mod tests;
