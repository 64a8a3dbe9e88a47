use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::analytes::AnalyteCatalog;
use crate::error::ReportError;
use crate::model::state::PathwayState;
use crate::pipeline::stage5_summary::{PathwaySummary, summarize_pathway_states};

pub mod json;
pub mod text;

pub const TOOL_NAME: &str = "kira-pathways";
pub const STATES_FILE: &str = "pathway_states.json";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";

/// Everything a report needs from one run.
#[derive(Debug, Clone, Copy)]
pub struct ReportContext<'a> {
    pub tool_version: &'a str,
    pub panel_id: &'a str,
    /// Maps analyte ids in missing reasons back to display labels.
    pub catalog: &'a AnalyteCatalog,
    pub registry_version: Option<&'a str>,
    pub frameworks: &'a BTreeMap<String, String>,
    pub states: &'a [PathwayState],
    pub n_results: usize,
    pub validation_failures: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameworkSummary {
    pub framework: String,
    pub title: String,
    pub summary: PathwaySummary,
    pub mean_completeness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub tool: String,
    pub version: String,
    pub panel_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_version: Option<String>,
    pub n_results: usize,
    pub pathways: PathwaySummary,
    pub mean_completeness: f64,
    pub validation_failures: usize,
    pub frameworks: Vec<FrameworkSummary>,
}

impl RunSummary {
    pub fn from_context(ctx: &ReportContext<'_>) -> Self {
        let frameworks = group_by_framework(ctx.states)
            .into_iter()
            .map(|(code, states)| FrameworkSummary {
                title: framework_title(ctx.frameworks, code),
                framework: code.to_string(),
                summary: states.iter().fold(PathwaySummary::default(), |mut acc, s| {
                    acc.add(s);
                    acc
                }),
                mean_completeness: mean_completeness(states.iter().copied()),
            })
            .collect();

        Self {
            tool: TOOL_NAME.to_string(),
            version: ctx.tool_version.to_string(),
            panel_id: ctx.panel_id.to_string(),
            registry_version: ctx.registry_version.map(str::to_string),
            n_results: ctx.n_results,
            pathways: summarize_pathway_states(ctx.states),
            mean_completeness: mean_completeness(ctx.states.iter()),
            validation_failures: ctx.validation_failures,
            frameworks,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub states: PathBuf,
    pub summary: PathBuf,
    pub report: PathBuf,
}

pub fn write_reports(ctx: &ReportContext<'_>, out_dir: &Path) -> Result<ReportPaths, ReportError> {
    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let summary = RunSummary::from_context(ctx);
    let paths = ReportPaths {
        states: out_dir.join(STATES_FILE),
        summary: out_dir.join(SUMMARY_FILE),
        report: out_dir.join(REPORT_FILE),
    };

    json::write_json(&paths.states, &ctx.states)?;
    json::write_json(&paths.summary, &summary)?;

    let rendered = text::render_report_text(ctx, &summary);
    fs::write(&paths.report, rendered).map_err(|source| ReportError::Io {
        path: paths.report.clone(),
        source,
    })?;

    info!(
        out_dir = %out_dir.display(),
        pathways = summary.pathways.total,
        computed = summary.pathways.computed(),
        "reports written"
    );
    Ok(paths)
}

/// States grouped by framework code, in code order; state order is kept within a group.
pub fn group_by_framework(states: &[PathwayState]) -> BTreeMap<&str, Vec<&PathwayState>> {
    let mut groups: BTreeMap<&str, Vec<&PathwayState>> = BTreeMap::new();
    for state in states {
        groups.entry(state.framework()).or_default().push(state);
    }
    groups
}

pub fn framework_title(frameworks: &BTreeMap<String, String>, code: &str) -> String {
    frameworks
        .get(code)
        .cloned()
        .unwrap_or_else(|| code.to_string())
}

/// Mean completeness fraction over states that have countable required analytes.
pub fn mean_completeness<'a>(states: impl Iterator<Item = &'a PathwayState>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for state in states {
        let completeness = state.completeness();
        if completeness.required_count > 0 {
            sum += completeness.fraction;
            n += 1;
        }
    }
    if n == 0 { 0.0 } else { sum / n as f64 }
}

pub fn format_f64_3(v: f64) -> String {
    format!("{:.3}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
