use super::*;
use crate::analytes::AnalyteCatalog;
use crate::diagnostics::NoDiagnostics;
use crate::model::analyte::AnalyteResult;
use crate::model::pathway::PathwayDefinition;
use crate::pipeline::stage4_state::{EngineContext, compute_pathway_states};
use crate::strategies::StrategyRegistry;

fn in_panel(id: &str) -> bool {
    id != "arginine"
}

fn sample_states() -> Vec<PathwayState> {
    let catalog = AnalyteCatalog::builtin_v1().unwrap();
    let strategies = StrategyRegistry::builtin();
    let ctx = EngineContext {
        catalog: &catalog,
        panel: &in_panel,
        strategies: &strategies,
        diagnostics: &NoDiagnostics,
    };
    let defs = vec![
        PathwayDefinition::new("A1_TCA", "A", "TCA cycle", &["citric", "succinic"]),
        PathwayDefinition::new("C1_UREA", "C", "Urea cycle", &["arginine", "ornithine"]),
    ];
    let results = vec![
        AnalyteResult::new("Citric acid").with_z(2.4),
        AnalyteResult::new("Succinic acid").with_z(2.0),
        AnalyteResult::new("Ornithine").with_z(0.1),
    ];
    compute_pathway_states(&defs, &results, &ctx)
}

fn frameworks() -> BTreeMap<String, String> {
    let mut map = BTreeMap::new();
    map.insert("A".to_string(), "Energy metabolism".to_string());
    map
}

#[test]
fn test_run_summary_counts_by_framework() {
    let catalog = AnalyteCatalog::builtin_v1().unwrap();
    let states = sample_states();
    let fw = frameworks();
    let ctx = ReportContext {
        tool_version: "0.1.0",
        panel_id: "metabolomics_core",
        catalog: &catalog,
        registry_version: Some("v1"),
        frameworks: &fw,
        states: &states,
        n_results: 3,
        validation_failures: 0,
    };
    let summary = RunSummary::from_context(&ctx);
    assert_eq!(summary.tool, TOOL_NAME);
    assert_eq!(summary.pathways.total, 2);
    assert_eq!(summary.pathways.significant, 1);
    assert_eq!(summary.pathways.insufficient, 1);
    assert_eq!(summary.frameworks.len(), 2);
    assert_eq!(summary.frameworks[0].title, "Energy metabolism");
    // Unlisted framework codes fall back to the code itself.
    assert_eq!(summary.frameworks[1].title, "C");
    assert!((summary.frameworks[0].mean_completeness - 1.0).abs() < 1e-12);
}

#[test]
fn test_mean_completeness_skips_empty() {
    assert_eq!(mean_completeness(std::iter::empty()), 0.0);
    let states = sample_states();
    // TCA 2/2; urea counts ornithine only (arginine is outside the panel).
    let mean = mean_completeness(states.iter());
    assert!((mean - 1.0).abs() < 1e-12);
}

#[test]
fn test_text_report_lists_missing_reasons() {
    let catalog = AnalyteCatalog::builtin_v1().unwrap();
    let states = sample_states();
    let fw = frameworks();
    let ctx = ReportContext {
        tool_version: "0.1.0",
        panel_id: "metabolomics_core",
        catalog: &catalog,
        registry_version: None,
        frameworks: &fw,
        states: &states,
        n_results: 3,
        validation_failures: 2,
    };
    let summary = RunSummary::from_context(&ctx);
    let text = text::render_report_text(&ctx, &summary);
    assert!(text.contains("A. Energy metabolism"));
    assert!(text.contains("A1_TCA TCA cycle: Significant (overactive)"));
    assert!(text.contains("C1_UREA Urea cycle: insufficient data"));
    assert!(text.contains("    - Arginine: Not included in this test panel\n"));
    assert!(text.contains("Validation failures: 2"));
}

#[test]
fn test_write_reports_creates_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/out");
    let catalog = AnalyteCatalog::builtin_v1().unwrap();
    let states = sample_states();
    let fw = frameworks();
    let ctx = ReportContext {
        tool_version: "0.1.0",
        panel_id: "metabolomics_core",
        catalog: &catalog,
        registry_version: None,
        frameworks: &fw,
        states: &states,
        n_results: 3,
        validation_failures: 0,
    };
    let paths = write_reports(&ctx, &out).unwrap();
    assert!(paths.report.exists());

    let states_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.states).unwrap()).unwrap();
    assert_eq!(states_json.as_array().unwrap().len(), 2);
    assert_eq!(states_json[0]["status"], "computed");
    assert_eq!(states_json[1]["status"], "insufficient_data");

    let summary_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&paths.summary).unwrap()).unwrap();
    assert_eq!(summary_json["tool"], "kira-pathways");
    assert_eq!(summary_json["pathways"]["total"], 2);
    assert!(summary_json.get("registry_version").is_none());
}

#[test]
fn test_format_f64_3() {
    assert_eq!(format_f64_3(1.23456), "1.235");
    assert_eq!(format_f64_3(-0.5), "-0.500");
}
