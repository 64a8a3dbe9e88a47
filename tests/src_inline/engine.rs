use std::path::{Path, PathBuf};

use super::*;
use crate::input::load_results;
use crate::model::state::PathwayStatus;
use crate::panels::DEFAULT_PANEL_ID;

fn demo_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/results_demo.json")
}

#[test]
fn test_builtin_engine_loads_collaborators() {
    let engine = Engine::builtin().unwrap();
    assert_eq!(engine.panel_id(), DEFAULT_PANEL_ID);
    assert_eq!(engine.registry().len(), 58);
    assert!(engine.strategies().contains("faOxGrouped"));
    assert!(engine.panel_audit().panel_size_known > 0);
}

#[test]
fn test_unknown_panel_is_an_error() {
    let config = EngineConfig {
        panel: "no_such_panel".to_string(),
        ..EngineConfig::default()
    };
    let err = Engine::from_config(&config).unwrap_err();
    assert!(matches!(err, EngineError::UnknownPanel(ref id) if id == "no_such_panel"));
}

#[test]
fn test_run_covers_every_pathway_in_registry_order() {
    let engine = Engine::builtin().unwrap();
    let results = load_results(&demo_path()).unwrap();
    let states = engine.run(&results, &NoDiagnostics);
    assert_eq!(states.len(), engine.registry().len());
    for (state, def) in states.iter().zip(engine.registry().pathways()) {
        assert_eq!(state.pathway_id(), def.id);
    }
    let tca = &states[0];
    assert_eq!(tca.pathway_id(), "A1_TCA");
    assert_eq!(tca.status(), PathwayStatus::Computed);
}

#[test]
fn test_demo_results_validate_without_errors() {
    let engine = Engine::builtin().unwrap();
    let results = load_results(&demo_path()).unwrap();
    let run = engine.run_validated(&results, ValidationMode::Strict);
    assert_eq!(run.states.len(), 58);
    assert!(run.failures.is_empty(), "{:?}", run.failures);
}

#[test]
fn test_off_mode_matches_plain_run() {
    let engine = Engine::builtin().unwrap();
    let results = load_results(&demo_path()).unwrap();
    let run = engine.run_validated(&results, ValidationMode::Off);
    assert_eq!(run.states, engine.run(&results, &NoDiagnostics));
    assert!(run.failures.is_empty());
}

#[test]
fn test_narrow_panel_turns_gaps_into_insufficient_data() {
    let config = EngineConfig {
        panel: "neuro_amino".to_string(),
        ..EngineConfig::default()
    };
    let engine = Engine::from_config(&config).unwrap();
    let results = load_results(&demo_path()).unwrap();
    let states = engine.run(&results, &NoDiagnostics);
    // Collagen markers are neither reported nor offered by the amino-acid panel.
    let collagen = states.iter().find(|s| s.pathway_id() == "E6_COLLAGEN").unwrap();
    assert_eq!(collagen.status(), PathwayStatus::InsufficientData);
    // Reported analytes still count outside the panel.
    let tca = states.iter().find(|s| s.pathway_id() == "A1_TCA").unwrap();
    assert!(tca.is_computed());

    let core = Engine::builtin().unwrap().run(&results, &NoDiagnostics);
    let collagen = core.iter().find(|s| s.pathway_id() == "E6_COLLAGEN").unwrap();
    assert_eq!(collagen.status(), PathwayStatus::Insufficient);
}

#[test]
fn test_config_overlay_and_custom_panel_file() {
    let dir = tempfile::tempdir().unwrap();
    let overlay = dir.path().join("overlay.json");
    std::fs::write(
        &overlay,
        r#"{"pathways": [{"id": "H1_CUSTOM", "framework": "A", "title": "Custom",
            "requiredAnalytes": ["leucine", "valine"]}]}"#,
    )
    .unwrap();
    let panel = dir.path().join("bcaa.txt");
    std::fs::write(&panel, "# branched chain\nLeucine\nValine\nIsoleucine\n").unwrap();

    let config = EngineConfig {
        panel_file: Some(panel),
        registry_overlay: Some(overlay),
        ..EngineConfig::default()
    };
    let engine = Engine::from_config(&config).unwrap();
    assert_eq!(engine.panel_id(), "bcaa");
    assert_eq!(engine.registry().len(), 59);

    let results = load_results(&demo_path()).unwrap();
    let states = engine.run(&results, &NoDiagnostics);
    let custom = states.iter().find(|s| s.pathway_id() == "H1_CUSTOM").unwrap();
    assert!(custom.is_computed());
}

#[test]
fn test_overlay_keeps_cohort_stats_on_replaced_definition() {
    let dir = tempfile::tempdir().unwrap();
    let overlay = dir.path().join("overlay.json");
    std::fs::write(
        &overlay,
        r#"{"pathways": [{"id": "A6_KETONES", "framework": "A", "title": "Ketones (site)",
            "requiredAnalytes": ["3hydroxybutyric", "acetoacetic"],
            "calculations": {"pathwayScoreMethod": "ratioZ", "ratioDefinitions": [
                {"numeratorAnalyteId": "3hydroxybutyric", "denominatorAnalyteId": "acetoacetic",
                 "ratioTransform": "log", "label": "BHB/AcAc ratio"}]}}]}"#,
    )
    .unwrap();
    let config = EngineConfig {
        registry_overlay: Some(overlay),
        ..EngineConfig::default()
    };
    let engine = Engine::from_config(&config).unwrap();
    let def = engine.registry().get("A6_KETONES").unwrap();
    assert_eq!(def.title, "Ketones (site)");
    assert!(def.calculations.ratio_definitions[0].ratio_cohort_stats.is_some());
}
