use super::*;
use crate::diagnostics::{NoDiagnostics, ValidationMode, ValidatingDiagnostics};
use crate::model::pathway::{
    Baseline, MetaboliteLineDefinition, RatioDefinition, RatioTransform,
};
use crate::model::state::{MissingReason, PathwayStatus};
use crate::model::thresholds::{Category, Severity};

struct Fixture {
    catalog: AnalyteCatalog,
    strategies: StrategyRegistry,
}

impl Fixture {
    fn new() -> Self {
        Self {
            catalog: AnalyteCatalog::builtin_v1().unwrap(),
            strategies: StrategyRegistry::builtin(),
        }
    }

    fn run(&self, def: &PathwayDefinition, results: &[AnalyteResult], panel: &dyn PanelCatalog) -> PathwayState {
        let ctx = EngineContext {
            catalog: &self.catalog,
            panel,
            strategies: &self.strategies,
            diagnostics: &NoDiagnostics,
        };
        compute_pathway_state(def, results, &ctx)
    }
}

fn everything(_: &str) -> bool {
    true
}

fn z(name: &str, z: f64) -> AnalyteResult {
    AnalyteResult::new(name).with_z(z)
}

fn tca() -> PathwayDefinition {
    PathwayDefinition::new(
        "A1_TCA",
        "A",
        "TCA cycle",
        &["citric", "isocitric", "2oxoglutaric", "succinic", "fumaric", "malic"],
    )
}

fn tca_results() -> Vec<AnalyteResult> {
    vec![
        z("citric", 0.2),
        z("isocitric", -0.3),
        z("2oxoglutaric", 1.1),
        z("succinic", 0.4),
        z("fumaric", -0.1),
        z("malic", 0.6),
    ]
}

#[test]
fn test_tca_computed_mild_stable() {
    let fx = Fixture::new();
    let state = fx.run(&tca(), &tca_results(), &everything);
    let computed = state.as_computed().unwrap();
    assert!((computed.sigma - 0.3167).abs() < 1e-3);
    assert!((computed.score - 1.1).abs() < 1e-12);
    assert_eq!(computed.severity, Severity::Mild);
    assert_eq!(computed.category, Category::Stable);
    assert_eq!(computed.matched.len(), 6);
    assert!(!computed.partial);
    assert_eq!(computed.completeness.fraction, 1.0);
}

#[test]
fn test_drivers_top_three_by_abs_z() {
    let fx = Fixture::new();
    let state = fx.run(&tca(), &tca_results(), &everything);
    let drivers = &state.as_computed().unwrap().drivers;
    let ids: Vec<&str> = drivers.iter().map(|d| d.analyte_id.as_str()).collect();
    assert_eq!(ids, vec!["2oxoglutaric", "malic", "succinic"]);
    assert_eq!(drivers[0].display_label, "2-Oxoglutaric acid");
}

#[test]
fn test_driver_ties_break_on_id() {
    let fx = Fixture::new();
    let def = PathwayDefinition::new("P", "A", "P", &["succinic", "citric", "malic", "fumaric"]);
    let results = vec![z("succinic", 1.0), z("citric", -1.0), z("malic", 1.0), z("fumaric", 0.5)];
    let state = fx.run(&def, &results, &everything);
    let ids: Vec<String> = state
        .as_computed()
        .unwrap()
        .drivers
        .iter()
        .map(|d| d.analyte_id.clone())
        .collect();
    assert_eq!(ids, vec!["citric", "malic", "succinic"]);
}

#[test]
fn test_unknown_required_is_insufficient_data() {
    let fx = Fixture::new();
    let def = PathwayDefinition::new("F1", "F", "SCFA", &["acetate", "propionate", "citric"]);
    let state = fx.run(&def, &[z("acetate", 1.0), z("citric", 1.0)], &everything);
    assert_eq!(state.status(), PathwayStatus::InsufficientData);
    let payload = state.as_insufficient().unwrap();
    assert_eq!(payload.missing_analytes, vec!["acetate", "propionate"]);
    assert_eq!(payload.reason, InsufficientReason::MissingInputs);
    assert_eq!(payload.missing_reasons["acetate"], MissingReason::MissingInPanel);
}

#[test]
fn test_not_implemented_regardless_of_data() {
    let fx = Fixture::new();
    let mut def = tca();
    def.calculations.implemented = false;
    let state = fx.run(&def, &tca_results(), &everything);
    assert_eq!(state.status(), PathwayStatus::Insufficient);
    let payload = state.as_insufficient().unwrap();
    assert_eq!(payload.reason, InsufficientReason::NotImplemented);
    assert_eq!(payload.missing_analytes.len(), 6);
}

#[test]
fn test_panel_reason_takes_precedence() {
    let fx = Fixture::new();
    let panel = |id: &str| id != "citric";
    let results: Vec<AnalyteResult> = tca_results().into_iter().skip(2).collect();
    let state = fx.run(&tca(), &results, &panel);
    assert_eq!(state.status(), PathwayStatus::InsufficientData);
    let payload = state.as_insufficient().unwrap();
    assert_eq!(payload.missing_reasons["citric"], MissingReason::MissingInPanel);
    assert_eq!(payload.missing_reasons["isocitric"], MissingReason::MissingInSample);
}

#[test]
fn test_missing_in_sample_is_insufficient() {
    let fx = Fixture::new();
    let results: Vec<AnalyteResult> = tca_results().into_iter().skip(1).collect();
    let state = fx.run(&tca(), &results, &everything);
    assert_eq!(state.status(), PathwayStatus::Insufficient);
    assert_eq!(state.as_insufficient().unwrap().missing_analytes, vec!["Citric acid"]);
}

#[test]
fn test_nitric_oxide_partial_and_strict_rule() {
    let fx = Fixture::new();
    let def = PathwayDefinition::new("C6_NO", "C", "NO", &["arginine", "citrulline", "ornithine"])
        .with_strategy("nitricOxide");

    let two = vec![z("arginine", -1.0), z("citrulline", 1.0)];
    let state = fx.run(&def, &two, &everything);
    let computed = state.as_computed().unwrap();
    assert!(computed.partial);
    // core 0, delta 2
    assert!((computed.sigma - 0.8).abs() < 1e-12);

    let panel = |id: &str| id == "arginine";
    let one = vec![z("arginine", -1.0)];
    let state = fx.run(&def, &one, &panel);
    assert_eq!(state.status(), PathwayStatus::InsufficientData);

    let state = fx.run(&def, &one, &everything);
    assert_eq!(state.status(), PathwayStatus::Insufficient);
}

#[test]
fn test_ketone_ratio_scenario() {
    let fx = Fixture::new();
    let def = PathwayDefinition::new("A6_KETONES", "A", "Ketones", &["3hydroxybutyric", "acetoacetic"])
        .with_method(ScoreMethod::RatioZ)
        .with_ratio(
            RatioDefinition::new("3hydroxybutyric", "acetoacetic", RatioTransform::Log, "BHB/AcAc ratio")
                .with_cohort_stats(-1.1, 0.45),
        );
    let (x, y) = (180.0, 60.0);
    let results = vec![
        AnalyteResult::new("3-Hydroxybutyric acid").with_value(x),
        AnalyteResult::new("Acetoacetic acid").with_value(y),
    ];
    let state = fx.run(&def, &results, &everything);
    let computed = state.as_computed().unwrap();
    let ratio = computed.ratio.as_ref().unwrap();
    assert!((ratio.raw_value - x / y).abs() < 1e-12);
    assert!((ratio.value - (x / y).ln()).abs() < 1e-12);
    assert!((computed.sigma - ((x / y).ln() + 1.1) / 0.45).abs() < 1e-12);
    assert_eq!(computed.debug.ratios.len(), 1);
}

#[test]
fn test_ratio_z_without_computable_ratio() {
    let fx = Fixture::new();
    let def = PathwayDefinition::new("A6_KETONES", "A", "Ketones", &["3hydroxybutyric", "acetoacetic"])
        .with_method(ScoreMethod::RatioZ)
        .with_ratio(RatioDefinition::new("3hydroxybutyric", "acetoacetic", RatioTransform::Log, "r"));
    let results = vec![z("3hydroxybutyric", 1.0), z("acetoacetic", 1.0)];
    let state = fx.run(&def, &results, &everything);
    assert_eq!(state.status(), PathwayStatus::Insufficient);
    let payload = state.as_insufficient().unwrap();
    assert_eq!(payload.missing_analytes.len(), 2);
    assert_eq!(payload.missing_reasons["acetoacetic"], MissingReason::Unknown);
}

#[test]
fn test_unknown_strategy_fails_closed() {
    let fx = Fixture::new();
    let def = tca().with_strategy("notYetWritten");
    let state = fx.run(&def, &tca_results(), &everything);
    assert_eq!(state.status(), PathwayStatus::Insufficient);
    assert_eq!(
        state.as_insufficient().unwrap().reason,
        InsufficientReason::NotImplemented
    );

    let rule = tca().with_method(ScoreMethod::RuleBased);
    let state = fx.run(&rule, &tca_results(), &everything);
    assert_eq!(state.as_insufficient().unwrap().reason, InsufficientReason::NotImplemented);
}

#[test]
fn test_metabolite_lines_fold_change_and_missing() {
    let fx = Fixture::new();
    let mut def = PathwayDefinition::new("P", "A", "P", &["citric"]).with_optional(&["malic"]);
    def.calculations.metabolite_lines = vec![
        MetaboliteLineDefinition {
            analyte_id: "citric".to_string(),
            display_label: Some("Citrate".to_string()),
            display_metric: DisplayMetric::FoldChange,
            baseline: Some(Baseline::ReferenceUpper),
        },
        MetaboliteLineDefinition::z_score_line("malic"),
        MetaboliteLineDefinition::z_score_line("neopterin"),
    ];
    let results = vec![AnalyteResult::new("citric").with_value(30.0).with_ref_range(5.0, 15.0)];
    let state = fx.run(&def, &results, &everything);
    let computed = state.as_computed().unwrap();

    assert_eq!(computed.metabolite_lines.len(), 2);
    let citric = &computed.metabolite_lines[0];
    assert_eq!(citric.baseline_value, Some(15.0));
    assert_eq!(citric.fold_change, Some(2.0));
    assert!(!citric.missing);
    assert!(computed.metabolite_lines[1].missing);
    assert_eq!(computed.drivers[0].display_label, "Citrate");
}

#[test]
fn test_batch_preserves_order_and_matches_serial() {
    let fx = Fixture::new();
    let defs = vec![
        tca(),
        PathwayDefinition::new("F1", "F", "SCFA", &["acetate"]),
        PathwayDefinition::new("P", "A", "P", &["citric", "malic"]),
    ];
    let results = tca_results();
    let ctx = EngineContext {
        catalog: &fx.catalog,
        panel: &everything,
        strategies: &fx.strategies,
        diagnostics: &NoDiagnostics,
    };
    let parallel = compute_pathway_states(&defs, &results, &ctx);
    let serial: Vec<PathwayState> = defs
        .iter()
        .map(|def| compute_pathway_state(def, &results, &ctx))
        .collect();
    assert_eq!(parallel, serial);
    let ids: Vec<&str> = parallel.iter().map(|s| s.pathway_id()).collect();
    assert_eq!(ids, vec!["A1_TCA", "F1", "P"]);
}

#[test]
fn test_engine_states_pass_validation() {
    let fx = Fixture::new();
    let hook = ValidatingDiagnostics::new(ValidationMode::Strict);
    let ctx = EngineContext {
        catalog: &fx.catalog,
        panel: &everything,
        strategies: &fx.strategies,
        diagnostics: &hook,
    };
    let defs = vec![tca(), PathwayDefinition::new("F1", "F", "SCFA", &["acetate"])];
    let states = compute_pathway_states(&defs, &tca_results(), &ctx);
    assert_eq!(states.len(), 2);
    assert!(hook.take_failures().is_empty());
}
