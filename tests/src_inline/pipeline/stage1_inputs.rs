use super::*;

fn catalog() -> AnalyteCatalog {
    AnalyteCatalog::builtin_v1().unwrap()
}

#[test]
fn test_lookup_first_result_wins() {
    let catalog = catalog();
    let results = vec![
        AnalyteResult::new("Citric acid").with_z(1.5),
        AnalyteResult::new("citrate").with_z(-3.0),
        AnalyteResult::new("CITRIC").with_z(0.0),
    ];
    let lookup = ResultLookup::build(&results, &catalog);
    assert_eq!(lookup.len(), 1);
    assert_eq!(lookup.duplicates(), 2);
    assert_eq!(lookup.resolved_z("citric"), Some(1.5));
}

#[test]
fn test_lookup_skips_empty_names() {
    let catalog = catalog();
    let results = vec![AnalyteResult::new("  -- ").with_value(1.0)];
    let lookup = ResultLookup::build(&results, &catalog);
    assert!(lookup.is_empty());
}

#[test]
fn test_collect_inputs_resolves_z_from_range() {
    let catalog = catalog();
    let results = vec![
        AnalyteResult::new("Succinic acid")
            .with_value(14.0)
            .with_ref_range(2.0, 10.0),
        AnalyteResult::new("Malic acid").with_z(0.4),
    ];
    let lookup = ResultLookup::build(&results, &catalog);
    let ids = vec!["succinic".to_string(), "malic".to_string(), "fumaric".to_string()];
    let inputs = collect_inputs(&ids, &lookup);

    assert_eq!(inputs.len(), 3);
    // mid 6, sd 2
    assert!((inputs[0].z.unwrap() - 4.0).abs() < 1e-12);
    assert_eq!(inputs[1].z, Some(0.4));
    assert!(inputs[2].result.is_none());
    assert!(!inputs[2].is_present());
}

#[test]
fn test_debug_input_flags_known_and_panel() {
    let catalog = catalog();
    let results = vec![AnalyteResult::new("Citric acid").with_value(3.0).with_unit("mmol/mol")];
    let lookup = ResultLookup::build(&results, &catalog);
    let panel = |id: &str| id == "citric";

    let citric = debug_input("citric", &lookup, &panel);
    assert!(citric.known);
    assert!(citric.in_panel);
    assert!(citric.is_present());
    assert_eq!(citric.display_name, "Citric acid");
    assert_eq!(citric.unit.as_deref(), Some("mmol/mol"));

    let acetate = debug_input("acetate", &lookup, &panel);
    assert!(!acetate.known);
    assert!(!acetate.in_panel);
    assert!(!acetate.is_present());
    assert_eq!(acetate.display_name, "acetate");
}

#[test]
fn test_matches_mark_derived_z() {
    let catalog = catalog();
    let results = vec![
        AnalyteResult::new("citric").with_value(8.0).with_ref_range(2.0, 10.0),
        AnalyteResult::new("malic").with_z(-1.0),
        AnalyteResult::new("fumaric"),
    ];
    let lookup = ResultLookup::build(&results, &catalog);
    let ids = vec!["citric".to_string(), "malic".to_string(), "fumaric".to_string(), "succinic".to_string()];
    let inputs = collect_inputs(&ids, &lookup);
    let refs: Vec<&AnalyteInput<'_>> = inputs.iter().collect();
    let matches = build_matches(&refs, &catalog);

    assert_eq!(matches.len(), 3);
    assert!(matches[0].z_derived);
    assert!(!matches[1].z_derived);
    assert_eq!(matches[2].z_score, None);
    assert_eq!(matches[1].display_name, "Malic acid");
}
