use std::io::Write;

use super::*;
use crate::model::analyte::RefRange;

#[test]
fn test_format_from_path() {
    assert_eq!(ResultFormat::from_path(Path::new("a/results.json")), ResultFormat::Json);
    assert_eq!(ResultFormat::from_path(Path::new("results.JSON.gz")), ResultFormat::Json);
    assert_eq!(ResultFormat::from_path(Path::new("results.tsv.gz")), ResultFormat::Tsv);
    assert_eq!(ResultFormat::from_path(Path::new("results.txt")), ResultFormat::Tsv);
}

#[test]
fn test_parse_value_text() {
    assert_eq!(results::parse_value_text(" 4.2 "), (Some(4.2), None));
    assert_eq!(results::parse_value_text("<0.5"), (None, Some("<0.5".to_string())));
    assert_eq!(results::parse_value_text("ND"), (None, Some("ND".to_string())));
    assert_eq!(results::parse_value_text("NaN"), (None, Some("NaN".to_string())));
    assert_eq!(results::parse_value_text(""), (None, None));
}

#[test]
fn test_load_json_array_and_wrapped() {
    let dir = tempfile::tempdir().unwrap();
    let array = dir.path().join("a.json");
    std::fs::write(
        &array,
        r#"[
            { "name": "Citric acid", "value": 12.5, "unit": "mmol/mol", "refRange": { "low": 5, "high": 20 } },
            { "name": "Malic acid", "value": "<0.5" },
            { "name": "Succinic acid", "zScore": 1.2 }
        ]"#,
    )
    .unwrap();
    let results = load_results(&array).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0].value, Some(12.5));
    assert_eq!(results[0].ref_range, Some(RefRange::new(5.0, 20.0)));
    assert_eq!(results[1].value, None);
    assert_eq!(results[1].value_text.as_deref(), Some("<0.5"));
    assert_eq!(results[2].z_score, Some(1.2));

    let wrapped = dir.path().join("b.json");
    std::fs::write(&wrapped, r#"{ "results": [ { "analyte": "Glycine", "value": "310", "z_score": -0.4 } ] }"#)
        .unwrap();
    let results = load_results(&wrapped).unwrap();
    assert_eq!(results[0].name, "Glycine");
    assert_eq!(results[0].value, Some(310.0));
    assert_eq!(results[0].z_score, Some(-0.4));
}

#[test]
fn test_load_gzipped_tsv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.tsv.gz");
    let file = std::fs::File::create(&path).unwrap();
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    write!(
        encoder,
        "# exported\nName\tValue\tUnit\tz_score\tref_low\tref_high\n\
         Citric acid\t12.5\tmmol/mol\t\t5\t20\n\
         \t1.0\t\t\t\t\n\
         Malic acid\tND\t\t0.3\t\t\n"
    )
    .unwrap();
    encoder.finish().unwrap();

    let results = load_results(&path).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].unit.as_deref(), Some("mmol/mol"));
    assert_eq!(results[0].ref_range, Some(RefRange::new(5.0, 20.0)));
    assert_eq!(results[1].value_text.as_deref(), Some("ND"));
    assert_eq!(results[1].z_score, Some(0.3));
    assert_eq!(results[1].ref_range, None);
}

#[test]
fn test_tsv_without_name_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.tsv");
    std::fs::write(&path, "value\tunit\n1\tmg\n").unwrap();
    assert!(matches!(load_results(&path), Err(InputError::Parse { .. })));
}

#[test]
fn test_empty_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.json");
    std::fs::write(&empty, "[]").unwrap();
    assert!(matches!(load_results(&empty), Err(InputError::Empty(_))));
    assert!(matches!(
        load_results(&dir.path().join("missing.tsv")),
        Err(InputError::Io { .. })
    ));
}
