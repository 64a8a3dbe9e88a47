use std::io::BufRead;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::input::InputError;
use crate::model::analyte::{AnalyteResult, RefRange};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResult {
    #[serde(alias = "analyte")]
    name: String,
    #[serde(default)]
    value: Option<RawValue>,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default, alias = "z_score", alias = "z")]
    z_score: Option<f64>,
    #[serde(default, alias = "ref_range")]
    ref_range: Option<RefRange>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsDocument {
    List(Vec<RawResult>),
    Wrapped { results: Vec<RawResult> },
}

/// Splits a reported value into its numeric part and, when it is not a
/// plain finite number ("<0.5", "ND"), the text as given.
pub fn parse_value_text(text: &str) -> (Option<f64>, Option<String>) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (None, None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => (Some(v), None),
        _ => (None, Some(trimmed.to_string())),
    }
}

fn into_result(raw: RawResult) -> AnalyteResult {
    let (value, value_text) = match raw.value {
        Some(RawValue::Number(v)) if v.is_finite() => (Some(v), None),
        Some(RawValue::Number(_)) | None => (None, None),
        Some(RawValue::Text(text)) => parse_value_text(&text),
    };
    AnalyteResult {
        name: raw.name,
        value,
        value_text,
        unit: raw.unit.filter(|u| !u.trim().is_empty()),
        z_score: raw.z_score.filter(|z| z.is_finite()),
        ref_range: raw.ref_range,
    }
}

pub fn parse_results_json<R: BufRead>(reader: R, path: &Path) -> Result<Vec<AnalyteResult>, InputError> {
    let document: ResultsDocument =
        serde_json::from_reader(reader).map_err(|source| InputError::Json {
            path: path.to_path_buf(),
            source,
        })?;
    let raw = match document {
        ResultsDocument::List(list) => list,
        ResultsDocument::Wrapped { results } => results,
    };
    Ok(raw.into_iter().map(into_result).collect())
}

#[derive(Debug, Default)]
struct TsvColumns {
    name: usize,
    value: Option<usize>,
    unit: Option<usize>,
    z_score: Option<usize>,
    ref_low: Option<usize>,
    ref_high: Option<usize>,
}

impl TsvColumns {
    fn from_header(header: &[&str], path: &Path) -> Result<Self, InputError> {
        let find = |names: &[&str]| {
            header
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let name = find(&["name", "analyte", "analyte_name"]).ok_or_else(|| InputError::Parse {
            path: path.to_path_buf(),
            message: "header has no name column".to_string(),
        })?;
        Ok(Self {
            name,
            value: find(&["value", "result"]),
            unit: find(&["unit", "units"]),
            z_score: find(&["z_score", "zscore", "z"]),
            ref_low: find(&["ref_low", "low"]),
            ref_high: find(&["ref_high", "high"]),
        })
    }
}

fn parse_number(field: Option<&str>) -> Option<f64> {
    field
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .and_then(|f| f.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

pub fn parse_results_tsv<R: BufRead>(mut reader: R, path: &Path) -> Result<Vec<AnalyteResult>, InputError> {
    let io_err = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut buf = String::new();

    let columns = loop {
        buf.clear();
        if reader.read_line(&mut buf).map_err(io_err)? == 0 {
            return Ok(Vec::new());
        }
        let line = buf.trim_end();
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let header: Vec<&str> = line.split('\t').map(str::trim).collect();
        break TsvColumns::from_header(&header, path)?;
    };

    let mut results = Vec::new();
    let mut line_no = 1usize;
    loop {
        buf.clear();
        if reader.read_line(&mut buf).map_err(io_err)? == 0 {
            break;
        }
        line_no += 1;
        let line = buf.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let name = fields.get(columns.name).map(|s| s.trim()).unwrap_or("");
        if name.is_empty() {
            warn!(path = %path.display(), line = line_no, "result row has no analyte name; skipping");
            continue;
        }
        let field = |idx: Option<usize>| idx.and_then(|i| fields.get(i).copied());
        let (value, value_text) = field(columns.value)
            .map(parse_value_text)
            .unwrap_or((None, None));
        let low = parse_number(field(columns.ref_low));
        let high = parse_number(field(columns.ref_high));
        results.push(AnalyteResult {
            name: name.to_string(),
            value,
            value_text,
            unit: field(columns.unit)
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(str::to_string),
            z_score: parse_number(field(columns.z_score)),
            ref_range: (low.is_some() || high.is_some()).then_some(RefRange { low, high }),
        });
    }
    Ok(results)
}
