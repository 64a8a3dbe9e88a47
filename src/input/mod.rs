use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::info;

use crate::model::analyte::AnalyteResult;

pub mod results;

use results::{parse_results_json, parse_results_tsv};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("{0} contains no analyte results")]
    Empty(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultFormat {
    Json,
    Tsv,
}

impl ResultFormat {
    /// `.json` (optionally `.json.gz`) is JSON; anything else is read as TSV.
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);
        if name.ends_with(".json") {
            ResultFormat::Json
        } else {
            ResultFormat::Tsv
        }
    }
}

pub(crate) fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().and_then(|s| s.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads lab results from a JSON or TSV file, gzip-compressed or not.
pub fn load_results(path: &Path) -> Result<Vec<AnalyteResult>, InputError> {
    let reader = open_maybe_gz(path)?;
    let format = ResultFormat::from_path(path);
    let results = match format {
        ResultFormat::Json => parse_results_json(reader, path)?,
        ResultFormat::Tsv => parse_results_tsv(reader, path)?,
    };
    if results.is_empty() {
        return Err(InputError::Empty(path.to_path_buf()));
    }
    let numeric = results.iter().filter(|r| r.has_measurement()).count();
    info!(
        path = %path.display(),
        format = ?format,
        results = results.len(),
        with_measurement = numeric,
        "loaded analyte results"
    );
    Ok(results)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
