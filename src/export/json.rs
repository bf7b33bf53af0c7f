//! JSON export of session results.
//! Saves a `ResultsReport` to a file and reads it back.

use crate::models::SessionResult;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Could not access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Invalid results file: {0}")]
    Json(#[from] serde_json::Error),
}

/// A finished session as written to disk.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResultsReport {
    pub deck_name: String,
    pub deck_path: Option<String>,
    /// Local time, RFC 3339.
    pub finished_at: String,
    pub result: SessionResult,
}

impl ResultsReport {
    pub fn new(deck_name: &str, deck_path: Option<&Path>, result: SessionResult) -> Self {
        Self::finished_at(deck_name, deck_path, result, Local::now())
    }

    pub fn finished_at(
        deck_name: &str,
        deck_path: Option<&Path>,
        result: SessionResult,
        finished_at: DateTime<Local>,
    ) -> Self {
        Self {
            deck_name: deck_name.to_string(),
            deck_path: deck_path.map(|p| p.display().to_string()),
            finished_at: finished_at.to_rfc3339(),
            result,
        }
    }
}

/// Exports a report to a JSON file at the specified path.
pub fn export_results_to_path(report: &ResultsReport, path: &Path) -> Result<(), ExportError> {
    let json_string = serde_json::to_string_pretty(report)?;
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(json_string.as_bytes()).map_err(io_err)?;
    log::info!("Results for '{}' saved to {}", report.deck_name, path.display());
    Ok(())
}

/// Reads a report previously written by `export_results_to_path`.
pub fn import_results(path: &Path) -> Result<ResultsReport, ExportError> {
    let io_err = |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(io_err)?;

    let report: ResultsReport = serde_json::from_str(&contents)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn create_test_report() -> ResultsReport {
        ResultsReport::new(
            "polish",
            Some(Path::new("polish.csv")),
            SessionResult::new(3, 2, 1, Some(42.5)),
        )
    }

    #[test]
    fn test_export_results_to_path() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("results.json");

        let result = export_results_to_path(&create_test_report(), &test_file);
        assert!(result.is_ok());

        let written = fs::read_to_string(&test_file).unwrap();
        assert!(written.contains("\"deck_name\": \"polish\""));
        assert!(written.contains("\"cards_shown\": 3"));
    }

    #[test]
    fn test_export_and_import_keeps_report() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("results.json");
        let report = create_test_report();

        export_results_to_path(&report, &test_file).unwrap();
        let imported = import_results(&test_file).unwrap();

        assert_eq!(imported, report);
    }

    #[test]
    fn test_undefined_percentages_are_null() {
        let report = ResultsReport::new("empty", None, SessionResult::new(0, 0, 0, None));
        let json = serde_json::to_string(&report).unwrap();

        assert!(json.contains("\"known_pct\":null"));
        assert!(json.contains("\"deck_path\":null"));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = import_results(&dir.path().join("nonexistent_file_xyz123.json"));

        assert!(matches!(result, Err(ExportError::Io { .. })));
    }

    #[test]
    fn test_import_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let test_file = dir.path().join("invalid.json");
        fs::write(&test_file, "{ this is not valid json }").unwrap();

        let result = import_results(&test_file);
        assert!(matches!(result, Err(ExportError::Json(_))));
    }
}
