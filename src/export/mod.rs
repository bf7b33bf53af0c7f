pub mod json;

pub use json::{ExportError, ResultsReport, export_results_to_path, import_results};
