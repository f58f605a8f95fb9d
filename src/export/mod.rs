//! Export module for budgetcast
//!
//! Writes forecast and reconciliation reports in machine-readable formats:
//! - JSON: versioned document with budget and warnings
//! - YAML: the same document, commented for reading by hand
//! - CSV: budget rows only

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{escape_csv, export_report_csv};
pub use json::{
    export_report_json, import_report_json, BudgetReport, ReportKind, EXPORT_SCHEMA_VERSION,
};
pub use yaml::{export_report_yaml, import_report_yaml};
