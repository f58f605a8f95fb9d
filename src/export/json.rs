//! JSON Export functionality
//!
//! Writes a forecast or reconciliation, with its warnings, as a versioned
//! JSON document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetMap, MonthKey, WarningLevel, Warnings};
use crate::services::{BudgetPlan, Reconciliation};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// What produced the budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Forecast,
    Reconciliation,
}

/// Exported budget document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub generated_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub kind: ReportKind,

    /// Reconciled month, when the report is a reconciliation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<MonthKey>,

    /// The budget; null when a fatal warning stopped the run
    pub budget: Option<BudgetMap>,

    /// 0 = none, 1 = non-fatal, 2 = fatal
    pub warning_level: WarningLevel,

    pub warnings: Vec<String>,
}

impl BudgetReport {
    fn new(
        kind: ReportKind,
        month: Option<MonthKey>,
        budget: Option<BudgetMap>,
        warnings: &Warnings,
    ) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            generated_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            kind,
            month,
            budget,
            warning_level: warnings.level(),
            warnings: warnings.messages().to_vec(),
        }
    }

    /// Report for a forecast, savings-adjusted if a goal was applied
    pub fn from_plan(plan: &BudgetPlan, warnings: &Warnings) -> Self {
        Self::new(
            ReportKind::Forecast,
            None,
            Some(plan.budget().clone()),
            warnings,
        )
    }

    pub fn from_reconciliation(reconciliation: &Reconciliation, warnings: &Warnings) -> Self {
        Self::new(
            ReportKind::Reconciliation,
            Some(reconciliation.month),
            Some(reconciliation.budget.clone()),
            warnings,
        )
    }

    /// Report for a run stopped by a fatal warning
    pub fn fatal(kind: ReportKind, warnings: &Warnings) -> Self {
        Self::new(kind, None, None, warnings)
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }
        match (&self.budget, self.warning_level) {
            (None, level) if level != WarningLevel::Fatal => {
                Err("Report without a budget must carry a fatal warning".to_string())
            }
            (Some(_), WarningLevel::Fatal) => {
                Err("Report with a fatal warning cannot carry a budget".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Write a report as JSON
pub fn export_report_json<W: Write>(
    report: &BudgetReport,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, report)
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    } else {
        serde_json::to_writer(&mut *writer, report)
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Read a report back from JSON
pub fn import_report_json(json_str: &str) -> BudgetResult<BudgetReport> {
    let report: BudgetReport =
        serde_json::from_str(json_str).map_err(|e| BudgetError::Import(e.to_string()))?;
    report.validate().map_err(BudgetError::Import)?;
    Ok(report)
}
