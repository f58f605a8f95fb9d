//! YAML Export functionality
//!
//! Writes a budget report as YAML for reading by hand.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::BudgetReport;

/// Write a report as YAML with a short comment header
pub fn export_report_yaml<W: Write>(report: &BudgetReport, writer: &mut W) -> BudgetResult<()> {
    writeln!(writer, "# budgetcast {:?} report", report.kind)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", report.generated_at)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer, "# App Version: {}", report.app_version)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, report).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

/// Read a report back from YAML
pub fn import_report_yaml(yaml_str: &str) -> BudgetResult<BudgetReport> {
    let report: BudgetReport =
        serde_yaml::from_str(yaml_str).map_err(|e| BudgetError::Import(e.to_string()))?;
    report.validate().map_err(BudgetError::Import)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetMap, MonthKey, Warnings};
    use crate::services::Reconciliation;

    #[test]
    fn test_yaml_export() {
        let reconciliation = Reconciliation {
            month: MonthKey::new(2025, 4).unwrap(),
            budget: [("Food", 123.45), ("Rent", 0.0)].into_iter().collect::<BudgetMap>(),
            collapsed: vec![],
            month_total: 123.45,
            day_cutoff: None,
        };
        let report = BudgetReport::from_reconciliation(&reconciliation, &Warnings::new());

        let mut out = Vec::new();
        export_report_yaml(&report, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("# budgetcast Reconciliation report"));
        assert!(text.contains("kind: reconciliation"));
        assert!(text.contains("Food: 123.45"));
        assert!(text.contains("warning_level: 0"));

        let back = import_report_yaml(&text).unwrap();
        assert_eq!(back.month, Some(reconciliation.month));
        assert_eq!(back.budget, Some(reconciliation.budget));
    }
}
