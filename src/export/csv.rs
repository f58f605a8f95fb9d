//! CSV Export functionality
//!
//! Writes a report's budget as spreadsheet rows. Warnings are not part of
//! the CSV layout.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::BudgetReport;

/// Write one `Category,Amount` row per budget entry, largest first
pub fn export_report_csv<W: Write>(report: &BudgetReport, writer: &mut W) -> BudgetResult<()> {
    writeln!(writer, "Category,Amount").map_err(|e| BudgetError::Export(e.to_string()))?;

    if let Some(budget) = &report.budget {
        for (category, amount) in budget.sorted_by_amount() {
            writeln!(writer, "{},{:.2}", escape_csv(category), amount)
                .map_err(|e| BudgetError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

/// Quote a field for CSV output when it holds a comma, quote or newline
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::json::ReportKind;
    use crate::models::{BudgetMap, CategoryLevel, Warnings};
    use crate::services::{BudgetForecast, BudgetPlan};

    #[test]
    fn test_csv_rows() {
        let budget: BudgetMap = [("Food, Dining", 420.0), ("Rent", 1500.0)]
            .into_iter()
            .collect();
        let plan = BudgetPlan {
            forecast: BudgetForecast {
                forecast_total: budget.total(),
                budget,
                collapsed: vec![],
                pruned: vec![],
                window_months: 12,
                category_level: CategoryLevel::Top,
                residual_name: "Misc.".to_string(),
            },
            savings: None,
        };
        let report = BudgetReport::from_plan(&plan, &Warnings::new());

        let mut out = Vec::new();
        export_report_csv(&report, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Category,Amount\nRent,1500.00\n\"Food, Dining\",420.00\n"
        );
    }

    #[test]
    fn test_fatal_report_writes_header_only() {
        let mut warnings = Warnings::new();
        warnings.fatal("no data");
        let report = BudgetReport::fatal(ReportKind::Forecast, &warnings);

        let mut out = Vec::new();
        export_report_csv(&report, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Category,Amount\n");
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with \"quotes\""), "\"with \"\"quotes\"\"\"");
    }
}
