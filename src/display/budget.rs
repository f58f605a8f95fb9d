//! Budget display formatting
//!
//! Renders forecast and reconciliation budgets as tables, plus the warnings
//! that came with them.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::format::{format_bar, format_header, format_percentage, separator, truncate};
use crate::models::{BudgetMap, Money, Warnings};
use crate::services::{BudgetPlan, Reconciliation};

const BAR_WIDTH: usize = 20;
const NAME_WIDTH: usize = 32;
const VIEW_WIDTH: usize = 64;

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
    #[tabled(rename = "")]
    bar: String,
}

/// Format a budget as a table, largest category first, with a total row
pub fn format_budget_table(budget: &BudgetMap, currency_symbol: &str) -> String {
    if budget.is_empty() {
        return "No budget categories.".to_string();
    }

    let total = budget.total();
    let entries = budget.sorted_by_amount();
    let largest = entries.first().map(|(_, v)| *v).unwrap_or(0.0);

    let mut rows: Vec<BudgetRow> = entries
        .iter()
        .map(|(name, amount)| BudgetRow {
            category: truncate(name, NAME_WIDTH),
            amount: Money::from_dollars(*amount).format_with_symbol(currency_symbol),
            share: if total > 0.0 {
                format_percentage(amount / total * 100.0)
            } else {
                String::new()
            },
            bar: format_bar(*amount, largest, BAR_WIDTH),
        })
        .collect();

    rows.push(BudgetRow {
        category: "TOTAL".to_string(),
        amount: Money::from_dollars(total).format_with_symbol(currency_symbol),
        share: String::new(),
        bar: String::new(),
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Format warnings under their severity; empty when there are none
pub fn format_warnings(warnings: &Warnings) -> String {
    if warnings.is_empty() {
        return String::new();
    }

    let mut output = format!("Warnings ({}):\n", warnings.level());
    for message in warnings.messages() {
        output.push_str(&format!("  - {}\n", message));
    }
    output
}

/// Format a forecast, with its savings adjustment when one was applied
pub fn format_plan(plan: &BudgetPlan, currency_symbol: &str) -> String {
    let forecast = &plan.forecast;
    let mut output = String::new();

    output.push_str(&format_header("Budget Forecast", VIEW_WIDTH));
    output.push('\n');
    output.push_str(&separator(VIEW_WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Based on the last {} months, by {} category\n\n",
        forecast.window_months, forecast.category_level
    ));

    output.push_str(&format_budget_table(plan.budget(), currency_symbol));
    output.push('\n');

    if !forecast.collapsed.is_empty() {
        output.push_str(&format!(
            "\n{} includes: {}\n",
            forecast.residual_name,
            forecast.collapsed.join(", ")
        ));
    }
    if !forecast.pruned.is_empty() {
        output.push_str(&format!(
            "Too infrequent to forecast: {}\n",
            forecast.pruned.join(", ")
        ));
    }

    if let Some(savings) = &plan.savings {
        output.push_str(&format!(
            "\nSavings goal: {}\n",
            Money::from_dollars(savings.goal).format_with_symbol(currency_symbol)
        ));
        for name in &savings.discretionary {
            let deduction = savings.deductions.get(name).unwrap_or(0.0);
            output.push_str(&format!(
                "  {:<width$} -{}\n",
                truncate(name, NAME_WIDTH),
                Money::from_dollars(deduction).format_with_symbol(currency_symbol),
                width = NAME_WIDTH
            ));
        }
    }

    output
}

/// Format one month's reconciled spending
pub fn format_reconciliation(reconciliation: &Reconciliation, currency_symbol: &str) -> String {
    let mut output = String::new();

    let through = reconciliation
        .day_cutoff
        .map(|day| format!(" through day {}", day))
        .unwrap_or_default();
    output.push_str(&format!(
        "Spending for {}{}\n",
        reconciliation.month, through
    ));
    output.push_str(&separator(VIEW_WIDTH));
    output.push('\n');
    output.push_str(&format_budget_table(&reconciliation.budget, currency_symbol));
    output.push('\n');

    if !reconciliation.collapsed.is_empty() {
        output.push_str(&format!(
            "\nFolded into the residual: {}\n",
            reconciliation.collapsed.join(", ")
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryLevel, MonthKey};
    use crate::services::{BudgetForecast, SavingsPlan};

    fn budget() -> BudgetMap {
        [("Rent", 1500.0), ("Food", 500.0), ("Misc.", 40.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_budget_table_has_rows_and_total() {
        let table = format_budget_table(&budget(), "$");
        assert!(table.contains("Rent"));
        assert!(table.contains("$1500.00"));
        assert!(table.contains("TOTAL"));
        assert!(table.contains("$2040.00"));

        // Largest first
        assert!(table.find("Rent").unwrap() < table.find("Food").unwrap());
    }

    #[test]
    fn test_empty_budget() {
        assert_eq!(format_budget_table(&BudgetMap::new(), "$"), "No budget categories.");
    }

    #[test]
    fn test_warnings() {
        assert_eq!(format_warnings(&Warnings::new()), "");

        let mut warnings = Warnings::new();
        warnings.non_fatal("thin history");
        let text = format_warnings(&warnings);
        assert!(text.starts_with("Warnings (non-fatal):"));
        assert!(text.contains("  - thin history"));
    }

    #[test]
    fn test_plan_lists_deductions() {
        let forecast = BudgetForecast {
            budget: budget(),
            collapsed: vec!["Gifts".to_string()],
            pruned: vec![],
            forecast_total: 2040.0,
            window_months: 12,
            category_level: CategoryLevel::Top,
            residual_name: "Misc.".to_string(),
        };
        let mut adjusted = budget();
        adjusted.insert("Food", 470.0);
        let plan = BudgetPlan {
            forecast,
            savings: Some(SavingsPlan {
                budget: adjusted,
                deductions: [("Food", 30.0)].into_iter().collect(),
                discretionary: vec!["Food".to_string()],
                goal: 30.0,
            }),
        };

        let text = format_plan(&plan, "$");
        assert!(text.contains("$470.00"));
        assert!(text.contains("Misc. includes: Gifts"));
        assert!(text.contains("Savings goal: $30.00"));
        assert!(text.contains("-$30.00"));
    }

    #[test]
    fn test_reconciliation_header() {
        let reconciliation = Reconciliation {
            month: MonthKey::new(2025, 4).unwrap(),
            budget: budget(),
            collapsed: vec![],
            month_total: 2040.0,
            day_cutoff: Some(15),
        };
        let text = format_reconciliation(&reconciliation, "$");
        assert!(text.starts_with("Spending for 2025-04 through day 15"));
    }
}
