// Presentation helpers shared by the terminal UI and the one-shot commands.
// Amounts are rounded to two decimals here and nowhere else.

use crate::aggregate::Summary;
use crate::expense::{Expense, ValidationError};
use crate::store::{CategoryFilter, ALL_CATEGORIES};

/// Generic notice shown for any rejected add
pub const INVALID_FORM_MESSAGE: &str = "Please fill all fields correctly.";

pub fn format_amount(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_money(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", amount.abs())
    } else {
        format!("${:.2}", amount)
    }
}

/// The three summary display fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFields {
    pub total: String,
    pub count: String,
    pub average: String,
}

impl From<&Summary> for SummaryFields {
    fn from(summary: &Summary) -> Self {
        Self {
            total: format_money(summary.total),
            count: summary.count.to_string(),
            average: format_money(summary.average),
        }
    }
}

/// One listed expense; `id` is the key for its delete action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRow {
    pub id: i64,
    pub description: String,
    pub category: String,
    pub amount: String,
    pub date: String,
}

impl From<&Expense> for ExpenseRow {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description.clone(),
            category: expense.category.clone(),
            amount: format_money(expense.amount),
            date: expense.date.clone(),
        }
    }
}

impl ExpenseRow {
    /// `Coffee (Food) $3.50 on 2024-01-01`
    pub fn line(&self) -> String {
        format!("{} ({}) {} on {}", self.description, self.category, self.amount, self.date)
    }
}

pub fn expense_rows(expenses: &[Expense]) -> Vec<ExpenseRow> {
    expenses.iter().map(ExpenseRow::from).collect()
}

/// Entry of the category selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    pub fn filter(&self) -> CategoryFilter {
        CategoryFilter::parse(&self.value)
    }
}

/// "All Categories" followed by one option per category, in the given order
pub fn filter_options(categories: &[String]) -> Vec<FilterOption> {
    std::iter::once(FilterOption {
        value: ALL_CATEGORIES.to_string(),
        label: "All Categories".to_string(),
    })
    .chain(categories.iter().map(|category| FilterOption {
        value: category.clone(),
        label: category.clone(),
    }))
    .collect()
}

/// Text for the blocking notice after a rejected add
pub fn validation_message(error: &ValidationError) -> String {
    format!("{} ({})", INVALID_FORM_MESSAGE, error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::summarize;

    fn coffee() -> Expense {
        Expense {
            id: 42,
            description: "Coffee".to_string(),
            amount: 3.5,
            category: "Food".to_string(),
            date: "2024-01-01".to_string(),
        }
    }

    #[test]
    fn test_summary_fields_round_to_cents() {
        let fields = SummaryFields::from(&Summary { total: 10.0, count: 3, average: 10.0 / 3.0 });
        assert_eq!(fields.total, "$10.00");
        assert_eq!(fields.count, "3");
        assert_eq!(fields.average, "$3.33");

        let empty = SummaryFields::from(&summarize(&[]));
        assert_eq!(empty, SummaryFields {
            total: "$0.00".to_string(),
            count: "0".to_string(),
            average: "$0.00".to_string(),
        });

        let refunds = SummaryFields::from(&Summary { total: -5.0, count: 2, average: -2.5 });
        assert_eq!(refunds.total, "-$5.00");
        assert_eq!(refunds.average, "-$2.50");
    }

    #[test]
    fn test_expense_row() {
        let row = ExpenseRow::from(&coffee());
        assert_eq!(row.id, 42);
        assert_eq!(row.line(), "Coffee (Food) $3.50 on 2024-01-01");

        let mut refund = coffee();
        refund.amount = -1.25;
        assert_eq!(ExpenseRow::from(&refund).amount, "-$1.25");
    }

    #[test]
    fn test_filter_options_start_with_all() {
        let options = filter_options(&["Food".to_string(), "Transport".to_string()]);

        assert_eq!(options.len(), 3);
        assert_eq!(options[0].value, "all");
        assert_eq!(options[0].label, "All Categories");
        assert!(options[0].filter().is_all());
        assert_eq!(options[2].filter(), CategoryFilter::Category("Transport".to_string()));
    }

    #[test]
    fn test_validation_message_names_field() {
        let message = validation_message(&ValidationError::EmptyCategory);
        assert!(message.starts_with(INVALID_FORM_MESSAGE));
        assert!(message.contains("category"));
    }
}
