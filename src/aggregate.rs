// Aggregation over a subset of expenses: summary numbers and chart series.
// Every value is returned un-rounded; formatting belongs to the renderers.

use crate::expense::Expense;
use indexmap::IndexMap;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub total: f64,
    pub count: usize,
    pub average: f64,
}

/// Total, count and average of `subset`. Average is 0 for an empty subset.
pub fn summarize(subset: &[Expense]) -> Summary {
    // Start from +0.0; `Sum for f64` starts from -0.0, which prints as "-0.00"
    let total = subset.iter().fold(0.0, |sum, e| sum + e.amount);
    let count = subset.len();
    let average = if count > 0 { total / count as f64 } else { 0.0 };

    Summary { total, count, average }
}

/// Category → total, categories in first-seen order of the subset
pub type CategorySeries = IndexMap<String, f64>;

pub fn series_by_category(subset: &[Expense]) -> CategorySeries {
    let mut series = CategorySeries::new();
    for expense in subset {
        *series.entry(expense.category.clone()).or_insert(0.0) += expense.amount;
    }
    series
}

/// (date, total) pairs, one per distinct date string, ascending by date.
/// Dates compare as plain strings, which matches ISO 8601 ordering.
pub fn series_by_date(subset: &[Expense]) -> Vec<(String, f64)> {
    let mut by_date: BTreeMap<&str, f64> = BTreeMap::new();
    for expense in subset {
        *by_date.entry(expense.date.as_str()).or_insert(0.0) += expense.amount;
    }

    by_date
        .into_iter()
        .map(|(date, total)| (date.to_string(), total))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, amount: f64, category: &str, date: &str) -> Expense {
        Expense {
            id,
            description: format!("expense {}", id),
            amount,
            category: category.to_string(),
            date: date.to_string(),
        }
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, Summary { total: 0.0, count: 0, average: 0.0 });
        assert!(summary.total.is_sign_positive());
        assert!(summary.average.is_sign_positive());
    }

    #[test]
    fn test_coffee_and_bus_scenario() {
        let subset = vec![
            expense(1, 3.5, "Food", "2024-01-01"),
            expense(2, 2.0, "Transport", "2024-01-01"),
        ];

        let summary = summarize(&subset);
        assert_eq!(summary.total, 5.5);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, 2.75);

        let by_category = series_by_category(&subset);
        assert_eq!(by_category.len(), 2);
        assert_eq!(by_category["Food"], 3.5);
        assert_eq!(by_category["Transport"], 2.0);

        assert_eq!(series_by_date(&subset), vec![("2024-01-01".to_string(), 5.5)]);
    }

    #[test]
    fn test_average_times_count_matches_total() {
        let subset = vec![
            expense(1, 0.1, "A", "2024-01-01"),
            expense(2, 0.2, "B", "2024-01-02"),
            expense(3, 19.99, "A", "2024-01-03"),
            expense(4, -5.0, "C", "2024-01-03"),
        ];

        let summary = summarize(&subset);
        let rebuilt = summary.average * summary.count as f64;
        assert!((rebuilt - summary.total).abs() < 1e-9);
    }

    #[test]
    fn test_series_by_category_keeps_first_seen_order() {
        let subset = vec![
            expense(1, 1.0, "Transport", "2024-01-01"),
            expense(2, 2.0, "Food", "2024-01-01"),
            expense(3, 4.0, "Transport", "2024-01-02"),
        ];

        let series = series_by_category(&subset);
        let keys: Vec<&str> = series.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Transport", "Food"]);
        assert_eq!(series["Transport"], 5.0);
    }

    #[test]
    fn test_series_by_date_sorted_and_distinct() {
        let subset = vec![
            expense(1, 1.0, "A", "2024-03-01"),
            expense(2, 2.0, "A", "2024-01-15"),
            expense(3, 4.0, "B", "2024-03-01"),
            expense(4, 8.0, "B", "2023-12-31"),
        ];

        let series = series_by_date(&subset);
        assert_eq!(
            series,
            vec![
                ("2023-12-31".to_string(), 8.0),
                ("2024-01-15".to_string(), 2.0),
                ("2024-03-01".to_string(), 5.0),
            ]
        );
        assert!(series_by_date(&[]).is_empty());
    }
}
