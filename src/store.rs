// Expense Store - canonical in-memory list for the session
//
// Insertion order is the display order. Deleting removes a record without
// reordering the rest; nothing is edited in place.

use crate::expense::{next_id, Expense, ExpenseFields, ExpenseInput, ValidationError};
use indexmap::IndexSet;
use std::fmt;
use tracing::debug;

/// Sentinel value that selects every category
pub const ALL_CATEGORIES: &str = "all";

// ============================================================================
// CATEGORY FILTER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// `"all"` selects everything; any other value is an exact category name
    pub fn parse(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(value.to_string())
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => &expense.category == name,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Category(name) => f.write_str(name),
        }
    }
}

// ============================================================================
// STORE
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
}

impl ExpenseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a previously persisted collection, keeping its order
    pub fn from_expenses(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }

    /// Validate and append a new record with a fresh id.
    /// On error the collection is left untouched.
    pub fn add(&mut self, input: &ExpenseInput) -> Result<Expense, ValidationError> {
        let fields = ExpenseFields::parse(input)?;
        let last_id = self.expenses.iter().map(|e| e.id).max();
        let expense = Expense::from_fields(next_id(last_id)?, fields);

        debug!(id = expense.id, category = %expense.category, "expense added");
        self.expenses.push(expense.clone());
        Ok(expense)
    }

    /// Remove the record with `id`. Returns whether anything was removed;
    /// an unknown id is not an error.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        let removed = self.expenses.len() != before;

        debug!(id, removed, "expense delete");
        removed
    }

    pub fn get(&self, id: i64) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    pub fn all(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Distinct categories in first-seen order
    pub fn list_categories(&self) -> Vec<String> {
        self.expenses
            .iter()
            .map(|e| e.category.as_str())
            .collect::<IndexSet<&str>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Records selected by `filter`, in collection order
    pub fn filter_by_category(&self, filter: &CategoryFilter) -> Vec<Expense> {
        self.expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(description: &str, amount: &str, category: &str, date: &str) -> ExpenseInput {
        ExpenseInput::new(description, amount, category, date)
    }

    fn sample_store() -> ExpenseStore {
        let mut store = ExpenseStore::new();
        store.add(&input("Coffee", "3.5", "Food", "2024-01-01")).unwrap();
        store.add(&input("Bus", "2.0", "Transport", "2024-01-01")).unwrap();
        store.add(&input("Lunch", "12", "Food", "2024-01-02")).unwrap();
        store
    }

    #[test]
    fn test_add_appends_with_unique_ids() {
        let store = sample_store();

        assert_eq!(store.len(), 3);
        let ids: Vec<i64> = store.all().iter().map(|e| e.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]), "ids must increase: {:?}", ids);

        let descriptions: Vec<&str> = store.all().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Coffee", "Bus", "Lunch"]);
    }

    #[test]
    fn test_add_invalid_leaves_store_unchanged() {
        let mut store = sample_store();
        let before = store.all().to_vec();

        let err = store.add(&input("", "1", "Food", "2024-01-03")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyDescription);

        let err = store.add(&input("Tea", "abc", "Food", "2024-01-03")).unwrap_err();
        assert_eq!(err.field(), "amount");

        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_delete_present_and_absent() {
        let mut store = sample_store();
        let bus_id = store.all()[1].id;

        assert!(store.delete(bus_id));
        assert_eq!(store.len(), 2);
        assert!(store.get(bus_id).is_none());
        let descriptions: Vec<&str> = store.all().iter().map(|e| e.description.as_str()).collect();
        assert_eq!(descriptions, vec!["Coffee", "Lunch"]);

        let before = store.all().to_vec();
        assert!(!store.delete(bus_id));
        assert_eq!(store.all(), before.as_slice());
    }

    #[test]
    fn test_list_categories_first_seen_order() {
        let mut store = sample_store();
        store.add(&input("Rent", "900", "Housing", "2024-01-01")).unwrap();
        store.add(&input("Taxi", "15", "Transport", "2024-01-05")).unwrap();

        assert_eq!(store.list_categories(), vec!["Food", "Transport", "Housing"]);
        assert!(ExpenseStore::new().list_categories().is_empty());
    }

    #[test]
    fn test_filter_all_returns_full_collection() {
        let store = sample_store();
        let filtered = store.filter_by_category(&CategoryFilter::parse("all"));
        assert_eq!(filtered.as_slice(), store.all());
    }

    #[test]
    fn test_filter_by_category_is_exact_and_case_sensitive() {
        let store = sample_store();

        let food = store.filter_by_category(&CategoryFilter::parse("Food"));
        assert_eq!(food.len(), 2);
        assert!(food.iter().all(|e| e.category == "Food"));

        assert!(store.filter_by_category(&CategoryFilter::parse("food")).is_empty());
        assert!(store.filter_by_category(&CategoryFilter::parse("Foo")).is_empty());
    }

    #[test]
    fn test_category_filter_display_round_trips() {
        assert_eq!(CategoryFilter::All.to_string(), "all");
        assert_eq!(CategoryFilter::parse("Food").to_string(), "Food");
        assert!(CategoryFilter::default().is_all());
    }
}
