// Tracker - top-level controller that owns all application state
//
// Every user action goes through here: the store is mutated or filtered, a
// fresh `View` is computed for the renderers, and after add/delete (only) the
// whole list is written back through the repository.

use crate::aggregate::{self, CategorySeries, Summary};
use crate::expense::{Expense, ExpenseInput, ValidationError};
use crate::storage::{ExpenseRepository, KeyValueStore};
use crate::store::{CategoryFilter, ExpenseStore};
use tracing::{error, info};

/// Everything the view and chart renderers need for one redraw
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub filter: CategoryFilter,
    pub categories: Vec<String>,
    pub expenses: Vec<Expense>,
    pub summary: Summary,
    pub by_category: CategorySeries,
    pub by_date: Vec<(String, f64)>,
}

pub struct Tracker<S> {
    store: ExpenseStore,
    repository: ExpenseRepository<S>,
    filter: CategoryFilter,
    last_save_error: Option<String>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Load the persisted list once and take ownership of the repository
    pub fn open(repository: ExpenseRepository<S>) -> Self {
        let store = ExpenseStore::from_expenses(repository.load());
        info!(count = store.len(), "tracker ready");

        Self {
            store,
            repository,
            filter: CategoryFilter::All,
            last_save_error: None,
        }
    }

    /// Validate and record a new expense. A rejected input changes nothing
    /// and is not persisted.
    pub fn add_expense(&mut self, input: &ExpenseInput) -> Result<Expense, ValidationError> {
        let expense = self.store.add(input)?;
        info!(id = expense.id, amount = expense.amount, category = %expense.category, "added expense");

        self.after_mutation();
        Ok(expense)
    }

    /// Delete by id. Unknown ids are a no-op; storage is refreshed either way.
    pub fn delete_expense(&mut self, id: i64) -> bool {
        let removed = self.store.delete(id);
        if removed {
            info!(id, "deleted expense");
        } else {
            info!(id, "delete ignored, no such expense");
        }

        self.after_mutation();
        removed
    }

    /// Mutations rebuild the category list, so the view goes back to "all"
    fn after_mutation(&mut self) {
        self.filter = CategoryFilter::All;
        self.persist();
    }

    fn persist(&mut self) {
        match self.repository.save(self.store.all()) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                error!(error = %format!("{:#}", e), "failed to save expenses");
                self.last_save_error = Some(format!("{:#}", e));
            }
        }
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn store(&self) -> &ExpenseStore {
        &self.store
    }

    pub fn repository(&self) -> &ExpenseRepository<S> {
        &self.repository
    }

    /// Error from the most recent save, cleared by the next successful one
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    /// Derived data for the current filter
    pub fn view(&self) -> View {
        let expenses = self.store.filter_by_category(&self.filter);

        View {
            filter: self.filter.clone(),
            categories: self.store.list_categories(),
            summary: aggregate::summarize(&expenses),
            by_category: aggregate::series_by_category(&expenses),
            by_date: aggregate::series_by_date(&expenses),
            expenses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use anyhow::{bail, Result};

    fn tracker() -> Tracker<MemoryStore> {
        Tracker::open(ExpenseRepository::new(MemoryStore::new()))
    }

    fn writes(tracker: &Tracker<MemoryStore>) -> usize {
        tracker.repository().store().write_count()
    }

    #[test]
    fn test_add_persists() {
        let mut tracker = tracker();
        tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();

        assert_eq!(tracker.store().len(), 1);
        assert_eq!(writes(&tracker), 1);
        assert_eq!(tracker.repository().load(), tracker.store().all());
    }

    #[test]
    fn test_rejected_add_does_not_persist() {
        let mut tracker = tracker();
        let err = tracker
            .add_expense(&ExpenseInput::new("", "3.5", "Food", "2024-01-01"))
            .unwrap_err();

        assert_eq!(err, ValidationError::EmptyDescription);
        assert!(tracker.store().is_empty());
        assert_eq!(writes(&tracker), 0);
    }

    #[test]
    fn test_delete_always_persists() {
        let mut tracker = tracker();
        let coffee = tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();

        assert!(!tracker.delete_expense(coffee.id + 1));
        assert_eq!(tracker.store().len(), 1);
        assert_eq!(writes(&tracker), 2);

        assert!(tracker.delete_expense(coffee.id));
        assert!(tracker.store().is_empty());
        assert_eq!(writes(&tracker), 3);
        assert!(tracker.repository().load().is_empty());
    }

    #[test]
    fn test_filter_does_not_persist() {
        let mut tracker = tracker();
        tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();
        tracker
            .add_expense(&ExpenseInput::new("Bus", "2.0", "Transport", "2024-01-02"))
            .unwrap();

        tracker.set_filter(CategoryFilter::parse("Transport"));
        let view = tracker.view();

        assert_eq!(writes(&tracker), 2);
        assert_eq!(view.expenses.len(), 1);
        assert_eq!(view.summary.total, 2.0);
        assert_eq!(view.categories, vec!["Food", "Transport"]);
        assert_eq!(view.by_date, vec![("2024-01-02".to_string(), 2.0)]);
    }

    #[test]
    fn test_mutation_resets_filter() {
        let mut tracker = tracker();
        tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();
        tracker.set_filter(CategoryFilter::parse("Food"));

        tracker
            .add_expense(&ExpenseInput::new("Bus", "2.0", "Transport", "2024-01-02"))
            .unwrap();
        assert!(tracker.filter().is_all());
        assert_eq!(tracker.view().expenses.len(), 2);
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn read(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> Result<()> {
            bail!("disk full")
        }
    }

    #[test]
    fn test_save_failure_keeps_mutation() {
        let mut tracker = Tracker::open(ExpenseRepository::new(FailingStore));
        tracker
            .add_expense(&ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01"))
            .unwrap();

        assert_eq!(tracker.store().len(), 1);
        let error = tracker.last_save_error().unwrap();
        assert!(error.contains("disk full"), "unexpected error: {}", error);
    }
}
