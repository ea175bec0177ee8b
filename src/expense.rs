// Expense - the single recorded entity
//
// Raw form input (all strings) is validated once, in `ExpenseFields::parse`.
// An `Expense` can only be built from parsed fields, so a record that made it
// into the store always has a description, a category, a date and a finite
// amount.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Reason an add was rejected. Each variant names the offending field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("description is required")]
    EmptyDescription,

    #[error("amount must be a number, got {0:?}")]
    InvalidAmount(String),

    #[error("category is required")]
    EmptyCategory,

    #[error("date is required")]
    EmptyDate,

    #[error("no expense id left after {0}")]
    IdsExhausted(i64),
}

impl ValidationError {
    /// Field the error refers to, as named in the add form
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyDescription => "description",
            ValidationError::InvalidAmount(_) => "amount",
            ValidationError::EmptyCategory => "category",
            ValidationError::EmptyDate => "date",
            ValidationError::IdsExhausted(_) => "id",
        }
    }
}

// ============================================================================
// RAW INPUT
// ============================================================================

/// Unvalidated values as typed into the add form or passed on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseInput {
    pub description: String,
    pub amount: String,
    pub category: String,
    pub date: String,
}

impl ExpenseInput {
    pub fn new(
        description: impl Into<String>,
        amount: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            amount: amount.into(),
            category: category.into(),
            date: date.into(),
        }
    }
}

// ============================================================================
// VALIDATED FIELDS
// ============================================================================

/// Fields that passed validation. Only `parse` constructs this.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseFields {
    description: String,
    amount: f64,
    category: String,
    date: String,
}

impl ExpenseFields {
    /// Validate raw input. Checks run in form order and the first failure wins.
    pub fn parse(input: &ExpenseInput) -> Result<Self, ValidationError> {
        let description = input.description.trim();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let amount = parse_amount(&input.amount)?;

        let category = input.category.trim();
        if category.is_empty() {
            return Err(ValidationError::EmptyCategory);
        }

        let date = input.date.trim();
        if date.is_empty() {
            return Err(ValidationError::EmptyDate);
        }

        Ok(Self {
            description: description.to_string(),
            amount,
            category: category.to_string(),
            date: date.to_string(),
        })
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }
}

fn parse_amount(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ValidationError::InvalidAmount(trimmed.to_string())),
    }
}

// ============================================================================
// EXPENSE ENTITY
// ============================================================================

/// A recorded spending event. Serialized field names are the persisted format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub description: String,
    pub amount: f64,
    pub category: String,
    pub date: String,
}

impl Expense {
    /// Build a record from validated fields under an already-allocated id
    pub fn from_fields(id: i64, fields: ExpenseFields) -> Self {
        Expense {
            id,
            description: fields.description,
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
        }
    }
}

/// Next id: the current time in milliseconds, bumped past `last_id` when the
/// clock has not moved forward (two adds in the same millisecond).
/// Fails once `last_id` is `i64::MAX`, since ids never go backwards.
pub fn next_id(last_id: Option<i64>) -> Result<i64, ValidationError> {
    let now = Utc::now().timestamp_millis();
    match last_id {
        Some(last) if now <= last => last
            .checked_add(1)
            .ok_or(ValidationError::IdsExhausted(last)),
        _ => Ok(now),
    }
}

/// Today's date in the stored `YYYY-MM-DD` form
pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_input() {
        let input = ExpenseInput::new("Coffee", "3.5", "Food", "2024-01-01");
        let fields = ExpenseFields::parse(&input).unwrap();

        assert_eq!(fields.amount(), 3.5);
        assert_eq!(fields.category(), "Food");

        let expense = Expense::from_fields(7, fields);
        assert_eq!(expense.id, 7);
        assert_eq!(expense.description, "Coffee");
        assert_eq!(expense.date, "2024-01-01");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let input = ExpenseInput::new("  Bus ", " 2.0 ", " Transport", "2024-01-02 ");
        let expense = Expense::from_fields(1, ExpenseFields::parse(&input).unwrap());

        assert_eq!(expense.description, "Bus");
        assert_eq!(expense.amount, 2.0);
        assert_eq!(expense.category, "Transport");
        assert_eq!(expense.date, "2024-01-02");
    }

    #[test]
    fn test_parse_rejects_missing_fields() {
        let cases = [
            (ExpenseInput::new("", "1", "Food", "2024-01-01"), ValidationError::EmptyDescription),
            (ExpenseInput::new("   ", "1", "Food", "2024-01-01"), ValidationError::EmptyDescription),
            (ExpenseInput::new("Tea", "1", "", "2024-01-01"), ValidationError::EmptyCategory),
            (ExpenseInput::new("Tea", "1", "Food", ""), ValidationError::EmptyDate),
        ];

        for (input, expected) in cases {
            assert_eq!(ExpenseFields::parse(&input), Err(expected));
        }
    }

    #[test]
    fn test_parse_rejects_bad_amounts() {
        for raw in ["", "abc", "NaN", "inf", "-inf", "1,5"] {
            let input = ExpenseInput::new("Tea", raw, "Food", "2024-01-01");
            let err = ExpenseFields::parse(&input).unwrap_err();
            assert_eq!(err.field(), "amount", "amount {:?} should be rejected", raw);
        }
    }

    #[test]
    fn test_negative_amount_is_accepted() {
        let input = ExpenseInput::new("Refund", "-4.25", "Food", "2024-01-01");
        let fields = ExpenseFields::parse(&input).unwrap();
        assert_eq!(fields.amount(), -4.25);
    }

    #[test]
    fn test_next_id_is_strictly_increasing() {
        let first = next_id(None).unwrap();
        let far_future = first + 1_000_000;

        assert_eq!(next_id(Some(far_future)), Ok(far_future + 1));
        assert!(next_id(Some(first - 1)).unwrap() >= first);
    }

    #[test]
    fn test_next_id_at_max_is_an_error() {
        let err = next_id(Some(i64::MAX)).unwrap_err();
        assert_eq!(err, ValidationError::IdsExhausted(i64::MAX));
        assert_eq!(err.field(), "id");
        assert_eq!(next_id(Some(i64::MAX - 1)), Ok(i64::MAX));
    }

    #[test]
    fn test_serialized_shape() {
        let expense = Expense {
            id: 1,
            description: "Coffee".to_string(),
            amount: 3.5,
            category: "Food".to_string(),
            date: "2024-01-01".to_string(),
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 1,
                "description": "Coffee",
                "amount": 3.5,
                "category": "Food",
                "date": "2024-01-01"
            })
        );
    }
}
