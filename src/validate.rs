// Validation - checks on caller input before it reaches the store

use chrono::NaiveDate;
use thiserror::Error;

use crate::record::{Category, NewRecord};

/// Minimum length of a trimmed subject.
pub const MIN_SUBJECT_LEN: usize = 3;

/// Smallest accepted amount.
pub const MIN_AMOUNT: f64 = 0.01;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("subject is required")]
    SubjectMissing,

    #[error("subject must be at least {MIN_SUBJECT_LEN} characters")]
    SubjectTooShort,

    #[error("amount must be a number of at least {MIN_AMOUNT}")]
    AmountOutOfRange,

    #[error("date is required")]
    DateMissing,

    #[error("date must be formatted as YYYY-MM-DD")]
    DateInvalid,
}

impl NewRecord {
    /// Validate a draft for `category` and return it normalized (subject
    /// trimmed). The date is mandatory except for fixed costs; when one
    /// is present it must be a real `YYYY-MM-DD` calendar date.
    pub fn validated(mut self, category: Category) -> Result<NewRecord, ValidationError> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err(ValidationError::SubjectMissing);
        }
        if subject.chars().count() < MIN_SUBJECT_LEN {
            return Err(ValidationError::SubjectTooShort);
        }

        if !self.amount.is_finite() || self.amount < MIN_AMOUNT {
            return Err(ValidationError::AmountOutOfRange);
        }

        match &self.date {
            Some(date) => {
                if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                    return Err(ValidationError::DateInvalid);
                }
            }
            None => {
                if category.requires_date() {
                    return Err(ValidationError::DateMissing);
                }
            }
        }

        self.subject = subject.to_string();
        Ok(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_sale_passes_and_is_trimmed() {
        let draft = NewRecord::new("  Ticket batch  ", 500.0, Some("2024-01-15"));

        let validated = draft.validated(Category::Sales).unwrap();
        assert_eq!(validated.subject, "Ticket batch");
    }

    #[test]
    fn test_subject_rules() {
        assert_eq!(
            NewRecord::new("   ", 10.0, Some("2024-01-15")).validated(Category::Sales),
            Err(ValidationError::SubjectMissing)
        );
        assert_eq!(
            NewRecord::new("ab", 10.0, Some("2024-01-15")).validated(Category::Sales),
            Err(ValidationError::SubjectTooShort)
        );
    }

    #[test]
    fn test_amount_rules() {
        assert_eq!(
            NewRecord::new("Batch", 0.0, Some("2024-01-15")).validated(Category::Sales),
            Err(ValidationError::AmountOutOfRange)
        );
        assert_eq!(
            NewRecord::new("Batch", -5.0, Some("2024-01-15")).validated(Category::Sales),
            Err(ValidationError::AmountOutOfRange)
        );
        assert_eq!(
            NewRecord::new("Batch", f64::NAN, Some("2024-01-15")).validated(Category::Sales),
            Err(ValidationError::AmountOutOfRange)
        );
        assert!(NewRecord::new("Batch", 0.01, Some("2024-01-15"))
            .validated(Category::Sales)
            .is_ok());
    }

    #[test]
    fn test_date_required_except_for_fixed_costs() {
        assert_eq!(
            NewRecord::new("Batch", 10.0, None).validated(Category::Sales),
            Err(ValidationError::DateMissing)
        );
        assert_eq!(
            NewRecord::new("Maria", 900.0, None).validated(Category::Payroll),
            Err(ValidationError::DateMissing)
        );
        assert!(NewRecord::new("Rent", 300.0, None)
            .validated(Category::FixedCosts)
            .is_ok());
    }

    #[test]
    fn test_date_must_be_a_real_calendar_date() {
        assert_eq!(
            NewRecord::new("Batch", 10.0, Some("15/01/2024")).validated(Category::Sales),
            Err(ValidationError::DateInvalid)
        );
        assert_eq!(
            NewRecord::new("Batch", 10.0, Some("2024-02-30")).validated(Category::Sales),
            Err(ValidationError::DateInvalid)
        );
        // A fixed cost with a date still gets the date checked
        assert_eq!(
            NewRecord::new("Rent", 300.0, Some("not-a-date")).validated(Category::FixedCosts),
            Err(ValidationError::DateInvalid)
        );
    }
}
