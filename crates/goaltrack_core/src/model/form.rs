//! Create/edit form input and its typed parse result.
//!
//! # Responsibility
//! - Carry raw text exactly as entered in the form.
//! - Convert raw text into an `ObjectiveDraft` or a field-level `FormError`.
//!
//! # Invariants
//! - Blank numeric fields fall back to defaults; malformed ones are rejected.
//! - A parsed draft always has `total_progress >= 1`.

use crate::model::objective::{
    Objective, DEADLINE_FORMAT, DEFAULT_CURRENT_PROGRESS, DEFAULT_TOTAL_PROGRESS,
};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest accepted target value.
pub const MIN_TOTAL_PROGRESS: u32 = 1;

/// Raw field values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectiveForm {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DD` or blank.
    pub deadline: String,
    pub current_progress: String,
    pub total_progress: String,
}

impl ObjectiveForm {
    /// Prefills the form from an existing objective for editing.
    pub fn from_objective(objective: &Objective) -> Self {
        Self {
            title: objective.title.clone(),
            description: objective.description.clone(),
            deadline: objective
                .deadline
                .map(|date| date.format(DEADLINE_FORMAT).to_string())
                .unwrap_or_default(),
            current_progress: objective.current_progress.to_string(),
            total_progress: objective.total_progress.to_string(),
        }
    }
}

/// Validated, typed form content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectiveDraft {
    pub title: String,
    pub description: String,
    pub deadline: Option<NaiveDate>,
    pub current_progress: u32,
    pub total_progress: u32,
}

impl ObjectiveDraft {
    /// Parses raw form input.
    ///
    /// # Errors
    /// - `MissingField` when title or description is blank.
    /// - `InvalidDeadline` when the deadline is not `YYYY-MM-DD`.
    /// - `InvalidNumber` when a progress field is not a non-negative integer.
    /// - `TotalBelowMinimum` when the target is `0`.
    pub fn parse(form: &ObjectiveForm) -> Result<Self, FormError> {
        let title = required_text(&form.title, FormField::Title)?;
        let description = required_text(&form.description, FormField::Description)?;

        let deadline = match form.deadline.trim() {
            "" => None,
            text => Some(
                NaiveDate::parse_from_str(text, DEADLINE_FORMAT)
                    .map_err(|_| FormError::InvalidDeadline(text.to_string()))?,
            ),
        };

        let current_progress = parse_count(
            &form.current_progress,
            FormField::CurrentProgress,
            DEFAULT_CURRENT_PROGRESS,
        )?;
        let total_progress = parse_count(
            &form.total_progress,
            FormField::TotalProgress,
            DEFAULT_TOTAL_PROGRESS,
        )?;
        if total_progress < MIN_TOTAL_PROGRESS {
            return Err(FormError::TotalBelowMinimum(total_progress));
        }

        Ok(Self {
            title,
            description,
            deadline,
            current_progress,
            total_progress,
        })
    }
}

/// Form fields, used to attribute parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Deadline,
    CurrentProgress,
    TotalProgress,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Deadline => "deadline",
            Self::CurrentProgress => "current_progress",
            Self::TotalProgress => "total_progress",
        }
    }
}

/// Field-level form validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    MissingField(FormField),
    InvalidDeadline(String),
    InvalidNumber { field: FormField, value: String },
    TotalBelowMinimum(u32),
}

impl FormError {
    /// Field the error is attached to.
    pub fn field(&self) -> FormField {
        match self {
            Self::MissingField(field) => *field,
            Self::InvalidDeadline(_) => FormField::Deadline,
            Self::InvalidNumber { field, .. } => *field,
            Self::TotalBelowMinimum(_) => FormField::TotalProgress,
        }
    }
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{} is required", field.as_str()),
            Self::InvalidDeadline(value) => {
                write!(f, "deadline must be YYYY-MM-DD, got `{value}`")
            }
            Self::InvalidNumber { field, value } => write!(
                f,
                "{} must be a non-negative whole number, got `{value}`",
                field.as_str()
            ),
            Self::TotalBelowMinimum(value) => write!(
                f,
                "total_progress must be >= {MIN_TOTAL_PROGRESS}, got {value}"
            ),
        }
    }
}

impl Error for FormError {}

fn required_text(value: &str, field: FormField) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn parse_count(value: &str, field: FormField, default: u32) -> Result<u32, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| FormError::InvalidNumber {
            field,
            value: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::{FormError, FormField, ObjectiveDraft, ObjectiveForm};

    fn form(title: &str, description: &str) -> ObjectiveForm {
        ObjectiveForm {
            title: title.to_string(),
            description: description.to_string(),
            ..ObjectiveForm::default()
        }
    }

    #[test]
    fn blank_numbers_fall_back_to_defaults() {
        let draft = ObjectiveDraft::parse(&form("A", "desc")).unwrap();
        assert_eq!(draft.current_progress, 0);
        assert_eq!(draft.total_progress, 100);
        assert_eq!(draft.deadline, None);
    }

    #[test]
    fn text_fields_are_trimmed_and_required() {
        let draft = ObjectiveDraft::parse(&form("  A  ", " d ")).unwrap();
        assert_eq!(draft.title, "A");
        assert_eq!(draft.description, "d");

        let err = ObjectiveDraft::parse(&form("   ", "d")).unwrap_err();
        assert_eq!(err, FormError::MissingField(FormField::Title));
    }

    #[test]
    fn malformed_numbers_are_rejected_with_field() {
        let mut input = form("A", "d");
        input.current_progress = "-4".to_string();
        let err = ObjectiveDraft::parse(&input).unwrap_err();
        assert_eq!(err.field(), FormField::CurrentProgress);

        input.current_progress = "4".to_string();
        input.total_progress = "lots".to_string();
        let err = ObjectiveDraft::parse(&input).unwrap_err();
        assert_eq!(err.field(), FormField::TotalProgress);
    }

    #[test]
    fn zero_total_is_rejected() {
        let mut input = form("A", "d");
        input.total_progress = "0".to_string();
        assert_eq!(
            ObjectiveDraft::parse(&input).unwrap_err(),
            FormError::TotalBelowMinimum(0)
        );
    }

    #[test]
    fn invalid_deadline_is_rejected() {
        let mut input = form("A", "d");
        input.deadline = "next friday".to_string();
        assert!(matches!(
            ObjectiveDraft::parse(&input).unwrap_err(),
            FormError::InvalidDeadline(value) if value == "next friday"
        ));
    }
}
