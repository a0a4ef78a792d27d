//! Create/edit form view model.

use crate::model::form::ObjectiveForm;
use crate::model::objective::{
    Objective, ObjectiveId, DEFAULT_CURRENT_PROGRESS, DEFAULT_TOTAL_PROGRESS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ObjectiveId),
}

/// Heading plus prefilled field values for the objective form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub mode: FormMode,
    pub heading: &'static str,
    pub fields: ObjectiveForm,
}

impl FormView {
    /// Blank form with default progress values.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            heading: "New objective",
            fields: ObjectiveForm {
                current_progress: DEFAULT_CURRENT_PROGRESS.to_string(),
                total_progress: DEFAULT_TOTAL_PROGRESS.to_string(),
                ..ObjectiveForm::default()
            },
        }
    }

    /// Form prefilled from an existing objective.
    pub fn edit(objective: &Objective) -> Self {
        Self {
            mode: FormMode::Edit(objective.id),
            heading: "Edit objective",
            fields: ObjectiveForm::from_objective(objective),
        }
    }
}
