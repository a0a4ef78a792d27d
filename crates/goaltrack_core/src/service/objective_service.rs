//! Objective list controller.
//!
//! # Responsibility
//! - Own the ordered objective list for the lifetime of a session.
//! - Apply create/update/delete, persist the full list, then re-render.
//!
//! # Invariants
//! - The list is loaded once, in `load`, and only mutated through this type.
//! - A mutation is committed in memory only after the save succeeded, so a
//!   failed write leaves list and storage in agreement.
//! - Every committed mutation is followed by exactly one render.
//! - Delete requires an explicit yes from the `ConfirmPrompt`.

use crate::model::form::{FormError, ObjectiveDraft, ObjectiveForm};
use crate::model::objective::{Objective, ObjectiveId};
use crate::repo::kv_repo::RepoError;
use crate::repo::objective_repo::ObjectiveRepository;
use crate::view::form_view::FormView;
use crate::view::ObjectiveListView;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Question asked before an objective is deleted.
pub const DELETE_CONFIRM_MESSAGE: &str = "Are you sure you want to delete this objective?";

/// Blocking yes/no question to the user.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> ConfirmPrompt for F {
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Errors from objective list operations.
#[derive(Debug)]
pub enum ObjectiveServiceError {
    /// Form input failed validation.
    Form(FormError),
    /// No objective with this id (stale reference).
    ObjectiveNotFound(ObjectiveId),
    /// Persistence failure; the in-memory list was left unchanged.
    Repo(RepoError),
}

impl Display for ObjectiveServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::ObjectiveNotFound(id) => write!(f, "objective not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ObjectiveServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::ObjectiveNotFound(_) => None,
        }
    }
}

impl From<FormError> for ObjectiveServiceError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<RepoError> for ObjectiveServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

pub type ServiceResult<T> = Result<T, ObjectiveServiceError>;

/// Controller owning the objective list, its repository and its view.
pub struct ObjectiveService<R: ObjectiveRepository, V: ObjectiveListView> {
    repo: R,
    view: V,
    objectives: Vec<Objective>,
}

impl<R: ObjectiveRepository, V: ObjectiveListView> ObjectiveService<R, V> {
    /// Loads the persisted list and renders it once.
    pub fn load(repo: R, mut view: V) -> Result<Self, RepoError> {
        let objectives = repo.load_objectives()?;
        view.render(&objectives);
        Ok(Self {
            repo,
            view,
            objectives,
        })
    }

    /// Current list in display order.
    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn get(&self, id: ObjectiveId) -> Option<&Objective> {
        self.objectives.iter().find(|objective| objective.id == id)
    }

    /// Zero-based position of the objective with `id`.
    pub fn position_of(&self, id: ObjectiveId) -> Option<usize> {
        self.objectives.iter().position(|objective| objective.id == id)
    }

    /// Id of the objective at zero-based `position`.
    pub fn id_at(&self, position: usize) -> Option<ObjectiveId> {
        self.objectives.get(position).map(|objective| objective.id)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Form prefilled for editing the objective with `id`.
    pub fn edit_form(&self, id: ObjectiveId) -> ServiceResult<FormView> {
        self.get(id)
            .map(FormView::edit)
            .ok_or(ObjectiveServiceError::ObjectiveNotFound(id))
    }

    /// Appends a new objective built from `form`.
    ///
    /// Returns the generated stable id.
    pub fn create(&mut self, form: &ObjectiveForm) -> ServiceResult<ObjectiveId> {
        let draft = parse_form(form, "objective_create")?;
        let objective = Objective::from_draft(draft);
        let id = objective.id;

        let mut next = self.objectives.clone();
        next.push(objective);
        self.commit(next)?;

        info!(
            "event=objective_create module=service status=ok objective_id={} count={}",
            id,
            self.objectives.len()
        );
        Ok(id)
    }

    /// Replaces the fields of the objective with `id`, keeping id and position.
    pub fn update(&mut self, id: ObjectiveId, form: &ObjectiveForm) -> ServiceResult<()> {
        let position = self
            .position_of(id)
            .ok_or(ObjectiveServiceError::ObjectiveNotFound(id))?;
        let draft = parse_form(form, "objective_update")?;

        let mut next = self.objectives.clone();
        next[position].apply_draft(draft);
        self.commit(next)?;

        info!(
            "event=objective_update module=service status=ok objective_id={} position={}",
            id, position
        );
        Ok(())
    }

    /// Deletes the objective with `id` once the user confirms.
    ///
    /// Returns `Ok(false)` when the user declined; nothing changes then.
    pub fn delete(
        &mut self,
        id: ObjectiveId,
        prompt: &mut impl ConfirmPrompt,
    ) -> ServiceResult<bool> {
        let position = self
            .position_of(id)
            .ok_or(ObjectiveServiceError::ObjectiveNotFound(id))?;

        if !prompt.confirm(DELETE_CONFIRM_MESSAGE) {
            info!(
                "event=objective_delete module=service status=declined objective_id={}",
                id
            );
            return Ok(false);
        }

        let mut next = self.objectives.clone();
        next.remove(position);
        self.commit(next)?;

        info!(
            "event=objective_delete module=service status=ok objective_id={} count={}",
            id,
            self.objectives.len()
        );
        Ok(true)
    }

    /// Drops an in-progress form and redraws the unchanged list.
    pub fn cancel_edit(&mut self) {
        self.view.render(&self.objectives);
    }

    fn commit(&mut self, next: Vec<Objective>) -> ServiceResult<()> {
        self.repo.save_objectives(&next)?;
        self.objectives = next;
        self.view.render(&self.objectives);
        Ok(())
    }
}

fn parse_form(form: &ObjectiveForm, event: &str) -> ServiceResult<ObjectiveDraft> {
    ObjectiveDraft::parse(form).map_err(|err| {
        warn!(
            "event={} module=service status=rejected field={}",
            event,
            err.field().as_str()
        );
        ObjectiveServiceError::Form(err)
    })
}
