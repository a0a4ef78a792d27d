//! Presentation boundary: view models and renderers.
//!
//! # Responsibility
//! - Turn objectives into display-ready cards and form views.
//! - Define the render hook the list controller calls after every change.
//!
//! # Invariants
//! - Views never mutate objectives; they only observe snapshots.
//! - Cards are rebuilt in full on every render.

pub mod card;
pub mod form_view;
pub mod text;

use crate::model::objective::Objective;

/// Receives the full objective list whenever it changes.
pub trait ObjectiveListView {
    fn render(&mut self, objectives: &[Objective]);
}

/// View that ignores renders.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullView;

impl ObjectiveListView for NullView {
    fn render(&mut self, _objectives: &[Objective]) {}
}
