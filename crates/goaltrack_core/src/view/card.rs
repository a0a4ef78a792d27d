//! Objective card view model.

use crate::model::objective::{Objective, ObjectiveId};
use crate::progress::{daily_progress_needed, days_remaining, progress_percent, Clock};
use crate::view::ObjectiveListView;
use chrono::NaiveDateTime;

/// Placeholder shown for metrics that do not apply.
pub const NOT_APPLICABLE: &str = "N/A";
/// Shown instead of cards when the list is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No objectives yet.";

/// Display-ready projection of one objective.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectiveCard {
    pub id: ObjectiveId,
    /// 1-based display position.
    pub position: usize,
    pub title: String,
    pub description: String,
    pub progress_percent: u8,
    pub days_remaining: Option<u32>,
    pub daily_progress_needed: Option<f64>,
    /// Accessible label for the edit control.
    pub edit_label: String,
    /// Accessible label for the delete control.
    pub delete_label: String,
}

impl ObjectiveCard {
    pub fn build(objective: &Objective, position: usize, now: NaiveDateTime) -> Self {
        Self {
            id: objective.id,
            position,
            title: objective.title.clone(),
            description: objective.description.clone(),
            progress_percent: progress_percent(objective),
            days_remaining: days_remaining(objective.deadline, now),
            daily_progress_needed: daily_progress_needed(objective, now),
            edit_label: format!("Edit objective {}", objective.title),
            delete_label: format!("Delete objective {}", objective.title),
        }
    }

    /// `"5 days"`, or `N/A` without a deadline.
    pub fn days_remaining_label(&self) -> String {
        match self.days_remaining {
            Some(1) => "1 day".to_string(),
            Some(days) => format!("{days} days"),
            None => NOT_APPLICABLE.to_string(),
        }
    }

    /// `"5.00% per day"`, or `N/A`.
    pub fn daily_progress_label(&self) -> String {
        match self.daily_progress_needed {
            Some(rate) => format!("{rate:.2}% per day"),
            None => NOT_APPLICABLE.to_string(),
        }
    }
}

/// Builds cards for the whole list in display order.
pub fn build_cards(objectives: &[Objective], now: NaiveDateTime) -> Vec<ObjectiveCard> {
    objectives
        .iter()
        .enumerate()
        .map(|(index, objective)| ObjectiveCard::build(objective, index + 1, now))
        .collect()
}

/// View keeping the most recently rendered cards.
pub struct CardListView<C: Clock> {
    clock: C,
    cards: Vec<ObjectiveCard>,
    renders: usize,
}

impl<C: Clock> CardListView<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            cards: Vec::new(),
            renders: 0,
        }
    }

    pub fn cards(&self) -> &[ObjectiveCard] {
        &self.cards
    }

    /// Number of renders received so far.
    pub fn render_count(&self) -> usize {
        self.renders
    }
}

impl<C: Clock> ObjectiveListView for CardListView<C> {
    fn render(&mut self, objectives: &[Objective]) {
        self.cards = build_cards(objectives, self.clock.now());
        self.renders += 1;
    }
}
