//! Plain-text board renderer used by the CLI.
//!
//! Display preferences shape the output: font size scales the progress bar
//! width, contrast mode switches to solid glyphs and upper-case titles.

use crate::model::objective::Objective;
use crate::model::preferences::DisplayPreferences;
use crate::progress::Clock;
use crate::view::card::{build_cards, ObjectiveCard, EMPTY_LIST_MESSAGE};
use crate::view::form_view::FormView;
use crate::view::ObjectiveListView;
use log::warn;
use std::io::{self, Write};

const BASE_BAR_WIDTH: f64 = 20.0;
const MIN_BAR_WIDTH: usize = 10;
const MAX_BAR_WIDTH: usize = 60;

/// Writes the full board to `out` on every render.
pub struct TextBoardView<W: Write, C: Clock> {
    out: W,
    clock: C,
    preferences: DisplayPreferences,
}

impl<W: Write, C: Clock> TextBoardView<W, C> {
    pub fn new(out: W, clock: C, preferences: DisplayPreferences) -> Self {
        Self {
            out,
            clock,
            preferences,
        }
    }

    pub fn set_preferences(&mut self, preferences: DisplayPreferences) {
        self.preferences = preferences;
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the form heading and its prefilled values.
    pub fn write_form(&mut self, form: &FormView) -> io::Result<()> {
        writeln!(self.out, "{}", self.heading(form.heading))?;
        let fields = &form.fields;
        writeln!(self.out, "  Title: {}", fields.title)?;
        writeln!(self.out, "  Description: {}", fields.description)?;
        writeln!(self.out, "  Deadline: {}", fields.deadline)?;
        writeln!(self.out, "  Current progress: {}", fields.current_progress)?;
        writeln!(self.out, "  Total target: {}", fields.total_progress)?;
        Ok(())
    }

    fn write_board(&mut self, cards: &[ObjectiveCard]) -> io::Result<()> {
        if cards.is_empty() {
            writeln!(self.out, "{EMPTY_LIST_MESSAGE}")?;
            return self.out.flush();
        }

        for card in cards {
            let heading = self.heading(&card.title);
            let bar = self.progress_bar(card.progress_percent);
            writeln!(self.out, "{}. {}", card.position, heading)?;
            if !card.description.is_empty() {
                writeln!(self.out, "   {}", card.description)?;
            }
            writeln!(self.out, "   Progress: {}% {}", card.progress_percent, bar)?;
            writeln!(self.out, "   Time left: {}", card.days_remaining_label())?;
            writeln!(
                self.out,
                "   Daily progress needed: {}",
                card.daily_progress_label()
            )?;
        }
        self.out.flush()
    }

    fn heading(&self, text: &str) -> String {
        if self.preferences.high_contrast {
            text.to_uppercase()
        } else {
            text.to_string()
        }
    }

    fn progress_bar(&self, percent: u8) -> String {
        let width = bar_width(&self.preferences);
        let filled = (usize::from(percent) * width + 50) / 100;
        let (full, empty) = if self.preferences.high_contrast {
            ('#', '-')
        } else {
            ('=', ' ')
        };
        let mut bar = String::with_capacity(width + 2);
        bar.push('[');
        bar.extend(std::iter::repeat(full).take(filled));
        bar.extend(std::iter::repeat(empty).take(width - filled));
        bar.push(']');
        bar
    }
}

impl<W: Write, C: Clock> ObjectiveListView for TextBoardView<W, C> {
    fn render(&mut self, objectives: &[Objective]) {
        let cards = build_cards(objectives, self.clock.now());
        if let Err(err) = self.write_board(&cards) {
            warn!("event=board_render module=view status=error error={err}");
        }
    }
}

fn bar_width(preferences: &DisplayPreferences) -> usize {
    let scaled = (BASE_BAR_WIDTH * preferences.font_scale()).round();
    (scaled as usize).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::TextBoardView;
    use crate::model::objective::Objective;
    use crate::model::preferences::DisplayPreferences;
    use crate::progress::FixedClock;
    use crate::view::form_view::FormView;
    use crate::view::ObjectiveListView;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    fn render(objectives: &[Objective], preferences: DisplayPreferences) -> String {
        let mut view = TextBoardView::new(Vec::new(), clock(), preferences);
        view.render(objectives);
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn empty_board_prints_placeholder() {
        assert_eq!(
            render(&[], DisplayPreferences::default()),
            "No objectives yet.\n"
        );
    }

    #[test]
    fn board_lists_cards_with_metrics() {
        let mut objective = Objective::new("Read", "Twelve books");
        objective.current_progress = 6;
        objective.total_progress = 12;
        let output = render(&[objective], DisplayPreferences::default());

        assert!(output.contains("1. Read"));
        assert!(output.contains("   Twelve books"));
        assert!(output.contains("Progress: 50% [==========          ]"));
        assert!(output.contains("Time left: N/A"));
    }

    #[test]
    fn contrast_and_font_size_change_rendering() {
        let mut objective = Objective::new("Read", "");
        objective.current_progress = 100;
        let preferences = DisplayPreferences {
            high_contrast: true,
            font_size_px: Some(24.0),
        };
        let output = render(&[objective], preferences);

        assert!(output.contains("1. READ"));
        assert!(output.contains(&format!("[{}]", "#".repeat(30))));
    }

    #[test]
    fn form_view_is_written_with_heading() {
        let mut view = TextBoardView::new(Vec::new(), clock(), DisplayPreferences::default());
        view.write_form(&FormView::create()).unwrap();
        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.starts_with("New objective\n"));
        assert!(output.contains("  Total target: 100"));
    }
}
