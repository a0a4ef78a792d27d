//! Display preference use-cases.
//!
//! # Invariants
//! - Preferences are read once at startup and written on every change.
//! - Contrast and font size are persisted independently.
//! - In-memory state changes only after a successful write.

use crate::model::preferences::DisplayPreferences;
use crate::repo::kv_repo::RepoResult;
use crate::repo::preference_repo::PreferenceRepository;
use log::info;

pub struct PreferenceService<R: PreferenceRepository> {
    repo: R,
    current: DisplayPreferences,
}

impl<R: PreferenceRepository> PreferenceService<R> {
    pub fn load(repo: R) -> RepoResult<Self> {
        let current = repo.load_preferences()?;
        Ok(Self { repo, current })
    }

    pub fn current(&self) -> DisplayPreferences {
        self.current
    }

    /// Flips high-contrast mode and returns the new state.
    pub fn toggle_high_contrast(&mut self) -> RepoResult<bool> {
        let enabled = !self.current.high_contrast;
        self.repo.save_high_contrast(enabled)?;
        self.current.high_contrast = enabled;
        info!("event=preferences_contrast module=service status=ok enabled={enabled}");
        Ok(enabled)
    }

    /// Grows the font one step and returns the new size in px.
    pub fn increase_font_size(&mut self) -> RepoResult<f64> {
        let px = self.current.increased_font_size_px();
        self.set_font_size(px)
    }

    /// Shrinks the font one step (floored) and returns the new size in px.
    pub fn decrease_font_size(&mut self) -> RepoResult<f64> {
        let px = self.current.decreased_font_size_px();
        self.set_font_size(px)
    }

    fn set_font_size(&mut self, px: f64) -> RepoResult<f64> {
        self.repo.save_font_size(px)?;
        self.current.font_size_px = Some(px);
        info!("event=preferences_font module=service status=ok font_size_px={px}");
        Ok(px)
    }
}
