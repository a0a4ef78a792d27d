//! Display preference persistence.
//!
//! Contrast and font size live under separate keys and are read and written
//! independently. Unreadable values fall back to defaults.

use crate::model::preferences::{format_font_size, parse_font_size, DisplayPreferences};
use crate::repo::kv_repo::{KeyValueStore, RepoResult};
use log::warn;

pub const HIGH_CONTRAST_KEY: &str = "highContrast";
pub const FONT_SIZE_KEY: &str = "fontSize";

pub trait PreferenceRepository {
    fn load_preferences(&self) -> RepoResult<DisplayPreferences>;
    fn save_high_contrast(&self, enabled: bool) -> RepoResult<()>;
    fn save_font_size(&self, px: f64) -> RepoResult<()>;
}

pub struct KvPreferenceRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> KvPreferenceRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: KeyValueStore> PreferenceRepository for KvPreferenceRepository<S> {
    fn load_preferences(&self) -> RepoResult<DisplayPreferences> {
        // Only the literal `true` enables contrast mode.
        let high_contrast = self.store.get(HIGH_CONTRAST_KEY)?.as_deref() == Some("true");

        let font_size_px = match self.store.get(FONT_SIZE_KEY)? {
            Some(raw) => {
                let parsed = parse_font_size(&raw);
                if parsed.is_none() {
                    warn!(
                        "event=preferences_load module=repo status=ignored key={} error_code=malformed_value",
                        FONT_SIZE_KEY
                    );
                }
                parsed
            }
            None => None,
        };

        Ok(DisplayPreferences {
            high_contrast,
            font_size_px,
        })
    }

    fn save_high_contrast(&self, enabled: bool) -> RepoResult<()> {
        self.store
            .set(HIGH_CONTRAST_KEY, if enabled { "true" } else { "false" })
    }

    fn save_font_size(&self, px: f64) -> RepoResult<()> {
        self.store.set(FONT_SIZE_KEY, &format_font_size(px))
    }
}
