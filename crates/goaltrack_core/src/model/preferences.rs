//! Display preferences: high-contrast mode and font size.
//!
//! # Invariants
//! - Font size never drops below `MIN_FONT_SIZE_PX` through `decreased()`.
//! - Persisted font sizes are rounded to two decimals so repeated steps do
//!   not accumulate float noise in storage.

/// Font size used when no preference has been stored.
pub const BASE_FONT_SIZE_PX: f64 = 16.0;
/// Lower bound applied when shrinking the font.
pub const MIN_FONT_SIZE_PX: f64 = 12.0;
const FONT_GROW_FACTOR: f64 = 1.1;
const FONT_SHRINK_FACTOR: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DisplayPreferences {
    pub high_contrast: bool,
    /// `None` means the base size.
    pub font_size_px: Option<f64>,
}

impl DisplayPreferences {
    pub fn effective_font_size_px(&self) -> f64 {
        self.font_size_px.unwrap_or(BASE_FONT_SIZE_PX)
    }

    /// Ratio of the effective size to the base size.
    pub fn font_scale(&self) -> f64 {
        self.effective_font_size_px() / BASE_FONT_SIZE_PX
    }

    /// Next size after one "increase" step.
    pub fn increased_font_size_px(&self) -> f64 {
        round_px(self.effective_font_size_px() * FONT_GROW_FACTOR)
    }

    /// Next size after one "decrease" step, floored at the minimum.
    pub fn decreased_font_size_px(&self) -> f64 {
        round_px((self.effective_font_size_px() * FONT_SHRINK_FACTOR).max(MIN_FONT_SIZE_PX))
    }
}

/// Formats a size the way it is stored, e.g. `17.6px`.
pub fn format_font_size(px: f64) -> String {
    format!("{px}px")
}

/// Parses a stored size such as `17.6px` or `17.6`.
///
/// Returns `None` for non-finite, non-positive or unparseable values.
pub fn parse_font_size(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
    number
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite() && *px > 0.0)
}

fn round_px(px: f64) -> f64 {
    (px * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{format_font_size, parse_font_size, DisplayPreferences, MIN_FONT_SIZE_PX};

    #[test]
    fn font_steps_scale_from_base_size() {
        let prefs = DisplayPreferences::default();
        assert_eq!(prefs.increased_font_size_px(), 17.6);
        assert_eq!(prefs.decreased_font_size_px(), 14.4);
    }

    #[test]
    fn decrease_is_floored() {
        let prefs = DisplayPreferences {
            high_contrast: false,
            font_size_px: Some(12.5),
        };
        assert_eq!(prefs.decreased_font_size_px(), MIN_FONT_SIZE_PX);
    }

    #[test]
    fn font_size_text_roundtrip() {
        assert_eq!(format_font_size(17.6), "17.6px");
        assert_eq!(parse_font_size("17.6px"), Some(17.6));
        assert_eq!(parse_font_size(" 20 "), Some(20.0));
        assert_eq!(parse_font_size("big"), None);
        assert_eq!(parse_font_size("-3px"), None);
    }
}
