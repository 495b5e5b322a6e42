//! Category display colors with a deterministic fallback.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::layout::random::hash_seed;

const FALLBACK_COLORS: [Color; 10] = [
    Color::srgb(0.40, 0.78, 0.98),
    Color::srgb(0.98, 0.55, 0.35),
    Color::srgb(0.55, 0.90, 0.52),
    Color::srgb(0.86, 0.52, 0.96),
    Color::srgb(0.99, 0.84, 0.36),
    Color::srgb(0.36, 0.92, 0.82),
    Color::srgb(0.96, 0.42, 0.58),
    Color::srgb(0.62, 0.66, 0.99),
    Color::srgb(0.90, 0.72, 0.52),
    Color::srgb(0.70, 0.95, 0.40),
];

/// Explicit category colors; anything unmapped falls back to the resource's
/// own color hint, then to a palette slot picked by hashing the name.
#[derive(Clone, Debug, Default)]
pub struct CategoryPalette {
    colors: HashMap<String, Color>,
}

impl CategoryPalette {
    pub fn with_color(mut self, category: impl Into<String>, color: Color) -> Self {
        self.colors.insert(category.into(), color);
        self
    }

    pub fn color_for(&self, category: &str, hint: Option<&str>) -> Color {
        if let Some(color) = self.colors.get(category) {
            return *color;
        }
        if let Some(color) = hint.and_then(parse_hex) {
            return color;
        }
        fallback_color(category)
    }
}

pub fn parse_hex(hex: &str) -> Option<Color> {
    Srgba::hex(hex.trim()).ok().map(Color::from)
}

pub fn fallback_color(category: &str) -> Color {
    FALLBACK_COLORS[hash_seed(category) as usize % FALLBACK_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_mapping_wins_over_hint() {
        let palette = CategoryPalette::default().with_color("CLI", Color::WHITE);
        assert_eq!(palette.color_for("CLI", Some("#ff0000")), Color::WHITE);
    }

    #[test]
    fn hint_is_used_when_unmapped() {
        let palette = CategoryPalette::default();
        let color = palette.color_for("CLI", Some("#ff0000"));
        assert_eq!(color, Color::from(Srgba::rgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn bad_hint_falls_back_to_stable_palette_slot() {
        let palette = CategoryPalette::default();
        let a = palette.color_for("Databases", Some("not-a-color"));
        let b = palette.color_for("Databases", None);
        assert_eq!(a, b);
        assert_eq!(a, fallback_color("Databases"));
    }
}
