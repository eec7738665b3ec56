//! Visual themes
//!
//! A theme only changes colours handed to the renderer. Simulation never
//! reads it.

use serde::{Deserialize, Serialize};

/// Linear RGBA
pub type Color = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Classic,
    Neon,
    Desert,
}

/// Colour set for one theme
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub snake_base: Color,
    pub food: Color,
    pub border: Color,
    pub overlay: Color,
}

const CLASSIC: Palette = Palette {
    background: [0.06, 0.1, 0.06, 1.0],
    snake_base: [0.18, 0.58, 0.25, 1.0],
    food: [0.9, 0.2, 0.2, 1.0],
    border: [0.3, 0.9, 0.4, 1.0],
    overlay: [0.05, 0.08, 0.05, 0.75],
};

const NEON: Palette = Palette {
    background: [0.02, 0.02, 0.08, 1.0],
    snake_base: [0.1, 0.95, 0.5, 1.0],
    food: [1.0, 0.2, 0.8, 1.0],
    border: [0.2, 1.0, 0.6, 1.0],
    overlay: [0.02, 0.02, 0.1, 0.8],
};

const DESERT: Palette = Palette {
    background: [0.25, 0.18, 0.1, 1.0],
    snake_base: [0.55, 0.45, 0.2, 1.0],
    food: [0.9, 0.4, 0.1, 1.0],
    border: [0.8, 0.6, 0.25, 1.0],
    overlay: [0.15, 0.1, 0.05, 0.75],
};

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Classic, Theme::Neon, Theme::Desert];

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Classic => &CLASSIC,
            Theme::Neon => &NEON,
            Theme::Desert => &DESERT,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Classic => "Classic",
            Theme::Neon => "Neon",
            Theme::Desert => "Desert",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Theme::Classic),
            "neon" => Some(Theme::Neon),
            "desert" => Some(Theme::Desert),
            _ => None,
        }
    }

    /// Next theme in menu order, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Theme::Classic => Theme::Neon,
            Theme::Neon => Theme::Desert,
            Theme::Desert => Theme::Classic,
        }
    }

    /// Neon draws glows under food and around the border
    pub fn has_glow(&self) -> bool {
        *self == Theme::Neon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for theme in Theme::ALL {
            assert_eq!(Theme::from_str(theme.as_str()), Some(theme));
        }
        assert_eq!(Theme::from_str("NEON"), Some(Theme::Neon));
        assert_eq!(Theme::from_str("plaid"), None);
    }

    #[test]
    fn test_cycle_visits_every_theme() {
        let mut theme = Theme::Classic;
        for expected in [Theme::Neon, Theme::Desert, Theme::Classic] {
            theme = theme.next();
            assert_eq!(theme, expected);
        }
    }

    #[test]
    fn test_food_colours_differ() {
        assert_ne!(Theme::Classic.palette().food, Theme::Neon.palette().food);
        assert_ne!(Theme::Neon.palette().food, Theme::Desert.palette().food);
    }
}
