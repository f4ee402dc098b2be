//! Colour themes

use crate::core::error::{PlanisphereError, Result};
use crate::formats::Color;

/// A named colour theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    /// Black on white, for printing
    #[default]
    Default,
    /// Light on dark blue
    Dark,
}

/// Colours for each role on a drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub date: Color,
    pub edge: Color,
    pub shading: Color,
    pub grid: Color,
    pub stick: Color,
    pub star: Color,
    pub constellation: Color,
    pub dso: Color,
}

const DEFAULT_PALETTE: Palette = Palette {
    background: Color::rgba(1.0, 1.0, 1.0, 0.0),
    date: Color::rgba(0.0, 0.0, 0.0, 1.0),
    edge: Color::rgba(0.0, 0.0, 0.0, 1.0),
    shading: Color::rgba(0.9, 0.9, 0.9, 1.0),
    grid: Color::rgba(0.75, 0.75, 0.75, 1.0),
    stick: Color::rgba(0.25, 0.25, 0.25, 1.0),
    star: Color::rgba(0.0, 0.0, 0.0, 1.0),
    constellation: Color::rgba(0.0, 0.0, 0.0, 1.0),
    dso: Color::rgba(0.0, 0.0, 1.0, 1.0),
};

const DARK_PALETTE: Palette = Palette {
    background: Color::rgba(0.2, 0.25, 0.45, 1.0),
    date: Color::rgba(1.0, 1.0, 1.0, 1.0),
    edge: Color::rgba(0.45, 0.45, 0.45, 1.0),
    shading: Color::rgba(0.1, 0.1, 0.1, 1.0),
    grid: Color::rgba(0.3, 0.3, 0.3, 1.0),
    stick: Color::rgba(0.28, 0.35, 0.55, 1.0),
    star: Color::rgba(1.0, 1.0, 1.0, 1.0),
    constellation: Color::rgba(0.6, 0.5, 0.65, 1.0),
    dso: Color::rgba(0.0, 0.0, 1.0, 1.0),
};

impl Theme {
    /// Look a theme up by name (case-insensitive)
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_lowercase().as_str() {
            "default" | "light" => Ok(Theme::Default),
            "dark" => Ok(Theme::Dark),
            _ => Err(PlanisphereError::UnknownTheme {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::Dark => "dark",
        }
    }

    pub fn palette(&self) -> &'static Palette {
        match self {
            Theme::Default => &DEFAULT_PALETTE,
            Theme::Dark => &DARK_PALETTE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("default").unwrap(), Theme::Default);
        assert_eq!(Theme::from_name("DARK").unwrap(), Theme::Dark);
        assert!(Theme::from_name("sepia").is_err());
    }

    #[test]
    fn test_name_round_trips() {
        for theme in [Theme::Default, Theme::Dark] {
            assert_eq!(Theme::from_name(theme.name()).unwrap(), theme);
        }
    }

    #[test]
    fn test_default_background_is_transparent() {
        assert!(!Theme::Default.palette().background.is_opaque());
        assert!(Theme::Dark.palette().background.is_opaque());
    }
}
