//! Theme system for the TUI.
//!
//! Provides semantic color roles that map to ratatui `Style` values.
//! The `ThemeVariant` enum selects between Dark and Light palettes.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Cycle to the next variant: Dark → Light → Dark.
    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete color palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Recipe list --
    pub recipe_title: Style,
    pub recipe_selected: Style,
    pub recipe_description: Style,
    pub recipe_like: Style,
    pub recipe_like_active: Style,

    // -- Ranking panel --
    pub ranking_heading: Style,
    pub ranking_rank: Style,
    pub ranking_ingredients: Style,
    pub ranking_likes: Style,

    // -- Account view --
    pub account_label: Style,
    pub account_value: Style,
    pub account_invalid: Style,
    pub account_ok: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub section_heading: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            recipe_title: Style::default().add_modifier(Modifier::BOLD),
            recipe_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            recipe_description: Style::default().fg(Color::Gray),
            recipe_like: Style::default().fg(Color::DarkGray),
            recipe_like_active: Style::default().fg(Color::Red),

            ranking_heading: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            ranking_rank: Style::default().fg(Color::Yellow),
            ranking_ingredients: Style::default().fg(Color::Gray),
            ranking_likes: Style::default().fg(Color::Red),

            account_label: Style::default().add_modifier(Modifier::BOLD),
            account_value: Style::default(),
            account_invalid: Style::default().fg(Color::Red),
            account_ok: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            section_heading: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }

    fn light() -> Self {
        Self {
            recipe_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            recipe_selected: Style::default().bg(Color::LightBlue).fg(Color::Black),
            recipe_description: Style::default().fg(Color::DarkGray),
            recipe_like: Style::default().fg(Color::Gray),
            recipe_like_active: Style::default().fg(Color::Red),

            ranking_heading: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            ranking_rank: Style::default().fg(Color::Magenta),
            ranking_ingredients: Style::default().fg(Color::DarkGray),
            ranking_likes: Style::default().fg(Color::Red),

            account_label: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            account_value: Style::default().fg(Color::Black),
            account_invalid: Style::default().fg(Color::Red),
            account_ok: Style::default().fg(Color::Green),

            status_bar: Style::default().bg(Color::Gray).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            section_heading: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_names_parse_case_insensitively() {
        assert_eq!(ThemeVariant::from_str_name("dark"), Some(ThemeVariant::Dark));
        assert_eq!(
            ThemeVariant::from_str_name("Light"),
            Some(ThemeVariant::Light)
        );
        assert_eq!(ThemeVariant::from_str_name("solarized"), None);
    }

    #[test]
    fn test_cycle_round_trips() {
        let v = ThemeVariant::Dark;
        assert_eq!(v.next().next(), v);
    }

    #[test]
    fn test_palettes_differ() {
        let dark = ThemeVariant::Dark.palette();
        let light = ThemeVariant::Light.palette();
        assert_ne!(format!("{:?}", dark), format!("{:?}", light));
    }
}
