//! Theme management.
//!
//! Each theme names the handful of color roles the renderer uses. Themes
//! are selected by name from configuration.

use ratatui::style::Color;

/// An RGB color slot resolvable to a terminal color.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeColor(pub u8, pub u8, pub u8);

impl ThemeColor {
    pub fn to_color(self) -> Color {
        Color::Rgb(self.0, self.1, self.2)
    }
}

/// Color roles used across the interface.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub primary: ThemeColor,
    pub text: ThemeColor,
    pub text_dim: ThemeColor,
    pub border_normal: ThemeColor,
    pub border_active: ThemeColor,
    pub highlight: ThemeColor,
    pub warning: ThemeColor,
    pub danger: ThemeColor,
    pub success: ThemeColor,
}

impl Default for Theme {
    fn default() -> Theme {
        Theme::slate()
    }
}

impl Theme {
    fn slate() -> Theme {
        Theme {
            name: "slate".to_string(),
            primary: ThemeColor(122, 162, 247),
            text: ThemeColor(192, 202, 245),
            text_dim: ThemeColor(86, 95, 137),
            border_normal: ThemeColor(59, 66, 97),
            border_active: ThemeColor(122, 162, 247),
            highlight: ThemeColor(41, 46, 66),
            warning: ThemeColor(224, 175, 104),
            danger: ThemeColor(247, 118, 142),
            success: ThemeColor(158, 206, 106),
        }
    }

    fn paper() -> Theme {
        Theme {
            name: "paper".to_string(),
            primary: ThemeColor(42, 101, 158),
            text: ThemeColor(56, 58, 66),
            text_dim: ThemeColor(160, 161, 167),
            border_normal: ThemeColor(200, 200, 200),
            border_active: ThemeColor(42, 101, 158),
            highlight: ThemeColor(229, 229, 230),
            warning: ThemeColor(152, 104, 1),
            danger: ThemeColor(202, 18, 67),
            success: ThemeColor(80, 161, 79),
        }
    }

    fn midnight() -> Theme {
        Theme {
            name: "midnight".to_string(),
            primary: ThemeColor(137, 180, 250),
            text: ThemeColor(205, 214, 244),
            text_dim: ThemeColor(108, 112, 134),
            border_normal: ThemeColor(49, 50, 68),
            border_active: ThemeColor(137, 180, 250),
            highlight: ThemeColor(30, 30, 46),
            warning: ThemeColor(249, 226, 175),
            danger: ThemeColor(243, 139, 168),
            success: ThemeColor(166, 227, 161),
        }
    }

    /// Return the names of all built-in themes.
    ///
    pub fn available_themes() -> Vec<String> {
        vec![
            "slate".to_string(),
            "paper".to_string(),
            "midnight".to_string(),
        ]
    }

    /// Return the theme with the given name, if it exists.
    ///
    pub fn from_name(name: &str) -> Option<Theme> {
        match name {
            "slate" => Some(Theme::slate()),
            "paper" => Some(Theme::paper()),
            "midnight" => Some(Theme::midnight()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_theme_resolves() {
        for name in Theme::available_themes() {
            let theme = Theme::from_name(&name).unwrap();
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn unknown_theme_is_none() {
        assert!(Theme::from_name("solarized-disco").is_none());
    }

    #[test]
    fn theme_color_resolves_to_rgb() {
        let color = ThemeColor(1, 2, 3);
        assert_eq!(color.to_color(), Color::Rgb(1, 2, 3));
    }
}
