//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub accent: Color,

    // Background Colors
    pub bg_dark: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ThemeColors,
}

impl Theme {
    /// Look up a theme by its configured name.
    ///
    /// Only the default palette ships today; any name resolves to it,
    /// so a stale config value never fails startup.
    pub fn from_name(_name: &str) -> Self {
        Self::default()
    }

    fn default_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(22, 163, 74),       // Green 600
            accent: Color::Rgb(250, 204, 21),       // Yellow 400

            // Background Colors
            bg_dark: Color::Rgb(15, 23, 42),        // Slate 900

            // Text Colors
            text: Color::Rgb(248, 250, 252),        // Slate 50
            text_muted: Color::Rgb(148, 163, 184),  // Slate 400
            text_dim: Color::Rgb(100, 116, 139),    // Slate 500
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .bg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn placeholder(&self) -> Style {
        Style::default().fg(self.colors.text_muted)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: Self::default_colors(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Theme;

    #[test]
    fn unknown_name_falls_back_to_default() {
        let theme = Theme::from_name("no-such-theme");
        assert_eq!(theme.colors.primary, Theme::default().colors.primary);
    }
}
