//! Color theme definitions for the picker popup

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color for the selected row
    pub selection_bg: Color,
    /// Foreground color for the selected row
    pub selection_fg: Color,
    /// Color for the cursor indicator and key names
    pub cursor: Color,
    /// Color for folder names
    pub folder: Color,
    /// Color for borders
    pub border: Color,
    /// Color for dimmed/inactive text
    pub dimmed: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Create a dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            cursor: Color::Cyan,
            folder: Color::Yellow,
            border: Color::DarkGray,
            dimmed: Color::DarkGray,
        }
    }

    /// Style for the currently selected row
    #[must_use]
    pub fn selected_style(&self) -> Style {
        Style::default()
            .bg(self.selection_bg)
            .fg(self.selection_fg)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for leaf rows
    #[must_use]
    pub fn normal_style(&self) -> Style {
        Style::default()
    }

    #[must_use]
    pub fn folder_style(&self) -> Style {
        Style::default().fg(self.folder)
    }

    /// Style for the "no value" row
    #[must_use]
    pub fn null_style(&self) -> Style {
        Style::default()
            .fg(self.dimmed)
            .add_modifier(Modifier::ITALIC)
    }

    /// Style for the cursor indicator and key names
    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .fg(self.cursor)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for borders
    #[must_use]
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for dimmed text
    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }
}
