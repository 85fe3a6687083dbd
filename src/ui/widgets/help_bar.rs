//! Help bar widget for displaying keybind hints

use crate::keybinds::{KeybindConfig, PickerAction};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "enter", "up/down")
    pub key: String,
    /// Action description (e.g., "pick", "cancel")
    pub action: String,
}

impl KeyHint {
    /// Create a new key hint
    #[must_use]
    pub fn new(key: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            action: action.into(),
        }
    }
}

/// Hints for the configured keys
///
/// Paired actions share one hint; disabled actions are left out.
#[must_use]
pub fn hints_for(config: &KeybindConfig) -> Vec<KeyHint> {
    let first = |action: PickerAction| config.get(action).into_iter().next();
    let groups = [
        (PickerAction::MoveUp, Some(PickerAction::MoveDown), "move"),
        (PickerAction::Collapse, Some(PickerAction::Expand), "fold"),
        (PickerAction::Confirm, None, "pick"),
        (PickerAction::Cancel, None, "cancel"),
    ];

    groups
        .into_iter()
        .filter_map(|(action, pair, label)| {
            let key = match (first(action), pair.and_then(first)) {
                (Some(a), Some(b)) => format!("{a}/{b}"),
                (Some(a), None) | (None, Some(a)) => a,
                (None, None) => return None,
            };
            Some(KeyHint::new(key, label))
        })
        .collect()
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    /// Create a new help bar widget
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key.as_str(), self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action.as_str()));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
