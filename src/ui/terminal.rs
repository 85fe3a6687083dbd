//! Ratatui-based picker popup
//!
//! Draws a [`Picker`] session on the alternate screen of stderr, leaving
//! stdout free for the picked value, and feeds translated terminal events
//! into the session until it finishes.

use super::error::{Result, UiError};
use super::events::KeyMap;
use super::layout::{PopupContent, ROW_CHROME, SEARCH_BAR_HEIGHT, popup_area};
use super::theme::Theme;
use super::widgets::{
    HelpBar, KeyHint, RowView, SearchBar, TypeTree, TypeTreeState, hints_for, row_views,
};
use crate::config::PickConfig;
use crate::keybinds::KeybindConfig;
use crate::picker::{KeyOutcome, Mode, Picker, SessionOutcome};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    text::Span,
    widgets::{Block, Borders, Clear, StatefulWidget, Widget},
};
use std::io::{self, IsTerminal, Stderr};
use std::time::Duration;
use tracing::{debug, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// The whole popup for one frame
pub struct PickerView<'a, V> {
    picker: &'a Picker<V>,
    theme: &'a Theme,
    hints: &'a [KeyHint],
    max_height_ratio: f32,
}

impl<'a, V> PickerView<'a, V> {
    #[must_use]
    pub const fn new(
        picker: &'a Picker<V>,
        theme: &'a Theme,
        hints: &'a [KeyHint],
        max_height_ratio: f32,
    ) -> Self {
        Self {
            picker,
            theme,
            hints,
            max_height_ratio,
        }
    }

    fn title(&self, rows: &[RowView]) -> String {
        match self.picker.mode() {
            Mode::Browsing => " Types ".to_string(),
            Mode::Searching => format!(" {} matches ", rows.len()),
        }
    }
}

impl<V> StatefulWidget for PickerView<'_, V> {
    type State = TypeTreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let rows = row_views(self.picker);
        let hints_width = self
            .hints
            .iter()
            .map(|h| h.key.chars().count() + h.action.chars().count() + 3)
            .sum::<usize>()
            .saturating_sub(2 + usize::from(ROW_CHROME));
        let widest = rows
            .iter()
            .map(RowView::width)
            .max()
            .unwrap_or(0)
            .max(hints_width);
        let search_bar = self.picker.search_enabled();
        let popup = popup_area(
            area,
            PopupContent {
                widest_row: u16::try_from(widest).unwrap_or(u16::MAX),
                rows: rows.len(),
                search_bar,
            },
            self.max_height_ratio,
        );

        Clear.render(popup, buf);

        let mut constraints = Vec::with_capacity(3);
        if search_bar {
            constraints.push(Constraint::Length(SEARCH_BAR_HEIGHT));
        }
        constraints.push(Constraint::Min(1));
        constraints.push(Constraint::Length(1));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(popup);
        let (list_area, help_area) = (chunks[chunks.len() - 2], chunks[chunks.len() - 1]);

        if search_bar {
            SearchBar::new(self.picker.query(), self.theme).render(chunks[0], buf);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(Span::styled(self.title(&rows), self.theme.cursor_style()));
        TypeTree::new(&rows, self.picker.selected_row(), self.theme)
            .block(block)
            .render(list_area, buf, state);

        HelpBar::new(self.hints, self.theme).render(help_area, buf);
    }
}

/// Interactive picker on the terminal
#[derive(Debug)]
pub struct TerminalPicker {
    keymap: KeyMap,
    hints: Vec<KeyHint>,
    theme: Theme,
    max_height_ratio: f32,
}

impl TerminalPicker {
    /// Create a picker with the given keybinds
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidKeybind`] for an unparsable key string.
    pub fn new(keybinds: &KeybindConfig, max_height_ratio: f32) -> Result<Self> {
        Ok(Self {
            keymap: KeyMap::from_config(keybinds)?,
            hints: hints_for(keybinds),
            theme: Theme::default(),
            max_height_ratio,
        })
    }

    /// Create a picker from application configuration
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidKeybind`] for an unparsable key string.
    pub fn from_config(config: &PickConfig) -> Result<Self> {
        Self::new(&config.keybinds, config.max_height_ratio)
    }

    /// Popup widget for the current session state
    #[must_use]
    pub fn view<'a, V>(&'a self, picker: &'a Picker<V>) -> PickerView<'a, V> {
        PickerView::new(picker, &self.theme, &self.hints, self.max_height_ratio)
    }

    /// Feed one terminal event into the session
    ///
    /// Returns the outcome once the session has finished.
    pub fn step<V: Clone>(&self, picker: &mut Picker<V>, event: &Event) -> Option<SessionOutcome<V>> {
        let key = self.keymap.translate(event)?;
        match picker.handle_key(key) {
            KeyOutcome::Finalized(value) => Some(SessionOutcome::Finalized(value)),
            KeyOutcome::Cancelled => Some(SessionOutcome::Cancelled),
            KeyOutcome::Continue | KeyOutcome::QueryChanged | KeyOutcome::Ignored => None,
        }
    }

    /// Run the session until it finalizes or is cancelled
    ///
    /// # Errors
    ///
    /// Returns [`UiError::NotATerminal`] when stderr is not a terminal, or
    /// [`UiError::IoError`] if drawing or reading events fails.
    pub fn run<V: Clone>(&self, picker: &mut Picker<V>) -> Result<SessionOutcome<V>> {
        if !io::stderr().is_terminal() {
            return Err(UiError::NotATerminal);
        }

        let mut terminal = Self::setup_terminal()?;
        let result = self.run_loop(&mut terminal, picker);

        // Cleanup terminal (always, even on error)
        if let Err(e) = Self::cleanup_terminal() {
            warn!("terminal cleanup failed: {e}");
        }

        result
    }

    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        enable_raw_mode()?;
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stderr);
        Terminal::new(backend).map_err(Into::into)
    }

    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stderr(), DisableMouseCapture, LeaveAlternateScreen)?;
        Ok(())
    }

    fn run_loop<V: Clone>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        picker: &mut Picker<V>,
    ) -> Result<SessionOutcome<V>> {
        let mut view_state = TypeTreeState::default();

        loop {
            terminal.draw(|frame| {
                frame.render_stateful_widget(self.view(picker), frame.area(), &mut view_state);
            })?;

            if !event::poll(POLL_INTERVAL)? {
                continue;
            }

            let event = event::read()?;
            if let Some(outcome) = self.step(picker, &event) {
                debug!("session ended");
                return Ok(outcome);
            }
        }
    }
}
