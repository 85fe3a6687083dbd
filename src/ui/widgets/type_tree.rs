//! Type tree widget: the browsing tree or the ranked search list

use crate::picker::{Mode, Picker};
use crate::tree::Selection;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, StatefulWidget, Widget},
};

/// What a row shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Null,
    Folder { expanded: bool },
    Leaf,
}

/// A row of the picker, resolved to display text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub label: String,
    pub depth: usize,
    pub kind: RowKind,
}

impl RowView {
    /// Columns taken by indentation, marker and label
    #[must_use]
    pub fn width(&self) -> usize {
        self.depth * 2 + 2 + self.label.chars().count()
    }
}

/// Resolve the picker's current rows
///
/// Search results show their full path, since siblings from different
/// folders can share a name.
#[must_use]
pub fn row_views<V>(picker: &Picker<V>) -> Vec<RowView> {
    let tree = picker.tree();
    picker
        .rows()
        .into_iter()
        .filter_map(|row| {
            let (label, kind) = match row.target {
                Selection::None => return None,
                Selection::Null => (tree.null_label().unwrap_or_default().to_string(), RowKind::Null),
                Selection::Node(id) if tree.is_folder(id) => (
                    tree.node(id).name().to_string(),
                    RowKind::Folder {
                        expanded: tree.is_expanded(id),
                    },
                ),
                Selection::Node(id) if picker.mode() == Mode::Searching => {
                    (tree.path_of(id), RowKind::Leaf)
                }
                Selection::Node(id) => (tree.node(id).name().to_string(), RowKind::Leaf),
            };
            Some(RowView {
                label,
                depth: row.depth,
                kind,
            })
        })
        .collect()
}

/// Scroll position kept between frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeTreeState {
    pub scroll_offset: usize,
}

/// Type tree widget for rendering
pub struct TypeTree<'a> {
    rows: &'a [RowView],
    selected: Option<usize>,
    theme: &'a Theme,
    block: Option<Block<'a>>,
    empty_text: &'a str,
}

impl<'a> TypeTree<'a> {
    #[must_use]
    pub const fn new(rows: &'a [RowView], selected: Option<usize>, theme: &'a Theme) -> Self {
        Self {
            rows,
            selected,
            theme,
            block: None,
            empty_text: "No matches",
        }
    }

    /// Set border block
    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    fn marker(kind: RowKind) -> &'static str {
        match kind {
            RowKind::Folder { expanded: true } => "▾ ",
            RowKind::Folder { expanded: false } => "▸ ",
            RowKind::Null | RowKind::Leaf => "  ",
        }
    }

    fn label_style(&self, kind: RowKind) -> Style {
        match kind {
            RowKind::Null => self.theme.null_style(),
            RowKind::Folder { .. } => self.theme.folder_style(),
            RowKind::Leaf => self.theme.normal_style(),
        }
    }
}

impl StatefulWidget for TypeTree<'_> {
    type State = TypeTreeState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let area = self.block.as_ref().map_or(area, |b| {
            let inner = b.inner(area);
            b.clone().render(area, buf);
            inner
        });

        if area.height == 0 {
            return;
        }

        if self.rows.is_empty() {
            let line = Line::from(Span::styled(self.empty_text, self.theme.dimmed_style()));
            buf.set_line(area.x, area.y, &line, area.width);
            return;
        }

        let visible_height = area.height as usize;

        // Adjust scroll offset to keep selected row visible
        if let Some(selected) = self.selected {
            if selected < state.scroll_offset {
                state.scroll_offset = selected;
            } else if selected >= state.scroll_offset + visible_height {
                state.scroll_offset = selected + 1 - visible_height;
            }
        }
        state.scroll_offset = state
            .scroll_offset
            .min(self.rows.len().saturating_sub(visible_height));

        let start = state.scroll_offset;
        let end = (start + visible_height).min(self.rows.len());

        for (y, (index, row)) in (area.y..).zip(self.rows[start..end].iter().enumerate()) {
            let is_selected = self.selected == Some(start + index);
            let label_style = if is_selected {
                self.theme.selected_style()
            } else {
                self.label_style(row.kind)
            };

            let line = Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(Self::marker(row.kind), self.theme.cursor_style()),
                Span::styled(row.label.as_str(), label_style),
            ]);
            buf.set_line(area.x, y, &line, area.width);
        }
    }
}
