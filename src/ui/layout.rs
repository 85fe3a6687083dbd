//! Popup sizing and placement

use ratatui::layout::Rect;

/// Narrowest popup, in columns
pub const MIN_WIDTH: u16 = 30;

/// Shortest popup, in lines
pub const MIN_HEIGHT: u16 = 5;

/// Columns around a row label: two borders and the two-column marker
pub const ROW_CHROME: u16 = 4;

/// Lines taken by the search bar block
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Lines around the list: two borders and the hint bar
pub const LIST_CHROME: u16 = 3;

/// Content to fit into the popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupContent {
    /// Display width of the widest row, indentation included
    pub widest_row: u16,
    pub rows: usize,
    pub search_bar: bool,
}

/// Size the popup to its content and place it on `screen`
///
/// The popup is centred horizontally and its top edge sits a third of the
/// way down the free space, so short lists stay near the top.
#[must_use]
pub fn popup_area(screen: Rect, content: PopupContent, max_height_ratio: f32) -> Rect {
    let width = content
        .widest_row
        .saturating_add(ROW_CHROME)
        .max(MIN_WIDTH)
        .min(screen.width);

    let chrome = LIST_CHROME + if content.search_bar { SEARCH_BAR_HEIGHT } else { 0 };
    let wanted = u16::try_from(content.rows)
        .unwrap_or(u16::MAX)
        .max(1)
        .saturating_add(chrome);
    let ratio = max_height_ratio.clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cap = (f32::from(screen.height) * ratio) as u16;
    let height = wanted.min(cap.max(MIN_HEIGHT)).max(MIN_HEIGHT).min(screen.height);

    let x = screen.x + (screen.width - width) / 2;
    let y = screen.y + (screen.height - height) / 3;
    Rect::new(x, y, width, height)
}
