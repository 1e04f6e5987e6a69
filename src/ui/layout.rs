use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub const CARD_WIDTH: u16 = 44;

/// Regions inside the counter card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRegions {
    pub value: Rect,
    pub banner: Rect,
    pub decrement: Rect,
    pub increment: Rect,
    pub refresh: Rect,
    pub hints: Rect,
}

/// Card height including borders; grows by the banner when an error shows.
pub fn card_height(show_banner: bool) -> u16 {
    let banner = if show_banner { 3 } else { 0 };
    2 + 5 + banner + 3 + 3 + 1
}

pub fn card_regions(inner: Rect, show_banner: bool) -> CardRegions {
    let banner_height = if show_banner { 3 } else { 0 };
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(banner_height),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    CardRegions {
        value: rows[0],
        banner: rows[1],
        decrement: buttons[0],
        increment: buttons[1],
        refresh: rows[3],
        hints: rows[4],
    }
}

/// Rectangle of `width` x `height` centered in `area`, clipped to it.
pub fn centered_rect_by_size(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
