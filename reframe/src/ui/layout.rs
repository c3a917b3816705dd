//! Screen layout for the reframe TUI

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Panel width when expanded and when collapsed to its toggle.
const PANEL_WIDTH: u16 = 34;
const COLLAPSED_WIDTH: u16 = 3;

#[derive(Debug, Clone, Copy)]
pub struct AppLayout {
    pub panel: Rect,
    pub canvas: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    pub fn calculate(area: Rect, panel_collapsed: bool) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(1)])
            .split(area);

        let panel_width = if panel_collapsed {
            COLLAPSED_WIDTH
        } else {
            PANEL_WIDTH
        };
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(panel_width), Constraint::Min(10)])
            .split(rows[0]);

        Self {
            panel: columns[0],
            canvas: columns[1],
            status_bar: rows[1],
        }
    }
}

/// A rectangle of fixed size centred in `area`, shrunk to fit.
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
