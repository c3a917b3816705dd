//! Fact canvas widget: draws a [`Scene`] with braille edges and boxed nodes

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine},
        Block, Borders, Clear, Paragraph, Widget,
    },
};
use reframe_core::{NodeKind, Scene, SceneNode};

use crate::app::{CELL_HEIGHT, CELL_WIDTH};
use crate::ui::layout::centered_rect_fixed;
use crate::ui::theme::Theme;

/// Where a node lands in cell space after clipping to the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeCells {
    pub target: Rect,
    pub borders: Borders,
    /// Content rows and columns hidden past the top and left edges.
    pub skip_rows: u16,
    pub skip_cols: u16,
}

/// Map a node's pixel rectangle onto the cells of `area`.
pub fn node_cells(rect: &reframe_core::Rect, area: Rect) -> Option<NodeCells> {
    let left = (rect.x / CELL_WIDTH).floor() as i64;
    let right = (rect.right() / CELL_WIDTH).ceil() as i64;
    let top = (rect.y / CELL_HEIGHT).floor() as i64;
    let bottom = (rect.bottom() / CELL_HEIGHT).ceil() as i64;
    let (width, height) = (i64::from(area.width), i64::from(area.height));

    if right <= 0 || bottom <= 0 || left >= width || top >= height {
        return None;
    }

    let boxed = right - left >= 3 && bottom - top >= 3;
    let clip_left = left.max(0);
    let clip_right = right.min(width);
    let clip_top = top.max(0);
    let clip_bottom = bottom.min(height);

    let mut borders = Borders::NONE;
    let inset = if boxed {
        if left >= 0 {
            borders |= Borders::LEFT;
        }
        if right <= width {
            borders |= Borders::RIGHT;
        }
        if top >= 0 {
            borders |= Borders::TOP;
        }
        if bottom <= height {
            borders |= Borders::BOTTOM;
        }
        1
    } else {
        0
    };

    Some(NodeCells {
        target: Rect {
            x: area.x + clip_left as u16,
            y: area.y + clip_top as u16,
            width: (clip_right - clip_left) as u16,
            height: (clip_bottom - clip_top) as u16,
        },
        borders,
        skip_rows: (clip_top - (top + inset)).max(0) as u16,
        skip_cols: (clip_left - (left + inset)).max(0) as u16,
    })
}

pub struct CanvasWidget<'a> {
    scene: &'a Scene,
    theme: &'a Theme,
    empty_hint: Option<&'a str>,
}

impl<'a> CanvasWidget<'a> {
    pub fn new(scene: &'a Scene, theme: &'a Theme) -> Self {
        Self {
            scene,
            theme,
            empty_hint: None,
        }
    }

    pub fn empty_hint(mut self, hint: Option<&'a str>) -> Self {
        self.empty_hint = hint;
        self
    }

    fn render_edges(&self, area: Rect, buf: &mut Buffer) {
        let width = self.scene.surface.width;
        let height = self.scene.surface.height;
        let color = self.theme.edge;

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                for edge in &self.scene.edges {
                    for pair in edge.points.windows(2) {
                        // Canvas y grows upward.
                        ctx.draw(&CanvasLine {
                            x1: pair[0].x,
                            y1: height - pair[0].y,
                            x2: pair[1].x,
                            y2: height - pair[1].y,
                            color,
                        });
                    }
                }
            })
            .render(area, buf);
    }

    fn render_node(&self, node: &SceneNode, area: Rect, buf: &mut Buffer) {
        let Some(cells) = node_cells(&node.rect, area) else {
            return;
        };
        if cells.target.width == 0 || cells.target.height == 0 {
            return;
        }

        let color = match node.kind {
            NodeKind::Original => self.theme.original,
            NodeKind::Reframed => self.theme.reframed,
        };
        let mut block = Block::default()
            .borders(cells.borders)
            .border_style(Style::default().fg(color));
        if cells.borders.contains(Borders::TOP) {
            let title = match (&node.badge, node.kind) {
                (Some(badge), _) => Span::styled(format!(" {badge} "), self.theme.badge_style()),
                (None, NodeKind::Original) => Span::styled(" Fact ", Style::default().fg(color)),
                (None, NodeKind::Reframed) => Span::raw(""),
            };
            block = block.title(title);
        }

        let lines: Vec<Line> = node
            .lines
            .iter()
            .map(|l| Line::from(Span::styled(l.as_str(), Style::default().fg(self.theme.foreground))))
            .collect();

        Clear.render(cells.target, buf);
        Paragraph::new(lines)
            .block(block)
            .scroll((cells.skip_rows, cells.skip_cols))
            .render(cells.target, buf);
    }
}

impl Widget for CanvasWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_edges(area, buf);
        for node in &self.scene.nodes {
            self.render_node(node, area, buf);
        }

        if let (Some(hint), true) = (self.empty_hint, self.scene.nodes.is_empty()) {
            let hint_area = centered_rect_fixed(hint.chars().count() as u16, 1, area);
            Paragraph::new(Span::styled(hint, self.theme.hint_style())).render(hint_area, buf);
        }
    }
}
