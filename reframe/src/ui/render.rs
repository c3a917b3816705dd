//! Render orchestration for the reframe TUI

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use reframe_core::{MonospaceMeasure, ViewportStore};

use crate::app::{App, CELL_WIDTH};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{CanvasWidget, PanelWidget, StatusBarWidget};

/// Main render function
pub fn render<S: ViewportStore>(frame: &mut Frame, app: &App<S>) {
    let area = frame.area();
    let layout = AppLayout::calculate(area, app.session.is_collapsed());

    let scene = app
        .session
        .canvas()
        .scene(&MonospaceMeasure::new(CELL_WIDTH));
    let hint = app
        .session
        .canvas()
        .graph()
        .is_empty()
        .then_some("Press f to get a fact");
    frame.render_widget(
        CanvasWidget::new(&scene, &app.theme).empty_hint(hint),
        layout.canvas,
    );

    let panel = PanelWidget::new(
        app.session.step(),
        app.session.lenses(),
        app.session.status(),
        &app.theme,
    )
    .selected(app.selected_lens)
    .enabled(app.session.lenses_enabled())
    .collapsed(app.session.is_collapsed())
    .api_status(app.session.api_status())
    .input(app.input_mode, app.lens_input());
    frame.render_widget(panel, layout.panel);

    let status = StatusBarWidget::new(&scene.zoom_label, scene.mode, &app.theme)
        .input_mode(app.input_mode)
        .message(app.message());
    frame.render_widget(status, layout.status_bar);

    if app.show_help {
        render_help_overlay(frame, app, area);
    }
}

fn section(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))
}

fn render_help_overlay<S: ViewportStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let popup_area = centered_rect_fixed(52, 24, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(Span::styled(
            " Fact Reframer - Help ",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Facts:"),
        Line::from("  f            Get a new fact (clears the canvas)"),
        Line::from("  1-9          Reframe through a lens"),
        Line::from("  j/k, Tab     Select lens, Enter to apply"),
        Line::from("  a            Add a custom lens"),
        Line::from(""),
        section("Canvas:"),
        Line::from("  Drag         Pan"),
        Line::from("  Wheel        Zoom at the cursor"),
        Line::from("  Arrows       Pan by 20px"),
        Line::from("  + / -        Zoom in / out"),
        Line::from("  0            Reset view"),
        Line::from("  t            Toggle radial / stacked layout"),
        Line::from(""),
        section("Other:"),
        Line::from("  p            Collapse the panel"),
        Line::from("  Esc          Dismiss error or help"),
        Line::from("  q            Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or ? to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}
