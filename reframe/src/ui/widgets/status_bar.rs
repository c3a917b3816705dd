//! Status bar: zoom, layout mode, messages and key hints

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use reframe_core::LayoutMode;

use crate::app::InputMode;
use crate::ui::theme::Theme;

pub struct StatusBarWidget<'a> {
    zoom_label: &'a str,
    mode: LayoutMode,
    input_mode: InputMode,
    message: Option<&'a str>,
    theme: &'a Theme,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(zoom_label: &'a str, mode: LayoutMode, theme: &'a Theme) -> Self {
        Self {
            zoom_label,
            mode,
            input_mode: InputMode::Normal,
            message: None,
            theme,
        }
    }

    pub fn input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }

    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let hints = match self.input_mode {
            InputMode::Normal => "f fact  1-9 lens  t layout  +/- zoom  0 reset  ? help  q quit",
            InputMode::AddLens => "Enter add  Esc cancel",
        };

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.zoom_label),
                Style::default()
                    .fg(self.theme.foreground)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("| "),
            Span::styled(self.mode.to_string(), Style::default().fg(self.theme.step)),
            Span::raw(" | "),
        ];
        match self.message {
            Some(message) => spans.push(Span::styled(message, self.theme.info_style())),
            None => spans.push(Span::styled(hints, self.theme.hint_style())),
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
