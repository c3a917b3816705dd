//! Control panel: the two steps, the lens list and the request status

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use reframe_core::{Status, Step};

use crate::app::InputMode;
use crate::ui::theme::Theme;

pub struct PanelWidget<'a> {
    step: Step,
    lenses: &'a [String],
    selected: usize,
    enabled: bool,
    collapsed: bool,
    status: &'a Status,
    api_status: Option<&'a str>,
    input_mode: InputMode,
    lens_input: &'a str,
    theme: &'a Theme,
}

impl<'a> PanelWidget<'a> {
    pub fn new(step: Step, lenses: &'a [String], status: &'a Status, theme: &'a Theme) -> Self {
        Self {
            step,
            lenses,
            selected: 0,
            enabled: step == Step::PickLens,
            collapsed: false,
            status,
            api_status: None,
            input_mode: InputMode::Normal,
            lens_input: "",
            theme,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected = index;
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn api_status(mut self, api_status: Option<&'a str>) -> Self {
        self.api_status = api_status;
        self
    }

    pub fn input(mut self, mode: InputMode, text: &'a str) -> Self {
        self.input_mode = mode;
        self.lens_input = text;
        self
    }

    fn step_line(&self, step: Step) -> Line<'a> {
        Line::from(Span::styled(
            format!("{} {}", step.number(), step.title()),
            self.theme.step_style(self.step == step),
        ))
    }

    fn lens_lines(&self) -> Vec<Line<'a>> {
        let busy = matches!(self.status, Status::Loading(_));
        let mut lines: Vec<Line> = self
            .lenses
            .iter()
            .enumerate()
            .map(|(i, lens)| {
                let key = if i < 9 {
                    format!("  {} ", i + 1)
                } else {
                    "  · ".to_string()
                };
                let style = self
                    .theme
                    .lens_style(self.enabled && !busy, i == self.selected);
                Line::from(vec![
                    Span::styled(key, self.theme.hint_style()),
                    Span::styled(lens.clone(), style),
                ])
            })
            .collect();

        if self.input_mode == InputMode::AddLens {
            lines.push(Line::from(vec![
                Span::styled("  > ", self.theme.step_style(true)),
                Span::raw(self.lens_input.to_string()),
                Span::styled(" ", Style::default().add_modifier(Modifier::REVERSED)),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                "  [a] Add lens",
                self.theme.lens_style(self.enabled, false).add_modifier(Modifier::DIM),
            )));
        }
        lines
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.collapsed {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(self.theme.border_style(false));
            Paragraph::new(Span::styled("»", self.theme.hint_style()))
                .block(block)
                .render(area, buf);
            return;
        }

        let block = Block::default()
            .title(Span::styled(" Fact Reframer ", self.theme.title_style()))
            .borders(Borders::ALL)
            .border_style(self.theme.border_style(true));

        let mut lines = vec![
            self.step_line(Step::GetFact),
            Line::from(Span::styled(
                "  [f] Get a new fact",
                Style::default().fg(self.theme.lens),
            )),
            Line::from(""),
            self.step_line(Step::PickLens),
        ];
        lines.extend(self.lens_lines());
        lines.push(Line::from(""));

        match self.status {
            Status::Idle => {}
            Status::Loading(message) => {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    self.theme.loading_style(),
                )));
            }
            Status::Error(message) => {
                lines.push(Line::from(Span::styled(
                    message.clone(),
                    self.theme.error_style(),
                )));
                lines.push(Line::from(Span::styled(
                    "Esc to dismiss",
                    self.theme.hint_style(),
                )));
            }
        }
        if let Some(api) = self.api_status {
            lines.push(Line::from(Span::styled(api.to_string(), self.theme.info_style())));
        }

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
