//! Color theme and styling for the reframe TUI

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Canvas
    pub original: Color,
    pub reframed: Color,
    pub badge: Color,
    pub edge: Color,

    // Panel
    pub step: Color,
    pub lens: Color,
    pub disabled: Color,
    pub error: Color,
    pub loading: Color,
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            // #FFFACD and #E6E6FA on the web canvas
            original: Color::LightYellow,
            reframed: Color::LightMagenta,
            badge: Color::LightBlue,
            edge: Color::Gray,

            step: Color::Cyan,
            lens: Color::White,
            disabled: Color::DarkGray,
            error: Color::LightRed,
            loading: Color::Yellow,
            info: Color::Green,
        }
    }
}

impl Theme {
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.foreground)
            .add_modifier(Modifier::BOLD)
    }

    pub fn step_style(&self, active: bool) -> Style {
        let style = Style::default().fg(self.step);
        if active {
            style.add_modifier(Modifier::BOLD)
        } else {
            style.add_modifier(Modifier::DIM)
        }
    }

    pub fn lens_style(&self, enabled: bool, selected: bool) -> Style {
        if !enabled {
            return Style::default().fg(self.disabled);
        }
        let style = Style::default().fg(self.lens);
        if selected {
            style.add_modifier(Modifier::REVERSED | Modifier::BOLD)
        } else {
            style
        }
    }

    pub fn badge_style(&self) -> Style {
        Style::default()
            .fg(self.badge)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    pub fn loading_style(&self) -> Style {
        Style::default()
            .fg(self.loading)
            .add_modifier(Modifier::SLOW_BLINK)
    }

    pub fn info_style(&self) -> Style {
        Style::default().fg(self.info).add_modifier(Modifier::DIM)
    }

    pub fn hint_style(&self) -> Style {
        Style::default()
            .fg(self.disabled)
            .add_modifier(Modifier::DIM)
    }
}
