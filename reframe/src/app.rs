//! Main application state and logic

use ratatui::layout::Rect;
use reframe_core::{
    Action, CanvasInput, Point, ReframeSession, Size, Status, ViewportStore,
};

use crate::ui::theme::Theme;

/// Width and height of one terminal cell in canvas pixels.
pub const CELL_WIDTH: f64 = 8.0;
pub const CELL_HEIGHT: f64 = 16.0;

/// Input modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Hotkeys drive the panel and canvas
    #[default]
    Normal,
    /// Typing the name of a new lens
    AddLens,
}

/// Main application state
pub struct App<S: ViewportStore> {
    pub session: ReframeSession<S>,
    pub theme: Theme,

    pub input_mode: InputMode,
    lens_input: String,
    pub selected_lens: usize,

    /// Screen area the canvas was last drawn into.
    pub canvas_area: Rect,
    pub show_help: bool,
    pub pending_api_check: bool,
    message: Option<String>,
}

impl<S: ViewportStore> App<S> {
    pub fn new(session: ReframeSession<S>) -> Self {
        Self {
            session,
            theme: Theme::default(),
            input_mode: InputMode::Normal,
            lens_input: String::new(),
            selected_lens: 0,
            canvas_area: Rect::default(),
            show_help: false,
            pending_api_check: false,
            message: None,
        }
    }

    pub fn with_api_check(mut self, enabled: bool) -> Self {
        self.pending_api_check = enabled;
        self
    }

    /// Transient hint shown in the status bar.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn lens_input(&self) -> &str {
        &self.lens_input
    }

    /// Record where the canvas is drawn and resize the canvas surface to match.
    pub fn set_canvas_area(&mut self, area: Rect) {
        self.canvas_area = area;
        let surface = Size::new(
            f64::from(area.width) * CELL_WIDTH,
            f64::from(area.height) * CELL_HEIGHT,
        );
        self.session.canvas_mut().set_surface(surface);
    }

    /// Centre of a terminal cell in canvas pixels, if the cell is on the canvas.
    pub fn cell_to_canvas(&self, column: u16, row: u16) -> Option<Point> {
        let area = self.canvas_area;
        let inside = column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height;
        inside.then(|| cell_center(column - area.x, row - area.y))
    }

    /// Pixel position of a cell relative to the canvas, even outside it (for drags).
    pub fn cell_to_canvas_unclipped(&self, column: u16, row: u16) -> Point {
        let x = (f64::from(column) - f64::from(self.canvas_area.x) + 0.5) * CELL_WIDTH;
        let y = (f64::from(row) - f64::from(self.canvas_area.y) + 0.5) * CELL_HEIGHT;
        Point::new(x, y)
    }

    pub fn canvas_input(&mut self, input: CanvasInput) -> bool {
        self.session.canvas_mut().handle(input)
    }

    pub fn fetch_fact(&mut self) {
        self.clear_message();
        if !self.session.request(Action::FetchFact) {
            self.set_message("Wait for the current request to finish");
        }
    }

    /// Apply the lens at `index` in the lens list.
    pub fn apply_lens(&mut self, index: usize) {
        self.clear_message();
        let Some(lens) = self.session.lenses().get(index).cloned() else {
            return;
        };
        self.selected_lens = index;
        if !self.session.lenses_enabled() {
            self.set_message("Get a fact first");
            return;
        }
        if !self.session.request(Action::ApplyLens(lens)) {
            self.set_message("Wait for the current request to finish");
        }
    }

    pub fn apply_selected_lens(&mut self) {
        self.apply_lens(self.selected_lens);
    }

    pub fn select_next_lens(&mut self) {
        let count = self.session.lenses().len();
        if count > 0 {
            self.selected_lens = (self.selected_lens + 1) % count;
        }
    }

    pub fn select_prev_lens(&mut self) {
        let count = self.session.lenses().len();
        if count > 0 {
            self.selected_lens = (self.selected_lens + count - 1) % count;
        }
    }

    pub fn begin_add_lens(&mut self) {
        if !self.session.lenses_enabled() {
            self.set_message("Get a fact first");
            return;
        }
        self.input_mode = InputMode::AddLens;
        self.lens_input.clear();
    }

    pub fn push_lens_char(&mut self, c: char) {
        self.lens_input.push(c);
    }

    pub fn pop_lens_char(&mut self) {
        self.lens_input.pop();
    }

    pub fn cancel_add_lens(&mut self) {
        self.input_mode = InputMode::Normal;
        self.lens_input.clear();
    }

    pub fn submit_lens(&mut self) {
        let name = std::mem::take(&mut self.lens_input);
        self.input_mode = InputMode::Normal;
        match self.session.add_lens(&name) {
            Ok(()) => {
                self.selected_lens = self.session.lenses().len() - 1;
                self.set_message(format!("Added lens {}", name.trim()));
            }
            Err(_) => self.set_message("Lens names must be new and not blank"),
        }
    }

    /// Esc in normal mode: close help, then dismiss errors.
    pub fn dismiss(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else {
            self.session.clear_error();
            self.clear_message();
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.session.status(), Status::Loading(_))
    }
}

/// Centre of the cell at (`column`, `row`) in canvas pixels.
pub fn cell_center(column: u16, row: u16) -> Point {
    Point::new(
        (f64::from(column) + 0.5) * CELL_WIDTH,
        (f64::from(row) + 0.5) * CELL_HEIGHT,
    )
}
