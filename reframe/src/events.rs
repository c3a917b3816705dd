//! Event handling for the reframe TUI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use reframe_core::{CanvasInput, PanDirection, ViewportStore};

use crate::app::{App, InputMode};

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

impl EventResult {
    fn redraw_if(changed: bool) -> Self {
        if changed {
            EventResult::NeedsRedraw
        } else {
            EventResult::Continue
        }
    }
}

/// Handle a terminal event
pub fn handle_event<S: ViewportStore>(app: &mut App<S>, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

/// Handle a mouse event: drag to pan, wheel to zoom at the cursor
fn handle_mouse_event<S: ViewportStore>(app: &mut App<S>, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(at) = app.cell_to_canvas(mouse.column, mouse.row) {
                app.canvas_input(CanvasInput::PointerDown(at));
            }
            EventResult::Continue
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let at = app.cell_to_canvas_unclipped(mouse.column, mouse.row);
            EventResult::redraw_if(app.canvas_input(CanvasInput::PointerMove(at)))
        }
        MouseEventKind::Up(MouseButton::Left) => {
            app.canvas_input(CanvasInput::PointerUp);
            EventResult::Continue
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            let Some(at) = app.cell_to_canvas(mouse.column, mouse.row) else {
                return EventResult::Continue;
            };
            let delta = if mouse.kind == MouseEventKind::ScrollUp {
                1.0
            } else {
                -1.0
            };
            EventResult::redraw_if(app.canvas_input(CanvasInput::Wheel { delta, at }))
        }
        _ => EventResult::Continue,
    }
}

/// Handle a key event
fn handle_key_event<S: ViewportStore>(app: &mut App<S>, key: KeyEvent) -> EventResult {
    // Global shortcuts (always work)
    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::AddLens => handle_add_lens_mode(app, key),
    }
}

fn handle_normal_mode<S: ViewportStore>(app: &mut App<S>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('q') => return EventResult::Quit,
        KeyCode::Char('?') | KeyCode::F(1) => app.show_help = !app.show_help,
        KeyCode::Esc => app.dismiss(),

        // Step 1
        KeyCode::Char('f') => app.fetch_fact(),

        // Step 2
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.apply_lens(index);
        }
        KeyCode::Enter => app.apply_selected_lens(),
        KeyCode::Char('j') | KeyCode::Tab => app.select_next_lens(),
        KeyCode::Char('k') | KeyCode::BackTab => app.select_prev_lens(),
        KeyCode::Char('a') => app.begin_add_lens(),

        // Panel
        KeyCode::Char('p') => app.session.toggle_panel(),

        // Canvas
        KeyCode::Up => return canvas(app, CanvasInput::Pan(PanDirection::Up)),
        KeyCode::Down => return canvas(app, CanvasInput::Pan(PanDirection::Down)),
        KeyCode::Left => return canvas(app, CanvasInput::Pan(PanDirection::Left)),
        KeyCode::Right => return canvas(app, CanvasInput::Pan(PanDirection::Right)),
        KeyCode::Char('+') | KeyCode::Char('=') => return canvas(app, CanvasInput::ZoomIn),
        KeyCode::Char('-') => return canvas(app, CanvasInput::ZoomOut),
        KeyCode::Char('0') => return canvas(app, CanvasInput::ZoomReset),
        KeyCode::Char('t') => return canvas(app, CanvasInput::ToggleLayout),

        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn handle_add_lens_mode<S: ViewportStore>(app: &mut App<S>, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Enter => app.submit_lens(),
        KeyCode::Esc => app.cancel_add_lens(),
        KeyCode::Backspace => app.pop_lens_char(),
        KeyCode::Char(c) => app.push_lens_char(c),
        _ => return EventResult::Continue,
    }
    EventResult::NeedsRedraw
}

fn canvas<S: ViewportStore>(app: &mut App<S>, input: CanvasInput) -> EventResult {
    EventResult::redraw_if(app.canvas_input(input))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crossterm::event::KeyEventState;
    use ratatui::layout::Rect;
    use reframe_core::{
        FactCanvas, FactService, FixedSampler, LayoutMode, MemoryStore, MockCompletion,
        ReframeSession, Size,
    };

    use super::*;

    fn app() -> App<MemoryStore> {
        let service = Arc::new(FactService::new(Arc::new(MockCompletion::default())));
        let sampler = Box::new(FixedSampler::new(["Physics", "Biology"]));
        let canvas = FactCanvas::open(MemoryStore::new(), Size::new(800.0, 480.0), LayoutMode::Radial);
        let mut app = App::new(ReframeSession::new(service, sampler, canvas));
        app.set_canvas_area(Rect::new(34, 0, 100, 30));
        app
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(handle_event(&mut app, key(KeyCode::Char('q'))), EventResult::Quit);
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&mut app, ctrl_c), EventResult::Quit);
    }

    #[test]
    fn test_fetch_queues_request_once() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('f')));
        assert!(app.session.is_busy());
        assert!(app.is_loading());

        handle_event(&mut app, key(KeyCode::Char('f')));
        assert_eq!(app.message(), Some("Wait for the current request to finish"));
    }

    #[test]
    fn test_lens_before_fact_is_rejected() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Char('1')));
        assert!(!app.session.is_busy());
        assert_eq!(app.message(), Some("Get a fact first"));

        handle_event(&mut app, key(KeyCode::Char('a')));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_zoom_keys() {
        let mut app = app();
        let result = handle_event(&mut app, key(KeyCode::Char('+')));
        assert_eq!(result, EventResult::NeedsRedraw);
        assert!((app.session.canvas().viewport().zoom() - 1.1).abs() < 1e-9);

        handle_event(&mut app, key(KeyCode::Char('0')));
        assert_eq!(app.session.canvas().viewport().zoom(), 1.0);
    }

    #[test]
    fn test_arrow_pans_canvas() {
        let mut app = app();
        handle_event(&mut app, key(KeyCode::Left));
        assert_eq!(app.session.canvas().viewport().pan().x, 20.0);
    }

    #[test]
    fn test_scroll_outside_canvas_is_ignored() {
        let mut app = app();
        let result = handle_event(&mut app, mouse(MouseEventKind::ScrollUp, 2, 2));
        assert_eq!(result, EventResult::Continue);
        assert_eq!(app.session.canvas().viewport().zoom(), 1.0);

        let result = handle_event(&mut app, mouse(MouseEventKind::ScrollUp, 60, 10));
        assert_eq!(result, EventResult::NeedsRedraw);
        assert!(app.session.canvas().viewport().zoom() > 1.0);
    }

    #[test]
    fn test_drag_pans_canvas() {
        let mut app = app();
        handle_event(&mut app, mouse(MouseEventKind::Down(MouseButton::Left), 50, 10));
        handle_event(&mut app, mouse(MouseEventKind::Drag(MouseButton::Left), 52, 11));
        handle_event(&mut app, mouse(MouseEventKind::Up(MouseButton::Left), 52, 11));

        let pan = app.session.canvas().viewport().pan();
        assert_eq!((pan.x, pan.y), (16.0, 16.0));
        assert!(!app.session.canvas().is_dragging());
    }
}
