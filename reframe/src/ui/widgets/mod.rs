//! TUI widgets for the reframer

pub mod canvas;
pub mod panel;
pub mod status_bar;

pub use canvas::CanvasWidget;
pub use panel::PanelWidget;
pub use status_bar::StatusBarWidget;
