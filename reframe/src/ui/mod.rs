//! UI module for the reframe TUI

pub mod layout;
pub mod render;
pub mod theme;
pub mod widgets;
