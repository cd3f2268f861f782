//! UI module
//!
//! Provides all TUI rendering functionality.

mod form;
mod help;
mod hosts;
mod layout;
pub mod theme;

use ratatui::Frame;

use crate::app::App;

pub use layout::{footer_hints, list_area};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    layout::draw(frame, app);
}
