//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod success;

use crate::app::App;
use crate::state::View;
use components::render_error_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (header_area, main_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);

    match app.state.current_view {
        View::Wizard => forms::draw_step(frame, main_area, app),
        View::Success => success::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Error dialog is modal and drawn last
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
