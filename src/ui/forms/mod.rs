//! Form rendering module
//!
//! - `field_renderer`: one bordered field per kind
//! - `step_form`: the active wizard step with its action panel

mod field_renderer;
mod step_form;

pub use step_form::draw_step;
