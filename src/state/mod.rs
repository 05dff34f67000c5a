//! Application state module

mod app_state;
mod forms;
mod reset_timer;
mod wizard;

pub use app_state::*;
pub use forms::*;
pub use reset_timer::ResetTimer;
pub use wizard::Wizard;
