//! Ratatui front end: the menu-driven screens, the modal forms, and the
//! terminal event loop. State is split the same way the screens are: `app`
//! owns the navigation state machine, `forms` the field editing, `screens`
//! the scrollable lists, `helpers` the shared layout and formatting bits,
//! and `terminal` the raw-mode plumbing.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
