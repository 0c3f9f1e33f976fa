//! Terminal front end: one window with a menu bar, a body showing the current
//! screen and a footer for status messages.

mod app;
mod helpers;
mod navigation;
mod screens;
mod terminal;

pub use app::App;
pub use navigation::Action;
pub use terminal::run_app;
