//! Core library surface for the Prof Simulator teacher console.
//!
//! The persistence layer (`db`) and the menu model (`menu`, `window`) carry no
//! terminal dependencies, so the binary and the integration tests share them
//! directly. `ui` holds the ratatui front end that ties them together.
pub mod config;
pub mod db;
pub mod menu;
pub mod models;
pub mod ui;
pub mod window;

/// Convenience re-exports for the persistence layer.
pub use db::{is_fresh, seed_database, DataStore, StoreError, Value};

pub use config::{AppConfig, AppKind, Cli, WindowSize};
pub use menu::{CommandSet, MenuBar};
pub use window::Window;

/// The interactive application entry point and state container.
pub use ui::{run_app, Action, App};
