//! Persistence module split across logical submodules.

mod connection;
mod error;
mod school;
pub mod seed;
mod store;
mod value;

pub use connection::{default_db_path, is_fresh};
pub use error::{Result, StoreError};
pub use school::{
    count_pictures, fetch_classes, fetch_grades, fetch_homework, fetch_notes, fetch_prof,
    fetch_students,
};
pub use seed::{seed_database, SeedReport};
pub use store::{DataStore, ALL_ROWS};
pub use value::{Row, Value};
