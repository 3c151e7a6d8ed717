//! Loading existing lists into a [`Registry`](crate::domain::Registry)

pub mod loader;

pub use loader::{load_csv, load_csv_if_exists};
