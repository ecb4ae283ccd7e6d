//! A small to-do list: SQLite storage, a live task query, two state holders
//! and a ratatui front end.

pub mod config;
pub mod container;
pub mod data;
pub mod domain;
pub mod error;
pub mod logging;
pub mod presentation;
pub mod task;
pub mod ui;

pub use error::{Result, TodoError};
pub use task::Task;
