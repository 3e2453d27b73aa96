//! # Booker Common Library
//!
//! Shared code for the Booker service:
//! - Database models and queries (venues, artists, shows)
//! - Error type
//! - Configuration loading
//! - Timestamp parsing and display formatting

pub mod config;
pub mod db;
pub mod error;
pub mod format;
pub mod time;

pub use error::{Error, Result};
pub use format::{format_datetime, DateStyle};
