// Expose modules for the binary and integration tests
pub mod accounts;
pub mod analytics;
pub mod billing;
pub mod config;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod shell;
pub mod views;

pub use error::{DashboardError, Result};
