//! Shared utilities, configuration, and error handling for FluffyTeams
//!
//! This crate provides common functionality used across the plugin:
//! - Configuration loading from the plugin data folder and environment
//! - Error types and handling
//! - Database connection and backend detection

pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use db::{Database, DatabaseBackend, RepositoryError};
pub use error::{Error, Result};
