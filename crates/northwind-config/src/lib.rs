//! # Northwind Config
//!
//! Database and logging configuration for the Northwind data access layer.
//! Supports layered configuration from files and environment variables.

mod app_config;
mod database;
mod loader;
mod validation;

pub use app_config::*;
pub use database::*;
pub use loader::*;
pub use validation::*;
