//! # Northwind Core
//!
//! Core types, errors and the Product domain model for the Northwind data
//! access layer. Everything here is independent of any database driver.

pub mod domain;
pub mod error;
pub mod pagination;
pub mod result;
pub mod row;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use pagination::*;
pub use result::*;
pub use row::*;
pub use telemetry::*;
pub use validation::*;
