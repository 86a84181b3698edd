//! # Northwind Domain
//!
//! The Product entity, its attribute contract and the mapping from raw
//! rows to products.

pub mod entities;
pub mod mapping;
pub mod value_objects;

pub use entities::*;
pub use mapping::*;
pub use value_objects::*;
