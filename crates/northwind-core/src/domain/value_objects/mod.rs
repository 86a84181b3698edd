//! Domain value objects.

mod product_attributes;

pub use product_attributes::*;
