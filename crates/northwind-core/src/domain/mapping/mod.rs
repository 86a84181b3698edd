//! Row-to-product mapping.
//!
//! Two stages: a [`ProductAccessor`] gives typed access to raw attribute
//! values, and the [`AccessorBasedProductBuilder`] validates and assembles
//! the [`Product`](crate::Product).

mod accessor;
mod builder;

pub use accessor::*;
pub use builder::*;
