//! Builds products from any [`ProductAccessor`].

use super::accessor::ProductAccessor;
use crate::domain::entities::{Product, ProductBuilder};
use crate::NorthwindResult;

/// Assembles a validated [`Product`] from an accessor.
///
/// Knows nothing about where the accessor's values come from, so the same
/// builder serves database rows, fixtures and decoded payloads alike.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessorBasedProductBuilder;

impl AccessorBasedProductBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Reads every attribute through the accessor and builds the product.
    pub fn build<A: ProductAccessor + ?Sized>(&self, accessor: &A) -> NorthwindResult<Product> {
        ProductBuilder {
            id: accessor.id()?,
            code: accessor.code()?,
            supplier_ids: accessor.supplier_ids()?,
            name: accessor.name()?,
            description: accessor.description()?,
            standard_cost: accessor.standard_cost()?,
            list_price: accessor.list_price()?,
            reorder_level: accessor.reorder_level()?,
            target_level: accessor.target_level()?,
            quantity_per_unit: accessor.quantity_per_unit()?,
            discontinued: accessor.discontinued()?,
            minimum_reorder_quantity: accessor.minimum_reorder_quantity()?,
            category: accessor.category()?,
        }
        .build()
    }
}
