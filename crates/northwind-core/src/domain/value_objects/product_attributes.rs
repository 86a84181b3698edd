//! Product attribute names and the id key value object.

use crate::validation::rules;
use crate::{NorthwindError, NorthwindResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Logical attribute names of a product.
///
/// Each name doubles as the column alias in result rows and as the named
/// bind parameter in the product statements. The two must not drift apart.
#[derive(Debug, Clone, Copy)]
pub struct ProductAttributeNames;

impl ProductAttributeNames {
    pub const ID: &'static str = "id";
    pub const CODE: &'static str = "code";
    pub const SUPPLIER_IDS: &'static str = "supplier_ids";
    pub const NAME: &'static str = "name";
    pub const DESCRIPTION: &'static str = "description";
    pub const STANDARD_COST: &'static str = "standard_cost";
    pub const LIST_PRICE: &'static str = "list_price";
    pub const REORDER_LEVEL: &'static str = "reorder_level";
    pub const TARGET_LEVEL: &'static str = "target_level";
    pub const QUANTITY_PER_UNIT: &'static str = "quantity_per_unit";
    pub const DISCONTINUED: &'static str = "discontinued";
    pub const MINIMUM_REORDER_QUANTITY: &'static str = "minimum_reorder_quantity";
    pub const CATEGORY: &'static str = "category";

    /// Every attribute except the id, in column order.
    pub const NON_ID: [&'static str; 12] = [
        Self::CODE,
        Self::SUPPLIER_IDS,
        Self::NAME,
        Self::DESCRIPTION,
        Self::STANDARD_COST,
        Self::LIST_PRICE,
        Self::REORDER_LEVEL,
        Self::TARGET_LEVEL,
        Self::QUANTITY_PER_UNIT,
        Self::DISCONTINUED,
        Self::MINIMUM_REORDER_QUANTITY,
        Self::CATEGORY,
    ];

    /// Returns true if `name` is a product attribute.
    #[must_use]
    pub fn contains(name: &str) -> bool {
        name == Self::ID || Self::NON_ID.contains(&name)
    }
}

/// Separator used by the Northwind schema for multi-valued supplier ids.
pub const SUPPLIER_IDS_SEPARATOR: char = ';';

/// Encodes supplier ids into their column form, e.g. `4;6`.
#[must_use]
pub fn encode_supplier_ids(ids: &[i32]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&SUPPLIER_IDS_SEPARATOR.to_string())
}

/// Decodes the column form of supplier ids. Empty entries are skipped.
pub fn decode_supplier_ids(column: &str) -> NorthwindResult<Vec<i32>> {
    column
        .split(SUPPLIER_IDS_SEPARATOR)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry.parse::<i32>().map_err(|_| {
                NorthwindError::row_mapping(format!(
                    "column `{}`: invalid supplier id `{}`",
                    ProductAttributeNames::SUPPLIER_IDS,
                    entry
                ))
            })
        })
        .collect()
}

/// Key identifying a single product. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct IdProductAttributeSet(i32);

impl IdProductAttributeSet {
    /// Creates a product key, rejecting zero and negative ids.
    pub fn new(id: i32) -> NorthwindResult<Self> {
        rules::positive_id(id).map_err(|_| {
            NorthwindError::validation(format!(
                "{} must be a positive integer, got {}",
                ProductAttributeNames::ID,
                id
            ))
        })?;
        Ok(Self(id))
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn id(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for IdProductAttributeSet {
    type Error = NorthwindError;

    fn try_from(id: i32) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl TryFrom<u64> for IdProductAttributeSet {
    type Error = NorthwindError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        let id = i32::try_from(id).map_err(|_| {
            NorthwindError::validation(format!(
                "{} {} does not fit the id column",
                ProductAttributeNames::ID,
                id
            ))
        })?;
        Self::new(id)
    }
}

impl From<IdProductAttributeSet> for i32 {
    fn from(id: IdProductAttributeSet) -> Self {
        id.0
    }
}

impl fmt::Display for IdProductAttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
