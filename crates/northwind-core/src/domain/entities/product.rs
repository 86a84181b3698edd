//! Product entity.

use crate::domain::value_objects::{IdProductAttributeSet, ProductAttributeNames};
use crate::validation::{rules, ValidateExt};
use crate::{NorthwindError, NorthwindResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Product entity of the Northwind catalog.
///
/// Instances are immutable value carriers. They are assembled through
/// [`ProductBuilder`], which validates every attribute, and the id is only
/// ever set by the database on create.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(try_from = "ProductBuilder")]
pub struct Product {
    /// Database-assigned identifier, absent before create.
    #[validate(range(min = 1))]
    id: Option<i32>,

    /// Product code.
    #[validate(length(min = 1, max = 25))]
    code: String,

    /// Ids of the suppliers carrying the product.
    supplier_ids: Vec<i32>,

    /// Product name.
    #[validate(length(min = 1, max = 50))]
    name: String,

    description: Option<String>,

    /// Cost paid to the supplier.
    #[validate(range(min = 0.0))]
    standard_cost: f64,

    /// Price offered to customers.
    #[validate(range(min = 0.0))]
    list_price: f64,

    #[validate(range(min = 0))]
    reorder_level: Option<i32>,

    #[validate(range(min = 0))]
    target_level: Option<i32>,

    #[validate(length(max = 50))]
    quantity_per_unit: Option<String>,

    discontinued: bool,

    #[validate(range(min = 0))]
    minimum_reorder_quantity: Option<i32>,

    #[validate(length(max = 50))]
    category: Option<String>,
}

impl Product {
    /// Starts a builder for a new product.
    #[must_use]
    pub fn builder() -> ProductBuilder {
        ProductBuilder::new()
    }

    /// Returns a builder pre-filled with this product's attributes.
    ///
    /// The id is carried over, so the result can be passed to update.
    #[must_use]
    pub fn to_builder(&self) -> ProductBuilder {
        ProductBuilder {
            id: self.id,
            code: self.code.clone(),
            supplier_ids: self.supplier_ids.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            standard_cost: self.standard_cost,
            list_price: self.list_price,
            reorder_level: self.reorder_level,
            target_level: self.target_level,
            quantity_per_unit: self.quantity_per_unit.clone(),
            discontinued: self.discontinued,
            minimum_reorder_quantity: self.minimum_reorder_quantity,
            category: self.category.clone(),
        }
    }

    /// Returns this product with the id assigned by the database.
    ///
    /// Fails if the product already has an id.
    pub fn with_assigned_id(mut self, id: IdProductAttributeSet) -> NorthwindResult<Self> {
        if let Some(existing) = self.id {
            return Err(NorthwindError::validation(format!(
                "product already has id {}",
                existing
            )));
        }
        self.id = Some(id.id());
        Ok(self)
    }

    /// Returns the id key, if the product has been stored.
    #[must_use]
    pub fn id_key(&self) -> Option<IdProductAttributeSet> {
        self.id.and_then(|id| IdProductAttributeSet::new(id).ok())
    }

    /// Returns the id key or a validation error naming `operation`.
    pub fn require_id(&self, operation: &str) -> NorthwindResult<IdProductAttributeSet> {
        self.id_key().ok_or_else(|| {
            NorthwindError::validation(format!(
                "cannot {} product without an id: {}",
                operation, self
            ))
        })
    }

    #[must_use]
    pub const fn id(&self) -> Option<i32> {
        self.id
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn supplier_ids(&self) -> &[i32] {
        &self.supplier_ids
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn standard_cost(&self) -> f64 {
        self.standard_cost
    }

    #[must_use]
    pub const fn list_price(&self) -> f64 {
        self.list_price
    }

    #[must_use]
    pub const fn reorder_level(&self) -> Option<i32> {
        self.reorder_level
    }

    #[must_use]
    pub const fn target_level(&self) -> Option<i32> {
        self.target_level
    }

    #[must_use]
    pub fn quantity_per_unit(&self) -> Option<&str> {
        self.quantity_per_unit.as_deref()
    }

    #[must_use]
    pub const fn discontinued(&self) -> bool {
        self.discontinued
    }

    #[must_use]
    pub const fn minimum_reorder_quantity(&self) -> Option<i32> {
        self.minimum_reorder_quantity
    }

    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Serializes the product to JSON, keyed by attribute name.
    pub fn to_json(&self) -> NorthwindResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product[id=")?;
        match self.id {
            Some(id) => write!(f, "{}", id)?,
            None => write!(f, "none")?,
        }
        write!(
            f,
            ", code={}, name={}, standard_cost={}, list_price={}, discontinued={}]",
            self.code, self.name, self.standard_cost, self.list_price, self.discontinued
        )
    }
}

/// Builder for creating Product instances.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProductBuilder {
    pub(crate) id: Option<i32>,
    pub(crate) code: String,
    pub(crate) supplier_ids: Vec<i32>,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) standard_cost: f64,
    pub(crate) list_price: f64,
    pub(crate) reorder_level: Option<i32>,
    pub(crate) target_level: Option<i32>,
    pub(crate) quantity_per_unit: Option<String>,
    pub(crate) discontinued: bool,
    pub(crate) minimum_reorder_quantity: Option<i32>,
    pub(crate) category: Option<String>,
}

impl ProductBuilder {
    /// Creates a new product builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the product code.
    #[must_use]
    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the supplier ids.
    #[must_use]
    pub fn supplier_ids(mut self, ids: impl Into<Vec<i32>>) -> Self {
        self.supplier_ids = ids.into();
        self
    }

    /// Sets the product name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the standard cost.
    #[must_use]
    pub fn standard_cost(mut self, cost: f64) -> Self {
        self.standard_cost = cost;
        self
    }

    /// Sets the list price.
    #[must_use]
    pub fn list_price(mut self, price: f64) -> Self {
        self.list_price = price;
        self
    }

    /// Sets the reorder level.
    #[must_use]
    pub fn reorder_level(mut self, level: i32) -> Self {
        self.reorder_level = Some(level);
        self
    }

    /// Sets the target level.
    #[must_use]
    pub fn target_level(mut self, level: i32) -> Self {
        self.target_level = Some(level);
        self
    }

    /// Sets the quantity per unit, e.g. `10 boxes x 20 bags`.
    #[must_use]
    pub fn quantity_per_unit(mut self, quantity: impl Into<String>) -> Self {
        self.quantity_per_unit = Some(quantity.into());
        self
    }

    /// Sets the discontinued flag.
    #[must_use]
    pub fn discontinued(mut self, discontinued: bool) -> Self {
        self.discontinued = discontinued;
        self
    }

    /// Sets the minimum reorder quantity.
    #[must_use]
    pub fn minimum_reorder_quantity(mut self, quantity: i32) -> Self {
        self.minimum_reorder_quantity = Some(quantity);
        self
    }

    /// Sets the category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Validates the attributes and builds the Product instance.
    pub fn build(self) -> NorthwindResult<Product> {
        rules::not_blank(&self.code)
            .map_err(|_| NorthwindError::validation("code: must not be blank"))?;
        rules::not_blank(&self.name)
            .map_err(|_| NorthwindError::validation("name: must not be blank"))?;
        for (name, amount) in [
            (ProductAttributeNames::STANDARD_COST, self.standard_cost),
            (ProductAttributeNames::LIST_PRICE, self.list_price),
        ] {
            rules::money(amount).map_err(|e| {
                NorthwindError::validation(format!("{}: {} ({})", name, e.code, amount))
            })?;
        }

        let product = Product {
            id: self.id,
            code: self.code,
            supplier_ids: self.supplier_ids,
            name: self.name,
            description: self.description,
            standard_cost: self.standard_cost,
            list_price: self.list_price,
            reorder_level: self.reorder_level,
            target_level: self.target_level,
            quantity_per_unit: self.quantity_per_unit,
            discontinued: self.discontinued,
            minimum_reorder_quantity: self.minimum_reorder_quantity,
            category: self.category,
        };
        product.validate_model()?;
        Ok(product)
    }
}

impl TryFrom<ProductBuilder> for Product {
    type Error = NorthwindError;

    fn try_from(builder: ProductBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> ProductBuilder {
        Product::builder()
            .code("P1")
            .name("Widget")
            .supplier_ids(vec![4, 6])
            .standard_cost(1.5)
            .list_price(3.0)
            .reorder_level(10)
            .target_level(40)
            .quantity_per_unit("10 boxes x 20 bags")
            .minimum_reorder_quantity(5)
            .category("Beverages")
    }

    #[test]
    fn test_product_builder() {
        let product = widget().description("A fine widget").build().unwrap();

        assert_eq!(product.id(), None);
        assert_eq!(product.code(), "P1");
        assert_eq!(product.name(), "Widget");
        assert_eq!(product.supplier_ids(), &[4, 6]);
        assert_eq!(product.description(), Some("A fine widget"));
        assert_eq!(product.standard_cost(), 1.5);
        assert_eq!(product.list_price(), 3.0);
        assert_eq!(product.reorder_level(), Some(10));
        assert_eq!(product.target_level(), Some(40));
        assert_eq!(product.quantity_per_unit(), Some("10 boxes x 20 bags"));
        assert!(!product.discontinued());
        assert_eq!(product.minimum_reorder_quantity(), Some(5));
        assert_eq!(product.category(), Some("Beverages"));
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = widget().name("   ").build().unwrap_err();
        assert!(matches!(err, NorthwindError::Validation(ref m) if m.contains("name")));
    }

    #[test]
    fn test_blank_code_rejected() {
        let err = widget().code("").build().unwrap_err();
        assert!(matches!(err, NorthwindError::Validation(ref m) if m.contains("code")));
    }

    #[test]
    fn test_negative_price_rejected() {
        let err = widget().list_price(-0.01).build().unwrap_err();
        assert!(err.to_string().contains("list_price"));
    }

    #[test]
    fn test_non_finite_amounts_rejected() {
        let err = widget().standard_cost(f64::NAN).build().unwrap_err();
        assert!(matches!(err, NorthwindError::Validation(ref m) if m.contains("standard_cost: not_finite")));

        let err = widget().list_price(f64::INFINITY).build().unwrap_err();
        assert!(matches!(err, NorthwindError::Validation(ref m) if m.contains("list_price: not_finite")));
    }

    #[test]
    fn test_amounts_must_fit_money_column() {
        let err = widget().standard_cost(1.23456).build().unwrap_err();
        assert!(err.to_string().contains("standard_cost: too_many_decimals"));

        let err = widget().list_price(1e15).build().unwrap_err();
        assert!(err.to_string().contains("list_price: out_of_range"));

        let product = widget().standard_cost(1.2346).list_price(0.1).build().unwrap();
        assert_eq!(product, product.clone());
    }

    #[test]
    fn test_json_with_invalid_amount_rejected() {
        let json = r#"{"code": "P1", "name": "Widget", "standard_cost": 1.00001, "list_price": 2.0}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_code_too_long_rejected() {
        let err = widget().code("X".repeat(26)).build().unwrap_err();
        assert!(err.to_string().contains("code"));
    }

    #[test]
    fn test_assign_id_once() {
        let product = widget().build().unwrap();
        let id = IdProductAttributeSet::new(9).unwrap();

        let stored = product.with_assigned_id(id).unwrap();
        assert_eq!(stored.id(), Some(9));
        assert_eq!(stored.id_key(), Some(id));

        assert!(stored.with_assigned_id(id).is_err());
    }

    #[test]
    fn test_require_id() {
        let product = widget().build().unwrap();
        let err = product.require_id("update").unwrap_err();
        assert!(err.to_string().contains("cannot update product without an id"));
    }

    #[test]
    fn test_to_builder_keeps_id() {
        let stored = widget()
            .build()
            .unwrap()
            .with_assigned_id(IdProductAttributeSet::new(3).unwrap())
            .unwrap();

        let updated = stored.to_builder().list_price(4.25).discontinued(true).build().unwrap();
        assert_eq!(updated.id(), Some(3));
        assert_eq!(updated.list_price(), 4.25);
        assert!(updated.discontinued());
        assert_eq!(updated.code(), stored.code());
    }

    #[test]
    fn test_display() {
        let product = widget().build().unwrap();
        let text = product.to_string();
        assert!(text.starts_with("Product[id=none, code=P1, name=Widget"));
    }

    #[test]
    fn test_json_uses_attribute_names() {
        let product = widget().build().unwrap();
        let json: serde_json::Value = serde_json::from_str(&product.to_json().unwrap()).unwrap();

        assert_eq!(json["code"], "P1");
        assert_eq!(json["supplier_ids"], serde_json::json!([4, 6]));
        assert_eq!(json["list_price"], 3.0);
        assert_eq!(json["minimum_reorder_quantity"], 5);
        assert!(json["id"].is_null());
    }

    #[test]
    fn test_json_deserialization_validates() {
        let product = widget().build().unwrap();
        let back: Product = serde_json::from_str(&product.to_json().unwrap()).unwrap();
        assert_eq!(back, product);

        let invalid = r#"{"code": "P2", "name": "", "standard_cost": 1.0, "list_price": 2.0}"#;
        assert!(serde_json::from_str::<Product>(invalid).is_err());
    }
}
