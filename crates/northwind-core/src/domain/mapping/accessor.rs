//! Typed read access to product attributes.

use crate::domain::value_objects::{decode_supplier_ids, ProductAttributeNames as Attr};
use crate::row::{Row, Value};
use crate::{NorthwindError, NorthwindResult};

/// Typed, read-only view of a product's raw attributes.
///
/// Implementations decide where the values come from; every getter fails
/// with [`NorthwindError::RowMapping`] when the attribute is absent or has
/// the wrong type.
pub trait ProductAccessor {
    fn id(&self) -> NorthwindResult<Option<i32>>;
    fn code(&self) -> NorthwindResult<String>;
    fn supplier_ids(&self) -> NorthwindResult<Vec<i32>>;
    fn name(&self) -> NorthwindResult<String>;
    fn description(&self) -> NorthwindResult<Option<String>>;
    fn standard_cost(&self) -> NorthwindResult<f64>;
    fn list_price(&self) -> NorthwindResult<f64>;
    fn reorder_level(&self) -> NorthwindResult<Option<i32>>;
    fn target_level(&self) -> NorthwindResult<Option<i32>>;
    fn quantity_per_unit(&self) -> NorthwindResult<Option<String>>;
    fn discontinued(&self) -> NorthwindResult<bool>;
    fn minimum_reorder_quantity(&self) -> NorthwindResult<Option<i32>>;
    fn category(&self) -> NorthwindResult<Option<String>>;
}

/// Accessor over a [`Row`] whose column names are the product attribute
/// names.
#[derive(Debug, Clone, Copy)]
pub struct RowProductAccessor<'a> {
    row: &'a Row,
}

impl<'a> RowProductAccessor<'a> {
    #[must_use]
    pub const fn new(row: &'a Row) -> Self {
        Self { row }
    }

    fn value(&self, column: &str) -> NorthwindResult<&'a Value> {
        self.row
            .get(column)
            .ok_or_else(|| NorthwindError::row_mapping(format!("missing column `{}`", column)))
    }

    fn optional_text(&self, column: &str) -> NorthwindResult<Option<String>> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Text(s) => Ok(Some(s.clone())),
            other => Err(mistyped(column, "text", other)),
        }
    }

    fn required_text(&self, column: &str) -> NorthwindResult<String> {
        self.optional_text(column)?
            .ok_or_else(|| null_in_required(column))
    }

    fn optional_int(&self, column: &str) -> NorthwindResult<Option<i32>> {
        match self.value(column)? {
            Value::Null => Ok(None),
            Value::Integer(i) => i32::try_from(*i).map(Some).map_err(|_| {
                NorthwindError::row_mapping(format!(
                    "column `{}`: {} is out of range",
                    column, i
                ))
            }),
            other => Err(mistyped(column, "integer", other)),
        }
    }

    fn required_real(&self, column: &str) -> NorthwindResult<f64> {
        match self.value(column)? {
            Value::Real(r) => Ok(*r),
            #[allow(clippy::cast_precision_loss)]
            Value::Integer(i) => Ok(*i as f64),
            Value::Null => Err(null_in_required(column)),
            other => Err(mistyped(column, "real", other)),
        }
    }
}

fn mistyped(column: &str, expected: &str, found: &Value) -> NorthwindError {
    NorthwindError::row_mapping(format!(
        "column `{}`: expected {}, found {}",
        column,
        expected,
        found.kind()
    ))
}

fn null_in_required(column: &str) -> NorthwindError {
    NorthwindError::row_mapping(format!("column `{}`: unexpected NULL", column))
}

impl ProductAccessor for RowProductAccessor<'_> {
    fn id(&self) -> NorthwindResult<Option<i32>> {
        self.optional_int(Attr::ID)
    }

    fn code(&self) -> NorthwindResult<String> {
        self.required_text(Attr::CODE)
    }

    fn supplier_ids(&self) -> NorthwindResult<Vec<i32>> {
        match self.value(Attr::SUPPLIER_IDS)? {
            Value::Null => Ok(Vec::new()),
            Value::Text(s) => decode_supplier_ids(s),
            Value::Integer(i) => i32::try_from(*i)
                .map(|id| vec![id])
                .map_err(|_| mistyped(Attr::SUPPLIER_IDS, "supplier id list", &Value::Integer(*i))),
            other => Err(mistyped(Attr::SUPPLIER_IDS, "text", other)),
        }
    }

    fn name(&self) -> NorthwindResult<String> {
        self.required_text(Attr::NAME)
    }

    fn description(&self) -> NorthwindResult<Option<String>> {
        self.optional_text(Attr::DESCRIPTION)
    }

    fn standard_cost(&self) -> NorthwindResult<f64> {
        self.required_real(Attr::STANDARD_COST)
    }

    fn list_price(&self) -> NorthwindResult<f64> {
        self.required_real(Attr::LIST_PRICE)
    }

    fn reorder_level(&self) -> NorthwindResult<Option<i32>> {
        self.optional_int(Attr::REORDER_LEVEL)
    }

    fn target_level(&self) -> NorthwindResult<Option<i32>> {
        self.optional_int(Attr::TARGET_LEVEL)
    }

    fn quantity_per_unit(&self) -> NorthwindResult<Option<String>> {
        self.optional_text(Attr::QUANTITY_PER_UNIT)
    }

    fn discontinued(&self) -> NorthwindResult<bool> {
        match self.value(Attr::DISCONTINUED)? {
            Value::Integer(i) => Ok(*i != 0),
            Value::Null => Err(null_in_required(Attr::DISCONTINUED)),
            other => Err(mistyped(Attr::DISCONTINUED, "integer flag", other)),
        }
    }

    fn minimum_reorder_quantity(&self) -> NorthwindResult<Option<i32>> {
        self.optional_int(Attr::MINIMUM_REORDER_QUANTITY)
    }

    fn category(&self) -> NorthwindResult<Option<String>> {
        self.optional_text(Attr::CATEGORY)
    }
}
