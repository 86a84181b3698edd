//! Decoding driver rows into dynamic rows.

use northwind_core::{NorthwindError, NorthwindResult, Row, Value};
use sqlx::mysql::MySqlRow;
use sqlx::{Column, Row as _, TypeInfo};

/// Copies every column of a MySQL row into a [`Row`], keyed by column label.
///
/// Integer types become [`Value::Integer`], FLOAT and DOUBLE become
/// [`Value::Real`], everything else is read as text.
pub fn decode_row(row: &MySqlRow) -> NorthwindResult<Row> {
    let mut decoded = Row::new();
    for column in row.columns() {
        let type_name = column.type_info().name();
        let value = decode_value(row, column.ordinal(), type_name).map_err(|e| {
            NorthwindError::row_mapping(format!(
                "column `{}` ({}): {}",
                column.name(),
                type_name,
                e
            ))
        })?;
        decoded.push(column.name(), value);
    }
    Ok(decoded)
}

fn decode_value(row: &MySqlRow, index: usize, type_name: &str) -> Result<Value, String> {
    let type_name = type_name.to_ascii_uppercase();

    if type_name == "NULL" {
        return Ok(Value::Null);
    }

    if type_name.contains("INT") || type_name == "BOOLEAN" {
        if type_name.ends_with("UNSIGNED") {
            let value: Option<u64> = row.try_get(index).map_err(|e| e.to_string())?;
            return value
                .map(|v| i64::try_from(v).map(Value::Integer).map_err(|e| e.to_string()))
                .unwrap_or(Ok(Value::Null));
        }
        let value: Option<i64> = row.try_get(index).map_err(|e| e.to_string())?;
        return Ok(value.into());
    }

    if type_name == "FLOAT" || type_name == "DOUBLE" {
        let value: Option<f64> = row.try_get(index).map_err(|e| e.to_string())?;
        return Ok(value.into());
    }

    let value: Option<String> = row.try_get(index).map_err(|e| e.to_string())?;
    Ok(value.into())
}
