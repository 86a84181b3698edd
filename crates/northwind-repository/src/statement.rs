//! Named-parameter statements.
//!
//! SQL in the statement banks uses `:name` placeholders. MySQL only
//! understands positional `?`, so a [`NamedStatement`] rewrites the SQL
//! once, remembers the order names appeared in, and binds values by name.
//! Unknown or unbound names are errors, never silently ignored.

use northwind_core::{NorthwindError, NorthwindResult, Value};
use sqlx::mysql::{MySql, MySqlArguments, MySqlConnection, MySqlQueryResult, MySqlRow};
use sqlx::query::Query;
use std::collections::HashMap;
use tracing::trace;

/// A prepared statement with named parameters, scoped to a single call.
#[derive(Debug, Clone)]
pub struct NamedStatement {
    sql: String,
    parameters: Vec<String>,
    bindings: HashMap<String, Value>,
}

impl NamedStatement {
    /// Parses `sql`, replacing each `:name` outside quotes with `?`.
    ///
    /// `::` and `:=` are left untouched.
    #[must_use]
    pub fn prepare(sql: &str) -> Self {
        let mut positional = String::with_capacity(sql.len());
        let mut parameters = Vec::new();
        let mut quote: Option<char> = None;
        let mut chars = sql.chars().peekable();
        let mut previous: Option<char> = None;

        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                positional.push(c);
                if c == q {
                    quote = None;
                }
                previous = Some(c);
                continue;
            }

            match c {
                '\'' | '"' | '`' => {
                    quote = Some(c);
                    positional.push(c);
                }
                ':' if previous != Some(':')
                    && chars.peek().is_some_and(|n| n.is_ascii_alphabetic() || *n == '_') =>
                {
                    let mut name = String::new();
                    while let Some(&n) = chars.peek() {
                        if n.is_ascii_alphanumeric() || n == '_' {
                            name.push(n);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    parameters.push(name);
                    positional.push('?');
                    previous = Some('?');
                    continue;
                }
                _ => positional.push(c),
            }
            previous = Some(c);
        }

        Self {
            sql: positional,
            parameters,
            bindings: HashMap::new(),
        }
    }

    /// The SQL with positional placeholders.
    #[must_use]
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Parameter names in placeholder order, repeats included.
    #[must_use]
    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    /// Returns true if the statement declares `name`.
    #[must_use]
    pub fn declares(&self, name: &str) -> bool {
        self.parameters.iter().any(|p| p == name)
    }

    /// Binds a value to a named parameter.
    ///
    /// The value is owned by the statement from here on. Binding the same
    /// name twice keeps the last value.
    pub fn bind(&mut self, name: &str, value: impl Into<Value>) -> NorthwindResult<&mut Self> {
        if !self.declares(name) {
            return Err(NorthwindError::Binding(format!(
                "statement has no parameter `:{}`",
                name
            )));
        }
        self.bindings.insert(name.to_string(), value.into());
        Ok(self)
    }

    /// Values in placeholder order. Fails on the first unbound parameter.
    pub fn ordered_values(&self) -> NorthwindResult<Vec<Value>> {
        self.parameters
            .iter()
            .map(|name| {
                self.bindings.get(name).cloned().ok_or_else(|| {
                    NorthwindError::Binding(format!("parameter `:{}` is not bound", name))
                })
            })
            .collect()
    }

    fn query(&self) -> NorthwindResult<Query<'_, MySql, MySqlArguments>> {
        let values = self.ordered_values()?;
        trace!(sql = %self.sql, parameters = ?self.parameters, "Executing statement");

        let query = values
            .into_iter()
            .fold(sqlx::query::<MySql>(&self.sql), |query, value| match value {
                Value::Null => query.bind(None::<String>),
                Value::Integer(i) => query.bind(i),
                Value::Real(r) => query.bind(r),
                Value::Text(s) => query.bind(s),
            });
        Ok(query)
    }

    /// Runs the statement, returning rows affected and the last insert id.
    pub async fn execute(&self, conn: &mut MySqlConnection) -> NorthwindResult<MySqlQueryResult> {
        Ok(self.query()?.execute(conn).await?)
    }

    /// Runs the statement and returns the first row, if any.
    pub async fn fetch_optional(&self, conn: &mut MySqlConnection) -> NorthwindResult<Option<MySqlRow>> {
        Ok(self.query()?.fetch_optional(conn).await?)
    }

    /// Runs the statement and returns every row.
    pub async fn fetch_all(&self, conn: &mut MySqlConnection) -> NorthwindResult<Vec<MySqlRow>> {
        Ok(self.query()?.fetch_all(conn).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_rewrites_placeholders() {
        let statement = NamedStatement::prepare("SELECT * FROM products WHERE id = :id");
        assert_eq!(statement.sql(), "SELECT * FROM products WHERE id = ?");
        assert_eq!(statement.parameters(), &["id".to_string()]);
    }

    #[test]
    fn test_prepare_keeps_order_and_repeats() {
        let statement =
            NamedStatement::prepare("SELECT :b, :a, :b_2, :a FROM t LIMIT :offset_rows, :limit");
        assert_eq!(statement.sql(), "SELECT ?, ?, ?, ? FROM t LIMIT ?, ?");
        assert_eq!(
            statement.parameters(),
            &["b", "a", "b_2", "a", "offset_rows", "limit"].map(String::from)
        );
    }

    #[test]
    fn test_prepare_ignores_quoted_and_special_colons() {
        let statement = NamedStatement::prepare(
            "SELECT ':skip', \"a:b\", `c:d`, @x := 1, 10:30 FROM t WHERE x = :x",
        );
        assert_eq!(
            statement.sql(),
            "SELECT ':skip', \"a:b\", `c:d`, @x := 1, 10:30 FROM t WHERE x = ?"
        );
        assert_eq!(statement.parameters(), &["x".to_string()]);
    }

    #[test]
    fn test_bind_unknown_parameter_fails() {
        let mut statement = NamedStatement::prepare("DELETE FROM products WHERE id = :id");
        let err = statement.bind("product_id", 1).unwrap_err();
        assert!(matches!(err, NorthwindError::Binding(ref m) if m.contains(":product_id")));
    }

    #[test]
    fn test_unbound_parameter_fails() {
        let mut statement = NamedStatement::prepare("UPDATE t SET a = :a WHERE id = :id");
        statement.bind("a", "x").unwrap();
        let err = statement.ordered_values().unwrap_err();
        assert!(matches!(err, NorthwindError::Binding(ref m) if m.contains(":id")));
    }

    #[test]
    fn test_ordered_values_follow_placeholders() {
        let mut statement = NamedStatement::prepare("SELECT :limit, :offset_rows, :limit");
        statement
            .bind("offset_rows", 20_i64)
            .unwrap()
            .bind("limit", 10_i64)
            .unwrap();

        assert_eq!(
            statement.ordered_values().unwrap(),
            vec![Value::Integer(10), Value::Integer(20), Value::Integer(10)]
        );
    }

    #[test]
    fn test_bind_takes_a_copy() {
        let mut name = String::from("Chai");
        let mut statement = NamedStatement::prepare("SELECT :name");
        statement.bind("name", name.as_str()).unwrap();
        name.push_str(" Tea");

        assert_eq!(
            statement.ordered_values().unwrap(),
            vec![Value::Text("Chai".to_string())]
        );
    }
}
