//! Connection factory.

use crate::connection::{Connection, MySqlDbConnection};
use northwind_config::{DatabaseConfig, RelationalDatabaseConfig, RelationalDatabaseProvider};
use northwind_core::NorthwindResult;
use tracing::{debug, warn};

/// Opens connections from database configuration.
///
/// `Ok(None)` means "no connection implementation for this configuration",
/// which is not an error. Driver failures are.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionFactory;

impl ConnectionFactory {
    /// Opens a connection for any configuration kind.
    pub async fn new_connection(config: &dyn DatabaseConfig) -> NorthwindResult<Option<Connection>> {
        let Some(relational) = config.as_relational() else {
            debug!(kind = config.kind(), "No connection for non-relational configuration");
            return Ok(None);
        };
        Self::new_relational_connection(relational).await
    }

    /// Opens a connection for a relational configuration.
    pub async fn new_relational_connection(
        config: &RelationalDatabaseConfig,
    ) -> NorthwindResult<Option<Connection>> {
        match config.provider() {
            RelationalDatabaseProvider::MySql(params) => {
                let connection = MySqlDbConnection::connect(params).await?;
                Ok(Some(connection.into()))
            }
            provider @ RelationalDatabaseProvider::PostgreSql(_) => {
                warn!(%provider, "No connection implementation for provider");
                Ok(None)
            }
        }
    }
}
