//! Database connections.

use northwind_config::MySqlParams;
use northwind_core::{NorthwindError, NorthwindResult};
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection as _};
use tracing::{info, warn};

/// An open database session, one variant per supported provider.
#[derive(Debug)]
pub enum Connection {
    /// A MySQL session.
    MySql(MySqlDbConnection),
}

impl Connection {
    /// Returns the provider name of this session.
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::MySql(_) => "mysql",
        }
    }

    /// Unwraps a MySQL session.
    pub fn into_mysql(self) -> NorthwindResult<MySqlDbConnection> {
        match self {
            Self::MySql(connection) => Ok(connection),
        }
    }

    /// Checks that the session is still usable.
    pub async fn ping(&mut self) -> NorthwindResult<()> {
        match self {
            Self::MySql(connection) => connection.ping().await,
        }
    }

    /// Closes the session.
    pub async fn close(self) -> NorthwindResult<()> {
        match self {
            Self::MySql(connection) => connection.close().await,
        }
    }
}

impl From<MySqlDbConnection> for Connection {
    fn from(connection: MySqlDbConnection) -> Self {
        Self::MySql(connection)
    }
}

/// A single MySQL session.
///
/// Not shared: every DAO call borrows it mutably, so two statements can
/// never run on it at once.
pub struct MySqlDbConnection {
    inner: MySqlConnection,
    schema: String,
}

impl MySqlDbConnection {
    /// Opens a session using the given parameters.
    ///
    /// Fails with [`NorthwindError::Timeout`] when the server does not answer
    /// within the configured connect timeout.
    pub async fn connect(params: &MySqlParams) -> NorthwindResult<Self> {
        info!(
            host = %params.host,
            port = params.port,
            schema = %params.schema,
            "Connecting to MySQL database..."
        );

        let mut options = MySqlConnectOptions::new()
            .host(&params.host)
            .port(params.port)
            .username(&params.user)
            .database(&params.schema)
            .charset(&params.charset);
        if !params.password.is_empty() {
            options = options.password(&params.password);
        }
        if !params.log_statements {
            options = options.disable_statement_logging();
        }

        let inner = tokio::time::timeout(params.connect_timeout(), options.connect())
            .await
            .map_err(|_| {
                warn!(
                    host = %params.host,
                    timeout_secs = params.connect_timeout_secs,
                    "Timed out connecting to database"
                );
                NorthwindError::Timeout(format!(
                    "connecting to {}:{} took longer than {}s",
                    params.host, params.port, params.connect_timeout_secs
                ))
            })?
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                NorthwindError::Connect(format!("Failed to connect: {}", e))
            })?;

        info!("MySQL connection established");
        Ok(Self {
            inner,
            schema: params.schema.clone(),
        })
    }

    /// Returns the underlying driver connection.
    pub fn inner(&mut self) -> &mut MySqlConnection {
        &mut self.inner
    }

    /// Checks that the session is still usable.
    pub async fn ping(&mut self) -> NorthwindResult<()> {
        self.inner
            .ping()
            .await
            .map_err(|e| NorthwindError::connection(format!("Ping failed: {}", e)))
    }

    /// Closes the session, sending a clean quit to the server.
    pub async fn close(self) -> NorthwindResult<()> {
        info!(schema = %self.schema, "Closing MySQL connection...");
        self.inner
            .close()
            .await
            .map_err(|e| NorthwindError::connection(format!("Close failed: {}", e)))?;
        info!("MySQL connection closed");
        Ok(())
    }
}

impl std::fmt::Debug for MySqlDbConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlDbConnection")
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}
