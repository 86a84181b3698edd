//! Database configuration kinds and providers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A description of how to reach a database.
///
/// Configuration kinds are open: any type can describe a database. The
/// connection factory only knows how to open relational ones and asks each
/// kind for its relational form.
pub trait DatabaseConfig: fmt::Debug + Send + Sync {
    /// Short name of the configuration kind, used in logs.
    fn kind(&self) -> &'static str;

    /// Returns the relational form of this configuration, if it has one.
    fn as_relational(&self) -> Option<&RelationalDatabaseConfig> {
        None
    }
}

/// Configuration for a relational database. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationalDatabaseConfig {
    provider: RelationalDatabaseProvider,
}

impl RelationalDatabaseConfig {
    #[must_use]
    pub const fn new(provider: RelationalDatabaseProvider) -> Self {
        Self { provider }
    }

    /// Creates a MySQL configuration.
    #[must_use]
    pub const fn mysql(params: MySqlParams) -> Self {
        Self::new(RelationalDatabaseProvider::MySql(params))
    }

    /// Returns the declared provider and its parameters.
    #[must_use]
    pub const fn provider(&self) -> &RelationalDatabaseProvider {
        &self.provider
    }
}

impl Default for RelationalDatabaseConfig {
    fn default() -> Self {
        Self::mysql(MySqlParams::default())
    }
}

impl DatabaseConfig for RelationalDatabaseConfig {
    fn kind(&self) -> &'static str {
        "relational"
    }

    fn as_relational(&self) -> Option<&RelationalDatabaseConfig> {
        Some(self)
    }
}

/// Relational database backends, each with its own parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum RelationalDatabaseProvider {
    /// MySQL.
    #[serde(rename = "mysql")]
    MySql(MySqlParams),
    /// PostgreSQL. Recognized in configuration, no driver wired up yet.
    #[serde(rename = "postgresql")]
    PostgreSql(PostgreSqlParams),
}

impl RelationalDatabaseProvider {
    /// Returns the provider name as written in configuration.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MySql(_) => "mysql",
            Self::PostgreSql(_) => "postgresql",
        }
    }
}

impl fmt::Display for RelationalDatabaseProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// MySQL connection parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MySqlParams {
    /// Server host.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// User name.
    pub user: String,
    /// Password.
    pub password: String,
    /// Default schema.
    pub schema: String,
    /// Connection character set.
    pub charset: String,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Log every statement through the driver at debug level.
    pub log_statements: bool,
}

impl Default for MySqlParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "northwind".to_string(),
            password: String::new(),
            schema: "northwind".to_string(),
            charset: "utf8mb4".to_string(),
            connect_timeout_secs: 30,
            log_statements: false,
        }
    }
}

impl MySqlParams {
    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl fmt::Debug for MySqlParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MySqlParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("schema", &self.schema)
            .field("charset", &self.charset)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("log_statements", &self.log_statements)
            .finish()
    }
}

/// PostgreSQL connection parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostgreSqlParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub schema: String,
}

impl Default for PostgreSqlParams {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            user: "northwind".to_string(),
            password: String::new(),
            schema: "northwind".to_string(),
        }
    }
}

impl fmt::Debug for PostgreSqlParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgreSqlParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .field("schema", &self.schema)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct DocumentStoreConfig;

    impl DatabaseConfig for DocumentStoreConfig {
        fn kind(&self) -> &'static str {
            "document"
        }
    }

    #[test]
    fn test_relational_config_is_relational() {
        let config = RelationalDatabaseConfig::default();
        assert_eq!(config.kind(), "relational");
        assert!(config.as_relational().is_some());
        assert_eq!(config.provider().name(), "mysql");
    }

    #[test]
    fn test_other_kinds_are_not_relational() {
        assert!(DocumentStoreConfig.as_relational().is_none());
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let params = MySqlParams {
            password: "s3cret".to_string(),
            ..MySqlParams::default()
        };
        let debug = format!("{:?}", params);
        assert!(!debug.contains("s3cret"));
        assert!(debug.contains("[redacted]"));
    }

    #[test]
    fn test_provider_tagged_deserialization() {
        let json = r#"{"provider": "mysql", "host": "db", "schema": "shop"}"#;
        let config: RelationalDatabaseConfig = serde_json::from_str(json).unwrap();
        match config.provider() {
            RelationalDatabaseProvider::MySql(params) => {
                assert_eq!(params.host, "db");
                assert_eq!(params.schema, "shop");
                assert_eq!(params.port, 3306);
            }
            other => panic!("unexpected provider {other}"),
        }
    }

    #[test]
    fn test_postgresql_deserialization() {
        let json = r#"{"provider": "postgresql", "port": 6543}"#;
        let config: RelationalDatabaseConfig = serde_json::from_str(json).unwrap();
        assert!(matches!(
            config.provider(),
            RelationalDatabaseProvider::PostgreSql(PostgreSqlParams { port: 6543, .. })
        ));
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let json = r#"{"provider": "oracle"}"#;
        assert!(serde_json::from_str::<RelationalDatabaseConfig>(json).is_err());
    }
}
