//! Common test infrastructure for database integration tests.

use northwind_config::{MySqlParams, RelationalDatabaseConfig};
use northwind_repository::{ConnectionFactory, MySqlDbConnection, MySqlProductDao};
use testcontainers::{runners::AsyncRunner, ContainerAsync, ImageExt};
use testcontainers_modules::mysql::Mysql;

const PRODUCTS_SCHEMA: &str = include_str!("../fixtures/products.sql");

/// Test database container wrapper.
///
/// Manages a MySQL testcontainer lifecycle and hands out fresh connections
/// to a schema with the products table.
pub struct TestDatabase {
    _container: ContainerAsync<Mysql>,
    config: RelationalDatabaseConfig,
}

impl TestDatabase {
    /// Creates a new test database with a fresh MySQL container.
    ///
    /// Creates the products table after container startup.
    pub async fn new() -> Self {
        let container = Mysql::default()
            .with_env_var("MYSQL_ROOT_PASSWORD", "testpass")
            .with_env_var("MYSQL_DATABASE", "northwind_test")
            .with_env_var("MYSQL_USER", "northwind")
            .with_env_var("MYSQL_PASSWORD", "northwind")
            .start()
            .await
            .expect("Failed to start MySQL container");

        let port = container
            .get_host_port_ipv4(3306)
            .await
            .expect("Failed to get MySQL port");

        let config = RelationalDatabaseConfig::mysql(MySqlParams {
            host: "127.0.0.1".to_string(),
            port,
            user: "northwind".to_string(),
            password: "northwind".to_string(),
            schema: "northwind_test".to_string(),
            connect_timeout_secs: 10,
            log_statements: true,
            ..MySqlParams::default()
        });

        let mut connection = Self::connect_with_retry(&config, 30).await;
        sqlx::raw_sql(PRODUCTS_SCHEMA)
            .execute(connection.inner())
            .await
            .expect("Failed to create products table");
        connection.close().await.expect("Failed to close setup connection");

        Self {
            _container: container,
            config,
        }
    }

    /// Returns the configuration pointing at the container.
    pub fn config(&self) -> &RelationalDatabaseConfig {
        &self.config
    }

    /// Opens a new connection through the factory.
    pub async fn connection(&self) -> MySqlDbConnection {
        ConnectionFactory::new_connection(&self.config)
            .await
            .expect("Failed to connect")
            .expect("MySQL configuration must yield a connection")
            .into_mysql()
            .expect("Factory must return a MySQL connection")
    }

    /// Returns a product DAO on a new connection.
    pub async fn dao(&self) -> MySqlProductDao {
        MySqlProductDao::new(self.connection().await)
    }

    /// Connects to the database with retry logic.
    async fn connect_with_retry(
        config: &RelationalDatabaseConfig,
        max_attempts: u32,
    ) -> MySqlDbConnection {
        let mut attempts = 0;
        loop {
            attempts += 1;
            match ConnectionFactory::new_connection(config).await {
                Ok(Some(connection)) => {
                    return connection
                        .into_mysql()
                        .expect("Factory must return a MySQL connection")
                }
                Ok(None) => panic!("MySQL configuration yielded no connection"),
                Err(e) => {
                    if attempts >= max_attempts {
                        panic!(
                            "Failed to connect to database after {} attempts: {}",
                            max_attempts, e
                        );
                    }
                    tokio::time::sleep(std::time::Duration::from_secs(1)).await;
                }
            }
        }
    }
}
