//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use northwind_core::NorthwindError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable naming the active environment.
pub const ENVIRONMENT_VAR: &str = "NORTHWIND_ENVIRONMENT";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `NORTHWIND_` prefix, `__` as separator
    ///    (e.g. `NORTHWIND_DATABASE__HOST`)
    pub fn new(config_dir: impl Into<String>) -> Result<Self, NorthwindError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment name.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, NorthwindError> {
        let config_dir = config_dir.into();
        let environment = environment.into();
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, NorthwindError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    ///
    /// The current configuration is kept if the new one fails to load.
    pub async fn reload(&self) -> Result<(), NorthwindError> {
        let new_config = Self::load_config(&self.config_dir, &self.environment)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, NorthwindError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // 1. Load default configuration
        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        // 2. Load environment-specific configuration
        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        // 3. Load local overrides (not committed to version control)
        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        // 4. Override with environment variables (NORTHWIND_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("NORTHWIND")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_error_to_northwind_error)?;

        let mut app_config: AppConfig = config
            .try_deserialize()
            .map_err(config_error_to_northwind_error)?;
        app_config.app.environment = environment.to_string();

        ConfigValidator::validate(&app_config)
            .map_err(|errors| NorthwindError::Configuration(format_validation_errors(&errors)))?;

        Ok(app_config)
    }
}

fn config_error_to_northwind_error(err: ConfigError) -> NorthwindError {
    NorthwindError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelationalDatabaseProvider;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    fn dir_str(dir: &TempDir) -> String {
        dir.path().to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_missing_files_use_defaults() {
        let dir = TempDir::new().unwrap();
        let loader = ConfigLoader::with_environment(dir_str(&dir), "test").unwrap();
        let config = loader.get().await;

        assert_eq!(config.app.environment, "test");
        assert!(matches!(
            config.database.provider(),
            RelationalDatabaseProvider::MySql(_)
        ));
    }

    #[tokio::test]
    async fn test_environment_file_overrides_default() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            r#"
            [database]
            provider = "mysql"
            host = "db.internal"
            port = 3306
            schema = "northwind"
            "#,
        );
        write(
            &dir,
            "staging.toml",
            r#"
            [database]
            provider = "mysql"
            host = "db.staging"
            port = 3307
            "#,
        );

        let loader = ConfigLoader::with_environment(dir_str(&dir), "staging").unwrap();
        let config = loader.get().await;

        match config.database.provider() {
            RelationalDatabaseProvider::MySql(params) => {
                assert_eq!(params.host, "db.staging");
                assert_eq!(params.port, 3307);
                assert_eq!(params.schema, "northwind");
            }
            other => panic!("unexpected provider {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_config_rejected() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "default.toml",
            r#"
            [database]
            provider = "mysql"
            host = ""
            "#,
        );

        let err = ConfigLoader::with_environment(dir_str(&dir), "test")
            .err()
            .expect("empty host must be rejected");
        assert!(matches!(err, NorthwindError::Configuration(ref m) if m.contains("database.host")));
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = TempDir::new().unwrap();
        write(&dir, "default.toml", "[logging]\njson = false\n");
        let loader = ConfigLoader::with_environment(dir_str(&dir), "test").unwrap();
        assert!(!loader.get().await.logging.json);

        write(&dir, "default.toml", "[logging]\njson = true\n");
        loader.reload().await.unwrap();
        assert!(loader.get().await.logging.json);
    }
}
