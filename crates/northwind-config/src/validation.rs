//! Configuration validation module.
//!
//! Collects every problem in one pass so a broken configuration fails fast
//! with a complete report, before any connection is attempted.

use crate::{AppConfig, MySqlParams, PostgreSqlParams, RelationalDatabaseProvider};
use std::fmt;

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// A required text setting is empty.
    EmptyValue { name: String },
    /// Port number is invalid (must be 1-65535).
    InvalidPort { name: String, value: u16 },
    /// Timeout value must be positive.
    NonPositiveTimeout { name: String, value: u64 },
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { name } => write!(f, "'{}' must not be empty", name),
            Self::InvalidPort { name, value } => {
                write!(f, "Invalid port for {}: {} (must be 1-65535)", name, value)
            }
            Self::NonPositiveTimeout { name, value } => {
                write!(f, "Timeout '{}' must be positive, got {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        match config.database.provider() {
            RelationalDatabaseProvider::MySql(params) => Self::validate_mysql(params, &mut errors),
            RelationalDatabaseProvider::PostgreSql(params) => {
                Self::validate_postgresql(params, &mut errors);
            }
        }

        if config.logging.level.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: "logging.level".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_mysql(params: &MySqlParams, errors: &mut Vec<ConfigValidationError>) {
        Self::require_non_empty("database.host", &params.host, errors);
        Self::require_non_empty("database.user", &params.user, errors);
        Self::require_non_empty("database.schema", &params.schema, errors);
        Self::require_non_empty("database.charset", &params.charset, errors);
        Self::require_port("database.port", params.port, errors);

        if params.connect_timeout_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTimeout {
                name: "database.connect_timeout_secs".to_string(),
                value: 0,
            });
        }
    }

    fn validate_postgresql(params: &PostgreSqlParams, errors: &mut Vec<ConfigValidationError>) {
        Self::require_non_empty("database.host", &params.host, errors);
        Self::require_non_empty("database.user", &params.user, errors);
        Self::require_non_empty("database.schema", &params.schema, errors);
        Self::require_port("database.port", params.port, errors);
    }

    fn require_non_empty(name: &str, value: &str, errors: &mut Vec<ConfigValidationError>) {
        if value.trim().is_empty() {
            errors.push(ConfigValidationError::EmptyValue {
                name: name.to_string(),
            });
        }
    }

    fn require_port(name: &str, value: u16, errors: &mut Vec<ConfigValidationError>) {
        if value == 0 {
            errors.push(ConfigValidationError::InvalidPort {
                name: name.to_string(),
                value,
            });
        }
    }
}

/// Formats validation errors for display.
#[must_use]
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RelationalDatabaseConfig;

    fn config_with(params: MySqlParams) -> AppConfig {
        AppConfig {
            database: RelationalDatabaseConfig::mysql(params),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::validate(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_port() {
        let config = config_with(MySqlParams {
            port: 0,
            ..MySqlParams::default()
        });

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert!(errors.iter().any(|e| matches!(
            e,
            ConfigValidationError::InvalidPort { name, .. } if name == "database.port"
        )));
    }

    #[test]
    fn test_collects_every_error() {
        let config = config_with(MySqlParams {
            host: String::new(),
            schema: " ".to_string(),
            connect_timeout_secs: 0,
            ..MySqlParams::default()
        });

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigValidationError::EmptyValue {
            name: "database.host".to_string()
        }));
        assert!(errors.contains(&ConfigValidationError::NonPositiveTimeout {
            name: "database.connect_timeout_secs".to_string(),
            value: 0
        }));
    }

    #[test]
    fn test_postgresql_params_validated() {
        let config = AppConfig {
            database: RelationalDatabaseConfig::new(RelationalDatabaseProvider::PostgreSql(
                PostgreSqlParams {
                    user: String::new(),
                    ..PostgreSqlParams::default()
                },
            )),
            ..AppConfig::default()
        };

        let errors = ConfigValidator::validate(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ConfigValidationError::EmptyValue {
                name: "database.user".to_string()
            }]
        );
    }

    #[test]
    fn test_format_validation_errors() {
        let errors = vec![
            ConfigValidationError::EmptyValue {
                name: "database.host".to_string(),
            },
            ConfigValidationError::InvalidPort {
                name: "database.port".to_string(),
                value: 0,
            },
        ];
        let output = format_validation_errors(&errors);
        assert!(output.contains("1. 'database.host' must not be empty"));
        assert!(output.contains("2. Invalid port for database.port"));
    }
}
