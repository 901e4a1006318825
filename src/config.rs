//! Configuration management for the library console

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    /// Directory holding the JSON data files
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
    pub directory: PathBuf,
    pub file_name: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MembershipConfig {
    /// How close to expiry a membership must be before it can be renewed
    pub renewal_window_days: i64,
    pub renewal_period_months: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoansConfig {
    pub extend_by_days: i64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Searches matching more patrons than this ask for a narrower input
    pub max_search_results: usize,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub membership: MembershipConfig,
    #[serde(default)]
    pub loans: LoansConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (LIBRARY_DATA__DIR, LIBRARY_CONSOLE__MAX_SEARCH_RESULTS, ...)
            .add_source(
                Environment::with_prefix("LIBRARY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            // Override data directory from LIBRARY_DATA_DIR env var if present
            .set_override_option("data.dir", env::var("LIBRARY_DATA_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            directory: PathBuf::from("logs"),
            file_name: "library-console.log".to_string(),
        }
    }
}

impl Default for MembershipConfig {
    fn default() -> Self {
        Self {
            renewal_window_days: 30,
            renewal_period_months: 12,
        }
    }
}

impl Default for LoansConfig {
    fn default() -> Self {
        Self { extend_by_days: 14 }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            max_search_results: 20,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(config.console.max_search_results, 20);
        assert_eq!(config.membership.renewal_period_months, 12);
        assert_eq!(config.loans.extend_by_days, 14);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .add_source(config::File::from_str(
                "[console]\nmax_search_results = 5\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.console.max_search_results, 5);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.membership.renewal_window_days, 30);
    }
}
