//! Configuration loading and typed config structures.
//!
//! The service reads `scholar-config.yaml` from the working directory, or
//! the file named by `SCHOLAR_CONFIG`. Every key is optional; a missing
//! file yields the defaults below.
//!
//! ```yaml
//! server:
//!   host: "0.0.0.0"
//!   port: 5000
//! logging:
//!   level: "info"
//!   json: false
//! engine:
//!   defuzzification: centroid
//!   parallel_axes: false
//!   degenerate_fallback: null
//! ```

use std::path::{Path, PathBuf};

use scholar_fuzzy::Defuzzification;
use serde::Deserialize;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "scholar-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is not acceptable.
    #[error("invalid config value for '{key}': {reason}")]
    Invalid {
        /// Dotted key or environment variable name.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScholarConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: HttpConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Inference engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl ScholarConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values:
    /// - `SCHOLAR_HOST` overrides `server.host`
    /// - `SCHOLAR_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.server.apply_env_overrides()?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Load from `SCHOLAR_CONFIG`, or [`DEFAULT_CONFIG_FILE`] when unset.
    ///
    /// A missing file is not an error; the defaults (with environment
    /// overrides) are returned instead.
    ///
    /// # Errors
    ///
    /// Same as [`from_file`](Self::from_file) for a file that exists.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("SCHOLAR_CONFIG")
            .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Self::parse("")
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl HttpConfig {
    /// Apply `SCHOLAR_HOST` and `SCHOLAR_PORT`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `SCHOLAR_PORT` is not a port number.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("SCHOLAR_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("SCHOLAR_PORT") {
            self.port = val.parse().map_err(|e| ConfigError::Invalid {
                key: "SCHOLAR_PORT".to_owned(),
                reason: format!("{e}"),
            })?;
        }
        Ok(())
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Inference engine settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// How aggregated sets are collapsed to a crisp value.
    #[serde(default)]
    pub defuzzification: Defuzzification,

    /// Evaluate the eligibility and scholarship axes on separate threads.
    #[serde(default)]
    pub parallel_axes: bool,

    /// Normalized eligibility score reported when no rule fires. `None`
    /// rejects the input. No scholarship category is ever substituted.
    #[serde(default)]
    pub degenerate_fallback: Option<f64>,
}

impl EngineConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(fallback) = self.degenerate_fallback
            && !(0.0..=1.0).contains(&fallback)
        {
            return Err(ConfigError::Invalid {
                key: "engine.degenerate_fallback".to_owned(),
                reason: format!("{fallback} is outside [0, 1]"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_host() -> String {
    String::from("0.0.0.0")
}

const fn default_port() -> u16 {
    5000
}

fn default_log_level() -> String {
    String::from("info")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ScholarConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
        assert_eq!(config.engine.defuzzification, Defuzzification::Centroid);
        assert!(!config.engine.parallel_axes);
        assert!(config.engine.degenerate_fallback.is_none());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  port: 8088

logging:
  level: "debug"
  json: true

engine:
  defuzzification: mom
  parallel_axes: true
  degenerate_fallback: 0.0
"#;

        let config = ScholarConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.engine.defuzzification, Defuzzification::MeanOfMaximum);
        assert!(config.engine.parallel_axes);
        assert_eq!(config.engine.degenerate_fallback.map(f64::to_bits), Some(0.0_f64.to_bits()));
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "engine:\n  defuzzification: bisector\n";
        let config = ScholarConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        // Method is overridden
        assert_eq!(config.engine.defuzzification, Defuzzification::Bisector);
        // Everything else uses defaults
        assert_eq!(config.logging.level, "info");
        assert!(!config.engine.parallel_axes);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = ScholarConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn unknown_method_is_rejected() {
        let config = ScholarConfig::parse("engine:\n  defuzzification: median\n");
        assert!(matches!(config, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn fallback_outside_unit_interval_is_rejected() {
        let config = ScholarConfig::parse("engine:\n  degenerate_fallback: 1.5\n");
        assert!(matches!(config, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(DEFAULT_CONFIG_FILE);
        if path.exists() {
            let config = ScholarConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
