//! Configuration module for mediabase.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use crate::media::FieldPolicy;
use crate::template::DEFAULT_URL_TEMPLATE;
use crate::{MediaError, Result};

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file. Empty logs to the console only.
    #[serde(default)]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: String::new(),
        }
    }
}

/// Declaration of one media field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldConfig {
    /// Comma-separated allowed extensions, e.g. `"jpg, png"`.
    #[serde(default)]
    pub types: Option<String>,
    /// Maximum upload size, e.g. `"5MB"`.
    #[serde(default)]
    pub max_size: Option<String>,
    /// URL template overriding the default one.
    #[serde(default)]
    pub url: Option<String>,
}

impl FieldConfig {
    /// Build the validation policy of this field.
    pub fn to_policy(&self) -> Result<FieldPolicy> {
        let policy = FieldPolicy::new(self.types.as_deref(), self.max_size.as_deref())?;
        Ok(match &self.url {
            Some(url) => policy.with_url_template(url.clone()),
            None => policy,
        })
    }
}

/// Media configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MediaConfig {
    /// URL template for fields that do not set their own.
    #[serde(default = "default_url_template")]
    pub url_template: String,
    /// Field declarations keyed by name, e.g. `"product.image"`.
    #[serde(default)]
    pub fields: BTreeMap<String, FieldConfig>,
}

fn default_url_template() -> String {
    DEFAULT_URL_TEMPLATE.to_string()
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            fields: BTreeMap::new(),
        }
    }
}

impl MediaConfig {
    /// Policy for a field. Undeclared fields accept any upload.
    ///
    /// The field's URL template falls back to `url_template`.
    pub fn policy(&self, name: &str) -> Result<FieldPolicy> {
        let policy = match self.fields.get(name) {
            Some(field) => field.to_policy()?,
            None => FieldPolicy::default(),
        };

        Ok(match policy.url_template() {
            Some(_) => policy,
            None => policy.with_url_template(self.url_template.clone()),
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Media configuration.
    #[serde(default)]
    pub media: MediaConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(MediaError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| MediaError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `MEDIABASE_LOG_LEVEL`: Override the log level
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("MEDIABASE_LOG_LEVEL") {
            if !level.is_empty() {
                self.logging.level = level;
            }
        }
    }

    /// Install the global log subscriber from the `[logging]` table.
    pub fn init_logging(&self) -> Result<()> {
        crate::logging::init(&self.logging)
    }

    /// Validate the configuration.
    ///
    /// Every declared field policy is built, so a malformed `max_size` fails
    /// here instead of on the first upload.
    pub fn validate(&self) -> Result<()> {
        for (name, field) in &self.media.fields {
            field
                .to_policy()
                .map_err(|e| MediaError::Config(format!("media field {name:?}: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_empty());
        assert_eq!(config.media.url_template, DEFAULT_URL_TEMPLATE);
        assert!(config.media.fields.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[logging]
level = "debug"
file = "logs/media.log"

[media]
url_template = "/uploads/{{class}}/{{primary_key}}/{{filename}}"

[media.fields."product.image"]
types = "jpg, png"
max_size = "5MB"

[media.fields."product.manual"]
types = "pdf"
url = "/manuals/{{primary_key}}.{{extension}}"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "logs/media.log");
        assert_eq!(config.media.fields.len(), 2);

        let image = config.media.policy("product.image").unwrap();
        assert!(image.allowed_extensions().contains("png"));
        assert_eq!(image.max_bytes(), Some(5 * 1024 * 1024));
        assert_eq!(
            image.url_template(),
            Some("/uploads/{{class}}/{{primary_key}}/{{filename}}")
        );

        let manual = config.media.policy("product.manual").unwrap();
        assert_eq!(
            manual.url_template(),
            Some("/manuals/{{primary_key}}.{{extension}}")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_undeclared_field_is_unrestricted() {
        let config = Config::default();
        let policy = config.media.policy("user.avatar").unwrap();

        assert!(!policy.is_restricted());
        assert_eq!(policy.url_template(), Some(DEFAULT_URL_TEMPLATE));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.media.url_template, DEFAULT_URL_TEMPLATE);
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        assert!(result.is_err());
        if let Err(MediaError::Config(msg)) = result {
            assert!(msg.contains("config parse error"));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_validate_bad_max_size() {
        let toml = r#"
[media.fields."post.cover"]
max_size = "big"
"#;
        let config = Config::parse(toml).unwrap();

        let result = config.validate();
        assert!(result.is_err());
        if let Err(MediaError::Config(msg)) = result {
            assert!(msg.contains("post.cover"));
        } else {
            panic!("Expected Config error");
        }
        assert!(config.media.policy("post.cover").is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(result.is_err());
        assert!(matches!(result, Err(MediaError::Io(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mediabase.toml");
        std::fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_apply_env_overrides_log_level() {
        let original = std::env::var("MEDIABASE_LOG_LEVEL").ok();

        std::env::set_var("MEDIABASE_LOG_LEVEL", "trace");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.logging.level, "trace");

        std::env::set_var("MEDIABASE_LOG_LEVEL", "");
        let mut config = Config::default();
        config.apply_env_overrides();
        assert_eq!(config.logging.level, "info");

        if let Some(val) = original {
            std::env::set_var("MEDIABASE_LOG_LEVEL", val);
        } else {
            std::env::remove_var("MEDIABASE_LOG_LEVEL");
        }
    }
}
