//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `locus.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Image bucket settings.
    pub object_storage: ObjectStorageConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// S3 bucket configuration. Credentials come from the AWS provider chain.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ObjectStorageConfig {
    /// Bucket receiving location images.
    pub bucket: String,
    /// AWS region of the bucket.
    pub region: String,
    /// Custom S3 endpoint (MinIO, `LocalStack`, …).
    pub endpoint_url: Option<String>,
    /// Base URL prefixed to object keys in public URLs.
    pub public_base_url: Option<String>,
    /// Use path-style bucket addressing.
    pub force_path_style: bool,
    /// Upload objects with the `public-read` ACL.
    pub public_read: bool,
}

impl Config {
    /// Load configuration from `locus.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("locus.toml")?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("LOCUS_HOST") {
            self.server.host = val;
        }
        if let Some(port) = var("LOCUS_PORT").and_then(|val| val.parse().ok()) {
            self.server.port = port;
        }
        if let Some(val) = var("LOCUS_BIND")
            && let Some((host, port)) = val.rsplit_once(':')
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("LOCUS_DATABASE_URL") {
            self.database.url = val;
        }
        if let Some(val) = var("LOCUS_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("AWS_S3_BUCKET_NAME") {
            self.object_storage.bucket = val;
        }
        if let Some(val) = var("AWS_REGION") {
            self.object_storage.region = val;
        }
        if let Some(val) = var("LOCUS_S3_ENDPOINT") {
            self.object_storage.endpoint_url = Some(val);
        }
        if let Some(val) = var("LOCUS_S3_PUBLIC_BASE_URL") {
            self.object_storage.public_base_url = Some(val);
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.object_storage.bucket.is_empty() {
            return Err(ConfigError::Validation(
                "object_storage.bucket (or AWS_S3_BUCKET_NAME) must be set".to_string(),
            ));
        }
        if self.object_storage.region.is_empty() {
            return Err(ConfigError::Validation(
                "object_storage.region must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Build the S3 adapter configuration.
    #[must_use]
    pub fn s3(&self) -> locus_adapter_object_storage_s3::Config {
        let storage = &self.object_storage;
        locus_adapter_object_storage_s3::Config {
            bucket: storage.bucket.clone(),
            region: storage.region.clone(),
            endpoint_url: storage.endpoint_url.clone(),
            public_base_url: storage.public_base_url.clone(),
            force_path_style: storage.force_path_style,
            public_read: storage.public_read,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:locus.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,tower_http=debug,sqlx=warn".to_string(),
        }
    }
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: "us-east-1".to_string(),
            endpoint_url: None,
            public_base_url: None,
            force_path_style: false,
            public_read: true,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn with_bucket() -> Config {
        let mut config = Config::default();
        config.object_storage.bucket = "locus-images".to_string();
        config
    }

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:locus.db?mode=rwc");
        assert_eq!(config.object_storage.region, "us-east-1");
        assert!(config.object_storage.public_read);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [object_storage]
            bucket = 'locus-images'
            region = 'sa-east-1'
            endpoint_url = 'http://localhost:9000'
            public_base_url = 'http://localhost:9000/locus-images'
            force_path_style = true
            public_read = false
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.object_storage.bucket, "locus-images");
        assert_eq!(config.object_storage.region, "sa-east-1");
        assert_eq!(
            config.object_storage.endpoint_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(config.object_storage.force_path_style);
        assert!(!config.object_storage.public_read);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_apply_env_overrides() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[
            ("LOCUS_BIND", "127.0.0.1:8081"),
            ("LOCUS_DATABASE_URL", "sqlite::memory:"),
            ("RUST_LOG", "trace"),
            ("AWS_S3_BUCKET_NAME", "from-env"),
            ("AWS_REGION", "eu-west-3"),
        ]));
        assert_eq!(config.bind_addr(), "127.0.0.1:8081");
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.logging.filter, "trace");
        assert_eq!(config.object_storage.bucket, "from-env");
        assert_eq!(config.object_storage.region, "eu-west-3");
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_env_overrides(env(&[("LOCUS_PORT", "eighty")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = with_bucket();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_missing_bucket() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn should_accept_valid_config() {
        assert!(with_bucket().validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_build_s3_config() {
        let config = with_bucket();
        let s3 = config.s3();
        assert_eq!(s3.bucket, "locus-images");
        assert_eq!(
            s3.public_base_url(),
            "https://locus-images.s3.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
