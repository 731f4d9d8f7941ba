use std::env;

use chrono::Duration;
use config::builder::ConfigBuilder;
use config::builder::DefaultState;
use config::ConfigError;
use config::Environment;
use config::File;
use secrecy::SecretString;
use serde::Deserialize;
use serde::Deserializer;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

/// Token signing configuration.
///
/// `Debug` never prints the secret.
#[derive(Debug, Deserialize)]
pub struct JwtConfig {
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: SecretString,
    pub expiration_minutes: i64,
    pub leeway_seconds: u64,
}

impl JwtConfig {
    /// Lifetime of issued tokens.
    ///
    /// # Errors
    /// * `ConfigError::Message` - `expiration_minutes` is not positive or
    ///   does not fit a `Duration`
    pub fn token_ttl(&self) -> Result<Duration, ConfigError> {
        if self.expiration_minutes <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_minutes must be positive, got {}",
                self.expiration_minutes
            )));
        }

        Duration::try_minutes(self.expiration_minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.expiration_minutes is out of range: {}",
                self.expiration_minutes
            ))
        })
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}

/// Builder preloaded with the built-in defaults.
fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    config::Config::builder()
        .set_default("database.max_connections", 5)?
        .set_default("server.http_port", 8000)?
        .set_default("jwt.expiration_minutes", 30)?
        .set_default("jwt.leeway_seconds", 0)
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, JWT__SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = builder_with_defaults()?
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: JWT__SECRET=... overrides jwt.secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        self.jwt.token_ttl()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use config::FileFormat;
    use secrecy::ExposeSecret;

    use super::*;

    fn from_toml(source: &str) -> Result<Config, ConfigError> {
        builder_with_defaults()?
            .add_source(File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize::<Config>()?
            .validate()
    }

    fn with_expiration(minutes: i64) -> Result<Config, ConfigError> {
        from_toml(&format!(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            expiration_minutes = {}
            "#,
            minutes
        ))
    }

    #[test]
    fn test_defaults_apply() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .expect("Failed to load config");

        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.server.http_port, 8000);
        assert_eq!(config.jwt.expiration_minutes, 30);
        assert_eq!(config.jwt.leeway_seconds, 0);
        assert_eq!(
            config.jwt.secret.expose_secret(),
            "test-secret-key-for-jwt-signing-at-least-32-bytes"
        );
    }

    #[test]
    fn test_secret_is_required() {
        let result = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"
            "#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = from_toml(
            r#"
            [database]
            url = "postgresql://localhost/identity"

            [jwt]
            secret = "test-secret-key-for-jwt-signing-at-least-32-bytes"
            "#,
        )
        .expect("Failed to load config");

        let rendered = format!("{:?}", config.jwt);
        assert!(!rendered.contains("test-secret-key"));
    }

    #[test]
    fn test_token_ttl_from_minutes() {
        let config = with_expiration(45).expect("Failed to load config");
        assert_eq!(config.jwt.token_ttl().unwrap(), Duration::minutes(45));
    }

    #[test]
    fn test_non_positive_expiration_is_rejected() {
        assert!(with_expiration(0).is_err());
        assert!(with_expiration(-5).is_err());
    }

    #[test]
    fn test_out_of_range_expiration_is_rejected() {
        assert!(with_expiration(i64::MAX).is_err());
    }
}
