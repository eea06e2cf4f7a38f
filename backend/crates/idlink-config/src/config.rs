use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, DEFAULT_CONFIG_DIR,
    DatabaseConfig, LoggingConfig, OAuthConfig, OAuthProviderConfig, ServerConfig,
    ValidationConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub oauth: OAuthConfig,
    pub logging: LoggingConfig,
    pub validation: ValidationConfig,
}

impl Config {
    /// Load configuration.
    ///
    /// Loading order:
    /// 1. IDLINK_CONFIG_DIR env var, else ./.idlink/
    /// 2. Auto-create the config directory if it doesn't exist
    /// 3. config.toml if it exists, else defaults
    /// 4. IDLINK_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: IDLINK_CONFIG_DIR env var > ./.idlink/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.database.validate()?;
        self.auth.validate()?;
        self.oauth.validate()?;
        self.validation.validate()?;

        Ok(())
    }

    /// Absolute path to the database file.
    pub fn database_path(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.database.path))
    }

    /// Absolute path to the log file, if file logging is configured.
    pub fn log_file_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        match &self.logging.file {
            Some(file) => Ok(Some(
                Self::config_dir()?.join(&self.logging.dir).join(file),
            )),
            None => Ok(None),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!(
            "  database: {} (max {} connections)",
            self.database.path, self.database.max_connections
        );
        info!(
            "  auth: HS256 secret {}, ttl={}s, leeway={}s",
            if self.auth.jwt_secret.is_some() {
                "set"
            } else {
                "missing"
            },
            self.auth.token_ttl_secs,
            self.auth.leeway_secs
        );
        info!(
            "  hashing: argon2id m={}KiB t={} p={}",
            self.auth.hash_memory_kib, self.auth.hash_iterations, self.auth.hash_parallelism
        );
        info!(
            "  oauth: frontend={}, google={}, github={}",
            self.oauth.frontend_url,
            provider_state(&self.oauth.google),
            provider_state(&self.oauth.github)
        );
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
        info!(
            "  validation: password>={}, name<={}, email<={}",
            self.validation.min_password_length,
            self.validation.max_name_length,
            self.validation.max_email_length
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("IDLINK_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("IDLINK_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("IDLINK_DATABASE_PATH", &mut self.database.path);
        Self::apply_env_parse(
            "IDLINK_DATABASE_MAX_CONNECTIONS",
            &mut self.database.max_connections,
        );

        // Auth
        Self::apply_env_option_string("IDLINK_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_parse("IDLINK_AUTH_TOKEN_TTL_SECS", &mut self.auth.token_ttl_secs);
        Self::apply_env_parse("IDLINK_AUTH_LEEWAY_SECS", &mut self.auth.leeway_secs);
        Self::apply_env_parse(
            "IDLINK_AUTH_HASH_MEMORY_KIB",
            &mut self.auth.hash_memory_kib,
        );
        Self::apply_env_parse(
            "IDLINK_AUTH_HASH_ITERATIONS",
            &mut self.auth.hash_iterations,
        );
        Self::apply_env_parse(
            "IDLINK_AUTH_HASH_PARALLELISM",
            &mut self.auth.hash_parallelism,
        );

        // OAuth
        Self::apply_env_string("IDLINK_OAUTH_FRONTEND_URL", &mut self.oauth.frontend_url);
        Self::apply_env_provider("IDLINK_OAUTH_GOOGLE", &mut self.oauth.google);
        Self::apply_env_provider("IDLINK_OAUTH_GITHUB", &mut self.oauth.github);

        // Logging
        Self::apply_env_parse("IDLINK_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("IDLINK_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("IDLINK_LOG_FILE", &mut self.logging.file);

        // Validation
        Self::apply_env_parse(
            "IDLINK_VALIDATION_MIN_PASSWORD_LENGTH",
            &mut self.validation.min_password_length,
        );
        Self::apply_env_parse(
            "IDLINK_VALIDATION_MAX_NAME_LENGTH",
            &mut self.validation.max_name_length,
        );
        Self::apply_env_parse(
            "IDLINK_VALIDATION_MAX_EMAIL_LENGTH",
            &mut self.validation.max_email_length,
        );
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }

    /// Helper: `{prefix}_CLIENT_ID` / `_CLIENT_SECRET` / `_REDIRECT_URL`; any one enables the provider
    fn apply_env_provider(prefix: &str, target: &mut Option<OAuthProviderConfig>) {
        let client_id = std::env::var(format!("{}_CLIENT_ID", prefix)).ok();
        let client_secret = std::env::var(format!("{}_CLIENT_SECRET", prefix)).ok();
        let redirect_url = std::env::var(format!("{}_REDIRECT_URL", prefix)).ok();

        if client_id.is_none() && client_secret.is_none() && redirect_url.is_none() {
            return;
        }

        let provider = target.get_or_insert_with(OAuthProviderConfig::default);
        if let Some(client_id) = client_id {
            provider.client_id = client_id;
        }
        if let Some(client_secret) = client_secret {
            provider.client_secret = client_secret;
        }
        if let Some(redirect_url) = redirect_url {
            provider.redirect_url = redirect_url;
        }
    }
}

fn provider_state(provider: &Option<OAuthProviderConfig>) -> &'static str {
    if provider.is_some() {
        "enabled"
    } else {
        "disabled"
    }
}
