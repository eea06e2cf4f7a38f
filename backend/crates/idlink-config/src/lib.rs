mod auth_config;
mod config;
mod database_config;
mod error;
mod log_level;
mod logging_config;
mod oauth_config;
mod server_config;
mod validation_config;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use database_config::DatabaseConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use oauth_config::{OAuthConfig, OAuthProviderConfig};
pub use server_config::ServerConfig;
pub use validation_config::ValidationConfig;

const CONFIG_DIR_ENV: &str = "IDLINK_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".idlink";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_DATABASE_FILENAME: &str = "idlink.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
const MIN_DB_MAX_CONNECTIONS: u32 = 1;
const MAX_DB_MAX_CONNECTIONS: u32 = 100;

const MIN_JWT_SECRET_LENGTH: usize = 32;
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;
const MIN_TOKEN_TTL_SECS: i64 = 60;
const MAX_TOKEN_TTL_SECS: i64 = 30 * 86_400;
const DEFAULT_LEEWAY_SECS: u64 = 30;
const MAX_LEEWAY_SECS: u64 = 300;
const DEFAULT_HASH_MEMORY_KIB: u32 = 19_456;
const DEFAULT_HASH_ITERATIONS: u32 = 2;
const DEFAULT_HASH_PARALLELISM: u32 = 1;

const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

#[cfg(test)]
mod tests;
