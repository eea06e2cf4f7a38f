use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

pub const MIN_MIN_PASSWORD_LENGTH: usize = 1;
pub const MAX_MIN_PASSWORD_LENGTH: usize = 128;
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

pub const MIN_NAME_LENGTH: usize = 1;
pub const MAX_NAME_LENGTH: usize = 50;
pub const DEFAULT_MAX_NAME_LENGTH: usize = 50;

pub const MIN_EMAIL_LENGTH: usize = 6;
pub const MAX_EMAIL_LENGTH: usize = 320;
pub const DEFAULT_MAX_EMAIL_LENGTH: usize = 254;

/// Request field limits applied before a request reaches the account service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub min_password_length: usize,
    /// Upper bound for first and last name
    pub max_name_length: usize,
    pub max_email_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            max_name_length: DEFAULT_MAX_NAME_LENGTH,
            max_email_length: DEFAULT_MAX_EMAIL_LENGTH,
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.min_password_length < MIN_MIN_PASSWORD_LENGTH
            || self.min_password_length > MAX_MIN_PASSWORD_LENGTH
        {
            return Err(ConfigError::validation(format!(
                "validation.min_password_length must be {}-{}, got {}",
                MIN_MIN_PASSWORD_LENGTH, MAX_MIN_PASSWORD_LENGTH, self.min_password_length
            )));
        }

        if self.max_name_length < MIN_NAME_LENGTH || self.max_name_length > MAX_NAME_LENGTH {
            return Err(ConfigError::validation(format!(
                "validation.max_name_length must be {}-{}, got {}",
                MIN_NAME_LENGTH, MAX_NAME_LENGTH, self.max_name_length
            )));
        }

        if self.max_email_length < MIN_EMAIL_LENGTH || self.max_email_length > MAX_EMAIL_LENGTH {
            return Err(ConfigError::validation(format!(
                "validation.max_email_length must be {}-{}, got {}",
                MIN_EMAIL_LENGTH, MAX_EMAIL_LENGTH, self.max_email_length
            )));
        }

        Ok(())
    }
}
