use thiserror::Error;

use crate::config::{ACCESS_TOKEN_VAR, USERNAME_VAR};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "GitHub credentials are not set. Please set {} and {} environment variables.",
        USERNAME_VAR,
        ACCESS_TOKEN_VAR
    )]
    MissingCredentials,
}

impl ConfigError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConfigError::MissingCredentials => 5,
        }
    }
}
