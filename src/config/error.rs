//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Limit '{0}' must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("Message limit exceeds maximum allowed (1 MiB)")]
    MessageLimitTooLarge,

    #[error("Idle timeout must be longer than the ping interval")]
    IdleTimeoutTooShort,
}
