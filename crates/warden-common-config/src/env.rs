//! Environment variable handling.

use crate::types::WardenConfig;
use std::env;
use thiserror::Error;

/// Environment variable errors.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("required environment variable not set: {var}")]
    NotSet { var: String },

    #[error("invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },
}

/// Environment variable names.
pub mod vars {
    pub const WARDEN_CONFIG: &str = "WARDEN_CONFIG";
    pub const WARDEN_DATA_DIR: &str = "WARDEN_DATA_DIR";
    pub const WARDEN_LOG_LEVEL: &str = "WARDEN_LOG_LEVEL";
    pub const WARDEN_AUDIT: &str = "WARDEN_AUDIT";
    pub const RUST_LOG: &str = "RUST_LOG";
}

/// Environment access.
pub struct Environment {
    _guard: (),
}

impl Environment {
    /// Load `.env` then `.env.local` from the working directory.
    ///
    /// Missing files are ignored; variables already set are never overridden.
    pub fn init() -> Self {
        let _ = dotenvy::from_filename(".env");
        let _ = dotenvy::from_filename(".env.local");
        Self { _guard: () }
    }

    /// Get a required string variable.
    pub fn require(var: &str) -> Result<String, EnvError> {
        env::var(var).map_err(|_| EnvError::NotSet {
            var: var.to_string(),
        })
    }

    /// Get an optional string variable.
    pub fn get(var: &str) -> Option<String> {
        env::var(var).ok()
    }

    /// Get a variable with a default value.
    pub fn get_or(var: &str, default: &str) -> String {
        env::var(var).unwrap_or_else(|_| default.to_string())
    }

    /// Get a boolean variable.
    pub fn get_bool(var: &str) -> Result<Option<bool>, EnvError> {
        match env::var(var) {
            Ok(v) => parse_bool(&v).map(Some).ok_or_else(|| EnvError::InvalidValue {
                var: var.to_string(),
                message: format!("expected a boolean, got '{v}'"),
            }),
            Err(_) => Ok(None),
        }
    }

    /// Apply `WARDEN_*` overrides on top of a loaded configuration.
    pub fn apply_overrides(config: &mut WardenConfig) -> Result<(), EnvError> {
        if let Some(dir) = Self::get(vars::WARDEN_DATA_DIR) {
            config.session.data_dir = dir;
        }
        if let Some(audit) = Self::get_bool(vars::WARDEN_AUDIT)? {
            config.audit.log_decisions = audit;
        }
        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
