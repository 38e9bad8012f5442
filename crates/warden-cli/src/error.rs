//! CLI error handling.

use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;
use warden_authz::{AccessDenied, AuthzError};
use warden_common_config::{ConfigError, EnvError};
use warden_session::StoreError;

/// Application exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Exit {
    Success = 0,
    GeneralError = 1,
    ConfigError = 2,
    IoError = 3,
    ValidationError = 5,
    NotFound = 6,
    PermissionDenied = 7,
}

impl From<Exit> for ExitCode {
    fn from(exit: Exit) -> Self {
        ExitCode::from(exit as u8)
    }
}

/// CLI error type with context for the user.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    Permission {
        message: String,
        required: Option<String>,
    },

    #[error("{message}")]
    User {
        message: String,
        hint: Option<String>,
    },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config { .. } => "E001",
            Self::Io { .. } => "E002",
            Self::Validation { .. } => "E004",
            Self::NotFound { .. } => "E005",
            Self::Permission { .. } => "E006",
            Self::User { .. } => "E010",
            Self::Other(_) => "E999",
        }
    }

    pub fn exit(&self) -> Exit {
        match self {
            Self::Config { .. } => Exit::ConfigError,
            Self::Io { .. } => Exit::IoError,
            Self::Validation { .. } => Exit::ValidationError,
            Self::NotFound { .. } => Exit::NotFound,
            Self::Permission { .. } => Exit::PermissionDenied,
            Self::User { .. } | Self::Other(_) => Exit::GeneralError,
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        self.exit().into()
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. } => hint.as_deref(),
            Self::User { hint, .. } => hint.as_deref(),
            Self::NotFound { suggestions, .. } if !suggestions.is_empty() => {
                Some("See suggestions below")
            }
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("{resource_type} not found: {resource_name}"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// A check that evaluated to "deny".
    pub fn permission_denied(message: impl Into<String>, required: impl Into<String>) -> Self {
        Self::Permission {
            message: message.into(),
            required: Some(required.into()),
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(Box::new(err)),
            path: None,
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Other(anyhow::anyhow!("JSON serialization failed: {err}"))
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        let path = match &err {
            ConfigError::NotFound { path } => Some(path.display().to_string()),
            _ => None,
        };
        Self::Config {
            message: format!("Configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some(match path {
                Some(p) => format!("Create {p} or drop the --config flag"),
                None => "Check your .warden/config.yaml".to_string(),
            }),
        }
    }
}

impl From<EnvError> for CliError {
    fn from(err: EnvError) -> Self {
        Self::Config {
            message: format!("Environment error: {err}"),
            source: Some(Box::new(err)),
            hint: None,
        }
    }
}

impl From<StoreError> for CliError {
    fn from(err: StoreError) -> Self {
        Self::Io {
            message: format!("State store error: {err}"),
            source: Some(Box::new(err)),
            path: None,
        }
    }
}

impl From<AuthzError> for CliError {
    fn from(err: AuthzError) -> Self {
        match err {
            AuthzError::InvalidPermission(token) => Self::Validation {
                message: format!("invalid permission '{token}': expected verb:resource"),
                field: Some("permission".to_string()),
            },
            AuthzError::UnknownRole(id) => Self::not_found_with_suggestions("role", id, Vec::new()),
            AuthzError::UnknownAction { resource, action } => {
                Self::not_found_with_suggestions("action", format!("{resource}/{action}"), Vec::new())
            }
        }
    }
}

impl From<AccessDenied> for CliError {
    fn from(denied: AccessDenied) -> Self {
        Self::Permission {
            message: denied.to_string(),
            required: None,
        }
    }
}
