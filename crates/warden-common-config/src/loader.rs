//! Configuration file loading and parsing.

use crate::types::WardenConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read config: {source}")]
    ReadError {
        #[from]
        source: std::io::Error,
    },

    #[error("invalid YAML at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError { line: Option<usize>, message: String },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("environment variable not found: {var}")]
    EnvVarNotFound { var: String },
}

/// Configuration loader.
pub struct ConfigLoader {
    config_path: PathBuf,
    required: bool,
}

impl ConfigLoader {
    /// Relative location of the config file inside a project directory.
    pub const DEFAULT_RELATIVE_PATH: &'static str = ".warden/config.yaml";

    /// Create a loader for the given project directory.
    ///
    /// A missing `.warden/config.yaml` yields defaults.
    pub fn new(project_dir: impl AsRef<Path>) -> Self {
        Self {
            config_path: project_dir.as_ref().join(Self::DEFAULT_RELATIVE_PATH),
            required: false,
        }
    }

    /// Create a loader for an explicit config file, which must exist.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            config_path: path.as_ref().to_path_buf(),
            required: true,
        }
    }

    /// Path this loader reads from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Load and validate the configuration.
    pub fn load(&self) -> Result<WardenConfig, ConfigError> {
        if !self.config_path.exists() {
            if self.required {
                return Err(ConfigError::NotFound {
                    path: self.config_path.clone(),
                });
            }
            return Ok(WardenConfig::default());
        }

        let contents = std::fs::read_to_string(&self.config_path)?;
        let config = Self::parse(&contents)?;
        validate(&config)?;
        Ok(config)
    }

    /// Parse YAML text after environment expansion, without validation.
    pub fn parse(contents: &str) -> Result<WardenConfig, ConfigError> {
        let expanded = expand_env_vars(contents)?;
        serde_yaml::from_str(&expanded).map_err(|e| ConfigError::ParseError {
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })
    }

    /// Save configuration to the loader's path.
    pub fn save(&self, config: &WardenConfig) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(config).map_err(|e| ConfigError::ParseError {
            line: None,
            message: e.to_string(),
        })?;

        std::fs::write(&self.config_path, yaml)?;
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new(std::env::current_dir().unwrap_or_default())
    }
}

/// Expand environment variables in the form `${VAR}` or `${VAR:-default}`.
pub fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
    let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}").map_err(|e| {
        ConfigError::ValidationError {
            message: e.to_string(),
        }
    })?;

    let mut result = String::with_capacity(content.len());
    let mut last = 0;
    for cap in re.captures_iter(content) {
        let Some(full) = cap.get(0) else { continue };
        let var_name = &cap[1];
        let value = match std::env::var(var_name) {
            Ok(v) => v,
            Err(_) => match cap.get(2) {
                Some(default) => default.as_str().to_string(),
                None => {
                    return Err(ConfigError::EnvVarNotFound {
                        var: var_name.to_string(),
                    })
                }
            },
        };
        result.push_str(&content[last..full.start()]);
        result.push_str(&value);
        last = full.end();
    }
    result.push_str(&content[last..]);

    Ok(result)
}

/// Validate configuration values.
pub fn validate(config: &WardenConfig) -> Result<(), ConfigError> {
    let fail = |message: String| Err(ConfigError::ValidationError { message });

    for (name, route) in [
        ("guard.login_route", &config.guard.login_route),
        ("guard.access_denied_route", &config.guard.access_denied_route),
        ("guard.role_assumption_route", &config.guard.role_assumption_route),
    ] {
        if !route.starts_with('/') {
            return fail(format!("{name} must start with '/', got '{route}'"));
        }
    }

    if config.session.state_file.trim().is_empty() {
        return fail("session.state_file must not be empty".to_string());
    }

    let token = Regex::new(r"^(\*|[A-Za-z0-9_.-]+:[A-Za-z0-9_./*-]+)$").map_err(|e| {
        ConfigError::ValidationError {
            message: e.to_string(),
        }
    })?;

    for (i, route) in config.routes.iter().enumerate() {
        if !route.path.starts_with('/') {
            return fail(format!("routes[{i}].path must start with '/'"));
        }
        if route.permissions.is_empty() {
            return fail(format!("routes[{i}] ({}) lists no permissions", route.path));
        }
        if let Some(bad) = route.permissions.iter().find(|p| !token.is_match(p)) {
            return fail(format!(
                "routes[{i}] ({}) has malformed permission '{bad}', expected verb:resource",
                route.path
            ));
        }
    }

    Ok(())
}
