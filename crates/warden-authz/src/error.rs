use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthzError {
    #[error("invalid permission '{0}': expected verb:resource")]
    InvalidPermission(String),
    #[error("unknown role '{0}'")]
    UnknownRole(String),
    #[error("unknown resource action '{action}' on {resource}")]
    UnknownAction { resource: String, action: String },
}

pub type AuthzResult<T> = Result<T, AuthzError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_variants() {
        assert_eq!(
            AuthzError::InvalidPermission("users".to_string()).to_string(),
            "invalid permission 'users': expected verb:resource"
        );
        assert_eq!(
            AuthzError::UnknownRole("root".to_string()).to_string(),
            "unknown role 'root'"
        );
        let err = AuthzError::UnknownAction {
            resource: "s3".to_string(),
            action: "Format Disk".to_string(),
        };
        assert!(err.to_string().contains("Format Disk"));
    }
}
