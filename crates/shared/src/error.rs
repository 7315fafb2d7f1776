//! Errors surfaced to API callers and the server binary.

use thiserror::Error;

use crate::types::PropertyId;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// A report was requested for a property the caller did not supply.
    #[error("Unknown property: {0}")]
    UnknownProperty(PropertyId),

    /// The report parameters cannot be honored (e.g. a year outside the calendar).
    #[error("Invalid report request: {0}")]
    InvalidRequest(String),

    /// The records were accepted but their totals cannot be represented.
    #[error("Figures cannot be reported: {0}")]
    Unreportable(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::UnknownProperty(_) => 404,
            Self::InvalidRequest(_) => 400,
            Self::Unreportable(_) => 422,
            Self::Config(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownProperty(_) => "UNKNOWN_PROPERTY",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Unreportable(_) => "UNREPORTABLE",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true when the fault lies with the service, not the caller.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::UnknownProperty(PropertyId::new()), 404, "UNKNOWN_PROPERTY")]
    #[case(AppError::InvalidRequest(String::new()), 400, "INVALID_REQUEST")]
    #[case(AppError::Unreportable(String::new()), 422, "UNREPORTABLE")]
    #[case(AppError::Config(String::new()), 500, "CONFIG_ERROR")]
    #[case(AppError::Internal(String::new()), 500, "INTERNAL_ERROR")]
    fn test_status_and_code(#[case] err: AppError, #[case] status: u16, #[case] code: &str) {
        assert_eq!(err.status_code(), status);
        assert_eq!(err.error_code(), code);
        assert_eq!(err.is_server_error(), status >= 500);
    }

    #[test]
    fn test_unknown_property_names_the_id() {
        let id = PropertyId::new();
        assert_eq!(
            AppError::UnknownProperty(id).to_string(),
            format!("Unknown property: {id}")
        );
    }

    #[test]
    fn test_config_error_conversion() {
        let err: AppError = config::ConfigError::Message("missing key".into()).into();
        assert_eq!(err.error_code(), "CONFIG_ERROR");
        assert!(err.to_string().contains("missing key"));
    }
}
