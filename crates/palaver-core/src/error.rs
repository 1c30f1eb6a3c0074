use thiserror::Error;

/// Top-level error type for the Palaver widget core.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for PalaverError`
/// so that the `?` operator works seamlessly across crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PalaverError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Capture error: {0}")]
    Capture(String),

    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for PalaverError {
    fn from(err: toml::de::Error) -> Self {
        PalaverError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for PalaverError {
    fn from(err: toml::ser::Error) -> Self {
        PalaverError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for PalaverError {
    fn from(err: serde_json::Error) -> Self {
        PalaverError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Palaver operations.
pub type Result<T> = std::result::Result<T, PalaverError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PalaverError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");

        let err = PalaverError::Capture("no speech detected".to_string());
        assert_eq!(err.to_string(), "Capture error: no speech detected");

        let err = PalaverError::Backend("connection refused".to_string());
        assert_eq!(err.to_string(), "Backend error: connection refused");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PalaverError = io_err.into();
        assert!(matches!(err, PalaverError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not [ valid").unwrap_err();
        let err: PalaverError = toml_err.into();
        assert!(matches!(err, PalaverError::Config(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: PalaverError = json_err.into();
        assert!(matches!(err, PalaverError::Serialization(_)));
    }
}
