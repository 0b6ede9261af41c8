use thiserror::Error;

/// Fatal configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found; set {0} in the environment or a .env file")]
    MissingApiKey(String),

    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from persisted preference storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error: {0}")]
    Io(String),

    #[error("storage serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_display() {
        let err = ConfigError::MissingApiKey("GEMINI_API_KEY".to_string());
        assert!(err.to_string().contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_storage_error_display() {
        let err = StorageError::Io("permission denied".to_string());
        assert_eq!(err.to_string(), "storage I/O error: permission denied");
    }
}
