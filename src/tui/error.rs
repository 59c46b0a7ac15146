use crate::api::ApiError;

/// Errors that can occur in the TUI layer.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// An I/O error occurred (terminal, event reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be built.
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_converts() {
        let err: AppError = std::io::Error::other("terminal gone").into();
        assert!(matches!(err, AppError::Io(_)));
        assert_eq!(err.to_string(), "I/O error: terminal gone");
    }

    #[test]
    fn api_error_converts() {
        let err: AppError = ApiError::Rejected {
            status: 503,
            details: vec![],
        }
        .into();
        assert!(matches!(err, AppError::Api(_)));
        assert!(err.to_string().starts_with("API error: "));
    }
}
