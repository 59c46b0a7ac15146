use crate::model::ValidationErrorDetail;

/// Errors returned by the inspection backend client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `details` is empty when the body carried no structured field errors.
    #[error("server rejected the request ({status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Per-field rejections from the error body, if any.
        details: Vec<ValidationErrorDetail>,
    },

    /// A success body could not be decoded.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// Structured field errors carried by the response, if any.
    pub fn details(&self) -> &[ValidationErrorDetail] {
        match self {
            Self::Rejected { details, .. } => details.as_slice(),
            Self::Transport(_) | Self::Decode(_) => &[],
        }
    }
}
