use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Invalid response: status {status}: {body}")]
    InvalidResponse {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode response: {0}")]
    DecodeFailed(String),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

impl FetchError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}... (truncated, {} total bytes)", &body[..end], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        FetchError::InvalidResponse {
            status,
            body: Self::truncate_body(body),
        }
    }

    /// Message suitable for showing to the person using the app.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::InvalidUrl(_) => "The request could not be built. Please try again.",
            FetchError::RequestFailed(_) => {
                "Unable to complete your request. Please check your internet connection."
            }
            FetchError::InvalidResponse { .. } => {
                "Invalid response from the server. Please try again."
            }
            FetchError::DecodeFailed(_) => "The data received from the server was invalid. Please try again.",
        }
    }

    /// Status code of the failed response, if the server answered at all.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            FetchError::InvalidResponse { status, .. } => Some(*status),
            FetchError::RequestFailed(e) => e.status(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::DecodeFailed(e.to_string())
    }
}
