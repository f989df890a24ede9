use clubsite_core::ErrorDetail;
use thiserror::Error;

/// Message stored when a response body could not be decoded as JSON.
pub const INVALID_JSON_MESSAGE: &str = "Invalid JSON response from server.";

/// Internal failure taxonomy of a single request.
///
/// These never cross the fetcher boundary as errors; `Resource` converts
/// them into the `ErrorDetail` stored in `FetchState`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("request timed out")]
    Timeout,
    #[error("response body was not valid json")]
    Decode,
    #[error("http status {status}")]
    Http { status: u16, detail: ErrorDetail },
}

impl RequestError {
    /// The detail a page should render for this failure.
    pub fn into_detail(self) -> ErrorDetail {
        match self {
            Self::Http { detail, .. } => detail,
            Self::Decode => ErrorDetail::message(INVALID_JSON_MESSAGE),
            Self::InvalidUrl(_) | Self::Network(_) | Self::Timeout => ErrorDetail::generic(),
        }
    }
}
