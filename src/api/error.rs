use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Endpoint returned status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
