use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
