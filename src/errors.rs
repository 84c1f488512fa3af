use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable get data from source\nFrom: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid header value\nFrom: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("Invalid url `{0}`")]
    InvalidUrl(String),

    /// Raised by entry points the source deliberately does not provide.
    #[error("`{0}` is not supported by this source")]
    Unsupported(&'static str),
}
