use thiserror::Error;

pub type Result<T> = std::result::Result<T, TablyError>;

#[derive(Error, Debug)]
pub enum TablyError {
    #[error("Backend rejected the request (status {status}): {message}")]
    Backend { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("State file error: {0}")]
    State(#[from] serde_json::Error),
}
