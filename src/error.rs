use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("market data request failed (status {status}): {body}")]
    Fetch { status: u16, body: String },

    #[error("invalid market data: {0}")]
    Data(String),

    #[error("indicator computation failed: {0}")]
    Computation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True when the error means the whole run cannot start, as opposed to a
    /// single token's fetch/compute going wrong.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}
