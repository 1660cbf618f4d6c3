use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickerError {
    #[error("config error: {0}")]
    Config(String),

    #[error("credentials error ({}): {reason}", .path.display())]
    Credentials { path: PathBuf, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} {url}")]
    Status { status: u16, url: String },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("template error: {0}")]
    Template(String),
}

pub type TickerResult<T> = Result<T, TickerError>;
