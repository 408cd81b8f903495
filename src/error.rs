use std::num::ParseFloatError;

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Element `{selector}` not found on {url}")]
    MissingElement { url: String, selector: &'static str },

    #[error("No product links found on {url}")]
    NoProducts { url: String },

    #[error("Browser task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Record {index}: missing `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("Record {index}: cannot parse weight `{raw}`")]
    InvalidWeight {
        index: usize,
        raw: String,
        #[source]
        source: ParseFloatError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
