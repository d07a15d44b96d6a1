use thiserror::Error;

#[derive(Error, Debug)]
pub enum StreakError {
    #[error("Invalid streak row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    #[error("Invalid selector {selector}: {message}")]
    Selector { selector: String, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status {status} fetching {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid report template: {0}")]
    Template(#[from] handlebars::TemplateError),

    #[error("Report rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, StreakError>;
