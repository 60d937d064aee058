use reqwest::StatusCode;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("{0} must be set and non-empty")]
    MissingSetting(&'static str),

    #[error("{key} is invalid: {reason}")]
    InvalidSetting { key: &'static str, reason: String },

    #[error("Unsupported database url `{url}`: {reason}")]
    InvalidDatabaseUrl { url: String, reason: String },

    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    #[error("Upstream error with status {status}: {body}")]
    UpstreamStatus { status: StatusCode, body: String },

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Statement failed ({}): {message}", .code.as_deref().unwrap_or("no code"))]
    Statement {
        message: String,
        code: Option<String>,
    },

    #[error("Protocol error: {0}")]
    ProtocolError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Duplicate resource name: {0}")]
    DuplicateName(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ReportError {
    /// True when the server refused the credentials rather than the request itself.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ReportError::UpstreamStatus {
                status: StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                ..
            }
        )
    }
}
