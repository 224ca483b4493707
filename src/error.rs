pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Upstream returned status {status}: {message}")]
    UpstreamStatus { status: u16, message: String },

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Invalid settings: {0}")]
    Settings(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Reqwest(reqwest::Error),
}

impl Error {
    /// Network-level failures the fetch loops recover from by resetting their accumulator.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }
}

/// Refused, reset or dropped connections, including a body cut off mid-read.
/// Timeouts after the connect phase stay fatal.
pub fn is_transport_failure(err: &reqwest::Error) -> bool {
    err.is_connect() || ((err.is_request() || err.is_body()) && !err.is_timeout())
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if is_transport_failure(&err) {
            Error::Connection(err.to_string())
        } else {
            Error::Reqwest(err)
        }
    }
}
