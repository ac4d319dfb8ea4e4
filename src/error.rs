use thiserror::Error;

/// Errors surfaced by the library. The session engine itself never fails;
/// these cover the edges around it (files, word lists, summaries).
#[derive(Error, Debug)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no word list bundled for language '{0}'")]
    UnknownLanguage(String),

    #[error("statistics requested before the session finished")]
    SessionNotFinished,

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("terminal error: {0}")]
    Terminal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
