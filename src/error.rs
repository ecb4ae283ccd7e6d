/// Errors raised below the presentation layer.
///
/// State holders turn these into the `error` string shown by the screens.
#[derive(Debug, thiserror::Error)]
pub enum TodoError {
    /// SQLite rejected a statement or could not be opened.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A blocking storage call panicked or was cancelled.
    #[error("storage worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file exists but is not valid JSON for [`crate::config::FileConfig`].
    #[error("invalid config file: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TodoError>;
