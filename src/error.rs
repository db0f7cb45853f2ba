use thiserror::Error;

/// Fatal configuration errors raised before a session can start.
///
/// Anything that happens after a session is running (input after the end,
/// backward navigation at the first word) is a policy no-op, not an error.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("word list '{0}' not found")]
    WordListMissing(String),

    #[error("word list '{0}' could not be parsed")]
    WordListInvalid(String, #[source] serde_json::Error),

    #[error("word pool '{0}' is empty")]
    EmptyWordPool(String),
}
