//! Error type shared by the word store and the box.

use crate::domain::WordId;

/// Failures surfaced by store and scheduler operations.
///
/// All of them are local and synchronous; nothing here is worth retrying.
/// An empty review pool is not an error (`question` returns `None`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxError {
    /// Lookup by an identifier the store has never seen
    NotFound(WordId),
    /// Random choice over an empty collection
    EmptyCollection,
    /// Not enough distinct words to build an options set
    InsufficientWords { needed: usize, available: usize },
    /// Malformed import record, settings, or config text
    InvalidInput(String),
    /// Forward/backward called without a preceding question
    NoPendingQuestion,
}

impl std::fmt::Display for BoxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoxError::NotFound(id) => write!(f, "Word not found: {}", id),
            BoxError::EmptyCollection => write!(f, "Cannot choose from an empty collection"),
            BoxError::InsufficientWords { needed, available } => write!(
                f,
                "Need {} distinct words for answer options, store has {}",
                needed, available
            ),
            BoxError::InvalidInput(reason) => write!(f, "Invalid input: {}", reason),
            BoxError::NoPendingQuestion => write!(f, "No pending question to answer"),
        }
    }
}

impl BoxError {
    /// Returns a short message suitable for showing to a learner.
    pub fn user_message(&self) -> &'static str {
        match self {
            BoxError::NotFound(_) => "Word not found",
            BoxError::EmptyCollection => "Nothing to choose from",
            BoxError::InsufficientWords { .. } => "Not enough words for multiple choice",
            BoxError::InvalidInput(_) => "Invalid word list or settings",
            BoxError::NoPendingQuestion => "No question has been asked yet",
        }
    }
}

impl std::error::Error for BoxError {}

impl From<serde_json::Error> for BoxError {
    fn from(error: serde_json::Error) -> Self {
        BoxError::InvalidInput(error.to_string())
    }
}

impl From<toml::de::Error> for BoxError {
    fn from(error: toml::de::Error) -> Self {
        BoxError::InvalidInput(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BoxError>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
    /// Log the error at warn level and return the default
    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        match self {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                T::default()
            }
        }
    }
}
