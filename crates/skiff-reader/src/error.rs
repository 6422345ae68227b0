use thiserror::Error;

pub type ReaderResult<T> = Result<T, ReaderError>;

/// Failure raised by a backend load, concat, or query function.
///
/// Backend bindings construct these themselves; the dispatch core never
/// wraps or translates them, so the failure stays diagnosable at the
/// backend's own abstraction level.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReaderError {
    /// A load, concat, or engine entry point could not be resolved to a
    /// callable. Fatal for the call that needed it.
    #[error("cannot resolve function: {0}")]
    Resolution(String),
    #[error("missing argument: {0}")]
    MissingArgument(String),
    #[error("not supported: {0}")]
    NotSupported(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ReaderError {
    pub fn resolution(name: impl Into<String>) -> Self {
        ReaderError::Resolution(name.into())
    }

    pub fn missing(message: impl Into<String>) -> Self {
        ReaderError::MissingArgument(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        ReaderError::NotSupported(message.into())
    }
}
