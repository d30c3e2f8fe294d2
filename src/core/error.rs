//! Error types for the logging pipeline

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Popping a handler or processor off an empty stack
    #[error("cannot pop from empty {stack} stack")]
    EmptyStack { stack: &'static str },

    /// Level name outside the closed set
    #[error("unknown level name: '{name}'")]
    UnknownLevelName { name: String },

    /// Level value outside the closed set
    #[error("unknown level value: {value}")]
    UnknownLevelValue { value: u16 },

    /// Registry lookup for a name that was never added
    #[error("no logger registered under '{name}'")]
    LoggerNotFound { name: String },

    /// Registry add for a name that is already taken
    #[error("logger '{name}' is already registered")]
    DuplicateLogger { name: String },

    /// Formatter error with format type
    #[error("formatter error ({format}): {message}")]
    Formatter { format: String, message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error from a writer-backed handler
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Every handler in a fallback group failed
    #[error("all {attempts} fallback handlers failed")]
    FallbackExhausted {
        attempts: usize,
        #[source]
        source: Box<PipelineError>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl PipelineError {
    /// Create an empty-stack error
    pub fn empty_stack(stack: &'static str) -> Self {
        PipelineError::EmptyStack { stack }
    }

    /// Create a formatter error
    pub fn formatter(format: impl Into<String>, message: impl Into<String>) -> Self {
        PipelineError::Formatter {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PipelineError::Other(msg.into())
    }
}
