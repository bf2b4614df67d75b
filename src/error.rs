use thiserror::Error;

#[derive(Error, Debug)]
pub enum WellnessError {
    #[error("Invalid value for {metric}: {value}")]
    InvalidMetric { metric: String, value: f64 },

    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    #[error("Message is empty")]
    EmptyMessage,

    #[error("Title is empty")]
    EmptyTitle,

    #[error("Post not found: {0}")]
    PostNotFound(String),

    #[error("Decay ticker already running")]
    TickerAlreadyRunning,

    #[error("Decay ticker not running")]
    TickerNotRunning,

    #[error("Decay ticker did not stop within {0}ms")]
    TickerShutdownTimeout(u64),
}

pub type Result<T> = std::result::Result<T, WellnessError>;
