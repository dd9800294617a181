use thiserror::Error;

/// Failures of the output sink. Never fatal for a stream.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Failed to open output file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write record: {0}")]
    Write(#[from] std::io::Error),

    #[error("Failed to serialize record: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Sink is closed")]
    Closed,
}

/// Process-level failures. Any of these ends the process with exit code 1.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Failed to load configuration: {0}")]
    Config(String),

    #[error("Failed to bind to address {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("Server error: {0}")]
    Transport(#[from] tonic::transport::Error),

    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
