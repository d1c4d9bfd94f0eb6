use thiserror::Error;

/// Error types for scrobcli operations.
///
/// Each variant corresponds to a failure kind with its own recovery policy:
/// chunk submissions swallow [`ScrobbleError::Http`], the credential store
/// swallows [`ScrobbleError::Persistence`] and everything else reaches the
/// command line layer.
#[derive(Error, Debug)]
pub enum ScrobbleError {
    /// Token or session acquisition failed, or a handshake step was run out
    /// of order. Fatal to the current operation.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API answered a submission with a non-2xx status.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Reading or writing the credential file failed.
    #[error("Credential persistence failed: {0}")]
    Persistence(String),

    /// Malformed user input.
    #[error("Invalid input: {0}")]
    Input(String),

    /// Connection failures, timeouts, DNS errors.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the JSON document we expected.
    #[error("Malformed response: {0}")]
    Response(String),

    /// Missing or invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ScrobbleError>;
