use thiserror::Error;

/// Main error type for the truthdare CLI
#[derive(Debug, Error)]
pub enum CliError {
    /// Preference file could not be read, parsed or written
    #[error("Preferences error: {0}")]
    Preferences(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad arguments or interactive input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The server could not be reached or sent something unreadable
    #[error("Communication error: {0}")]
    Communication(String),

    /// The server answered with an `{"error": ...}` body
    #[error("Server returned {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    /// Get the exit code for this error type
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Preferences(_) => 2,
            CliError::Io(_) => 3,
            CliError::InvalidInput(_) => 4,
            CliError::Server { .. } => 5,
            CliError::Logging(_) => 6,
            CliError::Communication(_) => 7,
        }
    }
}
