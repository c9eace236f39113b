use thiserror::Error;

/// Main error type for the betting ledger
#[derive(Error, Debug)]
pub enum LedgerError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Record errors
    #[error("Bet not found: {0}")]
    BetNotFound(String),

    // Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
