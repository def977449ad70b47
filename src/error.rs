//! Error types for the notification sender

use thiserror::Error;

/// Diagnostic printed when any Twilio credential is missing.
pub const MISSING_CREDENTIALS_MESSAGE: &str =
    "Please set the environment variables for Twilio credentials.";

/// Diagnostic printed when the recipient number fails validation.
pub const INVALID_NUMBER_MESSAGE: &str = "Invalid Number";

#[derive(Error, Debug)]
pub enum Error {
    #[error("Environment variable not set: {0}")]
    ConfigMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid phone number: {0:?}")]
    InvalidNumber(String),

    #[error("{0}")]
    Delivery(String),

    #[error("{0}")]
    Usage(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Line printed to stdout before the process exits with status 1.
    pub fn console_message(&self) -> String {
        match self {
            Error::ConfigMissing(_) => MISSING_CREDENTIALS_MESSAGE.to_string(),
            Error::InvalidNumber(_) => INVALID_NUMBER_MESSAGE.to_string(),
            Error::Delivery(description) => format!("Error: {}", description),
            Error::Config(_) | Error::Usage(_) => self.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Delivery(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Delivery(format!("Unexpected response from Twilio: {}", err))
    }
}
