//! Error types surfaced to callers.
//!
//! Network failures during a breach lookup or a probe are not errors here:
//! they become [`BreachOutcome`](crate::BreachOutcome) and
//! [`ProbeOutcome`](crate::ProbeOutcome) values.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CheckupError {
    #[error("Please enter a {field}.")]
    MissingInput { field: &'static str },
    #[error("Invalid value for {var}: {value:?} ({reason})")]
    Config {
        var: &'static str,
        value: String,
        reason: String,
    },
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl CheckupError {
    /// Title used when the error is shown as a blocking warning.
    pub fn title(&self) -> &'static str {
        match self {
            CheckupError::MissingInput { .. } => "Input Needed",
            CheckupError::Config { .. } => "Configuration Error",
            CheckupError::Client(_) => "Startup Error",
        }
    }
}

pub type Result<T> = std::result::Result<T, CheckupError>;
