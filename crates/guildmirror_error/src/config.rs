//! Configuration error types.

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use guildmirror_error::ConfigError;
    ///
    /// let err = ConfigError::new("Missing [preferences] table");
    /// assert!(err.message.contains("preferences"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Reject the value of one configuration key, named by its dotted path.
    ///
    /// # Examples
    ///
    /// ```
    /// use guildmirror_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("supervisor.max_restarts", "must be a number");
    /// assert_eq!(err.message, "supervisor.max_restarts must be a number");
    /// ```
    #[track_caller]
    pub fn invalid(key: &str, reason: &str) -> Self {
        Self::new(format!("{} {}", key, reason))
    }
}
