//! Session lifecycle errors.

/// Raised when the run lifecycle is asked to make a transition it does not allow.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Lifecycle Error: cannot move from {} to {} at line {} in {}", from, to, line, file)]
pub struct LifecycleError {
    /// State the lifecycle was in
    pub from: String,
    /// State that was requested
    pub to: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl LifecycleError {
    /// Create a new lifecycle error at the current location.
    #[track_caller]
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            from: from.into(),
            to: to.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
