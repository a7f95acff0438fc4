// Error types for aria-notify-rs

use thiserror::Error;

/// Result type alias for aria-notify-rs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when driving a page or asserting on it
#[derive(Debug, Error)]
pub enum Error {
    /// Element not found by selector
    ///
    /// The page's element tree is fixed once built, so a missing element
    /// fails immediately rather than waiting for it to appear.
    #[error("Element not found: selector '{0}'")]
    ElementNotFound(String),

    /// Selector matched more than one element (strict mode)
    ///
    /// All locator operations resolve in strict mode and require exactly
    /// one match. Refine the selector, e.g. with an `#id` or a
    /// `:has-text("...")` suffix.
    #[error("Strict mode violation: selector '{selector}' resolved to {count} elements")]
    StrictModeViolation { selector: String, count: usize },

    /// Selector string could not be parsed
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Invalid argument provided to method
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Timeout waiting for an action's actionability checks
    ///
    /// Contains context about what operation timed out and the timeout
    /// duration. Typically the element stayed disabled or hidden for the
    /// whole wait; pass `force` to bypass the checks.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Assertion timeout (expect API)
    #[error("Assertion timeout: {0}")]
    AssertionTimeout(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context
    #[error("{0}: {1}")]
    Context(String, #[source] Box<Error>),
}

impl Error {
    /// Adds context to the error
    pub fn context(self, msg: impl Into<String>) -> Self {
        Error::Context(msg.into(), Box::new(self))
    }
}
