//! Driven port for browser-style navigation history.

/// Location source and navigation sink for the router shell.
#[cfg_attr(test, mockall::automock)]
pub trait History: Send + Sync {
    /// Current location path, e.g. `/alice`.
    fn location(&self) -> String;

    /// Navigate to `path`, making it the current location.
    fn push(&self, path: &str);
}
