//! Load status tri-state.
//!
//! Purpose: report where the current load attempt stands. Errors carry the
//! user-facing message; the underlying cause is only logged.

/// Message shown when the user list cannot be fetched.
pub const SERVICE_DOWN_MESSAGE: &str = "Looks like our service is down";

/// Outcome of the most recent user list load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// A fetch is in flight.
    Request,
    /// The list is available.
    Success,
    /// The fetch failed.
    Error {
        /// User-facing description.
        message: String,
    },
}

impl LoadStatus {
    /// The generic failure status shown to users.
    #[must_use]
    pub fn service_down() -> Self {
        Self::Error {
            message: SERVICE_DOWN_MESSAGE.to_owned(),
        }
    }

    /// True for [`LoadStatus::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Short label for logs.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::Success => "success",
            Self::Error { .. } => "error",
        }
    }
}
