//! Loading status primitive shared by every cached entity
//!
//! A status is paired with an optional [`LoadingError`]. Errors are only
//! ever attached together with [`LoadingStatus::Failed`], but clearing an
//! error leaves the status where it was.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a remotely loaded value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadingStatus {
    /// Never requested
    #[default]
    None,
    /// Fetch in flight
    Loading,
    /// Update in flight
    Saving,
    /// Last request completed
    Succeeded,
    /// Last request failed
    Failed,
}

impl LoadingStatus {
    /// Whether a request for this value is currently outstanding
    #[inline]
    #[must_use]
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Loading | Self::Saving)
    }

    /// Whether a non-forced load should fetch this value again
    #[inline]
    #[must_use]
    pub fn needs_load(self) -> bool {
        matches!(self, Self::None | Self::Failed)
    }

    /// Stable lowercase name, used in logs and CLI output
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Loading => "loading",
            Self::Saving => "saving",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for LoadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error record rendered inline next to the entity it belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoadingError {
    /// Human-readable message
    pub message: String,
    /// Machine-readable code
    #[serde(rename = "error")]
    pub code: String,
}

impl LoadingError {
    /// Create a new error record
    #[inline]
    #[must_use]
    pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: code.into(),
        }
    }
}

impl fmt::Display for LoadingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}
