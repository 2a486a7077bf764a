//! Store configuration

use serde::{Deserialize, Serialize};

/// Message stored on ids whose batch fetch failed
pub const DEFAULT_LOAD_ERROR: &str = "failed to load";
/// Message stored on an id whose update failed
pub const DEFAULT_SAVE_ERROR: &str = "failed to save";
/// Code stored with load failures
pub const LOAD_FAILED_CODE: &str = "load_failed";
/// Code stored with save failures
pub const SAVE_FAILED_CODE: &str = "save_failed";

/// Which ids a failed batch fetch marks as failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureScope {
    /// Every non-empty id the caller asked for, including ones that were
    /// already fresh and never sent
    #[default]
    Requested,
    /// Only the ids actually sent to the server
    Fetched,
}

/// Entity store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Ids marked failed when a batch fetch fails
    pub failure_scope: FailureScope,
    /// Message stored on load failures
    pub load_error_message: String,
    /// Message stored on save failures
    pub save_error_message: String,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With failure scope
    #[inline]
    #[must_use]
    pub fn with_failure_scope(mut self, scope: FailureScope) -> Self {
        self.failure_scope = scope;
        self
    }

    /// With load and save error messages
    #[inline]
    #[must_use]
    pub fn with_messages(mut self, load: impl Into<String>, save: impl Into<String>) -> Self {
        self.load_error_message = load.into();
        self.save_error_message = save.into();
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            failure_scope: FailureScope::Requested,
            load_error_message: DEFAULT_LOAD_ERROR.to_string(),
            save_error_message: DEFAULT_SAVE_ERROR.to_string(),
        }
    }
}
