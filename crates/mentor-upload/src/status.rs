//! Status predicates over an upload task's processing steps
//!
//! The three predicates are independent: a task whose steps disagree can be
//! queued and failed at once. [`UploadPhase`] picks one value with a fixed
//! precedence for callers that need a single answer.

use crate::types::{UploadTask, UploadTaskStatus};
use serde::{Deserialize, Serialize};

/// Compare every step status against `value`
///
/// With `any` the result is true if at least one step matches, otherwise
/// only if all steps match (true for a task without steps).
#[must_use]
pub fn compare_task_statuses_to_value(task: &UploadTask, value: UploadTaskStatus, any: bool) -> bool {
    if any {
        task.statuses().any(|s| s == value)
    } else {
        task.statuses().all(|s| s == value)
    }
}

/// At least one step is queued
#[inline]
#[must_use]
pub fn is_queued(task: &UploadTask) -> bool {
    compare_task_statuses_to_value(task, UploadTaskStatus::Queued, true)
}

/// Every step is done; true for a task without steps
#[inline]
#[must_use]
pub fn are_all_tasks_done(task: &UploadTask) -> bool {
    compare_task_statuses_to_value(task, UploadTaskStatus::Done, false)
}

/// At least one step failed
#[inline]
#[must_use]
pub fn is_a_task_failed(task: &UploadTask) -> bool {
    compare_task_statuses_to_value(task, UploadTaskStatus::Failed, true)
}

/// Single display state of an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadPhase {
    /// Some step failed
    Failed,
    /// Every step finished
    Done,
    /// Some step is waiting
    Queued,
    /// Steps are running
    Processing,
}

impl UploadPhase {
    /// Resolve with precedence failed, done, queued, processing
    #[must_use]
    pub fn of(task: &UploadTask) -> Self {
        if is_a_task_failed(task) {
            Self::Failed
        } else if are_all_tasks_done(task) {
            Self::Done
        } else if is_queued(task) {
            Self::Queued
        } else {
            Self::Processing
        }
    }

    /// Whether the upload will not change any more
    #[inline]
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Failed | Self::Done)
    }
}
