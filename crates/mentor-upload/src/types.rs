//! Upload task records reported by the upload subsystem

use serde::{Deserialize, Serialize};

/// Status of one processing step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UploadTaskStatus {
    /// Waiting for a worker
    Queued,
    /// Being processed
    Processing,
    /// Finished
    Done,
    /// Gave up
    Failed,
}

/// One step of an upload's processing pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    /// Step name, e.g. `transcribing` or `transcoding`
    pub task_name: String,
    /// Step status
    pub status: UploadTaskStatus,
}

impl TaskInfo {
    /// Create step
    #[must_use]
    pub fn new(task_name: impl Into<String>, status: UploadTaskStatus) -> Self {
        Self {
            task_name: task_name.into(),
            status,
        }
    }
}

/// Upload of a recorded answer and its processing steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTask {
    /// Question the recording answers
    pub question: String,
    /// Processing steps in pipeline order
    #[serde(default)]
    pub task_list: Vec<TaskInfo>,
    /// Whether the user asked to cancel
    #[serde(default)]
    pub is_cancelling: bool,
}

impl UploadTask {
    /// Create task for a question with the given step statuses
    #[must_use]
    pub fn new(question: impl Into<String>, task_list: Vec<TaskInfo>) -> Self {
        Self {
            question: question.into(),
            task_list,
            is_cancelling: false,
        }
    }

    /// Step statuses in pipeline order
    pub fn statuses(&self) -> impl Iterator<Item = UploadTaskStatus> + '_ {
        self.task_list.iter().map(|t| t.status)
    }
}
