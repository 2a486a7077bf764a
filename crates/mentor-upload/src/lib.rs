//! Mentor Upload - status of recorded-answer uploads
//!
//! Pure predicates over an upload's processing steps, and the derived view
//! the upload list renders for each task.

#![warn(unreachable_pub)]

pub mod list_item;
pub mod status;
pub mod types;

pub use list_item::{job_title, RecordSession, UploadListItem};
pub use status::{
    are_all_tasks_done, compare_task_statuses_to_value, is_a_task_failed, is_queued, UploadPhase,
};
pub use types::{TaskInfo, UploadTask, UploadTaskStatus};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
