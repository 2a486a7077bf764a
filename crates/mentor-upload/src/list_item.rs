//! View model for one row of the upload list

use crate::status::{are_all_tasks_done, is_a_task_failed, is_queued, UploadPhase};
use crate::types::UploadTask;
use mentor_core::{Answer, Question};
use mentor_store::EntityMap;
use std::collections::HashMap;

/// Recording session state the upload list reads from
///
/// Implemented by whatever owns the recording workflow; the view only
/// borrows it.
pub trait RecordSession {
    /// Answers loaded for the mentor
    fn answers(&self) -> &[Answer];

    /// Local blob URLs of recordings still uploading, by question id
    fn files_uploading(&self) -> &HashMap<String, String>;

    /// The mentor's cached questions
    fn mentor_questions(&self) -> &EntityMap<Question>;

    /// Whether a video download is running
    fn is_downloading_video(&self) -> bool;

    /// Number of status polls issued so far
    fn poll_status_count(&self) -> u32;

    /// Start downloading a recording
    fn download_video_blob_url(&self, url: &str, question: &str);

    /// Drop a finished or failed task from the list
    fn remove_completed_or_failed_task(&self, task: &UploadTask);
}

/// Derived state for one upload row
#[derive(Debug)]
pub struct UploadListItem<'a, S: RecordSession> {
    session: &'a S,
    upload: &'a UploadTask,
    file_url: Option<&'a str>,
    /// Whether cancellation was requested
    pub cancelling: bool,
    /// Whether the matching answer was flagged
    pub needs_attention: bool,
    /// Text shown as the row title
    pub job_title: String,
}

impl<'a, S: RecordSession> UploadListItem<'a, S> {
    /// Derive the row for `upload`
    #[must_use]
    pub fn new(session: &'a S, upload: &'a UploadTask) -> Self {
        let needs_attention = session
            .answers()
            .iter()
            .find(|a| a.question == upload.question)
            .is_some_and(|a| a.attention_needed);

        let file_url = session
            .files_uploading()
            .get(&upload.question)
            .map(String::as_str);

        Self {
            session,
            upload,
            file_url,
            cancelling: upload.is_cancelling,
            needs_attention,
            job_title: job_title(session.mentor_questions(), &upload.question),
        }
    }

    /// The task this row shows
    #[inline]
    #[must_use]
    pub fn upload(&self) -> &UploadTask {
        self.upload
    }

    /// Some step is queued
    #[must_use]
    pub fn is_job_queued(&self) -> bool {
        is_queued(self.upload)
    }

    /// Every step is done
    #[must_use]
    pub fn is_job_done(&self) -> bool {
        are_all_tasks_done(self.upload)
    }

    /// Some step failed
    #[must_use]
    pub fn is_job_failed(&self) -> bool {
        is_a_task_failed(self.upload)
    }

    /// Single display state
    #[must_use]
    pub fn phase(&self) -> UploadPhase {
        UploadPhase::of(self.upload)
    }

    /// Whether a local recording is available for download
    #[must_use]
    pub fn has_video_file_url(&self) -> bool {
        self.file_url.is_some_and(|url| !url.is_empty())
    }

    /// Download the local recording; returns false when there is none
    pub fn download_video(&self) -> bool {
        match self.file_url.filter(|url| !url.is_empty()) {
            Some(url) => {
                self.session
                    .download_video_blob_url(url, &self.upload.question);
                true
            }
            None => {
                tracing::debug!(question = %self.upload.question, "no local recording to download");
                false
            }
        }
    }

    /// Close the row; removes the task only once it is done or failed
    pub fn on_close(&self) -> bool {
        if self.is_job_done() || self.is_job_failed() {
            tracing::debug!(question = %self.upload.question, "removing finished upload");
            self.session.remove_completed_or_failed_task(self.upload);
            true
        } else {
            false
        }
    }

    /// Whether a video download is running
    #[must_use]
    pub fn is_downloading_video(&self) -> bool {
        self.session.is_downloading_video()
    }

    /// Number of status polls issued so far
    #[must_use]
    pub fn poll_status_count(&self) -> u32 {
        self.session.poll_status_count()
    }
}

/// Title for a question: custom text, then question text, then empty
#[must_use]
pub fn job_title(questions: &EntityMap<Question>, question_id: &str) -> String {
    let Some(record) = questions.get(question_id) else {
        return String::new();
    };
    record
        .custom_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .or_else(|| {
            record
                .value
                .as_ref()
                .map(|q| q.question.as_str())
                .filter(|text| !text.is_empty())
        })
        .unwrap_or_default()
        .to_string()
}
