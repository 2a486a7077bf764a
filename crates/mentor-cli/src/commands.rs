//! Command implementations, independent of argument parsing

use crate::fixture::FixtureApi;
use mentor_core::{info_defaults, AccessToken, Answer, LoadingStatus, Mentor, MentorConfig, MentorEdits, Question};
use mentor_store::{EntityCollection, EntityMap, LoadOutcome, LoadRequest, QuestionStore, StoreConfig, StoreError};
use mentor_upload::{RecordSession, UploadListItem, UploadPhase, UploadTask};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write as _;

/// One cached question as printed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRow {
    /// Question id
    pub id: String,
    /// Cache status
    pub status: LoadingStatus,
    /// Text shown to the mentor
    pub text: String,
    /// Minimum recording length
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_video_length: Option<f64>,
    /// Stored error message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Result of a `questions` run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionsReport {
    /// `cancelled`, `loaded` or `failed`
    pub outcome: String,
    /// Aggregate batch status
    pub batch_status: LoadingStatus,
    /// Cached questions sorted by id
    pub questions: Vec<QuestionRow>,
}

impl QuestionsReport {
    fn from_snapshot(outcome: &str, snapshot: &EntityCollection<Question>) -> Self {
        let mut questions: Vec<QuestionRow> = snapshot
            .entries
            .iter()
            .map(|(id, record)| QuestionRow {
                id: id.clone(),
                status: record.status,
                text: record
                    .custom_text
                    .clone()
                    .or_else(|| record.value.as_ref().map(|q| q.question.clone()))
                    .unwrap_or_default(),
                min_video_length: record.value.as_ref().and_then(|q| q.min_video_length),
                error: record.error.as_ref().map(|e| e.message.clone()),
            })
            .collect();
        questions.sort_by(|a, b| a.id.cmp(&b.id));
        Self {
            outcome: outcome.to_string(),
            batch_status: snapshot.batch_load_status,
            questions,
        }
    }

    /// Plain-text table
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = format!("outcome: {} (batch {})\n", self.outcome, self.batch_status);
        for row in &self.questions {
            let _ = write!(out, "{:<12} {:<10} {}", row.id, row.status, row.text);
            if let Some(error) = &row.error {
                let _ = write!(out, " [{error}]");
            }
            out.push('\n');
        }
        out
    }
}

/// Arguments of the `questions` command
#[derive(Debug, Clone, Default)]
pub struct QuestionsArgs {
    /// Ids to load
    pub ids: Vec<String>,
    /// Ignore cached state
    pub reload: bool,
    /// Overlay applied after loading
    pub overlay: Option<MentorConfig>,
    /// Ids loaded before the main request, to seed the cache
    pub preload: Vec<String>,
}

/// Load questions through a fresh store and report the resulting cache
///
/// A failed fetch is reported, not returned as an error, since the cache
/// state after a failure is what the caller wants to see.
pub async fn run_questions(api: FixtureApi, config: StoreConfig, args: QuestionsArgs) -> QuestionsReport {
    let store = QuestionStore::with_config(api, config);

    if !args.preload.is_empty() {
        if let Err(err) = store.load_by_ids(LoadRequest::new(args.preload)).await {
            tracing::warn!(error = %err, "preload failed");
        }
    }

    let mut request = LoadRequest::new(args.ids);
    if args.reload {
        request = request.reload();
    }
    if let Some(overlay) = args.overlay.as_ref() {
        request = request.with_overlay(overlay);
    }

    let outcome = match store.load_by_ids(request).await {
        Ok(LoadOutcome::Cancelled) => "cancelled",
        Ok(LoadOutcome::Loaded { .. }) => "loaded",
        Err(err) => {
            tracing::warn!(error = %err, "load failed");
            "failed"
        }
    };
    QuestionsReport::from_snapshot(outcome, &store.snapshot())
}

/// Save one question and report the cache afterwards
///
/// # Errors
/// Returns the store error when the save is rejected or fails.
pub async fn run_save(
    api: FixtureApi,
    config: StoreConfig,
    question: Question,
    token: Option<AccessToken>,
) -> Result<(Question, QuestionsReport), StoreError> {
    let store = QuestionStore::with_config(api, config);
    let saved = store.save(question, token.as_ref()).await?;
    Ok((saved, QuestionsReport::from_snapshot("saved", &store.snapshot())))
}

/// One upload as printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRow {
    /// Question id
    pub question: String,
    /// Row title
    pub title: String,
    /// Resolved phase
    pub phase: UploadPhase,
    /// Some step queued
    pub queued: bool,
    /// Every step done
    pub done: bool,
    /// Some step failed
    pub failed: bool,
    /// Cancellation requested
    pub cancelling: bool,
    /// Matching answer was flagged
    pub needs_attention: bool,
}

/// Read-only session over loaded questions and answers
#[derive(Debug, Default)]
pub struct SnapshotSession {
    questions: EntityMap<Question>,
    answers: Vec<Answer>,
    files_uploading: HashMap<String, String>,
}

impl SnapshotSession {
    /// Session over a question snapshot and answers
    #[must_use]
    pub fn new(questions: EntityMap<Question>, answers: Vec<Answer>) -> Self {
        Self {
            questions,
            answers,
            files_uploading: HashMap::new(),
        }
    }
}

impl RecordSession for SnapshotSession {
    fn answers(&self) -> &[Answer] {
        &self.answers
    }

    fn files_uploading(&self) -> &HashMap<String, String> {
        &self.files_uploading
    }

    fn mentor_questions(&self) -> &EntityMap<Question> {
        &self.questions
    }

    fn is_downloading_video(&self) -> bool {
        false
    }

    fn poll_status_count(&self) -> u32 {
        0
    }

    fn download_video_blob_url(&self, url: &str, question: &str) {
        tracing::info!(url, question, "download requested");
    }

    fn remove_completed_or_failed_task(&self, task: &UploadTask) {
        tracing::info!(question = %task.question, "remove requested");
    }
}

/// Evaluate uploads, resolving titles from the questions the fixture knows
pub async fn run_uploads(api: FixtureApi, tasks: &[UploadTask], answers: Vec<Answer>) -> Vec<UploadRow> {
    let store = QuestionStore::new(api);
    let ids: Vec<String> = tasks.iter().map(|t| t.question.clone()).collect();
    if let Err(err) = store.load_by_ids(LoadRequest::new(ids)).await {
        tracing::warn!(error = %err, "could not load upload questions");
    }

    let session = SnapshotSession::new(store.snapshot().entries, answers);
    tasks
        .iter()
        .map(|task| {
            let item = UploadListItem::new(&session, task);
            UploadRow {
                question: task.question.clone(),
                title: item.job_title.clone(),
                phase: item.phase(),
                queued: item.is_job_queued(),
                done: item.is_job_done(),
                failed: item.is_job_failed(),
                cancelling: item.cancelling,
                needs_attention: item.needs_attention,
            }
        })
        .collect()
}

/// Defaults the setup wizard would fill in for this mentor
#[must_use]
pub fn run_setup_defaults(mentor: &Mentor, user_name: &str) -> Option<MentorEdits> {
    info_defaults(mentor, user_name)
}
