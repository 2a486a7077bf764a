//! Testing utilities for the Mentor Studio workspace
//!
//! Shared fixtures, an in-memory question API and a fake recording session.

#![allow(missing_docs)]

use async_trait::async_trait;
use mentor_core::{AccessToken, Answer, Question, UtteranceName};
use mentor_store::{ApiError, CachedEntity, EntityApi, EntityMap};
use mentor_upload::{RecordSession, TaskInfo, UploadTask, UploadTaskStatus};
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

pub fn intro_question() -> Question {
    Question::utterance("intro", "Please introduce yourself", UtteranceName::Intro)
}

pub fn idle_question() -> Question {
    Question::utterance("idle", "Please look at the camera for 30 seconds", UtteranceName::Idle)
        .with_min_video_length(30.0)
}

pub fn sample_questions() -> Vec<Question> {
    vec![
        intro_question(),
        idle_question(),
        Question::new("a", "What is your name?"),
        Question::new("b", "What do you do for a living?"),
        Question::new("c", "How did you get started?"),
    ]
}

pub fn upload_task(question: &str, statuses: &[UploadTaskStatus]) -> UploadTask {
    UploadTask::new(
        question,
        statuses
            .iter()
            .zip(["transcoding", "transcribing", "uploading", "finalizing"].iter().cycle())
            .map(|(status, name)| TaskInfo::new(*name, *status))
            .collect(),
    )
}

/// Question API backed by a map, recording every call
#[derive(Debug, Default)]
pub struct InMemoryQuestionApi {
    records: Mutex<HashMap<String, Question>>,
    reassign: Mutex<HashMap<String, String>>,
    fetch_delays: Mutex<VecDeque<Duration>>,
    fetch_calls: Mutex<Vec<Vec<String>>>,
    update_calls: Mutex<Vec<Question>>,
    fail_fetch: AtomicBool,
    fail_update: AtomicBool,
}

impl InMemoryQuestionApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_questions(questions: impl IntoIterator<Item = Question>) -> Self {
        let api = Self::new();
        for q in questions {
            api.put(q);
        }
        api
    }

    /// Insert or replace a server-side record
    pub fn put(&self, question: Question) {
        self.records.lock().insert(question.id.clone(), question);
    }

    /// Updates sent under `from` come back under `to`
    pub fn reassign_id(&self, from: &str, to: &str) {
        self.reassign.lock().insert(from.to_string(), to.to_string());
    }

    /// Delay the next fetch; delays are consumed in call order
    pub fn delay_next_fetch(&self, delay: Duration) {
        self.fetch_delays.lock().push_back(delay);
    }

    pub fn fail_fetches(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn fetch_calls(&self) -> Vec<Vec<String>> {
        self.fetch_calls.lock().clone()
    }

    pub fn update_calls(&self) -> Vec<Question> {
        self.update_calls.lock().clone()
    }
}

#[async_trait]
impl EntityApi<Question> for InMemoryQuestionApi {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Question>, ApiError> {
        self.fetch_calls.lock().push(ids.to_vec());
        let delay = self.fetch_delays.lock().pop_front();
        let fail = self.fail_fetch.load(Ordering::SeqCst);
        let found: Vec<Question> = {
            let records = self.records.lock();
            ids.iter().filter_map(|id| records.get(id).cloned()).collect()
        };

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(ApiError::Transport("connection refused".to_string()));
        }
        Ok(found)
    }

    async fn update(&self, entity: &Question, _token: &AccessToken) -> Result<Question, ApiError> {
        self.update_calls.lock().push(entity.clone());
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(ApiError::Status {
                code: 500,
                message: "internal error".to_string(),
            });
        }
        let mut saved = entity.clone();
        if let Some(new_id) = self.reassign.lock().get(&entity.id) {
            saved.id = new_id.clone();
        }
        self.put(saved.clone());
        Ok(saved)
    }
}

/// Recording session with fixed data that records the callbacks it receives
#[derive(Debug, Default)]
pub struct FakeRecordSession {
    pub answers: Vec<Answer>,
    pub files_uploading: HashMap<String, String>,
    pub questions: EntityMap<Question>,
    pub downloading: bool,
    pub poll_count: u32,
    downloads: Mutex<Vec<(String, String)>>,
    removed: Mutex<Vec<String>>,
}

impl FakeRecordSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_question(mut self, question: Question, custom_text: Option<&str>) -> Self {
        let mut record = CachedEntity::succeeded(question);
        record.custom_text = custom_text.map(str::to_string);
        let id = record.value.as_ref().map(|q| q.id.clone()).unwrap_or_default();
        self.questions.insert(id, record);
        self
    }

    pub fn with_answer(mut self, answer: Answer) -> Self {
        self.answers.push(answer);
        self
    }

    pub fn with_file(mut self, question: &str, url: &str) -> Self {
        self.files_uploading
            .insert(question.to_string(), url.to_string());
        self
    }

    pub fn downloads(&self) -> Vec<(String, String)> {
        self.downloads.lock().clone()
    }

    pub fn removed(&self) -> Vec<String> {
        self.removed.lock().clone()
    }
}

impl RecordSession for FakeRecordSession {
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
        self.downloading
    }

    fn poll_status_count(&self) -> u32 {
        self.poll_count
    }

    fn download_video_blob_url(&self, url: &str, question: &str) {
        self.downloads
            .lock()
            .push((url.to_string(), question.to_string()));
    }

    fn remove_completed_or_failed_task(&self, task: &UploadTask) {
        self.removed.lock().push(task.question.clone());
    }
}
