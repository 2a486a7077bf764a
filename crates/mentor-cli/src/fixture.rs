//! Question API served from a JSON fixture file

use anyhow::Context;
use async_trait::async_trait;
use mentor_core::{AccessToken, Question};
use mentor_store::{ApiError, EntityApi};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix marking ids the server has not assigned yet
pub const TEMP_ID_PREFIX: &str = "tmp";

/// Fixture-backed question API
///
/// Updates of questions whose id starts with [`TEMP_ID_PREFIX`] come back
/// under a server-style id, the way the real API assigns ids on create.
#[derive(Debug, Default)]
pub struct FixtureApi {
    questions: HashMap<String, Question>,
    offline: bool,
    next_id: AtomicU64,
}

impl FixtureApi {
    /// Serve these questions
    #[must_use]
    pub fn new(questions: impl IntoIterator<Item = Question>) -> Self {
        Self {
            questions: questions.into_iter().map(|q| (q.id.clone(), q)).collect(),
            ..Self::default()
        }
    }

    /// Read a JSON array of questions
    ///
    /// # Errors
    /// Fails if the file cannot be read or decoded.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading fixture {}", path.display()))?;
        let questions: Vec<Question> = serde_json::from_str(&text)
            .with_context(|| format!("decoding fixture {}", path.display()))?;
        Ok(Self::new(questions))
    }

    /// Fail every request as if the server were unreachable
    #[must_use]
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    fn check_online(&self) -> Result<(), ApiError> {
        if self.offline {
            Err(ApiError::Transport("fixture is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl EntityApi<Question> for FixtureApi {
    async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Question>, ApiError> {
        self.check_online()?;
        Ok(ids
            .iter()
            .filter_map(|id| self.questions.get(id).cloned())
            .collect())
    }

    async fn update(&self, entity: &Question, _token: &AccessToken) -> Result<Question, ApiError> {
        self.check_online()?;
        let mut saved = entity.clone();
        if saved.id.starts_with(TEMP_ID_PREFIX) {
            let n = self.next_id.fetch_add(1, Ordering::SeqCst);
            saved.id = format!("q{:06}", n + 1);
        }
        Ok(saved)
    }
}
