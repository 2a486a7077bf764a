//! Core record types exchanged with the remote API
//!
//! Defines:
//! - The [`Entity`] seam used by the keyed cache
//! - Questions and their well-known utterance names
//! - Recorded answers
//! - The mentor configuration consumed by overlays
//! - The access credential required for updates

use serde::{Deserialize, Serialize};
use std::fmt;

/// A remotely sourced record identified by a stable id
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// Identifier the record is keyed by
    fn id(&self) -> &str;
}

/// Utterance slot a question can fill
///
/// Names outside the well-known set decode as [`UtteranceName::Other`] so a
/// batch is never rejected over an unfamiliar slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtteranceName {
    /// Mentor introduces themselves
    Intro,
    /// Mentor listens silently
    Idle,
    /// Response for questions the mentor cannot answer
    OffTopic,
    /// Prompt for the user to ask a question
    Prompt,
    /// Greeting
    Greeting,
    /// Farewell
    Closing,
    /// Any other name, kept verbatim
    #[serde(untagged)]
    Other(String),
}

/// Kind of question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Ordinary question answered by the mentor
    #[default]
    Question,
    /// Utterance such as intro or idle
    Utterance,
}

/// A question the mentor records an answer for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Canonical question text
    pub question: String,
    /// Question kind
    #[serde(rename = "type", default)]
    pub kind: QuestionType,
    /// Utterance slot, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<UtteranceName>,
    /// Minimum recording length in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_video_length: Option<f64>,
    /// Paraphrases used for classifier training
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paraphrases: Vec<String>,
}

impl Question {
    /// Create ordinary question
    #[must_use]
    pub fn new(id: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            question: question.into(),
            kind: QuestionType::Question,
            name: None,
            min_video_length: None,
            paraphrases: Vec::new(),
        }
    }

    /// Create utterance filling the given slot
    #[must_use]
    pub fn utterance(
        id: impl Into<String>,
        question: impl Into<String>,
        name: UtteranceName,
    ) -> Self {
        Self {
            kind: QuestionType::Utterance,
            name: Some(name),
            ..Self::new(id, question)
        }
    }

    /// With minimum recording length
    #[inline]
    #[must_use]
    pub fn with_min_video_length(mut self, seconds: f64) -> Self {
        self.min_video_length = Some(seconds);
        self
    }

    /// Check the utterance slot
    #[inline]
    #[must_use]
    pub fn is_named(&self, name: &UtteranceName) -> bool {
        self.name.as_ref() == Some(name)
    }
}

impl Entity for Question {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A recorded answer to a question
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    /// Question this answers
    pub question: String,
    /// Transcript of the recording
    #[serde(default)]
    pub transcript: String,
    /// Whether a reviewer flagged the answer
    #[serde(default)]
    pub attention_needed: bool,
}

impl Answer {
    /// Create answer for question
    #[must_use]
    pub fn new(question: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            transcript: transcript.into(),
            attention_needed: false,
        }
    }

    /// Flag the answer for attention
    #[inline]
    #[must_use]
    pub fn flagged(mut self) -> Self {
        self.attention_needed = true;
        self
    }
}

/// Organisation-level mentor configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorConfig {
    /// Replacement display text for the intro utterance
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_recording_text: Option<String>,
    /// Replacement minimum length for the idle utterance, in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idle_recording_duration: Option<f64>,
}

impl MentorConfig {
    /// Intro text, if set and non-empty
    #[must_use]
    pub fn intro_text(&self) -> Option<&str> {
        self.intro_recording_text
            .as_deref()
            .filter(|text| !text.is_empty())
    }

    /// Idle duration, if set and non-zero
    #[must_use]
    pub fn idle_duration(&self) -> Option<f64> {
        self.idle_recording_duration
            .filter(|secs| *secs != 0.0 && !secs.is_nan())
    }

    /// Whether applying this config can change anything
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intro_text().is_none() && self.idle_duration().is_none()
    }
}

/// Credential attached to update requests
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value
    #[inline]
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}
