//! Post-load overlays
//!
//! An overlay rewrites a freshly loaded snapshot. When it has nothing to
//! change it hands back the input itself, so callers can tell the two cases
//! apart without comparing contents.

use crate::entity::EntityMap;
use mentor_core::{Entity, MentorConfig, Question, UtteranceName};
use std::borrow::Cow;

/// Transform applied to a collection after a successful batch load
pub trait Overlay<T: Entity>: Send + Sync {
    /// Rewrite `entries`, borrowing them unchanged when there is nothing to do
    fn apply<'a>(&self, entries: &'a EntityMap<T>) -> Cow<'a, EntityMap<T>>;
}

impl Overlay<Question> for MentorConfig {
    fn apply<'a>(&self, entries: &'a EntityMap<Question>) -> Cow<'a, EntityMap<Question>> {
        apply_overlay(self, entries)
    }
}

/// Apply a mentor configuration to loaded questions
///
/// - intro utterances get `custom_text` set to the configured intro text
/// - idle utterances get `min_video_length` set to the configured duration
///
/// Empty text and a zero duration count as unset.
#[must_use]
pub fn apply_overlay<'a>(
    config: &MentorConfig,
    entries: &'a EntityMap<Question>,
) -> Cow<'a, EntityMap<Question>> {
    if config.is_empty() {
        return Cow::Borrowed(entries);
    }

    let intro_text = config.intro_text();
    let idle_duration = config.idle_duration();

    let mut copy = entries.clone();
    for (_, record) in copy.iter_mut() {
        let Some(question) = record.value.as_mut() else {
            continue;
        };
        if question.is_named(&UtteranceName::Intro) {
            if let Some(text) = intro_text {
                record.custom_text = Some(text.to_string());
            }
        }
        if question.is_named(&UtteranceName::Idle) {
            if let Some(seconds) = idle_duration {
                question.min_video_length = Some(seconds);
            }
        }
    }
    Cow::Owned(copy)
}
