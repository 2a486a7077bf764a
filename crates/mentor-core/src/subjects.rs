//! Subject picker rules
//!
//! Required subjects are always selected. At most one selected subject is
//! primary; picking a new primary replaces the old one.

use crate::error::CoreError;
use crate::mentor::{Mentor, SubjectRef};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// A subject from the catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Identifier (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Description shown under the name
    #[serde(default)]
    pub description: String,
    /// Whether every mentor must cover this subject
    #[serde(default)]
    pub is_required: bool,
}

/// What the UI shows for one subject row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectRow<'a> {
    /// The subject
    pub subject: &'a Subject,
    /// Select checkbox state
    pub selected: bool,
    /// Select checkbox is locked
    pub select_locked: bool,
    /// Primary checkbox state
    pub primary: bool,
    /// Primary checkbox is locked
    pub primary_locked: bool,
}

/// Payload sent when the selection is saved
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectsUpdate {
    /// Selected subject ids in catalogue order
    pub subjects: Vec<String>,
    /// Primary subject id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_subject: Option<String>,
}

/// Editable subject selection for one mentor
#[derive(Debug, Clone)]
pub struct SubjectSelection {
    catalogue: IndexMap<String, Subject>,
    selected: IndexSet<String>,
    primary: Option<String>,
    initial: SubjectsUpdate,
}

impl SubjectSelection {
    /// Build from the catalogue and the mentor's saved selection
    ///
    /// Unknown subject ids on the mentor are dropped.
    #[must_use]
    pub fn new(catalogue: impl IntoIterator<Item = Subject>, mentor: &Mentor) -> Self {
        let catalogue: IndexMap<String, Subject> = catalogue
            .into_iter()
            .map(|s| (s.id.clone(), s))
            .collect();

        let selected: IndexSet<String> = catalogue
            .values()
            .filter(|s| s.is_required || mentor.subjects.contains(&s.id))
            .map(|s| s.id.clone())
            .collect();

        let primary = mentor
            .default_subject
            .as_ref()
            .map(|r| r.id.clone())
            .filter(|id| selected.contains(id));

        let mut selection = Self {
            catalogue,
            selected,
            primary,
            initial: SubjectsUpdate {
                subjects: Vec::new(),
                default_subject: None,
            },
        };
        selection.initial = selection.save_payload();
        selection
    }

    /// Rows in catalogue order
    pub fn rows(&self) -> impl Iterator<Item = SubjectRow<'_>> {
        self.catalogue.values().map(|subject| {
            let selected = self.selected.contains(&subject.id);
            SubjectRow {
                subject,
                selected,
                select_locked: subject.is_required,
                primary: self.primary.as_deref() == Some(subject.id.as_str()),
                primary_locked: !selected,
            }
        })
    }

    /// Whether a subject is selected
    #[must_use]
    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Current primary subject
    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref()
    }

    /// Select or deselect a subject
    ///
    /// # Errors
    /// - `CoreError::UnknownSubject` if the id is not in the catalogue
    /// - `CoreError::SubjectRequired` when deselecting a required subject
    pub fn set_selected(&mut self, id: &str, selected: bool) -> Result<(), CoreError> {
        let subject = self
            .catalogue
            .get(id)
            .ok_or_else(|| CoreError::UnknownSubject(id.to_string()))?;

        if selected {
            self.selected.insert(subject.id.clone());
            return Ok(());
        }
        if subject.is_required {
            return Err(CoreError::SubjectRequired(id.to_string()));
        }
        self.selected.shift_remove(id);
        if self.primary.as_deref() == Some(id) {
            self.primary = None;
        }
        Ok(())
    }

    /// Make a selected subject primary, or clear it with `None`
    ///
    /// # Errors
    /// - `CoreError::UnknownSubject` if the id is not in the catalogue
    /// - `CoreError::SubjectNotSelected` if the subject is not selected
    pub fn set_primary(&mut self, id: Option<&str>) -> Result<(), CoreError> {
        let Some(id) = id else {
            self.primary = None;
            return Ok(());
        };
        if !self.catalogue.contains_key(id) {
            return Err(CoreError::UnknownSubject(id.to_string()));
        }
        if !self.selected.contains(id) {
            return Err(CoreError::SubjectNotSelected(id.to_string()));
        }
        self.primary = Some(id.to_string());
        Ok(())
    }

    /// Whether the selection differs from what was loaded
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.save_payload() != self.initial
    }

    /// Payload for the update request
    #[must_use]
    pub fn save_payload(&self) -> SubjectsUpdate {
        SubjectsUpdate {
            subjects: self
                .catalogue
                .keys()
                .filter(|id| self.selected.contains(*id))
                .cloned()
                .collect(),
            default_subject: self.primary.clone(),
        }
    }

    /// Record a successful save and update the mentor to match
    pub fn mark_saved(&mut self, mentor: &mut Mentor) {
        let payload = self.save_payload();
        mentor.subjects = payload.subjects.clone();
        mentor.default_subject = payload.default_subject.clone().map(|id| SubjectRef { id });
        self.initial = payload;
    }
}
