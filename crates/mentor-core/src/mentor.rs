//! Mentor profile and the setup wizard's editing rules
//!
//! The info slide fills in missing biographical fields once, on first
//! display; every other change arrives as a partial [`MentorEdits`].

use serde::{Deserialize, Serialize};

/// Placeholder job title suggested to new mentors
pub const TITLE_PLACEHOLDER: &str = "Please enter your profession here";

/// Reference to a subject by id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
    /// Subject id (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
}

/// Mentor profile being authored
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mentor {
    /// Identifier (`_id` on the wire)
    #[serde(rename = "_id")]
    pub id: String,
    /// Full name
    #[serde(default)]
    pub name: String,
    /// First name
    #[serde(default)]
    pub first_name: String,
    /// Job title
    #[serde(default)]
    pub title: String,
    /// Contact email
    #[serde(default)]
    pub email: String,
    /// Whether users may contact the mentor
    #[serde(default)]
    pub allow_contact: bool,
    /// What the mentor wants users to take away
    #[serde(default)]
    pub goal: String,
    /// Selected subject ids
    #[serde(default)]
    pub subjects: Vec<String>,
    /// Primary subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_subject: Option<SubjectRef>,
}

/// Partial update to a [`Mentor`]; `None` fields are left alone
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorEdits {
    /// New full name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New first name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// New job title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact permission
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_contact: Option<bool>,
    /// New goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
}

impl MentorEdits {
    /// Whether the edit changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Edit setting only the goal
    #[must_use]
    pub fn goal(goal: impl Into<String>) -> Self {
        Self {
            goal: Some(goal.into()),
            ..Self::default()
        }
    }
}

impl Mentor {
    /// Create mentor with id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Apply a partial edit, overwriting only the fields it carries
    pub fn apply_edits(&mut self, edits: MentorEdits) {
        if let Some(name) = edits.name {
            self.name = name;
        }
        if let Some(first_name) = edits.first_name {
            self.first_name = first_name;
        }
        if let Some(title) = edits.title {
            self.title = title;
        }
        if let Some(email) = edits.email {
            self.email = email;
        }
        if let Some(allow_contact) = edits.allow_contact {
            self.allow_contact = allow_contact;
        }
        if let Some(goal) = edits.goal {
            self.goal = goal;
        }
    }

    /// Toggle contact permission
    #[must_use]
    pub fn toggle_contact(&self) -> MentorEdits {
        MentorEdits {
            allow_contact: Some(!self.allow_contact),
            ..MentorEdits::default()
        }
    }

    /// Whether the info slide's required fields are filled
    #[must_use]
    pub fn has_required_info(&self) -> bool {
        !self.first_name.is_empty() && !self.name.is_empty() && !self.title.is_empty()
    }
}

/// Defaults the info slide fills in on first display
///
/// Returns `None` when every defaulted field is already set.
#[must_use]
pub fn info_defaults(mentor: &Mentor, user_name: &str) -> Option<MentorEdits> {
    let mut edits = MentorEdits::default();
    if mentor.title.is_empty() {
        edits.title = Some(TITLE_PLACEHOLDER.to_string());
    }
    if mentor.name.is_empty() {
        edits.name = Some(user_name.to_string());
    }
    if mentor.first_name.is_empty() {
        let first = user_name.split(' ').next().unwrap_or_default();
        edits.first_name = Some(first.to_string());
    }
    (!edits.is_empty()).then_some(edits)
}
