//! Error types for mentor domain rules

/// Errors raised by the profile and subject editing rules
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// Subject id is not part of the catalogue
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    /// Required subjects cannot be deselected
    #[error("subject is required and cannot be deselected: {0}")]
    SubjectRequired(String),

    /// Only selected subjects can become the primary subject
    #[error("subject must be selected before it can be primary: {0}")]
    SubjectNotSelected(String),
}
