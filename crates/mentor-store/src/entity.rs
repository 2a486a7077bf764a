//! Cached entity records and the keyed collection holding them

use mentor_core::{Entity, LoadingError, LoadingStatus};
use serde::Serialize;

/// Persistent map from entity id to its cache record
///
/// Cloning is O(1) and shares structure, so every transition can produce a
/// fresh snapshot without copying untouched entries.
pub type EntityMap<T> = im::HashMap<String, CachedEntity<T>>;

/// Cache record for one entity
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedEntity<T> {
    /// Last value received from the server
    pub value: Option<T>,
    /// Display text overriding the entity's own, set by overlays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_text: Option<String>,
    /// Request lifecycle
    pub status: LoadingStatus,
    /// Error from the last failed request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<LoadingError>,
}

impl<T> Default for CachedEntity<T> {
    fn default() -> Self {
        Self {
            value: None,
            custom_text: None,
            status: LoadingStatus::None,
            error: None,
        }
    }
}

impl<T> CachedEntity<T> {
    /// Fresh record holding a value the server just returned
    #[must_use]
    pub fn succeeded(value: T) -> Self {
        Self {
            value: Some(value),
            status: LoadingStatus::Succeeded,
            ..Self::default()
        }
    }

    /// Same record with a new in-flight status and no error
    #[must_use]
    pub fn in_flight(mut self, status: LoadingStatus) -> Self {
        self.status = status;
        self.error = None;
        self
    }

    /// Same record marked failed; the value is kept
    #[must_use]
    pub fn failed(mut self, error: LoadingError) -> Self {
        self.status = LoadingStatus::Failed;
        self.error = Some(error);
        self
    }
}

/// All cached entities of one kind plus the outcome of the last batch load
#[derive(Debug, Clone, PartialEq)]
pub struct EntityCollection<T> {
    /// Records by id
    pub entries: EntityMap<T>,
    /// Aggregate status of the most recent batch load
    pub batch_load_status: LoadingStatus,
    /// Error of the most recent failed batch load
    pub batch_load_error: Option<LoadingError>,
}

impl<T: Clone> Default for EntityCollection<T> {
    fn default() -> Self {
        Self {
            entries: EntityMap::new(),
            batch_load_status: LoadingStatus::None,
            batch_load_error: None,
        }
    }
}

impl<T: Entity> EntityCollection<T> {
    /// Record for an id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&CachedEntity<T>> {
        self.entries.get(id)
    }

    /// Status for an id; unknown ids are `None`
    #[must_use]
    pub fn status(&self, id: &str) -> LoadingStatus {
        self.get(id).map_or(LoadingStatus::None, |e| e.status)
    }

    /// Value for an id, if loaded
    #[must_use]
    pub fn value(&self, id: &str) -> Option<&T> {
        self.get(id).and_then(|e| e.value.as_ref())
    }

    /// Whether a non-forced load should fetch this id
    #[must_use]
    pub fn needs_load(&self, id: &str) -> bool {
        self.status(id).needs_load()
    }

    /// Ids with a request in flight, sorted
    #[must_use]
    pub fn in_flight_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, e)| e.status.is_in_flight())
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no record exists
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
