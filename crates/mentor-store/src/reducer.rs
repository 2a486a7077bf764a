//! Pure state transitions for an entity collection
//!
//! Every action produces a new snapshot; the input is never modified.

use crate::entity::{CachedEntity, EntityCollection};
use mentor_core::{Entity, LoadingError, LoadingStatus};

/// State change requested by a store operation
#[derive(Debug, Clone, PartialEq)]
pub enum EntityAction<T> {
    /// Fetch issued for these ids
    LoadStarted {
        /// Ids being fetched
        ids: Vec<String>,
    },
    /// Fetch returned these entities
    LoadSucceeded {
        /// Returned entities
        entities: Vec<T>,
    },
    /// Fetch failed; mark these ids
    LoadFailed {
        /// Ids to mark failed
        ids: Vec<String>,
        /// Error stored on each id
        error: LoadingError,
    },
    /// Update issued for this id
    SaveStarted {
        /// Id before the save
        id: String,
    },
    /// Update returned the persisted entity
    SaveSucceeded {
        /// Id the save was issued under
        requested_id: String,
        /// Persisted entity, possibly under a new id
        entity: T,
    },
    /// Update failed
    SaveFailed {
        /// Id the save was issued under
        id: String,
        /// Error stored on the id
        error: LoadingError,
    },
    /// Drop the error of one id
    ClearError {
        /// Target id
        id: String,
    },
    /// Drop every error
    ClearErrors,
}

impl<T> EntityAction<T> {
    /// Short name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadStarted { .. } => "load_started",
            Self::LoadSucceeded { .. } => "load_succeeded",
            Self::LoadFailed { .. } => "load_failed",
            Self::SaveStarted { .. } => "save_started",
            Self::SaveSucceeded { .. } => "save_succeeded",
            Self::SaveFailed { .. } => "save_failed",
            Self::ClearError { .. } => "clear_error",
            Self::ClearErrors => "clear_errors",
        }
    }
}

/// Apply an action to a snapshot, returning the next snapshot
#[must_use]
pub fn reduce<T: Entity>(state: &EntityCollection<T>, action: EntityAction<T>) -> EntityCollection<T> {
    let mut next = state.clone();
    match action {
        EntityAction::LoadStarted { ids } => {
            for id in ids {
                let record = existing(&next, &id).in_flight(LoadingStatus::Loading);
                next.entries.insert(id, record);
            }
        }
        EntityAction::LoadSucceeded { entities } => {
            for entity in entities {
                next.entries
                    .insert(entity.id().to_string(), CachedEntity::succeeded(entity));
            }
            next.batch_load_status = LoadingStatus::Succeeded;
            next.batch_load_error = None;
        }
        EntityAction::LoadFailed { ids, error } => {
            for id in ids {
                let record = existing(&next, &id).failed(error.clone());
                next.entries.insert(id, record);
            }
            next.batch_load_status = LoadingStatus::Failed;
            next.batch_load_error = Some(error);
        }
        EntityAction::SaveStarted { id } => {
            let record = existing(&next, &id).in_flight(LoadingStatus::Saving);
            next.entries.insert(id, record);
        }
        EntityAction::SaveSucceeded {
            requested_id,
            entity,
        } => {
            if requested_id != entity.id() {
                next.entries.remove(&requested_id);
            }
            next.entries
                .insert(entity.id().to_string(), CachedEntity::succeeded(entity));
        }
        EntityAction::SaveFailed { id, error } => {
            let record = existing(&next, &id).failed(error);
            next.entries.insert(id, record);
        }
        EntityAction::ClearError { id } => {
            if let Some(record) = next.entries.get_mut(&id) {
                record.error = None;
            }
        }
        EntityAction::ClearErrors => {
            for (_, record) in next.entries.iter_mut() {
                record.error = None;
            }
        }
    }
    next
}

fn existing<T: Entity>(state: &EntityCollection<T>, id: &str) -> CachedEntity<T> {
    state.entries.get(id).cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mentor_core::Question;
    use pretty_assertions::assert_eq;

    fn loaded(ids: &[&str]) -> EntityCollection<Question> {
        let entities = ids
            .iter()
            .map(|id| Question::new(*id, format!("question {id}")))
            .collect();
        reduce(
            &EntityCollection::default(),
            EntityAction::LoadSucceeded { entities },
        )
    }

    fn load_error() -> LoadingError {
        LoadingError::new("failed to load", "load_failed")
    }

    #[test]
    fn load_started_marks_loading() {
        let state = reduce(
            &EntityCollection::<Question>::default(),
            EntityAction::LoadStarted {
                ids: vec!["a".to_string(), "b".to_string()],
            },
        );
        assert_eq!(state.status("a"), LoadingStatus::Loading);
        assert_eq!(state.status("b"), LoadingStatus::Loading);
        assert!(state.value("a").is_none());
        assert_eq!(state.batch_load_status, LoadingStatus::None);
    }

    #[test]
    fn reduce_does_not_touch_input() {
        let before = loaded(&["a"]);
        let after = reduce(
            &before,
            EntityAction::SaveStarted {
                id: "a".to_string(),
            },
        );
        assert_eq!(before.status("a"), LoadingStatus::Succeeded);
        assert_eq!(after.status("a"), LoadingStatus::Saving);
    }

    #[test]
    fn load_failed_keeps_value_and_sets_batch_status() {
        let state = reduce(
            &loaded(&["a"]),
            EntityAction::LoadFailed {
                ids: vec!["a".to_string(), "b".to_string()],
                error: load_error(),
            },
        );
        assert_eq!(state.status("a"), LoadingStatus::Failed);
        assert_eq!(state.value("a").unwrap().question, "question a");
        assert_eq!(state.status("b"), LoadingStatus::Failed);
        assert_eq!(state.batch_load_status, LoadingStatus::Failed);
        assert_eq!(state.batch_load_error, Some(load_error()));
    }

    #[test]
    fn save_succeeded_with_new_id_moves_key() {
        let state = reduce(
            &loaded(&["tmp1"]),
            EntityAction::SaveSucceeded {
                requested_id: "tmp1".to_string(),
                entity: Question::new("abc123", "edited"),
            },
        );
        assert!(state.get("tmp1").is_none());
        assert_eq!(state.status("abc123"), LoadingStatus::Succeeded);
        assert_eq!(state.value("abc123").unwrap().question, "edited");
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn save_succeeded_same_id_replaces_in_place() {
        let state = reduce(
            &loaded(&["a", "b"]),
            EntityAction::SaveSucceeded {
                requested_id: "a".to_string(),
                entity: Question::new("a", "edited"),
            },
        );
        assert_eq!(state.value("a").unwrap().question, "edited");
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn clear_error_keeps_failed_status() {
        let failed = reduce(
            &loaded(&["a", "b"]),
            EntityAction::LoadFailed {
                ids: vec!["a".to_string(), "b".to_string()],
                error: load_error(),
            },
        );

        let one = reduce(&failed, EntityAction::ClearError { id: "a".to_string() });
        assert!(one.get("a").unwrap().error.is_none());
        assert_eq!(one.status("a"), LoadingStatus::Failed);
        assert!(one.get("b").unwrap().error.is_some());

        let all = reduce(&failed, EntityAction::ClearErrors);
        assert!(all.entries.values().all(|e| e.error.is_none()));
        assert!(all.entries.values().all(|e| e.status == LoadingStatus::Failed));
    }

    #[test]
    fn clear_error_unknown_id_is_noop() {
        let before = loaded(&["a"]);
        let after = reduce(&before, EntityAction::ClearError { id: "zzz".to_string() });
        assert_eq!(before, after);
    }
}
