//! Typed access to the client's persisted session values.

use std::sync::Arc;

use portal_core::model::{LearningTrack, Question, SessionUser, TrackCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::repository::{LocalStore, StorageError};

/// Keys shared with the web client so exported profiles stay compatible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    User,
    LessonTrack,
    LessonTrackObj,
    Corrections,
    IsTestLocked,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::User,
        StorageKey::LessonTrack,
        StorageKey::LessonTrackObj,
        StorageKey::Corrections,
        StorageKey::IsTestLocked,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::User => "user",
            StorageKey::LessonTrack => "lessonTrack",
            StorageKey::LessonTrackObj => "lessonTrackObj",
            StorageKey::Corrections => "corrections",
            StorageKey::IsTestLocked => "isTestLocked",
        }
    }
}

/// JSON-encoded session state on top of a [`LocalStore`].
#[derive(Clone)]
pub struct SessionStore {
    local: Arc<dyn LocalStore>,
}

impl SessionStore {
    #[must_use]
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self { local }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON.
    pub async fn user(&self) -> Result<Option<SessionUser>, StorageError> {
        self.read(StorageKey::User).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn set_user(&self, user: &SessionUser) -> Result<(), StorageError> {
        self.write(StorageKey::User, user).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the key cannot be removed.
    pub async fn forget_user(&self) -> Result<(), StorageError> {
        self.local.remove_item(StorageKey::User.as_str()).await
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON.
    pub async fn lesson_track(&self) -> Result<Option<TrackCode>, StorageError> {
        self.read(StorageKey::LessonTrack).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn set_lesson_track(&self, code: &TrackCode) -> Result<(), StorageError> {
        self.write(StorageKey::LessonTrack, code).await
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON.
    pub async fn lesson_track_obj(&self) -> Result<Option<LearningTrack>, StorageError> {
        self.read(StorageKey::LessonTrackObj).await
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn set_lesson_track_obj(&self, track: &LearningTrack) -> Result<(), StorageError> {
        self.write(StorageKey::LessonTrackObj, track).await
    }

    /// Questions failed in the last practice run; empty when none are cached.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON.
    pub async fn corrections(&self) -> Result<Vec<Question>, StorageError> {
        Ok(self.read(StorageKey::Corrections).await?.unwrap_or_default())
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn set_corrections(&self, corrections: &[Question]) -> Result<(), StorageError> {
        self.write(StorageKey::Corrections, &corrections).await
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for malformed JSON.
    pub async fn is_test_locked(&self) -> Result<bool, StorageError> {
        Ok(self.read(StorageKey::IsTestLocked).await?.unwrap_or(false))
    }

    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    pub async fn set_test_locked(&self, locked: bool) -> Result<(), StorageError> {
        self.write(StorageKey::IsTestLocked, &locked).await
    }

    /// Drops every persisted value (logout).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be cleared.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.local.clear().await
    }

    async fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.local.get_item(key.as_str()).await? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|err| {
            tracing::warn!(key = key.as_str(), error = %err, "stored value is not valid JSON");
            StorageError::Serialization(err.to_string())
        })
    }

    async fn write<T: Serialize + ?Sized>(
        &self,
        key: StorageKey,
        value: &T,
    ) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        tracing::debug!(key = key.as_str(), "persisting session value");
        self.local.set_item(key.as_str(), &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryStore;

    fn store() -> (SessionStore, InMemoryStore) {
        let backing = InMemoryStore::new();
        (SessionStore::new(Arc::new(backing.clone())), backing)
    }

    #[tokio::test]
    async fn missing_values_read_as_defaults() {
        let (store, _) = store();
        assert!(store.user().await.unwrap().is_none());
        assert!(store.corrections().await.unwrap().is_empty());
        assert!(!store.is_test_locked().await.unwrap());
    }

    #[tokio::test]
    async fn lesson_track_is_stored_as_json_string() {
        let (store, backing) = store();
        let code = TrackCode::new("ACME").unwrap();
        store.set_lesson_track(&code).await.unwrap();
        assert_eq!(
            backing.get_item("lessonTrack").await.unwrap().as_deref(),
            Some("\"ACME\"")
        );
        assert_eq!(store.lesson_track().await.unwrap(), Some(code));
    }

    #[tokio::test]
    async fn malformed_json_is_a_serialization_error() {
        let (store, backing) = store();
        backing.set_item("user", "{not json").await.unwrap();
        let err = store.user().await.unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let (store, _) = store();
        store.set_test_locked(true).await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.is_test_locked().await.unwrap());
    }

    #[test]
    fn keys_match_web_client_names() {
        let names: Vec<&str> = StorageKey::ALL.iter().map(|key| key.as_str()).collect();
        assert_eq!(
            names,
            ["user", "lessonTrack", "lessonTrackObj", "corrections", "isTestLocked"]
        );
    }
}
