//! Persistent session storage.
//!
//! Two entries survive process restarts, exactly the pair the product
//! keeps: an opaque bearer token and a JSON-serialized user profile.
//! They live until explicit logout or a 401 invalidation.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SessionError;
use crate::session::model::Session;

/// Abstraction over the persisted session pair.
///
/// `load` is infallible by contract: corrupt or unreadable stored state is
/// treated as absent, never surfaced as an error. `save` and `clear` are
/// the only mutators of the persisted store; everything else funnels
/// through the session vault.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the persisted session. Returns the empty session when nothing
    /// is stored or the stored profile does not parse.
    async fn load(&self) -> Session;

    /// Persist both fields. From the caller's perspective this is atomic:
    /// a subsequent `load` never observes token without user.
    async fn save(&self, session: &Session) -> Result<(), SessionError>;

    /// Remove everything persisted.
    async fn clear(&self) -> Result<(), SessionError>;
}

/// File name for the opaque bearer token.
const TOKEN_FILE: &str = "access_token";
/// File name for the cached profile JSON.
const USER_FILE: &str = "current_user.json";

/// File-backed store keeping the token and profile as two entries under a
/// data directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn load(&self) -> Session {
        let token = match tokio::fs::read_to_string(self.token_path()).await {
            Ok(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(_) => None,
        };

        let user = match tokio::fs::read_to_string(self.user_path()).await {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    // Corrupt cache reads as absent; sanitize drops the
                    // now-orphaned token as well.
                    tracing::warn!("Stored profile did not parse, discarding: {e}");
                    None
                }
            },
            Err(_) => None,
        };

        Session { token, user }.sanitized()
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let session = session.clone().sanitized();
        tokio::fs::create_dir_all(&self.dir).await?;

        // Profile first, token last: if the second write is lost, load
        // finds a user without a token, which reads as logged out rather
        // than as an inconsistent pair.
        match &session.user {
            Some(user) => {
                let json = serde_json::to_string_pretty(user)?;
                tokio::fs::write(self.user_path(), json).await?;
            }
            None => remove_if_present(self.user_path()).await?,
        }

        match &session.token {
            Some(token) => tokio::fs::write(self.token_path(), token).await?,
            None => remove_if_present(self.token_path()).await?,
        }

        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        // Token first so a crash mid-clear still reads as logged out.
        remove_if_present(self.token_path()).await?;
        remove_if_present(self.user_path()).await?;
        Ok(())
    }
}

async fn remove_if_present(path: PathBuf) -> Result<(), SessionError> {
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::Io(e)),
    }
}

/// In-memory store for tests and ephemeral (tab-lifetime only) use.
#[derive(Default)]
pub struct MemoryStore {
    session: RwLock<Session>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn load(&self) -> Session {
        self.session.read().await.clone().sanitized()
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.session.write().await = session.clone().sanitized();
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionError> {
        *self.session.write().await = Session::empty();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::model::UserProfile;

    fn sample_session() -> Session {
        Session::authenticated("tok-123", UserProfile::minimal("a@b.com"))
    }

    #[tokio::test]
    async fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());

        store.save(&sample_session()).await.unwrap();
        let loaded = store.load().await;

        assert_eq!(loaded.token.as_deref(), Some("tok-123"));
        assert_eq!(loaded.user.unwrap().email, "a@b.com");
    }

    #[tokio::test]
    async fn file_store_empty_dir_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load().await, Session::empty());
    }

    #[tokio::test]
    async fn file_store_missing_dir_loads_empty() {
        let store = FileStore::new("/nonexistent/moto-onboard-test");
        assert_eq!(store.load().await, Session::empty());
    }

    #[tokio::test]
    async fn file_store_corrupt_profile_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save(&sample_session()).await.unwrap();

        tokio::fs::write(dir.path().join(USER_FILE), "{not json")
            .await
            .unwrap();

        // Profile is gone, so the orphaned token must go with it.
        assert_eq!(store.load().await, Session::empty());
    }

    #[tokio::test]
    async fn file_store_token_without_profile_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        tokio::fs::write(dir.path().join(TOKEN_FILE), "orphan-token")
            .await
            .unwrap();

        let store = FileStore::new(dir.path());
        assert_eq!(store.load().await, Session::empty());
    }

    #[tokio::test]
    async fn file_store_clear_removes_both_entries() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save(&sample_session()).await.unwrap();

        store.clear().await.unwrap();

        assert_eq!(store.load().await, Session::empty());
        assert!(!dir.path().join(TOKEN_FILE).exists());
        assert!(!dir.path().join(USER_FILE).exists());
    }

    #[tokio::test]
    async fn memory_store_roundtrip_and_clear() {
        let store = MemoryStore::new();
        store.save(&sample_session()).await.unwrap();
        assert!(store.load().await.is_authenticated());

        store.clear().await.unwrap();
        assert_eq!(store.load().await, Session::empty());
    }

    #[tokio::test]
    async fn saving_inconsistent_pair_persists_empty() {
        let store = MemoryStore::new();
        let bad = Session {
            token: Some("tok".into()),
            user: None,
        };
        store.save(&bad).await.unwrap();
        assert_eq!(store.load().await, Session::empty());
    }
}
