//! Session vault — the single writer of persisted session state.
//!
//! Two paths clear a session: a normal logout and the global 401
//! interceptor in the API layer. Both funnel through [`SessionVault::invalidate`]
//! so there is exactly one synchronized mutation path, and an invalidation
//! racing a concurrent login cannot interleave with its save.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};

use crate::error::SessionError;
use crate::session::model::Session;
use crate::session::store::SessionStore;

/// Serialized access to a [`SessionStore`] plus an invalidation epoch.
///
/// Every invalidation bumps the epoch; observers compare epochs to detect
/// that their in-memory view of the session went stale underneath them.
pub struct SessionVault {
    store: Arc<dyn SessionStore>,
    write_lock: Mutex<()>,
    epoch: watch::Sender<u64>,
}

impl SessionVault {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (epoch, _) = watch::channel(0);
        Self {
            store,
            write_lock: Mutex::new(()),
            epoch,
        }
    }

    /// Read the persisted session.
    pub async fn load(&self) -> Session {
        self.store.load().await
    }

    /// Persist a session. Serialized against other saves and against
    /// invalidation.
    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        let _guard = self.write_lock.lock().await;
        self.store.save(session).await
    }

    /// Persist a session only if no invalidation happened since
    /// `expected_epoch` was observed. Returns whether the save was
    /// applied. The epoch check and the write happen under the write
    /// lock, so an invalidation cannot slip in between them and a stale
    /// login result can never re-persist a dead token.
    pub async fn save_if_epoch(
        &self,
        session: &Session,
        expected_epoch: u64,
    ) -> Result<bool, SessionError> {
        let _guard = self.write_lock.lock().await;
        if *self.epoch.borrow() != expected_epoch {
            return Ok(false);
        }
        self.store.save(session).await?;
        Ok(true)
    }

    /// Clear the persisted session and bump the invalidation epoch.
    ///
    /// This is the only way session state is ever cleared. It cannot fail
    /// from the caller's perspective: a storage error is logged and the
    /// epoch still advances, so observers drop their in-memory copy
    /// either way.
    pub async fn invalidate(&self) {
        let _guard = self.write_lock.lock().await;
        if let Err(e) = self.store.clear().await {
            tracing::warn!("Failed to clear persisted session: {e}");
        }
        self.epoch.send_modify(|epoch| *epoch += 1);
    }

    /// Subscribe to invalidation notifications.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.epoch.subscribe()
    }

    /// Current invalidation epoch.
    pub fn current_epoch(&self) -> u64 {
        *self.epoch.borrow()
    }
}
