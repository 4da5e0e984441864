//! Auth context — tab-lifetime authentication state.
//!
//! A state machine over `loading / authenticated / anonymous`, hydrated
//! from the session vault and mutated only by its own operations plus the
//! vault's invalidation epoch. A stored token is adopted without backend
//! re-validation; a stale token surfaces as a 401 on the first protected
//! call, which invalidates the session globally.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::RwLock;

use crate::api::{ApiClient, RegisterRequest};
use crate::error::{AuthError, Error, Result, ValidationError};
use crate::session::{ProfileUpdate, Session, SessionVault, UserProfile};

/// Authentication phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPhase {
    /// Initial hydration from the persisted store has not finished.
    Loading,
    Authenticated,
    Anonymous,
}

/// Read-only view of the context at one instant.
#[derive(Debug, Clone)]
pub struct AuthSnapshot {
    pub phase: AuthPhase,
    pub user: Option<UserProfile>,
    pub token: Option<String>,
    /// Advisory only; never gates a transition.
    pub error: Option<String>,
}

#[derive(Debug)]
struct AuthState {
    phase: AuthPhase,
    user: Option<UserProfile>,
    token: Option<String>,
    error: Option<String>,
    /// Bumped at the start of every operation; completions holding an
    /// older value are stale and must not mutate state.
    op_generation: u64,
    /// Last vault invalidation epoch this context has reconciled.
    seen_epoch: u64,
}

/// Handed out at the start of an operation; a completion only applies if
/// its ticket is still current (no newer operation, no invalidation).
#[derive(Debug, Clone, Copy)]
struct OpTicket {
    generation: u64,
    epoch: u64,
}

/// Explicit, injectable auth state — hydrate on startup, tear down via
/// logout or global invalidation.
pub struct AuthContext {
    api: Arc<ApiClient>,
    vault: Arc<SessionVault>,
    state: RwLock<AuthState>,
}

impl AuthContext {
    pub fn new(api: Arc<ApiClient>) -> Self {
        let vault = Arc::clone(api.vault());
        Self {
            api,
            vault,
            state: RwLock::new(AuthState {
                phase: AuthPhase::Loading,
                user: None,
                token: None,
                error: None,
                op_generation: 0,
                seen_epoch: 0,
            }),
        }
    }

    /// Hydrate from the persisted store. A stored token is trusted
    /// optimistically; no backend round-trip happens here.
    pub async fn hydrate(&self) {
        let session = self.vault.load().await;
        let mut state = self.state.write().await;
        state.seen_epoch = self.vault.current_epoch();
        match session.token {
            Some(token) => {
                state.phase = AuthPhase::Authenticated;
                state.token = Some(token);
                state.user = session.user;
            }
            None => {
                state.phase = AuthPhase::Anonymous;
                state.token = None;
                state.user = None;
            }
        }
    }

    /// Current view. Reconciles against the vault's invalidation epoch
    /// first, so a 401 raced from the API layer is visible immediately.
    pub async fn snapshot(&self) -> AuthSnapshot {
        let mut state = self.state.write().await;
        self.reconcile(&mut state);
        AuthSnapshot {
            phase: state.phase,
            user: state.user.clone(),
            token: state.token.clone(),
            error: state.error.clone(),
        }
    }

    pub async fn is_authenticated(&self) -> bool {
        self.snapshot().await.phase == AuthPhase::Authenticated
    }

    /// Log in with credentials and persist the resulting session.
    /// Empty credentials fail inline before any network I/O.
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<()> {
        if email.trim().is_empty() || password.expose_secret().is_empty() {
            return Err(ValidationError::new("Por favor, preencha e-mail e senha!").into());
        }

        let ticket = self.begin_op().await;

        let response = match self.api.login(email, password).await {
            Ok(response) => response,
            Err(e) => {
                self.record_error(ticket, &e).await;
                return Err(e);
            }
        };

        // Minimal cached profile; the full one arrives on the next fetch
        // or is filled in by the registration steps.
        let session = Session::authenticated(response.access_token, UserProfile::minimal(email));
        self.adopt(ticket, session).await
    }

    /// Create an account, then perform an implicit login with the same
    /// credentials and adopt the returned token.
    pub async fn register(&self, request: RegisterRequest) -> Result<()> {
        let ticket = self.begin_op().await;

        let response = match self.api.register(&request).await {
            Ok(response) => response,
            Err(e) => {
                self.record_error(ticket, &e).await;
                return Err(e);
            }
        };

        let password = SecretString::from(request.password.clone());
        let login = match self.api.login(&request.email, &password).await {
            Ok(login) => login,
            Err(e) => {
                self.record_error(ticket, &e).await;
                return Err(e);
            }
        };

        let profile = response.into_profile(&request);
        let session = Session::authenticated(login.access_token, profile);
        self.adopt(ticket, session).await
    }

    /// Log out. Always ends anonymous with the persisted store empty; no
    /// network call is needed for this to succeed.
    pub async fn logout(&self) {
        self.vault.invalidate().await;
        let mut state = self.state.write().await;
        state.seen_epoch = self.vault.current_epoch();
        state.phase = AuthPhase::Anonymous;
        state.user = None;
        state.token = None;
        state.error = None;
        state.op_generation += 1;
        tracing::info!("Logged out");
    }

    /// Merge a partial update into the cached profile and persist it.
    /// Pure local merge: callers confirm the backend write separately.
    pub async fn update_user(&self, update: ProfileUpdate) -> Result<()> {
        let mut state = self.state.write().await;
        self.reconcile(&mut state);

        let Some(user) = state.user.as_mut() else {
            return Err(AuthError::NotAuthenticated.into());
        };
        user.merge(update);

        let session = Session {
            token: state.token.clone(),
            user: state.user.clone(),
        };
        let epoch = state.seen_epoch;
        drop(state);

        if !self.vault.save_if_epoch(&session, epoch).await? {
            return Err(AuthError::NotAuthenticated.into());
        }
        Ok(())
    }

    /// Fetch `/driver/me` and fold the result into the cached profile.
    pub async fn refresh_profile(&self) -> Result<UserProfile> {
        let update = self.api.driver_me().await?;
        self.update_user(update).await?;
        let snapshot = self.snapshot().await;
        snapshot
            .user
            .ok_or_else(|| AuthError::NotAuthenticated.into())
    }

    // ── Internals ───────────────────────────────────────────────────

    /// Downgrade to anonymous if the vault was invalidated behind our
    /// back (the 401 interceptor path).
    fn reconcile(&self, state: &mut AuthState) {
        let epoch = self.vault.current_epoch();
        if epoch != state.seen_epoch {
            state.seen_epoch = epoch;
            state.phase = AuthPhase::Anonymous;
            state.user = None;
            state.token = None;
        }
    }

    /// Start an operation: clear the advisory error and stamp a ticket.
    async fn begin_op(&self) -> OpTicket {
        let mut state = self.state.write().await;
        self.reconcile(&mut state);
        state.error = None;
        state.op_generation += 1;
        OpTicket {
            generation: state.op_generation,
            epoch: state.seen_epoch,
        }
    }

    fn is_current(&self, state: &AuthState, ticket: OpTicket) -> bool {
        state.op_generation == ticket.generation
            && self.vault.current_epoch() == ticket.epoch
    }

    /// Persist and adopt an authenticated session, unless the ticket went
    /// stale while the round-trip was in flight. The save is conditional
    /// on the ticket's epoch, checked under the vault's write lock, so an
    /// invalidation racing this completion can never re-persist the dead
    /// token.
    async fn adopt(&self, ticket: OpTicket, session: Session) -> Result<()> {
        {
            let state = self.state.read().await;
            if !self.is_current(&state, ticket) {
                tracing::warn!("Discarding stale auth result");
                return Ok(());
            }
        }

        if !self.vault.save_if_epoch(&session, ticket.epoch).await? {
            tracing::warn!("Discarding stale auth result");
            return Ok(());
        }

        let mut state = self.state.write().await;
        if !self.is_current(&state, ticket) {
            return Ok(());
        }
        state.phase = AuthPhase::Authenticated;
        state.token = session.token;
        state.user = session.user;
        Ok(())
    }

    async fn record_error(&self, ticket: OpTicket, error: &Error) {
        let mut state = self.state.write().await;
        if self.is_current(&state, ticket) {
            state.error = Some(error.to_string());
        }
        if error.is_unauthorized() {
            self.reconcile(&mut state);
        }
    }
}
