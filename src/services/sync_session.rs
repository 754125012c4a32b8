//! Sync session state machine.
//!
//! Orchestrates sign-in and sign-out against the remote backend. The OAuth
//! exchange itself lives behind [`TokenProvider`]; the session only moves
//! between states, places the token where the drive client reads it, and
//! hands back the remote snapshot for rehydration.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::persistence::{PersistencePort, SaveQueue};
use crate::types::errors::SessionError;
use crate::types::{SessionState, Snapshot};

use super::drive_client::TokenSlot;

/// Boundary to the external identity provider.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Requests an access token, prompting for consent if needed.
    async fn request_token(&self) -> Result<String, SessionError>;

    /// Revokes a previously issued token. Best-effort.
    async fn revoke_token(&self, token: &str);
}

/// Session lifecycle plus ownership of the remote save queue.
///
/// The queue exists only while the session is authenticated, so remote
/// writes can never be scheduled for a signed-out session.
pub struct SyncSession {
    state: SessionState,
    error: Option<String>,
    provider: Arc<dyn TokenProvider>,
    token: TokenSlot,
    remote: Arc<dyn PersistencePort>,
    remote_queue: Option<SaveQueue>,
    generation: u64,
}

impl SyncSession {
    /// Session with an initialized identity client, in the `Ready` state.
    pub fn new(
        provider: Arc<dyn TokenProvider>,
        remote: Arc<dyn PersistencePort>,
        token: TokenSlot,
    ) -> Self {
        Self {
            state: SessionState::Ready,
            error: None,
            provider,
            token,
            remote,
            remote_queue: None,
            generation: 0,
        }
    }

    /// Marks the session as failed to initialize. Terminal until an external
    /// retry: sign-in attempts surface the stored message instead of running.
    pub fn mark_init_failed(&mut self, message: impl Into<String>) {
        self.state = SessionState::Unauthenticated;
        self.error = Some(message.into());
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == SessionState::Authenticated
    }

    /// The most recent session-level error message, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The remote save queue, present only while authenticated.
    pub fn remote_queue(&self) -> Option<&SaveQueue> {
        self.remote_queue.as_ref()
    }

    /// Requests a token and, on success, loads the remote snapshot.
    ///
    /// Valid from `Ready` (first sign-in) and `Authenticated` (re-auth).
    /// Returns `Ok(None)` when a sign-out superseded the in-flight load;
    /// the caller must then discard the result. On token denial the session
    /// falls back to `Ready` with the message stored and surfaced.
    pub async fn sign_in(&mut self) -> Result<Option<Snapshot>, SessionError> {
        match self.state {
            SessionState::Ready | SessionState::Authenticated => {}
            SessionState::Unauthenticated => {
                let message = self
                    .error
                    .clone()
                    .unwrap_or_else(|| "identity client not initialized".to_string());
                return Err(SessionError::InitFailed(message));
            }
            SessionState::SigningIn => {
                return Err(SessionError::NotReady("a sign-in is already in flight".to_string()));
            }
        }

        self.state = SessionState::SigningIn;
        let token = match self.provider.request_token().await {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "token request denied");
                self.state = SessionState::Ready;
                self.error = Some(e.to_string());
                return Err(e);
            }
        };

        self.token.set(token);
        self.state = SessionState::Authenticated;
        self.error = None;
        self.generation += 1;
        let generation = self.generation;
        info!("signed in; loading remote snapshot");

        let snapshot = self.remote.load().await;

        // A sign-out that raced the load wins: its result is discarded.
        if self.generation != generation || self.state != SessionState::Authenticated {
            return Ok(None);
        }

        self.remote_queue = Some(SaveQueue::new(self.remote.clone()));
        Ok(Some(snapshot))
    }

    /// Revokes the token, drops the remote save queue and returns to
    /// `Ready`. The caller clears the collection stores.
    pub async fn sign_out(&mut self) {
        if let Some(token) = self.token.get() {
            self.provider.revoke_token(&token).await;
        }
        self.token.clear();
        self.remote_queue = None;
        self.generation += 1;
        self.state = SessionState::Ready;
        info!("signed out");
    }

    /// Flushes and closes the remote save queue, if present.
    pub async fn shutdown(&mut self) {
        if let Some(queue) = self.remote_queue.take() {
            queue.shutdown().await;
        }
    }
}
