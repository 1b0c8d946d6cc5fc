/*!
 * Authentication Gateway
 * Delegates sign-in to the hosted identity service and tracks the current session
 */
pub mod gotrue;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Proof of identity issued by the identity service. Opaque beyond its presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub user: User,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    InvalidCredentials(String),

    #[error("identity service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("identity service rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected identity response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl AuthError {
    /// Message shown inline on the login form.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::InvalidCredentials(message) if !message.trim().is_empty() => message.clone(),
            AuthError::InvalidCredentials(_) => {
                "Failed to sign in. Please check your credentials.".to_string()
            }
            AuthError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => "An unexpected error occurred.".to_string(),
        }
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Resolves an access token to its user; fails when the token is no longer valid.
    async fn user_for_token(&self, access_token: &str) -> Result<User, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;
}

/// Current session plus change notification. Constructed explicitly and passed
/// down; subscribers observe every transition through a watch channel.
#[derive(Clone)]
pub struct SessionContext {
    provider: Arc<dyn IdentityProvider>,
    state: Arc<watch::Sender<Option<Session>>>,
}

impl SessionContext {
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            provider,
            state: Arc::new(state),
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.provider.sign_in(email, password).await?;
        tracing::info!(user_id = %session.user.id, "signed in");
        self.state.send_replace(Some(session.clone()));
        Ok(session)
    }

    /// Clears the session. Revocation upstream is best effort.
    pub async fn sign_out(&self) {
        let previous = self.state.send_replace(None);
        if let Some(session) = previous {
            if let Err(e) = self.provider.sign_out(&session.access_token).await {
                tracing::warn!(error = %e, "failed to revoke session upstream");
            }
            tracing::info!(user_id = %session.user.id, "signed out");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::StaticIdentity;
    use super::*;

    #[tokio::test]
    async fn test_sign_in_publishes_session() {
        let ctx = SessionContext::new(Arc::new(StaticIdentity::new("admin@example.com", "hunter22")));
        let mut rx = ctx.subscribe();
        assert!(!ctx.is_authenticated());

        let session = ctx.sign_in("admin@example.com", "hunter22").await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().as_ref(), Some(&session));
        assert!(ctx.is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_sign_in_leaves_session_empty() {
        let ctx = SessionContext::new(Arc::new(StaticIdentity::new("admin@example.com", "hunter22")));
        let rx = ctx.subscribe();

        let err = ctx.sign_in("admin@example.com", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid login credentials");
        assert!(!rx.has_changed().unwrap());
        assert!(ctx.current().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_revokes_and_clears() {
        let identity = Arc::new(StaticIdentity::new("admin@example.com", "hunter22"));
        let ctx = SessionContext::new(identity.clone());
        let session = ctx.sign_in("admin@example.com", "hunter22").await.unwrap();

        ctx.sign_out().await;
        assert!(ctx.current().is_none());
        assert!(identity.user_for_token(&session.access_token).await.is_err());

        // idempotent
        ctx.sign_out().await;
    }

    #[test]
    fn test_contexts_are_independent() {
        let identity: Arc<dyn IdentityProvider> =
            Arc::new(StaticIdentity::new("admin@example.com", "hunter22"));
        let a = SessionContext::new(identity.clone());
        let b = SessionContext::new(identity);
        a.state.send_replace(Some(Session {
            access_token: "t".into(),
            refresh_token: None,
            expires_in: None,
            user: User {
                id: Uuid::nil(),
                email: None,
            },
        }));
        assert!(a.is_authenticated());
        assert!(!b.is_authenticated());
    }
}
