//! Identity provider backed by a single fixed account.

use async_trait::async_trait;
use std::{collections::HashSet, sync::Mutex};
use uuid::Uuid;

use super::{AuthError, IdentityProvider, Session, User};

pub struct StaticIdentity {
    email: String,
    password: String,
    user_id: Uuid,
    tokens: Mutex<HashSet<String>>,
}

impl StaticIdentity {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            user_id: Uuid::new_v4(),
            tokens: Mutex::new(HashSet::new()),
        }
    }

    /// Issues a token without going through `sign_in`.
    pub fn issue_token(&self) -> String {
        let token = format!("token-{}", Uuid::new_v4());
        self.tokens.lock().unwrap().insert(token.clone());
        token
    }

    fn user(&self) -> User {
        User {
            id: self.user_id,
            email: Some(self.email.clone()),
        }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        if !email.eq_ignore_ascii_case(&self.email) || password != self.password {
            return Err(AuthError::InvalidCredentials(
                "Invalid login credentials".to_string(),
            ));
        }
        Ok(Session {
            access_token: self.issue_token(),
            refresh_token: Some("refresh".to_string()),
            expires_in: Some(3600),
            user: self.user(),
        })
    }

    async fn user_for_token(&self, access_token: &str) -> Result<User, AuthError> {
        if self.tokens.lock().unwrap().contains(access_token) {
            Ok(self.user())
        } else {
            Err(AuthError::Rejected {
                status: 401,
                message: "invalid JWT".to_string(),
            })
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        self.tokens.lock().unwrap().remove(access_token);
        Ok(())
    }
}
