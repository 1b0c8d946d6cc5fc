//! Admin sign-in form.

use serde::{Deserialize, Serialize};

use crate::auth::{AuthError, Session, SessionContext};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub loading: bool,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            ..Self::default()
        }
    }

    /// Signs in through the session context. The password is dropped either way;
    /// the email stays for a retry.
    pub async fn submit(&mut self, session: &SessionContext) -> Result<Session, AuthError> {
        self.error = None;
        self.loading = true;
        let result = session.sign_in(self.email.trim(), &self.password).await;
        self.loading = false;
        self.password.clear();

        if let Err(e) = &result {
            self.error = Some(e.user_message());
        }
        result
    }
}
