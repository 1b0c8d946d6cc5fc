/*!
 * GoTrue identity provider
 * Password sign-in, token introspection and logout against `/auth/v1`
 */
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use super::{AuthError, IdentityProvider, Session, User};

pub struct GoTrueProvider {
    http: Client,
    base: Url,
    anon_key: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    user: User,
}

/// GoTrue has used several error shapes over time.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

impl GoTrueProvider {
    pub fn new(http: Client, project_url: &Url, anon_key: &str) -> Self {
        let mut base = project_url.clone();
        let path = format!("{}/auth/v1/", project_url.path().trim_end_matches('/'));
        base.set_path(&path);
        Self {
            http,
            base,
            anon_key: anon_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base.join(path).map_err(|e| AuthError::Rejected {
            status: 0,
            message: format!("invalid identity endpoint '{}': {}", path, e),
        })
    }

    async fn failure(response: Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .unwrap_or_default()
            .into_message()
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            AuthError::InvalidCredentials(message)
        } else {
            AuthError::Rejected {
                status: status.as_u16(),
                message,
            }
        }
    }
}

#[async_trait]
impl IdentityProvider for GoTrueProvider {
    async fn sign_in(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(self.endpoint("token")?)
            .query(&[("grant_type", "password")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let err = Self::failure(response).await;
            tracing::warn!(error = %err, "sign-in rejected by identity service");
            return Err(err);
        }

        let body = response.bytes().await?;
        let token: TokenResponse = serde_json::from_slice(&body)?;
        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
            user: token.user,
        })
    }

    async fn user_for_token(&self, access_token: &str) -> Result<User, AuthError> {
        let response = self
            .http
            .get(self.endpoint("user")?)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await);
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.endpoint("logout")?)
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure(response).await)
        }
    }
}
