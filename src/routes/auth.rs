/**
 * Authentication Routes
 * Sign-in and sign-out, delegated to the hosted identity service
 */
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::bearer_token;
use crate::auth::{AuthError, SessionContext, User};
use crate::navigation::{Navigator, Screen};
use crate::state::AppState;
use crate::views::LoginForm;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for a successful POST /api/auth/login
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,
    pub user: User,
    pub screen: Screen,
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
    pub screen: Screen,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login - Sign in; failures come back as the login form with its error
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let mut form = LoginForm::new(&payload.email, &payload.password);

    if form.email.trim().is_empty() || form.password.is_empty() {
        form.password.clear();
        form.error = Some("Email and password are required.".to_string());
        return (StatusCode::BAD_REQUEST, Json(form)).into_response();
    }
    if !form.email.contains('@') {
        form.password.clear();
        form.error = Some("Please enter a valid email address.".to_string());
        return (StatusCode::BAD_REQUEST, Json(form)).into_response();
    }

    let session = SessionContext::new(state.identity.clone());
    match form.submit(&session).await {
        Ok(session) => {
            let mut navigator = Navigator::at(Screen::AdminLogin);
            let screen = navigator.session_changed(true).clone();
            (
                StatusCode::OK,
                Json(LoginResponse {
                    access_token: session.access_token,
                    refresh_token: session.refresh_token,
                    expires_in: session.expires_in,
                    user: session.user,
                    screen,
                }),
            )
                .into_response()
        }
        Err(e) => {
            let status = match e {
                AuthError::InvalidCredentials(_) => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_GATEWAY,
            };
            (status, Json(form)).into_response()
        }
    }
}

/// POST /api/auth/logout - Revoke the bearer token if any. Always succeeds.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = bearer_token(&headers) {
        if let Err(e) = state.identity.sign_out(token).await {
            tracing::warn!(error = %e, "failed to revoke session upstream");
        }
    }

    let mut navigator = Navigator::new();
    Json(LogoutResponse {
        success: true,
        screen: navigator.logout().clone(),
    })
}
