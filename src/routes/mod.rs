/**
 * Routes Module
 * API route handlers and the helpers they share
 */

pub mod admin;
pub mod auth;
pub mod blogs;
pub mod contact;
pub mod health;
pub mod journals;
pub mod navigation;
pub mod pages;
pub mod projects;

use axum::{
    http::{HeaderMap, StatusCode},
    Json,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::auth::User;
use crate::db::DataError;
use crate::state::AppState;

/// Error body shared by every handler.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn api_error(status: StatusCode, error: &str, message: Option<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
            message,
        }),
    )
}

/// Maps a failed store write. Duplicate keys surface as 409, anything else as 502.
pub fn store_error(e: &DataError, what: &str) -> ApiError {
    match e {
        DataError::Rejected { status: 409, .. } => {
            api_error(StatusCode::CONFLICT, "Slug already exists", None)
        }
        _ => {
            tracing::error!(error = %e, "Failed to {}", what);
            api_error(
                StatusCode::BAD_GATEWAY,
                &format!("Failed to {}", what),
                Some(e.user_message("The data store is unavailable")),
            )
        }
    }
}

lazy_static::lazy_static! {
    /// Valid slug pattern: lowercase letters, numbers, and hyphens
    static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();
}

pub fn is_valid_slug(slug: &str) -> bool {
    SLUG_REGEX.is_match(slug)
}

pub fn invalid_slug() -> ApiError {
    api_error(
        StatusCode::BAD_REQUEST,
        "Invalid slug",
        Some("Slug must contain only lowercase letters, numbers, and hyphens".to_string()),
    )
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Resolves the bearer token to a user through the identity service.
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<(User, String), ApiError> {
    let token = bearer_token(headers).ok_or_else(|| {
        api_error(StatusCode::UNAUTHORIZED, "Authorization required", None)
    })?;

    match state.identity.user_for_token(token).await {
        Ok(user) => Ok((user, token.to_string())),
        Err(e) => {
            tracing::warn!(error = %e, "rejected bearer token");
            Err(api_error(
                StatusCode::UNAUTHORIZED,
                "Invalid or expired token",
                None,
            ))
        }
    }
}
