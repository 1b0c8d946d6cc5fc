/**
 * Navigation Routes
 */
use axum::{
    extract::State,
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use super::bearer_token;
use crate::navigation::{Navigator, Screen};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: String,
    /// Screen the client is currently showing.
    #[serde(default)]
    pub screen: Option<Screen>,
}

#[derive(Debug, Serialize)]
pub struct NavigateResponse {
    pub screen: Screen,
    pub authenticated: bool,
}

/// POST /api/navigate - Resolve a page identifier to the screen to show
pub async fn navigate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<NavigateRequest>,
) -> impl IntoResponse {
    let authenticated = match bearer_token(&headers) {
        Some(token) => state.identity.user_for_token(token).await.is_ok(),
        None => false,
    };

    let mut navigator = Navigator::at(payload.screen.unwrap_or_default());
    navigator.session_changed(authenticated);
    let screen = navigator.select(&payload.page, authenticated).clone();

    Json(NavigateResponse {
        screen,
        authenticated,
    })
}
