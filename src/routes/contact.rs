/**
 * Contact Routes
 */
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::db::models::NewContactMessage;
use crate::state::AppState;
use crate::views::{contact::SubmitError, ContactForm};

/// POST /api/contact - Store a contact message and return the form state
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(fields): Json<NewContactMessage>,
) -> impl IntoResponse {
    let mut form = ContactForm::new(fields);
    let status = match form.submit(&state.data).await {
        Ok(()) => StatusCode::CREATED,
        Err(SubmitError::Invalid(_)) => StatusCode::BAD_REQUEST,
        Err(SubmitError::Store(_)) => StatusCode::BAD_GATEWAY,
    };
    (status, Json(form))
}
