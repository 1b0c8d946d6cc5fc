/**
 * Page Routes
 * Static content for pages that need no data store
 */
use axum::{extract::Path, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::Value;

use super::api_error;
use crate::views::pages::static_content;

#[derive(Debug, Serialize)]
pub struct PageResponse {
    pub page: String,
    pub data: Value,
}

/// GET /api/pages/{name}
pub async fn get_page(Path(name): Path<String>) -> impl IntoResponse {
    match static_content(&name) {
        Some(data) => (StatusCode::OK, Json(PageResponse { page: name, data })).into_response(),
        None => api_error(
            StatusCode::NOT_FOUND,
            "Not found",
            Some(format!("No static content for page '{}'", name)),
        )
        .into_response(),
    }
}
