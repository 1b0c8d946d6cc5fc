/**
 * Project Routes
 */
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::api_error;
use crate::db::models::ProjectTier;
use crate::filter::{CategoryFilter, ContentFilter};
use crate::state::AppState;
use crate::views::{Mounted, ProjectsPage};

#[derive(Debug, Default, Deserialize)]
pub struct ProjectListQuery {
    pub tier: Option<String>,
    pub q: Option<String>,
}

/// GET /api/projects - All projects by display order, filtered by tier and text
pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> impl IntoResponse {
    let Some(tier) = CategoryFilter::try_from_label(query.tier.as_deref(), ProjectTier::parse) else {
        return api_error(
            StatusCode::BAD_REQUEST,
            "Invalid tier",
            Some("Tier must be one of: all, featured, standard".to_string()),
        )
        .into_response();
    };

    let filter = ContentFilter::new(tier, query.q.as_deref().unwrap_or_default());
    let page = Mounted::mount(ProjectsPage::new(filter), &state.data)
        .into_settled()
        .await;
    (StatusCode::OK, Json(page.render())).into_response()
}
