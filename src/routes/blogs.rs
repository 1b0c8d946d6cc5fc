/**
 * Blog Routes
 * Published posts: filtered list and single post by slug
 */
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use super::{api_error, invalid_slug, is_valid_slug};
use crate::db::models::BlogCategory;
use crate::filter::{CategoryFilter, ContentFilter};
use crate::state::AppState;
use crate::views::{blogs::BlogDetail, BlogsPage, Mounted};

/// Query parameters for GET /api/blogs
#[derive(Debug, Default, Deserialize)]
pub struct BlogListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
}

/// GET /api/blogs - Published posts, newest first, filtered by category and text
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<BlogListQuery>,
) -> impl IntoResponse {
    let filter = ContentFilter::new(
        CategoryFilter::from_label(query.category.as_deref(), BlogCategory::parse),
        query.q.as_deref().unwrap_or_default(),
    );
    let page = Mounted::mount(BlogsPage::new(filter), &state.data)
        .into_settled()
        .await;
    (StatusCode::OK, Json(page.render()))
}

/// GET /api/blogs/{slug} - Single published post
pub async fn get_blog(State(state): State<AppState>, Path(slug): Path<String>) -> impl IntoResponse {
    if !is_valid_slug(&slug) {
        return invalid_slug().into_response();
    }

    match BlogDetail::load(&state.data, &slug).await {
        Ok(Some(post)) => (StatusCode::OK, Json(post)).into_response(),
        Ok(None) => api_error(StatusCode::NOT_FOUND, "Not found", None).into_response(),
        Err(e) => {
            tracing::error!(error = %e, slug = %slug, "Error fetching blog post");
            api_error(
                StatusCode::BAD_GATEWAY,
                "Failed to load post",
                Some(e.user_message("The data store is unavailable")),
            )
            .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::db::Collection;
    use crate::routes::testing::TestApp;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    fn post(title: &str, category: &str, tags: &[&str], published_at: Option<&str>) -> Value {
        json!({
            "id": uuid::Uuid::new_v4(),
            "title": title,
            "slug": title.to_lowercase().replace(' ', "-"),
            "content": "Some words here",
            "excerpt": null,
            "category": category,
            "tags": tags,
            "cover_image": null,
            "is_published": published_at.is_some(),
            "published_at": published_at,
            "view_count": 0,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    fn app() -> TestApp {
        let app = TestApp::new();
        app.store.seed(
            Collection::Blogs,
            vec![
                post("Tokio tips", "Tech", &["rust"], Some("2024-01-05T00:00:00Z")),
                post("Weekend", "Life", &[], Some("2024-01-06T00:00:00Z")),
                post("Hooks", "Tech", &["React"], Some("2024-01-04T00:00:00Z")),
                post("Unfinished", "Tech", &[], None),
            ],
        );
        app
    }

    fn titles(body: &Value) -> Vec<String> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_list_returns_published_posts() {
        let (status, body) = app().get_json("/api/blogs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(titles(&body), vec!["Weekend", "Tokio tips", "Hooks"]);
        assert_eq!(body["selectedCategory"], "All");
        assert_eq!(body["loading"], false);
    }

    #[tokio::test]
    async fn test_list_applies_category_and_query() {
        let app = app();
        let (_, body) = app.get_json("/api/blogs?category=Tech", None).await;
        assert_eq!(titles(&body), vec!["Tokio tips", "Hooks"]);

        let (_, body) = app.get_json("/api/blogs?category=All&q=react", None).await;
        assert_eq!(titles(&body), vec!["Hooks"]);
    }

    #[tokio::test]
    async fn test_list_survives_store_failure() {
        let app = app();
        app.store.fail(Collection::Blogs);
        let (status, body) = app.get_json("/api/blogs", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_by_slug() {
        let app = app();
        let (status, body) = app.get_json("/api/blogs/tokio-tips", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Tokio tips");
        assert_eq!(body["readingMinutes"], 1);

        let (status, _) = app.get_json("/api/blogs/unfinished", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = app.get_json("/api/blogs/Bad_Slug", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid slug");
    }
}
