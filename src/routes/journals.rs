/**
 * Journal Routes
 */
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::db::models::Mood;
use crate::filter::{CategoryFilter, ContentFilter};
use crate::state::AppState;
use crate::views::{JournalsPage, Mounted};

#[derive(Debug, Default, Deserialize)]
pub struct JournalListQuery {
    pub mood: Option<String>,
    pub q: Option<String>,
}

/// GET /api/journals - Public entries, newest first
pub async fn list_journals(
    State(state): State<AppState>,
    Query(query): Query<JournalListQuery>,
) -> impl IntoResponse {
    let filter = ContentFilter::new(
        CategoryFilter::from_label(query.mood.as_deref(), Mood::parse),
        query.q.as_deref().unwrap_or_default(),
    );
    let page = Mounted::mount(JournalsPage::new(filter), &state.data)
        .into_settled()
        .await;
    (StatusCode::OK, Json(page.render()))
}

#[cfg(test)]
mod tests {
    use crate::db::Collection;
    use crate::routes::testing::TestApp;
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_mood_filter() {
        let app = TestApp::new();
        let entry = |title: &str, mood: &str, public: bool| {
            json!({
                "id": uuid::Uuid::new_v4(),
                "title": title,
                "content": "",
                "entry_date": "2024-02-02",
                "mood": mood,
                "media_url": "https://cdn.example.com/a.mp3",
                "media_type": "audio",
                "is_public": public,
                "created_at": "2024-01-01T00:00:00Z",
                "updated_at": "2024-01-01T00:00:00Z"
            })
        };
        app.store.seed(
            Collection::Journals,
            vec![
                entry("Gratitude list", "grateful", true),
                entry("Calm evening", "calm", true),
                entry("Hidden", "grateful", false),
            ],
        );

        let (status, body) = app.get_json("/api/journals?mood=Grateful", None).await;
        assert_eq!(status, StatusCode::OK);
        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["title"], "Gratitude list");
        assert_eq!(items[0]["moodEmoji"], "🙏");
        assert_eq!(items[0]["media"]["kind"], "audio");
        assert_eq!(body["selectedMood"], "grateful");
    }
}
