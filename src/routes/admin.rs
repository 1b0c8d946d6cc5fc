/**
 * Admin Routes
 * Dashboard statistics, the contact inbox and content creation (bearer required)
 */
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use super::{api_error, invalid_slug, is_valid_slug, require_session, store_error, ApiError};
use crate::db::{
    models::{
        BlogCategory, BlogPost, ContactMessage, JournalEntry, MediaType, Mood, NewBlogPost,
        NewJournalEntry, NewProject, Project,
    },
    DataClient, Direction, Query as StoreQuery,
};
use crate::state::AppState;
use crate::views::{
    blogs::BlogDetail, journals::JournalCard, projects::ProjectCard, DashboardView, Mounted,
};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct MessageListQuery {
    pub unread: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageItem {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<ContactMessage> for MessageItem {
    fn from(m: ContactMessage) -> Self {
        Self {
            id: m.id,
            name: m.name,
            email: m.email,
            subject: m.subject,
            message: m.message,
            is_read: m.is_read,
            created_at: m.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub items: Vec<MessageItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    #[serde(default)]
    pub is_published: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJournalRequest {
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub entry_date: Option<NaiveDate>,
    pub mood: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    #[serde(default)]
    pub is_public: bool,
}

// ============================================================================
// Validation
// ============================================================================

fn require_title(title: &str) -> Result<String, ApiError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Title is required", None));
    }
    Ok(title.to_string())
}

fn require_slug(slug: &str) -> Result<String, ApiError> {
    let slug = slug.trim();
    if slug.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Slug is required", None));
    }
    if !is_valid_slug(slug) {
        return Err(invalid_slug());
    }
    Ok(slug.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// A media URL needs a media kind and the reverse.
fn journal_media(
    media_type: Option<&str>,
    media_url: Option<String>,
) -> Result<(MediaType, Option<String>), ApiError> {
    let kind = media_type.map(MediaType::parse).unwrap_or_default();
    match (kind, non_blank(media_url)) {
        (MediaType::None, None) => Ok((MediaType::None, None)),
        (MediaType::None, Some(_)) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid media",
            Some("mediaType must be image, video or audio when mediaUrl is set".to_string()),
        )),
        (_, None) => Err(api_error(
            StatusCode::BAD_REQUEST,
            "Invalid media",
            Some("mediaUrl is required for this mediaType".to_string()),
        )),
        (kind, Some(url)) => Ok((kind, Some(url))),
    }
}

fn build_blog(payload: CreateBlogRequest, now: DateTime<Utc>) -> Result<NewBlogPost, ApiError> {
    let title = require_title(&payload.title)?;
    let slug = require_slug(&payload.slug)?;
    Ok(NewBlogPost {
        title,
        slug,
        content: ammonia::clean(&payload.content),
        excerpt: non_blank(payload.excerpt),
        category: non_blank(payload.category).map(|c| BlogCategory::normalize(&c)),
        tags: payload
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        cover_image: non_blank(payload.cover_image),
        is_published: payload.is_published,
        published_at: payload.is_published.then_some(now),
    })
}

fn build_project(payload: CreateProjectRequest) -> Result<NewProject, ApiError> {
    Ok(NewProject {
        title: require_title(&payload.title)?,
        slug: require_slug(&payload.slug)?,
        description: payload.description,
        short_description: payload.short_description,
        tech_stack: payload.tech_stack,
        github_url: non_blank(payload.github_url),
        demo_url: non_blank(payload.demo_url),
        image_url: non_blank(payload.image_url),
        is_featured: payload.is_featured,
        display_order: payload.display_order,
    })
}

fn build_journal(payload: CreateJournalRequest, today: NaiveDate) -> Result<NewJournalEntry, ApiError> {
    let title = require_title(&payload.title)?;
    let (media_type, media_url) = journal_media(payload.media_type.as_deref(), payload.media_url)?;
    Ok(NewJournalEntry {
        title,
        content: payload.content,
        entry_date: payload.entry_date.unwrap_or(today),
        mood: non_blank(payload.mood).map(|m| Mood::normalize(&m)),
        media_url,
        media_type,
        is_public: payload.is_public,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Data client acting as the caller, or the 401 response.
async fn admin_client(state: &AppState, headers: &HeaderMap) -> Result<(DataClient, Option<String>), ApiError> {
    let (user, token) = require_session(state, headers).await?;
    Ok((state.data.with_access_token(&token), user.email))
}

/// GET /api/admin/dashboard - Site statistics
pub async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (client, email) = match admin_client(&state, &headers).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };
    let view = Mounted::mount(DashboardView::new(email, None), &client)
        .into_settled()
        .await;
    (StatusCode::OK, Json(view)).into_response()
}

/// GET /api/admin/messages - Contact messages, newest first
pub async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<MessageListQuery>,
) -> impl IntoResponse {
    let (client, _) = match admin_client(&state, &headers).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    let mut filter = StoreQuery::new();
    if let Some(unread) = query.unread {
        filter = filter.eq("is_read", !unread);
    }
    let filter = filter.order("created_at", Direction::Descending);

    let items = client
        .fetch::<ContactMessage>(&filter)
        .await
        .unwrap_or_else(|e| {
            tracing::error!(error = %e, "Error fetching contact messages");
            Vec::new()
        });

    (
        StatusCode::OK,
        Json(MessageListResponse {
            items: items.into_iter().map(MessageItem::from).collect(),
        }),
    )
        .into_response()
}

/// PATCH /api/admin/messages/{id}/read - Mark one message read
pub async fn mark_message_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let (client, _) = match admin_client(&state, &headers).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };

    match client
        .update::<ContactMessage>(
            &StoreQuery::new().eq("id", id.to_string()),
            json!({ "is_read": true }),
        )
        .await
    {
        Ok(rows) => match rows.into_iter().next() {
            Some(message) => (StatusCode::OK, Json(MessageItem::from(message))).into_response(),
            None => api_error(StatusCode::NOT_FOUND, "Not found", None).into_response(),
        },
        Err(e) => store_error(&e, "update message").into_response(),
    }
}

/// POST /api/admin/blogs - Create a blog post
pub async fn create_blog(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateBlogRequest>,
) -> impl IntoResponse {
    let (client, _) = match admin_client(&state, &headers).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };
    let row = match build_blog(payload, Utc::now()) {
        Ok(row) => row,
        Err(e) => return e.into_response(),
    };

    match client.insert_returning::<BlogPost, _>(&row).await {
        Ok(post) => {
            tracing::info!(slug = %post.slug, published = post.is_published, "blog post created");
            (StatusCode::CREATED, Json(BlogDetail::from(post))).into_response()
        }
        Err(e) => store_error(&e, "create post").into_response(),
    }
}

/// POST /api/admin/projects - Create a project
pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateProjectRequest>,
) -> impl IntoResponse {
    let (client, _) = match admin_client(&state, &headers).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };
    let row = match build_project(payload) {
        Ok(row) => row,
        Err(e) => return e.into_response(),
    };

    match client.insert_returning::<Project, _>(&row).await {
        Ok(project) => {
            tracing::info!(slug = %project.slug, "project created");
            (StatusCode::CREATED, Json(ProjectCard::from(&project))).into_response()
        }
        Err(e) => store_error(&e, "create project").into_response(),
    }
}

/// POST /api/admin/journals - Create a journal entry
pub async fn create_journal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CreateJournalRequest>,
) -> impl IntoResponse {
    let (client, _) = match admin_client(&state, &headers).await {
        Ok(c) => c,
        Err(e) => return e.into_response(),
    };
    let row = match build_journal(payload, Utc::now().date_naive()) {
        Ok(row) => row,
        Err(e) => return e.into_response(),
    };

    match client.insert_returning::<JournalEntry, _>(&row).await {
        Ok(entry) => {
            tracing::info!(id = %entry.id, "journal entry created");
            (StatusCode::CREATED, Json(JournalCard::from(&entry))).into_response()
        }
        Err(e) => store_error(&e, "create journal entry").into_response(),
    }
}
