//! Blog list and single-post views.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use uuid::Uuid;

use super::{listing::Listing, Loadable};
use crate::db::{
    models::{BlogCategory, BlogPost},
    DataClient, DataError, Direction, Query,
};
use crate::filter::CategoryFilter;

const WORDS_PER_MINUTE: usize = 200;
const CARD_TAGS: usize = 3;

pub type BlogsPage = Listing<BlogPost>;

/// Estimated minutes to read `content`, never less than one.
pub fn reading_minutes(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    words.div_ceil(WORDS_PER_MINUTE).max(1) as u32
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogCard {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub reading_minutes: u32,
    pub view_count: i64,
}

impl From<&BlogPost> for BlogCard {
    fn from(post: &BlogPost) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            slug: post.slug.clone(),
            excerpt: post.excerpt.clone(),
            category: post.category_label().map(str::to_string),
            tags: post
                .tags
                .iter()
                .flatten()
                .take(CARD_TAGS)
                .cloned()
                .collect(),
            cover_image: post.cover_image.clone(),
            published_at: post.published_at,
            reading_minutes: reading_minutes(&post.content),
            view_count: post.view_count,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogsView {
    pub loading: bool,
    pub categories: Vec<&'static str>,
    pub selected_category: CategoryFilter<BlogCategory>,
    pub query: String,
    pub items: Vec<BlogCard>,
}

impl Loadable for BlogsPage {
    type Output = Result<Vec<BlogPost>, DataError>;

    fn fetch(client: DataClient) -> impl Future<Output = Self::Output> + Send + 'static {
        async move {
            client
                .fetch::<BlogPost>(
                    &Query::new()
                        .eq("is_published", true)
                        .order("published_at", Direction::Descending),
                )
                .await
        }
    }

    fn receive(&mut self, output: Self::Output) {
        self.receive_result("blogs", output);
    }
}

impl BlogsPage {
    pub fn render(&self) -> BlogsView {
        BlogsView {
            loading: self.loading(),
            categories: std::iter::once("All")
                .chain(BlogCategory::SELECTABLE.iter().map(BlogCategory::as_str))
                .collect(),
            selected_category: self.filter().category(),
            query: self.filter().query().to_string(),
            items: self.visible().map(BlogCard::from).collect(),
        }
    }
}

/// Full post for the reading view.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogDetail {
    #[serde(flatten)]
    pub card: BlogCard,
    pub content: String,
}

impl BlogDetail {
    /// Published post with this slug, if any.
    pub async fn load(client: &DataClient, slug: &str) -> Result<Option<Self>, DataError> {
        let post = client
            .fetch_one::<BlogPost>(
                &Query::new()
                    .eq("slug", slug)
                    .eq("is_published", true),
            )
            .await?;
        Ok(post.map(Self::from))
    }
}

impl From<BlogPost> for BlogDetail {
    fn from(post: BlogPost) -> Self {
        Self {
            card: BlogCard::from(&post),
            content: post.content,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{memory::MemoryStore, Collection};
    use crate::views::Mounted;
    use serde_json::{json, Value};

    fn post(title: &str, category: &str, published_at: Option<&str>, tags: &[&str]) -> Value {
        json!({
            "id": Uuid::new_v4(),
            "title": title,
            "slug": title.to_lowercase().replace(' ', "-"),
            "content": "word ".repeat(450),
            "excerpt": format!("About {}", title),
            "category": category,
            "tags": tags,
            "cover_image": null,
            "is_published": published_at.is_some(),
            "published_at": published_at,
            "view_count": 3,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        })
    }

    fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store.seed(
            Collection::Blogs,
            vec![
                post("Async Rust", "Tech", Some("2024-02-01T00:00:00Z"), &["rust", "tokio", "async", "futures"]),
                post("Draft", "Tech", None, &[]),
                post("Slow mornings", "Life", Some("2024-04-01T00:00:00Z"), &["habits"]),
                post("React hooks", "Tech", Some("2024-03-01T00:00:00Z"), &["React"]),
            ],
        );
        store
    }

    #[test]
    fn test_reading_minutes() {
        assert_eq!(reading_minutes(""), 1);
        assert_eq!(reading_minutes(&"w ".repeat(200)), 1);
        assert_eq!(reading_minutes(&"w ".repeat(201)), 2);
    }

    #[tokio::test]
    async fn test_page_shows_published_newest_first() {
        let client = DataClient::new(store().into_shared());
        let page = Mounted::mount(BlogsPage::default(), &client)
            .into_settled()
            .await;
        let view = page.render();
        assert!(!view.loading);
        let titles: Vec<&str> = view.items.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Slow mornings", "React hooks", "Async Rust"]);
        assert_eq!(view.categories, vec!["All", "Tech", "Life", "Thoughts"]);
    }

    #[tokio::test]
    async fn test_filters_apply_after_load() {
        let client = DataClient::new(store().into_shared());
        let mut page = Mounted::mount(BlogsPage::default(), &client)
            .into_settled()
            .await;

        page.set_category(CategoryFilter::Only(BlogCategory::Tech));
        let titles: Vec<String> = page.render().items.into_iter().map(|c| c.title).collect();
        assert_eq!(titles, vec!["React hooks", "Async Rust"]);

        page.set_query("react");
        let view = page.render();
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.query, "react");
    }

    #[tokio::test]
    async fn test_card_caps_tags_and_estimates_reading_time() {
        let client = DataClient::new(store().into_shared());
        let page = Mounted::mount(BlogsPage::default(), &client)
            .into_settled()
            .await;
        let view = page.render();
        let card = view.items.iter().find(|c| c.title == "Async Rust").unwrap();
        assert_eq!(card.tags, vec!["rust", "tokio", "async"]);
        assert_eq!(card.reading_minutes, 3);
    }

    #[tokio::test]
    async fn test_fetch_error_shows_empty_state() {
        let store = store();
        store.fail(Collection::Blogs);
        let client = DataClient::new(store.into_shared());
        let page = Mounted::mount(BlogsPage::default(), &client)
            .into_settled()
            .await;
        let view = page.render();
        assert!(!view.loading);
        assert!(view.items.is_empty());
    }

    #[test]
    fn test_card_keeps_unknown_category_text() {
        let post: BlogPost =
            serde_json::from_value(post("Sourdough", "Cooking", Some("2024-01-01T00:00:00Z"), &[]))
                .unwrap();
        let card = BlogCard::from(&post);
        assert_eq!(card.category.as_deref(), Some("Cooking"));
        assert_eq!(post.category_kind(), Some(BlogCategory::Uncategorized));
    }

    #[tokio::test]
    async fn test_detail_skips_drafts() {
        let client = DataClient::new(store().into_shared());
        let detail = BlogDetail::load(&client, "async-rust").await.unwrap().unwrap();
        assert_eq!(detail.card.title, "Async Rust");
        assert!(BlogDetail::load(&client, "draft").await.unwrap().is_none());
    }
}
