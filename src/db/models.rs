//! Database Models - rows of the hosted record collections, plus insert payloads.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Collection, Record};

// ============================================================================
// Label sets
// ============================================================================

/// Blog category. Unknown stored labels land on `Uncategorized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlogCategory {
    Tech,
    Life,
    Thoughts,
    Uncategorized,
}

impl BlogCategory {
    /// Labels offered by the blog list, in display order.
    pub const SELECTABLE: [BlogCategory; 3] =
        [BlogCategory::Tech, BlogCategory::Life, BlogCategory::Thoughts];

    pub fn as_str(&self) -> &'static str {
        match self {
            BlogCategory::Tech => "Tech",
            BlogCategory::Life => "Life",
            BlogCategory::Thoughts => "Thoughts",
            BlogCategory::Uncategorized => "Uncategorized",
        }
    }

    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "tech" => BlogCategory::Tech,
            "life" => BlogCategory::Life,
            "thoughts" => BlogCategory::Thoughts,
            _ => BlogCategory::Uncategorized,
        }
    }

    /// Canonical spelling for a known label; anything else is kept as typed.
    pub fn normalize(label: &str) -> String {
        match Self::parse(label) {
            BlogCategory::Uncategorized => label.trim().to_string(),
            known => known.as_str().to_string(),
        }
    }
}

impl From<String> for BlogCategory {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<BlogCategory> for String {
    fn from(category: BlogCategory) -> Self {
        category.as_str().to_string()
    }
}

/// Journal mood. Unknown stored labels land on `Unspecified`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Mood {
    Happy,
    Excited,
    Calm,
    Thoughtful,
    Grateful,
    Creative,
    Unspecified,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Excited => "excited",
            Mood::Calm => "calm",
            Mood::Thoughtful => "thoughtful",
            Mood::Grateful => "grateful",
            Mood::Creative => "creative",
            Mood::Unspecified => "unspecified",
        }
    }

    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "happy" => Mood::Happy,
            "excited" => Mood::Excited,
            "calm" => Mood::Calm,
            "thoughtful" => Mood::Thoughtful,
            "grateful" => Mood::Grateful,
            "creative" => Mood::Creative,
            _ => Mood::Unspecified,
        }
    }

    /// Canonical spelling for a known mood; anything else is kept as typed.
    pub fn normalize(label: &str) -> String {
        match Self::parse(label) {
            Mood::Unspecified => label.trim().to_string(),
            known => known.as_str().to_string(),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Excited => "🤩",
            Mood::Calm => "😌",
            Mood::Thoughtful => "🤔",
            Mood::Grateful => "🙏",
            Mood::Creative => "🎨",
            Mood::Unspecified => "📝",
        }
    }
}

impl From<String> for Mood {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<Mood> for String {
    fn from(mood: Mood) -> Self {
        mood.as_str().to_string()
    }
}

/// Kind of media attached to a journal entry. Unknown kinds are treated as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MediaType {
    #[default]
    None,
    Image,
    Video,
    Audio,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::None => "none",
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Audio => "audio",
        }
    }

    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "image" => MediaType::Image,
            "video" => MediaType::Video,
            "audio" => MediaType::Audio,
            _ => MediaType::None,
        }
    }
}

impl From<String> for MediaType {
    fn from(label: String) -> Self {
        Self::parse(&label)
    }
}

impl From<MediaType> for String {
    fn from(kind: MediaType) -> Self {
        kind.as_str().to_string()
    }
}

/// Presentation tier of a project, derived from `is_featured`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectTier {
    Featured,
    Standard,
}

impl ProjectTier {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "featured" => Some(ProjectTier::Featured),
            "standard" => Some(ProjectTier::Standard),
            _ => None,
        }
    }
}

// ============================================================================
// Rows
// ============================================================================

fn present(label: Option<&str>) -> Option<&str> {
    label.map(str::trim).filter(|l| !l.is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: String,
    pub excerpt: Option<String>,
    /// Label as stored, unknown labels included.
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogPost {
    pub fn category_label(&self) -> Option<&str> {
        present(self.category.as_deref())
    }

    pub fn category_kind(&self) -> Option<BlogCategory> {
        self.category_label().map(BlogCategory::parse)
    }
}

impl Record for BlogPost {
    const COLLECTION: Collection = Collection::Blogs;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
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
    pub is_featured: bool,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    pub fn tier(&self) -> ProjectTier {
        if self.is_featured {
            ProjectTier::Featured
        } else {
            ProjectTier::Standard
        }
    }
}

impl Record for Project {
    const COLLECTION: Collection = Collection::Projects;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub entry_date: NaiveDate,
    /// Mood as stored, unknown moods included.
    pub mood: Option<String>,
    pub media_url: Option<String>,
    #[serde(default)]
    pub media_type: MediaType,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn mood_label(&self) -> Option<&str> {
        present(self.mood.as_deref())
    }

    pub fn mood_kind(&self) -> Option<Mood> {
        self.mood_label().map(Mood::parse)
    }

    /// Attached media, only when both a kind and a URL are present.
    pub fn media(&self) -> Option<(MediaType, &str)> {
        match (self.media_type, self.media_url.as_deref()) {
            (MediaType::None, _) | (_, None) => None,
            (_, Some(url)) if url.trim().is_empty() => None,
            (kind, Some(url)) => Some((kind, url)),
        }
    }
}

impl Record for JournalEntry {
    const COLLECTION: Collection = Collection::Journals;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(default)]
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Record for ContactMessage {
    const COLLECTION: Collection = Collection::ContactMessages;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageAnalytic {
    pub id: Uuid,
    pub page_path: String,
    #[serde(default)]
    pub page_title: String,
    #[serde(default)]
    pub visit_count: i64,
    pub last_visited: Option<DateTime<Utc>>,
}

impl Record for PageAnalytic {
    const COLLECTION: Collection = Collection::PageAnalytics;
}

// ============================================================================
// Insert payloads
// ============================================================================

/// Missing fields deserialize empty so the form's own validation reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBlogPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub cover_image: Option<String>,
    pub is_published: bool,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub short_description: String,
    pub tech_stack: Vec<String>,
    pub github_url: Option<String>,
    pub demo_url: Option<String>,
    pub image_url: Option<String>,
    pub is_featured: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewJournalEntry {
    pub title: String,
    pub content: String,
    pub entry_date: NaiveDate,
    pub mood: Option<String>,
    pub media_url: Option<String>,
    pub media_type: MediaType,
    pub is_public: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unknown_category_falls_back() {
        let category: BlogCategory = serde_json::from_value(json!("Cooking")).unwrap();
        assert_eq!(category, BlogCategory::Uncategorized);
        let category: BlogCategory = serde_json::from_value(json!("Tech")).unwrap();
        assert_eq!(category, BlogCategory::Tech);
        assert_eq!(serde_json::to_value(BlogCategory::Life).unwrap(), json!("Life"));
    }

    #[test]
    fn test_mood_lookup_is_case_insensitive() {
        assert_eq!(Mood::parse("Happy"), Mood::Happy);
        assert_eq!(Mood::parse("melancholic"), Mood::Unspecified);
        assert_eq!(Mood::parse("melancholic").emoji(), "📝");
    }

    #[test]
    fn test_normalize_keeps_unknown_labels() {
        assert_eq!(Mood::normalize(" Happy "), "happy");
        assert_eq!(Mood::normalize("melancholic"), "melancholic");
        assert_eq!(BlogCategory::normalize("tech"), "Tech");
        assert_eq!(BlogCategory::normalize("Cooking"), "Cooking");
    }

    #[test]
    fn test_journal_media_requires_kind_and_url() {
        let mut entry: JournalEntry = serde_json::from_value(json!({
            "id": "8f8e8a0c-2f4b-4c61-9a43-5d4d0f7f0e11",
            "title": "Sunday",
            "content": "Walked by the river",
            "entry_date": "2024-03-10",
            "mood": "calm",
            "media_url": "https://cdn.example.com/river.jpg",
            "media_type": "image",
            "is_public": true,
            "created_at": "2024-03-10T10:00:00Z",
            "updated_at": "2024-03-10T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(entry.mood_kind(), Some(Mood::Calm));
        assert_eq!(
            entry.media(),
            Some((MediaType::Image, "https://cdn.example.com/river.jpg"))
        );

        entry.media_type = MediaType::parse("hologram");
        assert_eq!(entry.media(), None);

        entry.media_type = MediaType::Video;
        entry.media_url = None;
        assert_eq!(entry.media(), None);

        entry.mood = Some("  ".into());
        assert_eq!(entry.mood_label(), None);
        assert_eq!(entry.mood_kind(), None);

        entry.mood = Some("melancholic".into());
        assert_eq!(entry.mood_label(), Some("melancholic"));
        assert_eq!(entry.mood_kind(), Some(Mood::Unspecified));
    }
}
