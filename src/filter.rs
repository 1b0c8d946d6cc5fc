//! Content filtering over records already held in memory.
//!
//! A record passes when its category matches the selected one (or "all" is
//! selected) and the case-folded query is empty or a substring of the title,
//! the excerpt/description, or any tag. Input order is preserved.

use serde::Serialize;

use crate::db::models::{BlogCategory, BlogPost, JournalEntry, Mood, Project, ProjectTier};

/// Fields the content filter looks at.
pub trait Searchable {
    type Category: PartialEq + Copy;

    fn category(&self) -> Option<Self::Category>;
    fn title(&self) -> &str;
    fn summary(&self) -> Option<&str>;
    fn tags(&self) -> &[String];
}

impl Searchable for BlogPost {
    type Category = BlogCategory;

    fn category(&self) -> Option<BlogCategory> {
        self.category_kind()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        self.excerpt.as_deref()
    }

    fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or(&[])
    }
}

impl Searchable for Project {
    type Category = ProjectTier;

    fn category(&self) -> Option<ProjectTier> {
        Some(self.tier())
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        Some(&self.description)
    }

    fn tags(&self) -> &[String] {
        &self.tech_stack
    }
}

impl Searchable for JournalEntry {
    type Category = Mood;

    fn category(&self) -> Option<Mood> {
        self.mood_kind()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn summary(&self) -> Option<&str> {
        Some(&self.content)
    }

    fn tags(&self) -> &[String] {
        &[]
    }
}

/// Category selection; `All` is the pass-through sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter<C> {
    All,
    Only(C),
}

impl<C: PartialEq + Copy> CategoryFilter<C> {
    /// "All" or an empty value selects the sentinel; anything else goes through `parse`.
    pub fn from_label(label: Option<&str>, parse: impl Fn(&str) -> C) -> Self {
        Self::try_from_label(label, |l| Some(parse(l)))
            .unwrap_or(CategoryFilter::All)
    }

    /// Like `from_label` for label sets without a fallback; `None` when the
    /// label is not recognised.
    pub fn try_from_label(label: Option<&str>, parse: impl Fn(&str) -> Option<C>) -> Option<Self> {
        match label.map(str::trim) {
            None | Some("") => Some(CategoryFilter::All),
            Some(l) if l.eq_ignore_ascii_case("all") => Some(CategoryFilter::All),
            Some(l) => parse(l).map(CategoryFilter::Only),
        }
    }

    pub fn admits(&self, category: Option<C>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => category.as_ref() == Some(wanted),
        }
    }
}

impl<C: Serialize> Serialize for CategoryFilter<C> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryFilter::All => serializer.serialize_str("All"),
            CategoryFilter::Only(c) => c.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentFilter<C> {
    category: CategoryFilter<C>,
    query: String,
    folded: String,
}

impl<C: PartialEq + Copy> Default for ContentFilter<C> {
    fn default() -> Self {
        Self::new(CategoryFilter::All, "")
    }
}

impl<C: PartialEq + Copy> ContentFilter<C> {
    pub fn new(category: CategoryFilter<C>, query: &str) -> Self {
        Self {
            category,
            query: query.to_string(),
            folded: query.to_lowercase(),
        }
    }

    pub fn category(&self) -> CategoryFilter<C> {
        self.category
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Searchable<Category = C>,
    {
        self.category.admits(record.category()) && self.matches_text(record)
    }

    fn matches_text<T: Searchable>(&self, record: &T) -> bool {
        let q = self.folded.as_str();
        if q.is_empty() {
            return true;
        }
        record.title().to_lowercase().contains(q)
            || record
                .summary()
                .is_some_and(|s| s.to_lowercase().contains(q))
            || record.tags().iter().any(|t| t.to_lowercase().contains(q))
    }

    /// Indices of the matching records, in input order.
    pub fn positions<T>(&self, records: &[T]) -> Vec<usize>
    where
        T: Searchable<Category = C>,
    {
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| self.matches(*r))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn apply<'a, T>(&self, records: &'a [T]) -> Vec<&'a T>
    where
        T: Searchable<Category = C>,
    {
        records.iter().filter(|r| self.matches(*r)).collect()
    }
}
