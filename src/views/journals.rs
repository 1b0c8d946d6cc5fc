//! Public journal.

use chrono::NaiveDate;
use serde::Serialize;
use std::future::Future;
use uuid::Uuid;

use super::{listing::Listing, Loadable};
use crate::db::{
    models::{JournalEntry, MediaType, Mood},
    DataClient, DataError, Direction, Query,
};
use crate::filter::CategoryFilter;

pub type JournalsPage = Listing<JournalEntry>;

#[derive(Debug, PartialEq, Serialize)]
pub struct Media {
    pub kind: MediaType,
    pub url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalCard {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub entry_date: NaiveDate,
    pub mood: Option<String>,
    pub mood_emoji: &'static str,
    pub media: Option<Media>,
}

impl From<&JournalEntry> for JournalCard {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            id: entry.id,
            title: entry.title.clone(),
            content: entry.content.clone(),
            entry_date: entry.entry_date,
            mood: entry.mood_label().map(str::to_string),
            mood_emoji: entry.mood_kind().unwrap_or(Mood::Unspecified).emoji(),
            media: entry.media().map(|(kind, url)| Media {
                kind,
                url: url.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalsView {
    pub loading: bool,
    pub selected_mood: CategoryFilter<Mood>,
    pub query: String,
    pub items: Vec<JournalCard>,
}

impl Loadable for JournalsPage {
    type Output = Result<Vec<JournalEntry>, DataError>;

    fn fetch(client: DataClient) -> impl Future<Output = Self::Output> + Send + 'static {
        async move {
            client
                .fetch::<JournalEntry>(
                    &Query::new()
                        .eq("is_public", true)
                        .order("entry_date", Direction::Descending),
                )
                .await
        }
    }

    fn receive(&mut self, output: Self::Output) {
        self.receive_result("journals", output);
    }
}

impl JournalsPage {
    pub fn render(&self) -> JournalsView {
        JournalsView {
            loading: self.loading(),
            selected_mood: self.filter().category(),
            query: self.filter().query().to_string(),
            items: self.visible().map(JournalCard::from).collect(),
        }
    }
}
