//! Data access: a typed gateway over the hosted record collections.

#[cfg(test)]
pub mod memory;
pub mod models;
pub mod rest;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{sync::Arc, time::Duration};
use thiserror::Error;

/// Named record collections exposed by the data API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Blogs,
    Projects,
    Journals,
    ContactMessages,
    PageAnalytics,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Blogs => "blogs",
            Collection::Projects => "projects",
            Collection::Journals => "journals",
            Collection::ContactMessages => "contact_messages",
            Collection::PageAnalytics => "page_analytics",
        }
    }
}

impl std::fmt::Display for Collection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum DataError {
    #[error("data store request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("data store rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected row shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("data store response carried no row count")]
    MissingCount,
}

impl DataError {
    /// Message safe to show next to a form; falls back to `fallback` for
    /// transport-level failures.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            DataError::Rejected { message, .. } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Equality filters plus an ordering, applied to a single collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.order.push(Order {
            column: column.to_string(),
            direction,
        });
        self
    }
}

/// Raw access to the remote store. Rows travel as JSON objects; `DataClient`
/// layers typing on top.
#[async_trait]
pub trait DataStore: Send + Sync {
    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Value>, DataError>;

    /// Number of rows matching the query's filters. Ordering is ignored.
    async fn count(&self, collection: Collection, query: &Query) -> Result<u64, DataError>;

    /// Inserts `rows`. Returns the stored rows when `returning` is set, otherwise
    /// an empty vector.
    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
        returning: bool,
    ) -> Result<Vec<Value>, DataError>;

    /// Applies `patch` to every row matching the query's filters.
    async fn update(
        &self,
        collection: Collection,
        query: &Query,
        patch: Value,
    ) -> Result<Vec<Value>, DataError>;

    async fn ping(&self) -> Result<(), DataError>;

    /// Same store, acting on behalf of the holder of `access_token`.
    fn authorized(&self, access_token: &str) -> Arc<dyn DataStore>;
}

/// A row type bound to its collection.
pub trait Record: DeserializeOwned + Send + 'static {
    const COLLECTION: Collection;
}

#[derive(Clone)]
pub struct DataClient {
    store: Arc<dyn DataStore>,
}

impl DataClient {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub fn with_access_token(&self, access_token: &str) -> Self {
        Self {
            store: self.store.authorized(access_token),
        }
    }

    pub async fn fetch<T: Record>(&self, query: &Query) -> Result<Vec<T>, DataError> {
        let rows = self.store.select(T::COLLECTION, query).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(DataError::from))
            .collect()
    }

    pub async fn fetch_one<T: Record>(&self, query: &Query) -> Result<Option<T>, DataError> {
        Ok(self.fetch::<T>(query).await?.into_iter().next())
    }

    pub async fn count(&self, collection: Collection, query: &Query) -> Result<u64, DataError> {
        self.store.count(collection, query).await
    }

    /// Fire-and-confirm insert; the caller may lack read access to the collection.
    pub async fn insert<N: Serialize>(&self, collection: Collection, row: &N) -> Result<(), DataError> {
        let row = serde_json::to_value(row)?;
        self.store.insert(collection, vec![row], false).await?;
        Ok(())
    }

    pub async fn insert_returning<T: Record, N: Serialize>(&self, row: &N) -> Result<T, DataError> {
        let row = serde_json::to_value(row)?;
        let stored = self.store.insert(T::COLLECTION, vec![row], true).await?;
        let first = stored.into_iter().next().ok_or_else(|| DataError::Rejected {
            status: 500,
            message: format!("insert into {} returned no row", T::COLLECTION),
        })?;
        Ok(serde_json::from_value(first)?)
    }

    pub async fn update<T: Record>(&self, query: &Query, patch: Value) -> Result<Vec<T>, DataError> {
        let rows = self.store.update(T::COLLECTION, query, patch).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(DataError::from))
            .collect()
    }

    /// Round-trip time of a trivial request against the store.
    pub async fn health_check(&self) -> Result<Duration, DataError> {
        let start = std::time::Instant::now();
        self.store.ping().await?;
        Ok(start.elapsed())
    }
}
