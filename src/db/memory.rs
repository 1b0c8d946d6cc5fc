//! In-memory `DataStore` used by tests across the crate.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};
use tokio::sync::watch;

use super::{Collection, DataError, DataStore, Direction, Query};

#[derive(Default)]
struct Inner {
    rows: HashMap<Collection, Vec<Value>>,
    failing: HashSet<Collection>,
    tokens: Vec<String>,
}

#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<Mutex<Inner>>,
    gate: Arc<watch::Sender<bool>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            inner: Arc::new(Mutex::new(Inner::default())),
            gate: Arc::new(gate),
        }
    }

    pub fn into_shared(self) -> Arc<dyn DataStore> {
        Arc::new(self)
    }

    pub fn seed(&self, collection: Collection, rows: Vec<Value>) {
        self.lock().rows.entry(collection).or_default().extend(rows);
    }

    /// Every subsequent call against `collection` is rejected.
    pub fn fail(&self, collection: Collection) {
        self.lock().failing.insert(collection);
    }

    /// Parks every select until `release` is called.
    pub fn hold(&self) {
        self.gate.send_replace(false);
    }

    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    pub fn rows(&self, collection: Collection) -> Vec<Value> {
        self.lock().rows.get(&collection).cloned().unwrap_or_default()
    }

    /// Access tokens handed to `authorized`, oldest first.
    pub fn seen_tokens(&self) -> Vec<String> {
        self.lock().tokens.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check(&self, collection: Collection) -> Result<(), DataError> {
        if self.lock().failing.contains(&collection) {
            return Err(DataError::Rejected {
                status: 503,
                message: format!("{} unavailable", collection),
            });
        }
        Ok(())
    }

    fn matching(&self, collection: Collection, query: &Query) -> Vec<Value> {
        self.lock()
            .rows
            .get(&collection)
            .map(|rows| {
                rows.iter()
                    .filter(|row| matches(row, query))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters.iter().all(|filter| {
        let cell = row.get(&filter.column).unwrap_or(&Value::Null);
        cell == &filter.value || as_text(cell) == as_text(&filter.value)
    })
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Postgres ordering: NULL sorts after every value.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn with_defaults(collection: Collection, mut row: Value) -> Value {
    let now = chrono::Utc::now().to_rfc3339();
    if let Some(obj) = row.as_object_mut() {
        obj.entry("id").or_insert_with(|| json!(uuid::Uuid::new_v4()));
        obj.entry("created_at").or_insert_with(|| json!(now));
        if collection != Collection::ContactMessages {
            obj.entry("updated_at").or_insert_with(|| json!(now));
        }
        if collection == Collection::ContactMessages {
            obj.entry("is_read").or_insert(json!(false));
        }
    }
    row
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Value>, DataError> {
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;
        self.check(collection)?;

        let mut rows = self.matching(collection, query);
        // Stable sort keeps insertion order for ties.
        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|order| {
                    let ord = compare(
                        a.get(&order.column).unwrap_or(&Value::Null),
                        b.get(&order.column).unwrap_or(&Value::Null),
                    );
                    match order.direction {
                        Direction::Ascending => ord,
                        Direction::Descending => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(rows)
    }

    async fn count(&self, collection: Collection, query: &Query) -> Result<u64, DataError> {
        self.check(collection)?;
        Ok(self.matching(collection, query).len() as u64)
    }

    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
        returning: bool,
    ) -> Result<Vec<Value>, DataError> {
        self.check(collection)?;
        let stored: Vec<Value> = rows
            .into_iter()
            .map(|row| with_defaults(collection, row))
            .collect();
        self.lock()
            .rows
            .entry(collection)
            .or_default()
            .extend(stored.iter().cloned());
        Ok(if returning { stored } else { Vec::new() })
    }

    async fn update(
        &self,
        collection: Collection,
        query: &Query,
        patch: Value,
    ) -> Result<Vec<Value>, DataError> {
        self.check(collection)?;
        let mut inner = self.lock();
        let mut updated = Vec::new();
        if let Some(rows) = inner.rows.get_mut(&collection) {
            for row in rows.iter_mut().filter(|row| matches(row, query)) {
                if let (Some(target), Some(changes)) = (row.as_object_mut(), patch.as_object()) {
                    for (key, value) in changes {
                        target.insert(key.clone(), value.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn ping(&self) -> Result<(), DataError> {
        Ok(())
    }

    fn authorized(&self, access_token: &str) -> Arc<dyn DataStore> {
        self.lock().tokens.push(access_token.to_string());
        Arc::new(self.clone())
    }
}
