/*!
 * REST data store
 * PostgREST-dialect client for the hosted data API (`/rest/v1/{collection}`)
 */
use async_trait::async_trait;
use reqwest::{header, Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use super::{Collection, DataError, DataStore, Direction, Query};

#[derive(Clone)]
pub struct RestStore {
    http: Client,
    base: Url,
    anon_key: String,
    access_token: Option<String>,
}

/// Error body returned by the data API on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
struct ApiError {
    message: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl RestStore {
    pub fn new(http: Client, project_url: &Url, anon_key: &str) -> Self {
        let mut base = project_url.clone();
        let path = format!("{}/rest/v1/", project_url.path().trim_end_matches('/'));
        base.set_path(&path);
        Self {
            http,
            base,
            anon_key: anon_key.to_string(),
            access_token: None,
        }
    }

    fn endpoint(&self, collection: Collection) -> Result<Url, DataError> {
        self.base
            .join(collection.as_str())
            .map_err(|e| DataError::Rejected {
                status: 0,
                message: format!("invalid endpoint for {}: {}", collection, e),
            })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        let bearer = self.access_token.as_deref().unwrap_or(&self.anon_key);
        request
            .header("apikey", &self.anon_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
    }

    async fn rows(response: Response) -> Result<Vec<Value>, DataError> {
        let response = Self::checked(response).await?;
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(Vec::new());
        }
        match serde_json::from_slice::<Value>(&body)? {
            Value::Array(rows) => Ok(rows),
            other => Ok(vec![other]),
        }
    }

    async fn checked(response: Response) -> Result<Response, DataError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(DataError::Rejected {
            status: status.as_u16(),
            message: error_message(&body, status.canonical_reason().unwrap_or("request failed")),
        })
    }
}

/// Renders equality filters and ordering as PostgREST query parameters.
pub fn query_params(query: &Query) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = query
        .filters
        .iter()
        .map(|filter| {
            let op = match &filter.value {
                Value::Null => "is.null".to_string(),
                Value::String(s) => format!("eq.{}", s),
                other => format!("eq.{}", other),
            };
            (filter.column.clone(), op)
        })
        .collect();

    if !query.order.is_empty() {
        let order = query
            .order
            .iter()
            .map(|o| {
                let dir = match o.direction {
                    Direction::Ascending => "asc",
                    Direction::Descending => "desc",
                };
                format!("{}.{}", o.column, dir)
            })
            .collect::<Vec<_>>()
            .join(",");
        params.push(("order".to_string(), order));
    }

    params
}

/// Total from a `Content-Range` header such as `0-9/42` or `*/42`.
pub fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit_once('/')?.1.trim().parse().ok()
}

fn error_message(body: &str, fallback: &str) -> String {
    let parsed: ApiError = serde_json::from_str(body).unwrap_or_default();
    parsed
        .message
        .or(parsed.details)
        .or(parsed.hint)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                fallback.to_string()
            } else {
                body.trim().to_string()
            }
        })
}

#[async_trait]
impl DataStore for RestStore {
    async fn select(&self, collection: Collection, query: &Query) -> Result<Vec<Value>, DataError> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(query_params(query));

        tracing::debug!(collection = %collection, params = ?params, "select");
        let response = self
            .authorize(self.http.get(self.endpoint(collection)?))
            .query(&params)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn count(&self, collection: Collection, query: &Query) -> Result<u64, DataError> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(query_params(&Query {
            filters: query.filters.clone(),
            order: Vec::new(),
        }));

        let response = self
            .authorize(self.http.head(self.endpoint(collection)?))
            .header("Prefer", "count=exact")
            .query(&params)
            .send()
            .await?;
        let response = Self::checked(response).await?;

        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range)
            .ok_or(DataError::MissingCount)
    }

    async fn insert(
        &self,
        collection: Collection,
        rows: Vec<Value>,
        returning: bool,
    ) -> Result<Vec<Value>, DataError> {
        let prefer = if returning {
            "return=representation"
        } else {
            "return=minimal"
        };
        let response = self
            .authorize(self.http.post(self.endpoint(collection)?))
            .header("Prefer", prefer)
            .json(&Value::Array(rows))
            .send()
            .await?;

        if returning {
            Self::rows(response).await
        } else {
            Self::checked(response).await?;
            Ok(Vec::new())
        }
    }

    async fn update(
        &self,
        collection: Collection,
        query: &Query,
        patch: Value,
    ) -> Result<Vec<Value>, DataError> {
        let response = self
            .authorize(self.http.patch(self.endpoint(collection)?))
            .header("Prefer", "return=representation")
            .query(&query_params(query))
            .json(&patch)
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn ping(&self) -> Result<(), DataError> {
        let response = self.authorize(self.http.get(self.base.clone())).send().await?;
        Self::checked(response).await?;
        Ok(())
    }

    fn authorized(&self, access_token: &str) -> Arc<dyn DataStore> {
        let mut store = self.clone();
        store.access_token = Some(access_token.to_string());
        Arc::new(store)
    }
}
