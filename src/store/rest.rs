//! HTTP row store for a PostgREST-compatible endpoint.
//!
//! Every request carries the project's public `apikey` and the user's access
//! token; row-level security on the server narrows results to that user.
//! Single-row writes ask the server for one JSON object, so a write that
//! touches zero or several rows fails server-side instead of silently
//! succeeding.

use super::{Query, RemoteStore, StoreError, Table};
use crate::msg_debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION},
    Client, RequestBuilder, Response, StatusCode,
};
use serde::Deserialize;
use serde_json::Value;

const REST_PATH: &str = "rest/v1";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Error body returned by the row and auth APIs.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiError {
    message: Option<String>,
    error_description: Option<String>,
    msg: Option<String>,
    error: Option<String>,
}

impl ApiError {
    /// Human readable message of an error `body`, if it has one.
    pub(crate) fn message(body: &str) -> Option<String> {
        let error: ApiError = serde_json::from_str(body).ok()?;
        error.message.or(error.error_description).or(error.msg).or(error.error)
    }
}

/// Maps a failed response to a store error. The server's message is kept
/// verbatim, falling back to the raw body and then the status line.
fn status_error(status: StatusCode, body: &str) -> StoreError {
    if status == StatusCode::UNAUTHORIZED {
        return StoreError::Unauthorized;
    }
    let message = ApiError::message(body).unwrap_or_else(|| match body.trim().is_empty() {
        true => status.to_string(),
        false => body.to_string(),
    });
    StoreError::Remote(message)
}

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: String,
}

impl RestStore {
    pub fn new(base_url: &str, anon_key: &str, access_token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn url(&self, table: Table) -> String {
        format!("{}/{}/{}", self.base_url, REST_PATH, table.name())
    }

    fn headers(&self, single: bool) -> Result<HeaderMap, StoreError> {
        let invalid = |e: reqwest::header::InvalidHeaderValue| StoreError::Remote(e.to_string());

        let mut headers = HeaderMap::new();
        headers.insert("apikey", HeaderValue::from_str(&self.anon_key).map_err(invalid)?);
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", self.access_token)).map_err(invalid)?);
        if single {
            headers.insert(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT));
            headers.insert("Prefer", HeaderValue::from_static(RETURN_REPRESENTATION));
        }
        Ok(headers)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let res = request.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

impl RemoteStore for RestStore {
    async fn select(&self, table: Table, query: &Query) -> Result<Vec<Value>, StoreError> {
        msg_debug!(format!("select {} {:?}", table, query.to_params()));
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(query.to_params());

        let request = self.client.get(self.url(table)).headers(self.headers(false)?).query(&params);
        let rows = self.send(request).await?.json::<Vec<Value>>().await?;
        Ok(rows)
    }

    async fn insert(&self, table: Table, row: Value) -> Result<Value, StoreError> {
        msg_debug!(format!("insert into {}", table));
        let request = self.client.post(self.url(table)).headers(self.headers(true)?).json(&row);
        let row = self.send(request).await?.json::<Value>().await?;
        Ok(row)
    }

    async fn update(&self, table: Table, query: &Query, patch: Value) -> Result<Value, StoreError> {
        msg_debug!(format!("update {} {:?}", table, query.to_params()));
        let request = self
            .client
            .patch(self.url(table))
            .headers(self.headers(true)?)
            .query(&query.to_params())
            .json(&patch);
        let row = self.send(request).await?.json::<Value>().await?;
        Ok(row)
    }

    async fn delete(&self, table: Table, query: &Query) -> Result<(), StoreError> {
        msg_debug!(format!("delete from {} {:?}", table, query.to_params()));
        let request = self.client.delete(self.url(table)).headers(self.headers(false)?).query(&query.to_params());
        self.send(request).await?;
        Ok(())
    }
}
