//! Ghost Admin API client.
//!
//! A thin, authenticated adapter over the Admin API's REST conventions:
//! collections live under `/ghost/api/admin/<resource>/`, mutations wrap
//! the payload as `{ "<resource>": [ { ... } ] }`, and responses come back
//! in the same envelope. Every request carries a freshly minted admin token
//! and the configured `Accept-Version`.
//!
//! The client performs no retries and sets no timeouts; a failed call fails
//! the operation that issued it.

use reqwest::header::AUTHORIZATION;
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;
use url::Url;

use crate::auth::AdminKey;
use crate::config::GhostConfig;
use crate::error::{ClientError, ClientResult};
use crate::params::{BrowseParams, ReadParams};
use crate::types::ImageUpload;

const ACCEPT_VERSION: &str = "Accept-Version";

/// Admin API resource collections addressable by this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Posts,
    Pages,
    Members,
    Tags,
    /// Authors are exposed as the `users` collection.
    Users,
}

impl Resource {
    /// URL path segment and response envelope key (they coincide).
    pub fn key(self) -> &'static str {
        match self {
            Resource::Posts => "posts",
            Resource::Pages => "pages",
            Resource::Members => "members",
            Resource::Tags => "tags",
            Resource::Users => "users",
        }
    }

    /// Singular noun for error messages.
    pub fn singular(self) -> &'static str {
        match self {
            Resource::Posts => "post",
            Resource::Pages => "page",
            Resource::Members => "member",
            Resource::Tags => "tag",
            Resource::Users => "user",
        }
    }
}

/// Authenticated client for one Ghost site's Admin API.
///
/// Holds immutable configuration plus reqwest's shared connection pool, so a
/// single instance is safe to reuse across interleaved calls.
#[derive(Debug, Clone)]
pub struct GhostClient {
    http: reqwest::Client,
    base: Url,
    key: AdminKey,
    version: String,
}

impl GhostClient {
    /// Build a client from configuration, validating the admin key eagerly.
    pub fn new(config: &GhostConfig) -> ClientResult<Self> {
        let key = AdminKey::parse(&config.admin_api_key)?;

        let base = format!("{}/ghost/api/admin/", config.api_url.trim_end_matches('/'));
        let base = Url::parse(&base)
            .map_err(|e| ClientError::config_error(format!("invalid Ghost API URL: {e}")))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self {
            http,
            base,
            key,
            version: config.version.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        self.base
            .join(path)
            .map_err(|e| ClientError::config_error(format!("invalid endpoint path '{path}': {e}")))
    }

    /// List a resource collection. Returns the JSON array under the
    /// resource key of the response envelope.
    pub async fn browse(&self, resource: Resource, params: &BrowseParams) -> ClientResult<Value> {
        let url = self.endpoint(&format!("{}/", resource.key()))?;
        let body = self
            .send_json(self.http.get(url).query(params), resource.key())
            .await?;
        Ok(body)
    }

    /// Fetch a single record by id. Returns the JSON object.
    pub async fn read(&self, resource: Resource, id: &str, params: &ReadParams) -> ClientResult<Value> {
        let url = self.endpoint(&format!("{}/{}/", resource.key(), id))?;
        let body = self
            .send_json(self.http.get(url).query(params), resource.key())
            .await?;
        first_record(body, resource.singular(), id)
    }

    /// Create a record. Returns the created JSON object.
    pub async fn add(&self, resource: Resource, data: Value) -> ClientResult<Value> {
        let url = self.endpoint(&format!("{}/", resource.key()))?;
        let mut req = self.http.post(url);
        if data.get("html").is_some() {
            req = req.query(&[("source", "html")]);
        }
        let body = self
            .send_json(req.json(&envelope(resource, data)), resource.key())
            .await?;
        first_record(body, resource.singular(), "new record")
    }

    /// Update a record by id. Returns the updated JSON object.
    pub async fn edit(&self, resource: Resource, id: &str, data: Value) -> ClientResult<Value> {
        let url = self.endpoint(&format!("{}/{}/", resource.key(), id))?;
        let mut req = self.http.put(url);
        if data.get("html").is_some() {
            req = req.query(&[("source", "html")]);
        }
        let body = self
            .send_json(req.json(&envelope(resource, data)), resource.key())
            .await?;
        first_record(body, resource.singular(), id)
    }

    /// Delete a record by id.
    pub async fn delete(&self, resource: Resource, id: &str) -> ClientResult<()> {
        let url = self.endpoint(&format!("{}/{}/", resource.key(), id))?;
        // 204 No Content on success; nothing to parse.
        self.send(self.http.delete(url)).await?;
        Ok(())
    }

    /// Upload an image as multipart form data. Returns the `{url, ref}`
    /// object reported by the remote storage.
    pub async fn upload_image(&self, upload: &ImageUpload) -> ClientResult<Value> {
        let url = self.endpoint("images/upload/")?;

        let part = reqwest::multipart::Part::bytes(upload.data.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.mime_type)
            .map_err(ClientError::Http)?;

        let mut form = reqwest::multipart::Form::new().part("file", part);
        if let Some(purpose) = &upload.purpose {
            form = form.text("purpose", purpose.clone());
        }
        if let Some(reference) = &upload.reference {
            form = form.text("ref", reference.clone());
        }

        let body = self
            .send_json(self.http.post(url).multipart(form), "images")
            .await?;
        first_record(body, "image", "upload")
    }

    /// Issue a request and pull the collection under `key` out of the
    /// response envelope.
    async fn send_json(&self, req: RequestBuilder, key: &str) -> ClientResult<Value> {
        let resp = self.send(req).await?;
        let status = resp.status();
        let mut body: Value = resp.json().await?;

        match body.get_mut(key).map(Value::take) {
            Some(collection) => Ok(collection),
            None => Err(ClientError::api_error(
                status.as_u16(),
                format!("unexpected response shape: missing '{key}'"),
            )),
        }
    }

    /// Authenticate and dispatch a request, mapping non-success statuses to
    /// [`ClientError::Api`].
    async fn send(&self, req: RequestBuilder) -> ClientResult<reqwest::Response> {
        let token = self.key.token()?;
        let req = req
            .header(AUTHORIZATION, format!("Ghost {token}"))
            .header(ACCEPT_VERSION, &self.version);

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let message = ghost_error_message(status, &body);
        tracing::error!(status = status.as_u16(), %message, "admin API request failed");
        Err(ClientError::api_error(status.as_u16(), message))
    }
}

/// Wrap a mutation payload in the Admin API's `{ "<resource>": [data] }`
/// envelope.
fn envelope(resource: Resource, data: Value) -> Value {
    serde_json::json!({ resource.key(): [data] })
}

/// Point responses come back as a one-element collection; unwrap it.
fn first_record(collection: Value, singular: &str, id: &str) -> ClientResult<Value> {
    match collection {
        Value::Array(mut records) if !records.is_empty() => Ok(records.remove(0)),
        // Some endpoints return the bare object rather than a collection.
        Value::Object(obj) => Ok(Value::Object(obj)),
        _ => Err(ClientError::not_found(format!(
            "no {singular} record found for \"{id}\""
        ))),
    }
}

/// Extract a human-readable message from an Admin API error body.
fn ghost_error_message(status: StatusCode, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let detail = parsed
        .as_ref()
        .and_then(|v| v.get("errors"))
        .and_then(|e| e.get(0))
        .and_then(|e| {
            e.get("context")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .or_else(|| e.get("message").and_then(Value::as_str))
        })
        .map(str::to_owned);

    detail.unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    })
}
