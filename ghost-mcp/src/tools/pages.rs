//! Page tool implementations.
//!
//! Pages mirror the post tools with one difference on update: instead of
//! stamping the current time, the handler reads the live record first and
//! reuses its `updated_at` as the concurrency token.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde_json::Value;

use ghost_client::{ClientError, GhostClient, ReadParams, Resource};

use super::helpers::{
    api_error, first_match, json_response, now_timestamp, payload_json, text_response,
};
use super::params::{
    ContentBrowseParams, ContentReadParams, ContentSlugParams, CreatePageParams, DeleteParams,
    UpdatePageParams,
};

pub async fn get_pages(
    client: &GhostClient,
    params: ContentBrowseParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let pages = client
        .browse(Resource::Pages, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&pages)
}

pub async fn get_page(
    client: &GhostClient,
    params: ContentReadParams,
) -> Result<CallToolResult, McpError> {
    let page = client
        .read(Resource::Pages, &params.id, &params.to_read())
        .await
        .map_err(api_error)?;
    json_response(&page)
}

pub async fn get_page_by_slug(
    client: &GhostClient,
    params: ContentSlugParams,
) -> Result<CallToolResult, McpError> {
    let pages = client
        .browse(Resource::Pages, &params.to_browse())
        .await
        .map_err(api_error)?;

    match first_match(pages) {
        Some(page) => json_response(&page),
        None => Err(api_error(ClientError::not_found(format!(
            "no page found with slug \"{}\"",
            params.slug
        )))),
    }
}

pub async fn create_page(
    client: &GhostClient,
    params: CreatePageParams,
) -> Result<CallToolResult, McpError> {
    let page = client
        .add(Resource::Pages, payload_json(&params.payload())?)
        .await
        .map_err(api_error)?;
    json_response(&page)
}

pub async fn update_page(
    client: &GhostClient,
    params: UpdatePageParams,
) -> Result<CallToolResult, McpError> {
    let current = client
        .read(Resource::Pages, &params.id, &ReadParams::default())
        .await
        .map_err(api_error)?;

    let mut payload = params.payload();
    payload.updated_at = Some(record_updated_at(&current).unwrap_or_else(now_timestamp));

    let page = client
        .edit(Resource::Pages, &params.id, payload_json(&payload)?)
        .await
        .map_err(api_error)?;
    json_response(&page)
}

pub async fn delete_page(
    client: &GhostClient,
    params: DeleteParams,
) -> Result<CallToolResult, McpError> {
    client
        .delete(Resource::Pages, &params.id)
        .await
        .map_err(api_error)?;
    text_response("Page deleted successfully")
}

fn record_updated_at(record: &Value) -> Option<String> {
    record
        .get("updated_at")
        .and_then(Value::as_str)
        .map(str::to_owned)
}
