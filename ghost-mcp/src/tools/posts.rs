//! Post tool implementations.
//!
//! Async functions that take the shared [`GhostClient`] and validated param
//! structs. Range validation runs first; nothing reaches the remote on a
//! validation failure.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

use ghost_client::types::PostPayload;
use ghost_client::{ClientError, GhostClient, Resource};

use super::helpers::{
    api_error, first_match, json_response, normalize_lexical, now_timestamp, payload_json,
    text_response,
};
use super::params::{
    ContentBrowseParams, ContentReadParams, ContentSearchParams, ContentSlugParams,
    CreatePostParams, DeleteParams, UpdatePostParams,
};

pub async fn get_posts(
    client: &GhostClient,
    params: ContentBrowseParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let posts = client
        .browse(Resource::Posts, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&posts)
}

pub async fn get_post(
    client: &GhostClient,
    params: ContentReadParams,
) -> Result<CallToolResult, McpError> {
    let post = client
        .read(Resource::Posts, &params.id, &params.to_read())
        .await
        .map_err(api_error)?;
    json_response(&post)
}

pub async fn search_posts(
    client: &GhostClient,
    params: ContentSearchParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let posts = client
        .browse(Resource::Posts, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&posts)
}

pub async fn get_post_by_slug(
    client: &GhostClient,
    params: ContentSlugParams,
) -> Result<CallToolResult, McpError> {
    let posts = client
        .browse(Resource::Posts, &params.to_browse())
        .await
        .map_err(api_error)?;

    match first_match(posts) {
        Some(post) => json_response(&post),
        None => Err(api_error(ClientError::not_found(format!(
            "no post found with slug \"{}\"",
            params.slug
        )))),
    }
}

pub async fn create_post(
    client: &GhostClient,
    params: CreatePostParams,
) -> Result<CallToolResult, McpError> {
    let payload = prepare_create_payload(&params)?;
    let post = client
        .add(Resource::Posts, payload_json(&payload)?)
        .await
        .map_err(api_error)?;
    json_response(&post)
}

pub async fn update_post(
    client: &GhostClient,
    params: UpdatePostParams,
) -> Result<CallToolResult, McpError> {
    let payload = prepare_update_payload(&params)?;
    let post = client
        .edit(Resource::Posts, &params.id, payload_json(&payload)?)
        .await
        .map_err(api_error)?;
    json_response(&post)
}

pub async fn delete_post(
    client: &GhostClient,
    params: DeleteParams,
) -> Result<CallToolResult, McpError> {
    client
        .delete(Resource::Posts, &params.id)
        .await
        .map_err(api_error)?;
    text_response("Post deleted successfully")
}

fn prepare_create_payload(params: &CreatePostParams) -> Result<PostPayload, McpError> {
    let mut payload = params.payload();
    if let Some(lexical) = payload.lexical.take() {
        payload.lexical = Some(normalize_lexical(&lexical)?);
    }
    Ok(payload)
}

/// The edit endpoint requires an `updated_at` token; stamp the current time
/// when the caller did not supply one.
fn prepare_update_payload(params: &UpdatePostParams) -> Result<PostPayload, McpError> {
    let mut payload = params.payload();
    if let Some(lexical) = payload.lexical.take() {
        payload.lexical = Some(normalize_lexical(&lexical)?);
    }
    if payload.updated_at.is_none() {
        payload.updated_at = Some(now_timestamp());
    }
    Ok(payload)
}
