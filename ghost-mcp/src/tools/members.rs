//! Member tool implementations.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

use ghost_client::{GhostClient, Resource};

use super::helpers::{api_error, json_response, payload_json, text_response};
use super::params::{
    CreateMemberParams, DeleteParams, MemberBrowseParams, MemberReadParams, MemberSearchParams,
    UpdateMemberParams,
};

pub async fn get_members(
    client: &GhostClient,
    params: MemberBrowseParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let members = client
        .browse(Resource::Members, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&members)
}

pub async fn get_member(
    client: &GhostClient,
    params: MemberReadParams,
) -> Result<CallToolResult, McpError> {
    let member = client
        .read(Resource::Members, &params.id, &params.to_read())
        .await
        .map_err(api_error)?;
    json_response(&member)
}

pub async fn search_members(
    client: &GhostClient,
    params: MemberSearchParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let members = client
        .browse(Resource::Members, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&members)
}

pub async fn create_member(
    client: &GhostClient,
    params: CreateMemberParams,
) -> Result<CallToolResult, McpError> {
    let member = client
        .add(Resource::Members, payload_json(&params.payload())?)
        .await
        .map_err(api_error)?;
    json_response(&member)
}

pub async fn update_member(
    client: &GhostClient,
    params: UpdateMemberParams,
) -> Result<CallToolResult, McpError> {
    let member = client
        .edit(Resource::Members, &params.id, payload_json(&params.payload())?)
        .await
        .map_err(api_error)?;
    json_response(&member)
}

pub async fn delete_member(
    client: &GhostClient,
    params: DeleteParams,
) -> Result<CallToolResult, McpError> {
    client
        .delete(Resource::Members, &params.id)
        .await
        .map_err(api_error)?;
    text_response("Member deleted successfully")
}
