//! Tag and author listing tools.
//!
//! Both are read-only; authors live under the Admin API's `users`
//! collection.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;

use ghost_client::{GhostClient, Resource};

use super::helpers::{api_error, json_response};
use super::params::TaxonomyBrowseParams;

pub async fn get_tags(
    client: &GhostClient,
    params: TaxonomyBrowseParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let tags = client
        .browse(Resource::Tags, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&tags)
}

pub async fn get_authors(
    client: &GhostClient,
    params: TaxonomyBrowseParams,
) -> Result<CallToolResult, McpError> {
    params.validate()?;
    let authors = client
        .browse(Resource::Users, &params.to_browse())
        .await
        .map_err(api_error)?;
    json_response(&authors)
}
