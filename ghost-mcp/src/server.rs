//! MCP ServerHandler implementation for Ghost administration.
//!
//! Exposes the Admin API as a fixed catalog of schema-described tools:
//!
//! **Posts**
//! - `get_posts` — List posts with pagination
//! - `get_post` — Get a post by id
//! - `get_post_by_slug` — Get a post by slug (first match of a filtered listing)
//! - `search_posts` — Keyword search over posts
//! - `create_post` — Create a post
//! - `update_post` — Update a post (stamps `updated_at` when omitted)
//! - `delete_post` — Delete a post
//!
//! **Pages**
//! - `get_pages`, `get_page`, `get_page_by_slug` — listing and point reads
//! - `create_page`, `update_page`, `delete_page` — mutations; update reuses
//!   the live record's `updated_at`
//!
//! **Members**
//! - `get_members`, `get_member`, `search_members` — reads
//! - `create_member`, `update_member`, `delete_member` — mutations
//!
//! **Taxonomy**
//! - `get_tags`, `get_authors` — read-only listings
//!
//! **Media**
//! - `upload_image` — validate a base64 data URI and upload it
//!
//! Dispatch is one-shot and stateless: exactly one handler runs per call,
//! awaited to completion, with no retries or queuing. The only long-lived
//! state is the shared API client, which is immutable configuration plus
//! connection pooling.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolRequestParams, CallToolResult, ErrorCode, Implementation, JsonObject,
    ListToolsResult, PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{tool, tool_router, ErrorData as McpError, ServerHandler};
use serde::de::DeserializeOwned;

use ghost_client::GhostClient;

use crate::tools::{self, params::*};

/// Ghost MCP server handler.
#[derive(Debug, Clone)]
pub struct GhostMcpServer {
    tool_router: ToolRouter<Self>,
    client: Arc<GhostClient>,
}

impl GhostMcpServer {
    /// Create a server around a configured Admin API client.
    pub fn new(client: GhostClient) -> Self {
        Self {
            tool_router: Self::tool_router(),
            client: Arc::new(client),
        }
    }
}

#[tool_router(router = tool_router)]
impl GhostMcpServer {
    // ── Posts ──

    #[tool(
        name = "get_posts",
        description = "Get a list of blog posts with pagination. Optionally narrow the returned content formats (html, mobiledoc, lexical) and include related authors/tags."
    )]
    pub async fn get_posts(
        &self,
        Parameters(params): Parameters<ContentBrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::get_posts(&self.client, params).await
    }

    #[tool(
        name = "get_post",
        description = "Get a single post by id. Optionally narrow the returned content formats and include related authors/tags."
    )]
    pub async fn get_post(
        &self,
        Parameters(params): Parameters<ContentReadParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::get_post(&self.client, params).await
    }

    #[tool(
        name = "get_post_by_slug",
        description = "Get a post by its URL slug. Slugs are filtered, not uniquely resolved; the first match is returned."
    )]
    pub async fn get_post_by_slug(
        &self,
        Parameters(params): Parameters<ContentSlugParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::get_post_by_slug(&self.client, params).await
    }

    #[tool(
        name = "search_posts",
        description = "Search posts by keyword. Returns matching posts with optional format narrowing and related data."
    )]
    pub async fn search_posts(
        &self,
        Parameters(params): Parameters<ContentSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::search_posts(&self.client, params).await
    }

    #[tool(
        name = "create_post",
        description = "Create a new post. Requires a title; content can be supplied as html, mobiledoc, or lexical. Lexical content must be a valid JSON string. Supports scheduling, visibility, tags, authors, and newsletter options."
    )]
    pub async fn create_post(
        &self,
        Parameters(params): Parameters<CreatePostParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::create_post(&self.client, params).await
    }

    #[tool(
        name = "update_post",
        description = "Update a post by id. List-valued fields (tags, authors) replace the existing lists wholesale. If updated_at is omitted the current time is used."
    )]
    pub async fn update_post(
        &self,
        Parameters(params): Parameters<UpdatePostParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::update_post(&self.client, params).await
    }

    #[tool(name = "delete_post", description = "Delete a post by id.")]
    pub async fn delete_post(
        &self,
        Parameters(params): Parameters<DeleteParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::posts::delete_post(&self.client, params).await
    }

    // ── Pages ──

    #[tool(
        name = "get_pages",
        description = "Get a list of pages with pagination. Optionally narrow the returned content formats and include related authors/tags."
    )]
    pub async fn get_pages(
        &self,
        Parameters(params): Parameters<ContentBrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::pages::get_pages(&self.client, params).await
    }

    #[tool(
        name = "get_page",
        description = "Get a single page by id. Optionally narrow the returned content formats and include related authors/tags."
    )]
    pub async fn get_page(
        &self,
        Parameters(params): Parameters<ContentReadParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::pages::get_page(&self.client, params).await
    }

    #[tool(
        name = "get_page_by_slug",
        description = "Get a page by its URL slug. Slugs are filtered, not uniquely resolved; the first match is returned."
    )]
    pub async fn get_page_by_slug(
        &self,
        Parameters(params): Parameters<ContentSlugParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::pages::get_page_by_slug(&self.client, params).await
    }

    #[tool(
        name = "create_page",
        description = "Create a new page. Requires a title; content can be supplied as html, mobiledoc, or lexical. Pages carry no email/newsletter options."
    )]
    pub async fn create_page(
        &self,
        Parameters(params): Parameters<CreatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::pages::create_page(&self.client, params).await
    }

    #[tool(
        name = "update_page",
        description = "Update a page by id. The live record's updated_at is fetched and reused as the concurrency token."
    )]
    pub async fn update_page(
        &self,
        Parameters(params): Parameters<UpdatePageParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::pages::update_page(&self.client, params).await
    }

    #[tool(name = "delete_page", description = "Delete a page by id.")]
    pub async fn delete_page(
        &self,
        Parameters(params): Parameters<DeleteParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::pages::delete_page(&self.client, params).await
    }

    // ── Members ──

    #[tool(
        name = "get_members",
        description = "Get a list of members with pagination. Optionally include labels/newsletters and filter, e.g. 'status:paid'."
    )]
    pub async fn get_members(
        &self,
        Parameters(params): Parameters<MemberBrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::members::get_members(&self.client, params).await
    }

    #[tool(
        name = "get_member",
        description = "Get a single member by id. Optionally include labels/newsletters."
    )]
    pub async fn get_member(
        &self,
        Parameters(params): Parameters<MemberReadParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::members::get_member(&self.client, params).await
    }

    #[tool(
        name = "search_members",
        description = "Search members by keyword with optional filtering and related data."
    )]
    pub async fn search_members(
        &self,
        Parameters(params): Parameters<MemberSearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::members::search_members(&self.client, params).await
    }

    #[tool(
        name = "create_member",
        description = "Create a new member. Requires an email address; labels and newsletters are id lists."
    )]
    pub async fn create_member(
        &self,
        Parameters(params): Parameters<CreateMemberParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::members::create_member(&self.client, params).await
    }

    #[tool(
        name = "update_member",
        description = "Update a member by id. Label and newsletter lists replace the existing lists wholesale."
    )]
    pub async fn update_member(
        &self,
        Parameters(params): Parameters<UpdateMemberParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::members::update_member(&self.client, params).await
    }

    #[tool(name = "delete_member", description = "Delete a member by id.")]
    pub async fn delete_member(
        &self,
        Parameters(params): Parameters<DeleteParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::members::delete_member(&self.client, params).await
    }

    // ── Taxonomy ──

    #[tool(
        name = "get_tags",
        description = "Get a list of tags. Optionally include post counts ('count.posts') and filter, e.g. 'visibility:public'."
    )]
    pub async fn get_tags(
        &self,
        Parameters(params): Parameters<TaxonomyBrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::taxonomy::get_tags(&self.client, params).await
    }

    #[tool(
        name = "get_authors",
        description = "Get a list of authors. Optionally include post counts ('count.posts') and filter, e.g. 'slug:john'."
    )]
    pub async fn get_authors(
        &self,
        Parameters(params): Parameters<TaxonomyBrowseParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::taxonomy::get_authors(&self.client, params).await
    }

    // ── Media ──

    #[tool(
        name = "upload_image",
        description = "Upload an image supplied as a base64 data URI. Enforces a 2MB cap and per-purpose format rules; profile_image and icon uploads must be square. Returns the stored image URL."
    )]
    pub async fn upload_image(
        &self,
        Parameters(params): Parameters<ImageUploadParams>,
    ) -> Result<CallToolResult, McpError> {
        tools::images::upload_image(&self.client, params).await
    }
}

/// Narrow a raw argument bag into a typed parameter struct.
fn parse_params<P: DeserializeOwned>(args: JsonObject) -> Result<Parameters<P>, McpError> {
    serde_json::from_value(serde_json::Value::Object(args))
        .map(Parameters)
        .map_err(|e| McpError::invalid_params(format!("Invalid parameters: {e}"), None))
}

impl ServerHandler for GhostMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ghost-mcp".to_string(),
                title: Some("Ghost MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                description: Some(
                    "MCP server exposing Ghost CMS administration: posts, pages, members, \
                     tags, authors, and image uploads"
                        .to_string(),
                ),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Manage a Ghost site through its Admin API.\n\
                 Content: get_posts/get_pages to list, get_post/get_page by id, \
                 get_post_by_slug/get_page_by_slug by URL slug, search_posts by keyword.\n\
                 Write content with create_post/create_page and update_post/update_page; \
                 supply body content as html or lexical (lexical must be a JSON string). \
                 Tag and author lists on update replace the existing lists.\n\
                 Audience: get_members/search_members/get_member to inspect, \
                 create_member/update_member/delete_member to manage.\n\
                 Taxonomy: get_tags and get_authors (pass include: 'count.posts' for usage counts).\n\
                 Media: upload_image takes a base64 data URI (2MB max; profile_image and \
                 icon must be square) and returns the stored URL for use in content."
                    .to_string(),
            ),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let args = request.arguments.unwrap_or_default();

        match request.name.as_ref() {
            "get_posts" => self.get_posts(parse_params(args)?).await,
            "get_post" => self.get_post(parse_params(args)?).await,
            "get_post_by_slug" => self.get_post_by_slug(parse_params(args)?).await,
            "search_posts" => self.search_posts(parse_params(args)?).await,
            "create_post" => self.create_post(parse_params(args)?).await,
            "update_post" => self.update_post(parse_params(args)?).await,
            "delete_post" => self.delete_post(parse_params(args)?).await,
            "get_pages" => self.get_pages(parse_params(args)?).await,
            "get_page" => self.get_page(parse_params(args)?).await,
            "get_page_by_slug" => self.get_page_by_slug(parse_params(args)?).await,
            "create_page" => self.create_page(parse_params(args)?).await,
            "update_page" => self.update_page(parse_params(args)?).await,
            "delete_page" => self.delete_page(parse_params(args)?).await,
            "get_members" => self.get_members(parse_params(args)?).await,
            "get_member" => self.get_member(parse_params(args)?).await,
            "search_members" => self.search_members(parse_params(args)?).await,
            "create_member" => self.create_member(parse_params(args)?).await,
            "update_member" => self.update_member(parse_params(args)?).await,
            "delete_member" => self.delete_member(parse_params(args)?).await,
            "get_tags" => self.get_tags(parse_params(args)?).await,
            "get_authors" => self.get_authors(parse_params(args)?).await,
            "upload_image" => self.upload_image(parse_params(args)?).await,
            other => Err(McpError::new(
                ErrorCode::METHOD_NOT_FOUND,
                format!("Unknown tool: {other}"),
                None,
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ghost_client::GhostConfig;
    use serde_json::json;

    const KEY: &str = "64f1a5c7e3b2a9001c8d4e21:5f2e8c1a9b7d4e6f0a3c5b8d7e9f1a2b4c6d8e0f";

    fn test_server() -> GhostMcpServer {
        // Nothing in these tests reaches the network; port 1 refuses fast
        // if something slips through.
        let config = GhostConfig::new("http://127.0.0.1:1", KEY, "v5.0");
        GhostMcpServer::new(GhostClient::new(&config).unwrap())
    }

    #[test]
    fn test_server_info() {
        let server = test_server();
        let info = server.get_info();

        assert_eq!(info.server_info.name, "ghost-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        let instructions = info.instructions.unwrap();
        assert!(instructions.contains("get_posts"));
        assert!(instructions.contains("upload_image"));
    }

    #[test]
    fn test_router_registers_all_tools() {
        let server = test_server();
        let tools = server.tool_router.list_all();
        assert_eq!(tools.len(), 22);

        let names: Vec<&str> = tools.iter().map(|t| t.name.as_ref()).collect();
        for expected in [
            "get_posts",
            "get_post",
            "get_post_by_slug",
            "search_posts",
            "create_post",
            "update_post",
            "delete_post",
            "get_pages",
            "get_page",
            "get_page_by_slug",
            "create_page",
            "update_page",
            "delete_page",
            "get_members",
            "get_member",
            "search_members",
            "create_member",
            "update_member",
            "delete_member",
            "get_tags",
            "get_authors",
            "upload_image",
        ] {
            assert!(names.contains(&expected), "missing tool {expected}");
        }
    }

    #[tokio::test]
    async fn test_get_posts_rejects_out_of_range_limit() {
        let server = test_server();
        let err = server
            .get_posts(parse_params(json_args(json!({ "limit": 0 }))).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("limit"));
    }

    #[tokio::test]
    async fn test_upload_image_rejects_malformed_payload() {
        let server = test_server();
        let err = server
            .upload_image(parse_params(json_args(json!({ "file": "not-a-data-uri" }))).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_remote_failure_surfaces_as_internal_error() {
        // Port 1 on loopback refuses connections, exercising the
        // remote-call failure path end to end.
        let server = test_server();
        let err = server
            .get_post(parse_params(json_args(json!({ "id": "abc" }))).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::INTERNAL_ERROR);
        assert!(err.message.contains("Ghost API error"));
    }

    #[test]
    fn test_parse_params_reports_invalid_shape() {
        let err =
            parse_params::<ContentReadParams>(json_args(json!({ "id": 42 }))).unwrap_err();
        assert_eq!(err.code, ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("Invalid parameters"));
    }

    fn json_args(value: serde_json::Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }
}
