//! MCP protocol integration test.
//!
//! Verifies the protocol round-trip over an in-memory transport: tool
//! discovery via `list_tools`, argument validation on `call_tool`, and the
//! error codes surfaced for bad input and unknown tools. No test touches
//! the network; every call fails validation before a request would be made.

use rmcp::model::{CallToolRequestParams, ClientInfo, ErrorCode};
use rmcp::service::ServiceError;
use rmcp::{ClientHandler, ServiceExt};

use ghost_client::{GhostClient, GhostConfig};
use ghost_mcp::server::GhostMcpServer;

const KEY: &str = "64f1a5c7e3b2a9001c8d4e21:5f2e8c1a9b7d4e6f0a3c5b8d7e9f1a2b4c6d8e0f";

fn test_server() -> GhostMcpServer {
    let config = GhostConfig::new("http://127.0.0.1:1", KEY, "v5.0");
    GhostMcpServer::new(GhostClient::new(&config).expect("test client"))
}

#[derive(Debug, Clone, Default)]
struct DummyClient;

impl ClientHandler for DummyClient {
    fn get_info(&self) -> ClientInfo {
        ClientInfo::default()
    }
}

fn mcp_error(err: ServiceError) -> rmcp::ErrorData {
    match err {
        ServiceError::McpError(data) => data,
        other => panic!("expected MCP error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_list_tools_exposes_full_catalog() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let tools = client.list_tools(None).await?;
    let tool_names: Vec<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();

    assert_eq!(tool_names.len(), 22);
    for expected in [
        "get_posts",
        "get_post_by_slug",
        "create_post",
        "update_page",
        "search_members",
        "get_tags",
        "get_authors",
        "upload_image",
    ] {
        assert!(
            tool_names.contains(&expected),
            "expected {expected} in tool list, got: {tool_names:?}"
        );
    }

    let upload = tools
        .tools
        .iter()
        .find(|t| t.name.as_ref() == "upload_image")
        .unwrap();
    let schema = serde_json::to_value(&upload.input_schema)?;
    assert!(schema["properties"]["file"].is_object());

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_call_unknown_tool_is_method_not_found() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let err = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: "totally_unknown_tool".into(),
            arguments: None,
            task: None,
        })
        .await
        .unwrap_err();

    let data = mcp_error(err);
    assert_eq!(data.code, ErrorCode::METHOD_NOT_FOUND);
    assert!(data.message.contains("Unknown tool: totally_unknown_tool"));

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_call_tool_rejects_out_of_range_pagination() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    let err = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: "get_posts".into(),
            arguments: Some(
                serde_json::json!({ "limit": 101 })
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            task: None,
        })
        .await
        .unwrap_err();

    let data = mcp_error(err);
    assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
    assert!(data.message.contains("limit must be between 1 and 100"));

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_call_tool_rejects_missing_required_field() -> anyhow::Result<()> {
    let (server_transport, client_transport) = tokio::io::duplex(4096);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    // create_member without the required email must fail narrowing.
    let err = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: "create_member".into(),
            arguments: Some(
                serde_json::json!({ "name": "Ada Lovelace" })
                    .as_object()
                    .unwrap()
                    .clone(),
            ),
            task: None,
        })
        .await
        .unwrap_err();

    let data = mcp_error(err);
    assert_eq!(data.code, ErrorCode::INVALID_PARAMS);

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}

#[tokio::test]
async fn test_call_tool_rejects_non_square_icon() -> anyhow::Result<()> {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine as _;

    let (server_transport, client_transport) = tokio::io::duplex(65536);

    let server = test_server();
    let server_handle = tokio::spawn(async move {
        let service = server.serve(server_transport).await?;
        service.waiting().await?;
        anyhow::Ok(())
    });

    let client = DummyClient.serve(client_transport).await?;

    // PNG header declaring 100x50; size probing reads only the header.
    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend_from_slice(&13u32.to_be_bytes());
    png.extend_from_slice(b"IHDR");
    png.extend_from_slice(&100u32.to_be_bytes());
    png.extend_from_slice(&50u32.to_be_bytes());
    png.extend_from_slice(&[8, 6, 0, 0, 0, 0, 0, 0, 0]);

    let err = client
        .call_tool(CallToolRequestParams {
            meta: None,
            name: "upload_image".into(),
            arguments: Some(
                serde_json::json!({
                    "file": format!("data:image/png;base64,{}", BASE64.encode(&png)),
                    "purpose": "icon"
                })
                .as_object()
                .unwrap()
                .clone(),
            ),
            task: None,
        })
        .await
        .unwrap_err();

    let data = mcp_error(err);
    assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
    assert!(data.message.contains("100x50"));

    client.cancel().await?;
    server_handle.await??;
    Ok(())
}
