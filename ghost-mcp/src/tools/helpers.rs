//! Shared helpers for MCP tool implementations.

use rmcp::model::{CallToolResult, Content, ErrorCode};
use rmcp::ErrorData as McpError;
use serde::Serialize;

use ghost_client::ClientError;

/// Wrap a JSON-serializable value as a successful tool response.
pub fn json_response<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::new(
            ErrorCode::INTERNAL_ERROR,
            format!("failed to serialize response: {e}"),
            None,
        )
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// Wrap a plain confirmation message as a successful tool response.
pub fn text_response(message: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(message.into())]))
}

/// Map a remote-call failure into the internal-error class. The failure is
/// logged before being surfaced; the original message is preserved.
pub fn api_error(err: ClientError) -> McpError {
    tracing::error!(error = %err, "Ghost API call failed");
    McpError::new(
        ErrorCode::INTERNAL_ERROR,
        format!("Ghost API error: {err}"),
        None,
    )
}

/// Parse and re-serialize lexical content so stray formatting never reaches
/// the remote. Happens after parameter validation, so a parse failure is a
/// domain error, not an invalid-parameters one.
pub fn normalize_lexical(raw: &str) -> Result<String, McpError> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(|e| {
        McpError::new(
            ErrorCode::INTERNAL_ERROR,
            format!("Ghost API error: lexical content is not valid JSON: {e}"),
            None,
        )
    })?;
    serde_json::to_string(&value).map_err(|e| {
        McpError::new(
            ErrorCode::INTERNAL_ERROR,
            format!("failed to serialize lexical content: {e}"),
            None,
        )
    })
}

/// Serialize a write payload for the client.
pub fn payload_json<T: Serialize>(payload: &T) -> Result<serde_json::Value, McpError> {
    serde_json::to_value(payload).map_err(|e| {
        McpError::new(
            ErrorCode::INTERNAL_ERROR,
            format!("failed to serialize request payload: {e}"),
            None,
        )
    })
}

/// Take the first record of a filtered listing. A slug filter is not a
/// unique lookup; ambiguity resolves to the first match.
pub fn first_match(records: serde_json::Value) -> Option<serde_json::Value> {
    match records {
        serde_json::Value::Array(mut items) if !items.is_empty() => Some(items.remove(0)),
        _ => None,
    }
}

/// Current time in the RFC 3339 millisecond form the Admin API expects.
pub fn now_timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
