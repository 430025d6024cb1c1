//! Image upload tool implementation.
//!
//! Decoding and validation happen locally (see [`crate::image`]); only a
//! payload that passed every check is packaged as multipart form data and
//! forwarded to the upload endpoint.

use rmcp::model::CallToolResult;
use rmcp::ErrorData as McpError;
use serde_json::{Map, Value};

use ghost_client::types::ImageUpload;
use ghost_client::GhostClient;

use crate::image;

use super::helpers::{api_error, json_response};
use super::params::ImageUploadParams;

pub async fn upload_image(
    client: &GhostClient,
    params: ImageUploadParams,
) -> Result<CallToolResult, McpError> {
    let upload = build_upload(&params)?;
    let result = client.upload_image(&upload).await.map_err(api_error)?;
    json_response(&upload_summary(&result))
}

/// Decode and validate the data URI, then package it for upload. Every
/// rejection here is a caller error raised before any remote call.
fn build_upload(params: &ImageUploadParams) -> Result<ImageUpload, McpError> {
    let purpose = params.purpose.unwrap_or_default();
    let image = image::normalize(&params.file, purpose)
        .map_err(|e| McpError::invalid_params(e.to_string(), None))?;

    Ok(ImageUpload {
        data: image.data,
        mime_type: image.mime_type,
        file_name: image.file_name,
        purpose: Some(purpose.as_str().to_string()),
        reference: params.reference.clone(),
    })
}

/// Reduce the remote's record to the `{url, ref}` pair callers care about.
fn upload_summary(record: &Value) -> Value {
    let mut summary = Map::new();
    summary.insert(
        "url".to_string(),
        record.get("url").cloned().unwrap_or(Value::Null),
    );
    if let Some(reference) = record.get("ref").filter(|v| !v.is_null()) {
        summary.insert("ref".to_string(), reference.clone());
    }
    Value::Object(summary)
}
