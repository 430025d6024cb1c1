//! Request payload shapes for Admin API mutations.
//!
//! These are transient DTOs mirroring the remote resources; nothing here is
//! persisted locally. Only caller-supplied fields are serialized, so a
//! partial update sends exactly what the caller set. List-valued relations
//! (`tags`, `authors`, `labels`, `newsletters`) are replaced wholesale by
//! the remote on update; there is no partial list edit.

use serde::Serialize;

/// Write payload for a post. `id` is never part of the payload; the remote
/// assigns it on create and takes it from the URL on edit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobiledoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Write payload for a page. Pages carry no email fields.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PagePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobiledoc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Write payload for a member.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemberPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletters: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscribed: Option<bool>,
}

/// A validated image ready for multipart upload.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Raw image bytes.
    pub data: Vec<u8>,
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Synthesized filename for the form part, e.g. `image.png`.
    pub file_name: String,
    /// Upload purpose (`image`, `profile_image`, `icon`).
    pub purpose: Option<String>,
    /// Caller-supplied reference echoed back by the remote.
    pub reference: Option<String>,
}
