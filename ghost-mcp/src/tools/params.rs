//! Parameter structs for all MCP tools.
//!
//! Deserialization is the first validation gate: a missing required field,
//! a wrong primitive type, or an unrecognized enum value fails before any
//! handler logic runs and surfaces as an invalid-parameters error. Range
//! rules that types cannot express (`limit` 1–100, `page` ≥ 1) live in the
//! `validate` methods and are checked by handlers before the remote call.

use rmcp::ErrorData as McpError;
use schemars::JsonSchema;
use serde::Deserialize;

use ghost_client::params::BrowseParams;
use ghost_client::params::ReadParams;
use ghost_client::types::{MemberPayload, PagePayload, PostPayload};

use crate::image::ImagePurpose;

// ── enumerated field values ──

/// Content body representation to include in responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    Html,
    Mobiledoc,
    Lexical,
}

/// Related data to embed in post/page responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentInclude {
    Authors,
    Tags,
}

/// Related data to embed in member responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MemberInclude {
    Labels,
    Newsletters,
}

/// Aggregate include for tag/author listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
pub enum CountInclude {
    #[serde(rename = "count.posts")]
    CountPosts,
}

/// Publication state of a post or page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Published,
    Draft,
    Scheduled,
}

/// Audience of a post or page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentVisibility {
    Public,
    Members,
    Paid,
    Tiers,
}

/// Field values that serialize into the Admin API's comma-joined strings.
pub(crate) trait QueryToken: Copy {
    fn token(self) -> &'static str;
}

impl QueryToken for ContentFormat {
    fn token(self) -> &'static str {
        match self {
            ContentFormat::Html => "html",
            ContentFormat::Mobiledoc => "mobiledoc",
            ContentFormat::Lexical => "lexical",
        }
    }
}

impl QueryToken for ContentInclude {
    fn token(self) -> &'static str {
        match self {
            ContentInclude::Authors => "authors",
            ContentInclude::Tags => "tags",
        }
    }
}

impl QueryToken for MemberInclude {
    fn token(self) -> &'static str {
        match self {
            MemberInclude::Labels => "labels",
            MemberInclude::Newsletters => "newsletters",
        }
    }
}

impl ContentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentStatus::Published => "published",
            ContentStatus::Draft => "draft",
            ContentStatus::Scheduled => "scheduled",
        }
    }
}

impl ContentVisibility {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentVisibility::Public => "public",
            ContentVisibility::Members => "members",
            ContentVisibility::Paid => "paid",
            ContentVisibility::Tiers => "tiers",
        }
    }
}

/// Join enum-valued list fields into the remote's comma-separated form.
/// Empty lists are treated as absent.
pub(crate) fn comma_join<T: QueryToken>(items: Option<&Vec<T>>) -> Option<String> {
    items.filter(|v| !v.is_empty()).map(|v| {
        v.iter()
            .map(|item| item.token())
            .collect::<Vec<_>>()
            .join(",")
    })
}

/// Shared range rules for listing tools.
fn check_pagination(limit: Option<u32>, page: Option<u32>) -> Result<(), McpError> {
    if let Some(limit) = limit {
        if !(1..=100).contains(&limit) {
            return Err(McpError::invalid_params(
                format!("limit must be between 1 and 100, got {limit}"),
                None,
            ));
        }
    }
    if let Some(page) = page {
        if page < 1 {
            return Err(McpError::invalid_params(
                format!("page must be 1 or greater, got {page}"),
                None,
            ));
        }
    }
    Ok(())
}

const DEFAULT_LIMIT: u32 = 10;
const DEFAULT_PAGE: u32 = 1;

// ── get_posts / get_pages ──

/// Parameters for the `get_posts` and `get_pages` tools.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct ContentBrowseParams {
    /// Number of records to return (default: 10).
    #[schemars(description = "Number of records to return, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    /// Page number (default: 1).
    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    pub page: Option<u32>,
    /// Sort order, e.g. `published_at DESC`.
    #[schemars(description = "Sort order, e.g. 'published_at DESC' or 'created_at ASC'")]
    pub order: Option<String>,
    /// Content formats to include.
    #[schemars(description = "Content formats to include: html, mobiledoc, lexical")]
    pub formats: Option<Vec<ContentFormat>>,
    /// Related data to include.
    #[schemars(description = "Related data to include: authors, tags")]
    pub include: Option<Vec<ContentInclude>>,
}

impl ContentBrowseParams {
    pub fn validate(&self) -> Result<(), McpError> {
        check_pagination(self.limit, self.page)
    }

    pub fn to_browse(&self) -> BrowseParams {
        BrowseParams {
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
            page: Some(self.page.unwrap_or(DEFAULT_PAGE)),
            order: self.order.clone(),
            include: comma_join(self.include.as_ref()),
            formats: comma_join(self.formats.as_ref()),
            ..Default::default()
        }
    }
}

// ── get_post / get_page ──

/// Parameters for the `get_post` and `get_page` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContentReadParams {
    /// Record id.
    #[schemars(description = "Record id")]
    pub id: String,
    /// Content formats to include.
    #[schemars(description = "Content formats to include: html, mobiledoc, lexical")]
    pub formats: Option<Vec<ContentFormat>>,
    /// Related data to include.
    #[schemars(description = "Related data to include: authors, tags")]
    pub include: Option<Vec<ContentInclude>>,
}

impl ContentReadParams {
    pub fn to_read(&self) -> ReadParams {
        ReadParams {
            include: comma_join(self.include.as_ref()),
            formats: comma_join(self.formats.as_ref()),
        }
    }
}

// ── get_post_by_slug / get_page_by_slug ──

/// Parameters for the `get_post_by_slug` and `get_page_by_slug` tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContentSlugParams {
    /// URL slug to look up.
    #[schemars(description = "URL slug to look up")]
    pub slug: String,
    /// Content formats to include.
    #[schemars(description = "Content formats to include: html, mobiledoc, lexical")]
    pub formats: Option<Vec<ContentFormat>>,
    /// Related data to include.
    #[schemars(description = "Related data to include: authors, tags")]
    pub include: Option<Vec<ContentInclude>>,
}

impl ContentSlugParams {
    pub fn to_browse(&self) -> BrowseParams {
        BrowseParams {
            filter: Some(format!("slug:{}", self.slug)),
            include: comma_join(self.include.as_ref()),
            formats: comma_join(self.formats.as_ref()),
            ..Default::default()
        }
    }
}

// ── search_posts ──

/// Parameters for the `search_posts` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ContentSearchParams {
    /// Search keywords.
    #[schemars(description = "Search keywords")]
    pub query: String,
    /// Number of records to return (default: 10).
    #[schemars(description = "Number of records to return, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    /// Page number (default: 1).
    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    pub page: Option<u32>,
    /// Sort order.
    #[schemars(description = "Sort order, e.g. 'published_at DESC'")]
    pub order: Option<String>,
    /// Content formats to include.
    #[schemars(description = "Content formats to include: html, mobiledoc, lexical")]
    pub formats: Option<Vec<ContentFormat>>,
    /// Related data to include.
    #[schemars(description = "Related data to include: authors, tags")]
    pub include: Option<Vec<ContentInclude>>,
}

impl ContentSearchParams {
    pub fn validate(&self) -> Result<(), McpError> {
        check_pagination(self.limit, self.page)
    }

    pub fn to_browse(&self) -> BrowseParams {
        BrowseParams {
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
            page: self.page,
            order: self.order.clone(),
            search: Some(self.query.clone()),
            include: comma_join(self.include.as_ref()),
            formats: comma_join(self.formats.as_ref()),
            ..Default::default()
        }
    }
}

// ── create_post / create_page ──

/// Parameters for the `create_post` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePostParams {
    /// Post title.
    #[schemars(description = "Post title")]
    pub title: String,
    /// HTML content.
    #[schemars(description = "Content in HTML format")]
    pub html: Option<String>,
    /// Mobiledoc content.
    #[schemars(description = "Content in mobiledoc format")]
    pub mobiledoc: Option<String>,
    /// Lexical content (JSON string).
    #[schemars(description = "Content in lexical format (a JSON string)")]
    pub lexical: Option<String>,
    /// Publication state.
    #[schemars(description = "Publication state: published, draft, scheduled")]
    pub status: Option<ContentStatus>,
    /// Audience.
    #[schemars(description = "Audience: public, members, paid, tiers")]
    pub visibility: Option<ContentVisibility>,
    /// Publication timestamp, used for scheduling.
    #[schemars(description = "Publication timestamp (ISO 8601), used for scheduling")]
    pub published_at: Option<String>,
    /// Tag ids; replaces the whole list.
    #[schemars(description = "Tag ids (replaces the existing list)")]
    pub tags: Option<Vec<String>>,
    /// Author ids; replaces the whole list.
    #[schemars(description = "Author ids (replaces the existing list)")]
    pub authors: Option<Vec<String>>,
    /// Feature the post.
    #[schemars(description = "Mark the post as featured")]
    pub featured: Option<bool>,
    /// Subject line when emailed.
    #[schemars(description = "Subject line used when the post is emailed")]
    pub email_subject: Option<String>,
    /// Email-only post.
    #[schemars(description = "Deliver by email only, without publishing to the site")]
    pub email_only: Option<bool>,
    /// Send as newsletter.
    #[schemars(description = "Send the post to newsletter subscribers")]
    pub newsletter: Option<bool>,
}

impl CreatePostParams {
    pub fn payload(&self) -> PostPayload {
        PostPayload {
            title: Some(self.title.clone()),
            html: self.html.clone(),
            mobiledoc: self.mobiledoc.clone(),
            lexical: self.lexical.clone(),
            status: self.status.map(|s| s.as_str().to_string()),
            visibility: self.visibility.map(|v| v.as_str().to_string()),
            published_at: self.published_at.clone(),
            tags: self.tags.clone(),
            authors: self.authors.clone(),
            featured: self.featured,
            email_subject: self.email_subject.clone(),
            email_only: self.email_only,
            newsletter: self.newsletter,
            updated_at: None,
        }
    }
}

/// Parameters for the `create_page` tool. Pages carry no email fields.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreatePageParams {
    /// Page title.
    #[schemars(description = "Page title")]
    pub title: String,
    /// HTML content.
    #[schemars(description = "Content in HTML format")]
    pub html: Option<String>,
    /// Mobiledoc content.
    #[schemars(description = "Content in mobiledoc format")]
    pub mobiledoc: Option<String>,
    /// Lexical content (JSON string).
    #[schemars(description = "Content in lexical format (a JSON string)")]
    pub lexical: Option<String>,
    /// Publication state.
    #[schemars(description = "Publication state: published, draft, scheduled")]
    pub status: Option<ContentStatus>,
    /// Audience.
    #[schemars(description = "Audience: public, members, paid, tiers")]
    pub visibility: Option<ContentVisibility>,
    /// Publication timestamp, used for scheduling.
    #[schemars(description = "Publication timestamp (ISO 8601), used for scheduling")]
    pub published_at: Option<String>,
    /// Tag ids; replaces the whole list.
    #[schemars(description = "Tag ids (replaces the existing list)")]
    pub tags: Option<Vec<String>>,
    /// Author ids; replaces the whole list.
    #[schemars(description = "Author ids (replaces the existing list)")]
    pub authors: Option<Vec<String>>,
    /// Feature the page.
    #[schemars(description = "Mark the page as featured")]
    pub featured: Option<bool>,
}

impl CreatePageParams {
    pub fn payload(&self) -> PagePayload {
        PagePayload {
            title: Some(self.title.clone()),
            html: self.html.clone(),
            mobiledoc: self.mobiledoc.clone(),
            lexical: self.lexical.clone(),
            status: self.status.map(|s| s.as_str().to_string()),
            visibility: self.visibility.map(|v| v.as_str().to_string()),
            published_at: self.published_at.clone(),
            tags: self.tags.clone(),
            authors: self.authors.clone(),
            featured: self.featured,
            updated_at: None,
        }
    }
}

// ── update_post / update_page ──

/// Parameters for the `update_post` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdatePostParams {
    /// Post id.
    #[schemars(description = "Post id")]
    pub id: String,
    /// Post title.
    #[schemars(description = "Post title")]
    pub title: Option<String>,
    /// HTML content.
    #[schemars(description = "Content in HTML format")]
    pub html: Option<String>,
    /// Mobiledoc content.
    #[schemars(description = "Content in mobiledoc format")]
    pub mobiledoc: Option<String>,
    /// Lexical content (JSON string).
    #[schemars(description = "Content in lexical format (a JSON string)")]
    pub lexical: Option<String>,
    /// Publication state.
    #[schemars(description = "Publication state: published, draft, scheduled")]
    pub status: Option<ContentStatus>,
    /// Audience.
    #[schemars(description = "Audience: public, members, paid, tiers")]
    pub visibility: Option<ContentVisibility>,
    /// Publication timestamp.
    #[schemars(description = "Publication timestamp (ISO 8601)")]
    pub published_at: Option<String>,
    /// Tag ids; replaces the whole list.
    #[schemars(description = "Tag ids (replaces the existing list)")]
    pub tags: Option<Vec<String>>,
    /// Author ids; replaces the whole list.
    #[schemars(description = "Author ids (replaces the existing list)")]
    pub authors: Option<Vec<String>>,
    /// Feature the post.
    #[schemars(description = "Mark the post as featured")]
    pub featured: Option<bool>,
    /// Subject line when emailed.
    #[schemars(description = "Subject line used when the post is emailed")]
    pub email_subject: Option<String>,
    /// Email-only post.
    #[schemars(description = "Deliver by email only, without publishing to the site")]
    pub email_only: Option<bool>,
    /// Send as newsletter.
    #[schemars(description = "Send the post to newsletter subscribers")]
    pub newsletter: Option<bool>,
    /// Modification timestamp; stamped with the current time when omitted.
    #[schemars(
        description = "Modification timestamp of the revision being replaced (ISO 8601); defaults to the current time"
    )]
    pub updated_at: Option<String>,
}

impl UpdatePostParams {
    pub fn payload(&self) -> PostPayload {
        PostPayload {
            title: self.title.clone(),
            html: self.html.clone(),
            mobiledoc: self.mobiledoc.clone(),
            lexical: self.lexical.clone(),
            status: self.status.map(|s| s.as_str().to_string()),
            visibility: self.visibility.map(|v| v.as_str().to_string()),
            published_at: self.published_at.clone(),
            tags: self.tags.clone(),
            authors: self.authors.clone(),
            featured: self.featured,
            email_subject: self.email_subject.clone(),
            email_only: self.email_only,
            newsletter: self.newsletter,
            updated_at: self.updated_at.clone(),
        }
    }
}

/// Parameters for the `update_page` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdatePageParams {
    /// Page id.
    #[schemars(description = "Page id")]
    pub id: String,
    /// Page title.
    #[schemars(description = "Page title")]
    pub title: Option<String>,
    /// HTML content.
    #[schemars(description = "Content in HTML format")]
    pub html: Option<String>,
    /// Mobiledoc content.
    #[schemars(description = "Content in mobiledoc format")]
    pub mobiledoc: Option<String>,
    /// Lexical content (JSON string).
    #[schemars(description = "Content in lexical format (a JSON string)")]
    pub lexical: Option<String>,
    /// Publication state.
    #[schemars(description = "Publication state: published, draft, scheduled")]
    pub status: Option<ContentStatus>,
    /// Audience.
    #[schemars(description = "Audience: public, members, paid, tiers")]
    pub visibility: Option<ContentVisibility>,
    /// Publication timestamp.
    #[schemars(description = "Publication timestamp (ISO 8601)")]
    pub published_at: Option<String>,
    /// Tag ids; replaces the whole list.
    #[schemars(description = "Tag ids (replaces the existing list)")]
    pub tags: Option<Vec<String>>,
    /// Author ids; replaces the whole list.
    #[schemars(description = "Author ids (replaces the existing list)")]
    pub authors: Option<Vec<String>>,
    /// Feature the page.
    #[schemars(description = "Mark the page as featured")]
    pub featured: Option<bool>,
}

impl UpdatePageParams {
    pub fn payload(&self) -> PagePayload {
        PagePayload {
            title: self.title.clone(),
            html: self.html.clone(),
            mobiledoc: self.mobiledoc.clone(),
            lexical: self.lexical.clone(),
            status: self.status.map(|s| s.as_str().to_string()),
            visibility: self.visibility.map(|v| v.as_str().to_string()),
            published_at: self.published_at.clone(),
            tags: self.tags.clone(),
            authors: self.authors.clone(),
            featured: self.featured,
            updated_at: None,
        }
    }
}

// ── delete_post / delete_page / delete_member ──

/// Parameters for the delete tools.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteParams {
    /// Record id.
    #[schemars(description = "Record id")]
    pub id: String,
}

// ── get_tags / get_authors ──

/// Parameters for the `get_tags` and `get_authors` tools.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct TaxonomyBrowseParams {
    /// Number of records to return (default: 10).
    #[schemars(description = "Number of records to return, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    /// Page number (default: 1).
    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    pub page: Option<u32>,
    /// Sort order, e.g. `name ASC`.
    #[schemars(description = "Sort order, e.g. 'name ASC' or 'created_at DESC'")]
    pub order: Option<String>,
    /// Aggregate include.
    #[schemars(description = "Aggregate include: count.posts")]
    pub include: Option<CountInclude>,
    /// Filter expression.
    #[schemars(description = "Filter expression, e.g. 'visibility:public' or 'slug:getting-started'")]
    pub filter: Option<String>,
}

impl TaxonomyBrowseParams {
    pub fn validate(&self) -> Result<(), McpError> {
        check_pagination(self.limit, self.page)
    }

    pub fn to_browse(&self) -> BrowseParams {
        BrowseParams {
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
            page: Some(self.page.unwrap_or(DEFAULT_PAGE)),
            order: self.order.clone(),
            filter: self.filter.clone(),
            include: self.include.map(|_| "count.posts".to_string()),
            ..Default::default()
        }
    }
}

// ── get_members ──

/// Parameters for the `get_members` tool.
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct MemberBrowseParams {
    /// Number of records to return (default: 10).
    #[schemars(description = "Number of records to return, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    /// Page number (default: 1).
    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    pub page: Option<u32>,
    /// Sort order, e.g. `created_at DESC`.
    #[schemars(description = "Sort order, e.g. 'created_at DESC'")]
    pub order: Option<String>,
    /// Related data to include.
    #[schemars(description = "Related data to include: labels, newsletters")]
    pub include: Option<Vec<MemberInclude>>,
    /// Filter expression.
    #[schemars(description = "Filter expression, e.g. 'status:paid'")]
    pub filter: Option<String>,
}

impl MemberBrowseParams {
    pub fn validate(&self) -> Result<(), McpError> {
        check_pagination(self.limit, self.page)
    }

    pub fn to_browse(&self) -> BrowseParams {
        BrowseParams {
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
            page: Some(self.page.unwrap_or(DEFAULT_PAGE)),
            order: self.order.clone(),
            filter: self.filter.clone(),
            include: comma_join(self.include.as_ref()),
            ..Default::default()
        }
    }
}

// ── get_member ──

/// Parameters for the `get_member` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MemberReadParams {
    /// Member id.
    #[schemars(description = "Member id")]
    pub id: String,
    /// Related data to include.
    #[schemars(description = "Related data to include: labels, newsletters")]
    pub include: Option<Vec<MemberInclude>>,
}

impl MemberReadParams {
    pub fn to_read(&self) -> ReadParams {
        ReadParams {
            include: comma_join(self.include.as_ref()),
            formats: None,
        }
    }
}

// ── search_members ──

/// Parameters for the `search_members` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct MemberSearchParams {
    /// Search keywords.
    #[schemars(description = "Search keywords")]
    pub query: String,
    /// Number of records to return (default: 10).
    #[schemars(description = "Number of records to return, 1-100 (default: 10)")]
    pub limit: Option<u32>,
    /// Page number (default: 1).
    #[schemars(description = "Page number, starting at 1 (default: 1)")]
    pub page: Option<u32>,
    /// Sort order.
    #[schemars(description = "Sort order, e.g. 'created_at DESC'")]
    pub order: Option<String>,
    /// Related data to include.
    #[schemars(description = "Related data to include: labels, newsletters")]
    pub include: Option<Vec<MemberInclude>>,
    /// Filter expression.
    #[schemars(description = "Filter expression, e.g. 'status:paid'")]
    pub filter: Option<String>,
}

impl MemberSearchParams {
    pub fn validate(&self) -> Result<(), McpError> {
        check_pagination(self.limit, self.page)
    }

    pub fn to_browse(&self) -> BrowseParams {
        BrowseParams {
            limit: Some(self.limit.unwrap_or(DEFAULT_LIMIT)),
            page: self.page,
            order: self.order.clone(),
            filter: self.filter.clone(),
            search: Some(self.query.clone()),
            include: comma_join(self.include.as_ref()),
            ..Default::default()
        }
    }
}

// ── create_member / update_member ──

/// Parameters for the `create_member` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateMemberParams {
    /// Email address.
    #[schemars(description = "Email address")]
    pub email: String,
    /// Member name.
    #[schemars(description = "Member name")]
    pub name: Option<String>,
    /// Internal note.
    #[schemars(description = "Internal note about the member")]
    pub note: Option<String>,
    /// Label ids; replaces the whole list.
    #[schemars(description = "Label ids (replaces the existing list)")]
    pub labels: Option<Vec<String>>,
    /// Newsletter ids; replaces the whole list.
    #[schemars(description = "Newsletter ids (replaces the existing list)")]
    pub newsletters: Option<Vec<String>>,
    /// Newsletter subscription state.
    #[schemars(description = "Newsletter subscription state")]
    pub subscribed: Option<bool>,
}

impl CreateMemberParams {
    pub fn payload(&self) -> MemberPayload {
        MemberPayload {
            email: Some(self.email.clone()),
            name: self.name.clone(),
            note: self.note.clone(),
            labels: self.labels.clone(),
            newsletters: self.newsletters.clone(),
            subscribed: self.subscribed,
        }
    }
}

/// Parameters for the `update_member` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateMemberParams {
    /// Member id.
    #[schemars(description = "Member id")]
    pub id: String,
    /// Email address.
    #[schemars(description = "Email address")]
    pub email: Option<String>,
    /// Member name.
    #[schemars(description = "Member name")]
    pub name: Option<String>,
    /// Internal note.
    #[schemars(description = "Internal note about the member")]
    pub note: Option<String>,
    /// Label ids; replaces the whole list.
    #[schemars(description = "Label ids (replaces the existing list)")]
    pub labels: Option<Vec<String>>,
    /// Newsletter ids; replaces the whole list.
    #[schemars(description = "Newsletter ids (replaces the existing list)")]
    pub newsletters: Option<Vec<String>>,
    /// Newsletter subscription state.
    #[schemars(description = "Newsletter subscription state")]
    pub subscribed: Option<bool>,
}

impl UpdateMemberParams {
    pub fn payload(&self) -> MemberPayload {
        MemberPayload {
            email: self.email.clone(),
            name: self.name.clone(),
            note: self.note.clone(),
            labels: self.labels.clone(),
            newsletters: self.newsletters.clone(),
            subscribed: self.subscribed,
        }
    }
}

// ── upload_image ──

/// Parameters for the `upload_image` tool.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ImageUploadParams {
    /// Image as a base64 data URI.
    #[schemars(description = "Image to upload, as a base64 data URI (data:<mime>;base64,<data>)")]
    pub file: String,
    /// Upload purpose (default: image).
    #[schemars(description = "Upload purpose: image, profile_image, icon (default: image)")]
    pub purpose: Option<ImagePurpose>,
    /// Reference echoed back by the remote.
    #[schemars(description = "Optional reference attached to the image and echoed back")]
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pagination_accepts_valid_ranges() {
        for limit in [1u32, 10, 100] {
            let params = ContentBrowseParams {
                limit: Some(limit),
                page: Some(1),
                ..Default::default()
            };
            assert!(params.validate().is_ok(), "limit {limit} should pass");
        }
    }

    #[test]
    fn test_pagination_rejects_out_of_range_limit() {
        for limit in [0u32, 101] {
            let params = ContentBrowseParams {
                limit: Some(limit),
                ..Default::default()
            };
            let err = params.validate().unwrap_err();
            assert!(err.message.contains("limit must be between 1 and 100"));
        }
    }

    #[test]
    fn test_pagination_rejects_page_zero() {
        let params = ContentBrowseParams {
            page: Some(0),
            ..Default::default()
        };
        let err = params.validate().unwrap_err();
        assert!(err.message.contains("page must be 1 or greater"));
    }

    #[test]
    fn test_pagination_absent_fields_pass() {
        assert!(ContentBrowseParams::default().validate().is_ok());
    }

    #[test]
    fn test_browse_defaults_applied() {
        let browse = ContentBrowseParams::default().to_browse();
        assert_eq!(browse.limit, Some(10));
        assert_eq!(browse.page, Some(1));
        assert!(browse.order.is_none());
    }

    #[test]
    fn test_formats_and_include_comma_joined() {
        let params: ContentBrowseParams = serde_json::from_value(json!({
            "formats": ["html", "lexical"],
            "include": ["authors", "tags"]
        }))
        .unwrap();
        let browse = params.to_browse();
        assert_eq!(browse.formats.as_deref(), Some("html,lexical"));
        assert_eq!(browse.include.as_deref(), Some("authors,tags"));
    }

    #[test]
    fn test_empty_format_list_is_omitted() {
        let params: ContentBrowseParams =
            serde_json::from_value(json!({ "formats": [] })).unwrap();
        assert!(params.to_browse().formats.is_none());
    }

    #[test]
    fn test_unknown_format_rejected_at_deserialization() {
        let result =
            serde_json::from_value::<ContentBrowseParams>(json!({ "formats": ["markdown"] }));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_limit_rejected_at_deserialization() {
        let result = serde_json::from_value::<ContentBrowseParams>(json!({ "limit": "ten" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_search_requires_query() {
        assert!(serde_json::from_value::<ContentSearchParams>(json!({ "limit": 5 })).is_err());
        let params: ContentSearchParams =
            serde_json::from_value(json!({ "query": "rust" })).unwrap();
        assert_eq!(params.to_browse().search.as_deref(), Some("rust"));
    }

    #[test]
    fn test_slug_params_build_filter() {
        let params: ContentSlugParams =
            serde_json::from_value(json!({ "slug": "getting-started" })).unwrap();
        let browse = params.to_browse();
        assert_eq!(browse.filter.as_deref(), Some("slug:getting-started"));
        assert!(browse.limit.is_none());
    }

    #[test]
    fn test_create_member_requires_email() {
        assert!(
            serde_json::from_value::<CreateMemberParams>(json!({ "name": "Ada" })).is_err()
        );
    }

    #[test]
    fn test_create_member_rejects_non_string_label_elements() {
        let result = serde_json::from_value::<CreateMemberParams>(json!({
            "email": "ada@example.com",
            "labels": ["vip", 3]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_member_requires_id() {
        assert!(serde_json::from_value::<UpdateMemberParams>(
            json!({ "email": "ada@example.com" })
        )
        .is_err());
    }

    #[test]
    fn test_member_search_composes_pagination_rules() {
        let params: MemberSearchParams = serde_json::from_value(json!({
            "query": "ada",
            "limit": 101
        }))
        .unwrap();
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_member_include_joined() {
        let params: MemberBrowseParams = serde_json::from_value(json!({
            "include": ["labels", "newsletters"],
            "filter": "status:paid"
        }))
        .unwrap();
        let browse = params.to_browse();
        assert_eq!(browse.include.as_deref(), Some("labels,newsletters"));
        assert_eq!(browse.filter.as_deref(), Some("status:paid"));
    }

    #[test]
    fn test_taxonomy_count_include() {
        let params: TaxonomyBrowseParams =
            serde_json::from_value(json!({ "include": "count.posts" })).unwrap();
        assert_eq!(params.to_browse().include.as_deref(), Some("count.posts"));
        assert!(
            serde_json::from_value::<TaxonomyBrowseParams>(json!({ "include": "count.tags" }))
                .is_err()
        );
    }

    #[test]
    fn test_status_and_visibility_values() {
        let params: CreatePostParams = serde_json::from_value(json!({
            "title": "Hello",
            "status": "scheduled",
            "visibility": "paid"
        }))
        .unwrap();
        let payload = params.payload();
        assert_eq!(payload.status.as_deref(), Some("scheduled"));
        assert_eq!(payload.visibility.as_deref(), Some("paid"));

        assert!(serde_json::from_value::<CreatePostParams>(json!({
            "title": "Hello",
            "status": "archived"
        }))
        .is_err());
    }

    #[test]
    fn test_create_post_requires_title() {
        assert!(serde_json::from_value::<CreatePostParams>(json!({ "html": "<p>x</p>" })).is_err());
    }

    #[test]
    fn test_update_post_payload_carries_updated_at() {
        let params: UpdatePostParams = serde_json::from_value(json!({
            "id": "abc",
            "updated_at": "2025-06-01T12:00:00.000Z"
        }))
        .unwrap();
        assert_eq!(
            params.payload().updated_at.as_deref(),
            Some("2025-06-01T12:00:00.000Z")
        );
    }

    #[test]
    fn test_image_upload_ref_field_name() {
        let params: ImageUploadParams = serde_json::from_value(json!({
            "file": "data:image/png;base64,AAAA",
            "purpose": "icon",
            "ref": "cover-1"
        }))
        .unwrap();
        assert_eq!(params.reference.as_deref(), Some("cover-1"));
        assert_eq!(params.purpose, Some(crate::image::ImagePurpose::Icon));
    }

    #[test]
    fn test_image_upload_requires_file() {
        assert!(serde_json::from_value::<ImageUploadParams>(json!({ "purpose": "icon" })).is_err());
    }
}
