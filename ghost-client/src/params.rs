//! Query parameter shapes for Admin API requests.
//!
//! The Admin API takes list-valued options (`include`, `formats`) as
//! comma-separated strings; callers join before constructing these. Unset
//! fields are omitted from the query string entirely.

use serde::Serialize;

/// Query parameters for collection (`browse`) requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowseParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<String>,
}

/// Query parameters for point (`read`) requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReadParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<String>,
}
