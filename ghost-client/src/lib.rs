//! Ghost Admin API client library.
//!
//! Provides [`GhostClient`], an authenticated adapter over a Ghost site's
//! Admin API: browse/read/add/edit/delete for posts, pages, members, tags,
//! and users (authors), plus multipart image upload. Configuration comes
//! from the environment via [`GhostConfig::from_env`]; authentication is a
//! short-lived HS256 token minted per request from the Admin API key.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod params;
pub mod types;

pub use auth::AdminKey;
pub use client::{GhostClient, Resource};
pub use config::GhostConfig;
pub use error::{ClientError, ClientResult};
pub use params::{BrowseParams, ReadParams};
pub use types::{ImageUpload, MemberPayload, PagePayload, PostPayload};
