//! Ghost MCP Server library.
//!
//! Provides the [`server::GhostMcpServer`] MCP handler, the tool
//! parameter types, and the image upload normalizer. Used by the
//! `ghost-mcp` binary and available for integration testing.

pub mod image;
pub mod server;
pub mod tools;
