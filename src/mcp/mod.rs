//! Model Context Protocol (MCP) server implementation
//!
//! - **registry**: tool catalog, name normalization and dispatch
//! - **server**: `ServerHandler` over the registry, used by both transports
//! - **service**: Streamable HTTP service for axum

pub mod registry;
pub mod server;
mod service;

#[cfg(test)]
mod server_test;

pub use registry::{ToolRegistry, ToolSpec, catalog, normalize_tool_name};
pub use server::McpServer;
pub use service::create_mcp_service;
