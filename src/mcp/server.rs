//! MCP server implementation
//!
//! Answers `tools/list` from the registry catalog and routes `tools/call`
//! through [`ToolRegistry::dispatch`]. Tool failures are reported inside the
//! result envelope, never as protocol errors.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use tracing::info;

use crate::client::PlaneApi;

use super::registry::ToolRegistry;

pub const SERVER_NAME: &str = "plane-mcp";

/// Main MCP server coordinator
///
/// Generic over `A: PlaneApi`; cloning shares the registry.
pub struct McpServer<A: PlaneApi> {
    registry: Arc<ToolRegistry<A>>,
}

impl<A: PlaneApi> Clone for McpServer<A> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<A: PlaneApi> McpServer<A> {
    pub fn new(api: Arc<A>, workspace_slug: &str) -> Self {
        Self::from_registry(Arc::new(ToolRegistry::new(api, workspace_slug)))
    }

    pub fn from_registry(registry: Arc<ToolRegistry<A>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry<A> {
        &self.registry
    }
}

impl<A: PlaneApi> ServerHandler for McpServer<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_server_info(Implementation::new(SERVER_NAME, env!("CARGO_PKG_VERSION")))
            .with_instructions(
                "Plane MCP Server - List, create, read, update and delete Plane projects and issues",
            )
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.registry.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        info!(tool = %request.name, "Tool call");
        Ok(self
            .registry
            .dispatch(&request.name, request.arguments)
            .await)
    }
}
