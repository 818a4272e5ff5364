//! Tests for MCP server initialization

use std::sync::Arc;

use rmcp::ServerHandler;

use crate::client::MockPlaneApi;
use crate::mcp::server::{McpServer, SERVER_NAME};
use crate::test_support::unreachable_api;

fn server() -> McpServer<MockPlaneApi> {
    McpServer::new(Arc::new(unreachable_api()), "acme")
}

#[test]
fn test_server_info() {
    let info = server().get_info();

    assert!(
        info.capabilities.tools.is_some(),
        "Server should support tools"
    );
    assert!(
        info.instructions.is_some(),
        "Server should provide instructions"
    );
    assert_eq!(info.server_info.name, SERVER_NAME);
    assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_clones_share_registry() {
    let original = server();
    let clone = original.clone();

    assert!(std::ptr::eq(original.registry(), clone.registry()));
    assert_eq!(clone.registry().tools().len(), 10);
}
