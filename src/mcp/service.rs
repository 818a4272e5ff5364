//! MCP Streamable HTTP service creation
//!
//! Builds the tower service that the `serve --transport http` command nests
//! under `/mcp`.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::client::PlaneApi;

use super::registry::ToolRegistry;
use super::server::McpServer;

/// Create MCP Streamable HTTP service
///
/// Every session gets its own [`McpServer`], all sharing one registry and
/// therefore one upstream client.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use plane_mcp::{client::PlaneClient, config::Config, mcp::{ToolRegistry, create_mcp_service}};
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let config = Arc::new(Config::from_env()?);
/// let client = Arc::new(PlaneClient::new(Arc::clone(&config))?);
/// let registry = Arc::new(ToolRegistry::new(client, &config.workspace_slug));
///
/// let app: Router = Router::new()
///     .nest_service("/mcp", create_mcp_service(registry, CancellationToken::new()));
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<A: PlaneApi>(
    registry: Arc<ToolRegistry<A>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<McpServer<A>, LocalSessionManager> {
    // rmcp expects the factory to fail with io::Error
    let service_factory = move || -> Result<McpServer<A>, std::io::Error> {
        Ok(McpServer::from_registry(Arc::clone(&registry)))
    };

    let config = StreamableHttpServerConfig::default()
        .with_sse_keep_alive(None)
        .with_sse_retry(None)
        .with_stateful_mode(true)
        .with_cancellation_token(cancellation_token);

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
