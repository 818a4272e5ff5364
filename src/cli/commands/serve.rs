use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use rmcp::{ServiceExt, transport::stdio};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::cli::error::{CliError, CliResult};
use crate::client::PlaneApi;
use crate::mcp::{McpServer, ToolRegistry, create_mcp_service};

/// Serve MCP over stdin/stdout until the client disconnects.
pub async fn serve_stdio<A: PlaneApi>(registry: Arc<ToolRegistry<A>>) -> CliResult<()> {
    info!("Serving MCP over stdio");

    let service = McpServer::from_registry(registry)
        .serve(stdio())
        .await
        .map_err(|e| {
            error!("MCP serve error: {:?}", e);
            CliError::Transport {
                message: e.to_string(),
            }
        })?;

    let reason = service.waiting().await.map_err(|e| CliError::Transport {
        message: e.to_string(),
    })?;
    info!(?reason, "MCP session ended");
    Ok(())
}

/// Serve MCP over Streamable HTTP under `/mcp` until Ctrl-C.
pub async fn serve_http<A: PlaneApi>(
    registry: Arc<ToolRegistry<A>>,
    addr: SocketAddr,
) -> CliResult<()> {
    let ct = CancellationToken::new();
    let app = router(registry, ct.clone());

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("MCP server listening on http://{}/mcp", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
            ct.cancel();
        })
        .await?;
    Ok(())
}

pub fn router<A: PlaneApi>(registry: Arc<ToolRegistry<A>>, ct: CancellationToken) -> Router {
    Router::new()
        .nest_service("/mcp", create_mcp_service(registry, ct))
        .layer(TraceLayer::new_for_http())
}
