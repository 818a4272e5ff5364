//! Command-line entry point.
//!
//! `serve` (the default) runs the MCP server; `tools` and `call` inspect and
//! exercise the catalog without an MCP client.

mod commands;
pub mod error;
pub mod utils;


use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::client::PlaneClient;
use crate::config::Config;
use crate::mcp::ToolRegistry;

pub use commands::call::{CallOutput, call_tool};
pub use commands::tools::list_tools;
pub use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "plane-mcp")]
#[command(author, version, about = "MCP server for the Plane project-management API", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Override the API base URL (default: PLANE_API_BASE_URL env or https://app.plane.so/api/v1)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Stdio,
    Http,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the MCP server
    Serve {
        /// Transport to serve on
        #[arg(long, value_enum, default_value_t = Transport::Stdio)]
        transport: Transport,
        /// Host address to bind to (http transport)
        #[arg(long, default_value = "127.0.0.1")]
        host: IpAddr,
        /// Port to listen on (http transport)
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
    /// List the available tools
    Tools {
        /// Output format (table or json)
        #[arg(long, default_value = "table")]
        format: String,
    },
    /// Call one tool and print its result
    Call {
        /// Tool name, e.g. get-project
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

/// Install the stderr subscriber; stdout belongs to the stdio transport.
fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "plane_mcp=info",
        1 => "plane_mcp=debug,tower_http=debug",
        _ => "plane_mcp=trace,tower_http=trace,rmcp=debug",
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init();
}

fn load_config(base_url: Option<String>) -> CliResult<Arc<Config>> {
    let mut config = Config::from_env()?;
    if let Some(url) = base_url {
        config = config.with_base_url(url);
    }
    Ok(Arc::new(config))
}

fn build_registry(config: Arc<Config>) -> CliResult<Arc<ToolRegistry<PlaneClient>>> {
    let workspace_slug = config.workspace_slug.clone();
    let client = PlaneClient::new(config)?;
    Ok(Arc::new(ToolRegistry::new(Arc::new(client), &workspace_slug)))
}

pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Serve {
        transport: Transport::Stdio,
        host: IpAddr::from([127, 0, 0, 1]),
        port: 3000,
    });

    match command {
        Commands::Serve {
            transport,
            host,
            port,
        } => {
            let registry = build_registry(load_config(cli.base_url)?)?;
            match transport {
                Transport::Stdio => commands::serve::serve_stdio(registry).await,
                Transport::Http => {
                    commands::serve::serve_http(registry, SocketAddr::new(host, port)).await
                }
            }
        }
        Commands::Tools { format } => {
            println!("{}", list_tools(&format)?);
            Ok(())
        }
        Commands::Call { tool, args } => {
            let registry = build_registry(load_config(cli.base_url)?)?;
            let output = call_tool(&registry, &tool, &args).await?;
            println!("{}", output.text);
            if output.is_error {
                return Err(CliError::ToolFailed { tool });
            }
            Ok(())
        }
    }
}
