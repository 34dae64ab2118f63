//! jira-mcp: MCP server exposing Jira ticket management tools.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use jira_mcp::McpServer;
use jira_mcp::config::Config;
use jira_mcp::context::ServerContext;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about = "MCP server for Jira ticket creation, search, updates, and comments")]
struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  // Tracing to stderr — stdout is reserved for MCP JSON-RPC protocol.
  let level = match cli.verbose {
    0 => tracing::Level::WARN,
    1 => tracing::Level::INFO,
    2 => tracing::Level::DEBUG,
    _ => tracing::Level::TRACE,
  };

  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
    .init();

  // Configuration problems fail here, before any request is accepted.
  let config = Config::from_env().context("Invalid Jira configuration")?;
  let context = ServerContext::new(config)?;

  McpServer::new(context).run().await
}
