//! grepapp-mcp: MCP server for code search via grep.app.
//!
//! Usage:
//!   grepapp-mcp --mcp                 # Start MCP server (stdin/stdout)
//!   grepapp-mcp search <query>        # CLI search mode

use clap::{Parser, Subcommand};
use grepapp_mcp::server::GrepAppServer;
use grepapp_mcp::{ClientConfig, GrepAppClient, SearchRequest};
use rmcp::ServiceExt;
use std::io::IsTerminal;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grepapp-mcp")]
#[command(about = "MCP server for code search via grep.app")]
#[command(version)]
struct Cli {
    /// Run as MCP server (stdin/stdout JSON-RPC)
    #[arg(long)]
    mcp: bool,

    /// Search endpoint
    #[arg(long, default_value = grepapp_mcp::config::DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value = "15")]
    timeout: u64,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search code on grep.app
    Search {
        /// Search query
        query: String,

        /// Restrict to a language
        #[arg(short, long)]
        lang: Option<String>,

        /// Restrict to a path
        #[arg(short, long)]
        path: Option<String>,

        /// Restrict to a repository (owner/name)
        #[arg(short, long)]
        repo: Option<String>,

        /// Match case
        #[arg(long)]
        case: bool,

        /// Match whole words
        #[arg(long)]
        words: bool,

        /// Treat the query as a regular expression
        #[arg(long)]
        regexp: bool,

        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // CRITICAL: Log to stderr only (stdout is JSON-RPC for MCP)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("grepapp_mcp=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig {
        endpoint: cli.endpoint,
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    };
    let client = GrepAppClient::from_config(&config)?;

    if cli.mcp {
        run_mcp_server(client).await
    } else if let Some(cmd) = cli.command {
        run_cli(client, cmd).await
    } else {
        // Default: show help
        eprintln!("Use --mcp to start MCP server, or a subcommand for CLI mode.");
        eprintln!("Run with --help for more information.");
        std::process::exit(1);
    }
}

async fn run_mcp_server(client: GrepAppClient) -> anyhow::Result<()> {
    tracing::info!("Starting MCP server for {}", client.endpoint());

    let server = GrepAppServer::new(client);

    // Run the MCP server on stdin/stdout
    let service = server.serve(rmcp::transport::io::stdio()).await?;
    service.waiting().await?;

    Ok(())
}

async fn run_cli(client: GrepAppClient, cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Search {
            query,
            lang,
            path,
            repo,
            case,
            words,
            regexp,
            json,
        } => {
            let request = SearchRequest {
                query,
                language: lang,
                path,
                repo,
                case_sensitive: case,
                whole_words: words,
                use_regexp: regexp,
            };
            let result = client.search(&request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                let stdout = std::io::stdout();
                let color = stdout.is_terminal();
                grepapp_mcp::fmt::fmt_search(&mut stdout.lock(), &result, color)?;
            }
        }
    }

    Ok(())
}
