//! todoctl CLI - todo CRUD server
//!
//! Entry point for the `todoctl` binary:
//! - `serve`: run the JSON API and the bundled frontend against PostgreSQL
//!   (or SQLite via `--database-url sqlite://...`)
//!
//! Every flag also reads from the environment; a `.env` file in the
//! working directory is loaded first.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "todoctl",
    author,
    version,
    about = "Todo CRUD server backed by a SQL database"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true, env = "TODOCTL_DEBUG")]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP server (todo API + frontend)
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // dotenvy doesn't overwrite existing vars
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
    }

    Ok(())
}
