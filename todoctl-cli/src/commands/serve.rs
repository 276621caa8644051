//! HTTP server command
//!
//! Connects to the database, then serves the todo API and frontend until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use todoctl_server::config::DEFAULT_MAX_CONNECTIONS;
use todoctl_server::{connect, run_server, Config, DatabaseConfig, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "TODOCTL_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory holding the frontend bundle
    #[arg(long, env = "TODOCTL_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Database URL (postgres://... or sqlite://...); overrides the --db-* flags
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database server host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Database server port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database user
    #[arg(long, env = "DB_USER", default_value = "postgres")]
    pub db_user: String,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true, default_value = "")]
    pub db_password: String,

    /// Database name
    #[arg(long, env = "DB_NAME", default_value = "todos")]
    pub db_name: String,

    /// Maximum pooled database connections
    #[arg(long, env = "TODOCTL_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Deadline for each database call, in seconds
    #[arg(long, env = "TODOCTL_STORE_TIMEOUT_SECS", default_value_t = 5)]
    pub store_timeout_secs: u64,
}

impl ServeArgs {
    /// Resolve the arguments into the server configuration.
    pub fn into_config(self) -> Config {
        let store_timeout = Duration::from_secs(self.store_timeout_secs);

        Config {
            server: ServerConfig {
                bind_addr: self.bind,
                public_dir: self.public_dir,
                store_timeout,
            },
            database: DatabaseConfig {
                url: self.database_url,
                host: self.db_host,
                port: self.db_port,
                user: self.db_user,
                password: self.db_password,
                database: self.db_name,
                max_connections: self.max_connections,
                acquire_timeout: store_timeout,
            },
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.into_config();
    tracing::debug!(?config, "Resolved configuration");

    tracing::info!("Starting todoctl server on {}", config.server.bind_addr);

    // Connect and bootstrap the schema
    let store = connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    // Run server (blocks until shutdown)
    run_server(store, config.server)
        .await
        .context("Server error")?;

    Ok(())
}
