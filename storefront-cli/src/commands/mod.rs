//! Command implementations for the storefront CLI

pub mod migrate;
pub mod seed;
pub mod serve;

use clap::Args;
use storefront_server::db::config::{DEFAULT_HOST, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT};
use storefront_server::DbConfig;

pub use migrate::run_migrate;
pub use seed::run_seed;
pub use serve::run_serve;

/// Database connection flags shared by every command
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Full connection URL; overrides the individual DB_* settings
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST", default_value = DEFAULT_HOST)]
    pub db_host: String,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = DEFAULT_PORT)]
    pub db_port: u16,

    /// Maximum pool connections
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            url: args.database_url.filter(|url| !url.is_empty()),
            name: args.db_name,
            user: args.db_user,
            password: args.db_password,
            host: args.db_host,
            port: args.db_port,
            max_connections: args.max_connections,
        }
    }
}
