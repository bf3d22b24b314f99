//! Configuration settings for the beneficios admin client
//!
//! Defines CLI arguments, subcommands, and the runtime client
//! configuration derived from them.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{AdminError, Result};

/// Default lifetime of a transient notification before it expires.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_secs(3);

/// Default timeout for a single backend request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// beneficios-admin - Administrative client for beneficio records
#[derive(Parser, Debug, Clone)]
#[command(name = "beneficios-admin")]
#[command(author = "Beneficios Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manage beneficio records over a REST backend")]
#[command(long_about = r#"
beneficios-admin is a command-line administrative client for beneficio
(benefit) records: named monetary allotments served by a REST backend.

Features:
  - List, inspect, create, update and delete records
  - Transfer value between two records
  - Client-side filtering of the loaded list
  - Optimistic-concurrency aware updates (version token forwarding)

Examples:
  beneficios-admin --base-url http://localhost:8080/api/v1/beneficios list
  beneficios-admin list --filter vale
  beneficios-admin create --nome "Vale Refeicao" --valor 100
  beneficios-admin update 3 --nome "Vale Transporte" --valor 80
  beneficios-admin delete 3 --yes
  beneficios-admin transfer --from 1 --to 2 --amount 50
"#)]
pub struct CliArgs {
    /// Backend base URL (e.g. http://host:8080/api/v1/beneficios)
    #[arg(long, env = "BENEFICIOS_API_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value = "10", value_name = "SECS")]
    pub timeout: u64,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List beneficios, optionally filtered client-side
    List {
        /// Case-insensitive substring filter over nome and descricao
        #[arg(short, long, value_name = "TERM")]
        filter: Option<String>,
    },

    /// Show a single beneficio by id
    Get {
        /// Record id
        id: i64,
    },

    /// Create a new beneficio
    Create {
        /// Name (required, non-empty)
        #[arg(long)]
        nome: String,
        /// Optional description
        #[arg(long)]
        descricao: Option<String>,
        /// Monetary value (must be >= 0)
        #[arg(long, default_value = "0")]
        valor: f64,
        /// Create the record as inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Update an existing beneficio
    Update {
        /// Record id
        id: i64,
        /// New name
        #[arg(long)]
        nome: String,
        /// New description
        #[arg(long)]
        descricao: Option<String>,
        /// New monetary value (must be >= 0)
        #[arg(long)]
        valor: f64,
        /// Mark the record inactive
        #[arg(long)]
        inactive: bool,
    },

    /// Delete a beneficio (asks for confirmation unless --yes)
    Delete {
        /// Record id
        id: i64,
        /// Skip the interactive confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Transfer value from one beneficio to another
    Transfer {
        /// Source record id
        #[arg(long)]
        from: i64,
        /// Destination record id
        #[arg(long)]
        to: i64,
        /// Amount to transfer (must be >= 0.01)
        #[arg(long)]
        amount: f64,
    },
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Backend base URL, without trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// Lifetime of transient notifications
    pub notification_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

impl ClientConfig {
    /// Create a config for the given base URL with default timings
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Default::default()
        }
    }

    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        let base_url = args
            .base_url
            .clone()
            .ok_or_else(|| AdminError::config("base URL required (--base-url or BENEFICIOS_API_URL)"))?;

        let config = Self {
            base_url: normalize_base_url(base_url),
            request_timeout: Duration::from_secs(args.timeout),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(AdminError::config("base URL must not be empty"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(AdminError::config(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.request_timeout.is_zero() {
            return Err(AdminError::config("request timeout must be non-zero"));
        }
        Ok(())
    }
}

/// Strip trailing slashes so paths can be joined with a single '/'
fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
