use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Bookstore catalog API with book lookup and user registration.
#[derive(Parser, Debug, Clone)]
#[command(name = "bookstore-rs")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file.
    #[arg(short, long, env = "BOOKSTORE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the server (default if no command given).
    Serve {
        /// Address to bind the server to.
        #[arg(short, long)]
        bind: Option<SocketAddr>,

        /// JSON seed file replacing the built-in catalog.
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Inspect the catalog without starting the server.
    Catalog {
        /// Catalog subcommand action.
        #[command(subcommand)]
        action: CatalogCommand,
    },

    /// Create a default config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}

/// Catalog inspection subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum CatalogCommand {
    /// List every book in catalog order.
    List {
        /// JSON seed file replacing the built-in catalog.
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },

    /// Print one book as JSON.
    Show {
        /// ISBN of the book.
        isbn: String,
        /// JSON seed file replacing the built-in catalog.
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}

/// Main configuration from TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Catalog configuration.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// API behaviour.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind to.
    #[serde(default = "default_bind")]
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::new(
        std::net::IpAddr::V4(std::net::Ipv4Addr::new(0, 0, 0, 0)),
        5000,
    )
}

/// Catalog configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON seed file. The built-in catalog is used when unset.
    #[serde(default)]
    pub seed: Option<PathBuf>,
}

/// API configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// How failures map onto status codes and which content type pretty bodies use.
    #[serde(default)]
    pub status_codes: StatusMode,
}

/// Status code mapping for failed requests, and wire compatibility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMode {
    /// Every failure is 404 and pretty-printed bodies are `text/html`, as the
    /// original bookstore API does.
    #[default]
    Legacy,
    /// 404 for misses, 400 for bad input, 409 for duplicates; JSON bodies
    /// are always `application/json`.
    Distinct,
}

impl Config {
    /// Load configuration from file.
    pub fn load(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to read config file: {}", e))
        })?;

        toml::from_str(&content).map_err(|e| {
            crate::error::AppError::Config(format!("Failed to parse config file: {}", e))
        })
    }

    /// Find config file in default locations.
    pub fn find_config_file() -> Option<PathBuf> {
        let candidates = [
            PathBuf::from("config.toml"),
            PathBuf::from("bookstore-rs.toml"),
            dirs::config_dir()
                .map(|p| p.join("bookstore-rs").join("config.toml"))
                .unwrap_or_default(),
            PathBuf::from("/etc/bookstore-rs/config.toml"),
        ];

        candidates.into_iter().find(|p| p.exists())
    }

    /// Generate default config file content.
    pub fn generate_default() -> String {
        r#"# bookstore-rs configuration

[server]
bind = "0.0.0.0:5000"

[catalog]
# JSON seed keyed by ISBN; the built-in catalog is used when unset
# seed = "books.json"

[api]
# Status codes for failures: "legacy" (always 404) or "distinct" (404/400/409)
status_codes = "legacy"
"#
        .to_string()
    }
}
