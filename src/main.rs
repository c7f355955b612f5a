//! bookstore-rs server entry point.

use bookstore_rs::{
    config::{CatalogCommand, Cli, Command, Config},
    library::Catalog,
    server,
};
use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Find or load config
    let config_path = cli.config.clone().or_else(Config::find_config_file);

    let config = if let Some(ref path) = config_path {
        Config::load(path)?
    } else {
        Config::default()
    };

    // Handle command
    match cli.command {
        Some(Command::Init { force }) => cmd_init(force),
        Some(Command::Catalog { action }) => cmd_catalog(action, &config),
        Some(Command::Serve { bind, seed }) => cmd_serve(config, bind, seed).await,
        None => {
            // Default: start server
            cmd_serve(config, None, None).await
        }
    }
}

/// Write a default config file.
fn cmd_init(force: bool) -> anyhow::Result<()> {
    let config_path = PathBuf::from("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, Config::generate_default())?;
    println!("Created config file: {}", config_path.display());
    println!("\nEdit config.toml to configure your server.");
    println!("Then run: bookstore-rs serve");

    Ok(())
}

/// Catalog inspection commands.
fn cmd_catalog(action: CatalogCommand, config: &Config) -> anyhow::Result<()> {
    let seed_for = |seed: Option<PathBuf>| seed.or_else(|| config.catalog.seed.clone());

    match action {
        CatalogCommand::List { seed } => {
            let catalog = Catalog::from_seed(seed_for(seed).as_deref())?;
            if catalog.is_empty() {
                println!("No books found.");
                return Ok(());
            }

            println!("{:<10} {:<30} TITLE", "ISBN", "AUTHOR");
            println!("{}", "-".repeat(80));
            for book in catalog.iter() {
                println!("{:<10} {:<30} {}", book.isbn, book.author, book.title);
            }
        }

        CatalogCommand::Show { isbn, seed } => {
            let catalog = Catalog::from_seed(seed_for(seed).as_deref())?;
            match catalog.get_by_isbn(&isbn) {
                Ok(book) => println!("{}", serde_json::to_string_pretty(book)?),
                Err(e) => anyhow::bail!("{}: {}", e, isbn),
            }
        }
    }

    Ok(())
}

/// Start the server.
async fn cmd_serve(
    mut config: Config,
    bind: Option<std::net::SocketAddr>,
    seed: Option<PathBuf>,
) -> anyhow::Result<()> {
    // Override from CLI if specified
    if let Some(addr) = bind {
        config.server.bind = addr;
    }
    if let Some(seed) = seed {
        config.catalog.seed = Some(seed);
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookstore_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seed_label = config
        .catalog
        .seed
        .as_deref()
        .map_or_else(|| "built-in".to_string(), |p| p.display().to_string());

    tracing::info!(
        bind = %config.server.bind,
        status_codes = ?config.api.status_codes,
        seed = %seed_label,
        "Starting bookstore-rs server"
    );

    let bind = config.server.bind;
    let state = server::AppState::from_config(config)?;
    let app = server::create_router(state);

    let listener = TcpListener::bind(bind).await?;
    tracing::info!(address = %bind, "Server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
