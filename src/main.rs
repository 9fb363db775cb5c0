use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pokedex::config::Config;
use pokedex::error::{find_in_chain, PokedexErrorTrait};

mod commands;

use commands::{App, FavoritesAction};

#[derive(Parser)]
#[command(
    name = "pokedex",
    version,
    about = "Browse the Pokémon catalog, search it and keep local favorites",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (environment variables are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); overrides the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one page of the catalog listing
    Browse {
        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show details of one entry by name or id
    Show {
        /// Name or numeric id
        key: String,
    },

    /// Search by id or (partial) name
    Search {
        /// Search term
        term: String,

        /// Search the favorites instead of the whole catalog
        #[arg(long, default_value = "false")]
        favorites: bool,
    },

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },

    /// Run the webhook relay server
    Relay {
        /// Bind address, e.g. 0.0.0.0:3000
        #[arg(short, long)]
        bind: Option<String>,

        /// Allowed CORS origin ("*" for any)
        #[arg(long)]
        origin: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let log_format = cli.log_format.as_deref().unwrap_or(&config.logging.format);
    setup_tracing(log_format, &config.logging.level, cli.verbose)?;

    tracing::debug!(
        api = %config.catalog.base_url,
        favorites = %config.favorites.path.display(),
        "Configuration loaded"
    );

    if let Err(e) = run(cli.command, config).await {
        // Known failures get a short notice instead of the raw error chain
        if let Some(known) = find_in_chain(&*e) {
            tracing::error!(
                category = known.category().as_str(),
                recoverable = known.is_recoverable(),
                error = %format!("{e:#}"),
                "Command failed"
            );
            eprintln!("{}", known.user_message());
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}

async fn run(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Browse { page } => {
            tracing::info!(page = %page, "Starting browse command");
            commands::browse(&App::new(config)?, page).await?;
        }

        Commands::Show { key } => {
            tracing::info!(key = %key, "Starting show command");
            commands::show(&App::new(config)?, &key).await?;
        }

        Commands::Search { term, favorites } => {
            tracing::info!(term = %term, favorites = %favorites, "Starting search command");
            commands::search(&App::new(config)?, &term, favorites).await?;
        }

        Commands::Favorites { action } => {
            commands::favorites(&App::new(config)?, action).await?;
        }

        Commands::Relay { bind, origin } => {
            tracing::info!(bind = ?bind, origin = ?origin, "Starting relay command");
            commands::relay(&config, bind, origin).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate()?;
    Ok(config)
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("pokedex=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("pokedex={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
