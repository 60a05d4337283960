//! userdeck - browse demo users from the terminal.
//!
//! Lists users page by page, shows a single user with prev/next hints,
//! downloads avatars and keeps a local list of favorites.

mod output;

use std::io;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use userdeck_core::{Config, FavoritesError, FavoritesStore, FetchError, UserClient, UserCursor};

/// userdeck - browse demo users from the terminal
#[derive(Parser)]
#[command(name = "userdeck", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a page of users
    List {
        /// Number of users to fetch (defaults to the configured page size)
        #[arg(long)]
        per_page: Option<NonZeroU32>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single user
    Show {
        /// User id
        id: i64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Download a user's avatar
    Avatar {
        /// User id
        id: i64,
        /// Write the image to this file instead of describing it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Manage favorite users
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List saved favorites
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Fetch a user and save it as a favorite
    Add {
        /// User id
        id: i64,
    },
    /// Remove a favorite
    Remove {
        /// User id
        id: i64,
    },
}

/// Initialize the tracing subscriber for logging.
/// The returned guard flushes buffered log lines when dropped.
fn init_tracing() -> WorkerGuard {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = tracing_appender::non_blocking(io::stderr());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(writer))
        .with(filter)
        .init();

    guard
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let _log_guard = init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&describe_error(&e));
            ExitCode::FAILURE
        }
    }
}

/// Prefer the friendly per-kind message for errors the library knows about
fn describe_error(e: &anyhow::Error) -> String {
    if let Some(fetch) = e.downcast_ref::<FetchError>() {
        format!("Something went wrong: {} ({})", fetch.user_message(), fetch)
    } else if let Some(fav) = e.downcast_ref::<FavoritesError>() {
        format!("Unable to update favorites: {}", fav.user_message())
    } else {
        format!("Error: {:#}", e)
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let client = UserClient::new(&config)?;
    info!(base_url = client.base_url(), "userdeck starting");

    match cli.command {
        Commands::List { per_page, json } => {
            let page_size = per_page.unwrap_or(config.page_size);
            let users = client.fetch_list(page_size).await?;
            if json {
                output::json(&users)?;
            } else {
                let favorites = FavoritesStore::new(config.favorites_path()?);
                let favorite_ids: Vec<i64> =
                    favorites.load()?.iter().map(|f| f.user.id()).collect();
                output::user_table(&users, &favorite_ids);
            }
        }

        Commands::Show { id, json } => {
            let user = client.fetch_one(id).await?;
            if json {
                output::json(&user)?;
            } else {
                let cursor = UserCursor::new(id, config.user_id_range());
                output::user_detail(&user, cursor.as_ref());
            }
        }

        Commands::Avatar { id, out } => {
            let user = client.fetch_one(id).await?;
            match client.fetch_image(user.avatar_url()).await {
                Some(image) => match out {
                    Some(path) => {
                        std::fs::write(&path, image.bytes())
                            .with_context(|| format!("Failed to write {}", path.display()))?;
                        output::success(&format!(
                            "Saved {} avatar to {}",
                            user.display_name(),
                            path.display()
                        ));
                    }
                    None => output::image_summary(&user, &image),
                },
                None => output::warning(&format!("No image available for {}", user.display_name())),
            }
        }

        Commands::Favorites { command } => {
            let store = FavoritesStore::new(config.favorites_path()?);
            run_favorites(&client, &store, command).await?;
        }
    }

    Ok(())
}

async fn run_favorites(
    client: &UserClient,
    store: &FavoritesStore,
    command: FavoritesCommands,
) -> Result<()> {
    match command {
        FavoritesCommands::List { json } => {
            let favorites = store.load()?;
            if json {
                output::json(&favorites)?;
                return Ok(());
            }
            if favorites.is_empty() {
                output::info("No favorites yet. Add one with `userdeck favorites add <id>`.");
                return Ok(());
            }

            // Warm the avatar cache for every favorite at once
            let avatars = futures::future::join_all(
                favorites.iter().map(|f| client.fetch_image(f.user.avatar_url())),
            )
            .await;
            output::favorites_table(&favorites, &avatars);
        }

        FavoritesCommands::Add { id } => {
            let user = client.fetch_one(id).await?;
            store.add(&user)?;
            output::success(&format!(
                "{} has been successfully added to favorites!",
                user.display_name()
            ));
        }

        FavoritesCommands::Remove { id } => {
            let user = store.remove(id)?;
            output::success(&format!("Removed {} from favorites", user.display_name()));
        }
    }
    Ok(())
}
