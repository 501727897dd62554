/// Popcorn - movie search and watch-list tracker
use clap::{Parser, Subcommand};
use popcorn_cli::{config, interactive, render, session, App, PopcornConfig, TerminalTitle};
use popcorn_core::MovieId;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "popcorn")]
#[command(about = "Search movies and keep track of what you watched", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path (default: ./popcorn.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog by title
    Search {
        /// Title (or part of it)
        title: String,
    },
    /// Show details for one movie
    Show {
        /// IMDb id, e.g. tt0111161
        id: String,
    },
    /// Rate a movie and add it to the watch list
    Add {
        /// IMDb id
        id: String,
        /// Your rating, 1 to 10
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// Remove a movie from the watch list
    Remove {
        /// IMDb id
        id: String,
    },
    /// Show watch-list statistics and entries
    List,
    /// Interactive session
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (stderr keeps stdout for the views)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = PopcornConfig::load(cli.config.as_deref())?;
    let mut app = session::connect(&config, Arc::new(TerminalTitle)).await?;

    match cli.command {
        Commands::Search { title } => search(&mut app, title).await?,
        Commands::Show { id } => show(&mut app, MovieId::new(id)).await?,
        Commands::Add { id, rating } => add(&mut app, MovieId::new(id), rating).await?,
        Commands::Remove { id } => remove(&mut app, &MovieId::new(id)).await?,
        Commands::List => list(&app),
        Commands::Interactive => interactive::run(&mut app).await?,
    }

    Ok(())
}

async fn search(app: &mut App, title: String) -> anyhow::Result<()> {
    if let Some(handle) = app.set_query(title) {
        handle.await?;
    }
    println!("{}", render::search(&app.search_state()));
    Ok(())
}

async fn show(app: &mut App, id: MovieId) -> anyhow::Result<()> {
    if let Some(handle) = app.open(id) {
        handle.await?;
    }
    println!(
        "{}",
        render::detail(&app.detail_state(), app.watched_rating(), 0)
    );
    Ok(())
}

async fn add(app: &mut App, id: MovieId, rating: u8) -> anyhow::Result<()> {
    if let Some(handle) = app.open(id) {
        handle.await?;
    }
    if let Some(message) = app.detail_state().error() {
        anyhow::bail!("{message}");
    }

    app.rate(rating)?;
    let movie = app.add_selected().await?;
    println!("Added {} with your rating {}", movie.title, movie.user_rating);
    list(app);
    Ok(())
}

async fn remove(app: &mut App, id: &MovieId) -> anyhow::Result<()> {
    if app.remove_watched(id).await? {
        println!("Removed {id}");
    } else {
        println!("{id} is not on your list");
    }
    list(app);
    Ok(())
}

fn list(app: &App) {
    println!("{}", render::summary(&app.summary()));
    if !app.watched().is_empty() {
        println!("{}", render::watched_list(app.watched().movies()));
    }
}
