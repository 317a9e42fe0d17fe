mod catalog;
mod extractor;
mod model;
mod parser;
mod render;
mod store;
mod title;
mod view;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use catalog::{AppState, DEFAULT_COLLECTION, DEFAULT_COLLECTIONS_DIR};
use view::{GenreFilter, SortOrder};

const DEFAULT_OUTPUT: &str = "movies.json";
const DEFAULT_PAGE: &str = "index.html";

#[derive(Parser)]
#[command(name = "movie_catalog", about = "Scrape movie metadata and browse curated collections")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape title pages into a JSON file
    Scrape {
        /// Output file (overwritten)
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Base URL the id is appended to
        #[arg(long, default_value = extractor::BASE_URL)]
        base_url: String,
        /// Title ids, in output order (default: built-in list)
        ids: Vec<String>,
    },
    /// Print a collection as a table
    View(ViewArgs),
    /// Write a collection as an HTML page
    Render {
        #[command(flatten)]
        view: ViewArgs,
        /// Directory holding poster and backdrop images
        #[arg(long, default_value = render::DEFAULT_ASSETS_DIR)]
        assets_dir: String,
        #[arg(short, long, default_value = DEFAULT_PAGE)]
        output: PathBuf,
    },
    /// List available collections
    Collections {
        #[arg(long, default_value = DEFAULT_COLLECTIONS_DIR)]
        collections_dir: PathBuf,
    },
    /// List the genres found in a collection
    Genres {
        #[arg(long, default_value = DEFAULT_COLLECTIONS_DIR)]
        collections_dir: PathBuf,
        #[arg(short, long, default_value = DEFAULT_COLLECTION)]
        collection: String,
    },
}

#[derive(Args)]
struct ViewArgs {
    #[arg(long, default_value = DEFAULT_COLLECTIONS_DIR)]
    collections_dir: PathBuf,
    /// Collection file name
    #[arg(short, long, default_value = DEFAULT_COLLECTION)]
    collection: String,
    /// Genre substring, or "all"
    #[arg(short, long, default_value = "all")]
    genre: GenreFilter,
    /// Order by year (default: collection order, or ascending when a genre is set)
    #[arg(short, long, value_enum)]
    sort: Option<SortOrder>,
}

impl ViewArgs {
    fn load(&self) -> anyhow::Result<AppState> {
        AppState::default().switch_collection(&self.collections_dir, &self.collection)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Scrape { output, base_url, ids } => {
            let ids = if ids.is_empty() {
                extractor::DEFAULT_IDS.iter().map(|s| s.to_string()).collect()
            } else {
                ids
            };
            let source = extractor::HttpSource::new(&base_url)?;
            println!("Scraping {} movies...", ids.len());
            let n = extractor::run_batch(&source, &ids, &output).await?;
            println!("Saved {} movies to {}.", n, output.display());
            Ok(())
        }
        Commands::View(args) => {
            let state = args.load()?;
            let records = state.view(&args.genre, args.sort);
            if records.is_empty() {
                println!("No movies match.");
                return Ok(());
            }
            let cards = render::card_views(&records, render::DEFAULT_ASSETS_DIR);
            print!("{}", render::render_table(&cards));
            let collection = state.catalog().map(|c| c.collection()).unwrap_or_default();
            println!("\n{} movies | {}", cards.len(), collection);
            Ok(())
        }
        Commands::Render { view, assets_dir, output } => {
            let state = view.load()?;
            let records = state.view(&view.genre, view.sort);
            let cards = render::card_views(&records, &assets_dir);
            let html = render::render_html(&cards, &view.collection);
            std::fs::write(&output, html)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!("Rendered {} movies to {}.", cards.len(), output.display());
            Ok(())
        }
        Commands::Collections { collections_dir } => {
            let names = store::list_collections(&collections_dir)?;
            if names.is_empty() {
                println!("No collections in {}.", collections_dir.display());
            }
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Genres { collections_dir, collection } => {
            let state = AppState::default().switch_collection(&collections_dir, &collection)?;
            let records = state.catalog().map(|c| c.records()).unwrap_or_default();
            for genre in view::distinct_genres(records) {
                println!("{}", genre);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
