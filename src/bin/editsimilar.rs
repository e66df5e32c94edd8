//! EditSimilar CLI: inspect and query a category database.
//!
//! Usage:
//!   editsimilar page add <id> <title> [--namespace N] [--db path]
//!   editsimilar tag <id> <category>... [--db path]
//!   editsimilar recommend <id> --markers <file> [--json] [--db path]

use clap::{Parser, Subcommand};
use editsimilar::{
    normalize_category, CategoryStore, Config, ItemId, MarkerRegistry, OpenStore, PageTitle, RecommendationEngine,
    SqliteStore, TitleResolver, MAIN_NAMESPACE,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, Level};

#[derive(Parser)]
#[command(
    name = "editsimilar",
    version,
    about = "Suggest articles that need attention after an edit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// Path to YAML configuration
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage pages
    Page {
        #[command(subcommand)]
        action: PageAction,
    },
    /// Attach categories to a page
    Tag {
        id: i64,
        #[arg(required = true)]
        categories: Vec<String>,
    },
    /// Remove a category from a page
    Untag { id: i64, category: String },
    /// List a page's categories
    Categories { id: i64 },
    /// Show how a marker list parses
    Markers {
        /// File holding the marker list
        file: PathBuf,
    },
    /// Suggest articles for a just-edited page
    Recommend {
        id: i64,
        /// File holding the marker list
        #[arg(long)]
        markers: PathBuf,
        /// Print JSON instead of titles
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PageAction {
    /// Create or rename a page
    Add {
        id: i64,
        title: String,
        #[arg(long, default_value_t = MAIN_NAMESPACE)]
        namespace: i32,
    },
}

/// Get the default database path (~/.local/share/editsimilar/editsimilar.db)
fn default_db_path() -> PathBuf {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"));
    data_dir.join("editsimilar").join("editsimilar.db")
}

fn open_store(db: Option<PathBuf>) -> Result<SqliteStore, String> {
    let db_path = db.unwrap_or_else(default_db_path);
    debug!(path = %db_path.display(), "opening database");
    SqliteStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))
}

fn load_config(path: Option<&Path>) -> Result<Config, String> {
    match path {
        Some(path) => Config::load(path).map_err(|e| format!("Failed to load config: {}", e)),
        None => Ok(Config::default()),
    }
}

fn read_markers(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path).map_err(|e| format!("cannot read '{}': {}", path.display(), e))
}

fn cmd_page_add(store: &SqliteStore, id: i64, title: &str, namespace: i32) -> i32 {
    let page = PageTitle::new(ItemId(id), namespace, title.trim().replace(' ', "_"));
    match store.save_page(&page) {
        Ok(()) => {
            println!("Saved page {} '{}'", id, page);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_tag(store: &SqliteStore, id: i64, categories: &[String]) -> i32 {
    match store.add_categories(ItemId(id), categories) {
        Ok(added) => {
            println!("Added {} categor{} to page {}", added, if added == 1 { "y" } else { "ies" }, id);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_untag(store: &SqliteStore, id: i64, category: &str) -> i32 {
    match store.remove_category(ItemId(id), category) {
        Ok(true) => {
            println!("Removed '{}' from page {}", normalize_category(category), id);
            0
        }
        Ok(false) => {
            eprintln!("Warning: page {} is not in '{}'", id, normalize_category(category));
            1
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_categories(store: &SqliteStore, id: i64) -> i32 {
    match store.categories_of(ItemId(id)) {
        Ok(categories) if categories.is_empty() => {
            println!("Page {} has no categories.", id);
            0
        }
        Ok(categories) => {
            for category in categories {
                println!("{}", category);
            }
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_markers(file: &Path) -> i32 {
    let text = match read_markers(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    match MarkerRegistry::load(Some(&text)) {
        Some(markers) => {
            for (i, marker) in markers.iter().enumerate() {
                println!("{:>3}  {}", i + 1, marker);
            }
        }
        None => println!("Disabled: no marker categories."),
    }
    0
}

fn cmd_recommend(store: SqliteStore, config: &Config, id: i64, markers_file: &Path, json: bool) -> i32 {
    let text = match read_markers(markers_file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let markers = MarkerRegistry::load(Some(&text));

    let store = Arc::new(store);
    let engine = RecommendationEngine::new(store.clone(), config.engine());
    let rec = match engine.recommend(ItemId(id), markers.as_ref()) {
        Ok(Some(rec)) => rec,
        Ok(None) => {
            if json {
                println!("null");
            } else {
                println!("No suggestions for page {}.", id);
            }
            return 0;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let titles = match store.resolve(&rec.ids) {
        Ok(pages) => config.title_policy().filter(pages),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    if json {
        let out = serde_json::json!({
            "similar": rec.similar,
            "ids": rec.ids,
            "titles": titles,
        });
        println!("{}", out);
        return 0;
    }

    if rec.similar {
        println!("Related articles that need attention:");
    } else {
        println!("Articles that need attention:");
    }
    for page in &titles {
        println!("  {:>8}  {}", page.id, page);
    }
    if titles.len() < rec.ids.len() {
        println!("({} suggestion(s) hidden by title policy)", rec.ids.len() - titles.len());
    }
    0
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    if let Commands::Markers { file } = &cli.command {
        std::process::exit(cmd_markers(file));
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let store = match open_store(cli.db) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Page {
            action: PageAction::Add { id, title, namespace },
        } => cmd_page_add(&store, id, &title, namespace),
        Commands::Tag { id, categories } => cmd_tag(&store, id, &categories),
        Commands::Untag { id, category } => cmd_untag(&store, id, &category),
        Commands::Categories { id } => cmd_categories(&store, id),
        Commands::Recommend { id, markers, json } => cmd_recommend(store, &config, id, &markers, json),
        Commands::Markers { .. } => 0,
    };
    std::process::exit(code);
}
