//! CLI entry point for menuboard

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use menuboard::commands::list::ListOptions;
use menuboard::content::ContentKind;

#[derive(Parser)]
#[command(name = "menuboard")]
#[command(version)]
#[command(about = "Restaurant content resolution and JSON content API", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site with sample content
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Serve the content API
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List resolved content
    List {
        /// Type of content to list (categories, tags, items, team, lunch-menus)
        #[arg(default_value = "items")]
        r#type: ContentKind,

        /// Only menu items in this category
        #[arg(long)]
        category: Option<String>,

        /// Only menu items carrying this tag (repeatable, all must match)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Show at most this many records
        #[arg(short, long)]
        limit: Option<usize>,

        /// Read from the content API (defaults to the configured url)
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        remote: Option<String>,
    },

    /// Show the active lunch menu
    Lunch {
        /// Date to resolve for, as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Read from the content API (defaults to the configured url)
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        remote: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "menuboard=debug,info"
    } else {
        "menuboard=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            menuboard::commands::init::init_site(&target_dir)?;
            println!("Initialized restaurant site in {:?}", target_dir);
        }

        Commands::Server { port, ip } => {
            let restaurant = menuboard::Restaurant::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            menuboard::server::start(&restaurant, &ip, port).await?;
        }

        Commands::List {
            r#type,
            category,
            tags,
            limit,
            remote,
        } => {
            let restaurant = menuboard::Restaurant::new(&base_dir)?;
            let options = ListOptions {
                category,
                tags,
                limit,
                remote,
            };
            menuboard::commands::list::run(&restaurant, r#type, &options).await?;
        }

        Commands::Lunch { date, remote } => {
            let restaurant = menuboard::Restaurant::new(&base_dir)?;
            let date = date
                .map(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d"))
                .transpose()
                .context("--date must be YYYY-MM-DD")?;
            menuboard::commands::list::lunch(&restaurant, date, remote.as_deref()).await?;
        }

        Commands::Version => {
            println!("menuboard version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
