//! book-network CLI
//!
//! # Commands
//!
//! - `explore` (default): load the catalog, build the network, start the
//!   interactive search/recommend loop
//! - `fetch`: look up titles on Open Library and write the catalog
//!   (requires the `openlibrary` feature)
//! - `export`: write the network as Graphviz DOT
//! - `stats`: print network summary counts
//!
//! Logs go to stderr; prompts and results go to stdout.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use book_network::{
    BuildStrategy, CatalogStore, JsonCatalogStore, Network, NetworkConfig, RecommendOptions,
    Session, SharedSubjectCount,
};

/// Book Network - explore a subject-similarity graph of books
#[derive(Parser)]
#[command(name = "book-network")]
#[command(version)]
#[command(about = "Build a subject-similarity network over a book catalog and get recommendations")]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Catalog file (title-keyed JSON)
    #[arg(long, env = "BOOK_NETWORK_CATALOG", default_value = "books.json", global = true)]
    catalog: PathBuf,

    #[command(flatten)]
    network: NetworkArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone)]
struct NetworkArgs {
    /// Subject ignored when linking books
    #[arg(long, env = "BOOK_NETWORK_EXCLUDED_TAG", default_value = book_network::network::DEFAULT_EXCLUDED_TAG, global = true)]
    excluded_tag: String,

    /// Node size per reading-log entry
    #[arg(long, default_value_t = book_network::network::DEFAULT_SIZE_SCALE, global = true)]
    size_scale: u64,

    /// Pair enumeration strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Pairwise, global = true)]
    strategy: StrategyArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Pairwise,
    Indexed,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search and recommendations
    Explore {
        /// Minimum subjects a recommendation must share with the seed
        #[arg(long, default_value_t = book_network::recommend::DEFAULT_MIN_SHARED_SUBJECTS)]
        min_shared: usize,

        /// Ignore the excluded tag when checking shared subjects
        #[arg(long)]
        exclude_tag_overlap: bool,
    },
    /// Fetch metadata for a titles file and save the catalog
    Fetch {
        /// Titles file (JSON array of strings)
        #[arg(long, default_value = "book_titles.json")]
        titles: PathBuf,

        /// Only fetch the first N titles
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },
    /// Write the network as Graphviz DOT
    Export {
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print network summary counts
    Stats,
}

impl NetworkArgs {
    fn config(&self) -> NetworkConfig {
        NetworkConfig::default()
            .with_excluded_tag(self.excluded_tag.clone())
            .with_size_scale(self.size_scale)
            .with_strategy(match self.strategy {
                StrategyArg::Pairwise => BuildStrategy::Pairwise,
                StrategyArg::Indexed => BuildStrategy::InvertedIndex,
            })
    }
}

fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> book_network::Result<()> {
    let command = cli.command.unwrap_or(Commands::Explore {
        min_shared: book_network::recommend::DEFAULT_MIN_SHARED_SUBJECTS,
        exclude_tag_overlap: false,
    });

    match command {
        Commands::Fetch { titles, limit } => fetch(JsonCatalogStore::new(titles, &cli.catalog), limit),
        Commands::Explore { min_shared, exclude_tag_overlap } => {
            let network = load_network(&cli.catalog, &cli.network)?;
            let options = RecommendOptions::default()
                .with_min_shared_subjects(min_shared)
                .with_shared_count(if exclude_tag_overlap {
                    SharedSubjectCount::ExcludingTag
                } else {
                    SharedSubjectCount::Raw
                });
            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(&network, stdin.lock(), stdout.lock())
                .with_options(options)
                .run()
        }
        Commands::Export { output } => {
            let network = load_network(&cli.catalog, &cli.network)?;
            match output {
                Some(path) => {
                    let mut writer = BufWriter::new(File::create(&path)?);
                    book_network::export::export_dot(&network, &mut writer)?;
                    writer.flush()?;
                    tracing::info!(path = %path.display(), "wrote DOT export");
                }
                None => book_network::export::export_dot(&network, &mut io::stdout().lock())?,
            }
            Ok(())
        }
        Commands::Stats => {
            let network = load_network(&cli.catalog, &cli.network)?;
            let stats = network.stats();
            println!("books:       {}", stats.nodes);
            println!("edges:       {}", stats.edges);
            println!("isolated:    {}", stats.isolated);
            println!("max degree:  {}", stats.max_degree);
            println!("max weight:  {}", stats.max_weight);
            Ok(())
        }
    }
}

fn load_network(catalog: &Path, args: &NetworkArgs) -> book_network::Result<Network> {
    // The titles path is unused when only reading the catalog.
    let store = JsonCatalogStore::new(PathBuf::new(), catalog);
    let books = store.load_catalog()?;
    Ok(book_network::build(books, &args.config()))
}

#[cfg(feature = "openlibrary")]
fn fetch(store: JsonCatalogStore, limit: usize) -> book_network::Result<()> {
    let titles = store.load_titles()?;
    let provider = book_network::provider::OpenLibraryProvider::new();
    let books = book_network::collect_catalog(&provider, titles.iter().take(limit));
    store.save_catalog(&books)?;
    println!("Saved {} books to {}", books.len(), store.catalog_path.display());
    Ok(())
}

#[cfg(not(feature = "openlibrary"))]
fn fetch(_store: JsonCatalogStore, _limit: usize) -> book_network::Result<()> {
    Err(book_network::Error::Provider(
        "fetch needs the `openlibrary` feature (cargo build --features openlibrary)".into(),
    ))
}
