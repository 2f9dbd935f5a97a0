use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rusty_trees::data::reader::DatasetReader;
use rusty_trees::trees::classifier::DecisionTreeClassifier;
use rusty_trees::trees::strategy::Algorithm;

#[derive(Parser)]
#[command(name = "induce")]
#[command(about = "Induce a classification tree with ID3, C4.5 or CART")]
#[command(version)]
struct Cli {
    /// Path to the input CSV file (header row required)
    #[arg(long)]
    input: PathBuf,

    /// Name of the class column
    #[arg(long)]
    target: String,

    /// Induction algorithm: "id3", "c45" or "cart"
    #[arg(long, default_value = "id3")]
    algorithm: String,

    /// Field delimiter (a single ASCII character)
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Maximum tree depth (unlimited when omitted)
    #[arg(long)]
    max_depth: Option<u16>,

    /// Minimum number of rows required to split a node
    #[arg(long, default_value_t = 2)]
    min_samples_split: u16,

    /// Score C4.5 categorical splits by gain ratio instead of information gain
    #[arg(long, default_value_t = false)]
    c45_gain_ratio: bool,

    /// Also write the tree as Graphviz source to this path
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Print the JSON tree on a single line
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Number of threads for attribute scoring (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Enable verbose (debug-level) logging
    #[arg(long)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure thread pool")?;
        info!(threads, "thread pool configured");
    }

    if !cli.delimiter.is_ascii() {
        bail!("delimiter must be a single ASCII character, got {:?}", cli.delimiter);
    }
    let algorithm: Algorithm = cli.algorithm.parse()?;

    let dataset = DatasetReader::new(&cli.input)
        .with_delimiter(cli.delimiter as u8)
        .read(&cli.target)
        .context("failed to read input CSV")?;

    let mut classifier =
        DecisionTreeClassifier::with_params(algorithm, Some(cli.min_samples_split), cli.max_depth)?;
    classifier.set_c45_categorical_gain_ratio(cli.c45_gain_ratio);
    classifier
        .fit(&dataset)
        .with_context(|| format!("failed to induce {} tree", algorithm))?;

    println!("{}", classifier.to_json(!cli.compact)?);

    if let Some(path) = &cli.dot {
        fs::write(path, classifier.to_dot()?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), "graphviz source written");
    }

    Ok(())
}
