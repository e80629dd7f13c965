//! Knowledge Graph CLI
//!
//! Builds the knowledge-point graph from a text file, exports it for
//! training code, and runs the embedding model over it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kgraph_core::{JiebaTokenizer, SimpleTokenizer, Tokenizer};
use kgraph_db::{init_memory, init_persistent, GraphStore, SurrealStore};
use kgraph_model::{ForwardMode, GraphSage, GraphTensors, HashedBagOfWords, ModelConfig};
use kgraph_pipeline::{BuildConfig, GraphBuilder, GraphExporter, TextCleaner};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Knowledge Graph - course knowledge points as a similarity graph
#[derive(Parser)]
#[command(name = "kgraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database path (defaults to ~/.kgraph/data)
    #[arg(short, long)]
    db_path: Option<PathBuf>,

    /// Use in-memory database (for testing)
    #[arg(long)]
    memory: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TokenizerKind {
    /// Chinese word segmentation
    Jieba,
    /// Split on non-alphanumeric characters
    Simple,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the graph from a file with one knowledge point per line
    Build {
        /// Path to the knowledge-point file
        input: PathBuf,

        /// Course name for the root node
        #[arg(short, long, default_value = "大数据技术")]
        course: String,

        /// Similarity a pair must exceed to be related
        #[arg(short, long, default_value = "0.5")]
        threshold: f64,

        #[arg(long, value_enum, default_value = "jieba")]
        tokenizer: TokenizerKind,

        /// Drop cleaned knowledge points shorter than this many characters
        #[arg(long, default_value = "100")]
        min_length: usize,

        /// Drop cleaned knowledge points longer than this many characters
        #[arg(long, default_value = "1000")]
        max_length: usize,

        /// Also write the exported graph to this file
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Write the exported graph as JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Embed every knowledge point with the GraphSAGE model
    Embed {
        /// Hashed bag-of-words feature width
        #[arg(long, default_value = "128")]
        features: usize,

        #[arg(long, default_value = "64")]
        hidden: usize,

        #[arg(long, default_value = "32")]
        out: usize,

        /// Weight initialization seed
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Apply dropout with this mask seed
        #[arg(long)]
        train_seed: Option<u64>,

        #[arg(long, value_enum, default_value = "jieba")]
        tokenizer: TokenizerKind,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show graph statistics
    Stats,

    /// Delete the local database (fresh start)
    ResetDb {
        /// Database path (defaults to ~/.kgraph/data)
        #[arg(short, long)]
        db_path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Commands::ResetDb { db_path } = &cli.command {
        let path = match db_path.clone().or_else(|| cli.db_path.clone()) {
            Some(path) => path,
            None => default_db_path()?,
        };

        if path.exists() {
            std::fs::remove_dir_all(&path)
                .with_context(|| format!("Failed to remove db at {}", path.display()))?;
            println!("✓ Removed database at {}", path.display());
        } else {
            println!("Database not found at {}, nothing to remove", path.display());
        }
        return Ok(());
    }

    // Initialize database
    let db = if cli.memory {
        info!("Using in-memory database");
        init_memory().await?
    } else {
        let db_path = match cli.db_path {
            Some(path) => path,
            None => default_db_path()?,
        };

        // Ensure directory exists
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("Using database at: {}", db_path.display());
        init_persistent(&db_path).await?
    };

    let store: Arc<dyn GraphStore> = Arc::new(SurrealStore::new(db));

    // Execute command
    match cli.command {
        Commands::Build {
            input,
            course,
            threshold,
            tokenizer,
            min_length,
            max_length,
            export,
        } => {
            let config = BuildConfig {
                similarity_threshold: threshold,
                min_text_chars: min_length,
                max_text_chars: max_length,
                ..Default::default()
            };
            cmd_build(store, input, course, config, tokenizer, export).await?;
        }
        Commands::Export { output } => {
            cmd_export(store, output).await?;
        }
        Commands::Embed { features, hidden, out, seed, train_seed, tokenizer, output } => {
            let config = ModelConfig {
                seed,
                ..ModelConfig::new(features, hidden, out)
            };
            cmd_embed(store, config, train_seed, tokenizer, output).await?;
        }
        Commands::Stats => {
            cmd_stats(store).await?;
        }
        Commands::ResetDb { .. } => {
            // Handled before database init.
        }
    }

    Ok(())
}

fn default_db_path() -> Result<PathBuf> {
    let mut path = dirs::home_dir().context("Could not find home directory")?;
    path.push(".kgraph");
    path.push("data");
    Ok(path)
}

fn make_tokenizer(kind: TokenizerKind) -> Arc<dyn Tokenizer> {
    match kind {
        TokenizerKind::Jieba => Arc::new(JiebaTokenizer::new()),
        TokenizerKind::Simple => Arc::new(SimpleTokenizer),
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

async fn cmd_build(
    store: Arc<dyn GraphStore>,
    input: PathBuf,
    course: String,
    config: BuildConfig,
    tokenizer: TokenizerKind,
    export: Option<PathBuf>,
) -> Result<()> {
    config.validate()?;
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("Failed to read file: {}", input.display()))?;

    // One knowledge point per line
    let raw: Vec<&str> = content.lines().collect();
    let knowledge_points = TextCleaner::from_config(&config).process(&raw);
    println!("✓ Kept {} of {} lines after cleaning", knowledge_points.len(), raw.len());

    let builder = GraphBuilder::new(store.clone(), make_tokenizer(tokenizer)).with_config(config);
    let report = builder.build(&course, &knowledge_points).await?;

    println!("✓ Built graph for {}:", course);
    println!("  • Knowledge nodes: {}", report.knowledge_nodes);
    println!("  • CONTAINS edges: {}", report.contains_edges);
    println!("  • RELATED_TO edges: {}", report.related_edges);

    if let Some(path) = export {
        let graph = GraphExporter::new(store).export().await?;
        write_output(Some(&path), &graph.to_json()?)?;
        println!("✓ Exported graph to {}", path.display());
    }

    Ok(())
}

async fn cmd_export(store: Arc<dyn GraphStore>, output: Option<PathBuf>) -> Result<()> {
    let graph = GraphExporter::new(store).export().await?;
    write_output(output.as_deref(), &graph.to_json()?)
}

async fn cmd_embed(
    store: Arc<dyn GraphStore>,
    config: ModelConfig,
    train_seed: Option<u64>,
    tokenizer: TokenizerKind,
    output: Option<PathBuf>,
) -> Result<()> {
    let graph = GraphExporter::new(store).export().await?;
    let tensors = GraphTensors::from_export(&graph)?;

    let tokenizer = make_tokenizer(tokenizer);
    let encoder = HashedBagOfWords::new(tokenizer.as_ref(), config.in_channels)?;
    let features = encoder.encode_nodes(&graph.nodes);

    let model = GraphSage::new(config)?;
    let mode = match train_seed {
        Some(seed) => ForwardMode::Training { seed },
        None => ForwardMode::Inference,
    };
    let embeddings = model.forward(features.view(), tensors.edge_index.view(), mode)?;

    let rows: Vec<serde_json::Value> = tensors
        .node_ids
        .iter()
        .zip(embeddings.rows())
        .map(|(id, row)| serde_json::json!({ "id": id, "embedding": row.to_vec() }))
        .collect();
    write_output(output.as_deref(), &serde_json::to_string_pretty(&rows)?)?;

    info!("Embedded {} nodes into {} dimensions", embeddings.nrows(), embeddings.ncols());
    Ok(())
}

async fn cmd_stats(store: Arc<dyn GraphStore>) -> Result<()> {
    let stats = GraphExporter::new(store).stats().await?;

    println!("📊 Knowledge Graph Statistics");
    println!("  • Courses: {}", stats.course_count);
    println!("  • Knowledge nodes: {}", stats.knowledge_node_count);
    println!("  • CONTAINS edges: {}", stats.contains_count);
    println!("  • RELATED_TO edges: {}", stats.related_count);

    Ok(())
}
