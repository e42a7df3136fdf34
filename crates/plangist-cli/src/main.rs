//! plangist CLI: decode and validate plan gists.

mod catalog_file;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use plangist_codec::Decoder;
use plangist_core::catalog::MemoryCatalog;
use plangist_core::config::GistConfig;
use plangist_operators::Operator;
use tracing_subscriber::EnvFilter;

use crate::catalog_file::CatalogFile;

#[derive(Parser)]
#[command(name = "plangist")]
#[command(about = "Decode and inspect query plan gists", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a gist and print the plan as JSON
    Decode {
        #[command(flatten)]
        input: GistInput,
    },

    /// Check that a gist decodes (exit status 1 if not)
    Validate {
        #[command(flatten)]
        input: GistInput,
    },

    /// List the operator codes this build understands
    Operators,
}

#[derive(Args)]
struct GistInput {
    /// Base64 plan gist
    #[arg(short, long)]
    gist: String,

    /// YAML catalog used to resolve table, index, and schema ids
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Maximum decoded gist size in bytes (overrides PLANGIST_MAX_GIST_BYTES)
    #[arg(long)]
    max_gist_bytes: Option<usize>,

    /// Maximum count-only list length (overrides PLANGIST_MAX_LIST_LEN)
    #[arg(long)]
    max_list_len: Option<usize>,

    /// Maximum list elements summed over the gist (overrides PLANGIST_MAX_LIST_ELEMS)
    #[arg(long)]
    max_list_elems: Option<usize>,

    /// Maximum operators per gist (overrides PLANGIST_MAX_NODES)
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Maximum operator nesting depth (overrides PLANGIST_MAX_DEPTH)
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { input } => {
            if let Err(e) = decode_gist(&input) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate { input } => {
            if let Err(e) = validate_gist(&input) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Gist is valid");
        }
        Commands::Operators => list_operators(),
    }
}

fn decode_gist(input: &GistInput) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(GistConfig::from_env(), input)?;
    let catalog = load_catalog(input)?;
    let plan = Decoder::with_config(&catalog, config).decode_str(&input.gist)?;
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

fn validate_gist(input: &GistInput) -> Result<(), Box<dyn std::error::Error>> {
    let config = build_config(GistConfig::from_env(), input)?;
    let catalog = load_catalog(input)?;
    let plan = Decoder::with_config(&catalog, config).decode_str(&input.gist)?;
    tracing::info!(nodes = plan.node_count(), "gist decoded");
    Ok(())
}

fn list_operators() {
    println!("{:>4}  {:<24} {}", "code", "name", "inputs");
    for op in Operator::ALL {
        println!("{:>4}  {:<24} {}", op.code(), op.name(), op.arity());
    }
}

fn load_catalog(input: &GistInput) -> Result<MemoryCatalog, Box<dyn std::error::Error>> {
    match &input.catalog {
        Some(path) => Ok(CatalogFile::load(path)?.into_catalog()?),
        None => Ok(MemoryCatalog::new()),
    }
}

/// Flags win over the environment.
fn build_config(
    mut config: GistConfig,
    input: &GistInput,
) -> Result<GistConfig, Box<dyn std::error::Error>> {
    if let Some(v) = input.max_gist_bytes {
        config.max_gist_bytes = v;
    }
    if let Some(v) = input.max_list_len {
        config.max_list_len = v;
    }
    if let Some(v) = input.max_list_elems {
        config.max_list_elems = v;
    }
    if let Some(v) = input.max_nodes {
        config.max_nodes = v;
    }
    if let Some(v) = input.max_depth {
        config.max_depth = v;
    }
    config.validate()?;
    Ok(config)
}
