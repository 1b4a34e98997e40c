//! sassgraph - dependency graph for Sass and SCSS stylesheets.
//!
//! Usage:
//!   sassgraph ancestors <dir> <file>     # Files that import <file>
//!   sassgraph descendents <dir> <file>   # Files <file> imports
//!   sassgraph index <dir>                # Every file and its imports
//!   sassgraph cycles <dir>               # Import cycles

use anyhow::{Context, Result};
use clap::Parser;
use sass_graph::cli::{Cli, Commands};
use sass_graph::Graph;
use std::path::PathBuf;
use tracing::debug;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for results.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let options = cli.graph_options().context("invalid options")?;
    let dir = cli.command.dir();
    let graph = Graph::build_from_directory(dir, &options)
        .with_context(|| format!("failed to build graph for {}", dir.display()))?;
    debug!(stats = %graph.stats(), "graph ready");

    match &cli.command {
        Commands::Ancestors { file, .. } => print_paths(&graph.ancestors(file), cli.json)?,
        Commands::Descendents { file, .. } => print_paths(&graph.descendents(file), cli.json)?,
        Commands::Index { .. } => print_index(&graph, cli.json)?,
        Commands::Cycles { .. } => print_cycles(&graph.cycles(), cli.json)?,
    }
    Ok(())
}

fn print_paths(paths: &[PathBuf], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(paths)?);
    } else {
        for path in paths {
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn print_index(graph: &Graph, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(graph.index())?);
        return Ok(());
    }

    for (path, node) in graph.index() {
        println!("{}", path.display());
        for import in &node.imports {
            println!("  -> {}", import.display());
        }
    }
    println!();
    println!("{}", graph.stats());
    Ok(())
}

fn print_cycles(cycles: &[Vec<PathBuf>], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(cycles)?);
        return Ok(());
    }

    if cycles.is_empty() {
        println!("No import cycles.");
    }
    for (i, cycle) in cycles.iter().enumerate() {
        println!("Cycle {}:", i + 1);
        for path in cycle {
            println!("  {}", path.display());
        }
    }
    Ok(())
}
