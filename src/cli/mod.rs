//! CLI definition for `sassgraph`.
//!
//! Commands:
//! - Query: ancestors, descendents
//! - Inspect: index, cycles

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::{ConfigFile, GraphOptions};
use crate::error::Result;

#[derive(Parser, Debug)]
#[command(name = "sassgraph")]
#[command(about = "Dependency graph for Sass and SCSS stylesheets", version)]
pub struct Cli {
    /// Add a directory to the import search path (repeatable)
    #[arg(short = 'I', long = "load-path", value_name = "DIR", global = true)]
    pub load_paths: Vec<PathBuf>,

    /// Stylesheet extensions to recognize, comma separated
    #[arg(
        short,
        long,
        value_name = "LIST",
        value_delimiter = ',',
        global = true
    )]
    pub extensions: Vec<String>,

    /// Leave out files whose path matches this regular expression
    #[arg(short = 'x', long, value_name = "REGEX", global = true)]
    pub exclude: Option<String>,

    /// Follow symbolic links while scanning directories
    #[arg(short, long, global = true)]
    pub follow: bool,

    /// Print results as JSON
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file (default: <DIR>/.sassgraph.toml when present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Files that directly or indirectly import FILE
    Ancestors {
        /// Directory to scan
        dir: PathBuf,
        /// Stylesheet to start from
        file: PathBuf,
    },

    /// Files that FILE directly or indirectly imports
    Descendents {
        /// Directory to scan
        dir: PathBuf,
        /// Stylesheet to start from
        file: PathBuf,
    },

    /// Dump every file with its direct imports
    Index {
        /// Directory to scan
        dir: PathBuf,
    },

    /// List import cycles
    Cycles {
        /// Directory to scan
        dir: PathBuf,
    },
}

impl Commands {
    /// The directory the command scans.
    pub fn dir(&self) -> &Path {
        match self {
            Commands::Ancestors { dir, .. }
            | Commands::Descendents { dir, .. }
            | Commands::Index { dir }
            | Commands::Cycles { dir } => dir,
        }
    }
}

impl Cli {
    /// Graph options from defaults, then the config file, then flags.
    pub fn graph_options(&self) -> Result<GraphOptions> {
        let config = match &self.config {
            Some(path) => Some(ConfigFile::load(path)?),
            None => ConfigFile::discover(self.command.dir())?,
        };

        let mut options = GraphOptions::default();
        if let Some(config) = config {
            options = config.apply(options)?;
        }

        if !self.extensions.is_empty() {
            options.extensions = self.extensions.clone();
        }
        if let Some(pattern) = &self.exclude {
            options = options.with_exclude(pattern)?;
        }
        if self.follow {
            options.follow = true;
        }
        if !self.load_paths.is_empty() {
            options.load_paths = self.load_paths.clone();
        }
        Ok(options)
    }
}
