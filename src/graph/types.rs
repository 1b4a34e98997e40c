//! Core types for the stylesheet graph.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// One stylesheet in the graph.
///
/// `imports` always holds canonical paths, each of which is itself a key of
/// the graph index. `imported_by` keeps the parent path in the form it was
/// recorded, which is not necessarily canonical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Files this stylesheet imports directly, in first-discovery order.
    pub imports: Vec<PathBuf>,
    /// Files that import this stylesheet.
    pub imported_by: Vec<String>,
    /// Modification time captured when the file was first added.
    pub modified: DateTime<Utc>,
}

impl Node {
    pub fn new(modified: DateTime<Utc>) -> Self {
        Self {
            imports: Vec::new(),
            imported_by: Vec::new(),
            modified,
        }
    }

    /// True when nothing in the graph imports this file.
    pub fn is_entry_point(&self) -> bool {
        self.imported_by.is_empty()
    }
}

/// Statistics about the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub file_count: usize,
    pub import_count: usize,
    /// Files nothing imports.
    pub entry_points: usize,
    /// Files following the `_name` partial convention.
    pub partials: usize,
    pub cycle_count: usize,
    /// Import targets that matched no file (CSS imports, built-in modules).
    pub unresolved_imports: usize,
}

impl fmt::Display for GraphStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files, {} imports (entry points: {}, partials: {}, cycles: {}, unresolved: {})",
            self.file_count,
            self.import_count,
            self.entry_points,
            self.partials,
            self.cycle_count,
            self.unresolved_imports
        )
    }
}
