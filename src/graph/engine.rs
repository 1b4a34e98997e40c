//! The stylesheet graph and its read-only queries.
//!
//! Nodes live in an index keyed by canonical path and refer to each other
//! by path, so the graph can contain import cycles without any ownership
//! cycles. Traversal shares one visited set across the whole walk.

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::types::{GraphStats, Node};

/// Dependency graph over a set of stylesheets.
///
/// Built by [`Graph::build_from_file`] or [`Graph::build_from_directory`]
/// and read-only afterwards. Serializes with its options alongside the
/// index; the exclusion rule is written as its pattern text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Graph {
    /// Root directory for directory builds.
    pub(crate) dir: Option<PathBuf>,
    /// Index: canonical path -> node.
    pub(crate) index: BTreeMap<PathBuf, Node>,
    /// Absolute search directories, in priority order.
    pub(crate) load_paths: Vec<PathBuf>,
    pub(crate) extensions: Vec<String>,
    #[serde(serialize_with = "serialize_exclude")]
    pub(crate) exclude: Option<Regex>,
    pub(crate) follow: bool,
    /// Import targets that matched no file, counted once per directive.
    pub(crate) unresolved: usize,
}

fn serialize_exclude<S: Serializer>(
    exclude: &Option<Regex>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match exclude {
        Some(re) => serializer.serialize_some(re.as_str()),
        None => serializer.serialize_none(),
    }
}

impl Graph {
    // ─── Accessors ──────────────────────────────────────────────

    /// Look up a node by canonical path.
    pub fn node(&self, path: &Path) -> Option<&Node> {
        self.index.get(path)
    }

    /// The full node index.
    pub fn index(&self) -> &BTreeMap<PathBuf, Node> {
        &self.index
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.index.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Root directory, for graphs built from a directory.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn load_paths(&self) -> &[PathBuf] {
        &self.load_paths
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    pub fn follows_symlinks(&self) -> bool {
        self.follow
    }

    pub(crate) fn is_excluded(&self, path: &Path) -> bool {
        self.exclude
            .as_ref()
            .is_some_and(|re| re.is_match(&path.to_string_lossy()))
    }

    // ─── Traversal ──────────────────────────────────────────────

    /// Generic depth-first walk.
    ///
    /// `edges` picks the edges to follow from a node; it receives `None`
    /// when the start path is not in the graph. Every edge is reported to
    /// `on_visit` at most once per walk, before its own edges are explored.
    /// The start file is not reported unless a cycle leads back to it.
    pub fn visit<'g, F, E>(&'g self, path: &Path, mut on_visit: F, edges: E)
    where
        F: FnMut(&'g Path, Option<&'g Node>),
        E: Fn(Option<&'g Node>) -> Vec<&'g Path>,
    {
        let mut visited = HashSet::new();
        self.visit_from(path, &mut on_visit, &edges, &mut visited);
    }

    fn visit_from<'g, F, E>(
        &'g self,
        path: &Path,
        on_visit: &mut F,
        edges: &E,
        visited: &mut HashSet<&'g Path>,
    ) where
        F: FnMut(&'g Path, Option<&'g Node>),
        E: Fn(Option<&'g Node>) -> Vec<&'g Path>,
    {
        let canonical = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let node = self.index.get(&canonical);
        if node.is_none() {
            debug!(file = %canonical.display(), "graph doesn't contain file");
        }

        for edge in edges(node) {
            if visited.insert(edge) {
                on_visit(edge, self.index.get(edge));
                self.visit_from(edge, on_visit, edges, visited);
            }
        }
    }

    /// Visit every file that transitively imports `path`.
    pub fn visit_ancestors<'g, F>(&'g self, path: &Path, on_visit: F)
    where
        F: FnMut(&'g Path, Option<&'g Node>),
    {
        self.visit(path, on_visit, |node| {
            node.map(|n| n.imported_by.iter().map(|p| Path::new(p.as_str())).collect())
                .unwrap_or_default()
        });
    }

    /// Visit every file `path` transitively imports.
    pub fn visit_descendents<'g, F>(&'g self, path: &Path, on_visit: F)
    where
        F: FnMut(&'g Path, Option<&'g Node>),
    {
        self.visit(path, on_visit, |node| {
            node.map(|n| n.imports.iter().map(PathBuf::as_path).collect())
                .unwrap_or_default()
        });
    }

    /// Ancestors of `path` in visit order.
    pub fn ancestors(&self, path: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        self.visit_ancestors(path, |edge, _| found.push(edge.to_path_buf()));
        found
    }

    /// Descendents of `path` in visit order.
    pub fn descendents(&self, path: &Path) -> Vec<PathBuf> {
        let mut found = Vec::new();
        self.visit_descendents(path, |edge, _| found.push(edge.to_path_buf()));
        found
    }

    // ─── Analysis ───────────────────────────────────────────────

    /// Import cycles: strongly connected components of the `imports`
    /// edges with more than one file, plus files importing themselves.
    /// Each cycle and the list itself are sorted.
    pub fn cycles(&self) -> Vec<Vec<PathBuf>> {
        let mut graph: DiGraph<&Path, ()> = DiGraph::new();
        let mut indexes: HashMap<&Path, NodeIndex> = HashMap::with_capacity(self.index.len());
        for path in self.index.keys() {
            indexes.insert(path.as_path(), graph.add_node(path.as_path()));
        }
        for (path, node) in &self.index {
            let from = indexes[path.as_path()];
            for target in &node.imports {
                if let Some(&to) = indexes.get(target.as_path()) {
                    graph.add_edge(from, to, ());
                }
            }
        }

        let mut cycles: Vec<Vec<PathBuf>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.first().is_some_and(|&idx| graph.contains_edge(idx, idx))
            })
            .map(|scc| {
                let mut files: Vec<PathBuf> =
                    scc.into_iter().map(|idx| graph[idx].to_path_buf()).collect();
                files.sort();
                files
            })
            .collect();
        cycles.sort();
        cycles
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            file_count: self.index.len(),
            import_count: self.index.values().map(|n| n.imports.len()).sum(),
            entry_points: self.index.values().filter(|n| n.is_entry_point()).count(),
            partials: self
                .index
                .keys()
                .filter(|p| {
                    p.file_name()
                        .is_some_and(|name| name.to_string_lossy().starts_with('_'))
                })
                .count(),
            cycle_count: self.cycles().len(),
            unresolved_imports: self.unresolved,
        }
    }
}
