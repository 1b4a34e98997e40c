//! Graph builder: seeds the graph from a file or a directory scan and
//! follows every resolvable import recursively.
//!
//! Directory scans walk the tree with `ignore` (dot-files included, ignore
//! files not honored) and tolerate per-file failures; single-file builds
//! propagate them.

use chrono::{DateTime, Utc};
use ignore::WalkBuilder;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::engine::Graph;
use super::resolver::{normalize, resolve};
use super::types::Node;
use crate::config::GraphOptions;
use crate::error::{GraphError, Result};
use crate::parser::extract_file;

impl Graph {
    fn with_options(options: &GraphOptions, dir: Option<PathBuf>) -> Result<Self> {
        let load_paths = options
            .load_paths
            .iter()
            .map(|p| {
                std::path::absolute(p)
                    .map(|abs| normalize(&abs))
                    .map_err(|e| GraphError::io(p, e))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            dir,
            index: BTreeMap::new(),
            load_paths,
            extensions: options.extensions.clone(),
            exclude: options.exclude.clone(),
            follow: options.follow,
            unresolved: 0,
        })
    }

    /// Build a graph seeded with a single stylesheet.
    ///
    /// Any failure while adding the file or one of its dependencies is
    /// returned to the caller.
    pub fn build_from_file(path: impl AsRef<Path>, options: &GraphOptions) -> Result<Self> {
        let path = path.as_ref();
        if !fs::metadata(path).is_ok_and(|meta| meta.is_file()) {
            return Err(GraphError::InvalidFile(path.to_path_buf()));
        }
        let path = fs::canonicalize(path).map_err(|e| GraphError::io(path, e))?;

        let mut graph = Self::with_options(options, None)?;
        graph.add_file(&path, None)?;

        info!(
            file = %path.display(),
            files = graph.len(),
            "built stylesheet graph"
        );
        Ok(graph)
    }

    /// Build a graph seeded with every stylesheet under `dir`.
    ///
    /// Each discovered file is added on its own, so files no other file
    /// reaches are still indexed. A file that cannot be read or parsed is
    /// logged and skipped.
    pub fn build_from_directory(dir: impl AsRef<Path>, options: &GraphOptions) -> Result<Self> {
        let dir = dir.as_ref();
        if !fs::metadata(dir).is_ok_and(|meta| meta.is_dir()) {
            return Err(GraphError::InvalidDirectory(dir.to_path_buf()));
        }
        let dir = fs::canonicalize(dir).map_err(|e| GraphError::io(dir, e))?;

        let mut graph = Self::with_options(options, Some(dir.clone()))?;
        let files = discover_sources(&dir, &graph.extensions, graph.follow);
        debug!(root = %dir.display(), count = files.len(), "discovered stylesheets");

        let mut skipped = 0usize;
        for file in &files {
            let added = fs::canonicalize(file)
                .map_err(|e| GraphError::io(file, e))
                .and_then(|canonical| graph.add_file(&canonical, None));
            if let Err(e) = added {
                warn!(file = %file.display(), error = %e, "skipping stylesheet");
                skipped += 1;
            }
        }

        info!(
            root = %dir.display(),
            files = graph.len(),
            skipped,
            "built stylesheet graph"
        );
        Ok(graph)
    }

    /// Add `path` (a canonical path) to the graph, parsing it and following
    /// its imports the first time it is seen. With a `parent`, a back-link
    /// to the parent is recorded as well.
    pub(crate) fn add_file(&mut self, path: &Path, parent: Option<&Path>) -> Result<()> {
        if self.is_excluded(path) {
            return Ok(());
        }

        if !self.index.contains_key(path) {
            let modified = fs::metadata(path)
                .and_then(|meta| meta.modified())
                .map_err(|e| GraphError::io(path, e))?;
            self.index
                .insert(path.to_path_buf(), Node::new(DateTime::<Utc>::from(modified)));
            self.follow_imports(path)?;
        }

        if let Some(parent) = parent {
            self.link_parent(path, parent);
        }
        Ok(())
    }

    fn follow_imports(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
        let targets = extract_file(path, &source).map_err(|source| GraphError::Syntax {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(file = %path.display(), imports = targets.len(), "parsed imports");

        let search_dirs = self.search_dirs_for(path);
        for target in &targets {
            let Some(resolved) = resolve(target, &search_dirs, &self.extensions) else {
                debug!(file = %path.display(), target = %target, "unresolved import, treating as external");
                self.unresolved += 1;
                continue;
            };
            if self.is_excluded(&resolved) {
                continue;
            }
            let canonical = fs::canonicalize(&resolved).map_err(|e| GraphError::io(&resolved, e))?;
            // The canonical form becomes a node key; keep excluded keys out.
            if self.is_excluded(&canonical) {
                continue;
            }

            let is_new = match self.index.get_mut(path) {
                Some(node) if !node.imports.contains(&canonical) => {
                    node.imports.push(canonical.clone());
                    true
                }
                _ => false,
            };
            if is_new {
                self.add_file(&canonical, Some(path))?;
            }
        }
        Ok(())
    }

    /// The file's own directory, then the graph root, then the configured
    /// load paths, without duplicates.
    fn search_dirs_for(&self, path: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::with_capacity(self.load_paths.len() + 2);
        let candidates = path
            .parent()
            .into_iter()
            .chain(self.dir.as_deref())
            .chain(self.load_paths.iter().map(PathBuf::as_path));
        for dir in candidates {
            if !dirs.iter().any(|d| d == dir) {
                dirs.push(dir.to_path_buf());
            }
        }
        dirs
    }

    /// Record `parent` in the back-links of `path`.
    ///
    /// When a load path equals the parent path exactly, the back-link is
    /// the parent string from that load path onward; otherwise the parent
    /// is stored as given.
    fn link_parent(&mut self, path: &Path, parent: &Path) {
        let parent_str = parent.to_string_lossy();
        let link = match self.load_paths.iter().find(|dir| dir.as_path() == parent) {
            Some(dir) => {
                let dir_str = dir.to_string_lossy();
                match parent_str.find(&*dir_str) {
                    Some(start) => parent_str[start..].to_string(),
                    None => parent_str.to_string(),
                }
            }
            None => parent_str.to_string(),
        };

        if self.is_excluded(Path::new(&link)) {
            return;
        }
        if let Some(node) = self.index.get_mut(path) {
            if !node.imported_by.contains(&link) {
                node.imported_by.push(link);
            }
        }
    }
}

/// Every file under `root` whose extension is one of `extensions`, in
/// file-name order. Symlinks to files are always included; `follow` only
/// decides whether symlinked directories are descended into.
fn discover_sources(root: &Path, extensions: &[String], follow: bool) -> Vec<PathBuf> {
    WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(follow)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry.file_type().is_some_and(|ft| {
                ft.is_file()
                    || (ft.is_symlink() && fs::metadata(entry.path()).is_ok_and(|m| m.is_file()))
            })
        })
        .filter(|entry| has_extension(entry.path(), extensions))
        .map(|entry| entry.into_path())
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e == ext))
}
