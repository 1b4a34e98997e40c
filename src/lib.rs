//! # sass-graph
//!
//! Dependency graph for Sass and SCSS stylesheets.
//!
//! sass-graph reads the `@import`, `@use` and `@forward` directives of every
//! stylesheet, resolves them to files on disk and answers "which files does
//! X pull in" and "which files need rebuilding when X changes".
//!
//! ## Key Features
//!
//! - **Both syntaxes**: SCSS and the indented `.sass` syntax
//! - **Sass resolution rules**: load paths, `_partial` files, several extensions
//! - **Cycle safe**: circular imports are recorded and traversed once
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sass_graph::{Graph, GraphOptions};
//! use std::path::Path;
//!
//! // Index every stylesheet under a directory
//! let graph = Graph::build_from_directory("styles", &GraphOptions::default())?;
//!
//! // Everything that must be rebuilt when a partial changes
//! for file in graph.ancestors(Path::new("styles/_variables.scss")) {
//!     println!("{}", file.display());
//! }
//! # Ok::<(), sass_graph::GraphError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
pub mod parser;

// Re-exports for convenience
pub use config::{ConfigFile, GraphOptions};
pub use error::{GraphError, Result};
pub use graph::{resolve, Graph, GraphStats, Node};
pub use parser::{parse_imports, Dialect, SyntaxError};

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) -> PathBuf {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        fs::canonicalize(&path).unwrap()
    }

    /// A small project: two entry points sharing partials, one library
    /// module reached through a load path, and a CSS import left external.
    fn project() -> (TempDir, GraphOptions) {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write(
            root,
            "src/app.scss",
            r#"
@use "sass:math";
@import "base/reset", "base/typography";
@import url("https://fonts.example.com/css");
@use "theme" with ($primary: blue);

.app { width: math.div(100%, 3); }
"#,
        );
        write(
            root,
            "src/admin.sass",
            "@import base/typography\n@import theme\n\n.admin\n  color: red\n",
        );
        write(root, "src/base/_reset.scss", "* { margin: 0; }\n");
        write(
            root,
            "src/base/_typography.scss",
            "@import \"../variables\";\nbody { font: $font; }\n",
        );
        write(root, "src/_variables.scss", "$font: sans-serif;\n");
        write(
            root,
            "lib/theme/_index.scss",
            "@forward \"colors\";\n",
        );
        write(root, "lib/theme/_colors.scss", "$primary: red !default;\n");
        write(root, "lib/_theme.scss", "@forward \"theme/index\";\n");

        let options = GraphOptions {
            load_paths: vec![root.join("lib")],
            ..GraphOptions::default()
        };
        (tmp, options)
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn test_build_project_from_directory() {
        let (tmp, options) = project();
        let graph = Graph::build_from_directory(tmp.path().join("src"), &options).unwrap();

        // 5 files under src plus 3 reached through the load path
        assert_eq!(graph.len(), 8);

        let app = fs::canonicalize(tmp.path().join("src/app.scss")).unwrap();
        assert_eq!(
            names(&graph.node(&app).unwrap().imports),
            vec!["_reset.scss", "_typography.scss", "_theme.scss"]
        );

        let admin = fs::canonicalize(tmp.path().join("src/admin.sass")).unwrap();
        assert_eq!(
            names(&graph.node(&admin).unwrap().imports),
            vec!["_typography.scss", "_theme.scss"]
        );
    }

    #[test]
    fn test_ancestors_for_invalidation() {
        let (tmp, options) = project();
        let graph = Graph::build_from_directory(tmp.path().join("src"), &options).unwrap();

        let variables = tmp.path().join("src/_variables.scss");
        let mut affected = names(&graph.ancestors(&variables));
        affected.sort();
        assert_eq!(affected, vec!["_typography.scss", "admin.sass", "app.scss"]);

        let colors = tmp.path().join("lib/theme/_colors.scss");
        let mut affected = names(&graph.ancestors(&colors));
        affected.sort();
        assert_eq!(
            affected,
            vec!["_index.scss", "_theme.scss", "admin.sass", "app.scss"]
        );
    }

    #[test]
    fn test_descendents() {
        let (tmp, options) = project();
        let graph = Graph::build_from_directory(tmp.path().join("src"), &options).unwrap();

        let admin = tmp.path().join("src/admin.sass");
        assert_eq!(
            names(&graph.descendents(&admin)),
            vec![
                "_typography.scss",
                "_variables.scss",
                "_theme.scss",
                "_index.scss",
                "_colors.scss",
            ]
        );
    }

    #[test]
    fn test_build_from_single_file_only_reaches_imports() {
        let (tmp, options) = project();
        let graph = Graph::build_from_file(tmp.path().join("src/admin.sass"), &options).unwrap();

        assert_eq!(graph.len(), 6);
        assert!(graph.dir().is_none());
        let reset = fs::canonicalize(tmp.path().join("src/base/_reset.scss")).unwrap();
        assert!(!graph.contains(&reset));
    }

    #[test]
    fn test_unknown_file_has_no_relatives() {
        let (tmp, options) = project();
        let graph = Graph::build_from_directory(tmp.path().join("src"), &options).unwrap();

        assert!(graph.ancestors(&tmp.path().join("src/missing.scss")).is_empty());
        assert!(graph.descendents(Path::new("relative/nowhere.scss")).is_empty());
    }

    #[test]
    fn test_index_serializes_to_json() {
        let (tmp, options) = project();
        let graph = Graph::build_from_file(tmp.path().join("src/admin.sass"), &options).unwrap();

        let json = serde_json::to_value(graph.index()).unwrap();
        let admin = fs::canonicalize(tmp.path().join("src/admin.sass")).unwrap();
        let key = admin.to_string_lossy().to_string();
        let entry = &json[key.as_str()];
        assert_eq!(entry["imports"].as_array().unwrap().len(), 2);
        assert!(entry["importedBy"].as_array().unwrap().is_empty());
        assert!(entry["modified"].is_string());

        let whole = serde_json::to_value(&graph).unwrap();
        assert_eq!(&whole["index"], &json);
        assert_eq!(whole["follow"], false);
    }

    #[test]
    fn test_cycles_in_project() {
        let tmp = TempDir::new().unwrap();
        write(tmp.path(), "a.scss", "@import \"b\";");
        write(tmp.path(), "b.scss", "@import \"c\";");
        write(tmp.path(), "c.scss", "@import \"a\";");
        write(tmp.path(), "d.scss", "@import \"a\";");

        let graph = Graph::build_from_directory(tmp.path(), &GraphOptions::default()).unwrap();
        let cycles = graph.cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(names(&cycles[0]), vec!["a.scss", "b.scss", "c.scss"]);
        assert_eq!(graph.stats().cycle_count, 1);
    }

    #[test]
    fn test_parse_imports_reexport() {
        assert_eq!(
            parse_imports("@import \"a\", \"b\";", Dialect::Braced).unwrap(),
            vec!["a", "b"]
        );
        assert!(matches!(
            parse_imports("@import \"a\" @import \"b\";", Dialect::Braced),
            Err(SyntaxError { line: 1 })
        ));
    }
}
