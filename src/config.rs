//! Graph options and the optional `.sassgraph.toml` config file.
//!
//! Example config file:
//!
//! ```toml
//! extensions = ["scss"]
//! exclude = "node_modules|vendor"
//! follow = true
//! load_paths = ["styles", "../shared"]
//! ```
//!
//! Relative `load_paths` are resolved against the directory holding the
//! config file.

use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{GraphError, Result};

/// Name of the config file looked up in the scanned directory.
pub const CONFIG_FILE_NAME: &str = ".sassgraph.toml";

/// Options controlling graph construction.
#[derive(Debug, Clone)]
pub struct GraphOptions {
    /// Recognized stylesheet extensions, without the dot, in probe order.
    pub extensions: Vec<String>,
    /// Paths matching this pattern are left out of the graph.
    pub exclude: Option<Regex>,
    /// Follow symlinked directories during directory scans.
    pub follow: bool,
    /// Extra import search directories, in priority order.
    pub load_paths: Vec<PathBuf>,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["scss".to_string(), "sass".to_string()],
            exclude: None,
            follow: false,
            load_paths: vec![env::current_dir().unwrap_or_else(|_| PathBuf::from("."))],
        }
    }
}

impl GraphOptions {
    /// Set the exclusion pattern.
    pub fn with_exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude = Some(Regex::new(pattern)?);
        Ok(self)
    }
}

/// Contents of a config file. Every field is optional; unset fields keep
/// whatever the options already hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub extensions: Option<Vec<String>>,
    pub exclude: Option<String>,
    pub follow: Option<bool>,
    pub load_paths: Option<Vec<PathBuf>>,
}

impl ConfigFile {
    /// Load and parse a config file. A missing or malformed file is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| GraphError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&text, base).map_err(|message| GraphError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load `dir/.sassgraph.toml` if it exists.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        debug!(config = %path.display(), "loading config file");
        Self::load(&path).map(Some)
    }

    /// Parse config text, resolving relative load paths against `base`.
    pub fn parse(text: &str, base: &Path) -> std::result::Result<Self, String> {
        let mut config: ConfigFile = toml::from_str(text).map_err(|e| e.to_string())?;
        if let Some(paths) = config.load_paths.as_mut() {
            for path in paths.iter_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
        Ok(config)
    }

    /// Overlay the fields set in this file onto `options`.
    pub fn apply(self, mut options: GraphOptions) -> Result<GraphOptions> {
        if let Some(extensions) = self.extensions {
            options.extensions = extensions;
        }
        if let Some(pattern) = self.exclude {
            options = options.with_exclude(&pattern)?;
        }
        if let Some(follow) = self.follow {
            options.follow = follow;
        }
        if let Some(load_paths) = self.load_paths {
            options.load_paths = load_paths;
        }
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let options = GraphOptions::default();
        assert_eq!(options.extensions, vec!["scss", "sass"]);
        assert!(options.exclude.is_none());
        assert!(!options.follow);
        assert_eq!(options.load_paths, vec![env::current_dir().unwrap()]);
    }

    #[test]
    fn test_parse_full_config() {
        let text = r#"
extensions = ["scss"]
exclude = "vendor"
follow = true
load_paths = ["styles", "/abs/lib"]
"#;
        let config = ConfigFile::parse(text, Path::new("/project")).unwrap();
        assert_eq!(config.extensions, Some(vec!["scss".to_string()]));
        assert_eq!(config.exclude.as_deref(), Some("vendor"));
        assert_eq!(config.follow, Some(true));
        assert_eq!(
            config.load_paths,
            Some(vec![PathBuf::from("/project/styles"), PathBuf::from("/abs/lib")])
        );
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(ConfigFile::parse("colour = true", Path::new(".")).is_err());
        assert!(ConfigFile::parse("follow = \"yes\"", Path::new(".")).is_err());
    }

    #[test]
    fn test_apply_overlays_only_set_fields() {
        let config = ConfigFile {
            exclude: Some("^_".to_string()),
            ..ConfigFile::default()
        };
        let options = config.apply(GraphOptions::default()).unwrap();
        assert_eq!(options.extensions, vec!["scss", "sass"]);
        assert!(options.exclude.unwrap().is_match("_x"));
    }

    #[test]
    fn test_apply_invalid_pattern() {
        let config = ConfigFile {
            exclude: Some("(".to_string()),
            ..ConfigFile::default()
        };
        let err = config.apply(GraphOptions::default()).unwrap_err();
        assert!(matches!(err, GraphError::InvalidExclude(_)));
    }

    #[test]
    fn test_discover() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(ConfigFile::discover(tmp.path()).unwrap(), None);

        fs::write(tmp.path().join(CONFIG_FILE_NAME), "follow = true\n").unwrap();
        let config = ConfigFile::discover(tmp.path()).unwrap().unwrap();
        assert_eq!(config.follow, Some(true));

        fs::write(tmp.path().join(CONFIG_FILE_NAME), "follow = [").unwrap();
        let err = ConfigFile::discover(tmp.path()).unwrap_err();
        assert!(matches!(err, GraphError::Config { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigFile::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, GraphError::Config { .. }));
    }
}
