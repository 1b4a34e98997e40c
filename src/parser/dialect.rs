//! Stylesheet dialect detection.

use std::fmt;
use std::path::Path;

/// The two stylesheet syntaxes the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// SCSS: statements end with `;`, blocks use braces.
    Braced,
    /// Indented Sass: statements end at the end of the line.
    Indented,
}

impl Dialect {
    /// Detect the dialect from a file extension. Only `.sass` selects the
    /// indented syntax; every other extension is treated as SCSS.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("sass") => Dialect::Indented,
            _ => Dialect::Braced,
        }
    }

    /// Get the display name.
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Braced => "SCSS",
            Dialect::Indented => "Sass",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
