//! Stylesheet dependency graph.
//!
//! Provides the graph data model, path resolution, construction from a file
//! or a directory, and ancestor/descendent traversal.

pub mod builder;
pub mod engine;
pub mod resolver;
pub mod types;

pub use engine::Graph;
pub use resolver::resolve;
pub use types::{GraphStats, Node};
