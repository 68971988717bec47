//! Trellis Graph - Skill graph construction and selection queries
//!
//! This crate turns a raw tree payload into a normalized, undirected skill
//! graph and answers queries over per-node selection state for the
//! rendering and interaction layers.
//!
//! # Architecture
//!
//! - [`GraphBuilder`] reconciles the feed's one-directional adjacency into
//!   a symmetric relation over an id-indexed arena.
//! - [`SkillGraph`] owns the node collection plus the per-class-start and
//!   per-ascendancy indices, and exposes the query surface. Derived views
//!   are computed by scanning on demand; nothing is cached.
//!
//! # Example
//!
//! ```no_run
//! use trellis_core::{NodeFlag, TreeOptions};
//! use trellis_graph::SkillGraph;
//!
//! let json = std::fs::read_to_string("SkillTree.json").unwrap();
//! let options = TreeOptions { start_class: 1, ..Default::default() };
//! let mut graph = SkillGraph::from_json(&json, options).unwrap();
//!
//! // The interaction layer flips flags; rendering reads them back.
//! if let Some(node) = graph.node_mut(42) {
//!     node.add(NodeFlag::Hovered);
//! }
//! let hovered = graph.hovered_nodes();
//! ```

mod builder;
mod graph;

pub use builder::GraphBuilder;
pub use graph::{Bounds, GraphStats, SkillGraph};
