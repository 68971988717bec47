//! Trellis Core - Skill tree data model
//!
//! This crate defines the data model shared across Trellis: the raw payload
//! shape supplied by the data source, the node type with its selection
//! state, and the host configuration consumed at construction time.
//!
//! Identity, adjacency, and classification fields are the only ones the
//! model interprets; geometry and asset fields are passed through untouched
//! to the rendering layer.
//!
//! # Example
//!
//! ```
//! use trellis_core::{NodeFlag, RawNode, SkillNode};
//! use std::collections::BTreeSet;
//!
//! let raw = RawNode { id: 7, class_start: vec![1], ..Default::default() };
//! let mut node = SkillNode::from_raw(raw, BTreeSet::new(), BTreeSet::new(), 1);
//!
//! assert!(node.is(NodeFlag::Active));
//! node.toggle(NodeFlag::Hovered);
//! ```

mod error;
mod node;
mod options;
mod raw;
mod state;

pub use error::TreeError;
pub use node::SkillNode;
pub use options::{AscendancyInfo, AscendancyRoot, TreeOptions};
pub use raw::{RawNode, TreeConstants, TreePayload};
pub use state::{NodeFlag, NodeState};

/// Node identifier, assigned by the data source and never generated here.
pub type NodeId = u32;

/// Character class identifier. 0 is the "none" sentinel in query results.
pub type ClassId = u32;

/// Ascendancy identifier within the host's configuration table.
pub type AscendancyId = u32;

/// Spatial group identifier, opaque to the model.
pub type GroupId = u32;
