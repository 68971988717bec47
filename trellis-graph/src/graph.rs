//! The skill graph aggregate.
//!
//! Owns the node collection and the classification indices, and answers
//! selection queries by re-scanning node state on demand. Trees are small
//! (hundreds of nodes) and queries are off the hot path, so every query is
//! a full scan with no cached derived views.

use crate::builder::GraphBuilder;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;
use trellis_core::{
    AscendancyId, ClassId, NodeFlag, NodeId, NodeState, SkillNode, TreeConstants, TreeError,
    TreeOptions, TreePayload,
};

/// Pixel bounds of the tree as authored by the data source.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

/// The normalized skill graph.
///
/// Construction consumes the raw payload once; afterwards the graph is
/// self-contained. The classification indices are keyed on static node
/// attributes, so state mutation through [`SkillGraph::node_mut`] can never
/// invalidate them.
///
/// Single-threaded by contract: mutation goes through `&mut self`, and a
/// query issued after a mutation on the same thread observes it. Hosts
/// embedding the graph in a multi-threaded environment synchronize
/// externally.
#[derive(Debug, Serialize, Deserialize)]
pub struct SkillGraph {
    nodes: BTreeMap<NodeId, SkillNode>,

    /// Ids of nodes with at least one start class.
    class_start_nodes: BTreeSet<NodeId>,

    /// Ids of nodes belonging to an ascendancy family.
    ascendancy_nodes: BTreeSet<NodeId>,

    options: TreeOptions,

    bounds: Bounds,
    width: u32,
    height: u32,
    max_zoom: f32,

    // Pass-through payload sections for the rendering layer.
    root: Value,
    groups: BTreeMap<String, Value>,
    character_data: BTreeMap<String, Value>,
    extra_images: BTreeMap<String, Value>,
    assets: BTreeMap<String, Value>,
    image_root: String,
    image_zoom_levels: Vec<f32>,
    skill_sprites: BTreeMap<String, Value>,
    constants: TreeConstants,
}

impl SkillGraph {
    /// Builds a graph from a raw payload and host configuration.
    ///
    /// Never fails: dangling edges are dropped and duplicate ids keep the
    /// first record, so a partially malformed payload still yields a usable
    /// graph.
    pub fn from_payload(payload: TreePayload, options: TreeOptions) -> Self {
        let TreePayload {
            nodes,
            root,
            groups,
            character_data,
            extra_images,
            min_x,
            min_y,
            max_x,
            max_y,
            assets,
            image_root,
            image_zoom_levels,
            skill_sprites,
            constants,
        } = payload;

        let mut builder = GraphBuilder::new();
        builder.add_nodes(nodes);
        let nodes = builder.build(&options);

        let mut class_start_nodes = BTreeSet::new();
        let mut ascendancy_nodes = BTreeSet::new();
        for node in nodes.values() {
            if node.is_class_start() {
                class_start_nodes.insert(node.id);
            }
            if node.is_ascendancy() {
                ascendancy_nodes.insert(node.id);
            }
        }

        debug!(
            nodes = nodes.len(),
            class_starts = class_start_nodes.len(),
            ascendancy = ascendancy_nodes.len(),
            "skill graph constructed"
        );

        Self {
            nodes,
            class_start_nodes,
            ascendancy_nodes,
            options,
            bounds: Bounds {
                min_x,
                min_y,
                max_x,
                max_y,
            },
            width: min_x.unsigned_abs() + max_x.unsigned_abs(),
            height: min_y.unsigned_abs() + max_y.unsigned_abs(),
            max_zoom: image_zoom_levels.last().copied().unwrap_or(1.0),
            root,
            groups,
            character_data,
            extra_images,
            assets,
            image_root,
            image_zoom_levels,
            skill_sprites,
            constants,
        }
    }

    /// Parses a JSON payload and builds a graph from it.
    pub fn from_json(payload: &str, options: TreeOptions) -> Result<Self, TreeError> {
        Ok(Self::from_payload(TreePayload::from_json(payload)?, options))
    }

    /// Gets a node by id.
    pub fn node(&self, id: NodeId) -> Option<&SkillNode> {
        self.nodes.get(&id)
    }

    /// Gets a node mutably. This is the interaction layer's entry point for
    /// state changes; static attributes and indices are unaffected by what
    /// it does with the node's flags.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SkillNode> {
        self.nodes.get_mut(&id)
    }

    /// Iterates over all nodes in ascending id order.
    pub fn nodes(&self) -> impl Iterator<Item = &SkillNode> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed adjacency entries. Symmetric pairs count twice.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.outgoing.len()).sum()
    }

    /// The class id of the Active class-start node, or 0 when none is.
    ///
    /// At most one class-start node is expected to be Active at a time;
    /// enforcing that is the host's job. If several are Active anyway, the
    /// lowest node id wins.
    pub fn start_class(&self) -> ClassId {
        self.class_start_nodes
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .find(|node| node.is(NodeFlag::Active))
            .and_then(|node| node.class_start.first().copied())
            .unwrap_or(0)
    }

    /// The configured index of the Active ascendancy, or 0 when none is.
    ///
    /// Scans for an ascendancy start node that is Active and matches its
    /// display name against the configuration table. An unmatched name is
    /// treated as "no ascendancy selected", not an error.
    pub fn ascendancy_class(&self) -> AscendancyId {
        self.ascendancy_nodes
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|node| node.is_ascendancy_start && node.is(NodeFlag::Active))
            .find_map(|node| self.options.ascendancy_id_by_name(&node.name))
            .unwrap_or(0)
    }

    /// All Active nodes, keyed by id.
    pub fn skilled_nodes(&self) -> BTreeMap<NodeId, &SkillNode> {
        self.nodes_with_state(NodeFlag::Active.into())
    }

    /// All nodes that are Hovered or Pathing (union of the two flags).
    pub fn hovered_nodes(&self) -> BTreeMap<NodeId, &SkillNode> {
        self.nodes_with_state(NodeFlag::Hovered | NodeFlag::Pathing)
    }

    /// Nodes whose state shares at least one flag with `filter`.
    ///
    /// The empty filter is the "no filter" sentinel and matches every node,
    /// not just nodes with no flags set.
    pub fn nodes_with_state(&self, filter: NodeState) -> BTreeMap<NodeId, &SkillNode> {
        self.nodes
            .iter()
            .filter(|(_, node)| filter.is_empty() || node.state().intersects(filter))
            .map(|(id, node)| (*id, node))
            .collect()
    }

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    pub fn root(&self) -> &Value {
        &self.root
    }

    pub fn groups(&self) -> &BTreeMap<String, Value> {
        &self.groups
    }

    pub fn character_data(&self) -> &BTreeMap<String, Value> {
        &self.character_data
    }

    pub fn extra_images(&self) -> &BTreeMap<String, Value> {
        &self.extra_images
    }

    pub fn assets(&self) -> &BTreeMap<String, Value> {
        &self.assets
    }

    pub fn image_root(&self) -> &str {
        &self.image_root
    }

    pub fn image_zoom_levels(&self) -> &[f32] {
        &self.image_zoom_levels
    }

    pub fn skill_sprites(&self) -> &BTreeMap<String, Value> {
        &self.skill_sprites
    }

    pub fn constants(&self) -> &TreeConstants {
        &self.constants
    }
}

/// Graph statistics for the host's diagnostics.
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub class_start_count: usize,
    pub ascendancy_count: usize,
}

impl SkillGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            class_start_count: self.class_start_nodes.len(),
            ascendancy_count: self.ascendancy_nodes.len(),
        }
    }
}
