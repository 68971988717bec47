//! The skill node: identity, adjacency, classification tags, and mutable
//! selection state.

use crate::raw::RawNode;
use crate::state::{NodeFlag, NodeState};
use crate::{ClassId, GroupId, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single entry in the skill graph.
///
/// Static attributes come from the data source and never change after
/// construction; only the selection state is mutable, and only the host's
/// interaction layer mutates it. For nodes that are not mastery/skippable,
/// `outgoing` and `incoming` are set-equal once the graph is normalized —
/// the split is a vestige of the directional feed and nothing should rely
/// on it being asymmetric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: NodeId,

    /// Display name, matched against host configuration to identify the
    /// active ascendancy.
    pub name: String,

    pub icon: String,

    /// Spatial group reference, opaque to the model.
    pub group: Option<GroupId>,

    pub orbit: u32,
    pub orbit_index: u32,

    /// Classes starting at this node, in feed order. Empty for ordinary
    /// nodes.
    pub class_start: Vec<ClassId>,

    /// Ascendancy family tag; empty means none.
    pub ascendancy_name: String,

    pub is_ascendancy_start: bool,

    /// Mastery/skippable nodes keep their declared edges verbatim.
    pub is_mastery: bool,

    pub outgoing: BTreeSet<NodeId>,
    pub incoming: BTreeSet<NodeId>,

    state: NodeState,
}

impl SkillNode {
    /// Builds a node from its raw record and normalized edge sets.
    ///
    /// If the record's start classes contain the configured starting class,
    /// the node comes up Active. This seeds the always-selected start node
    /// without special-casing it in the queries.
    pub fn from_raw(
        raw: RawNode,
        outgoing: BTreeSet<NodeId>,
        incoming: BTreeSet<NodeId>,
        start_class: ClassId,
    ) -> Self {
        let mut state = NodeState::EMPTY;
        if raw.class_start.contains(&start_class) {
            state.add(NodeFlag::Active);
        }

        Self {
            id: raw.id,
            name: raw.name,
            icon: raw.icon,
            group: raw.group,
            orbit: raw.orbit,
            orbit_index: raw.orbit_index,
            class_start: raw.class_start,
            ascendancy_name: raw.ascendancy_name,
            is_ascendancy_start: raw.is_ascendancy_start,
            is_mastery: raw.is_mastery,
            outgoing,
            incoming,
            state,
        }
    }

    /// The node's current selection state.
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Returns true if the flag is set.
    pub fn is(&self, flag: NodeFlag) -> bool {
        self.state.is(flag)
    }

    /// Sets a flag. Called by the interaction layer, never by queries.
    pub fn add(&mut self, flag: NodeFlag) {
        self.state.add(flag);
    }

    /// Clears a flag.
    pub fn remove(&mut self, flag: NodeFlag) {
        self.state.remove(flag);
    }

    /// Flips a flag.
    pub fn toggle(&mut self, flag: NodeFlag) {
        self.state.toggle(flag);
    }

    /// Neighbor ids. Adjacency is undirected after normalization, so the
    /// outgoing set is the whole neighborhood.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.outgoing.iter().copied()
    }

    pub fn is_class_start(&self) -> bool {
        !self.class_start.is_empty()
    }

    pub fn is_ascendancy(&self) -> bool {
        !self.ascendancy_name.is_empty()
    }
}
