//! Graph builder: reconciles raw adjacency into an undirected graph.
//!
//! Source trees are frequently authored with one-directional edges (a skill
//! points at its prerequisite) while the tree is navigated both ways. The
//! builder is the single place the bidirectional invariant is established;
//! every downstream consumer treats the graph as undirected.
//!
//! Construction is a three-pass process:
//! 1. Ingest raw records into an arena indexed by id.
//! 2. Normalize: back-fill edges so adjacency is symmetric.
//! 3. Construct nodes with their normalized edge sets.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};
use trellis_core::{NodeId, RawNode, SkillNode, TreeOptions};

/// A raw record plus its working edge sets during normalization.
struct RawEntry {
    raw: RawNode,
    outgoing: BTreeSet<NodeId>,
    incoming: BTreeSet<NodeId>,
}

/// Builds the node collection for a [`crate::SkillGraph`] from raw records.
///
/// Edge synthesis is symmetric and idempotent (inserting a present id is a
/// no-op), so the final adjacency does not depend on the order records were
/// added, and normalizing twice changes nothing.
pub struct GraphBuilder {
    arena: Vec<RawEntry>,
    id_index: HashMap<NodeId, usize>,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self {
            arena: Vec::new(),
            id_index: HashMap::new(),
        }
    }

    /// Ingests raw records, keeping insertion order.
    ///
    /// Ids are assigned by the data source; a duplicate keeps the first
    /// record seen and the rest are logged and skipped.
    pub fn add_nodes(&mut self, nodes: Vec<RawNode>) {
        for raw in nodes {
            if self.id_index.contains_key(&raw.id) {
                warn!(id = raw.id, "duplicate node id in payload, keeping first record");
                continue;
            }

            let outgoing: BTreeSet<NodeId> = raw.out.iter().copied().collect();
            self.id_index.insert(raw.id, self.arena.len());
            self.arena.push(RawEntry {
                raw,
                outgoing,
                incoming: BTreeSet::new(),
            });
        }
    }

    /// Back-fills edges so that adjacency is symmetric.
    ///
    /// For every node not flagged mastery, each declared edge is mirrored
    /// onto the far endpoint and into the node's own incoming set, and
    /// edges other nodes declared pointing here are mirrored back out.
    /// Edges referencing ids absent from the payload are dropped; pruned
    /// source data is expected, not an error.
    ///
    /// Mastery nodes opt out entirely: their declared edges are
    /// authoritative, stay one-directional, and no other node's declaration
    /// writes into them.
    pub fn normalize_edges(&mut self) {
        for i in 0..self.arena.len() {
            if self.arena[i].raw.is_mastery {
                continue;
            }
            let id = self.arena[i].raw.id;

            let id_index = &self.id_index;
            self.arena[i].outgoing.retain(|out_id| {
                let known = id_index.contains_key(out_id);
                if !known {
                    debug!(from = id, to = *out_id, "dropping edge to unknown node");
                }
                known
            });

            let out_ids: Vec<NodeId> = self.arena[i].outgoing.iter().copied().collect();
            for out_id in out_ids {
                self.arena[i].incoming.insert(out_id);

                let Some(&j) = self.id_index.get(&out_id) else {
                    continue;
                };
                if j != i && !self.arena[j].raw.is_mastery {
                    self.arena[j].outgoing.insert(id);
                    self.arena[j].incoming.insert(id);
                }
            }

            let in_ids: Vec<NodeId> = self.arena[i].incoming.iter().copied().collect();
            for in_id in in_ids {
                self.arena[i].outgoing.insert(in_id);

                let Some(&j) = self.id_index.get(&in_id) else {
                    continue;
                };
                if j != i && !self.arena[j].raw.is_mastery {
                    self.arena[j].incoming.insert(id);
                    self.arena[j].outgoing.insert(id);
                }
            }
        }
    }

    /// Normalizes and constructs the final node collection.
    ///
    /// Nodes whose start classes contain `options.start_class` come up
    /// Active (see [`SkillNode::from_raw`]).
    pub fn build(mut self, options: &TreeOptions) -> BTreeMap<NodeId, SkillNode> {
        self.normalize_edges();

        self.arena
            .into_iter()
            .map(|entry| {
                let node = SkillNode::from_raw(
                    entry.raw,
                    entry.outgoing,
                    entry.incoming,
                    options.start_class,
                );
                (node.id, node)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(id: NodeId, out: &[NodeId]) -> RawNode {
        RawNode {
            id,
            out: out.to_vec(),
            ..Default::default()
        }
    }

    fn mastery(id: NodeId, out: &[NodeId]) -> RawNode {
        RawNode {
            is_mastery: true,
            ..raw(id, out)
        }
    }

    fn build(nodes: Vec<RawNode>) -> BTreeMap<NodeId, SkillNode> {
        let mut builder = GraphBuilder::new();
        builder.add_nodes(nodes);
        builder.build(&TreeOptions::default())
    }

    #[test]
    fn test_backfills_one_directional_edge() {
        // Only node 1 declares the edge; both ends must list each other.
        let nodes = build(vec![raw(1, &[2]), raw(2, &[])]);

        assert!(nodes[&1].outgoing.contains(&2));
        assert!(nodes[&1].incoming.contains(&2));
        assert!(nodes[&2].outgoing.contains(&1));
        assert!(nodes[&2].incoming.contains(&1));
    }

    #[test]
    fn test_incoming_equals_outgoing_after_normalization() {
        let nodes = build(vec![raw(1, &[2, 3]), raw(2, &[3]), raw(3, &[])]);

        for node in nodes.values() {
            assert_eq!(node.outgoing, node.incoming, "node {}", node.id);
        }
    }

    #[test]
    fn test_order_independence() {
        let forward = build(vec![raw(1, &[2]), raw(2, &[3]), raw(3, &[1])]);
        let reversed = build(vec![raw(3, &[1]), raw(2, &[3]), raw(1, &[2])]);

        for id in [1, 2, 3] {
            assert_eq!(forward[&id].outgoing, reversed[&id].outgoing);
            assert_eq!(forward[&id].incoming, reversed[&id].incoming);
        }
    }

    #[test]
    fn test_mastery_keeps_declared_edges_verbatim() {
        // 2 is mastery: its edge to 1 stays one-directional, and 3 pointing
        // at it must not grow its edge sets.
        let nodes = build(vec![raw(1, &[]), mastery(2, &[1]), raw(3, &[2])]);

        let m = &nodes[&2];
        assert_eq!(m.outgoing, [1].into_iter().collect());
        assert!(m.incoming.is_empty());

        // 1 never declared the mastery node, so it does not hear about it.
        assert!(!nodes[&1].outgoing.contains(&2));
        assert!(!nodes[&1].incoming.contains(&2));

        // 3 keeps its own declared edge, mirrored into its incoming set.
        assert!(nodes[&3].outgoing.contains(&2));
        assert!(nodes[&3].incoming.contains(&2));
    }

    #[test]
    fn test_mastery_keeps_dangling_ids() {
        let nodes = build(vec![mastery(2, &[1, 999])]);
        assert_eq!(nodes[&2].outgoing, [1, 999].into_iter().collect());
    }

    #[test]
    fn test_dangling_edges_dropped() {
        let nodes = build(vec![raw(1, &[2, 999]), raw(2, &[])]);

        assert_eq!(nodes[&1].outgoing, [2].into_iter().collect());
        assert_eq!(nodes[&1].incoming, [2].into_iter().collect());
    }

    #[test]
    fn test_normalize_twice_is_a_noop() {
        let mut builder = GraphBuilder::new();
        builder.add_nodes(vec![raw(1, &[2]), raw(2, &[3]), mastery(3, &[1])]);
        builder.normalize_edges();

        // build() normalizes again; the result must match a single pass.
        let twice = builder.build(&TreeOptions::default());
        let once = build(vec![raw(1, &[2]), raw(2, &[3]), mastery(3, &[1])]);

        for id in [1, 2, 3] {
            assert_eq!(twice[&id].outgoing, once[&id].outgoing);
            assert_eq!(twice[&id].incoming, once[&id].incoming);
        }
    }

    #[test]
    fn test_duplicate_id_keeps_first_record() {
        let first = RawNode {
            name: "first".to_string(),
            ..raw(1, &[])
        };
        let second = RawNode {
            name: "second".to_string(),
            ..raw(1, &[])
        };

        let nodes = build(vec![first, second]);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[&1].name, "first");
    }

    #[test]
    fn test_duplicate_declarations_collapse() {
        // Both ends declare the same edge; sets keep it single.
        let nodes = build(vec![raw(1, &[2]), raw(2, &[1])]);

        assert_eq!(nodes[&1].outgoing.len(), 1);
        assert_eq!(nodes[&2].outgoing.len(), 1);
    }
}
