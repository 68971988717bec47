//! Selection state for skill nodes.
//!
//! Every node carries a small set of orthogonal flags describing how the
//! user is currently interacting with it. Flags are independent and
//! composable: a node can be Active and Hovered at the same time. The
//! interaction layer mutates flags; queries only read them.

use serde::{Deserialize, Serialize};
use std::ops::BitOr;

/// A single selection flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum NodeFlag {
    /// Allocated by the player.
    Active = 0b0001,
    /// Under the cursor.
    Hovered = 0b0010,
    /// On a proposed but not yet committed path. Grouped with Hovered
    /// for display, but a distinct flag.
    Pathing = 0b0100,
    /// Emphasized by search or build comparison.
    Highlighted = 0b1000,
}

impl NodeFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeFlag::Active => "active",
            NodeFlag::Hovered => "hovered",
            NodeFlag::Pathing => "pathing",
            NodeFlag::Highlighted => "highlighted",
        }
    }
}

impl std::fmt::Display for NodeFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A set of [`NodeFlag`]s backed by a bit mask.
///
/// The empty set doubles as the "no filter" sentinel in queries: filtering
/// by `NodeState::EMPTY` matches every node rather than only nodes with no
/// flags set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeState(u8);

impl NodeState {
    /// The empty set. No flags, matches everything when used as a filter.
    pub const EMPTY: NodeState = NodeState(0);

    /// Sets a flag. Setting an already-set flag is a no-op.
    pub fn add(&mut self, flag: NodeFlag) {
        self.0 |= flag as u8;
    }

    /// Clears a flag.
    pub fn remove(&mut self, flag: NodeFlag) {
        self.0 &= !(flag as u8);
    }

    /// Flips a flag.
    pub fn toggle(&mut self, flag: NodeFlag) {
        self.0 ^= flag as u8;
    }

    /// Returns true if the flag is set.
    pub fn is(&self, flag: NodeFlag) -> bool {
        self.0 & flag as u8 != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Any-of match: true if this set shares at least one flag with `other`.
    pub fn intersects(&self, other: NodeState) -> bool {
        self.0 & other.0 != 0
    }

    /// All-of match: true if every flag in `other` is set here.
    pub fn contains(&self, other: NodeState) -> bool {
        self.0 & other.0 == other.0
    }
}

impl From<NodeFlag> for NodeState {
    fn from(flag: NodeFlag) -> Self {
        NodeState(flag as u8)
    }
}

impl BitOr for NodeFlag {
    type Output = NodeState;

    fn bitor(self, rhs: NodeFlag) -> NodeState {
        NodeState(self as u8 | rhs as u8)
    }
}

impl BitOr<NodeFlag> for NodeState {
    type Output = NodeState;

    fn bitor(self, rhs: NodeFlag) -> NodeState {
        NodeState(self.0 | rhs as u8)
    }
}

impl BitOr for NodeState {
    type Output = NodeState;

    fn bitor(self, rhs: NodeState) -> NodeState {
        NodeState(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_remove() {
        let mut state = NodeState::EMPTY;
        assert!(state.is_empty());

        state.add(NodeFlag::Active);
        assert!(state.is(NodeFlag::Active));
        assert!(!state.is(NodeFlag::Hovered));

        state.remove(NodeFlag::Active);
        assert!(state.is_empty());
    }

    #[test]
    fn test_flags_compose() {
        let mut state = NodeState::EMPTY;
        state.add(NodeFlag::Active);
        state.add(NodeFlag::Hovered);

        assert!(state.is(NodeFlag::Active));
        assert!(state.is(NodeFlag::Hovered));

        // Removing one flag leaves the other untouched
        state.remove(NodeFlag::Hovered);
        assert!(state.is(NodeFlag::Active));
    }

    #[test]
    fn test_toggle() {
        let mut state = NodeState::EMPTY;
        state.toggle(NodeFlag::Pathing);
        assert!(state.is(NodeFlag::Pathing));
        state.toggle(NodeFlag::Pathing);
        assert!(!state.is(NodeFlag::Pathing));
    }

    #[test]
    fn test_intersects_is_any_of() {
        let mut state = NodeState::EMPTY;
        state.add(NodeFlag::Pathing);

        let filter = NodeFlag::Hovered | NodeFlag::Pathing;
        assert!(state.intersects(filter));
        assert!(!state.intersects(NodeFlag::Active.into()));
    }

    #[test]
    fn test_contains_is_all_of() {
        let mut state = NodeState::EMPTY;
        state.add(NodeFlag::Hovered);

        let filter = NodeFlag::Hovered | NodeFlag::Pathing;
        assert!(!state.contains(filter));

        state.add(NodeFlag::Pathing);
        assert!(state.contains(filter));
    }

    #[test]
    fn test_empty_filter_never_intersects() {
        let mut state = NodeState::EMPTY;
        state.add(NodeFlag::Active);

        // "Match any" against the empty set is vacuously false; callers
        // treat the empty filter as a sentinel before reaching this point.
        assert!(!state.intersects(NodeState::EMPTY));
    }
}
