//! The node model: [`NodeType`] and [`Node`].

/// Traversal cost of a dense node; every other traversable node costs 1.
pub const DENSE_COST: i32 = 15;

// ---------------------------------------------------------------------------
// NodeType
// ---------------------------------------------------------------------------

/// The six kinds of grid node.
///
/// `Start`, `Target` and `Diversion` are the *special* singleton roles
/// managed by [`GridGraph`](crate::GridGraph); `Block` is impassable,
/// `Dense` is high-cost terrain, and `Empty` is plain ground.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeType {
    Start,
    Target,
    Diversion,
    Block,
    Dense,
    #[default]
    Empty,
}

impl NodeType {
    /// Whether this is one of the singleton roles (Start, Target, Diversion).
    #[inline]
    pub const fn is_special(self) -> bool {
        matches!(self, Self::Start | Self::Target | Self::Diversion)
    }

    /// Whether this is a placeable obstacle kind (Block or Dense).
    #[inline]
    pub const fn is_obstacle(self) -> bool {
        matches!(self, Self::Block | Self::Dense)
    }
}

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// One grid cell.
///
/// `previous` stashes the type a cell held before a special role was placed
/// on it, so the cell can be restored when the role moves away. Search
/// scratch state (accumulated cost, parent) lives in `gridviz-paths`, not
/// here.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub kind: NodeType,
    pub previous: NodeType,
}

impl Node {
    /// Cost of stepping onto this node. Meaningless for `Block` (impassable).
    #[inline]
    pub const fn traversal_cost(self) -> i32 {
        match self.kind {
            NodeType::Dense => DENSE_COST,
            _ => 1,
        }
    }

    /// Reset the node to plain ground.
    #[inline]
    pub fn reset(&mut self) {
        self.kind = NodeType::Empty;
    }
}
