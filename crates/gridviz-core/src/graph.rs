//! The editable grid graph: [`GridGraph`].
//!
//! A fixed-size arena of [`Node`]s in row-major order, with 4-way cardinal
//! adjacency and singleton management for the Start/Target/Diversion roles.
//! Every editing operation is total: there is no failure path, out-of-range
//! or ineligible requests are ignored.

use crate::geom::Point;
use crate::node::{Node, NodeType};

/// Cardinal adjacency offsets, in the fixed order the search algorithms
/// observe: left, right, up, down.
const ADJACENT: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

/// A fixed-size 2D grid of nodes.
///
/// Created once; nodes are retyped repeatedly by editing operations but
/// never added or removed. After construction there is always exactly one
/// Start and one Target, and at most one Diversion.
#[derive(Debug, Clone)]
pub struct GridGraph {
    cols: i32,
    rows: i32,
    nodes: Vec<Node>,
    start: Point,
    target: Point,
    diversion: Option<Point>,
}

impl GridGraph {
    /// Build a `cols` × `rows` grid of empty nodes, then place the default
    /// Start at `(cols/6, rows/2)` and Target at `((cols/6)*5, rows/2)`.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is not positive or `cols` is less than 2 (a single
    /// column cannot hold distinct Start and Target nodes).
    pub fn new(cols: i32, rows: i32) -> Self {
        assert!(cols >= 2 && rows > 0, "grid must be at least 2x1");
        let mut graph = Self {
            cols,
            rows,
            nodes: vec![Node::default(); (cols * rows) as usize],
            start: Point::ZERO,
            target: Point::ZERO,
            diversion: None,
        };
        graph.place_defaults();
        graph
    }

    fn place_defaults(&mut self) {
        let start = Point::new(self.cols / 6, self.rows / 2);
        let mut target = Point::new((self.cols / 6) * 5, self.rows / 2);
        // Boards narrower than 6 columns collapse both formulas onto the
        // same cell; keep the roles distinct.
        if target == start {
            target.x = self.cols - 1;
        }
        let si = self.idx(start);
        self.nodes[si].kind = NodeType::Start;
        let ti = self.idx(target);
        self.nodes[ti].kind = NodeType::Target;
        self.start = start;
        self.target = target;
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Whether the point lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.cols && p.y >= 0 && p.y < self.rows
    }

    #[inline]
    fn idx(&self, p: Point) -> usize {
        (p.y * self.cols + p.x) as usize
    }

    /// The node at `p`.
    ///
    /// # Panics
    ///
    /// Panics if `p` is outside the grid.
    #[inline]
    pub fn node(&self, p: Point) -> Node {
        assert!(self.contains(p), "point {p} outside {}x{} grid", self.cols, self.rows);
        self.nodes[self.idx(p)]
    }

    /// The type of the node at `p`.
    #[inline]
    pub fn kind(&self, p: Point) -> NodeType {
        self.node(p).kind
    }

    /// Cost of stepping onto the node at `p` (1, or 15 for dense terrain).
    #[inline]
    pub fn cost(&self, p: Point) -> i32 {
        self.node(p).traversal_cost()
    }

    /// In-bounds cardinal neighbours of `p`, in left, right, up, down order.
    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        ADJACENT.iter().map(move |&d| p + d).filter(|&n| self.contains(n))
    }

    /// All grid positions in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let cols = self.cols;
        let rows = self.rows;
        (0..rows).flat_map(move |y| (0..cols).map(move |x| Point::new(x, y)))
    }

    /// Current Start position.
    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    /// Current Target position.
    #[inline]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Current Diversion position, if one is placed.
    #[inline]
    pub fn diversion(&self) -> Option<Point> {
        self.diversion
    }

    // -----------------------------------------------------------------------
    // Cell painting
    // -----------------------------------------------------------------------

    /// Turn the node at `p` into a block. Ignored for special nodes.
    pub fn make_block(&mut self, p: Point) {
        self.paint(p, NodeType::Block);
    }

    /// Turn the node at `p` into dense terrain. Ignored for special nodes.
    pub fn make_dense(&mut self, p: Point) {
        self.paint(p, NodeType::Dense);
    }

    /// Reset the node at `p` to plain ground. Ignored for special nodes.
    pub fn clear_cell(&mut self, p: Point) {
        self.paint(p, NodeType::Empty);
    }

    fn paint(&mut self, p: Point, kind: NodeType) {
        if !self.contains(p) {
            return;
        }
        let i = self.idx(p);
        if !self.nodes[i].kind.is_special() {
            self.nodes[i].kind = kind;
        }
    }

    // -----------------------------------------------------------------------
    // Singleton roles
    // -----------------------------------------------------------------------

    /// Move the Start role to `p`.
    ///
    /// The previous Start is restored to its stashed type (Block/Dense if it
    /// displaced one, Empty otherwise); the node at `p` stashes its current
    /// type before taking the role. Ignored if `p` already holds a special
    /// role or lies outside the grid.
    pub fn set_start(&mut self, p: Point) {
        if !self.role_eligible(p) {
            return;
        }
        self.displace(self.start);
        self.assume_role(p, NodeType::Start);
        self.start = p;
    }

    /// Move the Target role to `p`. Same displacement rules as [`set_start`].
    ///
    /// [`set_start`]: GridGraph::set_start
    pub fn set_target(&mut self, p: Point) {
        if !self.role_eligible(p) {
            return;
        }
        self.displace(self.target);
        self.assume_role(p, NodeType::Target);
        self.target = p;
    }

    /// Place or move the Diversion role to `p`. Same displacement rules as
    /// [`set_start`](GridGraph::set_start).
    pub fn set_diversion(&mut self, p: Point) {
        if !self.role_eligible(p) {
            return;
        }
        if let Some(old) = self.diversion {
            self.displace(old);
        }
        self.assume_role(p, NodeType::Diversion);
        self.diversion = Some(p);
    }

    /// Remove the Diversion role, resetting its node to plain ground.
    pub fn remove_diversion(&mut self) {
        if let Some(p) = self.diversion.take() {
            let i = self.idx(p);
            self.nodes[i].reset();
            self.nodes[i].previous = NodeType::Empty;
        }
    }

    fn role_eligible(&self, p: Point) -> bool {
        self.contains(p) && !self.kind(p).is_special()
    }

    /// Restore a node that is losing its special role.
    fn displace(&mut self, p: Point) {
        let i = self.idx(p);
        self.nodes[i].kind = match self.nodes[i].previous {
            NodeType::Block => NodeType::Block,
            NodeType::Dense => NodeType::Dense,
            _ => NodeType::Empty,
        };
        self.nodes[i].previous = NodeType::Empty;
    }

    fn assume_role(&mut self, p: Point, role: NodeType) {
        let i = self.idx(p);
        self.nodes[i].previous = self.nodes[i].kind;
        self.nodes[i].kind = role;
    }

    // -----------------------------------------------------------------------
    // Clearing
    // -----------------------------------------------------------------------

    /// Reset every node of type `kind` to Empty.
    ///
    /// Any special node whose stashed previous type equals `kind` has the
    /// stash cleared too, so a later displacement cannot restore a type that
    /// no longer exists on the grid.
    pub fn clear_by_type(&mut self, kind: NodeType) {
        for node in &mut self.nodes {
            if node.kind == kind {
                node.reset();
            } else if node.kind.is_special() && node.previous == kind {
                node.previous = NodeType::Empty;
            }
        }
    }

    /// Reset the entire grid: every node to Empty, the diversion removed,
    /// and the default Start/Target positions re-established.
    pub fn reset_all(&mut self) {
        for node in &mut self.nodes {
            *node = Node::default();
        }
        self.diversion = None;
        self.place_defaults();
    }
}
