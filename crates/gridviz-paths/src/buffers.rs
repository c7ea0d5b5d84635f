use std::collections::VecDeque;

use gridviz_core::{Algorithm, GridGraph, Point};

use crate::trace::SearchOutcome;

// ---------------------------------------------------------------------------
// Internal scratch node for all three searches
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct ScratchNode {
    /// Accumulated cost from the source.
    pub(crate) g: i32,
    /// Flat index of the predecessor, or `usize::MAX` at the source.
    pub(crate) parent: usize,
    /// First-seen rank within the current run, used for tie-breaking.
    pub(crate) seen: u32,
    /// Run this node's state belongs to; other generations are stale.
    pub(crate) generation: u32,
    /// In the frontier (true) or settled (false), for the current generation.
    pub(crate) open: bool,
}

impl Default for ScratchNode {
    fn default() -> Self {
        Self {
            g: 0,
            parent: usize::MAX,
            seen: 0,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the scratch array, ordered for the weighted frontiers.
///
/// The `BinaryHeap` is a max-heap, so comparisons are reversed: the smallest
/// `(f, h, seen)` pops first. Dijkstra leaves `h` at zero, collapsing the
/// key to `(g, seen)`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub(crate) struct OpenRef {
    pub(crate) f: i32,
    pub(crate) h: i32,
    pub(crate) seen: u32,
    pub(crate) idx: usize,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other
            .f
            .cmp(&self.f)
            .then(other.h.cmp(&self.h))
            .then(other.seen.cmp(&self.seen))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// SearchBuffers
// ---------------------------------------------------------------------------

/// Central coordinator for searches over a grid graph.
///
/// Owns the per-cell scratch state (costs, parents, frontier flags) shared
/// by Dijkstra, A* and BFS. A generation counter bumped on every run lazily
/// invalidates the whole array, so no cost or parent value can ever leak
/// from one run into the next.
pub struct SearchBuffers {
    pub(crate) cols: usize,
    pub(crate) nodes: Vec<ScratchNode>,
    pub(crate) generation: u32,
    pub(crate) bfs_queue: VecDeque<usize>,
}

impl SearchBuffers {
    /// Create an empty coordinator; scratch arrays are sized on first use.
    pub fn new() -> Self {
        Self {
            cols: 0,
            nodes: Vec::new(),
            generation: 0,
            bfs_queue: VecDeque::new(),
        }
    }

    /// Size the scratch array to the graph and start a fresh generation.
    pub(crate) fn begin_run(&mut self, graph: &GridGraph) -> u32 {
        let len = (graph.cols() * graph.rows()) as usize;
        self.cols = graph.cols() as usize;
        if self.nodes.len() < len {
            self.nodes.clear();
            self.nodes.resize(len, ScratchNode::default());
            self.generation = 0;
        }
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    #[inline]
    pub(crate) fn idx(&self, p: Point) -> usize {
        p.y as usize * self.cols + p.x as usize
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.cols) as i32, (idx / self.cols) as i32)
    }

    /// Run one search leg from `source` to `dest`.
    ///
    /// Never fails: an unreachable destination yields `found == false` with
    /// the partial trace generated up to frontier exhaustion.
    pub fn run(
        &mut self,
        graph: &GridGraph,
        algorithm: Algorithm,
        source: Point,
        dest: Point,
    ) -> SearchOutcome {
        let mut trace = Vec::new();
        let found = match algorithm {
            Algorithm::Dijkstra => self.dijkstra(graph, source, dest, &mut trace),
            Algorithm::AStar => self.astar(graph, source, dest, &mut trace),
            Algorithm::Bfs => self.bfs(graph, source, dest, &mut trace),
        };
        let path = if found {
            self.reconstruct(graph, source, dest)
        } else {
            Vec::new()
        };
        SearchOutcome { found, trace, path }
    }

    /// Walk parent links from `dest` back to `source`, collecting every
    /// non-special node, then reverse into source→destination order.
    ///
    /// Only valid immediately after a successful run with these endpoints.
    pub(crate) fn reconstruct(
        &self,
        graph: &GridGraph,
        source: Point,
        dest: Point,
    ) -> Vec<Point> {
        let si = self.idx(source);
        let mut path = Vec::new();
        let mut ci = self.idx(dest);
        while ci != si {
            let p = self.point(ci);
            if !graph.kind(p).is_special() {
                path.push(p);
            }
            let parent = self.nodes[ci].parent;
            if parent == usize::MAX {
                break;
            }
            ci = parent;
        }
        path.reverse();
        path
    }
}

impl Default for SearchBuffers {
    fn default() -> Self {
        Self::new()
    }
}
