//! Layout generation over a [`GridGraph`].
//!
//! Both generators leave the special Start/Target/Diversion nodes untouched
//! and operate purely through the graph's painting operations.

use std::collections::HashSet;

use gridviz_core::{GridGraph, NodeType, Point};
use rand::Rng;

/// Layout generator owning its randomness source.
pub struct LayoutGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> LayoutGen<R> {
    /// Create a new generator with the given RNG.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a recursive-division maze out of `obstacle` cells
    /// (Block or Dense).
    ///
    /// Clears all prior obstacles, stamps a full perimeter border, then
    /// recursively divides the interior with single-gap walls. Wall offsets
    /// adjacent to an earlier gap on either boundary are excluded so a new
    /// wall never seals a breach. Full connectivity between Start and
    /// Target is not guaranteed.
    ///
    /// Returns the gap positions, one per placed wall.
    pub fn maze(&mut self, graph: &mut GridGraph, obstacle: NodeType) -> Vec<Point> {
        debug_assert!(obstacle.is_obstacle());
        graph.clear_by_type(NodeType::Block);
        graph.clear_by_type(NodeType::Dense);

        let cols = graph.cols();
        let rows = graph.rows();
        for x in 0..cols {
            stamp(graph, Point::new(x, 0), obstacle);
            stamp(graph, Point::new(x, rows - 1), obstacle);
        }
        for y in 0..rows {
            stamp(graph, Point::new(0, y), obstacle);
            stamp(graph, Point::new(cols - 1, y), obstacle);
        }

        let mut gaps = HashSet::new();
        self.divide(graph, 1, 1, cols - 2, rows - 2, true, &mut gaps, obstacle);

        log::debug!(
            "recursive division on {cols}x{rows} grid: {} walls placed",
            gaps.len()
        );
        gaps.into_iter().collect()
    }

    /// Divide the inclusive region `[c0, c1] × [r0, r1]` with one wall and
    /// one gap, then recurse into both halves.
    #[allow(clippy::too_many_arguments)]
    fn divide(
        &mut self,
        graph: &mut GridGraph,
        c0: i32,
        r0: i32,
        c1: i32,
        r1: i32,
        prev_vertical: bool,
        gaps: &mut HashSet<Point>,
        obstacle: NodeType,
    ) {
        // Degenerate span, or a 2x2 region nothing fits into.
        if c1 - c0 <= 0 || r1 - r0 <= 0 || (c1 - c0 == 1 && r1 - r0 == 1) {
            return;
        }

        let vertical = if c1 - c0 == r1 - r0 {
            prev_vertical
        } else {
            c1 - c0 > r1 - r0
        };

        if vertical {
            let candidates: Vec<i32> = (c0 + 1..c1)
                .filter(|&x| {
                    !gaps.contains(&Point::new(x, r0 - 1)) && !gaps.contains(&Point::new(x, r1 + 1))
                })
                .collect();
            if candidates.is_empty() {
                return;
            }
            let wall_x = candidates[self.rng.random_range(0..candidates.len())];
            let gap_y = self.rng.random_range(r0..=r1);

            for y in r0..=r1 {
                stamp(graph, Point::new(wall_x, y), obstacle);
            }
            let gap = Point::new(wall_x, gap_y);
            gaps.insert(gap);
            graph.clear_cell(gap);

            self.divide(graph, c0, r0, wall_x - 1, r1, vertical, gaps, obstacle);
            self.divide(graph, wall_x + 1, r0, c1, r1, vertical, gaps, obstacle);
        } else {
            let candidates: Vec<i32> = (r0 + 1..r1)
                .filter(|&y| {
                    !gaps.contains(&Point::new(c0 - 1, y)) && !gaps.contains(&Point::new(c1 + 1, y))
                })
                .collect();
            if candidates.is_empty() {
                return;
            }
            let wall_y = candidates[self.rng.random_range(0..candidates.len())];
            let gap_x = self.rng.random_range(c0..=c1);

            for x in c0..=c1 {
                stamp(graph, Point::new(x, wall_y), obstacle);
            }
            let gap = Point::new(gap_x, wall_y);
            gaps.insert(gap);
            graph.clear_cell(gap);

            self.divide(graph, c0, r0, c1, wall_y - 1, vertical, gaps, obstacle);
            self.divide(graph, c0, wall_y + 1, c1, r1, vertical, gaps, obstacle);
        }
    }

    /// Randomize the whole layout: every non-special node becomes a block
    /// with probability 1/10, dense terrain with probability 1/10, and is
    /// reset to plain ground otherwise.
    ///
    /// Returns how many (blocks, dense) cells were placed.
    pub fn random_layout(&mut self, graph: &mut GridGraph) -> (usize, usize) {
        let mut blocks = 0;
        let mut dense = 0;
        for p in graph.points() {
            if graph.kind(p).is_special() {
                continue;
            }
            match self.rng.random_range(0..10) {
                0 => {
                    graph.make_block(p);
                    blocks += 1;
                }
                1 => {
                    graph.make_dense(p);
                    dense += 1;
                }
                _ => graph.clear_cell(p),
            }
        }
        log::debug!("random layout: {blocks} blocks, {dense} dense");
        (blocks, dense)
    }
}

fn stamp(graph: &mut GridGraph, p: Point, obstacle: NodeType) {
    match obstacle {
        NodeType::Block => graph.make_block(p),
        NodeType::Dense => graph.make_dense(p),
        _ => {}
    }
}
