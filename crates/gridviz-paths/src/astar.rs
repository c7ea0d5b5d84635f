use std::collections::BinaryHeap;

use gridviz_core::{GridGraph, NodeType, Point};

use crate::SearchBuffers;
use crate::buffers::OpenRef;
use crate::distance::manhattan;
use crate::trace::{Step, StepKind};

impl SearchBuffers {
    /// A* search from `source` to `dest` with a Manhattan-distance
    /// heuristic.
    ///
    /// Same skeleton as [`dijkstra`](SearchBuffers::dijkstra); the frontier
    /// ranks by `g + h`, breaking ties on the smaller `h` and then on
    /// first-seen order.
    pub(crate) fn astar(
        &mut self,
        graph: &GridGraph,
        source: Point,
        dest: Point,
        trace: &mut Vec<Step>,
    ) -> bool {
        let cur_gen = self.begin_run(graph);
        let start_idx = self.idx(source);
        let goal_idx = self.idx(dest);

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = usize::MAX;
            node.seen = 0;
            node.generation = cur_gen;
            node.open = true;
        }
        let mut next_seen = 1u32;

        let h0 = manhattan(source, dest);
        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        open.push(OpenRef {
            f: h0,
            h: h0,
            seen: 0,
            idx: start_idx,
        });

        while let Some(current) = open.pop() {
            let ci = current.idx;

            // Skip stale entries.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            self.nodes[ci].open = false;
            let current_g = self.nodes[ci].g;
            let cp = self.point(ci);
            trace.push(Step {
                pos: cp,
                kind: StepKind::Closed,
            });

            if ci == goal_idx {
                return true;
            }

            for np in graph.neighbors(cp) {
                if graph.kind(np) == NodeType::Block {
                    continue;
                }
                let ni = self.idx(np);
                if self.nodes[ni].generation == cur_gen && !self.nodes[ni].open {
                    continue;
                }
                let tentative = current_g + graph.cost(np);
                let h = manhattan(np, dest);

                if self.nodes[ni].generation != cur_gen {
                    let n = &mut self.nodes[ni];
                    n.g = tentative;
                    n.parent = ci;
                    n.seen = next_seen;
                    n.generation = cur_gen;
                    n.open = true;
                    trace.push(Step {
                        pos: np,
                        kind: StepKind::Opened,
                    });
                    open.push(OpenRef {
                        f: tentative + h,
                        h,
                        seen: next_seen,
                        idx: ni,
                    });
                    next_seen += 1;
                } else if tentative < self.nodes[ni].g {
                    let n = &mut self.nodes[ni];
                    n.g = tentative;
                    n.parent = ci;
                    open.push(OpenRef {
                        f: tentative + h,
                        h,
                        seen: n.seen,
                        idx: ni,
                    });
                }
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridviz_core::Algorithm;

    #[test]
    fn matches_dijkstra_path_length_on_uniform_grid() {
        let graph = GridGraph::new(16, 12);
        let mut buffers = SearchBuffers::new();
        let dijkstra = buffers.run(&graph, Algorithm::Dijkstra, graph.start(), graph.target());
        let astar = buffers.run(&graph, Algorithm::AStar, graph.start(), graph.target());
        assert!(dijkstra.found && astar.found);
        assert_eq!(dijkstra.path.len(), astar.path.len());
    }

    #[test]
    fn closes_no_more_nodes_than_dijkstra() {
        let mut graph = GridGraph::new(16, 12);
        for y in 2..10 {
            graph.make_block(Point::new(8, y));
        }
        let mut buffers = SearchBuffers::new();
        let dijkstra = buffers.run(&graph, Algorithm::Dijkstra, graph.start(), graph.target());
        let astar = buffers.run(&graph, Algorithm::AStar, graph.start(), graph.target());
        assert!(dijkstra.found && astar.found);
        assert!(astar.closed_count() <= dijkstra.closed_count());
    }

    #[test]
    fn heuristic_breaks_cost_ties() {
        // On an open grid A* expands far fewer nodes than Dijkstra because
        // equal-f candidates nearer the target (smaller h) pop first.
        let graph = GridGraph::new(20, 15);
        let mut buffers = SearchBuffers::new();
        let dijkstra = buffers.run(&graph, Algorithm::Dijkstra, graph.start(), graph.target());
        let astar = buffers.run(&graph, Algorithm::AStar, graph.start(), graph.target());
        assert!(astar.closed_count() < dijkstra.closed_count());
    }

    #[test]
    fn finds_path_around_walls() {
        let mut graph = GridGraph::new(10, 10);
        graph.set_start(Point::new(0, 5));
        graph.set_target(Point::new(9, 5));
        for y in 0..10 {
            if y != 5 {
                graph.make_block(Point::new(5, y));
            }
        }
        let mut buffers = SearchBuffers::new();
        let out = buffers.run(&graph, Algorithm::AStar, Point::new(0, 5), Point::new(9, 5));
        assert!(out.found);
        assert!(out.path.contains(&Point::new(5, 5)));
        assert_eq!(out.path.len(), 8);
    }
}
