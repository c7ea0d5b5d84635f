use std::collections::BinaryHeap;

use gridviz_core::{GridGraph, NodeType, Point};

use crate::SearchBuffers;
use crate::buffers::OpenRef;
use crate::trace::{Step, StepKind};

impl SearchBuffers {
    /// Uniform-cost search from `source` to `dest`.
    ///
    /// Appends a Closed event when a node is settled and an Opened event
    /// when a node first enters the frontier. Succeeds the moment the
    /// destination is settled; returns false on frontier exhaustion.
    pub(crate) fn dijkstra(
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

        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        open.push(OpenRef {
            f: 0,
            h: 0,
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
                        f: tentative,
                        h: 0,
                        seen: next_seen,
                        idx: ni,
                    });
                    next_seen += 1;
                } else if tentative < self.nodes[ni].g {
                    let n = &mut self.nodes[ni];
                    n.g = tentative;
                    n.parent = ci;
                    open.push(OpenRef {
                        f: tentative,
                        h: 0,
                        seen: n.seen,
                        idx: ni,
                    });
                }
            }
        }

        false
    }
}
