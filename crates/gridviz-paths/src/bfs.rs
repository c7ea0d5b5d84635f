use gridviz_core::{GridGraph, NodeType, Point};

use crate::SearchBuffers;
use crate::trace::{Step, StepKind};

impl SearchBuffers {
    /// Unweighted breadth-first search from `source` to `dest`.
    ///
    /// Cost is never read: blocks are impassable and every other node is
    /// uniform. A node is marked visited, given its parent, and recorded in
    /// the trace as Closed at the moment it is *enqueued* (the source itself
    /// produces no event); success is detected when the destination is
    /// dequeued. This ordering differs from the weighted searches and must
    /// not be changed.
    pub(crate) fn bfs(
        &mut self,
        graph: &GridGraph,
        source: Point,
        dest: Point,
        trace: &mut Vec<Step>,
    ) -> bool {
        let cur_gen = self.begin_run(graph);
        let start_idx = self.idx(source);
        let goal_idx = self.idx(dest);

        let mut queue = std::mem::take(&mut self.bfs_queue);
        queue.clear();

        {
            let node = &mut self.nodes[start_idx];
            node.parent = usize::MAX;
            node.generation = cur_gen;
        }
        queue.push_back(start_idx);

        let mut found = false;
        while let Some(ci) = queue.pop_front() {
            if ci == goal_idx {
                found = true;
                break;
            }
            let cp = self.point(ci);
            for np in graph.neighbors(cp) {
                if graph.kind(np) == NodeType::Block {
                    continue;
                }
                let ni = self.idx(np);
                if self.nodes[ni].generation == cur_gen {
                    continue;
                }
                let n = &mut self.nodes[ni];
                n.parent = ci;
                n.generation = cur_gen;
                trace.push(Step {
                    pos: np,
                    kind: StepKind::Closed,
                });
                queue.push_back(ni);
            }
        }

        self.bfs_queue = queue;
        found
    }
}
