use gridviz_core::{Algorithm, GridGraph};

use crate::SearchBuffers;
use crate::trace::SearchOutcome;

impl SearchBuffers {
    /// Run the full start→target search, chaining through the diversion
    /// waypoint when one is placed.
    ///
    /// With a diversion, the first leg runs start→diversion; the second leg
    /// (diversion→target) runs only if the first succeeded. Traces and paths
    /// are concatenated in leg order, and the overall result is found only
    /// when every leg is. A failed run still carries the trace generated so
    /// far, but never a path.
    pub fn run_chained(&mut self, graph: &GridGraph, algorithm: Algorithm) -> SearchOutcome {
        let Some(diversion) = graph.diversion() else {
            return self.run(graph, algorithm, graph.start(), graph.target());
        };

        let mut first = self.run(graph, algorithm, graph.start(), diversion);
        if !first.found {
            return first;
        }

        let second = self.run(graph, algorithm, diversion, graph.target());
        first.trace.extend(second.trace);
        first.found = second.found;
        if first.found {
            first.path.extend(second.path);
        } else {
            first.path.clear();
        }
        first
    }
}
