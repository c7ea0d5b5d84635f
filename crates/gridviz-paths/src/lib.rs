//! Search algorithms over a [`GridGraph`](gridviz_core::GridGraph), with
//! deterministic step-trace recording.
//!
//! Three strategies are provided, all driven through [`SearchBuffers`]:
//!
//! - **Dijkstra** uniform-cost search ([`SearchBuffers::run`])
//! - **A\*** with a Manhattan-distance heuristic
//! - **BFS** unweighted breadth-first search
//!
//! Every run records an ordered trace of [`Step`]s (Opened/Closed events)
//! for playback, and reconstructs the found [`path`](SearchOutcome::path)
//! from parent links. [`SearchBuffers::run_chained`] chains two legs through
//! the grid's diversion waypoint when one is placed.
//!
//! [`SearchBuffers`] owns and reuses all per-cell scratch state, invalidated
//! by a generation counter on every run, so repeated queries incur no
//! allocations after warm-up and no state leaks between runs.
//!
//! # Tie-breaking
//!
//! Results are fully deterministic. The weighted frontiers order by
//! accumulated cost, then (for A*) by smaller heuristic, then by first-seen
//! order; a node keeps its first-seen rank even when its cost is later
//! improved.

mod astar;
mod bfs;
mod buffers;
mod chain;
mod dijkstra;
mod distance;
mod trace;

pub use buffers::SearchBuffers;
pub use distance::manhattan;
pub use trace::{SearchOutcome, Step, StepKind};
