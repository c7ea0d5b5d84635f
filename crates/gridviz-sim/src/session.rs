use std::time::Duration;

use gridviz_core::{Algorithm, GridGraph, NodeType, Point, Speed};
use gridviz_gen::LayoutGen;
use gridviz_paths::SearchBuffers;
use rand::Rng;

use crate::playback::{Playback, PlaybackState};
use crate::presenter::Presenter;

/// One visualiser instance: the board, the search machinery, and playback.
///
/// The session enforces the editing rules the playback state implies. Board
/// editing (painting, clearing, generation) is accepted only while `Idle`;
/// the special roles may also move while `Visualised`, after which the host
/// calls [`Session::recalculate`] to redraw the run against the new board.
/// Editing methods return whether the request was applied.
pub struct Session<R: Rng> {
    graph: GridGraph,
    buffers: SearchBuffers,
    playback: Playback,
    generator: LayoutGen<R>,
    algorithm: Algorithm,
    speed: Speed,
}

impl<R: Rng> Session<R> {
    /// Create a session over a fresh `cols` × `rows` board.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is not positive or `cols` is less than 2.
    pub fn new(cols: i32, rows: i32, rng: R) -> Self {
        Self {
            graph: GridGraph::new(cols, rows),
            buffers: SearchBuffers::new(),
            playback: Playback::new(),
            generator: LayoutGen::new(rng),
            algorithm: Algorithm::default(),
            speed: Speed::default(),
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[inline]
    pub fn graph(&self) -> &GridGraph {
        &self.graph
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// How long the host should wait between [`Session::tick`] calls, or
    /// `None` at [`Speed::Instant`].
    #[inline]
    pub fn interval(&self) -> Option<Duration> {
        self.speed.interval_ms().map(Duration::from_millis)
    }

    fn editable(&self) -> bool {
        self.state() == PlaybackState::Idle
    }

    fn roles_movable(&self) -> bool {
        matches!(
            self.state(),
            PlaybackState::Idle | PlaybackState::Visualised
        )
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    /// Select the search algorithm for subsequent runs. Refused while a run
    /// is loaded.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> bool {
        if !self.editable() {
            return false;
        }
        self.algorithm = algorithm;
        true
    }

    /// Change the playback speed. Takes effect immediately; switching to
    /// [`Speed::Instant`] mid-run flushes the remaining steps.
    pub fn change_speed(&mut self, speed: Speed, presenter: &mut impl Presenter) {
        self.speed = speed;
        self.playback.set_speed(speed, &self.graph, presenter);
    }

    // -----------------------------------------------------------------------
    // Board editing (Idle only)
    // -----------------------------------------------------------------------

    pub fn paint_block(&mut self, p: Point) -> bool {
        if !self.editable() {
            return false;
        }
        self.graph.make_block(p);
        true
    }

    pub fn paint_dense(&mut self, p: Point) -> bool {
        if !self.editable() {
            return false;
        }
        self.graph.make_dense(p);
        true
    }

    pub fn erase(&mut self, p: Point) -> bool {
        if !self.editable() {
            return false;
        }
        self.graph.clear_cell(p);
        true
    }

    /// Reset every block to plain ground.
    pub fn clear_blocks(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        self.graph.clear_by_type(NodeType::Block);
        true
    }

    /// Reset all dense terrain to plain ground.
    pub fn clear_dense(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        self.graph.clear_by_type(NodeType::Dense);
        true
    }

    /// Reset the whole board to its initial layout.
    pub fn reset_board(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        self.graph.reset_all();
        true
    }

    /// Replace the layout with a recursive-division maze of `obstacle`
    /// cells.
    pub fn generate_maze(&mut self, obstacle: NodeType) -> bool {
        if !self.editable() || !obstacle.is_obstacle() {
            return false;
        }
        self.generator.maze(&mut self.graph, obstacle);
        true
    }

    /// Replace the layout with uniformly scattered blocks and dense terrain.
    pub fn randomize(&mut self) -> bool {
        if !self.editable() {
            return false;
        }
        self.generator.random_layout(&mut self.graph);
        true
    }

    // -----------------------------------------------------------------------
    // Role moves (Idle or Visualised)
    // -----------------------------------------------------------------------

    /// Move the Start node. Allowed while `Visualised` so a host can drag
    /// the endpoints over a finished run and then [`recalculate`].
    ///
    /// [`recalculate`]: Session::recalculate
    pub fn set_start(&mut self, p: Point) -> bool {
        if !self.roles_movable() {
            return false;
        }
        self.graph.set_start(p);
        true
    }

    /// Move the Target node. Same rules as [`Session::set_start`].
    pub fn set_target(&mut self, p: Point) -> bool {
        if !self.roles_movable() {
            return false;
        }
        self.graph.set_target(p);
        true
    }

    /// Place or move the Diversion waypoint. Same rules as
    /// [`Session::set_start`].
    pub fn set_diversion(&mut self, p: Point) -> bool {
        if !self.roles_movable() {
            return false;
        }
        self.graph.set_diversion(p);
        true
    }

    /// Remove the Diversion waypoint.
    pub fn remove_diversion(&mut self) -> bool {
        if !self.roles_movable() {
            return false;
        }
        self.graph.remove_diversion();
        true
    }

    // -----------------------------------------------------------------------
    // Running
    // -----------------------------------------------------------------------

    /// Run the configured search and begin playback at the session speed.
    ///
    /// Accepted only while `Idle`. Returns whether a path was found, or
    /// `None` when the session is in no state to start a run.
    pub fn visualise(&mut self, presenter: &mut impl Presenter) -> Option<bool> {
        if self.state() != PlaybackState::Idle {
            return None;
        }
        let outcome = self.buffers.run_chained(&self.graph, self.algorithm);
        let found = outcome.found;
        log::debug!(
            "visualise {:?}: found={found}, {} steps",
            self.algorithm,
            outcome.trace.len()
        );
        self.playback
            .start(outcome, self.algorithm, self.speed, &self.graph, presenter);
        Some(found)
    }

    /// Re-run the search against the edited board and redraw synchronously.
    ///
    /// Accepted only while `Visualised`: the presenter is cleared, the
    /// search re-runs, and the whole result is delivered instantly whatever
    /// the session speed. Returns whether a path was found.
    pub fn recalculate(&mut self, presenter: &mut impl Presenter) -> Option<bool> {
        if self.state() != PlaybackState::Visualised {
            return None;
        }
        presenter.clear();
        let outcome = self.buffers.run_chained(&self.graph, self.algorithm);
        let found = outcome.found;
        self.playback.start(
            outcome,
            self.algorithm,
            Speed::Instant,
            &self.graph,
            presenter,
        );
        Some(found)
    }

    /// Deliver the next playback step. See [`Playback::tick`].
    pub fn tick(&mut self, presenter: &mut impl Presenter) -> PlaybackState {
        self.playback.tick(&self.graph, presenter)
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn resume(&mut self) {
        self.playback.resume();
    }

    /// Abandon the current run, wipe the presenter, and return to `Idle`.
    pub fn stop(&mut self, presenter: &mut impl Presenter) {
        self.playback.stop(presenter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{PresenterEvent, RecordingPresenter};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session<StdRng> {
        Session::new(16, 10, StdRng::seed_from_u64(5))
    }

    #[test]
    fn instant_visualise_completes_in_one_call() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        s.change_speed(Speed::Instant, &mut presenter);

        assert_eq!(s.visualise(&mut presenter), Some(true));
        assert_eq!(s.state(), PlaybackState::Visualised);
        assert!(matches!(
            presenter.events.last(),
            Some(PresenterEvent::Path(_))
        ));
    }

    #[test]
    fn editing_is_refused_while_playing() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        assert!(s.paint_block(Point::new(1, 1)));

        s.visualise(&mut presenter).unwrap();
        assert_eq!(s.state(), PlaybackState::Playing);

        assert!(!s.paint_block(Point::new(2, 2)));
        assert!(!s.reset_board());
        assert!(!s.generate_maze(NodeType::Block));
        assert!(!s.set_start(Point::new(3, 3)));
        assert!(!s.set_algorithm(Algorithm::Bfs));
        assert_eq!(s.graph().kind(Point::new(2, 2)), NodeType::Empty);

        // A second run cannot start over a loaded one.
        assert_eq!(s.visualise(&mut presenter), None);
    }

    #[test]
    fn stop_unlocks_editing() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        s.visualise(&mut presenter).unwrap();
        s.tick(&mut presenter);

        s.stop(&mut presenter);
        assert_eq!(s.state(), PlaybackState::Idle);
        assert_eq!(presenter.events.last(), Some(&PresenterEvent::Clear));
        assert!(s.paint_dense(Point::new(4, 4)));
    }

    #[test]
    fn moving_an_endpoint_after_the_run_recalculates_instantly() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        s.change_speed(Speed::Instant, &mut presenter);
        s.visualise(&mut presenter).unwrap();
        assert_eq!(s.state(), PlaybackState::Visualised);

        // Painting is still locked, but the roles may move.
        assert!(!s.paint_block(Point::new(1, 1)));
        assert!(s.set_target(Point::new(14, 8)));

        presenter.events.clear();
        assert_eq!(s.recalculate(&mut presenter), Some(true));
        assert_eq!(s.state(), PlaybackState::Visualised);
        assert_eq!(presenter.events.first(), Some(&PresenterEvent::Clear));
        let path = presenter.events.iter().find_map(|e| match e {
            PresenterEvent::Path(cells) => Some(cells.clone()),
            _ => None,
        });
        let path = path.expect("recalculated path delivered");
        // The new path ends next to the moved target.
        let last = *path.last().unwrap();
        assert!(s.graph().neighbors(Point::new(14, 8)).any(|n| n == last));
    }

    #[test]
    fn recalculate_needs_a_finished_run() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        assert_eq!(s.recalculate(&mut presenter), None);

        s.visualise(&mut presenter).unwrap();
        assert_eq!(s.recalculate(&mut presenter), None);
    }

    #[test]
    fn timed_run_paces_one_step_per_tick() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        s.change_speed(Speed::VeryFast, &mut presenter);
        assert_eq!(s.interval(), Some(Duration::from_millis(1)));

        s.visualise(&mut presenter).unwrap();
        let after_start = presenter.step_count();
        assert_eq!(after_start, 0);

        s.tick(&mut presenter);
        s.tick(&mut presenter);
        assert!(presenter.step_count() <= 2);

        s.pause();
        let frozen = presenter.events.len();
        s.tick(&mut presenter);
        assert_eq!(presenter.events.len(), frozen);
        s.resume();

        let mut guard = 0;
        while s.state() == PlaybackState::Playing {
            s.tick(&mut presenter);
            guard += 1;
            assert!(guard < 10_000);
        }
        assert_eq!(s.state(), PlaybackState::Visualised);
    }

    #[test]
    fn generators_run_only_while_idle() {
        let mut s = session();
        assert!(s.generate_maze(NodeType::Block));
        assert!(s.randomize());
        assert!(!s.generate_maze(NodeType::Empty));

        let mut presenter = RecordingPresenter::new();
        s.visualise(&mut presenter);
        assert!(!s.randomize());
    }

    #[test]
    fn diversion_round_trip_through_a_run() {
        let mut s = session();
        let mut presenter = RecordingPresenter::new();
        s.change_speed(Speed::Instant, &mut presenter);
        assert!(s.set_diversion(Point::new(8, 8)));

        assert_eq!(s.visualise(&mut presenter), Some(true));
        // The diversion is special, so the delivered path skips over it.
        let path = presenter.events.iter().find_map(|e| match e {
            PresenterEvent::Path(cells) => Some(cells.clone()),
            _ => None,
        });
        assert!(!path.unwrap().contains(&Point::new(8, 8)));

        s.stop(&mut presenter);
        assert!(s.remove_diversion());
        assert_eq!(s.graph().diversion(), None);
    }
}
