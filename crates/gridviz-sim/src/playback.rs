use std::collections::VecDeque;
use std::time::Duration;

use gridviz_core::{Algorithm, GridGraph, NodeType, Point, Speed};
use gridviz_paths::{SearchOutcome, Step, StepKind};

use crate::presenter::Presenter;

/// Where playback currently stands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing loaded; the board is editable.
    #[default]
    Idle,
    /// Steps are being delivered, one per tick.
    Playing,
    /// Delivery suspended; the step queue keeps its position.
    Paused,
    /// All steps (and the path, if found) have been delivered.
    Visualised,
}

/// Step-by-step delivery of a recorded search run.
///
/// Pacing is host-driven: the host calls [`Playback::tick`] at the cadence
/// given by [`Playback::interval`], and each tick hands exactly one step to
/// the presenter. [`Speed::Instant`] bypasses ticking entirely and flushes
/// the whole run synchronously, including when selected mid-flight.
#[derive(Debug, Default)]
pub struct Playback {
    state: PlaybackState,
    steps: VecDeque<Step>,
    path: Vec<Point>,
    found: bool,
    algorithm: Algorithm,
    speed: Speed,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    #[inline]
    pub fn speed(&self) -> Speed {
        self.speed
    }

    /// Tick interval for the current speed, or `None` when delivery is
    /// synchronous.
    #[inline]
    pub fn interval(&self) -> Option<Duration> {
        self.speed.interval_ms().map(Duration::from_millis)
    }

    /// Load a finished search run and begin delivery.
    ///
    /// At [`Speed::Instant`] the whole run is delivered before this returns
    /// and the state jumps straight to `Visualised`; otherwise the state
    /// becomes `Playing` and the host drives delivery through [`tick`].
    ///
    /// [`tick`]: Playback::tick
    pub fn start(
        &mut self,
        outcome: SearchOutcome,
        algorithm: Algorithm,
        speed: Speed,
        graph: &GridGraph,
        presenter: &mut impl Presenter,
    ) {
        self.steps = outcome.trace.into();
        self.path = outcome.path;
        self.found = outcome.found;
        self.algorithm = algorithm;
        self.speed = speed;
        if speed.interval_ms().is_none() {
            self.flush(graph, presenter);
        } else {
            self.state = PlaybackState::Playing;
        }
    }

    /// Deliver the next step. No-op outside `Playing`.
    ///
    /// A tick that finds the queue already empty delivers the path (when
    /// the run succeeded) and moves to `Visualised`, so the path arrives
    /// one tick after the last step.
    pub fn tick(&mut self, graph: &GridGraph, presenter: &mut impl Presenter) -> PlaybackState {
        if self.state != PlaybackState::Playing {
            return self.state;
        }
        match self.steps.pop_front() {
            Some(step) => self.deliver(step, graph, presenter),
            None => self.finish(presenter),
        }
        self.state
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == PlaybackState::Paused {
            self.state = PlaybackState::Playing;
        }
    }

    /// Abandon the run, wipe the presenter, and return to `Idle`.
    pub fn stop(&mut self, presenter: &mut impl Presenter) {
        self.steps.clear();
        self.path.clear();
        self.found = false;
        self.state = PlaybackState::Idle;
        presenter.clear();
    }

    /// Change the delivery speed. Switching to [`Speed::Instant`] while a
    /// run is in flight (playing or paused) flushes the remainder at once.
    pub fn set_speed(
        &mut self,
        speed: Speed,
        graph: &GridGraph,
        presenter: &mut impl Presenter,
    ) {
        self.speed = speed;
        if speed.interval_ms().is_none()
            && matches!(self.state, PlaybackState::Playing | PlaybackState::Paused)
        {
            self.flush(graph, presenter);
        }
    }

    fn flush(&mut self, graph: &GridGraph, presenter: &mut impl Presenter) {
        let steps = std::mem::take(&mut self.steps);
        for step in steps {
            self.deliver(step, graph, presenter);
        }
        self.finish(presenter);
    }

    fn finish(&mut self, presenter: &mut impl Presenter) {
        if self.found {
            presenter.path(&self.path);
        }
        log::debug!("playback finished, found={}", self.found);
        self.state = PlaybackState::Visualised;
    }

    /// Special nodes keep their own glyphs, so steps over them are dropped
    /// at delivery time rather than filtered from the recorded trace. A
    /// dense node visited under a weighted algorithm gets its Opened/Closed
    /// event followed by the dim hint.
    fn deliver(&self, step: Step, graph: &GridGraph, presenter: &mut impl Presenter) {
        let kind = graph.kind(step.pos);
        if kind.is_special() {
            return;
        }
        match step.kind {
            StepKind::Opened => presenter.opened(step.pos),
            StepKind::Closed => presenter.closed(step.pos),
        }
        if kind == NodeType::Dense && self.algorithm.is_weighted() {
            presenter.dim(step.pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{PresenterEvent, RecordingPresenter};
    use gridviz_paths::SearchBuffers;

    fn small_run(graph: &GridGraph) -> SearchOutcome {
        SearchBuffers::new().run(graph, Algorithm::Dijkstra, graph.start(), graph.target())
    }

    #[test]
    fn instant_delivery_is_synchronous() {
        let graph = GridGraph::new(10, 8);
        let outcome = small_run(&graph);
        let steps = outcome.trace.len();
        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();

        playback.start(
            outcome,
            Algorithm::Dijkstra,
            Speed::Instant,
            &graph,
            &mut presenter,
        );
        assert_eq!(playback.state(), PlaybackState::Visualised);
        // Every step arrived except those over the special endpoints: the
        // source's close plus the target's open and close.
        assert_eq!(presenter.step_count(), steps - 3);
        assert!(matches!(
            presenter.events.last(),
            Some(PresenterEvent::Path(_))
        ));
    }

    #[test]
    fn timed_delivery_is_one_step_per_tick() {
        let graph = GridGraph::new(10, 8);
        let outcome = small_run(&graph);
        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();

        playback.start(
            outcome,
            Algorithm::Dijkstra,
            Speed::Fast,
            &graph,
            &mut presenter,
        );
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert_eq!(playback.interval(), Some(Duration::from_millis(10)));

        for tick in 1..=5 {
            playback.tick(&graph, &mut presenter);
            // Ticks over special cells deliver nothing but still consume a
            // step, so the count never exceeds the tick count.
            assert!(presenter.step_count() <= tick);
        }

        // Drive to completion.
        let mut guard = 0;
        while playback.state() == PlaybackState::Playing {
            playback.tick(&graph, &mut presenter);
            guard += 1;
            assert!(guard < 10_000);
        }
        assert_eq!(playback.state(), PlaybackState::Visualised);
        assert!(presenter
            .events
            .iter()
            .any(|e| matches!(e, PresenterEvent::Path(_))));
    }

    #[test]
    fn pause_freezes_the_queue_in_place() {
        let graph = GridGraph::new(10, 8);
        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();
        playback.start(
            small_run(&graph),
            Algorithm::Dijkstra,
            Speed::Medium,
            &graph,
            &mut presenter,
        );

        for _ in 0..4 {
            playback.tick(&graph, &mut presenter);
        }
        let before = presenter.events.clone();

        playback.pause();
        assert_eq!(playback.state(), PlaybackState::Paused);
        for _ in 0..10 {
            playback.tick(&graph, &mut presenter);
        }
        assert_eq!(presenter.events, before);

        playback.resume();
        playback.tick(&graph, &mut presenter);
        assert_eq!(presenter.events.len(), before.len() + 1);
    }

    #[test]
    fn stop_clears_and_returns_to_idle() {
        let graph = GridGraph::new(10, 8);
        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();
        playback.start(
            small_run(&graph),
            Algorithm::Dijkstra,
            Speed::Slow,
            &graph,
            &mut presenter,
        );
        playback.tick(&graph, &mut presenter);

        playback.stop(&mut presenter);
        assert_eq!(playback.state(), PlaybackState::Idle);
        assert_eq!(presenter.events.last(), Some(&PresenterEvent::Clear));

        // Nothing left to deliver.
        let after = presenter.events.len();
        playback.tick(&graph, &mut presenter);
        assert_eq!(presenter.events.len(), after);
    }

    #[test]
    fn switching_to_instant_mid_flight_flushes() {
        let graph = GridGraph::new(10, 8);
        let outcome = small_run(&graph);
        let steps = outcome.trace.len();
        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();
        playback.start(
            outcome,
            Algorithm::Dijkstra,
            Speed::VerySlow,
            &graph,
            &mut presenter,
        );

        for _ in 0..3 {
            playback.tick(&graph, &mut presenter);
        }
        playback.set_speed(Speed::Instant, &graph, &mut presenter);
        assert_eq!(playback.state(), PlaybackState::Visualised);
        assert_eq!(presenter.step_count(), steps - 3);
    }

    #[test]
    fn dense_cells_dim_only_under_weighted_algorithms() {
        let mut graph = GridGraph::new(7, 1);
        // Single corridor; the dense cell cannot be avoided.
        graph.make_dense(Point::new(3, 0));

        let dense = Point::new(3, 0);
        for (algorithm, expect_dim) in
            [(Algorithm::Dijkstra, true), (Algorithm::Bfs, false)]
        {
            let outcome =
                SearchBuffers::new().run(&graph, algorithm, graph.start(), graph.target());
            assert!(outcome.found);
            let mut presenter = RecordingPresenter::new();
            let mut playback = Playback::new();
            playback.start(outcome, algorithm, Speed::Instant, &graph, &mut presenter);

            let dimmed = presenter
                .events
                .iter()
                .any(|e| *e == PresenterEvent::Dim(dense));
            assert_eq!(dimmed, expect_dim, "{algorithm:?}");
            // The dim hint supplements the step event, never replaces it:
            // the dense cell's Closed delivery arrives either way.
            assert!(
                presenter
                    .events
                    .iter()
                    .any(|e| *e == PresenterEvent::Closed(dense)),
                "{algorithm:?}"
            );
            if expect_dim {
                let closed_at = presenter
                    .events
                    .iter()
                    .position(|e| *e == PresenterEvent::Closed(dense))
                    .unwrap();
                assert_eq!(
                    presenter.events.get(closed_at + 1),
                    Some(&PresenterEvent::Dim(dense))
                );
            }
        }
    }

    #[test]
    fn path_arrives_on_the_tick_after_the_last_step() {
        let graph = GridGraph::new(10, 8);
        let outcome = small_run(&graph);
        let steps = outcome.trace.len();
        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();
        playback.start(
            outcome,
            Algorithm::Dijkstra,
            Speed::Fast,
            &graph,
            &mut presenter,
        );

        for _ in 0..steps {
            assert_eq!(playback.state(), PlaybackState::Playing);
            playback.tick(&graph, &mut presenter);
        }
        // Every step is consumed, but the run completes on the next tick.
        assert_eq!(playback.state(), PlaybackState::Playing);
        assert!(!presenter
            .events
            .iter()
            .any(|e| matches!(e, PresenterEvent::Path(_))));

        playback.tick(&graph, &mut presenter);
        assert_eq!(playback.state(), PlaybackState::Visualised);
        assert!(matches!(
            presenter.events.last(),
            Some(PresenterEvent::Path(_))
        ));
    }

    #[test]
    fn failed_run_ends_visualised_without_a_path() {
        let mut graph = GridGraph::new(10, 8);
        let start = graph.start();
        for n in graph.neighbors(start).collect::<Vec<_>>() {
            graph.make_block(n);
        }
        let outcome = small_run(&graph);
        assert!(!outcome.found);

        let mut presenter = RecordingPresenter::new();
        let mut playback = Playback::new();
        playback.start(
            outcome,
            Algorithm::Dijkstra,
            Speed::Instant,
            &graph,
            &mut presenter,
        );
        assert_eq!(playback.state(), PlaybackState::Visualised);
        assert!(!presenter
            .events
            .iter()
            .any(|e| matches!(e, PresenterEvent::Path(_))));
    }
}
