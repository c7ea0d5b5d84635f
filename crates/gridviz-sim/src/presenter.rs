use gridviz_core::Point;

/// Rendering sink for playback.
///
/// The playback layer never draws; it narrates cell updates to a presenter,
/// one call per delivered step. Special nodes (Start, Target, Diversion) are
/// filtered out before delivery, so a presenter only ever hears about plain
/// ground and terrain cells.
pub trait Presenter {
    /// A node entered the frontier.
    fn opened(&mut self, pos: Point);

    /// A node was settled.
    fn closed(&mut self, pos: Point);

    /// Follows the Opened/Closed event for a dense node visited under a
    /// weighted algorithm; hosts usually draw these in a muted shade so the
    /// terrain cost stays legible.
    fn dim(&mut self, pos: Point);

    /// The final path, in order from source to destination.
    fn path(&mut self, cells: &[Point]);

    /// Wipe every visualisation overlay from the board.
    fn clear(&mut self);
}

/// One recorded [`Presenter`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    Opened(Point),
    Closed(Point),
    Dim(Point),
    Path(Vec<Point>),
    Clear,
}

/// A presenter that records every call it receives, for headless hosts and
/// tests.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of delivered step events. `Dim` hints ride along with an
    /// Opened/Closed event and are not counted.
    pub fn step_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, PresenterEvent::Opened(_) | PresenterEvent::Closed(_)))
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn opened(&mut self, pos: Point) {
        self.events.push(PresenterEvent::Opened(pos));
    }

    fn closed(&mut self, pos: Point) {
        self.events.push(PresenterEvent::Closed(pos));
    }

    fn dim(&mut self, pos: Point) {
        self.events.push(PresenterEvent::Dim(pos));
    }

    fn path(&mut self, cells: &[Point]) {
        self.events.push(PresenterEvent::Path(cells.to_vec()));
    }

    fn clear(&mut self) {
        self.events.push(PresenterEvent::Clear);
    }
}
