use gridviz_core::Point;

/// What happened to a node during a search step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    /// The node entered the frontier.
    Opened,
    /// The node was settled. BFS records this at enqueue time.
    Closed,
}

/// One entry of a search step trace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step {
    pub pos: Point,
    pub kind: StepKind,
}

/// The result of one search run (or a chained two-leg run).
///
/// `trace` is always populated, even on failure, so an exhausted frontier
/// remains visible for rendering. `path` is empty unless `found` is true;
/// it runs source to destination and excludes the special nodes themselves.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    pub found: bool,
    pub trace: Vec<Step>,
    pub path: Vec<Point>,
}

impl SearchOutcome {
    /// Number of Closed events in the trace.
    pub fn closed_count(&self) -> usize {
        self.trace.iter().filter(|s| s.kind == StepKind::Closed).count()
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn step_round_trip() {
        let step = Step {
            pos: Point::new(3, 7),
            kind: StepKind::Opened,
        };
        let json = serde_json::to_string(&step).unwrap();
        let back: Step = serde_json::from_str(&json).unwrap();
        assert_eq!(step, back);
    }
}
