//! Playback scheduling and host session for the grid visualiser.
//!
//! A search run produces an ordered step trace; this crate replays it
//! against a [`Presenter`] at a configurable cadence. Pacing is host-driven:
//! the host owns the clock and calls [`Session::tick`] (or
//! [`Playback::tick`]) at the interval the current [`Speed`] dictates, so
//! the core stays free of timers and threads.
//!
//! [`Session`] bundles the whole visualiser behind one handle: the editable
//! board, algorithm and speed selection, layout generation, and the playback
//! state machine with its editing locks.
//!
//! [`Speed`]: gridviz_core::Speed

mod playback;
mod presenter;
mod session;

pub use playback::{Playback, PlaybackState};
pub use presenter::{Presenter, PresenterEvent, RecordingPresenter};
pub use session::Session;
