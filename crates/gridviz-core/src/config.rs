//! Host-facing configuration: [`Algorithm`] and [`Speed`].

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The search algorithm to visualise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    #[default]
    Dijkstra,
    AStar,
    Bfs,
}

impl Algorithm {
    /// Whether the algorithm reads traversal costs. BFS treats every
    /// non-block node as uniform, so dense terrain is de-emphasized for it.
    #[inline]
    pub const fn is_weighted(self) -> bool {
        !matches!(self, Self::Bfs)
    }
}

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Playback cadence, levels 1–6. Levels 1–5 map to a fixed tick-interval
/// table; level 6 means synchronous (instant) delivery.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Speed {
    VerySlow,
    Slow,
    #[default]
    Medium,
    Fast,
    VeryFast,
    Instant,
}

impl Speed {
    /// Interval between ticks in milliseconds, or `None` for [`Speed::Instant`].
    #[inline]
    pub const fn interval_ms(self) -> Option<u64> {
        match self {
            Self::VerySlow => Some(1000),
            Self::Slow => Some(100),
            Self::Medium => Some(50),
            Self::Fast => Some(10),
            Self::VeryFast => Some(1),
            Self::Instant => None,
        }
    }

    /// Map a 1-based selector level to a speed. Returns `None` outside 1..=6.
    pub const fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::VerySlow),
            2 => Some(Self::Slow),
            3 => Some(Self::Medium),
            4 => Some(Self::Fast),
            5 => Some(Self::VeryFast),
            6 => Some(Self::Instant),
            _ => None,
        }
    }

    /// The 1-based selector level of this speed.
    #[inline]
    pub const fn level(self) -> u8 {
        match self {
            Self::VerySlow => 1,
            Self::Slow => 2,
            Self::Medium => 3,
            Self::Fast => 4,
            Self::VeryFast => 5,
            Self::Instant => 6,
        }
    }
}
