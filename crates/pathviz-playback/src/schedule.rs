//! Converting a search outcome into a deterministic event timeline.

use std::fmt;
use std::time::Duration;

use pathviz_core::Pos;

// ---------------------------------------------------------------------------
// Speed
// ---------------------------------------------------------------------------

/// Playback speed, 1 (slowest) to 10 (fastest).
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Speed(u8);

impl Speed {
    pub const MIN: Speed = Speed(1);
    pub const MAX: Speed = Speed(10);

    /// Validate a speed value.
    pub fn new(v: u8) -> Result<Self, PlaybackError> {
        if (Self::MIN.0..=Self::MAX.0).contains(&v) {
            Ok(Self(v))
        } else {
            Err(PlaybackError::SpeedOutOfRange(v))
        }
    }

    /// Saturate `v` into the valid range.
    pub fn clamped(v: i64) -> Self {
        Self(v.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for Speed {
    type Error = PlaybackError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::new(v)
    }
}

impl From<Speed> for u8 {
    fn from(s: Speed) -> Self {
        s.0
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors from playback configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    SpeedOutOfRange(u8),
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SpeedOutOfRange(v) => write!(
                f,
                "speed {v} is out of range {}..={}",
                Speed::MIN.0,
                Speed::MAX.0
            ),
        }
    }
}

impl std::error::Error for PlaybackError {}

// ---------------------------------------------------------------------------
// Timing
// ---------------------------------------------------------------------------

/// Linear speed-to-delay model, in milliseconds.
///
/// `delay = base - speed × scale`, never below zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timing {
    pub base_visit: u64,
    pub visit_scale: u64,
    pub base_path: u64,
    pub path_scale: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            base_visit: 105,
            visit_scale: 10,
            base_path: 150,
            path_scale: 15,
        }
    }
}

impl Timing {
    /// Gap between consecutive visit events.
    #[inline]
    pub fn visit_delay(&self, speed: Speed) -> u64 {
        self.base_visit
            .saturating_sub(speed.get() as u64 * self.visit_scale)
    }

    /// Gap between consecutive path events.
    #[inline]
    pub fn path_delay(&self, speed: Speed) -> u64 {
        self.base_path
            .saturating_sub(speed.get() as u64 * self.path_scale)
    }
}

// ---------------------------------------------------------------------------
// Events and timeline
// ---------------------------------------------------------------------------

/// What the renderer should show for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaybackEvent {
    Visit(Pos),
    PathStep(Pos),
}

impl PlaybackEvent {
    #[inline]
    pub fn pos(self) -> Pos {
        match self {
            Self::Visit(p) | Self::PathStep(p) => p,
        }
    }
}

/// An event and its offset from the start of playback, in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimedEvent {
    pub at: u64,
    pub event: PlaybackEvent,
}

impl TimedEvent {
    /// Offset as a [`Duration`].
    #[inline]
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.at)
    }
}

/// The full, ordered schedule of one run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeline {
    pub events: Vec<TimedEvent>,
    /// When playback is complete: the last path step, or the start of the
    /// (empty) path phase.
    pub finish_at: u64,
    /// Whether the run found a path.
    pub found: bool,
}

impl Timeline {
    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Total playback time as a [`Duration`].
    #[inline]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.finish_at)
    }
}

/// Lay out one event per trace cell, then one per path cell.
///
/// Visit `i` fires at `i × visit_delay`. The path phase starts where the
/// next visit would have fired, and path step `j` fires `j × path_delay`
/// after that. The same inputs always produce the same timeline.
pub fn schedule(trace: &[Pos], path: &[Pos], speed: Speed, timing: &Timing) -> Timeline {
    let vd = timing.visit_delay(speed);
    let pd = timing.path_delay(speed);

    let mut events = Vec::with_capacity(trace.len() + path.len());
    events.extend(trace.iter().enumerate().map(|(i, &p)| TimedEvent {
        at: i as u64 * vd,
        event: PlaybackEvent::Visit(p),
    }));

    let path_start = trace.len() as u64 * vd;
    events.extend(path.iter().enumerate().map(|(j, &p)| TimedEvent {
        at: path_start + j as u64 * pd,
        event: PlaybackEvent::PathStep(p),
    }));

    let finish_at = match path.len() {
        0 => path_start,
        n => path_start + (n as u64 - 1) * pd,
    };
    Timeline {
        events,
        finish_at,
        found: !path.is_empty(),
    }
}
