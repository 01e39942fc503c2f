//! Timed playback of search results and the run coordinator.
//!
//! A finished search is turned into a [`Timeline`] by [`schedule`]: one
//! [`PlaybackEvent::Visit`] per expanded cell, followed by one
//! [`PlaybackEvent::PathStep`] per path cell, each at a fixed offset from the
//! start of playback. A [`Playback`] replays a timeline against a
//! [`Renderer`] as the caller advances its clock. A [`Session`] ties a grid,
//! a searcher and a playback together and refuses edits while a run is
//! animating.

pub mod events;
pub mod player;
pub mod schedule;
pub mod session;

pub use events::EventQueue;
pub use player::{Playback, Renderer};
pub use schedule::{
    PlaybackError, PlaybackEvent, Speed, TimedEvent, Timeline, Timing, schedule,
};
pub use session::{MAX_COLS, MAX_ROWS, Session, SessionConfig, SessionError};
