//! Replaying a [`Timeline`] against a [`Renderer`].

use std::time::Duration;

use log::{debug, trace, warn};
use pathviz_core::Pos;

use crate::events::EventQueue;
use crate::schedule::{PlaybackEvent, Timeline};

/// Receives the visual state changes of a run.
pub trait Renderer {
    /// `pos` was expanded by the search.
    fn visit(&mut self, pos: Pos);

    /// `pos` is part of the final path.
    fn path(&mut self, pos: Pos);

    /// Playback reached its end. Not called for cancelled runs.
    fn finished(&mut self, found: bool) {
        let _ = found;
    }
}

/// Owns the pending events of at most one run and its elapsed clock.
#[derive(Default)]
pub struct Playback {
    queue: EventQueue<PlaybackEvent>,
    clock: u64,
    finish_at: u64,
    found: bool,
    running: bool,
}

impl Playback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing `timeline` from time zero.
    ///
    /// Any run still in progress is cancelled first.
    pub fn start(&mut self, timeline: Timeline) {
        self.cancel();
        debug!(
            "playback: {} events over {} ms",
            timeline.len(),
            timeline.finish_at
        );
        self.queue
            .extend(timeline.events.into_iter().map(|e| (e.event, e.at)));
        self.clock = 0;
        self.finish_at = timeline.finish_at;
        self.found = timeline.found;
        self.running = true;
    }

    /// Advance the clock by `elapsed` and fire every event now due, in
    /// schedule order. Returns the number of events fired.
    pub fn advance(&mut self, elapsed: Duration, renderer: &mut impl Renderer) -> usize {
        if !self.running {
            return 0;
        }
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self.clock = self.clock.saturating_add(ms);

        let mut fired = 0;
        while let Some((event, at)) = self.queue.pop_due(self.clock) {
            trace!("t={at}: {event:?}");
            match event {
                PlaybackEvent::Visit(p) => renderer.visit(p),
                PlaybackEvent::PathStep(p) => renderer.path(p),
            }
            fired += 1;
        }

        if self.queue.is_empty() && self.clock >= self.finish_at {
            self.running = false;
            debug!("playback finished at {} ms", self.clock);
            renderer.finished(self.found);
        }
        fired
    }

    /// Drop every unfired event and stop. Returns how many were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.queue.clear();
        if dropped > 0 {
            warn!("playback cancelled with {dropped} events pending");
        }
        self.running = false;
        dropped
    }

    /// Whether a run is still animating.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Number of events not yet fired.
    #[inline]
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Time since the current run started.
    #[inline]
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.clock)
    }
}
