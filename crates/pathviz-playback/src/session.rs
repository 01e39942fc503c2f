//! The run coordinator: one grid, one searcher, one playback.
//!
//! A [`Session`] is what an input layer talks to. While a run is animating
//! every edit is refused with [`SessionError::Busy`]; call
//! [`Session::cancel`] (or [`Session::restart`]) to drop the pending events
//! first.

use std::fmt;
use std::time::Duration;

use log::debug;
use pathviz_core::{Dims, Grid, GridError, Pos};
use pathviz_search::{Algorithm, SearchOutcome, Searcher};
use rand::Rng;

use crate::player::{Playback, Renderer};
use crate::schedule::{Speed, Timing, schedule};

/// Largest grid the selector offers.
pub const MAX_ROWS: i32 = 50;
pub const MAX_COLS: i32 = 60;

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for creating a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Pos,
    pub end: Pos,
    pub algorithm: Algorithm,
    pub speed: Speed,
    pub timing: Timing,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 40,
            start: Pos::new(5, 5),
            end: Pos::new(15, 30),
            algorithm: Algorithm::Bfs,
            speed: Speed::default(),
            timing: Timing::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionError
// ---------------------------------------------------------------------------

/// Errors surfaced by [`Session`] operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A run is animating; cancel it first.
    Busy,
    Grid(GridError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => f.write_str("a run is still animating"),
            Self::Grid(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Busy => None,
            Self::Grid(e) => Some(e),
        }
    }
}

impl From<GridError> for SessionError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Owns the grid and the state of the current run.
pub struct Session {
    grid: Grid,
    config: SessionConfig,
    searcher: Searcher,
    playback: Playback,
    last: Option<SearchOutcome>,
}

impl Session {
    /// Build a session and its grid from `config`.
    ///
    /// Dimensions above [`MAX_ROWS`]/[`MAX_COLS`] are rejected like any other
    /// invalid dimensions.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        if config.rows > MAX_ROWS || config.cols > MAX_COLS {
            return Err(GridError::InvalidDimensions {
                dims: Dims::new(config.rows, config.cols),
                start: config.start,
                end: config.end,
            }
            .into());
        }
        let grid = Grid::new(config.rows, config.cols, config.start, config.end)?;
        Ok(Self {
            grid,
            config,
            searcher: Searcher::new(),
            playback: Playback::new(),
            last: None,
        })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Whether a run is animating. Edits are refused while this is true.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.playback.is_running()
    }

    /// Events of the current run not yet delivered.
    #[inline]
    pub fn pending_events(&self) -> usize {
        self.playback.pending()
    }

    /// The outcome of the most recent run, until the path is cleared.
    #[inline]
    pub fn last_outcome(&self) -> Option<&SearchOutcome> {
        self.last.as_ref()
    }

    fn ensure_idle(&self, what: &str) -> Result<(), SessionError> {
        if self.is_running() {
            debug!("{what} refused: run in progress");
            return Err(SessionError::Busy);
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Runs
    // -----------------------------------------------------------------------

    /// Run the selected algorithm on a freshly reset grid and start playing
    /// its result.
    pub fn visualize(&mut self) -> Result<&SearchOutcome, SessionError> {
        self.ensure_idle("visualize")?;
        let outcome = self.searcher.run(&mut self.grid, self.config.algorithm)?;
        let timeline = schedule(
            &outcome.trace,
            &outcome.path,
            self.config.speed,
            &self.config.timing,
        );
        debug!(
            "{} at speed {}: {} events, {} ms",
            self.config.algorithm.label(),
            self.config.speed,
            timeline.len(),
            timeline.finish_at
        );
        self.playback.start(timeline);
        Ok(&*self.last.insert(outcome))
    }

    /// Cancel whatever is playing and visualize again.
    pub fn restart(&mut self) -> Result<&SearchOutcome, SessionError> {
        self.cancel();
        self.visualize()
    }

    /// Drop every unfired event and reset search state. Returns how many
    /// events were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.playback.cancel();
        self.grid.reset_search_state();
        dropped
    }

    /// Advance playback by `elapsed`, delivering due events to `renderer`.
    pub fn tick(&mut self, elapsed: Duration, renderer: &mut impl Renderer) -> usize {
        self.playback.advance(elapsed, renderer)
    }

    // -----------------------------------------------------------------------
    // Edits
    // -----------------------------------------------------------------------

    /// Flip a wall. Returns whether anything changed.
    pub fn toggle_wall(&mut self, p: Pos) -> Result<bool, SessionError> {
        self.ensure_idle("toggle wall")?;
        Ok(self.grid.toggle_wall(p))
    }

    /// Move the start marker. Returns whether it moved.
    pub fn move_start(&mut self, p: Pos) -> Result<bool, SessionError> {
        self.ensure_idle("move start")?;
        let moved = self.grid.move_start(p);
        self.config.start = self.grid.start();
        if moved {
            self.last = None;
        }
        Ok(moved)
    }

    /// Move the end marker. Returns whether it moved.
    pub fn move_end(&mut self, p: Pos) -> Result<bool, SessionError> {
        self.ensure_idle("move end")?;
        let moved = self.grid.move_end(p);
        self.config.end = self.grid.end();
        if moved {
            self.last = None;
        }
        Ok(moved)
    }

    /// Rebuild the grid at new dimensions.
    ///
    /// Values are capped at [`MAX_ROWS`]/[`MAX_COLS`] and raised to keep both
    /// endpoints on the grid. Returns the dimensions applied.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<Dims, SessionError> {
        self.ensure_idle("resize")?;
        let dims = self.grid.resize(rows.min(MAX_ROWS), cols.min(MAX_COLS))?;
        self.config.rows = dims.rows;
        self.config.cols = dims.cols;
        self.last = None;
        Ok(dims)
    }

    /// Forget the last run's search state, keeping walls.
    pub fn clear_path(&mut self) -> Result<(), SessionError> {
        self.ensure_idle("clear path")?;
        self.grid.reset_search_state();
        self.last = None;
        Ok(())
    }

    /// Remove every wall and the last run's search state.
    pub fn reset_grid(&mut self) -> Result<(), SessionError> {
        self.ensure_idle("reset grid")?;
        self.grid.clear_walls();
        self.last = None;
        Ok(())
    }

    /// Scatter random walls over open cells. Returns how many were placed.
    pub fn scatter_walls(
        &mut self,
        rng: &mut impl Rng,
        density: f64,
    ) -> Result<usize, SessionError> {
        self.ensure_idle("scatter walls")?;
        Ok(self.grid.scatter_walls(rng, density))
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) -> Result<(), SessionError> {
        self.ensure_idle("set algorithm")?;
        self.config.algorithm = algorithm;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Speed) -> Result<(), SessionError> {
        self.ensure_idle("set speed")?;
        self.config.speed = speed;
        Ok(())
    }
}
