//! The [`Grid`] type: a rectangular board of [`Cell`]s with exactly one start
//! and one end marker.
//!
//! Walls persist across runs until toggled. Search fields are scratch state
//! owned by whichever algorithm last ran and are cleared with
//! [`Grid::reset_search_state`].

use std::fmt;

use log::debug;
use rand::{Rng, RngExt};

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::{Dims, Pos};

/// A rectangular grid of cells.
///
/// With the `serde` feature a grid is stored as its dimensions, endpoints
/// and wall list. Search state is not stored, and loading goes through the
/// same checks as [`Grid::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(into = "GridRepr", try_from = "GridRepr"))]
pub struct Grid {
    dims: Dims,
    cells: Vec<Cell>,
    start: Pos,
    end: Pos,
}

impl Grid {
    /// Create an open grid with the given endpoints.
    ///
    /// Fails with [`GridError::InvalidDimensions`] if either dimension is not
    /// positive, if an endpoint falls outside the grid, or if the endpoints
    /// coincide.
    pub fn new(rows: i32, cols: i32, start: Pos, end: Pos) -> Result<Self, GridError> {
        let dims = Dims::new(rows, cols);
        if dims.is_empty() || !dims.contains(start) || !dims.contains(end) || start == end {
            return Err(GridError::InvalidDimensions { dims, start, end });
        }
        let mut cells: Vec<Cell> = dims.iter().map(Cell::new).collect();
        // Both indices are valid: checked above.
        let si = start.row as usize * cols as usize + start.col as usize;
        let ei = end.row as usize * cols as usize + end.col as usize;
        cells[si].start = true;
        cells[ei].end = true;
        Ok(Self {
            dims,
            cells,
            start,
            end,
        })
    }

    /// Parse a grid from ASCII art.
    ///
    /// `.` is an open cell, `#` a wall, `S` the start and `E` the end. The
    /// whole string is trimmed, as is each line, and blank lines are skipped.
    /// Every remaining line must have the same width.
    pub fn parse(s: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len() as i32;
        let cols = lines.first().map_or(0, |l| l.chars().count()) as i32;
        if lines.iter().any(|l| l.chars().count() as i32 != cols) {
            return Err(GridError::InconsistentSize(s.trim().to_string()));
        }

        let mut start = None;
        let mut end = None;
        let mut walls = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let pos = Pos::new(row as i32, col as i32);
                match ch {
                    '.' => {}
                    '#' => walls.push(pos),
                    'S' | 'E' => {
                        let slot = if ch == 'S' { &mut start } else { &mut end };
                        if slot.is_some() {
                            return Err(GridError::DuplicateEndpoint { ch, pos });
                        }
                        *slot = Some(pos);
                    }
                    _ => return Err(GridError::InvalidRune { ch, pos }),
                }
            }
        }
        let start = start.ok_or(GridError::MissingEndpoint('S'))?;
        let end = end.ok_or(GridError::MissingEndpoint('E'))?;

        let mut grid = Self::new(rows, cols, start, end)?;
        for p in walls {
            grid.toggle_wall(p);
        }
        Ok(grid)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn rows(&self) -> i32 {
        self.dims.rows
    }

    #[inline]
    pub fn cols(&self) -> i32 {
        self.dims.cols
    }

    #[inline]
    pub fn start(&self) -> Pos {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Pos {
        self.end
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a successfully constructed grid.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.dims.contains(p)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        let i = self.dims.index(p)?;
        Some(&self.cells[i])
    }

    /// Mutable access to the search fields of the cell at `p`.
    #[inline]
    pub fn cell_mut(&mut self, p: Pos) -> Option<&mut Cell> {
        let i = self.dims.index(p)?;
        Some(&mut self.cells[i])
    }

    /// Whether `p` is inside the grid and a wall.
    #[inline]
    pub fn is_wall(&self, p: Pos) -> bool {
        self.cell(p).is_some_and(Cell::is_wall)
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Positions of every wall, row-major.
    pub fn walls(&self) -> impl Iterator<Item = Pos> + '_ {
        self.cells.iter().filter(|c| c.wall).map(Cell::pos)
    }

    pub fn wall_count(&self) -> usize {
        self.cells.iter().filter(|c| c.wall).count()
    }

    /// Smallest dimensions that still contain both endpoints.
    pub fn min_dims(&self) -> Dims {
        Dims::new(
            self.start.row.max(self.end.row) + 1,
            self.start.col.max(self.end.col) + 1,
        )
    }

    // -----------------------------------------------------------------------
    // Mutation
    // -----------------------------------------------------------------------

    /// Clear visited flags, costs and predecessors on every cell.
    ///
    /// Walls and endpoints are untouched. Calling it twice is the same as
    /// calling it once.
    pub fn reset_search_state(&mut self) {
        for c in self.cells.iter_mut() {
            c.reset_search();
        }
    }

    /// Remove every wall and reset search state.
    pub fn clear_walls(&mut self) {
        for c in self.cells.iter_mut() {
            c.wall = false;
            c.reset_search();
        }
    }

    /// Flip the wall flag at `p`. Returns whether anything changed.
    ///
    /// Endpoints and out-of-bounds positions are left alone.
    pub fn toggle_wall(&mut self, p: Pos) -> bool {
        match self.cell_mut(p) {
            Some(c) if !c.is_endpoint() => {
                c.wall = !c.wall;
                true
            }
            _ => false,
        }
    }

    /// Move the start marker to `p`. Returns whether it moved.
    ///
    /// A move onto the end marker or off the grid is ignored.
    pub fn move_start(&mut self, p: Pos) -> bool {
        match self.try_move_start(p) {
            Ok(()) => true,
            Err(e) => {
                debug!("start not moved: {e}");
                false
            }
        }
    }

    /// Move the end marker to `p`. Returns whether it moved.
    ///
    /// A move onto the start marker or off the grid is ignored.
    pub fn move_end(&mut self, p: Pos) -> bool {
        match self.try_move_end(p) {
            Ok(()) => true,
            Err(e) => {
                debug!("end not moved: {e}");
                false
            }
        }
    }

    /// Like [`move_start`](Self::move_start) but reports why a move was
    /// rejected.
    pub fn try_move_start(&mut self, p: Pos) -> Result<(), GridError> {
        self.check_move(p, self.end)?;
        let old = self.start;
        if let Some(c) = self.cell_mut(old) {
            c.start = false;
            c.wall = false;
        }
        if let Some(c) = self.cell_mut(p) {
            c.start = true;
            c.wall = false;
        }
        self.start = p;
        Ok(())
    }

    /// Like [`move_end`](Self::move_end) but reports why a move was rejected.
    pub fn try_move_end(&mut self, p: Pos) -> Result<(), GridError> {
        self.check_move(p, self.start)?;
        let old = self.end;
        if let Some(c) = self.cell_mut(old) {
            c.end = false;
            c.wall = false;
        }
        if let Some(c) = self.cell_mut(p) {
            c.end = true;
            c.wall = false;
        }
        self.end = p;
        Ok(())
    }

    fn check_move(&self, p: Pos, other: Pos) -> Result<(), GridError> {
        if !self.contains(p) {
            return Err(GridError::OutOfBounds(p));
        }
        if p == other {
            return Err(GridError::EndpointCollision(p));
        }
        Ok(())
    }

    /// Rebuild the grid at new dimensions, keeping the endpoints.
    ///
    /// Each dimension is raised to [`min_dims`](Self::min_dims) if needed.
    /// Walls are discarded. Returns the dimensions actually applied.
    pub fn resize(&mut self, rows: i32, cols: i32) -> Result<Dims, GridError> {
        if rows <= 0 || cols <= 0 {
            return Err(GridError::InvalidDimensions {
                dims: Dims::new(rows, cols),
                start: self.start,
                end: self.end,
            });
        }
        let min = self.min_dims();
        let rows = rows.max(min.rows);
        let cols = cols.max(min.cols);
        *self = Self::new(rows, cols, self.start, self.end)?;
        Ok(self.dims)
    }

    /// Turn each open, non-endpoint cell into a wall with probability
    /// `density`. Returns the number of walls placed.
    pub fn scatter_walls(&mut self, rng: &mut impl Rng, density: f64) -> usize {
        let density = density.clamp(0.0, 1.0);
        let mut placed = 0;
        for c in self.cells.iter_mut() {
            if c.wall || c.is_endpoint() {
                continue;
            }
            if rng.random_bool(density) {
                c.wall = true;
                placed += 1;
            }
        }
        placed
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.dims.cols.max(1) as usize) {
            for c in row {
                let ch = if c.start {
                    'S'
                } else if c.end {
                    'E'
                } else if c.wall {
                    '#'
                } else {
                    '.'
                };
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Serialized form of a [`Grid`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct GridRepr {
    rows: i32,
    cols: i32,
    start: Pos,
    end: Pos,
    #[serde(default)]
    walls: Vec<Pos>,
}

#[cfg(feature = "serde")]
impl From<Grid> for GridRepr {
    fn from(g: Grid) -> Self {
        Self {
            rows: g.rows(),
            cols: g.cols(),
            start: g.start,
            end: g.end,
            walls: g.walls().collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<GridRepr> for Grid {
    type Error = GridError;

    fn try_from(r: GridRepr) -> Result<Self, Self::Error> {
        let mut g = Grid::new(r.rows, r.cols, r.start, r.end)?;
        for p in r.walls {
            let c = g.cell_mut(p).ok_or(GridError::OutOfBounds(p))?;
            if c.is_endpoint() {
                return Err(GridError::EndpointCollision(p));
            }
            c.wall = true;
        }
        Ok(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::INFINITY;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn grid5() -> Grid {
        Grid::new(5, 5, Pos::new(0, 0), Pos::new(4, 4)).unwrap()
    }

    #[test]
    fn create_marks_endpoints() {
        let g = grid5();
        assert_eq!(g.len(), 25);
        assert!(g.cell(Pos::new(0, 0)).unwrap().is_start());
        assert!(g.cell(Pos::new(4, 4)).unwrap().is_end());
        assert_eq!(g.cells().filter(|c| c.is_start()).count(), 1);
        assert_eq!(g.cells().filter(|c| c.is_end()).count(), 1);
    }

    #[test]
    fn create_rejects_bad_input() {
        let bad = [
            (0, 5, Pos::new(0, 0), Pos::new(0, 1)),
            (5, -1, Pos::new(0, 0), Pos::new(0, 1)),
            (5, 5, Pos::new(5, 0), Pos::new(0, 1)),
            (5, 5, Pos::new(0, 0), Pos::new(0, 5)),
            (5, 5, Pos::new(2, 2), Pos::new(2, 2)),
        ];
        for (r, c, s, e) in bad {
            assert!(matches!(
                Grid::new(r, c, s, e),
                Err(GridError::InvalidDimensions { .. })
            ));
        }
    }

    #[test]
    fn toggle_wall_skips_endpoints() {
        let mut g = grid5();
        assert!(!g.toggle_wall(Pos::new(0, 0)));
        assert!(!g.toggle_wall(Pos::new(4, 4)));
        assert!(!g.toggle_wall(Pos::new(9, 9)));
        assert!(g.toggle_wall(Pos::new(1, 1)));
        assert!(g.is_wall(Pos::new(1, 1)));
        assert!(g.toggle_wall(Pos::new(1, 1)));
        assert!(!g.is_wall(Pos::new(1, 1)));
    }

    #[test]
    fn move_start_clears_wall_and_old_flag() {
        let mut g = grid5();
        g.toggle_wall(Pos::new(2, 2));
        assert!(g.move_start(Pos::new(2, 2)));
        assert_eq!(g.start(), Pos::new(2, 2));
        let c = g.cell(Pos::new(2, 2)).unwrap();
        assert!(c.is_start() && !c.is_wall());
        assert!(!g.cell(Pos::new(0, 0)).unwrap().is_start());
    }

    #[test]
    fn move_onto_other_endpoint_is_ignored() {
        let mut g = grid5();
        let before = g.clone();
        assert!(!g.move_start(Pos::new(4, 4)));
        assert!(!g.move_end(Pos::new(0, 0)));
        assert_eq!(g, before);
        assert_eq!(
            g.try_move_end(Pos::new(0, 0)),
            Err(GridError::EndpointCollision(Pos::new(0, 0)))
        );
        assert_eq!(
            g.try_move_start(Pos::new(-1, 0)),
            Err(GridError::OutOfBounds(Pos::new(-1, 0)))
        );
    }

    #[test]
    fn reset_is_idempotent_and_keeps_walls() {
        let mut g = grid5();
        g.toggle_wall(Pos::new(1, 2));
        {
            let c = g.cell_mut(Pos::new(3, 3)).unwrap();
            c.visited = true;
            c.distance = 4;
            c.previous = Some(Pos::new(3, 2));
        }
        g.reset_search_state();
        let once = g.clone();
        g.reset_search_state();
        assert_eq!(g, once);
        assert!(g.is_wall(Pos::new(1, 2)));
        let c = g.cell(Pos::new(3, 3)).unwrap();
        assert!(!c.visited);
        assert_eq!(c.distance, INFINITY);
        assert_eq!(c.previous, None);
    }

    #[test]
    fn resize_clamps_to_endpoints() {
        let mut g = Grid::new(20, 40, Pos::new(5, 5), Pos::new(15, 30)).unwrap();
        g.toggle_wall(Pos::new(1, 1));
        let d = g.resize(3, 100).unwrap();
        assert_eq!(d, Dims::new(16, 100));
        assert_eq!(g.wall_count(), 0);
        assert!(g.cell(Pos::new(15, 30)).unwrap().is_end());
        assert!(matches!(
            g.resize(0, 10),
            Err(GridError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn parse_and_display() {
        let src = "
            S..#
            .#..
            ...E
        ";
        let g = Grid::parse(src).unwrap();
        assert_eq!(g.dims(), Dims::new(3, 4));
        assert_eq!(g.start(), Pos::new(0, 0));
        assert_eq!(g.end(), Pos::new(2, 3));
        assert_eq!(g.walls().collect::<Vec<_>>(), vec![Pos::new(0, 3), Pos::new(1, 1)]);
        assert_eq!(g.to_string(), "S..#\n.#..\n...E\n");
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(
            Grid::parse("S..\n..E."),
            Err(GridError::InconsistentSize(_))
        ));
        assert_eq!(
            Grid::parse("S.x\n..E"),
            Err(GridError::InvalidRune {
                ch: 'x',
                pos: Pos::new(0, 2)
            })
        );
        assert_eq!(Grid::parse("S..\n..."), Err(GridError::MissingEndpoint('E')));
        assert_eq!(
            Grid::parse("S.S\n..E"),
            Err(GridError::DuplicateEndpoint {
                ch: 'S',
                pos: Pos::new(0, 2)
            })
        );
    }

    #[test]
    fn scatter_walls_spares_endpoints() {
        let mut g = grid5();
        let mut rng = StdRng::seed_from_u64(7);
        let placed = g.scatter_walls(&mut rng, 1.0);
        assert_eq!(placed, 23);
        assert!(!g.is_wall(g.start()));
        assert!(!g.is_wall(g.end()));
        g.clear_walls();
        assert_eq!(g.wall_count(), 0);
        assert_eq!(g.scatter_walls(&mut rng, 0.0), 0);
    }
}
