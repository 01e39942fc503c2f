//! The [`Cell`] type: one grid position with its search-state fields.

use crate::geom::Pos;

/// Sentinel cost meaning "not reached yet".
pub const INFINITY: i32 = i32::MAX;

/// A single grid cell.
///
/// The structural flags (wall, start, end) are only changed through
/// [`Grid`](crate::Grid), which keeps endpoints off walls and apart from each
/// other. The search fields are public: algorithms write them freely and
/// [`Grid::reset_search_state`](crate::Grid::reset_search_state) puts them
/// back before every run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pos: Pos,
    pub(crate) wall: bool,
    pub(crate) start: bool,
    pub(crate) end: bool,
    pub visited: bool,
    pub distance: i32,
    pub g_cost: i32,
    pub h_cost: i32,
    pub f_cost: i32,
    /// Predecessor on the way from the start cell. Only set when the cell is
    /// first reached (or improved) from an already expanded cell.
    pub previous: Option<Pos>,
}

impl Cell {
    /// A fresh open cell at `pos`.
    pub const fn new(pos: Pos) -> Self {
        Self {
            pos,
            wall: false,
            start: false,
            end: false,
            visited: false,
            distance: INFINITY,
            g_cost: INFINITY,
            h_cost: INFINITY,
            f_cost: INFINITY,
            previous: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn is_wall(&self) -> bool {
        self.wall
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.start
    }

    #[inline]
    pub fn is_end(&self) -> bool {
        self.end
    }

    /// Whether the cell is the start or the end marker.
    #[inline]
    pub fn is_endpoint(&self) -> bool {
        self.start || self.end
    }

    /// Clear every search field, leaving walls and endpoints alone.
    pub(crate) fn reset_search(&mut self) {
        self.visited = false;
        self.distance = INFINITY;
        self.g_cost = INFINITY;
        self.h_cost = INFINITY;
        self.f_cost = INFINITY;
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_unreached() {
        let c = Cell::new(Pos::new(1, 2));
        assert_eq!(c.pos(), Pos::new(1, 2));
        assert!(!c.is_wall() && !c.is_endpoint() && !c.visited);
        assert_eq!(c.distance, INFINITY);
        assert_eq!(c.f_cost, INFINITY);
        assert_eq!(c.previous, None);
    }

    #[test]
    fn reset_keeps_structure() {
        let mut c = Cell::new(Pos::ZERO);
        c.wall = true;
        c.visited = true;
        c.distance = 3;
        c.g_cost = 3;
        c.previous = Some(Pos::new(0, 1));
        c.reset_search();
        assert!(c.is_wall());
        assert!(!c.visited);
        assert_eq!(c.distance, INFINITY);
        assert_eq!(c.g_cost, INFINITY);
        assert_eq!(c.previous, None);
    }
}
