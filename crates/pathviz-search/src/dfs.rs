use pathviz_core::{Grid, GridError, Pos};

use crate::Searcher;
use crate::bfs::Discipline;
use crate::outcome::SearchOutcome;

impl Searcher {
    /// Depth-first search from `start` to `end`.
    ///
    /// Same bookkeeping as [`bfs`](Self::bfs) with a stack instead of a
    /// queue. The last neighbor pushed is explored first, so the route found
    /// leans up, then down, left and right. It is not necessarily shortest.
    pub fn dfs(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
    ) -> Result<SearchOutcome, GridError> {
        self.flood(grid, start, end, Discipline::Lifo)
    }
}
