use pathviz_core::{Grid, GridError, Pos};

use crate::Searcher;
use crate::neighbors::cardinal;
use crate::outcome::SearchOutcome;
use crate::path::reconstruct;
use crate::searcher::check_endpoints;

/// Which end of the frontier the next cell is taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Discipline {
    Fifo,
    Lifo,
}

impl Searcher {
    /// Breadth-first search from `start` to `end`.
    ///
    /// Cells are marked visited when queued, so none is queued twice. With
    /// unit edges the path found is a shortest one.
    pub fn bfs(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
    ) -> Result<SearchOutcome, GridError> {
        self.flood(grid, start, end, Discipline::Fifo)
    }

    /// Shared body of BFS and DFS: they differ only in frontier discipline.
    pub(crate) fn flood(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
        discipline: Discipline,
    ) -> Result<SearchOutcome, GridError> {
        check_endpoints(grid, start, end)?;
        let dims = grid.dims();
        let mut trace = Vec::new();

        self.frontier.clear();
        if let Some(c) = grid.cell_mut(start) {
            c.visited = true;
            c.distance = 0;
        }
        self.frontier.push_back(start);

        loop {
            let next = match discipline {
                Discipline::Fifo => self.frontier.pop_front(),
                Discipline::Lifo => self.frontier.pop_back(),
            };
            let Some(cur) = next else {
                break;
            };
            if grid.is_wall(cur) {
                continue;
            }
            trace.push(cur);

            if cur == end {
                let path = reconstruct(grid, start, end);
                return Ok(SearchOutcome { trace, path });
            }

            let depth = grid.cell(cur).map_or(0, |c| c.distance);
            for n in cardinal(dims, cur) {
                let Some(c) = grid.cell_mut(n) else {
                    continue;
                };
                if c.visited || c.is_wall() {
                    continue;
                }
                c.visited = true;
                c.distance = depth + 1;
                c.previous = Some(cur);
                self.frontier.push_back(n);
            }
        }

        Ok(SearchOutcome::unreachable(trace))
    }
}
