use pathviz_core::{Grid, GridError, Pos};

use crate::Searcher;
use crate::distance::manhattan;
use crate::neighbors::cardinal;
use crate::outcome::SearchOutcome;
use crate::path::reconstruct;
use crate::searcher::{NodeRef, check_endpoints};

impl Searcher {
    /// A* from `start` to `end`, guided by the Manhattan distance to `end`.
    ///
    /// The open cell with the smallest `f_cost` is expanded next. Ties go to
    /// the cell that entered the open set first; a cell keeps its place when
    /// its cost improves later. The heuristic is consistent on a unit grid,
    /// so the path found is a shortest one.
    pub fn astar(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
    ) -> Result<SearchOutcome, GridError> {
        check_endpoints(grid, start, end)?;
        let dims = grid.dims();
        let mut trace = Vec::new();

        self.heap.clear();
        self.open.clear();
        self.open.resize(dims.len(), None);
        self.seq = 0;

        if let (Some(si), Some(c)) = (dims.index(start), grid.cell_mut(start)) {
            c.g_cost = 0;
            c.h_cost = manhattan(start, end);
            c.f_cost = c.h_cost;
            self.open[si] = Some(self.seq);
            self.heap.push(NodeRef {
                idx: si,
                cost: c.f_cost,
                tie: self.seq,
            });
            self.seq += 1;
        }

        while let Some(current) = self.heap.pop() {
            let ci = current.idx;
            if self.open[ci].is_none() {
                continue;
            }
            let cp = dims.pos(ci);
            let Some(cell) = grid.cell_mut(cp) else {
                continue;
            };
            // Skip entries superseded by a cheaper one.
            if cell.f_cost != current.cost {
                continue;
            }
            self.open[ci] = None;
            if cell.is_wall() {
                continue;
            }
            cell.visited = true;
            trace.push(cp);

            if cp == end {
                let path = reconstruct(grid, start, end);
                return Ok(SearchOutcome { trace, path });
            }

            let tentative_g = cell.g_cost + 1;
            for np in cardinal(dims, cp) {
                let (Some(ni), Some(n)) = (dims.index(np), grid.cell_mut(np)) else {
                    continue;
                };
                if n.visited || n.is_wall() || tentative_g >= n.g_cost {
                    continue;
                }
                n.g_cost = tentative_g;
                n.h_cost = manhattan(np, end);
                n.f_cost = tentative_g + n.h_cost;
                n.previous = Some(cp);

                let tie = match self.open[ni] {
                    Some(seq) => seq,
                    None => {
                        let seq = self.seq;
                        self.seq += 1;
                        self.open[ni] = Some(seq);
                        seq
                    }
                };
                self.heap.push(NodeRef {
                    idx: ni,
                    cost: n.f_cost,
                    tie,
                });
            }
        }

        Ok(SearchOutcome::unreachable(trace))
    }
}
