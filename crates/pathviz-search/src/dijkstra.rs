use pathviz_core::{Grid, GridError, Pos};

use crate::Searcher;
use crate::neighbors::cardinal;
use crate::outcome::SearchOutcome;
use crate::path::reconstruct;
use crate::searcher::{NodeRef, check_endpoints};

impl Searcher {
    /// Dijkstra's algorithm from `start` to `end` with unit edge weights.
    ///
    /// The unsettled cell with the smallest `distance` is settled next. Ties
    /// go to the cell that comes first in row-major order. Cells are marked
    /// visited when settled, and stale heap entries are skipped. When no
    /// finite-distance cell remains the end is unreachable.
    pub fn dijkstra(
        &mut self,
        grid: &mut Grid,
        start: Pos,
        end: Pos,
    ) -> Result<SearchOutcome, GridError> {
        check_endpoints(grid, start, end)?;
        let dims = grid.dims();
        let mut trace = Vec::new();

        self.heap.clear();
        if let (Some(si), Some(c)) = (dims.index(start), grid.cell_mut(start)) {
            c.distance = 0;
            self.heap.push(NodeRef {
                idx: si,
                cost: 0,
                tie: si as u64,
            });
        }

        while let Some(current) = self.heap.pop() {
            let cp = dims.pos(current.idx);
            let Some(cell) = grid.cell_mut(cp) else {
                continue;
            };
            // Skip stale entries.
            if cell.visited || cell.distance != current.cost || cell.is_wall() {
                continue;
            }
            cell.visited = true;
            trace.push(cp);

            if cp == end {
                let path = reconstruct(grid, start, end);
                return Ok(SearchOutcome { trace, path });
            }

            let alt = current.cost + 1;
            for np in cardinal(dims, cp) {
                let (Some(ni), Some(n)) = (dims.index(np), grid.cell_mut(np)) else {
                    continue;
                };
                if n.visited || n.is_wall() || alt >= n.distance {
                    continue;
                }
                n.distance = alt;
                n.previous = Some(cp);
                self.heap.push(NodeRef {
                    idx: ni,
                    cost: alt,
                    tie: ni as u64,
                });
            }
        }

        Ok(SearchOutcome::unreachable(trace))
    }
}
