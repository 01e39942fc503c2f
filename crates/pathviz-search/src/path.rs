use log::warn;
use pathviz_core::{Grid, Pos};

/// Rebuild the route to `end` by following `previous` links back to `start`.
///
/// Returns the positions in start-to-end order. The result is empty if `end`
/// was never reached, if it lies outside the grid, or if the chain does not
/// lead back to `start`. The walk is bounded by the cell count.
pub fn reconstruct(grid: &Grid, start: Pos, end: Pos) -> Vec<Pos> {
    let Some(cell) = grid.cell(end) else {
        return Vec::new();
    };
    if cell.previous.is_none() && end != start {
        return Vec::new();
    }

    let mut path = vec![end];
    let mut cur = cell.previous;
    while let Some(p) = cur {
        if path.len() >= grid.len() {
            warn!("predecessor chain from {end} exceeds the grid; discarding path");
            return Vec::new();
        }
        path.push(p);
        cur = grid.cell(p).and_then(|c| c.previous);
    }
    path.reverse();

    if path.first() != Some(&start) {
        return Vec::new();
    }
    path
}
