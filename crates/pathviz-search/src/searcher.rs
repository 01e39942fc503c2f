use std::collections::{BinaryHeap, VecDeque};

use log::debug;
use pathviz_core::{Grid, GridError, Pos};

use crate::algorithm::Algorithm;
use crate::outcome::SearchOutcome;

// ---------------------------------------------------------------------------
// Heap entries for Dijkstra / A*
// ---------------------------------------------------------------------------

/// Reference into the grid, ordered by `cost` then `tie` for use in
/// `BinaryHeap`.
///
/// Dijkstra uses the row-major index as `tie`; A* uses the open-set insertion
/// sequence. Either way the smallest `(cost, tie)` pops first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct NodeRef {
    pub(crate) idx: usize,
    pub(crate) cost: i32,
    pub(crate) tie: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest first.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.tie.cmp(&self.tie))
            .then_with(|| other.idx.cmp(&self.idx))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Searcher
// ---------------------------------------------------------------------------

/// Runs traversals over a [`Grid`], reusing its frontier buffers between runs.
///
/// The per-algorithm methods ([`bfs`](Self::bfs), [`dfs`](Self::dfs),
/// [`dijkstra`](Self::dijkstra), [`astar`](Self::astar)) expect a grid whose
/// search state has been reset. [`run`](Self::run) does the reset itself.
#[derive(Debug, Default)]
pub struct Searcher {
    pub(crate) frontier: VecDeque<Pos>,
    pub(crate) heap: BinaryHeap<NodeRef>,
    /// A* open-set membership: the insertion sequence of each open cell.
    pub(crate) open: Vec<Option<u64>>,
    pub(crate) seq: u64,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset `grid`, then run `algorithm` from its start marker to its end
    /// marker.
    pub fn run(
        &mut self,
        grid: &mut Grid,
        algorithm: Algorithm,
    ) -> Result<SearchOutcome, GridError> {
        grid.reset_search_state();
        let (start, end) = (grid.start(), grid.end());
        let outcome = match algorithm {
            Algorithm::Bfs => self.bfs(grid, start, end),
            Algorithm::Dfs => self.dfs(grid, start, end),
            Algorithm::Dijkstra => self.dijkstra(grid, start, end),
            Algorithm::Astar => self.astar(grid, start, end),
        }?;
        debug!(
            "{}: expanded {} of {} cells, path {}",
            algorithm.label(),
            outcome.trace.len(),
            grid.len(),
            if outcome.found() {
                format!("of {} moves", outcome.path_moves())
            } else {
                "not found".to_string()
            }
        );
        Ok(outcome)
    }
}

/// Both endpoints must lie on the grid.
pub(crate) fn check_endpoints(grid: &Grid, start: Pos, end: Pos) -> Result<(), GridError> {
    for p in [start, end] {
        if !grid.contains(p) {
            return Err(GridError::InvalidEndpoint(p));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::distance::manhattan;
    use crate::neighbors::cardinal;
    use pathviz_core::Dims;
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};

    #[test]
    fn heap_pops_lowest_cost_then_tie() {
        let mut h = BinaryHeap::new();
        h.push(NodeRef { idx: 0, cost: 3, tie: 0 });
        h.push(NodeRef { idx: 1, cost: 1, tie: 9 });
        h.push(NodeRef { idx: 2, cost: 1, tie: 2 });
        assert_eq!(h.pop().map(|n| n.idx), Some(2));
        assert_eq!(h.pop().map(|n| n.idx), Some(1));
        assert_eq!(h.pop().map(|n| n.idx), Some(0));
    }

    /// Every non-wall cell reachable from the start marker.
    fn reachable(grid: &Grid) -> HashSet<Pos> {
        let mut seen = HashSet::from([grid.start()]);
        let mut stack = vec![grid.start()];
        while let Some(p) = stack.pop() {
            for n in cardinal(grid.dims(), p) {
                if !grid.is_wall(n) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }
        seen
    }

    fn assert_valid_path(grid: &Grid, path: &[Pos]) {
        assert_eq!(path.first(), Some(&grid.start()));
        assert_eq!(path.last(), Some(&grid.end()));
        for w in path.windows(2) {
            assert!(w[0].is_adjacent(w[1]), "{} -> {} is not a step", w[0], w[1]);
        }
        let unique: HashSet<Pos> = path.iter().copied().collect();
        assert_eq!(unique.len(), path.len(), "path repeats a cell");
        assert!(path.iter().all(|p| !grid.is_wall(*p)));
    }

    fn random_grid(rng: &mut StdRng) -> Grid {
        let rows = rng.random_range(2..12);
        let cols = rng.random_range(2..12);
        let dims = Dims::new(rows, cols);
        let start = dims.pos(rng.random_range(0..dims.len()));
        let mut end = dims.pos(rng.random_range(0..dims.len()));
        while end == start {
            end = dims.pos(rng.random_range(0..dims.len()));
        }
        let mut g = Grid::new(rows, cols, start, end).unwrap();
        let density = rng.random_range(0.0..0.45);
        g.scatter_walls(rng, density);
        g
    }

    #[test]
    fn start_equals_end_is_a_single_cell() {
        let mut g = Grid::parse("S.\n.E").unwrap();
        let mut s = Searcher::new();
        for a in Algorithm::ALL {
            g.reset_search_state();
            let start = g.start();
            let o = match a {
                Algorithm::Bfs => s.bfs(&mut g, start, start),
                Algorithm::Dfs => s.dfs(&mut g, start, start),
                Algorithm::Dijkstra => s.dijkstra(&mut g, start, start),
                Algorithm::Astar => s.astar(&mut g, start, start),
            }
            .unwrap();
            assert_eq!(o.trace, vec![start], "{a}");
            assert_eq!(o.path, vec![start], "{a}");
        }
    }

    #[test]
    fn foreign_endpoints_are_rejected() {
        let mut g = Grid::parse("S.\n.E").unwrap();
        let mut s = Searcher::new();
        let outside = Pos::new(5, 5);
        assert_eq!(
            s.bfs(&mut g, Pos::ZERO, outside),
            Err(GridError::InvalidEndpoint(outside))
        );
        assert_eq!(
            s.astar(&mut g, outside, Pos::ZERO),
            Err(GridError::InvalidEndpoint(outside))
        );
    }

    #[test]
    fn open_grid_paths_match_manhattan() {
        let mut g = Grid::new(5, 5, Pos::new(0, 0), Pos::new(4, 4)).unwrap();
        let mut s = Searcher::new();
        for a in Algorithm::ALL {
            let o = s.run(&mut g, a).unwrap();
            assert!(o.trace.len() <= 25);
            assert_valid_path(&g, &o.path);
            if a.guarantees_shortest() {
                assert_eq!(o.path.len(), 9, "{a}");
            } else {
                assert!(o.path.len() >= 9);
            }
        }
    }

    #[test]
    fn open_grids_give_manhattan_paths() {
        let mut rng = StdRng::seed_from_u64(0x0b0a);
        let mut s = Searcher::new();
        for _ in 0..100 {
            let dims = Dims::new(rng.random_range(2..16), rng.random_range(2..16));
            let start = dims.pos(rng.random_range(0..dims.len()));
            let mut end = dims.pos(rng.random_range(0..dims.len()));
            while end == start {
                end = dims.pos(rng.random_range(0..dims.len()));
            }
            let mut g = Grid::new(dims.rows, dims.cols, start, end).unwrap();
            let want = manhattan(start, end) as usize;
            for a in [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::Astar] {
                let o = s.run(&mut g, a).unwrap();
                assert_valid_path(&g, &o.path);
                assert_eq!(o.path_moves(), want, "{a} on {dims} from {start} to {end}");
            }
        }
    }

    #[test]
    fn wall_row_forces_the_gap() {
        let mut g = Grid::parse(
            "
            S....
            ###.#
            ....E
            ",
        )
        .unwrap();
        let mut s = Searcher::new();
        for a in Algorithm::ALL {
            let o = s.run(&mut g, a).unwrap();
            assert_valid_path(&g, &o.path);
            assert!(o.path.contains(&Pos::new(1, 3)), "{a}");
        }
    }

    #[test]
    fn sealed_end_gives_empty_path_and_full_trace() {
        let mut g = Grid::parse(
            "
            S..#.
            ...#.
            ####.
            ....E
            ",
        )
        .unwrap();
        let expect = reachable(&g);
        let mut s = Searcher::new();
        for a in Algorithm::ALL {
            let o = s.run(&mut g, a).unwrap();
            assert!(o.path.is_empty(), "{a}");
            assert!(!o.found());
            let traced: HashSet<Pos> = o.trace.iter().copied().collect();
            assert_eq!(traced, expect, "{a}");
            assert_eq!(traced.len(), o.trace.len(), "{a} expanded a cell twice");
        }
    }

    #[test]
    fn random_grids_agree_on_shortest_length() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut s = Searcher::new();
        for _ in 0..200 {
            let mut g = random_grid(&mut rng);
            let bfs = s.run(&mut g, Algorithm::Bfs).unwrap();
            let dijkstra = s.run(&mut g, Algorithm::Dijkstra).unwrap();
            let astar = s.run(&mut g, Algorithm::Astar).unwrap();
            let dfs = s.run(&mut g, Algorithm::Dfs).unwrap();

            let reach = reachable(&g);
            let found = reach.contains(&g.end());
            for o in [&bfs, &dijkstra, &astar, &dfs] {
                assert_eq!(o.found(), found, "\n{g}");
                assert!(o.trace.len() <= g.len());
                assert!(o.trace.iter().all(|p| !g.is_wall(*p)));
                if found {
                    assert_valid_path(&g, &o.path);
                } else {
                    let traced: HashSet<Pos> = o.trace.iter().copied().collect();
                    assert_eq!(traced, reach, "\n{g}");
                }
            }
            if found {
                assert_eq!(bfs.path.len(), dijkstra.path.len(), "\n{g}");
                assert_eq!(bfs.path.len(), astar.path.len(), "\n{g}");
                assert!(dfs.path.len() >= bfs.path.len());
                assert!(bfs.path_moves() as i32 >= manhattan(g.start(), g.end()));
            }
        }
    }

    #[test]
    fn runs_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut g = random_grid(&mut rng);
        let mut s = Searcher::new();
        for a in Algorithm::ALL {
            let first = s.run(&mut g, a).unwrap();
            let second = s.run(&mut g, a).unwrap();
            assert_eq!(first, second, "{a}");
        }
    }
}
