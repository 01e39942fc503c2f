use pathviz_core::{Dims, Grid, Pos};

/// Cardinal steps in expansion order: right, left, down, up.
///
/// Every traversal uses this order, so ties resolve the same way on every
/// run. DFS pops the last pushed neighbor first, which makes it prefer up,
/// then down, left and right.
pub const DIRECTIONS: [Pos; 4] = [
    Pos::new(0, 1),
    Pos::new(0, -1),
    Pos::new(1, 0),
    Pos::new(-1, 0),
];

/// In-bounds cardinal neighbors of `p`, in [`DIRECTIONS`] order.
#[inline]
pub fn cardinal(dims: Dims, p: Pos) -> impl Iterator<Item = Pos> {
    DIRECTIONS
        .into_iter()
        .map(move |d| p + d)
        .filter(move |n| dims.contains(*n))
}

/// In-bounds cardinal neighbors of `p` on `grid`. Walls are included; the
/// caller decides whether to step on them.
#[inline]
pub fn neighbors(grid: &Grid, p: Pos) -> impl Iterator<Item = Pos> {
    cardinal(grid.dims(), p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_has_four_in_fixed_order() {
        let got: Vec<Pos> = cardinal(Dims::new(3, 3), Pos::new(1, 1)).collect();
        assert_eq!(
            got,
            vec![Pos::new(1, 2), Pos::new(1, 0), Pos::new(2, 1), Pos::new(0, 1)]
        );
    }

    #[test]
    fn corner_is_filtered() {
        let got: Vec<Pos> = cardinal(Dims::new(3, 3), Pos::new(0, 0)).collect();
        assert_eq!(got, vec![Pos::new(0, 1), Pos::new(1, 0)]);
        let got: Vec<Pos> = cardinal(Dims::new(3, 3), Pos::new(2, 2)).collect();
        assert_eq!(got, vec![Pos::new(2, 1), Pos::new(1, 2)]);
    }

    #[test]
    fn walls_are_still_neighbors() {
        let g = Grid::parse("S#\n.E").unwrap();
        let got: Vec<Pos> = neighbors(&g, Pos::new(0, 0)).collect();
        assert_eq!(got, vec![Pos::new(0, 1), Pos::new(1, 0)]);
    }

    #[test]
    fn single_cell_has_none() {
        assert_eq!(cardinal(Dims::new(1, 1), Pos::ZERO).count(), 0);
    }
}
