//! Graph-search algorithms over a [`pathviz_core::Grid`].
//!
//! This crate provides the four traversals the visualizer can animate:
//!
//! - **BFS** ([`Searcher::bfs`]) shortest path by edge count
//! - **DFS** ([`Searcher::dfs`]) reachability only, biased by neighbor order
//! - **Dijkstra** ([`Searcher::dijkstra`]) explicit relaxation with unit weights
//! - **A\*** ([`Searcher::astar`]) Manhattan-guided shortest path
//!
//! Each one returns a [`SearchOutcome`]: the cells in the order they were
//! expanded, and the start-to-end path rebuilt from predecessor links (empty
//! when the end cell cannot be reached).
//!
//! All traversals run through [`Searcher`], which owns its frontier buffers so
//! repeated runs reuse their allocations.

mod algorithm;
mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod distance;
mod neighbors;
mod outcome;
mod path;
mod searcher;

pub use algorithm::{Algorithm, ParseAlgorithmError};
pub use distance::manhattan;
pub use neighbors::{DIRECTIONS, cardinal, neighbors};
pub use outcome::SearchOutcome;
pub use path::reconstruct;
pub use searcher::Searcher;
