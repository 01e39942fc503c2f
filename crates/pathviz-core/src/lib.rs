//! **pathviz-core**: grid model for the pathfinding visualizer.
//!
//! This crate provides the types every other pathviz crate builds on:
//! positions and dimensions, cells with their search-state fields, the
//! [`Grid`] with its wall and endpoint primitives, and the [`GridError`]
//! taxonomy.

pub mod cell;
pub mod error;
pub mod geom;
pub mod grid;

pub use cell::{Cell, INFINITY};
pub use error::GridError;
pub use geom::{Dims, DimsIter, Pos};
pub use grid::Grid;
