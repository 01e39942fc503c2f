//! Errors raised by grid construction and search preconditions.

use std::fmt;

use crate::geom::{Dims, Pos};

/// Structural failures. These are reported before anything is mutated.
///
/// An unreachable end cell is not an error: searches report it as an empty
/// path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Non-positive dimensions, or endpoints that fall outside them or
    /// coincide.
    InvalidDimensions { dims: Dims, start: Pos, end: Pos },
    /// A search was asked to start or stop at a position outside the grid.
    InvalidEndpoint(Pos),
    /// An endpoint move would land on the other endpoint.
    EndpointCollision(Pos),
    /// An endpoint move would leave the grid.
    OutOfBounds(Pos),
    /// ASCII grid rows have different widths.
    InconsistentSize(String),
    /// ASCII grid contains a character outside `.#SE`.
    InvalidRune { ch: char, pos: Pos },
    /// ASCII grid has no `S` or no `E`.
    MissingEndpoint(char),
    /// ASCII grid has more than one `S` or `E`.
    DuplicateEndpoint { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { dims, start, end } => write!(
                f,
                "invalid grid {dims} for start {start} and end {end}"
            ),
            Self::InvalidEndpoint(p) => write!(f, "endpoint {p} does not belong to the grid"),
            Self::EndpointCollision(p) => write!(f, "{p} is already taken by the other endpoint"),
            Self::OutOfBounds(p) => write!(f, "{p} is outside the grid"),
            Self::InconsistentSize(s) => write!(f, "grid: inconsistent size:\n{s}"),
            Self::InvalidRune { ch, pos } => {
                write!(f, "grid contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingEndpoint(ch) => write!(f, "grid has no \u{201c}{ch}\u{201d} marker"),
            Self::DuplicateEndpoint { ch, pos } => {
                write!(f, "grid has a second \u{201c}{ch}\u{201d} marker at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
