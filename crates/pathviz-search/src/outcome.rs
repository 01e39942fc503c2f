use pathviz_core::Pos;

/// The two sequences a traversal produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Cells in the order they were expanded.
    pub trace: Vec<Pos>,
    /// Start-to-end route, inclusive. Empty if the end was never reached.
    pub path: Vec<Pos>,
}

impl SearchOutcome {
    pub(crate) fn unreachable(trace: Vec<Pos>) -> Self {
        Self {
            trace,
            path: Vec::new(),
        }
    }

    /// Whether a path to the end cell was found.
    #[inline]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of unit steps along the path (0 when not found).
    #[inline]
    pub fn path_moves(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}
