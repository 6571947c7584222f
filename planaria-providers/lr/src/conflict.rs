//! Intervals of return edges and the conflict pairs stacked during testing.
//!
//! Edges are referred to by their index in the graph's edge list. An interval
//! spans a chain of return edges from `low` to `high`, linked through the
//! `ref` table of the test state.

/// A possibly empty range of return edges.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Interval {
    pub(crate) low: Option<usize>,
    pub(crate) high: Option<usize>,
}

impl Interval {
    pub(crate) const fn single(edge: usize) -> Self {
        Self {
            low: Some(edge),
            high: Some(edge),
        }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Whether the interval holds a return edge lower than `edge`'s lowpoint.
    pub(crate) fn conflicts_with(&self, edge: usize, lowpt: &[usize]) -> bool {
        self.high.is_some_and(|high| lowpt[high] > lowpt[edge])
    }
}

/// Return edges that must lie on opposite sides of the DFS tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ConflictPair {
    pub(crate) left: Interval,
    pub(crate) right: Interval,
}

impl ConflictPair {
    pub(crate) const fn right_only(edge: usize) -> Self {
        Self {
            left: Interval {
                low: None,
                high: None,
            },
            right: Interval::single(edge),
        }
    }

    pub(crate) fn swap(&mut self) {
        std::mem::swap(&mut self.left, &mut self.right);
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// The smallest lowpoint among the pair's bottom edges.
    pub(crate) fn lowest(&self, lowpt: &[usize]) -> Option<usize> {
        let left = self.left.low.map(|edge| lowpt[edge]);
        let right = self.right.low.map(|edge| lowpt[edge]);
        match (left, right) {
            (Some(l), Some(r)) => Some(l.min(r)),
            (l, r) => l.or(r),
        }
    }
}
