//! Simple undirected graphs on labelled vertices.
//!
//! Sampled graphs are ephemeral: each trial builds one, hands it to the
//! planarity oracle and drops it. Edges are stored in canonical form
//! (`source < target`) and sorted so two graphs with the same edge set compare
//! equal.

use std::collections::HashSet;

use crate::error::GraphError;

/// Returns `V·(V−1)/2`, the edge count of the complete graph on
/// `vertex_count` vertices, or `None` when it does not fit in `usize`.
///
/// # Examples
/// ```
/// use planaria_core::max_edge_count;
///
/// assert_eq!(max_edge_count(20), Some(190));
/// assert_eq!(max_edge_count(1), Some(0));
/// assert_eq!(max_edge_count(0), Some(0));
/// ```
#[must_use]
pub const fn max_edge_count(vertex_count: usize) -> Option<usize> {
    triangular(vertex_count)
}

/// Returns `3V−6`, the largest edge count a planar graph on `vertex_count`
/// vertices can have. Defined for `V ≥ 3` only.
///
/// # Examples
/// ```
/// use planaria_core::planar_edge_bound;
///
/// assert_eq!(planar_edge_bound(20), Some(54));
/// assert_eq!(planar_edge_bound(2), None);
/// ```
#[must_use]
pub const fn planar_edge_bound(vertex_count: usize) -> Option<usize> {
    if vertex_count < 3 {
        return None;
    }
    match vertex_count.checked_mul(3) {
        Some(tripled) => Some(tripled - 6),
        None => None,
    }
}

// n·(n−1)/2 without forming the intermediate product.
const fn triangular(n: usize) -> Option<usize> {
    let pred = n.saturating_sub(1);
    if n % 2 == 0 {
        (n / 2).checked_mul(pred)
    } else {
        n.checked_mul(pred / 2)
    }
}

/// The ranked set of every unordered vertex pair `{u, v}` with `u < v`.
///
/// Pairs are ranked lexicographically: `(0, 1), (0, 2), …, (0, V−1), (1, 2), …`.
/// Ranking and unranking are arithmetic, so the universe is never
/// materialised.
///
/// # Examples
/// ```
/// use planaria_core::EdgeUniverse;
///
/// let universe = EdgeUniverse::new(4).expect("4 vertices fit");
/// assert_eq!(universe.len(), 6);
/// assert_eq!(universe.unrank(0), Some((0, 1)));
/// assert_eq!(universe.unrank(3), Some((1, 2)));
/// assert_eq!(universe.rank(2, 3), Some(5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeUniverse {
    vertex_count: usize,
    size: usize,
}

impl EdgeUniverse {
    /// Creates the universe for `vertex_count` vertices, or `None` when its
    /// size overflows `usize`.
    #[must_use]
    pub const fn new(vertex_count: usize) -> Option<Self> {
        match triangular(vertex_count) {
            Some(size) => Some(Self { vertex_count, size }),
            None => None,
        }
    }

    /// Number of vertices the pairs range over.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Number of pairs in the universe.
    #[must_use]
    #[rustfmt::skip]
    pub const fn len(&self) -> usize { self.size }

    /// Returns `true` when the universe has no pairs (`V < 2`).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the rank of the pair `{left, right}`, or `None` for loops and
    /// out-of-range vertices.
    #[must_use]
    pub fn rank(&self, left: usize, right: usize) -> Option<usize> {
        let (low, high) = if left < right {
            (left, right)
        } else {
            (right, left)
        };
        if low == high || high >= self.vertex_count {
            return None;
        }
        Some(self.row_offset(low) + (high - low - 1))
    }

    /// Returns the pair with rank `index`, or `None` when `index >= len()`.
    #[must_use]
    pub fn unrank(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.size {
            return None;
        }
        // offset(lo) <= index < offset(hi); the last row holds no pairs.
        let mut lo = 0;
        let mut hi = self.vertex_count - 1;
        while hi - lo > 1 {
            let mid = lo + (hi - lo) / 2;
            if self.row_offset(mid) <= index {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        let target = lo + 1 + (index - self.row_offset(lo));
        Some((lo, target))
    }

    // Number of pairs whose smaller endpoint is below `row`.
    fn row_offset(&self, row: usize) -> usize {
        let tail = triangular(self.vertex_count - row).unwrap_or(0);
        self.size - tail
    }
}

/// An undirected graph without loops or parallel edges on the vertex set
/// `0..vertex_count`.
///
/// # Examples
/// ```
/// use planaria_core::SimpleGraph;
///
/// let graph = SimpleGraph::from_edges(4, [(1, 0), (2, 3)]).expect("edges are valid");
/// assert_eq!(graph.vertex_count(), 4);
/// assert_eq!(graph.edges(), &[(0, 1), (2, 3)]);
/// assert!(graph.contains_edge(3, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SimpleGraph {
    vertex_count: usize,
    edges: Vec<(usize, usize)>,
}

impl SimpleGraph {
    /// Creates a graph with `vertex_count` isolated vertices.
    #[must_use]
    pub const fn empty(vertex_count: usize) -> Self {
        Self {
            vertex_count,
            edges: Vec::new(),
        }
    }

    /// Creates the complete graph on `vertex_count` vertices.
    #[must_use]
    pub fn complete(vertex_count: usize) -> Self {
        let edges = (0..vertex_count)
            .flat_map(|left| ((left + 1)..vertex_count).map(move |right| (left, right)))
            .collect();
        Self {
            vertex_count,
            edges,
        }
    }

    /// Builds a graph from an explicit edge list.
    ///
    /// Endpoint order is irrelevant; edges are canonicalised to
    /// `(min, max)` and sorted.
    ///
    /// # Errors
    /// Returns [`GraphError::VertexOutOfRange`] when an endpoint is not below
    /// `vertex_count`, [`GraphError::SelfLoop`] for loops and
    /// [`GraphError::DuplicateEdge`] when a pair repeats.
    pub fn from_edges(
        vertex_count: usize,
        edges: impl IntoIterator<Item = (usize, usize)>,
    ) -> Result<Self, GraphError> {
        let mut seen = HashSet::new();
        let mut canonical = Vec::new();
        for (left, right) in edges {
            for vertex in [left, right] {
                if vertex >= vertex_count {
                    return Err(GraphError::VertexOutOfRange {
                        vertex,
                        vertex_count,
                    });
                }
            }
            if left == right {
                return Err(GraphError::SelfLoop { vertex: left });
            }
            let pair = (left.min(right), left.max(right));
            if !seen.insert(pair) {
                return Err(GraphError::DuplicateEdge {
                    left: pair.0,
                    right: pair.1,
                });
            }
            canonical.push(pair);
        }
        canonical.sort_unstable();
        Ok(Self {
            vertex_count,
            edges: canonical,
        })
    }

    /// Wraps edges that are already canonical, sorted and unique.
    pub(crate) fn from_canonical_edges(vertex_count: usize, edges: Vec<(usize, usize)>) -> Self {
        debug_assert!(edges.windows(2).all(|pair| pair[0] < pair[1]));
        Self {
            vertex_count,
            edges,
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    #[rustfmt::skip]
    pub const fn vertex_count(&self) -> usize { self.vertex_count }

    /// Returns the number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the canonical, sorted edge list.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[(usize, usize)] { &self.edges }

    /// Returns `true` when the graph contains the edge `{left, right}`.
    #[must_use]
    pub fn contains_edge(&self, left: usize, right: usize) -> bool {
        let pair = (left.min(right), left.max(right));
        self.edges.binary_search(&pair).is_ok()
    }

    /// Builds neighbour lists indexed by vertex.
    #[must_use]
    pub fn adjacency(&self) -> Vec<Vec<usize>> {
        let mut adjacency = vec![Vec::new(); self.vertex_count];
        for &(left, right) in &self.edges {
            adjacency[left].push(right);
            adjacency[right].push(left);
        }
        adjacency
    }
}
