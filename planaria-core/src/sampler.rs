//! Uniform sampling of simple graphs with an exact edge count.

use rand::{Rng, seq::index};

use crate::{
    Result,
    error::PlanariaError,
    graph::{EdgeUniverse, SimpleGraph},
};

/// Fewest vertices that admit an edge.
pub const MIN_VERTEX_COUNT: usize = 2;

/// Draws graphs on a fixed vertex set with exactly the requested number of
/// edges.
///
/// Each call picks a uniformly random `E`-subset of the `C(V, 2)` possible
/// edges, sampling ranks without replacement and unranking them into vertex
/// pairs. Independent Bernoulli draws per pair would not fix the edge count.
///
/// # Examples
/// ```
/// use planaria_core::RandomGraphSampler;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let sampler = RandomGraphSampler::new(20).expect("20 vertices are valid");
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = sampler.sample(30, &mut rng).expect("30 <= 190");
/// assert_eq!(graph.vertex_count(), 20);
/// assert_eq!(graph.edge_count(), 30);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RandomGraphSampler {
    universe: EdgeUniverse,
}

impl RandomGraphSampler {
    /// Creates a sampler for graphs on `vertex_count` vertices.
    ///
    /// # Errors
    /// Returns [`PlanariaError::InvalidVertexCount`] when `vertex_count` is
    /// below [`MIN_VERTEX_COUNT`] and [`PlanariaError::EdgeUniverseOverflow`]
    /// when `C(V, 2)` does not fit in `usize`.
    pub fn new(vertex_count: usize) -> Result<Self> {
        if vertex_count < MIN_VERTEX_COUNT {
            return Err(PlanariaError::InvalidVertexCount { got: vertex_count });
        }
        let universe =
            EdgeUniverse::new(vertex_count).ok_or(PlanariaError::EdgeUniverseOverflow {
                vertex_count,
            })?;
        Ok(Self { universe })
    }

    /// Returns the number of vertices in every sampled graph.
    #[must_use]
    pub const fn vertex_count(&self) -> usize {
        self.universe.vertex_count()
    }

    /// Returns the edge count of the complete graph, the largest valid sample
    /// size.
    #[must_use]
    pub const fn max_edges(&self) -> usize {
        self.universe.len()
    }

    /// Checks that `edge_count` is a valid sample size.
    ///
    /// # Errors
    /// Returns [`PlanariaError::EdgeCountOutOfRange`] when `edge_count`
    /// exceeds [`Self::max_edges`].
    pub fn check_edge_count(&self, edge_count: usize) -> Result<()> {
        if edge_count > self.universe.len() {
            return Err(PlanariaError::EdgeCountOutOfRange {
                edge_count,
                vertex_count: self.universe.vertex_count(),
                max: self.universe.len(),
            });
        }
        Ok(())
    }

    /// Samples a graph with exactly `edge_count` distinct edges.
    ///
    /// # Errors
    /// Returns [`PlanariaError::EdgeCountOutOfRange`] when `edge_count`
    /// exceeds the complete-graph bound. The RNG is not advanced in that case.
    pub fn sample<R: Rng + ?Sized>(&self, edge_count: usize, rng: &mut R) -> Result<SimpleGraph> {
        self.check_edge_count(edge_count)?;
        let mut ranks = index::sample(rng, self.universe.len(), edge_count).into_vec();
        // Lexicographic ranks sort into the canonical edge order.
        ranks.sort_unstable();
        let edges = ranks
            .into_iter()
            .filter_map(|rank| self.universe.unrank(rank))
            .collect();
        Ok(SimpleGraph::from_canonical_edges(
            self.universe.vertex_count(),
            edges,
        ))
    }
}
