//! Shared test utilities for `planaria-core`.
//!
//! The oracles here are deliberately simple rules rather than planarity
//! tests, so core behaviour can be checked without the provider crates.

use std::sync::atomic::{AtomicUsize, Ordering};

use planaria_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::{
    cancel::CancellationToken, error::OracleError, graph::SimpleGraph, oracle::PlanarityOracle,
};

/// Builds a proptest configuration from the shared run profile.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Accepts exactly the graphs within Euler's `3V−6` edge bound.
pub(crate) struct EulerBoundOracle;

impl PlanarityOracle for EulerBoundOracle {
    fn name(&self) -> &str {
        "euler-bound"
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        let v = graph.vertex_count();
        Ok(v < 3 || graph.edge_count() <= 3 * v - 6)
    }
}

/// Accepts acyclic graphs, giving a curve that falls from 1 to 0 well before
/// the complete graph.
pub(crate) struct ForestOracle;

impl PlanarityOracle for ForestOracle {
    fn name(&self) -> &str {
        "forest"
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        fn root(parent: &mut [usize], mut v: usize) -> usize {
            while parent[v] != v {
                parent[v] = parent[parent[v]];
                v = parent[v];
            }
            v
        }

        let mut parent: Vec<usize> = (0..graph.vertex_count()).collect();
        for &(left, right) in graph.edges() {
            let (a, b) = (root(&mut parent, left), root(&mut parent, right));
            if a == b {
                return Ok(false);
            }
            parent[a] = b;
        }
        Ok(true)
    }
}

/// Answers by the parity of the edge-endpoint sum, so results depend on the
/// exact graph drawn and expose any change in sampling order.
pub(crate) struct ParityOracle;

impl PlanarityOracle for ParityOracle {
    fn name(&self) -> &str {
        "parity"
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        let sum: usize = graph.edges().iter().map(|&(l, r)| l * 31 + r).sum();
        Ok(sum % 2 == 0)
    }
}

/// Counts invocations and accepts everything.
#[derive(Default)]
pub(crate) struct CountingOracle {
    calls: AtomicUsize,
}

impl CountingOracle {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl PlanarityOracle for CountingOracle {
    fn name(&self) -> &str {
        "counting"
    }

    fn is_planar(&self, _graph: &SimpleGraph) -> Result<bool, OracleError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(true)
    }
}

/// Fails with [`OracleError::Internal`] for graphs with at least `from_edges`
/// edges.
pub(crate) struct FailingOracle {
    pub(crate) from_edges: usize,
}

impl PlanarityOracle for FailingOracle {
    fn name(&self) -> &str {
        "failing"
    }

    fn is_planar(&self, graph: &SimpleGraph) -> Result<bool, OracleError> {
        if graph.edge_count() >= self.from_edges {
            return Err(OracleError::Internal {
                reason: format!("refusing {} edges", graph.edge_count()),
            });
        }
        Ok(true)
    }
}

/// Cancels `token` once it has answered `limit` queries.
pub(crate) struct CancelAfter {
    token: CancellationToken,
    limit: usize,
    calls: AtomicUsize,
}

impl CancelAfter {
    pub(crate) fn new(token: CancellationToken, limit: usize) -> Self {
        Self {
            token,
            limit,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PlanarityOracle for CancelAfter {
    fn name(&self) -> &str {
        "cancel-after"
    }

    fn is_planar(&self, _graph: &SimpleGraph) -> Result<bool, OracleError> {
        if self.calls.fetch_add(1, Ordering::Relaxed) + 1 >= self.limit {
            self.token.cancel();
        }
        Ok(true)
    }
}
