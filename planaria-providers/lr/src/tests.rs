//! Tests covering the Left-Right test on classic planar and non-planar
//! graphs.
use super::{LrPlanarityError, LrPlanarityOracle};

use std::collections::BTreeSet;

use planaria_core::{OracleError, PlanarityOracle, RandomGraphSampler, SimpleGraph};
use planaria_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use rand::{SeedableRng, rngs::SmallRng, seq::SliceRandom};
use rstest::rstest;

fn graph(vertices: usize, edges: &[(usize, usize)]) -> SimpleGraph {
    SimpleGraph::from_edges(vertices, edges.iter().copied()).expect("test edges are simple")
}

fn planar(graph: &SimpleGraph) -> bool {
    LrPlanarityOracle::new()
        .is_planar(graph)
        .expect("left-right test must not fail")
}

fn complete_bipartite(left: usize, right: usize) -> SimpleGraph {
    let edges: Vec<_> = (0..left)
        .flat_map(|a| (0..right).map(move |b| (a, left + b)))
        .collect();
    graph(left + right, &edges)
}

fn petersen() -> SimpleGraph {
    let mut edges = Vec::new();
    for i in 0..5 {
        edges.push((i, (i + 1) % 5));
        edges.push((5 + i, 5 + (i + 2) % 5));
        edges.push((i, 5 + i));
    }
    graph(10, &edges)
}

fn wheel(rim: usize) -> SimpleGraph {
    let mut edges: Vec<_> = (1..=rim).map(|v| (0, v)).collect();
    edges.extend((1..=rim).map(|v| (v, v % rim + 1)));
    graph(rim + 1, &edges)
}

fn grid(rows: usize, cols: usize, diagonals: bool) -> Vec<(usize, usize)> {
    let at = |r: usize, c: usize| r * cols + c;
    let mut edges = Vec::new();
    for r in 0..rows {
        for c in 0..cols {
            if c + 1 < cols {
                edges.push((at(r, c), at(r, c + 1)));
            }
            if r + 1 < rows {
                edges.push((at(r, c), at(r + 1, c)));
            }
            if diagonals && r + 1 < rows && c + 1 < cols {
                edges.push((at(r, c), at(r + 1, c + 1)));
            }
        }
    }
    edges
}

/// Replaces every edge of `graph` by a path of length two.
fn subdivide(graph: &SimpleGraph) -> (usize, Vec<(usize, usize)>) {
    let base = graph.vertex_count();
    let edges = graph
        .edges()
        .iter()
        .enumerate()
        .flat_map(|(i, &(l, r))| [(l, base + i), (base + i, r)])
        .collect();
    (base + graph.edge_count(), edges)
}

fn subdivided(base: &SimpleGraph) -> SimpleGraph {
    let (vertices, edges) = subdivide(base);
    graph(vertices, &edges)
}

fn relabel(edges: &[(usize, usize)], permutation: &[usize]) -> Vec<(usize, usize)> {
    edges
        .iter()
        .map(|&(l, r)| (permutation[l], permutation[r]))
        .collect()
}

#[rstest]
#[case::k5(SimpleGraph::complete(5))]
#[case::k33(complete_bipartite(3, 3))]
#[case::petersen(petersen())]
#[case::k6(SimpleGraph::complete(6))]
#[case::k34(complete_bipartite(3, 4))]
#[case::subdivided_k5(subdivided(&SimpleGraph::complete(5)))]
#[case::subdivided_k33(subdivided(&complete_bipartite(3, 3)))]
fn rejects_non_planar_graphs(#[case] graph: SimpleGraph) {
    assert!(!planar(&graph));
}

#[rstest]
#[case::k4(SimpleGraph::complete(4))]
#[case::k5_minus_edge(graph(5, &[(0, 1), (0, 2), (0, 3), (0, 4), (1, 2), (1, 3), (1, 4), (2, 3), (2, 4)]))]
#[case::k33_minus_edge(graph(6, &[(0, 3), (0, 4), (0, 5), (1, 3), (1, 4), (1, 5), (2, 3), (2, 4)]))]
#[case::k24(complete_bipartite(2, 4))]
#[case::wheel(wheel(9))]
#[case::grid(graph(20, &grid(4, 5, false)))]
#[case::triangulated_grid(graph(20, &grid(4, 5, true)))]
#[case::octahedron(graph(6, &[(0, 2), (0, 3), (0, 4), (0, 5), (1, 2), (1, 3), (1, 4), (1, 5), (2, 4), (2, 5), (3, 4), (3, 5)]))]
#[case::path(graph(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]))]
#[case::star(graph(7, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5), (0, 6)]))]
#[case::two_k4(graph(8, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3), (4, 5), (4, 6), (4, 7), (5, 6), (5, 7), (6, 7)]))]
fn accepts_planar_graphs(#[case] graph: SimpleGraph) {
    assert!(planar(&graph));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(20)]
fn empty_graphs_are_planar(#[case] vertices: usize) {
    assert!(planar(&SimpleGraph::empty(vertices)));
}

#[rstest]
fn petersen_minus_vertex_is_still_non_planar() {
    // Removing one vertex leaves a subdivision of K3,3.
    let edges: Vec<_> = petersen()
        .edges()
        .iter()
        .filter(|&&(l, r)| l != 9 && r != 9)
        .copied()
        .collect();
    assert!(!planar(&graph(10, &edges)));
}

#[rstest]
fn maximal_planar_graph_sits_on_euler_bound() {
    // The octahedron is maximal planar: 12 = 3·6 − 6 edges.
    let mut edges = vec![
        (0, 2),
        (0, 3),
        (0, 4),
        (0, 5),
        (1, 2),
        (1, 3),
        (1, 4),
        (1, 5),
        (2, 4),
        (2, 5),
        (3, 4),
        (3, 5),
    ];
    assert!(planar(&graph(6, &edges)));
    edges.push((0, 1));
    assert!(!planar(&graph(6, &edges)));
}

#[rstest]
fn oracle_reports_its_name() {
    assert_eq!(LrPlanarityOracle::new().name(), "left-right");
    assert_eq!(LrPlanarityOracle::default().name(), "left-right");
    assert_eq!(LrPlanarityOracle::with_name("lr-exact").name(), "lr-exact");
}

#[rstest]
fn internal_errors_become_oracle_internal() {
    let err = OracleError::from(LrPlanarityError::ConflictStackUnderflow { edge: 4 });
    assert_eq!(
        err,
        OracleError::Internal {
            reason: "conflict stack exhausted while merging constraints of edge 4".into(),
        }
    );
}

fn random_graph(vertices: usize, edges: usize, rng: &mut SmallRng) -> SimpleGraph {
    RandomGraphSampler::new(vertices)
        .and_then(|sampler| sampler.sample(edges, rng))
        .expect("edge count fits the universe")
}

#[rstest]
#[case(12, 18, 1)]
#[case(12, 30, 2)]
#[case(20, 27, 3)]
#[case(20, 45, 4)]
#[case(30, 60, 5)]
fn random_graphs_keep_their_answer_under_relabelling(
    #[case] vertices: usize,
    #[case] edges: usize,
    #[case] seed: u64,
) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let base = random_graph(vertices, edges, &mut rng);
    let expected = planar(&base);
    let mut permutation: Vec<usize> = (0..vertices).collect();
    for _ in 0..8 {
        permutation.shuffle(&mut rng);
        let relabelled = graph(vertices, &relabel(base.edges(), &permutation));
        assert_eq!(planar(&relabelled), expected, "seed {seed}");
    }
}

#[rstest]
#[case(10, 17, 11)]
#[case(12, 24, 12)]
#[case(16, 30, 13)]
#[case(20, 38, 14)]
#[case(20, 45, 15)]
fn planarity_is_monotone_in_the_edge_set(
    #[case] vertices: usize,
    #[case] edges: usize,
    #[case] seed: u64,
) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let base = random_graph(vertices, edges, &mut rng);
    if planar(&base) {
        for skipped in 0..base.edge_count() {
            let fewer: Vec<_> = base
                .edges()
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != skipped)
                .map(|(_, &edge)| edge)
                .collect();
            assert!(planar(&graph(vertices, &fewer)), "seed {seed} edge {skipped}");
        }
    } else {
        let missing = (0..vertices)
            .flat_map(|l| (l + 1..vertices).map(move |r| (l, r)))
            .filter(|&(l, r)| !base.contains_edge(l, r));
        for extra in missing {
            let mut more = base.edges().to_vec();
            more.push(extra);
            assert!(!planar(&graph(vertices, &more)), "seed {seed} edge {extra:?}");
        }
    }
}

fn proptest_config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(64, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

fn triangulated_subgraph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (2_usize..7, 2_usize..7).prop_flat_map(|(rows, cols)| {
        let vertices = rows * cols;
        let edges = grid(rows, cols, true);
        let len = edges.len();
        (
            Just(vertices),
            proptest::sample::subsequence(edges, 0..=len),
            Just((0..vertices).collect::<Vec<_>>()).prop_shuffle(),
        )
            .prop_map(|(vertices, edges, permutation)| {
                (vertices, relabel(&edges, &permutation))
            })
    })
}

fn kuratowski_supergraph() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (any::<bool>(), 0_usize..4, 0_usize..6).prop_flat_map(|(use_k5, padding, extra)| {
        let base = if use_k5 {
            SimpleGraph::complete(5)
        } else {
            complete_bipartite(3, 3)
        };
        let (base_vertices, edges) = subdivide(&base);
        let vertices = base_vertices + padding;
        (
            Just(vertices),
            Just(edges),
            proptest::collection::vec((0..vertices, 0..vertices), extra),
            Just((0..vertices).collect::<Vec<_>>()).prop_shuffle(),
        )
            .prop_map(|(vertices, mut edges, extras, permutation)| {
                let mut seen: BTreeSet<(usize, usize)> =
                    edges.iter().map(|&(l, r)| (l.min(r), l.max(r))).collect();
                for (l, r) in extras {
                    if l != r && seen.insert((l.min(r), l.max(r))) {
                        edges.push((l, r));
                    }
                }
                (vertices, relabel(&edges, &permutation))
            })
    })
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn subgraphs_of_planar_graphs_are_planar((vertices, edges) in triangulated_subgraph()) {
        prop_assert!(planar(&graph(vertices, &edges)));
    }

    #[test]
    fn kuratowski_subdivisions_force_non_planarity((vertices, edges) in kuratowski_supergraph()) {
        prop_assert!(!planar(&graph(vertices, &edges)));
    }
}
