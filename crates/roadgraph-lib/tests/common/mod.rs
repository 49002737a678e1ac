//! Common test utilities and fixture helpers.

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use roadgraph_lib::{haversine_km, load_graph, Coordinate, Graph};

/// Path to the fixtures directory shared by tests, benches and the CLI.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Path to the Istanbul sample graph.
#[allow(dead_code)]
pub fn sample_graph_path() -> PathBuf {
    fixtures_dir().join("sample_graph.json")
}

/// Load the sample graph fixture.
#[allow(dead_code)]
pub fn sample_graph() -> Graph {
    load_graph(&sample_graph_path()).expect("fixture graph loads")
}

/// Random connected-ish graph with coordinates in a small box and edge
/// weights of at least 1.05x the great-circle distance, so the Haversine
/// heuristic stays admissible.
#[allow(dead_code)]
pub fn random_graph(seed: u64, nodes: usize, extra_edges: usize) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::new();
    let ids: Vec<String> = (0..nodes).map(|i| format!("N{i:03}")).collect();

    for id in &ids {
        let coordinate = Coordinate::new(
            41.0 + rng.random_range(0.0..0.1),
            28.9 + rng.random_range(0.0..0.15),
        );
        graph.add_node(id.as_str(), Some(coordinate)).expect("fresh id");
    }

    // A random spanning chain keeps most nodes reachable.
    for i in 1..nodes {
        let j = rng.random_range(0..i);
        link(&mut graph, &ids[i], &ids[j], &mut rng);
    }
    for _ in 0..extra_edges {
        let a = rng.random_range(0..nodes);
        let b = rng.random_range(0..nodes);
        if a != b {
            link(&mut graph, &ids[a], &ids[b], &mut rng);
        }
    }
    graph
}

#[allow(dead_code)]
fn link(graph: &mut Graph, a: &str, b: &str, rng: &mut StdRng) {
    let (Some(ca), Some(cb)) = (graph.coordinate(a), graph.coordinate(b)) else {
        return;
    };
    let weight = haversine_km(ca, cb) * rng.random_range(1.05..2.0);
    if rng.random_bool(0.8) {
        graph.connect(a, b, weight).expect("valid edge");
    } else {
        graph.upsert_edge(a, b, weight).expect("valid edge");
    }
}
