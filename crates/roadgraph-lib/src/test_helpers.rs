// Test-only graph builders shared by the unit tests in this crate.

use crate::graph::Graph;
use crate::spatial::Coordinate;

/// Three nodes roughly a kilometre apart with A-B 3, B-C 4 and A-C 10,
/// mirrored in both directions.
pub fn triangle_graph() -> Graph {
    let mut graph = Graph::new();
    graph
        .add_node("A", Some(Coordinate::new(41.000, 29.000)))
        .unwrap();
    graph
        .add_node("B", Some(Coordinate::new(41.010, 29.000)))
        .unwrap();
    graph
        .add_node("C", Some(Coordinate::new(41.020, 29.000)))
        .unwrap();
    graph.connect("A", "B", 3.0).unwrap();
    graph.connect("B", "C", 4.0).unwrap();
    graph.connect("A", "C", 10.0).unwrap();
    graph
}

/// Build a coordinate-free graph from undirected `(a, b, weight)` triples.
pub fn graph_from_edges(edges: &[(&str, &str, f64)]) -> Graph {
    let mut graph = Graph::new();
    for &(a, b, weight) in edges {
        for node in [a, b] {
            if !graph.contains(node) {
                graph.add_node(node, None).unwrap();
            }
        }
        graph.connect(a, b, weight).unwrap();
    }
    graph
}
