mod common;

use roadgraph_lib::{
    dijkstra, load_graph, save_graph, Coordinate, Error, Graph, RouteOptions,
};

use common::{sample_graph, sample_graph_path};

#[test]
fn fixture_loads_with_expected_shape() {
    let graph = sample_graph();
    assert_eq!(graph.node_count(), 11);
    assert_eq!(graph.edge_count(), 30);
    assert!(graph.dangling_edges().is_empty());
    assert!(graph.neighbours("K").is_empty());
    assert_eq!(graph.label("C"), "Galata Tower");
    assert_eq!(graph.label("D"), "Node D");
}

#[test]
fn node_ids_are_sorted() {
    let graph = sample_graph();
    let ids: Vec<&str> = graph.node_ids().collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test]
fn connecting_isolated_node_makes_it_reachable() {
    let mut graph = sample_graph();
    assert!(!dijkstra(&graph, "A", "K", &RouteOptions::default())
        .unwrap()
        .is_found());

    graph.connect("J", "K", 5.0).unwrap();
    let result = dijkstra(&graph, "A", "K", &RouteOptions::default()).unwrap();
    assert_eq!(result.path.last().map(String::as_str), Some("K"));
    assert!((result.distance - 15.93).abs() < 1e-9);
}

#[test]
fn updating_a_weight_reroutes() {
    let mut graph = sample_graph();
    // Make the C-D bridge expensive; A->E must then go through F.
    graph.connect("C", "D", 50.0).unwrap();
    let result = dijkstra(&graph, "A", "E", &RouteOptions::default()).unwrap();
    assert_eq!(result.path, vec!["A", "F", "E"]);
    assert!((result.distance - 9.99).abs() < 1e-9);
}

#[test]
fn removing_a_node_removes_incoming_edges() {
    let mut graph = sample_graph();
    graph.remove_node("C").unwrap();
    assert!(graph.neighbours("A").iter().all(|edge| edge.target != "C"));
    assert!(graph.neighbours("H").iter().all(|edge| edge.target != "C"));
    assert_eq!(graph.landmark("C"), None);
    assert!(matches!(
        graph.remove_node("C"),
        Err(Error::UnknownNode { .. })
    ));
}

#[test]
fn new_node_needs_valid_coordinate() {
    let mut graph = sample_graph();
    graph
        .add_node("L", Some(Coordinate::new(41.03, 29.0)))
        .unwrap();
    assert!(graph.contains("L"));
    assert!(matches!(
        graph.add_node("M", Some(Coordinate::new(0.0, 200.0))),
        Err(Error::InvalidCoordinate { .. })
    ));
    assert!(matches!(
        graph.add_node("L", None),
        Err(Error::DuplicateNode { .. })
    ));
}

#[test]
fn edited_graph_survives_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("edited.json");

    let mut graph = load_graph(&sample_graph_path()).unwrap();
    graph.add_node("L", Some(Coordinate::new(41.03, 29.0))).unwrap();
    graph.connect("L", "E", 1.5).unwrap();
    graph.set_landmark("L", Some("Ferry Pier".into())).unwrap();
    graph.disconnect("A", "B").unwrap();
    save_graph(&graph, &path).unwrap();

    let reloaded = load_graph(&path).unwrap();
    assert_eq!(reloaded.node_count(), 12);
    assert_eq!(reloaded.edge_weight("E", "L"), Some(1.5));
    assert_eq!(reloaded.edge_weight("A", "B"), None);
    assert_eq!(reloaded.label("L"), "Ferry Pier");
}

#[test]
fn fuzzy_matches_suggest_close_ids() {
    let mut graph = Graph::new();
    for id in ["Kadikoy", "Karakoy", "Besiktas", "Uskudar"] {
        graph.add_node(id, None).unwrap();
    }

    let matches = graph.fuzzy_node_matches("Karakoi", 3);
    assert_eq!(matches.first().map(String::as_str), Some("Karakoy"));
    assert!(matches.len() <= 3);

    assert!(graph.fuzzy_node_matches("Zzzzzz", 3).is_empty());

    let err = graph.require_node("Uskudr").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("unknown node: Uskudr"));
    assert!(message.contains("Did you mean"));
    assert!(message.contains("Uskudar"));
}
