//! Nodes command: list the graph's nodes.

use std::path::Path;

use anyhow::Result;
use serde::Serialize;

use roadgraph_lib::{Coordinate, Graph};

use super::open_graph;
use crate::output::OutputFormat;

/// One row of the node listing.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NodeRow {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<Coordinate>,
    /// Number of outgoing edges.
    pub degree: usize,
}

/// Build the listing rows in node-id order.
pub fn node_rows(graph: &Graph) -> Vec<NodeRow> {
    graph
        .node_ids()
        .map(|id| NodeRow {
            id: id.to_string(),
            landmark: graph.landmark(id).map(str::to_string),
            coordinate: graph.coordinate(id),
            degree: graph.neighbours(id).len(),
        })
        .collect()
}

pub fn handle_nodes_command(graph_path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let (_, graph) = open_graph(graph_path)?;
    format.render_nodes(&node_rows(&graph))
}
