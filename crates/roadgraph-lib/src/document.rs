//! JSON graph document format.
//!
//! ```text
//! {
//!   "nodes": ["A", "B"],
//!   "coordinates": { "A": [41.0, 28.9], "B": [41.1, 29.0] },
//!   "edges": { "A": [ { "node": "B", "weight": 2.5 } ] },
//!   "landmarks": { "A": "Harbour" }
//! }
//! ```
//!
//! Every section is optional. The node set is the union of `nodes`, the keys
//! of `coordinates` and the keys of `edges`. Edges whose target is not part of
//! that set are kept (and reported) but never traversed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::{validate_coordinate, validate_weight, Edge, Graph, NodeId};
use crate::spatial::Coordinate;

/// Serde model of the on-disk graph document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeId>,
    #[serde(default)]
    pub coordinates: BTreeMap<NodeId, Coordinate>,
    #[serde(default)]
    pub edges: BTreeMap<NodeId, Vec<Edge>>,
    /// Display names; cosmetic only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub landmarks: BTreeMap<NodeId, String>,
}

impl Graph {
    /// Build a graph from a parsed document, validating weights and coordinates.
    pub fn from_document(document: GraphDocument) -> Result<Self> {
        let GraphDocument {
            nodes,
            coordinates,
            edges,
            landmarks,
        } = document;

        let mut graph = Graph::new();

        for id in nodes {
            graph.insert_raw(id, None, Vec::new());
        }

        for (id, coordinate) in coordinates {
            validate_coordinate(&id, coordinate)?;
            graph.insert_raw(id, Some(coordinate), Vec::new());
        }

        for (from, outgoing) in edges {
            for edge in &outgoing {
                validate_weight(&from, &edge.target, edge.weight)?;
            }
            graph.insert_raw(from, None, outgoing);
        }

        let landmarks: BTreeMap<NodeId, String> = landmarks
            .into_iter()
            .filter(|(id, _)| {
                let known = graph.contains(id);
                if !known {
                    debug!(node = %id, "dropping landmark for unknown node");
                }
                known
            })
            .collect();
        graph.set_landmarks(landmarks);

        let dangling = graph.dangling_edges();
        if !dangling.is_empty() {
            warn!(
                dangling_edges = dangling.len(),
                "graph contains edges referencing unknown nodes; they will be skipped",
            );
        }

        Ok(graph)
    }

    /// Parse a graph from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: GraphDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    /// Convert the graph back into its document form.
    pub fn to_document(&self) -> GraphDocument {
        let mut document = GraphDocument {
            landmarks: self.landmarks().clone(),
            ..GraphDocument::default()
        };
        for id in self.node_ids() {
            document.nodes.push(id.to_string());
            if let Some(coordinate) = self.coordinate(id) {
                document.coordinates.insert(id.to_string(), coordinate);
            }
            document
                .edges
                .insert(id.to_string(), self.neighbours(id).to_vec());
        }
        document
    }
}

/// Load a graph document from disk.
pub fn load_graph(path: &Path) -> Result<Graph> {
    if !path.exists() {
        return Err(Error::GraphNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = fs::read_to_string(path)?;
    let graph = Graph::from_json_str(&contents)?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph"
    );
    Ok(graph)
}

/// Write a graph document to disk as pretty-printed JSON.
pub fn save_graph(graph: &Graph, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&graph.to_document())?;
    fs::write(path, json)?;
    info!(
        path = %path.display(),
        nodes = graph.node_count(),
        "saved graph"
    );
    Ok(())
}
