use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::spatial::Coordinate;

/// Minimum Jaro-Winkler similarity for a node id to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// Opaque node identifier.
pub type NodeId = String;

/// Directed, weighted edge. The weight is a physical distance in kilometres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    #[serde(rename = "node")]
    pub target: NodeId,
    pub weight: f64,
}

impl Edge {
    pub fn new(target: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            target: target.into(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct NodeEntry {
    coordinate: Option<Coordinate>,
    edges: Vec<Edge>,
}

/// Road graph: node coordinates plus ordered outgoing edges per node.
///
/// Cloning a `Graph` is cheap and yields an immutable snapshot. Editing
/// operations copy the shared storage on write, so a query running against
/// a clone never observes a concurrent edit.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Arc<BTreeMap<NodeId, NodeEntry>>,
    landmarks: Arc<BTreeMap<NodeId, String>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `node` is a known node.
    pub fn contains(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of directed edges, dangling ones included.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|entry| entry.edges.len()).sum()
    }

    /// Node identifiers in lexicographic order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Coordinate of a node, when it has one.
    pub fn coordinate(&self, node: &str) -> Option<Coordinate> {
        self.nodes.get(node).and_then(|entry| entry.coordinate)
    }

    /// Outgoing edges of a node in insertion order. Unknown nodes have none.
    pub fn neighbours(&self, node: &str) -> &[Edge] {
        self.nodes
            .get(node)
            .map(|entry| entry.edges.as_slice())
            .unwrap_or(&[])
    }

    /// Weight of the edge from `from` to `to`.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        self.neighbours(from)
            .iter()
            .find(|edge| edge.target == to)
            .map(|edge| edge.weight)
    }

    /// Display name attached to a node, if any.
    pub fn landmark(&self, node: &str) -> Option<&str> {
        self.landmarks.get(node).map(String::as_str)
    }

    /// All landmark names keyed by node.
    pub fn landmarks(&self) -> &BTreeMap<NodeId, String> {
        &self.landmarks
    }

    /// Human-readable label: the landmark name, or `Node <id>`.
    pub fn label(&self, node: &str) -> String {
        match self.landmark(node) {
            Some(name) => name.to_string(),
            None => format!("Node {node}"),
        }
    }

    /// Edges whose target is not a known node, as `(from, to)` pairs.
    pub fn dangling_edges(&self) -> Vec<(NodeId, NodeId)> {
        self.nodes
            .iter()
            .flat_map(|(from, entry)| {
                entry
                    .edges
                    .iter()
                    .filter(|edge| !self.nodes.contains_key(&edge.target))
                    .map(move |edge| (from.clone(), edge.target.clone()))
            })
            .collect()
    }

    /// Known node ids that look similar to `name`, best match first.
    pub fn fuzzy_node_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let mut scored: Vec<(f64, &str)> = self
            .node_ids()
            .map(|id| (strsim::jaro_winkler(&needle, &id.to_lowercase()), id))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, id)| id.to_string())
            .collect()
    }

    /// Succeed if `node` exists, otherwise fail with [`Error::UnknownNode`] and suggestions.
    pub fn require_node(&self, node: &str) -> Result<()> {
        if self.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode {
                name: node.to_string(),
                suggestions: self.fuzzy_node_matches(node, 3),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Add a node with an optional coordinate. Fails if the id is taken.
    pub fn add_node(&mut self, id: impl Into<NodeId>, coordinate: Option<Coordinate>) -> Result<()> {
        let id = id.into();
        if self.contains(&id) {
            return Err(Error::DuplicateNode { name: id });
        }
        if let Some(coord) = coordinate {
            validate_coordinate(&id, coord)?;
        }
        debug!(node = %id, "adding node");
        Arc::make_mut(&mut self.nodes).insert(
            id,
            NodeEntry {
                coordinate,
                edges: Vec::new(),
            },
        );
        Ok(())
    }

    /// Replace the coordinate of an existing node.
    pub fn set_coordinate(&mut self, id: &str, coordinate: Coordinate) -> Result<()> {
        self.require_node(id)?;
        validate_coordinate(id, coordinate)?;
        if let Some(entry) = Arc::make_mut(&mut self.nodes).get_mut(id) {
            entry.coordinate = Some(coordinate);
        }
        Ok(())
    }

    /// Attach or clear the landmark name of an existing node.
    pub fn set_landmark(&mut self, id: &str, name: Option<String>) -> Result<()> {
        self.require_node(id)?;
        let landmarks = Arc::make_mut(&mut self.landmarks);
        match name {
            Some(name) => {
                landmarks.insert(id.to_string(), name);
            }
            None => {
                landmarks.remove(id);
            }
        }
        Ok(())
    }

    /// Insert a directed edge, or update the weight of an existing one.
    pub fn upsert_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        self.require_node(from)?;
        self.require_node(to)?;
        validate_weight(from, to, weight)?;
        self.upsert_edge_unchecked(from, to, weight);
        Ok(())
    }

    /// Insert or update the edge in both directions with the same weight.
    pub fn connect(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        self.require_node(a)?;
        self.require_node(b)?;
        validate_weight(a, b, weight)?;
        self.upsert_edge_unchecked(a, b, weight);
        self.upsert_edge_unchecked(b, a, weight);
        Ok(())
    }

    /// Remove the directed edge `from -> to`.
    pub fn remove_edge(&mut self, from: &str, to: &str) -> Result<()> {
        self.require_node(from)?;
        let entry = Arc::make_mut(&mut self.nodes).get_mut(from);
        let removed = entry
            .map(|entry| {
                let before = entry.edges.len();
                entry.edges.retain(|edge| edge.target != to);
                before != entry.edges.len()
            })
            .unwrap_or(false);
        if removed {
            Ok(())
        } else {
            Err(Error::EdgeNotFound {
                from: from.to_string(),
                to: to.to_string(),
            })
        }
    }

    /// Remove the edges between `a` and `b` in both directions.
    ///
    /// Succeeds when at least one direction existed.
    pub fn disconnect(&mut self, a: &str, b: &str) -> Result<()> {
        self.require_node(a)?;
        self.require_node(b)?;
        let forward = self.remove_edge(a, b).is_ok();
        let backward = self.remove_edge(b, a).is_ok();
        if forward || backward {
            Ok(())
        } else {
            Err(Error::EdgeNotFound {
                from: a.to_string(),
                to: b.to_string(),
            })
        }
    }

    /// Remove a node together with its outgoing and incoming edges.
    pub fn remove_node(&mut self, id: &str) -> Result<()> {
        self.require_node(id)?;
        let nodes = Arc::make_mut(&mut self.nodes);
        nodes.remove(id);
        for entry in nodes.values_mut() {
            entry.edges.retain(|edge| edge.target != id);
        }
        Arc::make_mut(&mut self.landmarks).remove(id);
        debug!(node = %id, "removed node");
        Ok(())
    }

    fn upsert_edge_unchecked(&mut self, from: &str, to: &str, weight: f64) {
        let nodes = Arc::make_mut(&mut self.nodes);
        let entry = nodes.entry(from.to_string()).or_default();
        match entry.edges.iter_mut().find(|edge| edge.target == to) {
            Some(edge) => edge.weight = weight,
            None => entry.edges.push(Edge::new(to, weight)),
        }
    }

    // -------------------------------------------------------------------------
    // Raw construction used by the document loader
    // -------------------------------------------------------------------------

    pub(crate) fn insert_raw(
        &mut self,
        id: NodeId,
        coordinate: Option<Coordinate>,
        edges: Vec<Edge>,
    ) {
        let entry = Arc::make_mut(&mut self.nodes).entry(id).or_default();
        if coordinate.is_some() {
            entry.coordinate = coordinate;
        }
        for edge in edges {
            // Parallel edges collapse to the cheapest one.
            match entry.edges.iter_mut().find(|e| e.target == edge.target) {
                Some(existing) => existing.weight = existing.weight.min(edge.weight),
                None => entry.edges.push(edge),
            }
        }
    }

    pub(crate) fn set_landmarks(&mut self, landmarks: BTreeMap<NodeId, String>) {
        self.landmarks = Arc::new(landmarks);
    }
}

pub(crate) fn validate_coordinate(node: &str, coordinate: Coordinate) -> Result<()> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(Error::InvalidCoordinate {
            node: node.to_string(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
        })
    }
}

pub(crate) fn validate_weight(from: &str, to: &str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidEdgeWeight {
            from: from.to_string(),
            to: to.to_string(),
            weight,
        })
    }
}
