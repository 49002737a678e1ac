//! Geographic helpers: coordinates, the Haversine heuristic and a KD-tree
//! backed nearest-node index.
//!
//! # Heuristic
//!
//! [`haversine_km`] is the great-circle distance used by A* as its lower
//! bound. It is only admissible when every edge weight is at least the
//! straight-line distance between its endpoints, which holds for real road
//! distances.
//!
//! # Nearest-node lookup
//!
//! [`NearestNodeIndex`] projects every coordinate onto the unit sphere and
//! stores the Cartesian points in a KD-tree. Chord length grows
//! monotonically with great-circle distance, so the squared-Euclidean
//! nearest neighbour in 3D is also the geographically nearest node.
//!
//! ```no_run
//! use roadgraph_lib::{load_graph, Coordinate, NearestNodeIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = load_graph(std::path::Path::new("graph.json"))?;
//! let index = NearestNodeIndex::build(&graph);
//! let clicked = Coordinate::new(41.01, 28.97);
//! if let Some(hit) = index.nearest(clicked) {
//!     println!("nearest node {} is {:.3} km away", hit.node, hit.distance_km);
//! }
//! # Ok(())
//! # }
//! ```

use kiddo::float::kdtree::KdTree;
use kiddo::SquaredEuclidean;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::graph::{Graph, NodeId};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// KD-tree bucket size (kiddo default).
const BUCKET_SIZE: usize = 32;

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside their geographic ranges.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Great-circle distance to another coordinate in kilometres.
    pub fn distance_to(&self, other: &Self) -> f64 {
        haversine_km(*self, *other)
    }

    fn to_unit_sphere(self) -> [f64; 3] {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        [lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin()]
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([latitude, longitude]: [f64; 2]) -> Self {
        Self::new(latitude, longitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.latitude, value.longitude]
    }
}

/// Haversine great-circle distance between two coordinates in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Result of a nearest-node query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestNode {
    pub node: NodeId,
    pub coordinate: Coordinate,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
}

/// Static nearest-node index built from a graph snapshot.
///
/// Nodes without coordinates are not indexed. Rebuild the index after
/// editing the graph.
pub struct NearestNodeIndex {
    tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32>,
    nodes: Vec<(NodeId, Coordinate)>,
}

impl NearestNodeIndex {
    /// Build an index over every node that has a coordinate.
    pub fn build(graph: &Graph) -> Self {
        let nodes: Vec<(NodeId, Coordinate)> = graph
            .node_ids()
            .filter_map(|id| graph.coordinate(id).map(|coord| (id.to_string(), coord)))
            .collect();

        let mut tree: KdTree<f64, usize, 3, BUCKET_SIZE, u32> = KdTree::new();
        for (index, (_, coord)) in nodes.iter().enumerate() {
            tree.add(&coord.to_unit_sphere(), index);
        }

        info!(node_count = nodes.len(), "built nearest-node index");

        Self { tree, nodes }
    }

    /// Number of indexed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Closest node to `point`, or `None` when nothing is indexed.
    pub fn nearest(&self, point: Coordinate) -> Option<NearestNode> {
        self.nearest_n(point, 1).into_iter().next()
    }

    /// Up to `k` closest nodes, sorted by distance then node id.
    pub fn nearest_n(&self, point: Coordinate, k: usize) -> Vec<NearestNode> {
        if k == 0 || self.nodes.is_empty() {
            return Vec::new();
        }

        let query = point.to_unit_sphere();
        let mut results: Vec<NearestNode> = self
            .tree
            .nearest_n::<SquaredEuclidean>(&query, k)
            .into_iter()
            .map(|neighbour| {
                let (node, coordinate) = &self.nodes[neighbour.item];
                NearestNode {
                    node: node.clone(),
                    coordinate: *coordinate,
                    distance_km: haversine_km(point, *coordinate),
                }
            })
            .collect();

        results.sort_by(|a, b| {
            a.distance_km
                .total_cmp(&b.distance_km)
                .then_with(|| a.node.cmp(&b.node))
        });
        results
    }
}
