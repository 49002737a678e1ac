//! Road graph shortest-path library.
//!
//! This crate loads weighted road graphs from JSON documents, edits them, and
//! answers shortest-path queries with Dijkstra's algorithm or A* guided by the
//! Haversine distance. Higher-level consumers (the CLI) should only depend on
//! the functions exported here instead of reimplementing behavior.

pub mod dataset;
pub mod document;
pub mod error;
pub mod graph;
pub mod output;
pub mod path;
pub mod routing;
pub mod spatial;

#[cfg(test)]
mod test_helpers;

pub use dataset::{default_graph_path, resolve_graph_path, GRAPH_PATH_ENV};
pub use document::{load_graph, save_graph, GraphDocument};
pub use error::{Error, Result};
pub use graph::{Edge, Graph, NodeId};
pub use output::{RouteEndpoint, RouteRenderMode, RouteStep, RouteSummary};
pub use path::{
    a_star, dijkstra, path_distance, reconstruct_path, CancellationToken, PathResult,
    RouteOptions, DEFAULT_SPEED_KMH,
};
pub use routing::{
    compare_algorithms, plan_route, select_planner, AlgorithmComparison, AlgorithmRun,
    RouteAlgorithm, RoutePlan, RoutePlanner, RouteRequest, DEFAULT_COMPARE_ITERATIONS,
};
pub use spatial::{haversine_km, Coordinate, NearestNode, NearestNodeIndex, EARTH_RADIUS_KM};
