//! Route planning on top of the shortest-path engines.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported routing algorithms (Dijkstra, A*)
//! - [`RouteRequest`] - High-level route planning request
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//! - [`compare_algorithms`] - Run both algorithms and report timings
//!
//! # Strategy Pattern
//!
//! Each algorithm is wrapped in a [`RoutePlanner`] implementation and picked
//! by [`select_planner`], so `plan_route` never matches on the algorithm
//! itself.
//!
//! # Example
//!
//! ```no_run
//! use roadgraph_lib::{load_graph, plan_route, RouteRequest};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let graph = load_graph(std::path::Path::new("graph.json"))?;
//! let request = RouteRequest::a_star("A", "J");
//! let plan = plan_route(&graph, &request)?;
//! println!("route: {:?} ({:.2} km)", plan.result.path, plan.result.distance);
//! # Ok(())
//! # }
//! ```

mod planner;

pub use planner::{select_planner, AStarPlanner, DijkstraPlanner, RoutePlanner};

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::path::{PathResult, RouteOptions};

/// Number of timed runs per algorithm used by [`compare_algorithms`] by default.
pub const DEFAULT_COMPARE_ITERATIONS: usize = 5;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (uninformed, weighted graph).
    Dijkstra,
    /// A* search guided by the Haversine heuristic.
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl RouteAlgorithm {
    pub const ALL: [RouteAlgorithm; 2] = [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar];
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a*" | "a_star" => Ok(RouteAlgorithm::AStar),
            other => Err(Error::InvalidRouteOption {
                option: "algorithm".to_string(),
                reason: format!("unknown algorithm '{other}' (expected dijkstra or a-star)"),
            }),
        }
    }
}

/// High-level route planning request.
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub start: NodeId,
    pub goal: NodeId,
    pub algorithm: RouteAlgorithm,
    pub options: RouteOptions,
}

impl RouteRequest {
    pub fn new(start: impl Into<NodeId>, goal: impl Into<NodeId>, algorithm: RouteAlgorithm) -> Self {
        Self {
            start: start.into(),
            goal: goal.into(),
            algorithm,
            options: RouteOptions::default(),
        }
    }

    /// Convenience constructor for Dijkstra routes with default options.
    pub fn dijkstra(start: impl Into<NodeId>, goal: impl Into<NodeId>) -> Self {
        Self::new(start, goal, RouteAlgorithm::Dijkstra)
    }

    /// Convenience constructor for A* routes with default options.
    pub fn a_star(start: impl Into<NodeId>, goal: impl Into<NodeId>) -> Self {
        Self::new(start, goal, RouteAlgorithm::AStar)
    }

    pub fn with_options(mut self, options: RouteOptions) -> Self {
        self.options = options;
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub algorithm: RouteAlgorithm,
    pub start: NodeId,
    pub goal: NodeId,
    #[serde(flatten)]
    pub result: PathResult,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.result.hop_count()
    }

    pub fn is_found(&self) -> bool {
        self.result.is_found()
    }
}

/// Compute a route using the algorithm named in the request.
///
/// An unreachable goal is not an error here; inspect [`RoutePlan::is_found`].
pub fn plan_route(graph: &Graph, request: &RouteRequest) -> Result<RoutePlan> {
    let planner = select_planner(request.algorithm);
    let result = planner.find_path(graph, &request.start, &request.goal, &request.options)?;

    debug!(
        algorithm = %request.algorithm,
        start = %request.start,
        goal = %request.goal,
        found = result.is_found(),
        hops = result.hop_count(),
        "planned route"
    );

    Ok(RoutePlan {
        algorithm: planner.algorithm(),
        start: request.start.clone(),
        goal: request.goal.clone(),
        result,
    })
}

/// Timing and result of one algorithm in a comparison.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmRun {
    pub algorithm: RouteAlgorithm,
    pub result: PathResult,
    /// Mean wall-clock compute time per run, in milliseconds.
    pub mean_compute_ms: f64,
    pub iterations: usize,
}

/// Side-by-side comparison of Dijkstra and A* on the same query.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmComparison {
    pub start: NodeId,
    pub goal: NodeId,
    pub runs: Vec<AlgorithmRun>,
}

impl AlgorithmComparison {
    pub fn run(&self, algorithm: RouteAlgorithm) -> Option<&AlgorithmRun> {
        self.runs.iter().find(|run| run.algorithm == algorithm)
    }

    /// Whether every algorithm found a route of the same length.
    pub fn distances_agree(&self, tolerance: f64) -> bool {
        let mut distances = self.runs.iter().map(|run| run.result.distance);
        let Some(first) = distances.next() else {
            return true;
        };
        distances.all(|d| {
            (d.is_infinite() && first.is_infinite()) || (d - first).abs() <= tolerance
        })
    }
}

/// Run every algorithm `iterations` times on the same query and report the
/// mean compute time of each.
///
/// Waypoints are rejected because Dijkstra does not support them.
pub fn compare_algorithms(
    graph: &Graph,
    start: &str,
    goal: &str,
    options: &RouteOptions,
    iterations: usize,
) -> Result<AlgorithmComparison> {
    if iterations == 0 {
        return Err(Error::InvalidRouteOption {
            option: "iterations".to_string(),
            reason: "at least one iteration is required".to_string(),
        });
    }

    let planners: Vec<_> = RouteAlgorithm::ALL.into_iter().map(select_planner).collect();
    if !options.waypoints.is_empty() {
        if let Some(planner) = planners.iter().find(|p| !p.supports_waypoints()) {
            debug!(algorithm = %planner.algorithm(), "comparison rejected: waypoints unsupported");
            return Err(Error::UnsupportedRouteOption {
                option: "waypoints".to_string(),
            });
        }
    }

    let mut runs = Vec::with_capacity(planners.len());
    for planner in planners {
        let algorithm = planner.algorithm();
        let started = Instant::now();
        let mut result = planner.find_path(graph, start, goal, options)?;
        let mut total = started.elapsed();
        for _ in 1..iterations {
            let started = Instant::now();
            result = planner.find_path(graph, start, goal, options)?;
            total += started.elapsed();
        }
        let mean_compute_ms = total.as_secs_f64() * 1000.0 / iterations as f64;
        info!(
            algorithm = %algorithm,
            expanded = result.expanded,
            mean_compute_ms,
            "algorithm timing"
        );
        runs.push(AlgorithmRun {
            algorithm,
            result,
            mean_compute_ms,
            iterations,
        });
    }

    Ok(AlgorithmComparison {
        start: start.to_string(),
        goal: goal.to_string(),
        runs,
    })
}
