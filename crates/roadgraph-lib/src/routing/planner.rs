//! Route planning strategies.
//!
//! The `RoutePlanner` trait wraps each search algorithm so the orchestration
//! in `plan_route` and `compare_algorithms` stays algorithm-agnostic.

use crate::error::Result;
use crate::graph::Graph;
use crate::path::{a_star, dijkstra, PathResult, RouteOptions};

use super::RouteAlgorithm;

/// Trait for route planning strategies.
pub trait RoutePlanner: Send + Sync {
    /// The algorithm identifier for this planner.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Execute the search on the given graph.
    fn find_path(
        &self,
        graph: &Graph,
        start: &str,
        goal: &str,
        options: &RouteOptions,
    ) -> Result<PathResult>;

    /// Whether the planner honours waypoint gating.
    fn supports_waypoints(&self) -> bool {
        false
    }
}

/// Dijkstra's algorithm planner.
#[derive(Debug, Clone, Default)]
pub struct DijkstraPlanner;

impl RoutePlanner for DijkstraPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: &str,
        goal: &str,
        options: &RouteOptions,
    ) -> Result<PathResult> {
        dijkstra(graph, start, goal, options)
    }
}

/// A* planner using the Haversine heuristic.
#[derive(Debug, Clone, Default)]
pub struct AStarPlanner;

impl RoutePlanner for AStarPlanner {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(
        &self,
        graph: &Graph,
        start: &str,
        goal: &str,
        options: &RouteOptions,
    ) -> Result<PathResult> {
        a_star(graph, start, goal, options)
    }

    fn supports_waypoints(&self) -> bool {
        true
    }
}

/// Select the planner for an algorithm.
pub fn select_planner(algorithm: RouteAlgorithm) -> Box<dyn RoutePlanner> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPlanner),
        RouteAlgorithm::AStar => Box::new(AStarPlanner),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dijkstra_planner_returns_correct_algorithm() {
        let planner = DijkstraPlanner;
        assert_eq!(planner.algorithm(), RouteAlgorithm::Dijkstra);
        assert!(!planner.supports_waypoints());
    }

    #[test]
    fn astar_planner_returns_correct_algorithm() {
        let planner = AStarPlanner;
        assert_eq!(planner.algorithm(), RouteAlgorithm::AStar);
        assert!(planner.supports_waypoints());
    }

    #[test]
    fn select_planner_chooses_correct_type() {
        for algorithm in RouteAlgorithm::ALL {
            assert_eq!(select_planner(algorithm).algorithm(), algorithm);
        }
    }
}
