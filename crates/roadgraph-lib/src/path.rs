use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::spatial::haversine_km;

/// Travel speed assumed when none is given, in km/h.
pub const DEFAULT_SPEED_KMH: f64 = 60.0;

/// Cooperative cancellation flag shared between a caller and a running search.
///
/// The search checks the flag once per frontier extraction.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every search holding a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// Per-query options shared by both search algorithms.
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Constant travel speed used for the time estimate, in km/h.
    pub speed_kmh: f64,
    /// Candidates whose path cost exceeds this bound are discarded.
    pub max_distance: Option<f64>,
    /// Nodes that must be discovered before the goal is accepted (A* only).
    pub waypoints: Vec<NodeId>,
    /// Optional cancellation flag.
    pub cancel: Option<CancellationToken>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            max_distance: None,
            waypoints: Vec::new(),
            cancel: None,
        }
    }
}

impl RouteOptions {
    pub fn with_speed(mut self, speed_kmh: f64) -> Self {
        self.speed_kmh = speed_kmh;
        self
    }

    pub fn with_max_distance(mut self, max_distance: f64) -> Self {
        self.max_distance = Some(max_distance);
        self
    }

    pub fn with_waypoints<I, S>(mut self, waypoints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.waypoints = waypoints.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Reject speeds and distance caps that would make the result meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.speed_kmh.is_finite() && self.speed_kmh > 0.0) {
            return Err(Error::InvalidRouteOption {
                option: "speed".to_string(),
                reason: format!("{} km/h is not a positive finite speed", self.speed_kmh),
            });
        }
        if let Some(limit) = self.max_distance {
            if limit.is_nan() || limit < 0.0 {
                return Err(Error::InvalidRouteOption {
                    option: "max_distance".to_string(),
                    reason: format!("{limit} must be a non-negative distance"),
                });
            }
        }
        Ok(())
    }

    /// Travel time in minutes for a distance in kilometres.
    pub fn travel_minutes(&self, distance_km: f64) -> f64 {
        (distance_km / self.speed_kmh) * 60.0
    }

    fn within_limit(&self, cost: f64) -> bool {
        self.max_distance.map_or(true, |limit| cost <= limit)
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(Error::SearchCancelled),
            _ => Ok(()),
        }
    }
}

/// Outcome of a single shortest-path query.
///
/// An unreachable goal yields an empty `path` with infinite `distance` and
/// `time` (serialized as `null` in JSON).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Nodes from start to goal inclusive.
    pub path: Vec<NodeId>,
    /// Sum of traversed edge weights in kilometres.
    pub distance: f64,
    /// Estimated travel time in minutes.
    pub time: f64,
    /// Number of nodes settled by the search.
    pub expanded: usize,
}

impl PathResult {
    fn single(node: &str) -> Self {
        Self {
            path: vec![node.to_string()],
            distance: 0.0,
            time: 0.0,
            expanded: 0,
        }
    }

    fn unreachable(expanded: usize) -> Self {
        Self {
            path: Vec::new(),
            distance: f64::INFINITY,
            time: f64::INFINITY,
            expanded,
        }
    }

    /// Whether a path to the goal exists.
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges traversed.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Run Dijkstra's algorithm from `start` to `goal`.
///
/// Waypoints are not supported by this algorithm and are rejected with
/// [`Error::UnsupportedRouteOption`].
pub fn dijkstra(
    graph: &Graph,
    start: &str,
    goal: &str,
    options: &RouteOptions,
) -> Result<PathResult> {
    options.validate()?;
    if !options.waypoints.is_empty() {
        return Err(Error::UnsupportedRouteOption {
            option: "waypoints".to_string(),
        });
    }
    graph.require_node(start)?;
    graph.require_node(goal)?;

    if start == goal {
        return Ok(PathResult::single(start));
    }

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        options.check_cancelled()?;

        let current_distance = match distances.get(entry.node) {
            Some(&distance) if entry.cost.0 > distance => continue,
            Some(&distance) => distance,
            None => continue,
        };
        expanded += 1;

        if entry.node == goal {
            let path = reconstruct_path(&parents, goal);
            debug!(algorithm = "dijkstra", start, goal, expanded, distance = current_distance, "route found");
            return Ok(PathResult {
                path,
                distance: current_distance,
                time: options.travel_minutes(current_distance),
                expanded,
            });
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            if !graph.contains(next) {
                trace!(from = entry.node, to = next, "skipping dangling edge");
                continue;
            }

            let next_cost = current_distance + edge.weight;
            if !options.within_limit(next_cost) {
                continue;
            }
            if next_cost < *distances.get(next).unwrap_or(&f64::INFINITY) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    debug!(algorithm = "dijkstra", start, goal, expanded, "goal unreachable");
    Ok(PathResult::unreachable(expanded))
}

/// Run A* search from `start` to `goal` guided by the Haversine distance.
///
/// Nodes without a coordinate get a zero estimate, which keeps the heuristic
/// admissible. When waypoints are given, the goal is only accepted once
/// every waypoint has been discovered (assigned a predecessor) by the
/// search; the start node counts as discovered. This does not force the
/// route to pass through the waypoints.
pub fn a_star(
    graph: &Graph,
    start: &str,
    goal: &str,
    options: &RouteOptions,
) -> Result<PathResult> {
    options.validate()?;
    graph.require_node(start)?;
    graph.require_node(goal)?;
    for waypoint in &options.waypoints {
        graph.require_node(waypoint)?;
    }

    let mut pending: BTreeSet<&str> = options
        .waypoints
        .iter()
        .map(String::as_str)
        .filter(|waypoint| *waypoint != start)
        .collect();

    if start == goal && pending.is_empty() {
        return Ok(PathResult::single(start));
    }

    let goal_coordinate = graph.coordinate(goal);
    let heuristic = |node: &str| match (graph.coordinate(node), goal_coordinate) {
        (Some(from), Some(to)) => haversine_km(from, to),
        _ => 0.0,
    };

    let mut g_score: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut expanded = 0usize;
    let mut goal_deferred = false;

    g_score.insert(start, 0.0);
    queue.push(AStarEntry::new(start, 0.0, heuristic(start)));

    while let Some(entry) = queue.pop() {
        options.check_cancelled()?;

        let current_score = match g_score.get(entry.node) {
            Some(&score) if entry.cost.0 > score => continue,
            Some(&score) => score,
            None => continue,
        };
        expanded += 1;

        if entry.node == goal {
            if pending.is_empty() {
                let path = reconstruct_path(&parents, goal);
                let distance = path_distance(graph, &path);
                debug!(algorithm = "a_star", start, goal, expanded, distance, "route found");
                return Ok(PathResult {
                    path,
                    distance,
                    time: options.travel_minutes(distance),
                    expanded,
                });
            }
            goal_deferred = true;
            debug!(
                pending = pending.len(),
                "goal reached before all waypoints were discovered; continuing"
            );
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            if !graph.contains(next) {
                trace!(from = entry.node, to = next, "skipping dangling edge");
                continue;
            }

            let tentative_g = current_score + edge.weight;
            if !options.within_limit(tentative_g) {
                continue;
            }
            if tentative_g < *g_score.get(next).unwrap_or(&f64::INFINITY) {
                g_score.insert(next, tentative_g);
                parents.insert(next, entry.node);
                queue.push(AStarEntry::new(next, tentative_g, heuristic(next)));

                // Re-admit a goal that was popped too early once the last
                // waypoint turns up; its score may not improve again.
                if pending.remove(next) && pending.is_empty() && goal_deferred {
                    if let Some(&goal_score) = g_score.get(goal) {
                        queue.push(AStarEntry::new(goal, goal_score, 0.0));
                    }
                }
            }
        }
    }

    debug!(algorithm = "a_star", start, goal, expanded, "goal unreachable");
    Ok(PathResult::unreachable(expanded))
}

/// Follow predecessors back from `terminal` and return the path in forward order.
///
/// The walk stops at the first node without a predecessor. A malformed map
/// containing a cycle is cut off after visiting every entry once.
pub fn reconstruct_path(predecessors: &HashMap<&str, &str>, terminal: &str) -> Vec<NodeId> {
    let mut path = vec![terminal.to_string()];
    let mut current = terminal;
    while let Some(&previous) = predecessors.get(current) {
        if path.len() > predecessors.len() {
            break;
        }
        path.push(previous.to_string());
        current = previous;
    }
    path.reverse();
    path
}

/// Sum the edge weights along `path`.
///
/// A missing edge between consecutive nodes (for instance after the graph
/// was edited) contributes zero for that segment.
pub fn path_distance(graph: &Graph, path: &[NodeId]) -> f64 {
    path.windows(2)
        .map(|pair| match graph.edge_weight(&pair[0], &pair[1]) {
            Some(weight) => weight,
            None => {
                debug!(from = %pair[0], to = %pair[1], "edge missing while summing path; counting 0");
                0.0
            }
        })
        .sum()
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, with the
        // lexicographically smallest node winning ties.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl<'a> AStarEntry<'a> {
    fn new(node: &'a str, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for AStarEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
