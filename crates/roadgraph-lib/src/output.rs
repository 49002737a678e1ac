use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{Graph, NodeId};
use crate::routing::{RouteAlgorithm, RoutePlan};

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    PlainText,
    RichText,
}

/// Endpoint within a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteEndpoint {
    pub id: NodeId,
    pub label: String,
}

/// One edge traversed by a planned route.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteStep {
    /// 1-based position within the route.
    pub index: usize,
    pub from: NodeId,
    pub to: NodeId,
    pub from_label: String,
    pub to_label: String,
    /// Edge weight in kilometres.
    pub distance: f64,
    /// Travel time for this edge in minutes.
    pub time: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub hops: usize,
    pub start: RouteEndpoint,
    pub goal: RouteEndpoint,
    pub total_distance: f64,
    pub total_time: f64,
    pub expanded: usize,
    pub path: Vec<NodeId>,
    pub steps: Vec<RouteStep>,
}

impl RouteSummary {
    /// Convert a [`RoutePlan`] into a per-step summary with landmark labels.
    ///
    /// Step times are derived from the plan's overall pace so they sum to the
    /// plan's total time.
    pub fn from_plan(graph: &Graph, plan: &RoutePlan) -> Result<Self> {
        let result = &plan.result;
        let (Some(first), Some(last)) = (result.path.first(), result.path.last()) else {
            return Err(Error::RouteNotFound {
                start: plan.start.clone(),
                goal: plan.goal.clone(),
            });
        };

        let minutes_per_km = if result.distance > 0.0 {
            result.time / result.distance
        } else {
            0.0
        };

        let steps = result
            .path
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let distance = graph.edge_weight(&pair[0], &pair[1]).unwrap_or(0.0);
                RouteStep {
                    index: index + 1,
                    from: pair[0].clone(),
                    to: pair[1].clone(),
                    from_label: graph.label(&pair[0]),
                    to_label: graph.label(&pair[1]),
                    distance,
                    time: distance * minutes_per_km,
                }
            })
            .collect::<Vec<_>>();

        Ok(Self {
            algorithm: plan.algorithm,
            hops: plan.hop_count(),
            start: RouteEndpoint {
                id: first.clone(),
                label: graph.label(first),
            },
            goal: RouteEndpoint {
                id: last.clone(),
                label: graph.label(last),
            },
            total_distance: result.distance,
            total_time: result.time,
            expanded: result.expanded,
            path: result.path.clone(),
            steps,
        })
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::RichText => self.render_rich(),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, algorithm: {})",
            self.start.label, self.goal.label, self.hops, self.algorithm
        );
        let _ = writeln!(buffer, "Path: {}", self.path.join(" -> "));
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "{:>3}: {} -> {} ({:.2} km, {:.1} min)",
                step.index, step.from_label, step.to_label, step.distance, step.time
            );
        }
        let _ = writeln!(
            buffer,
            "Total: {:.2} km, {:.1} min ({} nodes expanded)",
            self.total_distance, self.total_time, self.expanded
        );
        buffer
    }

    fn render_rich(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "**Route** _{} → {}_ ({} hops, algorithm: `{}`)",
            self.start.label, self.goal.label, self.hops, self.algorithm
        );
        for step in &self.steps {
            let _ = writeln!(
                buffer,
                "* {:>2}. **{}** → **{}** (`{:.2} km`, `{:.1} min`)",
                step.index, step.from_label, step.to_label, step.distance, step.time
            );
        }
        let _ = writeln!(
            buffer,
            "**Total:** {:.2} km in {:.1} min",
            self.total_distance, self.total_time
        );
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{plan_route, RouteRequest};
    use crate::test_helpers::triangle_graph;

    fn summary() -> RouteSummary {
        let mut graph = triangle_graph();
        graph.set_landmark("A", Some("Harbour".into())).unwrap();
        let plan = plan_route(&graph, &RouteRequest::dijkstra("A", "C")).unwrap();
        RouteSummary::from_plan(&graph, &plan).unwrap()
    }

    #[test]
    fn steps_carry_labels_and_weights() {
        let summary = summary();
        assert_eq!(summary.steps.len(), 2);
        assert_eq!(summary.start.label, "Harbour");
        assert_eq!(summary.goal.label, "Node C");
        assert_eq!(summary.steps[0].from_label, "Harbour");
        assert_eq!(summary.steps[0].to_label, "Node B");
        assert_eq!(summary.steps[1].distance, 4.0);
    }

    #[test]
    fn step_times_sum_to_total() {
        let summary = summary();
        let sum: f64 = summary.steps.iter().map(|s| s.time).sum();
        assert!((sum - summary.total_time).abs() < 1e-9);
    }

    #[test]
    fn plain_render_lists_every_step() {
        let text = summary().render(RouteRenderMode::PlainText);
        assert!(text.starts_with("Route: Harbour -> Node C (2 hops, algorithm: dijkstra)"));
        assert!(text.contains("Path: A -> B -> C"));
        assert!(text.contains("  1: Harbour -> Node B (3.00 km, 3.0 min)"));
        assert!(text.contains("Total: 7.00 km, 7.0 min"));
    }

    #[test]
    fn rich_render_uses_markdown() {
        let text = summary().render(RouteRenderMode::RichText);
        assert!(text.contains("**Route**"));
        assert!(text.contains("`dijkstra`"));
    }

    #[test]
    fn unreachable_plan_is_route_not_found() {
        let mut graph = triangle_graph();
        graph.add_node("Island", None).unwrap();
        let plan = plan_route(&graph, &RouteRequest::a_star("A", "Island")).unwrap();
        let err = RouteSummary::from_plan(&graph, &plan).unwrap_err();
        assert!(matches!(err, Error::RouteNotFound { .. }));
    }

    #[test]
    fn single_node_route_has_no_steps() {
        let graph = triangle_graph();
        let plan = plan_route(&graph, &RouteRequest::a_star("B", "B")).unwrap();
        let summary = RouteSummary::from_plan(&graph, &plan).unwrap();
        assert!(summary.steps.is_empty());
        assert_eq!(summary.total_time, 0.0);
    }
}
