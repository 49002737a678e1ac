//! Route command handler for computing paths between nodes.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;

use roadgraph_lib::{
    plan_route, Error as RouteError, RouteAlgorithm, RouteOptions, RouteRequest, RouteSummary,
};

use super::{friendly_error, open_graph};
use crate::output::OutputFormat;

/// Algorithm names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    Dijkstra,
    #[default]
    #[value(name = "a-star", alias = "astar")]
    AStar,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node id.
    pub from: String,
    /// Destination node id.
    pub to: String,
    /// Algorithm to use when planning the route.
    pub algorithm: AlgorithmArg,
    /// Travel speed in km/h.
    pub speed: f64,
    /// Distance cap in kilometres.
    pub max_distance: Option<f64>,
    /// Waypoints that must be discovered before the goal is accepted.
    pub via: Vec<String>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let mut options = RouteOptions::default()
            .with_speed(self.speed)
            .with_waypoints(self.via.iter().cloned());
        if let Some(limit) = self.max_distance {
            options = options.with_max_distance(limit);
        }
        RouteRequest::new(self.from.clone(), self.to.clone(), self.algorithm.into())
            .with_options(options)
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    graph_path: Option<&Path>,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let (_, graph) = open_graph(graph_path)?;
    let request = args.to_request();

    let plan = plan_route(&graph, &request).map_err(friendly_error)?;

    let summary = match RouteSummary::from_plan(&graph, &plan) {
        Ok(summary) => summary,
        Err(RouteError::RouteNotFound { start, goal }) => {
            return Err(anyhow::anyhow!(format_route_not_found_message(
                &start,
                &goal,
                &request.options
            )))
        }
        Err(other) => return Err(other).context("failed to build route summary for display"),
    };

    format.render_route(&summary)
}

fn format_route_not_found_message(start: &str, goal: &str, options: &RouteOptions) -> String {
    let mut message = format!("No route found between {} and {}.", start, goal);
    let mut tips = Vec::new();
    if options.max_distance.is_some() {
        tips.push("increase --max-distance");
    }
    if !options.waypoints.is_empty() {
        tips.push("drop unreachable --via nodes");
    }
    if tips.is_empty() {
        message.push_str(" The nodes are not connected in this graph.");
    } else {
        message.push(' ');
        message.push_str(&format!("Try {}.", tips.join(", ")));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RouteCommandArgs {
        RouteCommandArgs {
            from: "A".into(),
            to: "J".into(),
            algorithm: AlgorithmArg::AStar,
            speed: 45.0,
            max_distance: Some(12.0),
            via: vec!["E".into()],
        }
    }

    #[test]
    fn request_carries_options() {
        let request = args().to_request();
        assert_eq!(request.algorithm, RouteAlgorithm::AStar);
        assert_eq!(request.options.speed_kmh, 45.0);
        assert_eq!(request.options.max_distance, Some(12.0));
        assert_eq!(request.options.waypoints, vec!["E".to_string()]);
    }

    #[test]
    fn not_found_message_suggests_relaxing_options() {
        let request = args().to_request();
        let message = format_route_not_found_message("A", "J", &request.options);
        assert!(message.starts_with("No route found between A and J."));
        assert!(message.contains("increase --max-distance"));
        assert!(message.contains("--via"));

        let plain = format_route_not_found_message("A", "K", &RouteOptions::default());
        assert!(plain.contains("not connected"));
    }
}
