//! Compare command: time both search algorithms on one query.

use std::path::Path;

use anyhow::Result;

use roadgraph_lib::{compare_algorithms, RouteOptions};

use super::{friendly_error, open_graph};
use crate::output::OutputFormat;

#[derive(Debug, Clone)]
pub struct CompareCommandArgs {
    pub from: String,
    pub to: String,
    pub iterations: usize,
    pub speed: f64,
    pub max_distance: Option<f64>,
}

pub fn handle_compare_command(
    graph_path: Option<&Path>,
    format: OutputFormat,
    args: &CompareCommandArgs,
) -> Result<()> {
    let (_, graph) = open_graph(graph_path)?;

    let mut options = RouteOptions::default().with_speed(args.speed);
    if let Some(limit) = args.max_distance {
        options = options.with_max_distance(limit);
    }

    let comparison = compare_algorithms(&graph, &args.from, &args.to, &options, args.iterations)
        .map_err(friendly_error)?;
    format.render_comparison(&comparison)
}
