//! Nearest command: resolve a coordinate to graph nodes.

use std::path::Path;

use anyhow::{bail, Result};

use roadgraph_lib::{Coordinate, NearestNodeIndex};

use super::open_graph;
use crate::output::OutputFormat;

#[derive(Debug, Clone)]
pub struct NearestCommandArgs {
    pub latitude: f64,
    pub longitude: f64,
    pub count: usize,
}

pub fn handle_nearest_command(
    graph_path: Option<&Path>,
    format: OutputFormat,
    args: &NearestCommandArgs,
) -> Result<()> {
    let point = Coordinate::new(args.latitude, args.longitude);
    if !point.is_valid() {
        bail!(
            "invalid coordinate ({}, {}); latitude must be within ±90 and longitude within ±180",
            args.latitude,
            args.longitude
        );
    }

    let (_, graph) = open_graph(graph_path)?;
    let index = NearestNodeIndex::build(&graph);
    if index.is_empty() {
        bail!("the graph has no nodes with coordinates");
    }

    let hits = index.nearest_n(point, args.count.max(1));
    format.render_nearest(&graph, &hits)
}
