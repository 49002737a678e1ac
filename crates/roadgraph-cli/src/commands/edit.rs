//! Graph editor subcommands. Each one loads the graph document, applies a
//! single edit and writes the document back.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use serde::Serialize;
use tracing::info;

use roadgraph_lib::{haversine_km, load_graph, resolve_graph_path, save_graph, Coordinate, Graph};

use super::friendly_error;
use crate::output::OutputFormat;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum EditCommand {
    /// Add a node, optionally with a coordinate and landmark name.
    AddNode {
        #[arg(long)]
        id: String,
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
        #[arg(long)]
        landmark: Option<String>,
    },
    /// Add or update an edge. Both directions unless --directed is given.
    Connect {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Edge weight in km; defaults to the great-circle distance.
        #[arg(long)]
        weight: Option<f64>,
        #[arg(long)]
        directed: bool,
    },
    /// Remove an edge. Both directions unless --directed is given.
    Disconnect {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        #[arg(long)]
        directed: bool,
    },
    /// Remove a node and every edge touching it.
    RemoveNode {
        #[arg(long)]
        id: String,
    },
}

/// Result of an edit, printed after the graph is saved.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EditOutcome {
    pub action: &'static str,
    pub message: String,
    pub graph: PathBuf,
    pub nodes: usize,
    pub edges: usize,
}

/// Apply one edit to an in-memory graph and describe what changed.
pub fn apply_edit(graph: &mut Graph, command: &EditCommand) -> Result<(&'static str, String)> {
    match command {
        EditCommand::AddNode {
            id,
            lat,
            lon,
            landmark,
        } => {
            let coordinate = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(Coordinate::new(*lat, *lon)),
                _ => None,
            };
            graph.add_node(id.as_str(), coordinate)?;
            if let Some(name) = landmark {
                graph.set_landmark(id, Some(name.clone()))?;
            }
            Ok(("add-node", format!("Added node {id}")))
        }
        EditCommand::Connect {
            from,
            to,
            weight,
            directed,
        } => {
            graph.require_node(from).map_err(friendly_error)?;
            graph.require_node(to).map_err(friendly_error)?;
            let weight = match weight {
                Some(weight) => *weight,
                None => straight_line_weight(graph, from, to)?,
            };
            if *directed {
                graph.upsert_edge(from, to, weight)?;
                Ok(("connect", format!("Set edge {from} -> {to} to {weight:.3} km")))
            } else {
                graph.connect(from, to, weight)?;
                Ok(("connect", format!("Set edge {from} <-> {to} to {weight:.3} km")))
            }
        }
        EditCommand::Disconnect { from, to, directed } => {
            let result = if *directed {
                graph.remove_edge(from, to)
            } else {
                graph.disconnect(from, to)
            };
            result.map_err(friendly_error)?;
            Ok(("disconnect", format!("Removed edge {from} - {to}")))
        }
        EditCommand::RemoveNode { id } => {
            graph.remove_node(id).map_err(friendly_error)?;
            Ok(("remove-node", format!("Removed node {id}")))
        }
    }
}

fn straight_line_weight(graph: &Graph, from: &str, to: &str) -> Result<f64> {
    match (graph.coordinate(from), graph.coordinate(to)) {
        (Some(a), Some(b)) => Ok(haversine_km(a, b)),
        _ => Err(anyhow!(
            "--weight is required because {from} or {to} has no coordinate"
        )),
    }
}

/// Handle any editor subcommand.
///
/// A missing graph document is treated as an empty graph so a new one can
/// be built up node by node.
pub fn handle_edit_command(
    graph_path: Option<&Path>,
    format: OutputFormat,
    command: &EditCommand,
) -> Result<()> {
    let path = resolve_graph_path(graph_path)
        .context("failed to resolve the graph document location")?;

    let mut graph = if path.exists() {
        load_graph(&path).with_context(|| format!("failed to load graph from {}", path.display()))?
    } else {
        info!(path = %path.display(), "graph document does not exist yet; starting empty");
        Graph::new()
    };

    let (action, message) = apply_edit(&mut graph, command)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    save_graph(&graph, &path)
        .with_context(|| format!("failed to save graph to {}", path.display()))?;

    format.render_edit(&EditOutcome {
        action,
        message,
        graph: path,
        nodes: graph.node_count(),
        edges: graph.edge_count(),
    })
}
