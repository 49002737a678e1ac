// Module exports for CLI subcommands
//
// Each module handles a specific CLI subcommand. main.rs dispatches to these
// handlers, keeping the entry point focused on parsing and coordination.

pub mod compare;
pub mod edit;
pub mod nearest;
pub mod nodes;
pub mod route;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use roadgraph_lib::{load_graph, resolve_graph_path, Error as LibError, Graph};

/// Resolve and load the graph document selected by `--graph` / `ROADGRAPH_GRAPH`.
pub fn open_graph(explicit: Option<&Path>) -> Result<(PathBuf, Graph)> {
    let path = resolve_graph_path(explicit)
        .context("failed to resolve the graph document location")?;
    let graph = load_graph(&path)
        .with_context(|| format!("failed to load graph from {}", path.display()))?;
    Ok((path, graph))
}

/// Turn library errors into messages aimed at someone typing node ids.
pub fn friendly_error(err: LibError) -> anyhow::Error {
    match err {
        LibError::UnknownNode { name, suggestions } => {
            anyhow::anyhow!(format_unknown_node_message(&name, &suggestions))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_node_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown node '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}
