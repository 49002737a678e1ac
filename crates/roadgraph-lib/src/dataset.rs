use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Environment variable that overrides the default graph document location.
pub const GRAPH_PATH_ENV: &str = "ROADGRAPH_GRAPH";

/// Default filename for the graph document in the platform data directory.
const GRAPH_FILENAME: &str = "graph.json";

/// Resolve the default graph location using platform-specific project directories.
pub fn default_graph_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "roadgraph", "roadgraph").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(GRAPH_FILENAME))
}

/// Resolve which graph document to use.
///
/// Precedence: the explicit path, then `ROADGRAPH_GRAPH`, then the platform
/// data directory. A directory is resolved to `graph.json` inside it. The
/// returned path is not checked for existence.
pub fn resolve_graph_path(explicit: Option<&Path>) -> Result<PathBuf> {
    let candidate = match explicit {
        Some(path) => path.to_path_buf(),
        None => match env::var_os(GRAPH_PATH_ENV) {
            Some(value) if !value.is_empty() => PathBuf::from(value),
            _ => default_graph_path()?,
        },
    };

    let resolved = if candidate.is_dir() {
        candidate.join(GRAPH_FILENAME)
    } else {
        candidate
    };
    debug!(path = %resolved.display(), "resolved graph document path");
    Ok(resolved)
}
