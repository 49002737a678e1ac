use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the roadgraph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Graph document could not be located at the resolved path.
    #[error("graph document not found at {path}")]
    GraphNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default graph location")]
    ProjectDirsUnavailable,

    /// Raised when a node identifier could not be found in the graph.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when adding a node whose identifier is already taken.
    #[error("node {name} already exists")]
    DuplicateNode { name: String },

    /// Raised when removing an edge that is not present.
    #[error("no edge from {from} to {to}")]
    EdgeNotFound { from: String, to: String },

    /// Raised when a consumer requires a path but the goal is unreachable.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when a routing option is not meaningful for the selected algorithm.
    #[error("route option {option} is not supported by this algorithm")]
    UnsupportedRouteOption { option: String },

    /// Raised when a routing option carries an unusable value.
    #[error("invalid value for {option}: {reason}")]
    InvalidRouteOption { option: String, reason: String },

    /// Raised when an edge weight is negative or not a finite number.
    #[error("invalid weight {weight} on edge {from} -> {to}; weights must be finite and non-negative")]
    InvalidEdgeWeight { from: String, to: String, weight: f64 },

    /// Raised when a coordinate falls outside the latitude/longitude ranges.
    #[error("invalid coordinate ({latitude}, {longitude}) for node {node}")]
    InvalidCoordinate {
        node: String,
        latitude: f64,
        longitude: f64,
    },

    /// The caller cancelled the search before it finished.
    #[error("search cancelled")]
    SearchCancelled,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parse and serialization errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
