use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roadgraph_cli::commands::compare::{handle_compare_command, CompareCommandArgs};
use roadgraph_cli::commands::edit::{handle_edit_command, EditCommand};
use roadgraph_cli::commands::nearest::{handle_nearest_command, NearestCommandArgs};
use roadgraph_cli::commands::nodes::handle_nodes_command;
use roadgraph_cli::commands::route::{handle_route_command, AlgorithmArg, RouteCommandArgs};
use roadgraph_cli::output::OutputFormat;
use roadgraph_lib::{DEFAULT_COMPARE_ITERATIONS, DEFAULT_SPEED_KMH};

#[derive(Parser, Debug)]
#[command(author, version, about = "Shortest paths over weighted road graphs")]
struct Cli {
    /// Graph document to use (file or directory containing graph.json).
    /// Falls back to ROADGRAPH_GRAPH, then the platform data directory.
    #[arg(long, global = true)]
    graph: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest route between two nodes.
    Route {
        /// Starting node id.
        #[arg(long = "from")]
        from: String,
        /// Destination node id.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm.
        #[arg(long, value_enum, default_value_t = AlgorithmArg::AStar)]
        algorithm: AlgorithmArg,
        /// Travel speed in km/h used for the time estimate.
        #[arg(long, default_value_t = DEFAULT_SPEED_KMH)]
        speed: f64,
        /// Discard candidate routes longer than this many kilometres.
        #[arg(long)]
        max_distance: Option<f64>,
        /// Node that must be discovered before the goal is accepted (A* only). Repeatable.
        #[arg(long = "via")]
        via: Vec<String>,
    },
    /// Run Dijkstra and A* on the same query and compare their timings.
    Compare {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        /// Timed runs per algorithm.
        #[arg(long, default_value_t = DEFAULT_COMPARE_ITERATIONS)]
        iterations: usize,
        #[arg(long, default_value_t = DEFAULT_SPEED_KMH)]
        speed: f64,
        #[arg(long)]
        max_distance: Option<f64>,
    },
    /// Find the nodes closest to a coordinate.
    Nearest {
        /// Latitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        /// Longitude in decimal degrees.
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        /// Number of nodes to return.
        #[arg(long, default_value_t = 1)]
        count: usize,
    },
    /// List every node with its coordinate, degree and landmark.
    Nodes,
    #[command(flatten)]
    Edit(EditCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let graph = cli.graph.as_deref();
    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            speed,
            max_distance,
            via,
        } => handle_route_command(
            graph,
            cli.format,
            &RouteCommandArgs {
                from,
                to,
                algorithm,
                speed,
                max_distance,
                via,
            },
        ),
        Command::Compare {
            from,
            to,
            iterations,
            speed,
            max_distance,
        } => handle_compare_command(
            graph,
            cli.format,
            &CompareCommandArgs {
                from,
                to,
                iterations,
                speed,
                max_distance,
            },
        ),
        Command::Nearest { lat, lon, count } => handle_nearest_command(
            graph,
            cli.format,
            &NearestCommandArgs {
                latitude: lat,
                longitude: lon,
                count,
            },
        ),
        Command::Nodes => handle_nodes_command(graph, cli.format),
        Command::Edit(edit) => handle_edit_command(graph, cli.format, &edit),
    }
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
