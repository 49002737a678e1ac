//! Output formatting for command results.
//!
//! Every command renders through [`OutputFormat`] so `--format` behaves the
//! same everywhere: `text` for terminals, `rich` for Markdown, `json` for
//! scripts.

use std::fmt::Write as _;
use std::io::{self, Write};

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

use roadgraph_lib::{AlgorithmComparison, Graph, NearestNode, RouteRenderMode, RouteSummary};

use crate::commands::edit::EditOutcome;
use crate::commands::nodes::NodeRow;
use crate::terminal::ColorPalette;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Rich,
    Json,
}

impl OutputFormat {
    pub fn render_route(self, summary: &RouteSummary) -> Result<()> {
        match self {
            OutputFormat::Text => print!("{}", summary.render(RouteRenderMode::PlainText)),
            OutputFormat::Rich => print!("{}", summary.render(RouteRenderMode::RichText)),
            OutputFormat::Json => render_json(summary)?,
        }
        Ok(())
    }

    pub fn render_comparison(self, comparison: &AlgorithmComparison) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(comparison)?,
            OutputFormat::Text => print!("{}", comparison_text(comparison, ColorPalette::detect())),
            OutputFormat::Rich => print!("{}", comparison_markdown(comparison)),
        }
        Ok(())
    }

    pub fn render_nearest(self, graph: &Graph, hits: &[NearestNode]) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(&hits)?,
            OutputFormat::Text | OutputFormat::Rich => {
                let p = ColorPalette::detect();
                for hit in hits {
                    println!(
                        "{}{}{} {}({}){} {:.3} km",
                        p.bold,
                        hit.node,
                        p.reset,
                        p.gray,
                        graph.label(&hit.node),
                        p.reset,
                        hit.distance_km
                    );
                }
            }
        }
        Ok(())
    }

    pub fn render_nodes(self, rows: &[NodeRow]) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(&rows)?,
            OutputFormat::Text | OutputFormat::Rich => {
                print!("{}", nodes_text(rows, ColorPalette::detect()))
            }
        }
        Ok(())
    }

    pub fn render_edit(self, outcome: &EditOutcome) -> Result<()> {
        match self {
            OutputFormat::Json => render_json(outcome)?,
            OutputFormat::Text | OutputFormat::Rich => println!(
                "{} ({} nodes, {} edges in {})",
                outcome.message,
                outcome.nodes,
                outcome.edges,
                outcome.graph.display()
            ),
        }
        Ok(())
    }
}

/// Write a value to stdout as pretty JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn comparison_text(comparison: &AlgorithmComparison, p: ColorPalette) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{}Comparison:{} {} -> {}",
        p.bold, p.reset, comparison.start, comparison.goal
    );
    for run in &comparison.runs {
        let outcome = if run.result.is_found() {
            format!(
                "{:.2} km, {:.1} min, {} hops",
                run.result.distance,
                run.result.time,
                run.result.hop_count()
            )
        } else {
            format!("{}no route{}", p.red, p.reset)
        };
        let _ = writeln!(
            buffer,
            "  {:<9} {}  {}{} expanded, {:.4} ms avg over {} runs{}",
            run.algorithm.to_string(),
            outcome,
            p.gray,
            run.result.expanded,
            run.mean_compute_ms,
            run.iterations,
            p.reset
        );
    }
    if !comparison.distances_agree(1e-9) {
        let _ = writeln!(
            buffer,
            "{}warning:{} algorithms disagree on the route length",
            p.red, p.reset
        );
    }
    buffer
}

fn comparison_markdown(comparison: &AlgorithmComparison) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "**Comparison** _{} → {}_\n",
        comparison.start, comparison.goal
    );
    let _ = writeln!(buffer, "| algorithm | distance (km) | time (min) | expanded | avg ms |");
    let _ = writeln!(buffer, "|---|---|---|---|---|");
    for run in &comparison.runs {
        let _ = writeln!(
            buffer,
            "| `{}` | {:.2} | {:.1} | {} | {:.4} |",
            run.algorithm, run.result.distance, run.result.time, run.result.expanded, run.mean_compute_ms
        );
    }
    buffer
}

fn nodes_text(rows: &[NodeRow], p: ColorPalette) -> String {
    let mut buffer = String::new();
    for row in rows {
        let coordinate = row
            .coordinate
            .map(|c| format!("{:.5}, {:.5}", c.latitude, c.longitude))
            .unwrap_or_else(|| "no coordinate".to_string());
        let _ = write!(
            buffer,
            "{}{}{} [{}] {} edge{}",
            p.bold,
            row.id,
            p.reset,
            coordinate,
            row.degree,
            if row.degree == 1 { "" } else { "s" }
        );
        if let Some(landmark) = &row.landmark {
            let _ = write!(buffer, " {}{}{}", p.cyan, landmark, p.reset);
        }
        buffer.push('\n');
    }
    buffer
}
