mod error;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use error::CliResult;
use lv_core::{CrsKind, SpatialConfig};
use lv_graph::{Graph, build_graph_from_ways};
use lv_placement::{PointLoad, candidates_from_points, place_substation_detailed};
use lv_project::{GridInput, load_config, load_input};
use lv_spatial::NodeLocator;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lv-cli")]
#[command(about = "lvgrid CLI - low-voltage grid graph and substation placement", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate config and input documents
    Validate {
        /// Path to the config YAML/JSON file
        config_path: PathBuf,
        /// Path to the input YAML/JSON file
        input_path: PathBuf,
    },
    /// Build the way graph and print a summary
    Build {
        /// Path to the config YAML/JSON file
        config_path: PathBuf,
        /// Path to the input YAML/JSON file
        input_path: PathBuf,
    },
    /// Find the graph node nearest to a coordinate
    Nearest {
        /// Path to the config YAML/JSON file
        config_path: PathBuf,
        /// Path to the input YAML/JSON file
        input_path: PathBuf,
        /// X (or longitude) of the query point
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        /// Y (or latitude) of the query point
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Place a substation for the input's points
    Place {
        /// Path to the config YAML/JSON file
        config_path: PathBuf,
        /// Path to the input YAML/JSON file
        input_path: PathBuf,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            config_path,
            input_path,
        } => cmd_validate(&config_path, &input_path),
        Commands::Build {
            config_path,
            input_path,
        } => cmd_build(&config_path, &input_path),
        Commands::Nearest {
            config_path,
            input_path,
            x,
            y,
        } => cmd_nearest(&config_path, &input_path, x, y),
        Commands::Place {
            config_path,
            input_path,
            json,
        } => cmd_place(&config_path, &input_path, json),
    }
}

fn load(config_path: &Path, input_path: &Path) -> CliResult<(SpatialConfig, GridInput, Graph)> {
    let config = load_config(config_path)?.to_spatial_config()?;
    let input = load_input(input_path)?;
    let ways = input.to_ways()?;
    let (graph, _) = build_graph_from_ways(&ways, &config)?;
    Ok((config, input, graph))
}

fn cmd_validate(config_path: &Path, input_path: &Path) -> CliResult<()> {
    println!("Validating config: {}", config_path.display());
    let config = load_config(config_path)?;
    config.to_spatial_config()?;
    println!("Validating input: {}", input_path.display());
    let input = load_input(input_path)?;
    input.to_ways()?;
    println!("✓ Documents are valid");
    Ok(())
}

fn cmd_build(config_path: &Path, input_path: &Path) -> CliResult<()> {
    let start = Instant::now();
    let (config, input, graph) = load(config_path, input_path)?;

    let kind = match config.crs.kind() {
        Some(CrsKind::Projected) => "projected",
        Some(CrsKind::Geographic) => "geographic",
        None => "unclassified",
    };
    println!("✓ Graph built from {} ways", input.ways.len());
    println!("  CRS: {} ({kind})", config.crs);
    println!("  Nodes: {}", graph.node_count());
    println!("  Edges: {}", graph.edge_count());
    println!("  Time: {:.3} s", start.elapsed().as_secs_f64());
    Ok(())
}

fn cmd_nearest(config_path: &Path, input_path: &Path, x: f64, y: f64) -> CliResult<()> {
    let (config, _, graph) = load(config_path, input_path)?;
    let locator = NodeLocator::new(&graph, &config)?;
    let (node, dist) = locator.nearest_one(x, y)?;
    let coord = graph.coord(node)?;

    println!("Nearest node: {node}");
    println!("  Coordinate: ({}, {})", coord.x, coord.y);
    println!("  Distance: {dist:.3}");
    Ok(())
}

#[derive(Serialize)]
struct PlacementOutput {
    node: lv_core::OsmNodeId,
    x: f64,
    y: f64,
    power_distance: Option<f64>,
    candidates: usize,
}

fn cmd_place(config_path: &Path, input_path: &Path, json: bool) -> CliResult<()> {
    let (config, input, graph) = load(config_path, input_path)?;
    let locator = NodeLocator::new(&graph, &config)?;

    let points: Vec<PointLoad> = input
        .points
        .iter()
        .map(|p| PointLoad {
            coord: lv_core::Coord::new(p.x, p.y),
            capacity: p.capacity,
        })
        .collect();
    let candidates = candidates_from_points(&locator, &points)?;
    let placement = place_substation_detailed(&graph, &candidates)?;

    if json {
        let output = PlacementOutput {
            node: placement.node,
            x: placement.coord.x,
            y: placement.coord.y,
            power_distance: placement.power_distance,
            candidates: candidates.len(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("✓ Substation placed at node {}", placement.node);
        println!("  Coordinate: ({}, {})", placement.coord.x, placement.coord.y);
        match placement.power_distance {
            Some(pd) => println!("  Power distance: {pd:.3}"),
            None => println!("  Power distance: none (fallback to first candidate)"),
        }
        println!("  Candidates: {}", candidates.len());
    }
    Ok(())
}
