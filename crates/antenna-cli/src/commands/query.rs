//! Traversal and geometric query commands

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::commands::network::PositionArgs;
use crate::output::{print_records, OutputFormat};
use crate::AppContext;
use antenna_core::{
    load_effects_file, render_map, Antenna, AntennaPath, Frequency, Intersection, Point,
};

#[derive(Args)]
pub struct BfsArgs {
    /// Column of the start antenna
    pub x: i32,
    /// Row of the start antenna
    pub y: i32,
    /// Queue capacity (defaults to the number of antennas)
    #[arg(short, long)]
    pub capacity: Option<usize>,
}

#[derive(Args)]
pub struct PathsArgs {
    /// Column of the start antenna
    pub x1: i32,
    /// Row of the start antenna
    pub y1: i32,
    /// Column of the goal antenna
    pub x2: i32,
    /// Row of the goal antenna
    pub y2: i32,
    /// Longest path in antennas (defaults to the number of antennas)
    #[arg(short, long)]
    pub capacity: Option<usize>,
    /// Only print the number of paths
    #[arg(long)]
    pub count: bool,
}

#[derive(Args)]
pub struct IntersectionsArgs {
    /// First frequency
    pub first: Frequency,
    /// Second frequency
    pub second: Frequency,
}

#[derive(Args)]
pub struct EffectsArgs {
    /// Keep locations with negative coordinates
    #[arg(long, conflicts_with = "from")]
    pub allow_negative: bool,
    /// Read the `#` cells of this map file instead of computing effects
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
    /// Draw the effects on the map instead of listing them
    #[arg(long)]
    pub render: bool,
}

pub fn run_dfs(args: &PositionArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let network = ctx.load_network()?;
    let start = network.find(args.x, args.y)?;

    let visited: Vec<Antenna> = network.depth_first(start)?.collect();
    tracing::info!("Depth-first traversal visited {} antennas", visited.len());
    print_records(&visited, ctx.format, "No antennas reached");
    Ok(())
}

pub fn run_bfs(args: &BfsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let network = ctx.load_network()?;
    let start = network.find(args.x, args.y)?;
    let capacity = args.capacity.unwrap_or(network.len());

    let visited = network
        .breadth_first(start, capacity)?
        .collect::<antenna_core::Result<Vec<Antenna>>>()?;
    tracing::info!("Breadth-first traversal visited {} antennas", visited.len());
    print_records(&visited, ctx.format, "No antennas reached");
    Ok(())
}

pub fn run_paths(args: &PathsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let network = ctx.load_network()?;
    let start = network.find(args.x1, args.y1)?;
    let goal = network.find(args.x2, args.y2)?;
    let capacity = args.capacity.unwrap_or(network.len());
    let (from, to) = (Point::new(args.x1, args.y1), Point::new(args.x2, args.y2));

    if args.count {
        let count = network.count_paths(start, goal, capacity)?;
        match ctx.format {
            OutputFormat::Json => println!("{}", serde_json::json!({ "paths": count })),
            _ => println!("{}", count),
        }
        return Ok(());
    }

    let paths = network
        .all_paths(start, goal, capacity)?
        .collect::<antenna_core::Result<Vec<AntennaPath>>>()?;
    tracing::info!("Found {} paths from {} to {}", paths.len(), from, to);

    if ctx.format == OutputFormat::Table && !paths.is_empty() {
        println!("Found {} paths from {} to {}:", paths.len(), from, to);
    }
    print_records(&paths, ctx.format, &format!("No path from {} to {}", from, to));
    Ok(())
}

pub fn run_intersections(args: &IntersectionsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let network = ctx.load_network()?;
    let found: Vec<Intersection> = network.intersections(args.first, args.second)?.collect();

    tracing::info!(
        "Found {} intersections between '{}' and '{}'",
        found.len(),
        args.first,
        args.second
    );
    print_records(
        &found,
        ctx.format,
        &format!("No intersections between '{}' and '{}'", args.first, args.second),
    );
    Ok(())
}

pub fn run_effects(args: &EffectsArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let (effects, network) = match &args.from {
        Some(path) => {
            let effects = load_effects_file(path)
                .with_context(|| format!("Failed to load effects from {}", path.display()))?;
            // The antennas are only needed to draw the map
            let network = if args.render {
                Some(ctx.load_network()?)
            } else {
                None
            };
            (effects, network)
        }
        None => {
            let network = ctx.load_network()?;
            (network.harmful_effects(args.allow_negative), Some(network))
        }
    };
    tracing::info!("Found {} harmful effect locations", effects.len());

    if let Some(network) = network.filter(|_| args.render) {
        print!("{}", render_map(&network, &effects)?);
        return Ok(());
    }
    print_records(&effects, ctx.format, "No harmful effects");
    Ok(())
}
