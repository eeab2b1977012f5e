//! Vertex and edge commands

use clap::Args;

use crate::output::{print_records, OutputFormat};
use crate::AppContext;
use antenna_core::{render_map, Antenna, Frequency, Network, Point};

#[derive(Args)]
pub struct PositionArgs {
    /// Column of the antenna
    pub x: i32,
    /// Row of the antenna
    pub y: i32,
}

#[derive(Args)]
pub struct InsertArgs {
    /// Frequency symbol (A-Z)
    pub frequency: Frequency,
    /// Column of the antenna
    pub x: i32,
    /// Row of the antenna
    pub y: i32,
}

#[derive(Args)]
pub struct LinkArgs {
    /// Column of the source antenna
    pub x1: i32,
    /// Row of the source antenna
    pub y1: i32,
    /// Column of the target antenna
    pub x2: i32,
    /// Row of the target antenna
    pub y2: i32,
    /// Apply to the reverse edge as well
    #[arg(long)]
    pub both: bool,
}

fn antennas(network: &Network) -> Vec<Antenna> {
    network.vertices().map(|(_, antenna)| antenna).collect()
}

/// Print the network after a mutation
///
/// Falls back to the antenna table when the map is too large to draw.
fn print_network(network: &Network, ctx: &AppContext) {
    if ctx.format == OutputFormat::Table {
        match render_map(network, &[]) {
            Ok(map) => {
                print!("{}", map);
                return;
            }
            Err(e) => tracing::warn!("Not drawing the map: {}", e),
        }
    }
    print_records(&antennas(network), ctx.format, "No antennas in network");
}

fn print_edges(network: &Network, source: Point, ctx: &AppContext) -> anyhow::Result<()> {
    let id = network.find(source.x, source.y)?;
    let targets: Vec<Antenna> = network.edges_of(id)?.map(|(_, antenna)| antenna).collect();
    tracing::info!("Antenna at {} has {} edges", source, targets.len());
    print_records(&targets, ctx.format, &format!("No edges from {}", source));
    Ok(())
}

pub fn run_vertices(ctx: &AppContext) -> anyhow::Result<()> {
    let network = ctx.load_network()?;
    let antennas = antennas(&network);
    tracing::info!("Found {} antennas", antennas.len());
    print_records(&antennas, ctx.format, "No antennas in network");
    Ok(())
}

pub fn run_edges(args: &PositionArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let network = ctx.load_network()?;
    print_edges(&network, Point::new(args.x, args.y), ctx)
}

pub fn run_insert(args: &InsertArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut network = ctx.load_network()?;
    network.insert_ordered(args.frequency, args.x, args.y)?;

    if ctx.format == OutputFormat::Table {
        println!(
            "Inserted antenna '{}' at {}",
            args.frequency,
            Point::new(args.x, args.y)
        );
    }
    print_network(&network, ctx);
    Ok(())
}

pub fn run_remove(args: &PositionArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut network = ctx.load_network()?;
    let frequency = network.remove(args.x, args.y)?;

    if ctx.format == OutputFormat::Table {
        println!(
            "Removed antenna '{}' from {}",
            frequency,
            Point::new(args.x, args.y)
        );
    }
    print_network(&network, ctx);
    Ok(())
}

pub fn run_link(args: &LinkArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut network = ctx.load_network()?;
    let source = network.find(args.x1, args.y1)?;
    let target = network.find(args.x2, args.y2)?;

    network.add_edge(source, target, ctx.mode.check_duplicates)?;
    if args.both {
        network.add_edge(target, source, ctx.mode.check_duplicates)?;
    }

    print_edges(&network, Point::new(args.x1, args.y1), ctx)
}

pub fn run_unlink(args: &LinkArgs, ctx: &AppContext) -> anyhow::Result<()> {
    let mut network = ctx.load_network()?;
    let source = network.find(args.x1, args.y1)?;
    let target = network.find(args.x2, args.y2)?;

    network.remove_edge(source, target)?;
    if args.both {
        network.remove_edge(target, source)?;
    }

    print_edges(&network, Point::new(args.x1, args.y1), ctx)
}
