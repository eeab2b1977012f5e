//! Antenna Core - Ordered antenna network graph engine
//!
//! This crate provides the vertex store, adjacency layer, traversals,
//! path enumeration and geometric queries over a network of antennas
//! placed on a grid map.

pub mod adjacency;
pub mod antenna;
pub mod config;
pub mod effects;
pub mod error;
pub mod geometry;
pub mod limits;
pub mod map;
pub mod network;
pub mod paths;
pub mod traversal;

pub use adjacency::InterlinkMode;
pub use antenna::{Antenna, Frequency, Point, VertexId};
pub use config::NetworkConfig;
pub use error::{Error, Result};
pub use geometry::{Intersection, Intersections};
pub use limits::{DEFAULT_MAX_X, MAX_RENDER_CELLS};
pub use map::{
    load_effects, load_effects_file, load_map, load_map_file, parse_effects, parse_map, render_map,
};
pub use network::{Network, Vertices};
pub use paths::{AllPaths, AntennaPath};
pub use traversal::{BreadthFirst, DepthFirst, VisitSet};
