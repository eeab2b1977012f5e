//! Input validation limits for coordinates and frequencies

use crate::error::{Error, Result};

/// Default maximum column (x) of an antenna on the map (100)
pub const DEFAULT_MAX_X: i32 = 100;

/// Largest grid, in cells, that a map is rendered into
pub const MAX_RENDER_CELLS: u64 = 1 << 24;

/// Validate antenna coordinates against the configured column bound
pub fn validate_coordinates(x: i32, y: i32, max_x: i32) -> Result<()> {
    if x < 0 || y < 0 || x > max_x {
        return Err(Error::InvalidCoordinates {
            x: x.into(),
            y: y.into(),
            max_x,
        });
    }
    Ok(())
}

/// Validate a frequency symbol (A-Z)
pub fn validate_frequency(symbol: char) -> Result<()> {
    if !symbol.is_ascii_uppercase() {
        return Err(Error::InvalidFrequency(symbol));
    }
    Ok(())
}
