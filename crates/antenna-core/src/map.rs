//! Text map loading and rendering
//!
//! A map is a grid of characters, one row per line. Letters are antennas;
//! every other character is empty ground.

use crate::antenna::{Frequency, Point, VertexId};
use crate::config::NetworkConfig;
use crate::error::{Error, Result};
use crate::limits::{validate_coordinates, MAX_RENDER_CELLS};
use crate::network::Network;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Map symbol of a harmful effect cell
pub const EFFECT_SYMBOL: u8 = b'#';

/// Call `visit` with every byte of the map and its column and row
///
/// Lines are raw bytes; line terminators are not visited.
fn scan<R, F>(mut reader: R, mut visit: F) -> Result<()>
where
    R: BufRead,
    F: FnMut(u8, usize, usize) -> Result<()>,
{
    let mut line = Vec::new();
    let mut row = 0;
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(());
        }
        for (column, byte) in line.iter().copied().enumerate() {
            if byte != b'\n' && byte != b'\r' {
                visit(byte, column, row)?;
            }
        }
        row += 1;
    }
}

/// Grid position of a map cell, checked against the column bound
fn cell_position(column: usize, row: usize, max_x: i32) -> Result<Point> {
    match (i32::try_from(column), i32::try_from(row)) {
        (Ok(x), Ok(y)) => {
            validate_coordinates(x, y, max_x)?;
            Ok(Point::new(x, y))
        }
        _ => Err(Error::InvalidCoordinates {
            x: i64::try_from(column).unwrap_or(i64::MAX),
            y: i64::try_from(row).unwrap_or(i64::MAX),
            max_x,
        }),
    }
}

/// Load a network from a map
///
/// Rows arrive top to bottom and columns left to right, so antennas are
/// appended straight onto the tail of the store.
pub fn load_map<R: BufRead>(reader: R, config: NetworkConfig) -> Result<Network> {
    let mut network = Network::new(config);
    let mut tail: Option<VertexId> = None;

    scan(reader, |byte, column, row| {
        let symbol = byte as char;
        let frequency = if symbol.is_ascii_uppercase() {
            Frequency::new(symbol)?
        } else if config.accept_lowercase && symbol.is_ascii_lowercase() {
            Frequency::folded(symbol)?
        } else {
            return Ok(());
        };

        let at = cell_position(column, row, config.max_x)?;
        tail = Some(network.append_unordered(tail, frequency, at.x, at.y)?);
        Ok(())
    })?;

    tracing::debug!("Loaded {} antennas from map", network.len());
    Ok(network)
}

/// Load a network from a map file
pub fn load_map_file(path: impl AsRef<Path>, config: NetworkConfig) -> Result<Network> {
    let path = path.as_ref();
    tracing::debug!("Reading map from {}", path.display());
    let file = File::open(path)?;
    load_map(BufReader::new(file), config)
}

/// Load a network from map text
pub fn parse_map(text: &str, config: NetworkConfig) -> Result<Network> {
    load_map(text.as_bytes(), config)
}

/// Load the harmful effect cells (`#`) of a map, sorted by row then column
pub fn load_effects<R: BufRead>(reader: R) -> Result<Vec<Point>> {
    let mut effects = BTreeSet::new();
    scan(reader, |byte, column, row| {
        if byte == EFFECT_SYMBOL {
            effects.insert(cell_position(column, row, i32::MAX)?);
        }
        Ok(())
    })?;

    tracing::debug!("Loaded {} harmful effect locations from map", effects.len());
    Ok(effects.into_iter().collect())
}

/// Load the harmful effect cells of a map file
pub fn load_effects_file(path: impl AsRef<Path>) -> Result<Vec<Point>> {
    let path = path.as_ref();
    tracing::debug!("Reading harmful effects from {}", path.display());
    let file = File::open(path)?;
    load_effects(BufReader::new(file))
}

/// Load the harmful effect cells of map text
pub fn parse_effects(text: &str) -> Result<Vec<Point>> {
    load_effects(text.as_bytes())
}

/// Render the network as a map
///
/// The grid spans every antenna and every non-negative effect point.
/// Effect cells that hold no antenna are drawn as `#`. Grids larger than
/// [`MAX_RENDER_CELLS`] fail with [`Error::MapTooLarge`].
pub fn render_map(network: &Network, harmful: &[Point]) -> Result<String> {
    let effects: BTreeSet<Point> = harmful
        .iter()
        .copied()
        .filter(|point| point.x >= 0 && point.y >= 0)
        .collect();

    let mut width: u64 = 0;
    let mut height: u64 = 0;
    let points = network
        .vertices()
        .map(|(_, antenna)| antenna.position())
        .chain(effects.iter().copied());
    for point in points {
        width = width.max(point.x as u64 + 1);
        height = height.max(point.y as u64 + 1);
    }

    if width.saturating_mul(height) > MAX_RENDER_CELLS {
        return Err(Error::MapTooLarge {
            width,
            height,
            limit: MAX_RENDER_CELLS,
        });
    }

    // One extra byte per row for the line break
    let stride = width as usize + 1;
    let mut grid = vec![b'.'; stride * height as usize];
    for row in 0..height as usize {
        grid[row * stride + stride - 1] = b'\n';
    }
    for point in &effects {
        grid[point.y as usize * stride + point.x as usize] = EFFECT_SYMBOL;
    }
    for (_, antenna) in network.vertices() {
        grid[antenna.y as usize * stride + antenna.x as usize] = antenna.frequency.as_char() as u8;
    }

    Ok(grid.into_iter().map(char::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::DEFAULT_MAX_X;
    use std::io::Write;

    const MAP: &str = "....\n.A..\n....\n..A.\n";

    #[test]
    fn test_parse_map() {
        let network = parse_map("..B.\nA..a\n", NetworkConfig::default()).unwrap();
        let antennas: Vec<String> = network.vertices().map(|(_, a)| a.to_string()).collect();

        assert_eq!(antennas, vec!["'B'(2, 0)", "'A'(0, 1)"]);
    }

    #[test]
    fn test_parse_map_lowercase() {
        let config = NetworkConfig::default().accept_lowercase(true);
        let network = parse_map("a.\n.B\r\n", config).unwrap();
        let antennas: Vec<String> = network.vertices().map(|(_, a)| a.to_string()).collect();

        assert_eq!(antennas, vec!["'A'(0, 0)", "'B'(1, 1)"]);
    }

    #[test]
    fn test_parse_map_rejects_wide_rows() {
        let config = NetworkConfig::default().with_max_x(3);
        assert!(parse_map("...A\n", config).is_ok());
        assert!(matches!(
            parse_map("....A\n", config),
            Err(Error::InvalidCoordinates { x: 4, y: 0, max_x: 3 })
        ));
    }

    #[test]
    fn test_parse_empty_map() {
        let network = parse_map("", NetworkConfig::default()).unwrap();
        assert!(network.is_empty());
        assert_eq!(render_map(&network, &[]).unwrap(), "");
    }

    #[test]
    fn test_loaded_map_stays_sorted() {
        let mut network = parse_map("C..A\n.B..\n", NetworkConfig::default()).unwrap();
        network.insert_ordered(Frequency::new('D').unwrap(), 2, 0).unwrap();

        let positions: Vec<Point> = network.vertices().map(|(_, a)| a.position()).collect();
        assert_eq!(
            positions,
            vec![Point::new(0, 0), Point::new(2, 0), Point::new(3, 0), Point::new(1, 1)]
        );
    }

    #[test]
    fn test_render_map_with_effects() {
        let network = parse_map(MAP, NetworkConfig::default()).unwrap();
        let effects = network.harmful_effects(false);
        assert_eq!(effects, vec![Point::new(3, 5)]);

        assert_eq!(
            render_map(&network, &effects).unwrap(),
            "....\n.A..\n....\n..A.\n....\n...#\n"
        );
    }

    #[test]
    fn test_render_effect_under_antenna() {
        let network = parse_map("A.A.A\n", NetworkConfig::default()).unwrap();
        let effects = network.harmful_effects(false);

        // (0, 0) and (4, 0) hold antennas themselves
        assert_eq!(
            effects,
            vec![Point::new(0, 0), Point::new(4, 0), Point::new(6, 0), Point::new(8, 0)]
        );
        assert_eq!(render_map(&network, &effects).unwrap(), "A.A.A.#.#\n");
    }

    #[test]
    fn test_load_map_raw_bytes() {
        let network = load_map(&b"A\xff.B\n\xc3C\n"[..], NetworkConfig::default()).unwrap();
        let antennas: Vec<String> = network.vertices().map(|(_, a)| a.to_string()).collect();

        assert_eq!(antennas, vec!["'A'(0, 0)", "'B'(3, 0)", "'C'(1, 1)"]);
    }

    #[test]
    fn test_cell_position_out_of_range() {
        let far_row = i32::MAX as usize + 1;
        assert!(matches!(
            cell_position(0, far_row, DEFAULT_MAX_X),
            Err(Error::InvalidCoordinates { x: 0, y: 2_147_483_648, .. })
        ));
        assert_eq!(
            cell_position(3, i32::MAX as usize, DEFAULT_MAX_X).unwrap(),
            Point::new(3, i32::MAX)
        );
    }

    #[test]
    fn test_parse_effects() {
        let effects = parse_effects("#.A#\r\n..#.\nB...#\n").unwrap();
        assert_eq!(
            effects,
            vec![Point::new(0, 0), Point::new(3, 0), Point::new(2, 1), Point::new(4, 2)]
        );
        assert!(parse_effects("A..\n").unwrap().is_empty());
    }

    #[test]
    fn test_rendered_map_loads_back() {
        let network = parse_map("A.....\n..B...\n......\n.A..B.\n", NetworkConfig::default()).unwrap();
        let effects = network.harmful_effects(false);
        let rendered = render_map(&network, &effects).unwrap();

        assert_eq!(parse_effects(&rendered).unwrap(), effects);
        let reloaded = parse_map(&rendered, NetworkConfig::default()).unwrap();
        assert!(reloaded.vertices().map(|(_, a)| a).eq(network.vertices().map(|(_, a)| a)));
    }

    #[test]
    fn test_render_map_too_large() {
        let mut network = Network::default();
        network.insert_ordered(Frequency::new('A').unwrap(), 0, 2_000_000_000).unwrap();

        assert!(matches!(
            render_map(&network, &[]),
            Err(Error::MapTooLarge { width: 1, height: 2_000_000_001, .. })
        ));
        // Effects alone can push the grid over the limit too
        let small = parse_map("A\n", NetworkConfig::default()).unwrap();
        assert!(matches!(
            render_map(&small, &[Point::new(i32::MAX, i32::MAX)]),
            Err(Error::MapTooLarge { .. })
        ));
    }

    #[test]
    fn test_load_effects_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"..#\n#..\n").unwrap();

        assert_eq!(
            load_effects_file(file.path()).unwrap(),
            vec![Point::new(2, 0), Point::new(0, 1)]
        );
        assert!(matches!(
            load_effects_file(file.path().with_extension("missing")),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_load_map_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MAP.as_bytes()).unwrap();

        let network = load_map_file(file.path(), NetworkConfig::default()).unwrap();
        assert_eq!(network.len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            load_map_file(missing, NetworkConfig::default()),
            Err(Error::Io(_))
        ));
    }
}
