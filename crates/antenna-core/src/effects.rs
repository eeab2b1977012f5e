//! Harmful effect locations
//!
//! Two antennas of the same frequency produce an effect at each point that
//! continues the line through them by the same distance: for antennas `a`
//! and `b`, at `a - (b - a)` and `b + (b - a)`.

use crate::antenna::Point;
use crate::network::Network;
use std::collections::BTreeSet;

impl Network {
    /// Harmful effect points, sorted by row then column, without duplicates
    ///
    /// Points with a negative coordinate are dropped unless `allow_negative`.
    pub fn harmful_effects(&self, allow_negative: bool) -> Vec<Point> {
        let antennas: Vec<_> = self.vertices().map(|(_, antenna)| antenna).collect();
        let mut effects = BTreeSet::new();

        for (i, a) in antennas.iter().enumerate() {
            for b in antennas[i + 1..].iter().filter(|b| b.frequency == a.frequency) {
                let (from, to) = (a.position(), b.position());
                // Points beyond the i32 grid are dropped like negative ones
                for point in [extend(to, from), extend(from, to)].into_iter().flatten() {
                    if allow_negative || (point.x >= 0 && point.y >= 0) {
                        effects.insert(point);
                    }
                }
            }
        }

        tracing::debug!("Computed {} harmful effect locations", effects.len());
        effects.into_iter().collect()
    }
}

/// The point one more step past `to` along the line from `from`
fn extend(from: Point, to: Point) -> Option<Point> {
    let step = |f: i32, t: i32| t.checked_sub(f).and_then(|d| t.checked_add(d));
    Some(Point::new(step(from.x, to.x)?, step(from.y, to.y)?))
}

#[cfg(test)]
mod tests {
    use crate::antenna::{Frequency, Point};
    use crate::network::Network;

    fn freq(symbol: char) -> Frequency {
        Frequency::new(symbol).unwrap()
    }

    #[test]
    fn test_effects_of_one_pair() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 4, 3).unwrap();
        network.insert_ordered(freq('A'), 5, 5).unwrap();

        assert_eq!(
            network.harmful_effects(false),
            vec![Point::new(3, 1), Point::new(6, 7)]
        );
    }

    #[test]
    fn test_effects_ignore_other_frequencies() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 1, 1).unwrap();
        network.insert_ordered(freq('B'), 2, 2).unwrap();

        assert!(network.harmful_effects(true).is_empty());
    }

    #[test]
    fn test_negative_effects_filtered() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 0, 0).unwrap();
        network.insert_ordered(freq('A'), 2, 1).unwrap();

        assert_eq!(network.harmful_effects(false), vec![Point::new(4, 2)]);
        assert_eq!(
            network.harmful_effects(true),
            vec![Point::new(-2, -1), Point::new(4, 2)]
        );
    }

    #[test]
    fn test_effects_beyond_grid_dropped() {
        let mut network = Network::default();
        network.insert_ordered(freq('A'), 0, 0).unwrap();
        network.insert_ordered(freq('A'), 0, 2_000_000_000).unwrap();
        network.insert_ordered(freq('B'), 5, i32::MAX - 1).unwrap();
        network.insert_ordered(freq('B'), 5, i32::MAX).unwrap();

        // (0, 4_000_000_000) and (5, i32::MAX + 1) do not fit
        assert_eq!(network.harmful_effects(false), vec![Point::new(5, i32::MAX - 2)]);
        assert_eq!(
            network.harmful_effects(true),
            vec![Point::new(0, -2_000_000_000), Point::new(5, i32::MAX - 2)]
        );
    }

    #[test]
    fn test_effects_deduplicated_and_sorted() {
        let mut network = Network::default();
        // A pair and a B pair both produce (2, 2)
        network.insert_ordered(freq('A'), 0, 0).unwrap();
        network.insert_ordered(freq('A'), 1, 1).unwrap();
        network.insert_ordered(freq('B'), 4, 0).unwrap();
        network.insert_ordered(freq('B'), 3, 1).unwrap();

        assert_eq!(network.harmful_effects(false), vec![Point::new(2, 2)]);
        assert_eq!(
            network.harmful_effects(true),
            vec![Point::new(-1, -1), Point::new(5, -1), Point::new(2, 2)]
        );
    }
}
