use crate::hex::HexCoordinate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The number of sides (and vertices) of each cell
pub const SIDES: usize = 6;

/// Axial offsets to each of a cell's six neighbors, indexed by side. Side 0
/// is `(+1, 0)` and the rest follow clockwise. These are the same for both
/// orientations, only the compass names change. Side `i` of a cell spans
/// from its corner `i` to corner `i + 1`.
pub const SIDE_VECTORS: [HexCoordinate; SIDES] = [
    HexCoordinate::new(1, 0),
    HexCoordinate::new(0, 1),
    HexCoordinate::new(-1, 1),
    HexCoordinate::new(-1, 0),
    HexCoordinate::new(0, -1),
    HexCoordinate::new(1, -1),
];

/// A compass direction in world space. North is -y, east is +x.
///
/// A hex cell only has six sides, so each orientation only uses six of these
/// eight directions. Pointy layouts have no north or south side; flat layouts
/// have no east or west side. Asking for a neighbor in one of the unused
/// directions is an error, see [crate::Orientation::side].
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All directions, in clockwise order starting at north
    pub const CLOCKWISE: &'static [Self] = &[
        Self::N,
        Self::NE,
        Self::E,
        Self::SE,
        Self::S,
        Self::SW,
        Self::W,
        Self::NW,
    ];

    /// The index of this direction in [Self::CLOCKWISE]
    pub fn clockwise_index(self) -> usize {
        Self::CLOCKWISE
            .iter()
            .position(|dir| *dir == self)
            // Every variant is in the list
            .unwrap_or_default()
    }

    /// Get the direction that's 180° from this one
    pub fn opposite(self) -> Self {
        let len = Self::CLOCKWISE.len();
        Self::CLOCKWISE[(self.clockwise_index() + len / 2) % len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_side_vectors_are_unit_steps() {
        for (i, vector) in SIDE_VECTORS.iter().enumerate() {
            assert_eq!(HexCoordinate::ORIGIN.distance_to(*vector), 1);
            // Opposite sides cancel out
            assert_eq!(
                *vector + SIDE_VECTORS[(i + 3) % SIDES],
                HexCoordinate::ORIGIN
            );
        }
    }

    #[test]
    fn test_opposite() {
        assert_eq!(Direction::N.opposite(), Direction::S);
        assert_eq!(Direction::NE.opposite(), Direction::SW);
        assert_eq!(Direction::W.opposite(), Direction::E);
        for dir in Direction::iter() {
            assert_eq!(dir.opposite().opposite(), dir);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(Direction::from_str("ne").unwrap(), Direction::NE);
        assert_eq!(Direction::SW.to_string(), "sw");
        assert_eq!(
            serde_json::to_string(&Direction::NW).unwrap(),
            "\"nw\""
        );
    }
}
