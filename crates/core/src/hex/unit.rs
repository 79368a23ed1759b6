//! Basic coordinate types. See the parent module documentation for a
//! description of the coordinate systems.

use crate::{hex::SIDE_VECTORS, layout::Orientation};
use derive_more::{Add, AddAssign, Display, Mul, Neg, Sub, SubAssign};
use log::debug;
use serde::{Deserialize, Serialize};
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// An integer axial coordinate that identifies exactly one cell. The third
/// cube component `s` is never stored, it's always derived from `q` and `r`.
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Add,
    Sub,
    Mul,
    Neg,
    AddAssign,
    SubAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", q, r)]
pub struct HexCoordinate {
    q: i32,
    r: i32,
}

impl HexCoordinate {
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Largest absolute value of any cube component in a cell produced by
    /// rounding or by a validated grid config. Neighbor, offset and distance
    /// arithmetic on cells within this bound can't overflow `i32`.
    pub const MAX_COMPONENT: i32 = 1 << 29;

    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    pub const fn q(self) -> i32 {
        self.q
    }

    pub const fn r(self) -> i32 {
        self.r
    }

    /// The derived third cube component. `q + r + s = 0` always.
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    /// Round a fractional axial position to the cell that contains it. All
    /// three cube components are rounded independently, then whichever one
    /// moved the furthest is recomputed from the other two, which is the only
    /// way to keep the result on the `q + r + s = 0` plane.
    ///
    /// Positions that [Self::try_round] rejects (non-finite, or beyond
    /// [Self::MAX_COMPONENT]) round to the origin. Use [Self::try_round]
    /// when the input comes from somewhere untrusted, e.g. a pointer ray.
    pub fn round(q: f64, r: f64) -> Self {
        Self::try_round(q, r).unwrap_or_else(|| {
            debug!("Cannot round ({}, {}) to a cell, using origin", q, r);
            Self::ORIGIN
        })
    }

    /// Round a fractional axial position to the cell that contains it, or
    /// `None` if the position is NaN, infinite, or has a cube component
    /// larger (in absolute value) than [Self::MAX_COMPONENT].
    pub fn try_round(q: f64, r: f64) -> Option<Self> {
        // https://www.redblobgames.com/grids/hexagons/#rounding
        let s = -q - r;
        let limit = f64::from(Self::MAX_COMPONENT);
        // NaN fails every comparison, so it's rejected here too
        let in_range = |value: f64| value.abs() <= limit;
        if !(in_range(q) && in_range(r) && in_range(s)) {
            return None;
        }

        let mut rq = q.round();
        let mut rr = r.round();
        let mut rs = s.round();

        let q_diff = (rq - q).abs();
        let r_diff = (rr - r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        } else {
            rs = -rq - rr;
        }
        debug_assert!(
            rq + rr + rs == 0.0,
            "Rounded coordinate ({}, {}, {}) is off the cube plane",
            rq,
            rr,
            rs
        );

        Some(Self::new(rq as i32, rr as i32))
    }

    /// Get the cell across the given side of this one. `side` is taken mod 6,
    /// so any index is valid.
    pub fn neighbor(self, side: usize) -> Self {
        self + SIDE_VECTORS[side % SIDE_VECTORS.len()]
    }

    /// Get an iterator of all six cells adjacent to this one, in side order.
    /// This knows nothing about grid bounds, see [crate::HexGrid::neighbors]
    /// for that.
    pub fn adjacents(self) -> impl Iterator<Item = Self> {
        SIDE_VECTORS.iter().map(move |vector| self + *vector)
    }

    /// Calculate the number of steps it takes to walk from one cell to
    /// another. 0 if the cells are equal, 1 if they're adjacent, etc.
    pub fn distance_to(self, other: Self) -> u32 {
        // https://www.redblobgames.com/grids/hexagons/#distances
        // Widened, since the difference of two cells can overflow i32
        let dq = i64::from(self.q) - i64::from(other.q);
        let dr = i64::from(self.r) - i64::from(other.r);
        let ds = -dq - dr;
        // Every step between neighbors changes two cube components
        let distance = (dq.abs() + dr.abs() + ds.abs()) / 2;
        u32::try_from(distance).unwrap_or(u32::MAX)
    }

    /// Convert to an offset coordinate. Which axis gets shifted depends on
    /// the orientation, see the module docs. Cells far beyond
    /// [Self::MAX_COMPONENT] can land outside `i32`, in which case the
    /// shifted component saturates.
    pub fn to_offset(
        self,
        orientation: Orientation,
        parity: OffsetParity,
    ) -> OffsetCoordinate {
        let (col, row) = self.to_offset_wide(orientation, parity);
        OffsetCoordinate::new(saturate(col), saturate(row))
    }

    /// Offset conversion in `i64`, which is exact for every cell
    pub(crate) fn to_offset_wide(
        self,
        orientation: Orientation,
        parity: OffsetParity,
    ) -> (i64, i64) {
        // https://www.redblobgames.com/grids/hexagons/#conversions-offset
        let (q, r) = (i64::from(self.q), i64::from(self.r));
        match orientation {
            Orientation::Pointy => (q + parity.shift(r), r),
            Orientation::Flat => (q, r + parity.shift(q)),
        }
    }

    /// Inverse of [Self::to_offset]. Like that, the result saturates if it
    /// doesn't fit in `i32`.
    pub fn from_offset(
        offset: OffsetCoordinate,
        orientation: Orientation,
        parity: OffsetParity,
    ) -> Self {
        let (col, row) = (i64::from(offset.col), i64::from(offset.row));
        let (q, r) = match orientation {
            Orientation::Pointy => (col - parity.shift(row), row),
            Orientation::Flat => (col, row - parity.shift(col)),
        };
        let coord = Self::new(saturate(q), saturate(r));
        debug_assert!(
            i32::try_from(q).is_err()
                || coord.to_offset(orientation, parity) == offset,
            "Offset conversion is not invertible for {}",
            offset
        );
        coord
    }
}

/// Clamp a widened coordinate component back into `i32`
fn saturate(value: i64) -> i32 {
    i32::try_from(value)
        .unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

impl From<(i32, i32)> for HexCoordinate {
    fn from((q, r): (i32, i32)) -> Self {
        Self::new(q, r)
    }
}

/// A continuous position in axial space. This is what you get when
/// converting an arbitrary world point into hex space, before snapping it to
/// a cell.
#[derive(Copy, Clone, Debug, Default, Display, PartialEq, Serialize)]
#[display(fmt = "({}, {})", q, r)]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
}

impl FractionalHex {
    pub const fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    pub fn s(self) -> f64 {
        -self.q - self.r
    }

    /// Snap to the cell containing this position
    pub fn round(self) -> HexCoordinate {
        HexCoordinate::round(self.q, self.r)
    }

    /// Snap to the cell containing this position, if there is one. See
    /// [HexCoordinate::try_round].
    pub fn try_round(self) -> Option<HexCoordinate> {
        HexCoordinate::try_round(self.q, self.r)
    }
}

/// Which lines of an offset grid are shifted by half a cell. For pointy
/// layouts this applies to rows, for flat layouts to columns.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    EnumString,
    StrumDisplay,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OffsetParity {
    Odd,
    Even,
}

impl OffsetParity {
    /// How far the given line is shifted along the other axis, in whole
    /// cells, when converting axial to offset
    const fn shift(self, line: i64) -> i64 {
        // `line & 1` is the parity in two's complement, negatives included
        match self {
            Self::Odd => (line - (line & 1)) / 2,
            Self::Even => (line + (line & 1)) / 2,
        }
    }
}

impl Default for OffsetParity {
    fn default() -> Self {
        Self::Odd
    }
}

/// A `(column, row)` coordinate in an offset grid
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[display(fmt = "[{}, {}]", col, row)]
pub struct OffsetCoordinate {
    pub col: i32,
    pub row: i32,
}

impl OffsetCoordinate {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_s() {
        assert_eq!(HexCoordinate::new(2, -5).s(), 3);
        assert_eq!(HexCoordinate::ORIGIN.s(), 0);
    }

    #[test]
    fn test_round() {
        assert_eq!(HexCoordinate::round(0.0, 0.0), HexCoordinate::ORIGIN);
        assert_eq!(HexCoordinate::round(0.2, 0.1), HexCoordinate::new(0, 0));
        assert_eq!(HexCoordinate::round(1.2, -0.1), HexCoordinate::new(1, 0));
        // q and r are off by the same amount, r gets recomputed
        assert_eq!(HexCoordinate::round(0.45, 0.45), HexCoordinate::new(0, 1));
        assert_eq!(HexCoordinate::round(-2.6, 1.4), HexCoordinate::new(-3, 2));
    }

    #[test]
    fn test_round_stays_on_plane() {
        for &(q, r) in &[(0.5, 0.0), (0.5, 0.5), (-0.5, 0.5), (3.49, -7.51)] {
            let rounded = HexCoordinate::round(q, r);
            assert_eq!(rounded.q() + rounded.r() + rounded.s(), 0);
        }
    }

    #[test]
    fn test_try_round_out_of_range() {
        let limit = f64::from(HexCoordinate::MAX_COMPONENT);
        assert_eq!(
            HexCoordinate::try_round(1.2, -0.1),
            Some(HexCoordinate::new(1, 0))
        );
        assert_eq!(HexCoordinate::try_round(f64::NAN, 0.0), None);
        assert_eq!(HexCoordinate::try_round(0.0, f64::INFINITY), None);
        assert_eq!(HexCoordinate::try_round(f64::NEG_INFINITY, 1.0), None);
        assert_eq!(HexCoordinate::try_round(1e12, 3.0), None);
        // q and r are each in range, but s isn't
        assert_eq!(HexCoordinate::try_round(limit, limit), None);
        assert_eq!(
            HexCoordinate::try_round(limit, 0.0),
            Some(HexCoordinate::new(HexCoordinate::MAX_COMPONENT, 0))
        );
        // The infallible version falls back to the origin
        assert_eq!(
            HexCoordinate::round(f64::NAN, f64::NAN),
            HexCoordinate::ORIGIN
        );
        assert_eq!(
            FractionalHex::new(f64::INFINITY, 0.0).try_round(),
            None
        );
    }

    #[test]
    fn test_extreme_coordinates() {
        let max = HexCoordinate::new(i32::MAX, 0);
        let min = HexCoordinate::new(i32::MIN, 0);
        assert_eq!(max.distance_to(min), u32::MAX);
        assert_eq!(
            HexCoordinate::new(i32::MAX, 3)
                .to_offset_wide(Orientation::Pointy, OffsetParity::Even),
            (i64::from(i32::MAX) + 2, 3)
        );
        assert_eq!(
            HexCoordinate::new(i32::MAX, 3)
                .to_offset(Orientation::Pointy, OffsetParity::Even),
            OffsetCoordinate::new(i32::MAX, 3)
        );
        assert_eq!(
            HexCoordinate::from_offset(
                OffsetCoordinate::new(i32::MIN, 3),
                Orientation::Pointy,
                OffsetParity::Odd
            ),
            HexCoordinate::new(i32::MIN, 3)
        );
    }

    #[test]
    fn test_distance_to() {
        let origin = HexCoordinate::ORIGIN;
        assert_eq!(origin.distance_to(origin), 0);
        assert_eq!(origin.distance_to(HexCoordinate::new(1, 0)), 1);
        assert_eq!(origin.distance_to(HexCoordinate::new(1, -1)), 1);
        assert_eq!(origin.distance_to(HexCoordinate::new(2, 1)), 3);
        assert_eq!(
            HexCoordinate::new(-3, 2).distance_to(HexCoordinate::new(3, -2)),
            6
        );
    }

    #[test]
    fn test_adjacents() {
        let center = HexCoordinate::new(4, -1);
        let adjacents: Vec<_> = center.adjacents().collect();
        assert_eq!(adjacents.len(), 6);
        for adj in adjacents {
            assert_eq!(center.distance_to(adj), 1);
        }
        assert_eq!(center.neighbor(0), HexCoordinate::new(5, -1));
        assert_eq!(center.neighbor(6), center.neighbor(0));
    }

    #[test]
    fn test_to_offset_pointy() {
        let odd = OffsetParity::Odd;
        let even = OffsetParity::Even;
        assert_eq!(
            HexCoordinate::new(0, 1).to_offset(Orientation::Pointy, odd),
            OffsetCoordinate::new(0, 1)
        );
        assert_eq!(
            HexCoordinate::new(-1, 2).to_offset(Orientation::Pointy, odd),
            OffsetCoordinate::new(0, 2)
        );
        assert_eq!(
            HexCoordinate::new(0, 1).to_offset(Orientation::Pointy, even),
            OffsetCoordinate::new(1, 1)
        );
        assert_eq!(
            HexCoordinate::new(0, -1).to_offset(Orientation::Pointy, odd),
            OffsetCoordinate::new(-1, -1)
        );
    }

    #[test]
    fn test_to_offset_flat() {
        assert_eq!(
            HexCoordinate::new(1, 0)
                .to_offset(Orientation::Flat, OffsetParity::Odd),
            OffsetCoordinate::new(1, 0)
        );
        assert_eq!(
            HexCoordinate::new(2, -1)
                .to_offset(Orientation::Flat, OffsetParity::Odd),
            OffsetCoordinate::new(2, 0)
        );
        assert_eq!(
            HexCoordinate::new(1, 0)
                .to_offset(Orientation::Flat, OffsetParity::Even),
            OffsetCoordinate::new(1, 1)
        );
    }

    #[test]
    fn test_offset_round_trip() {
        for orientation in Orientation::iter() {
            for parity in OffsetParity::iter() {
                for q in -4..=4 {
                    for r in -4..=4 {
                        let coord = HexCoordinate::new(q, r);
                        let offset = coord.to_offset(orientation, parity);
                        assert_eq!(
                            HexCoordinate::from_offset(
                                offset,
                                orientation,
                                parity
                            ),
                            coord,
                            "{} {} {}",
                            orientation,
                            parity,
                            coord
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(HexCoordinate::new(1, -2).to_string(), "(1, -2)");
        assert_eq!(OffsetCoordinate::new(3, 4).to_string(), "[3, 4]");
        assert_eq!(OffsetParity::Even.to_string(), "even");
    }
}
