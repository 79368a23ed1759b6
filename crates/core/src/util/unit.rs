use derive_more::{
    Add, AddAssign, Display, Div, DivAssign, From, Into, Mul, MulAssign, Neg,
    Sub, SubAssign,
};
use serde::{Deserialize, Serialize};

/// A 2D point in world space. See the [crate::HexLayout] docs for a
/// description of how world space is oriented. World units are arbitrary,
/// they're whatever the caller's scene uses (e.g. feet on a tabletop map).
#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Display,
    PartialEq,
    PartialOrd,
    From,
    Into,
    Neg,
    Add,
    Sub,
    Mul,
    Div,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    Serialize,
    Deserialize,
)]
#[display(fmt = "({}, {})", "self.x", "self.y")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance between two points
    pub fn distance_to(self, other: Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<nalgebra::Vector2<f64>> for Point2 {
    fn from(other: nalgebra::Vector2<f64>) -> Self {
        Self {
            x: other.x,
            y: other.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_point_arithmetic() {
        let p = Point2::new(1.0, 2.0) + Point2::new(0.5, -1.0);
        assert_eq!(p, Point2::new(1.5, 1.0));
        assert_eq!(p * 2.0, Point2::new(3.0, 2.0));
        assert_eq!(Point2::from((3.0, 4.0)), Point2::new(3.0, 4.0));
    }

    #[test]
    fn test_distance_to() {
        assert_approx_eq!(
            Point2::ORIGIN.distance_to(Point2::new(3.0, 4.0)),
            5.0
        );
        assert_approx_eq!(
            Point2::new(1.0, 1.0).distance_to(Point2::new(1.0, 1.0)),
            0.0
        );
    }
}
