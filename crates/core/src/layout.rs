//! Conversion between discrete cells and continuous world space.
//!
//! World space is a 2D plane where +x points east and +y points **south**,
//! which is what you get when you look straight down at the ground plane of a
//! 3D scene, or at an SVG. Angles increase clockwise from +x.
//!
//! ```text
//! +-------------------+
//! |        -y (N)     |
//! |         ^         |
//! |         |         |
//! | -x <----o----> +x |
//! |         |         |
//! |         v         |
//! |        +y (S)     |
//! +-------------------+
//! ```
//!
//! A [HexLayout] fixes where the origin cell sits, how big each cell is, and
//! which way cells point. Everything else about the world-to-hex mapping
//! follows from that.

use crate::{
    hex::{Direction, FractionalHex, HexCoordinate, OffsetParity, SIDES},
    util::unit::Point2,
};
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use strum::{Display, EnumIter, EnumString};
use validator::{Validate, ValidationError, ValidationErrors};

/// Which way each cell faces
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
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Orientation {
    /// A vertex points north. Cells in the same row line up horizontally.
    Pointy,
    /// A flat side faces north. Cells in the same column line up vertically.
    Flat,
}

impl Orientation {
    const POINTY_DIRECTIONS: [Direction; SIDES] = [
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
        Direction::NE,
    ];
    const FLAT_DIRECTIONS: [Direction; SIDES] = [
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::NW,
        Direction::N,
        Direction::NE,
    ];

    /// The compass direction each side faces, indexed by side
    pub fn directions(self) -> &'static [Direction; SIDES] {
        match self {
            Self::Pointy => &Self::POINTY_DIRECTIONS,
            Self::Flat => &Self::FLAT_DIRECTIONS,
        }
    }

    /// Get the compass direction that the given side faces. Taken mod 6.
    pub fn direction(self, side: usize) -> Direction {
        self.directions()[side % SIDES]
    }

    /// Get the side index that faces the given direction. Returns `None` for
    /// the two directions this orientation has no side for (N/S for pointy,
    /// E/W for flat).
    pub fn side(self, direction: Direction) -> Option<usize> {
        self.directions().iter().position(|dir| *dir == direction)
    }

    /// Angle of the given corner from the cell center, in radians, clockwise
    /// from +x. Corner `i` sits at the start of side `i`.
    pub fn corner_angle(self, corner: usize) -> f64 {
        let degrees = 60.0 * (corner % SIDES) as f64
            - match self {
                Self::Pointy => 30.0,
                Self::Flat => 0.0,
            };
        degrees * PI / 180.0
    }

    /// Matrix that maps an axial coordinate to unscaled world space
    fn forward(self) -> Matrix2<f64> {
        // https://www.redblobgames.com/grids/hexagons/#hex-to-pixel
        let sqrt3 = 3.0_f64.sqrt();
        match self {
            Self::Pointy => Matrix2::new(sqrt3, sqrt3 / 2.0, 0.0, 3.0 / 2.0),
            Self::Flat => Matrix2::new(3.0 / 2.0, 0.0, sqrt3 / 2.0, sqrt3),
        }
    }

    /// Inverse of [Self::forward]
    fn backward(self) -> Matrix2<f64> {
        let sqrt3 = 3.0_f64.sqrt();
        match self {
            Self::Pointy => {
                Matrix2::new(sqrt3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0)
            }
            Self::Flat => {
                Matrix2::new(2.0 / 3.0, 0.0, -1.0 / 3.0, sqrt3 / 3.0)
            }
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Pointy
    }
}

/// Size of a cell, in world units. This is the distance from the center of a
/// cell to each of its corners, along each axis. Unequal components stretch
/// the grid, which is useful when the backdrop image isn't square-pixeled.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CellSize {
    pub x: f64,
    pub y: f64,
}

impl CellSize {
    /// A size that's the same along both axes
    pub const fn uniform(size: f64) -> Self {
        Self { x: size, y: size }
    }
}

impl Default for CellSize {
    fn default() -> Self {
        Self::uniform(0.5)
    }
}

impl Validate for CellSize {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [("x", self.x), ("y", self.y)] {
            // Written this way so NaN fails too
            if !(value > 0.0 && value.is_finite()) {
                errors.add(field, ValidationError::new("positive"));
            }
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration that defines how cells map onto world space. Two layouts
/// built from the same config will always agree.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate,
)]
#[serde(default)]
pub struct LayoutConfig {
    /// Which way the cells point
    pub orientation: Orientation,

    /// Which rows (pointy) or columns (flat) are shifted in offset
    /// coordinates. This has no effect on axial math, it only matters when
    /// converting to and from [crate::OffsetCoordinate], which includes
    /// rectangular grid bounds.
    pub offset: OffsetParity,

    /// Center-to-corner distance of each cell, per axis. Both components must
    /// be positive.
    #[validate]
    pub size: CellSize,

    /// World-space position of the center of cell `(0, 0)`
    pub origin: Point2,
}

/// A validated layout. This is what actually does the math to convert between
/// cells and world points. It's a small `Copy` value, so pass it around
/// freely.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HexLayout {
    config: LayoutConfig,
}

impl HexLayout {
    /// Construct a new layout. Returns an error if the config is invalid.
    pub fn new(config: LayoutConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn orientation(&self) -> Orientation {
        self.config.orientation
    }

    pub fn size(&self) -> CellSize {
        self.config.size
    }

    pub fn origin(&self) -> Point2 {
        self.config.origin
    }

    pub fn offset(&self) -> OffsetParity {
        self.config.offset
    }

    /// Get the world-space center of a cell
    pub fn to_world(&self, coord: HexCoordinate) -> Point2 {
        let LayoutConfig {
            orientation,
            size,
            origin,
            ..
        } = self.config;
        let unscaled = orientation.forward()
            * Vector2::new(coord.q() as f64, coord.r() as f64);
        Point2::new(
            unscaled.x * size.x + origin.x,
            unscaled.y * size.y + origin.y,
        )
    }

    /// Convert a world point to a continuous axial position, without
    /// snapping it to a cell
    pub fn to_fractional(&self, point: Point2) -> FractionalHex {
        let LayoutConfig {
            orientation,
            size,
            origin,
            ..
        } = self.config;
        let unscaled = Vector2::new(
            (point.x - origin.x) / size.x,
            (point.y - origin.y) / size.y,
        );
        let axial = orientation.backward() * unscaled;
        FractionalHex::new(axial.x, axial.y)
    }

    /// Get the cell that contains a world point. Points exactly on a shared
    /// edge go to whichever cell the rounding tie-break picks, which is
    /// stable but otherwise arbitrary.
    pub fn to_hex(&self, point: Point2) -> HexCoordinate {
        self.to_fractional(point).round()
    }

    /// Like [Self::to_hex], but `None` for points that don't land on a
    /// representable cell: NaN or infinite components (e.g. a pointer ray
    /// parallel to the ground), or points absurdly far from the origin.
    pub fn try_to_hex(&self, point: Point2) -> Option<HexCoordinate> {
        self.to_fractional(point).try_round()
    }

    /// Get the world-space position of one corner of a cell, relative to
    /// the world origin (not the cell center). `corner` is taken mod 6.
    pub fn corner(&self, coord: HexCoordinate, corner: usize) -> Point2 {
        self.to_world(coord) + self.corner_offset(corner)
    }

    /// Get all six corners of a cell, in clockwise order. Corner `i` and
    /// corner `i + 1` are the two ends of side `i`.
    pub fn corners(&self, coord: HexCoordinate) -> [Point2; SIDES] {
        let center = self.to_world(coord);
        let mut corners = [center; SIDES];
        for (i, corner) in corners.iter_mut().enumerate() {
            *corner += self.corner_offset(i);
        }
        corners
    }

    /// Get the midpoint of one side of a cell. This is halfway between the
    /// two corners, NOT halfway between the two cell centers (those are the
    /// same point only for unstretched cells).
    pub fn side_midpoint(&self, coord: HexCoordinate, side: usize) -> Point2 {
        (self.corner(coord, side) + self.corner(coord, side + 1)) / 2.0
    }

    /// Snap a world point to the center of the cell that contains it
    pub fn snap(&self, point: Point2) -> Point2 {
        self.to_world(self.to_hex(point))
    }

    fn corner_offset(&self, corner: usize) -> Point2 {
        let angle = self.config.orientation.corner_angle(corner);
        let size = self.config.size;
        Point2::new(size.x * angle.cos(), size.y * angle.sin())
    }
}
