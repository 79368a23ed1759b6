//! Hexmap is the spatial model behind a hex-based virtual tabletop. It
//! converts between continuous world-space points (e.g. where the pointer ray
//! hits the ground plane) and discrete axial hex coordinates, and answers the
//! grid queries that picking, token snapping and overlay rendering need.
//!
//! ```
//! use hexmap::{GridConfig, HexGrid, Point2, ShapeConfig, RectangleConfig};
//!
//! let config = GridConfig {
//!     shape: ShapeConfig::Rectangle(RectangleConfig::default()),
//!     ..Default::default()
//! };
//! let grid = HexGrid::new(config).unwrap();
//! let picked = grid.point_to_hex(Point2::new(0.1, 0.2));
//! assert!(picked.is_some());
//! ```
//!
//! Everything here is pure computation over value types. Layouts and grids
//! are immutable once built, and traversals are regenerated on every call, so
//! any of these types can be shared across threads freely. See [HexLayout]
//! and [GridConfig] for the available configuration.

mod boundary;
mod grid;
mod hex;
mod layout;
mod overlay;
#[cfg(feature = "svg")]
mod render;
mod scene;
mod traversal;
mod util;

pub use crate::{
    boundary::{extract, outlines, BoundaryEdge, Outline, VertexKey},
    grid::{
        config::{GridConfig, RectangleConfig, ShapeConfig, SpiralConfig},
        HexGrid, Shape,
    },
    hex::{
        CoordinateIndexSet, CoordinateMap, CoordinateSet, Direction,
        FractionalHex, HexCoordinate, OffsetCoordinate, OffsetParity,
        SIDE_VECTORS,
    },
    layout::{CellSize, HexLayout, LayoutConfig, Orientation},
    overlay::Overlay,
    scene::{Actor, Scene, SceneLevel, Token},
    traversal::{spiral_len, Ring, RingIter, Spiral, SpiralIter, MAX_RADIUS},
    util::unit::Point2,
};
#[cfg(feature = "svg")]
pub use crate::render::svg::grid_to_svg;

// Re-export these so downstream crates can validate configs and downcast
// errors without pinning their own versions
pub use anyhow;
pub use validator;
