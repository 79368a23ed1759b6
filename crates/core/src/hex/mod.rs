//! This module holds the discrete hex coordinate types, and the data
//! structures built on them.
//!
//! ## Coordinate Systems
//!
//! ### Axial Coordinates
//!
//! Every cell is addressed by an axial coordinate `(q, r)`. This is the [axial
//! system described by Amit Patel](https://www.redblobgames.com/grids/hexagons/#coordinates-axial),
//! which is just the cube system with the redundant third component dropped.
//! Whenever cube math is more convenient we derive `s = -q - r`, so **for any
//! cell, `q + r + s = 0`.**
//!
//! The six neighbors of a cell are found by adding one of the [SIDE_VECTORS].
//! Side indices run clockwise (in world space, where +y points down) and are
//! the same for both layout orientations. Only the compass names attached to
//! each side differ, see [crate::Orientation::directions].
//!
//! ### Offset Coordinates
//!
//! Rectangular maps are much easier to describe in row/column terms, so
//! [OffsetCoordinate] exists as an alternate addressing scheme. For pointy
//! layouts every other *row* is shoved half a cell sideways; for flat layouts
//! every other *column* is shoved half a cell down. [OffsetParity] picks
//! whether the odd or even lines are the shoved ones. Offset coordinates are
//! only ever used at the edges of the system (config and array ordering),
//! everything internal is axial.
//!
//! ### World Coordinates
//!
//! Continuous space is handled by [crate::HexLayout]. See its docs for how
//! cells map to points.

mod direction;
mod unit;

pub use direction::*;
pub use unit::*;

use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};

/// A set of hex coordinates. Uses the Fnv hasher, which is much faster than
/// the default for small keys like ours.
pub type CoordinateSet = HashSet<HexCoordinate, FnvBuildHasher>;

/// A map of hex coordinates to some value
pub type CoordinateMap<T> = HashMap<HexCoordinate, T, FnvBuildHasher>;

/// A set of hex coordinates that remembers insertion order. This backs
/// traversed grids, where iteration order matters to the caller.
pub type CoordinateIndexSet = IndexSet<HexCoordinate, FnvBuildHasher>;
