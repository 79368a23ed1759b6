pub mod config;

use crate::{
    grid::config::{GridConfig, ShapeConfig},
    hex::{
        CoordinateIndexSet, Direction, HexCoordinate, OffsetCoordinate,
        SIDES,
    },
    layout::HexLayout,
    traversal::{Ring, Spiral},
    util::unit::Point2,
};
use anyhow::{anyhow, bail, Context};
use log::debug;
use validator::Validate;

/// The set of cells a grid contains. Unlike [ShapeConfig], this is the
/// resolved form, including arbitrary cell sets produced by
/// [HexGrid::traverse].
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A block of offset rows and columns
    Rectangle {
        start: OffsetCoordinate,
        width: u32,
        height: u32,
    },
    /// Every cell within a fixed distance of a center cell
    Spiral(Spiral),
    /// Every cell
    Unbounded,
    /// An explicit set of cells. Iteration follows insertion order.
    Cells(CoordinateIndexSet),
}

/// A layout plus the set of cells that belong to it. This is the object that
/// answers spatial queries: picking, neighbor lookup, area traversal, etc.
///
/// Grids are immutable. Operations that narrow a grid down, like
/// [Self::traverse], return a new grid that shares the same layout.
#[derive(Clone, Debug, PartialEq)]
pub struct HexGrid {
    layout: HexLayout,
    shape: Shape,
}

impl HexGrid {
    /// Build a grid from a config. Returns an error if the config is invalid.
    pub fn new(config: GridConfig) -> anyhow::Result<Self> {
        config.validate().context("Invalid grid config")?;
        let layout = HexLayout::new(config.layout)?;
        let shape = match config.shape {
            ShapeConfig::Rectangle(rect) => Shape::Rectangle {
                start: rect.start,
                width: rect.width,
                height: rect.height,
            },
            ShapeConfig::Spiral(spiral) => Shape::Spiral(Spiral::new(
                spiral.center,
                // Validation guarantees this is non-negative
                spiral.radius.unsigned_abs(),
            )),
            ShapeConfig::Unbounded => Shape::Unbounded,
        };
        debug!("Built grid with shape {:?}", shape);
        Ok(Self { layout, shape })
    }

    /// Build a grid that contains every cell
    pub fn unbounded(layout: HexLayout) -> Self {
        Self {
            layout,
            shape: Shape::Unbounded,
        }
    }

    /// Build a grid from an explicit list of cells. Duplicates are dropped,
    /// first occurrence wins the ordering.
    pub fn from_cells(
        layout: HexLayout,
        cells: impl IntoIterator<Item = HexCoordinate>,
    ) -> Self {
        Self {
            layout,
            shape: Shape::Cells(cells.into_iter().collect()),
        }
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Is the given cell part of this grid?
    pub fn contains(&self, coord: HexCoordinate) -> bool {
        match &self.shape {
            Shape::Rectangle {
                start,
                width,
                height,
            } => {
                let (col, row) = coord.to_offset_wide(
                    self.layout.orientation(),
                    self.layout.offset(),
                );
                let col = col - i64::from(start.col);
                let row = row - i64::from(start.row);
                (0..i64::from(*width)).contains(&col)
                    && (0..i64::from(*height)).contains(&row)
            }
            Shape::Spiral(spiral) => spiral.contains(coord),
            Shape::Unbounded => true,
            Shape::Cells(cells) => cells.contains(&coord),
        }
    }

    /// Number of cells in the grid, or `None` if it's unbounded
    pub fn len(&self) -> Option<usize> {
        match &self.shape {
            Shape::Rectangle { width, height, .. } => {
                Some((*width as usize).saturating_mul(*height as usize))
            }
            Shape::Spiral(spiral) => Some(spiral.len()),
            Shape::Unbounded => None,
            Shape::Cells(cells) => Some(cells.len()),
        }
    }

    /// Does the grid contain zero cells? Unbounded grids are never empty.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Get the cell adjacent to `coord` in the given direction. Returns an
    /// error if the layout's orientation has no side facing that direction
    /// (N/S for pointy, E/W for flat). Otherwise returns `None` if the
    /// neighbor is outside the grid, unless `allow_outside` is set.
    pub fn neighbor_of(
        &self,
        coord: HexCoordinate,
        direction: Direction,
        allow_outside: bool,
    ) -> anyhow::Result<Option<HexCoordinate>> {
        let orientation = self.layout.orientation();
        let side = orientation.side(direction).ok_or_else(|| {
            anyhow!(
                "Direction {} is ambiguous for {} hexes; valid directions \
                are {:?}",
                direction,
                orientation,
                orientation.directions()
            )
        })?;
        Ok(self.neighbor_at_side(coord, side, allow_outside))
    }

    /// Get the cell across the given side of `coord`. Returns `None` if the
    /// neighbor is outside the grid, unless `allow_outside` is set.
    pub fn neighbor_at_side(
        &self,
        coord: HexCoordinate,
        side: usize,
        allow_outside: bool,
    ) -> Option<HexCoordinate> {
        let neighbor = coord.neighbor(side);
        if allow_outside || self.contains(neighbor) {
            Some(neighbor)
        } else {
            None
        }
    }

    /// Get all in-grid neighbors of a cell, in side order. Between 0 and 6
    /// items. The cell itself doesn't have to be in the grid.
    pub fn neighbors(
        &self,
        coord: HexCoordinate,
    ) -> impl Iterator<Item = HexCoordinate> + '_ {
        (0..SIDES)
            .filter_map(move |side| self.neighbor_at_side(coord, side, false))
    }

    /// Iterate over every cell in the grid. Rectangles go in row-major offset
    /// order, spirals go ring by ring, and explicit cell sets go in insertion
    /// order. Errors for unbounded grids.
    pub fn iter(
        &self,
    ) -> anyhow::Result<Box<dyn Iterator<Item = HexCoordinate> + '_>> {
        let orientation = self.layout.orientation();
        let parity = self.layout.offset();
        Ok(match &self.shape {
            Shape::Rectangle {
                start,
                width,
                height,
            } => {
                let (start, width, height) = (*start, *width, *height);
                Box::new((0..height as i32).flat_map(move |row| {
                    (0..width as i32).map(move |col| {
                        HexCoordinate::from_offset(
                            OffsetCoordinate::new(
                                start.col + col,
                                start.row + row,
                            ),
                            orientation,
                            parity,
                        )
                    })
                }))
            }
            Shape::Spiral(spiral) => Box::new(spiral.iter()),
            Shape::Unbounded => {
                bail!("Cannot enumerate the cells of an unbounded grid")
            }
            Shape::Cells(cells) => Box::new(cells.iter().copied()),
        })
    }

    /// Collect every cell in the grid. See [Self::iter] for ordering.
    pub fn to_array(&self) -> anyhow::Result<Vec<HexCoordinate>> {
        Ok(self.iter()?.collect())
    }

    /// Get the cell at a world point, if that cell is part of the grid.
    /// Non-finite points are never part of any grid, even unbounded ones.
    pub fn point_to_hex(&self, point: Point2) -> Option<HexCoordinate> {
        let coord = self.layout.try_to_hex(point)?;
        if self.contains(coord) {
            Some(coord)
        } else {
            None
        }
    }

    /// Snap a world point to the center of its cell. Returns the cell and
    /// its center, or `None` if the point is outside the grid.
    pub fn snap(&self, point: Point2) -> Option<(HexCoordinate, Point2)> {
        self.point_to_hex(point)
            .map(|coord| (coord, self.layout.to_world(coord)))
    }

    /// Narrow this grid down to the given cells, e.g. a [Ring] or [Spiral].
    /// Cells outside this grid are dropped, as are duplicates. The result is
    /// always bounded, and keeps the traversal's order.
    pub fn traverse(
        &self,
        cells: impl IntoIterator<Item = HexCoordinate>,
    ) -> Self {
        Self::from_cells(
            self.layout,
            cells.into_iter().filter(|coord| self.contains(*coord)),
        )
    }

    /// The in-grid cells exactly `radius` steps from `center`
    pub fn ring(&self, center: HexCoordinate, radius: u32) -> Self {
        self.traverse(Ring::new(center, radius))
    }

    /// The in-grid cells at most `radius` steps from `center`
    pub fn spiral(&self, center: HexCoordinate, radius: u32) -> Self {
        self.traverse(Spiral::new(center, radius))
    }
}
