use crate::{
    boundary::{self, BoundaryEdge, Outline},
    grid::HexGrid,
    hex::{HexCoordinate, SIDES},
    traversal::Spiral,
    util::unit::Point2,
};
use log::trace;
use serde::Serialize;

/// The geometry of an area highlight, e.g. an area-of-effect template
/// centered on a token. Holds everything a renderer needs: which cells are
/// covered, a fill polygon for each, and the outline around the whole area.
///
/// Overlays are plain values. Building one is cheap enough to do on every
/// pointer move, and if it isn't for your use case, cache it yourself.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Overlay {
    pub center: HexCoordinate,
    /// Number of steps from the center to the edge. Derived from the
    /// requested diameter, rounded down.
    pub radius: u32,
    /// Covered cells, innermost first. Cells that fall outside the source
    /// grid are not included.
    pub cells: Vec<HexCoordinate>,
    /// Corner polygon of each cell, in the same order as [Self::cells]
    pub fills: Vec<[Point2; SIDES]>,
    pub edges: Vec<BoundaryEdge>,
    pub outlines: Vec<Outline>,
}

impl Overlay {
    /// Compute the overlay for a hexagonal area, `diameter` cells across,
    /// centered on `center`. A diameter of 0 or 1 covers just the center
    /// cell. If the center itself is outside the grid the overlay can still
    /// cover the in-grid part of the area, or be empty.
    pub fn new(
        grid: &HexGrid,
        center: HexCoordinate,
        diameter: u32,
    ) -> anyhow::Result<Self> {
        let radius = diameter / 2;
        let area = grid.traverse(Spiral::new(center, radius));
        let cells = area.to_array()?;
        let layout = area.layout();
        let fills = cells.iter().map(|cell| layout.corners(*cell)).collect();
        let edges = boundary::extract(&area)?;
        let outlines = boundary::outlines(&edges);
        trace!(
            "Overlay at {} covers {} cells with {} outlines",
            center,
            cells.len(),
            outlines.len()
        );

        Ok(Self {
            center,
            radius,
            cells,
            fills,
            edges,
            outlines,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
