//! Finding the edges of a region of cells, for drawing highlight outlines.

use crate::{
    grid::HexGrid,
    hex::{Direction, HexCoordinate, SIDES, SIDE_VECTORS},
    util::unit::Point2,
};
use fnv::FnvHashMap;
use log::{debug, warn};
use serde::Serialize;

/// Identifies one vertex of the grid, independent of which cell is asking.
/// Every vertex is shared by exactly three cells, so the sorted triple of
/// those cells is a unique, exact key for it. This avoids comparing floating
/// point positions.
pub type VertexKey = [HexCoordinate; 3];

/// One side of a cell that sits on the outer edge of a region, meaning the
/// cell across that side isn't in the region.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct BoundaryEdge {
    /// The in-region cell that owns this side
    pub position: HexCoordinate,
    /// Side index, see [crate::SIDE_VECTORS]
    pub side: usize,
    /// Compass direction the side faces
    pub direction: Direction,
    /// World position of corner `side`
    pub start: Point2,
    /// World position of corner `side + 1`
    pub end: Point2,
}

impl BoundaryEdge {
    /// Key of the vertex this edge starts at
    pub fn start_vertex(&self) -> VertexKey {
        vertex_key(self.position, self.side)
    }

    /// Key of the vertex this edge ends at
    pub fn end_vertex(&self) -> VertexKey {
        vertex_key(self.position, self.side + 1)
    }
}

/// Corner `i` of a cell touches sides `i - 1` and `i`, so it's shared with the
/// neighbors across those two sides
fn vertex_key(position: HexCoordinate, corner: usize) -> VertexKey {
    let corner = corner % SIDES;
    let mut key = [
        position,
        position + SIDE_VECTORS[(corner + SIDES - 1) % SIDES],
        position + SIDE_VECTORS[corner],
    ];
    key.sort_unstable();
    key
}

/// Get every boundary edge of a grid. For each cell (in grid order) and each
/// side (in side order), emit an edge if the neighbor across that side isn't
/// in the grid. Interior edges are never emitted.
///
/// Each edge runs clockwise around its own cell, so the edges around the
/// outside of a region wind clockwise (in world space, +y down) and the edges
/// around a hole wind counter-clockwise.
///
/// Returns an error for unbounded grids, which have no boundary to speak of.
pub fn extract(grid: &HexGrid) -> anyhow::Result<Vec<BoundaryEdge>> {
    let layout = grid.layout();
    let orientation = layout.orientation();
    let mut edges = Vec::new();
    for position in grid.iter()? {
        let corners = layout.corners(position);
        for side in 0..SIDES {
            if grid.neighbor_at_side(position, side, false).is_none() {
                edges.push(BoundaryEdge {
                    position,
                    side,
                    direction: orientation.direction(side),
                    start: corners[side],
                    end: corners[(side + 1) % SIDES],
                });
            }
        }
    }
    debug!("Extracted {} boundary edges", edges.len());
    Ok(edges)
}

/// A closed loop of boundary edges, as a list of world points. The first
/// point is repeated at the end, so the polyline can be drawn as-is.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Outline {
    pub points: Vec<Point2>,
}

impl Outline {
    /// Number of edges in the loop
    pub fn len(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Is the first point the same as the last? Always true for outlines
    /// built from a valid region.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => self.points.len() > 1 && first == last,
            _ => false,
        }
    }
}

/// Chain boundary edges into closed outlines. Edges are linked end-to-start
/// by exact vertex identity. A region with holes or several disconnected
/// pieces produces several outlines.
///
/// Any two cells that share a vertex also share a side, so a region can never
/// pinch down to a single vertex. Every boundary vertex therefore has exactly
/// one outgoing edge, and chaining never has to choose.
pub fn outlines(edges: &[BoundaryEdge]) -> Vec<Outline> {
    let mut outgoing: FnvHashMap<VertexKey, Vec<usize>> = FnvHashMap::default();
    for (i, edge) in edges.iter().enumerate() {
        outgoing.entry(edge.start_vertex()).or_default().push(i);
    }

    let mut used = vec![false; edges.len()];
    let mut outlines = Vec::new();
    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        let start_key = edges[first].start_vertex();
        let mut points = vec![edges[first].start];
        let mut current = first;
        loop {
            used[current] = true;
            let edge = &edges[current];
            points.push(edge.end);
            let key = edge.end_vertex();
            if key == start_key {
                break;
            }
            let next = outgoing
                .get(&key)
                .and_then(|candidates| {
                    candidates.iter().copied().find(|i| !used[*i])
                });
            match next {
                Some(next) => current = next,
                None => {
                    // Can only happen if the edges didn't come from a single
                    // extraction, e.g. the caller filtered some out
                    warn!(
                        "Boundary outline starting at {} is open",
                        edges[first].position
                    );
                    break;
                }
            }
        }
        outlines.push(Outline { points });
    }
    debug!("Chained {} edges into {} outlines", edges.len(), outlines.len());
    outlines
}
