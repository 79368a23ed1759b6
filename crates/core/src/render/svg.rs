use crate::{
    grid::HexGrid, overlay::Overlay, render::Color3, util::unit::Point2,
};
use log::debug;
use svg::{
    node::{
        element::{Group, Polygon, Polyline},
        Comment,
    },
    Document,
};

const CELL_FILL: Color3 = Color3::new(245, 240, 225);
const CELL_STROKE: Color3 = Color3::new(120, 110, 100);
const OVERLAY_FILL: Color3 = Color3::new(72, 192, 240);
const OVERLAY_STROKE: Color3 = Color3::new(20, 90, 160);

/// Render a grid as a 2D top-down SVG, with an optional area overlay drawn on
/// top. The view box is fitted to the corners of every cell, so the grid
/// fills the image. Returns an error for unbounded grids.
pub fn grid_to_svg(
    grid: &HexGrid,
    overlay: Option<&Overlay>,
) -> anyhow::Result<Document> {
    let layout = grid.layout();
    // Stroke widths are relative to the cell size, so the output looks the
    // same at any scale
    let stroke_width = layout.size().x.min(layout.size().y) / 20.0;

    let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    let mut cells = Group::new()
        .set("fill", CELL_FILL.to_html())
        .set("stroke", CELL_STROKE.to_html())
        .set("stroke-width", stroke_width);
    let mut cell_count = 0;
    for coord in grid.iter()? {
        let corners = layout.corners(coord);
        for corner in &corners {
            min.x = min.x.min(corner.x);
            min.y = min.y.min(corner.y);
            max.x = max.x.max(corner.x);
            max.y = max.y.max(corner.y);
        }
        cells = cells
            .add(Comment::new(coord.to_string())) // Readability!
            .add(polygon(&corners));
        cell_count += 1;
    }

    // An empty grid still needs a valid view box
    if cell_count == 0 {
        min = Point2::ORIGIN;
        max = Point2::ORIGIN;
    }
    let size = max - min;

    let mut document = Document::new()
        .set("viewBox", (min.x, min.y, size.x, size.y))
        .add(Comment::new(format!("\n{:#?}\n", layout.config())))
        .add(cells);

    if let Some(overlay) = overlay {
        let mut group = Group::new().set("fill", OVERLAY_FILL.to_html());
        for fill in &overlay.fills {
            group = group.add(polygon(fill).set("fill-opacity", 0.4));
        }
        for outline in &overlay.outlines {
            group = group.add(
                Polyline::new()
                    .set("points", points(&outline.points))
                    .set("fill", "none")
                    .set("stroke", OVERLAY_STROKE.to_html())
                    .set("stroke-width", stroke_width * 3.0),
            );
        }
        document = document.add(group);
    }

    debug!("Rendered {} cells to SVG", cell_count);
    Ok(document)
}

fn polygon(corners: &[Point2]) -> Polygon {
    Polygon::new().set("points", points(corners))
}

fn points(points: &[Point2]) -> Vec<(f64, f64)> {
    points.iter().map(|point| (point.x, point.y)).collect()
}
