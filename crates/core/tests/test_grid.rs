use assert_approx_eq::assert_approx_eq;
use hexmap::{
    extract, outlines, CellSize, Direction, GridConfig, HexCoordinate,
    HexGrid, LayoutConfig, OffsetCoordinate, OffsetParity, Orientation,
    Overlay, Point2, RectangleConfig, ShapeConfig, Spiral,
};

/// The standard test map: 3x3 pointy, odd-r, unit cells at the origin
fn grid_3x3() -> HexGrid {
    HexGrid::new(GridConfig {
        layout: LayoutConfig {
            orientation: Orientation::Pointy,
            size: CellSize::uniform(1.0),
            origin: Point2::ORIGIN,
            offset: OffsetParity::Odd,
        },
        shape: ShapeConfig::Rectangle(RectangleConfig {
            start: OffsetCoordinate::new(0, 0),
            width: 3,
            height: 3,
        }),
    })
    .unwrap()
}

#[test]
fn test_pick_origin() {
    let grid = grid_3x3();
    let cells = grid.to_array().unwrap();
    let picked = grid.point_to_hex(Point2::new(0.0, 0.0)).unwrap();
    assert_eq!(picked, HexCoordinate::ORIGIN);
    assert_eq!(cells.iter().position(|c| *c == picked), Some(0));
    assert_eq!(grid.point_to_hex(Point2::new(1000.0, 1000.0)), None);
}

#[test]
fn test_pick_off_map() {
    // Points that can't be picked, e.g. from a pointer ray parallel to the
    // ground, are just "off the map"
    for &offset in &[OffsetParity::Odd, OffsetParity::Even] {
        let grid = HexGrid::new(GridConfig {
            layout: LayoutConfig {
                offset,
                ..Default::default()
            },
            shape: ShapeConfig::Rectangle(RectangleConfig::default()),
        })
        .unwrap();
        for &(x, y) in &[
            (1e12, 3.0),
            (-1e12, -1e12),
            (f64::INFINITY, 0.0),
            (0.0, f64::NEG_INFINITY),
            (f64::NAN, f64::NAN),
        ] {
            let point = Point2::new(x, y);
            assert_eq!(grid.point_to_hex(point), None, "{:?}", point);
            assert_eq!(grid.snap(point), None, "{:?}", point);
        }
        assert_eq!(
            grid.point_to_hex(Point2::ORIGIN),
            Some(HexCoordinate::ORIGIN)
        );
    }

    let unbounded = HexGrid::new(GridConfig::default()).unwrap();
    assert_eq!(unbounded.point_to_hex(Point2::new(f64::NAN, 0.0)), None);
    assert_eq!(unbounded.point_to_hex(Point2::new(1e12, 0.0)), None);
}

#[test]
fn test_pick_every_cell() {
    // Picking at any point close to a cell center finds that cell
    let grid = grid_3x3();
    for cell in grid.to_array().unwrap() {
        let center = grid.layout().to_world(cell);
        for &(dx, dy) in &[(0.0, 0.0), (0.3, 0.3), (-0.4, 0.1), (0.0, -0.6)] {
            let point = Point2::new(center.x + dx, center.y + dy);
            assert_eq!(grid.point_to_hex(point), Some(cell), "{}", point);
        }
    }
}

#[test]
fn test_boundary_3x3() {
    let grid = grid_3x3();
    let edges = extract(&grid).unwrap();
    assert_eq!(edges.len(), 22);

    // Every edge is one unit long, and the loop closes
    for edge in &edges {
        assert_approx_eq!(edge.start.distance_to(edge.end), 1.0);
    }
    let outlines = outlines(&edges);
    assert_eq!(outlines.len(), 1);
    let outline = &outlines[0];
    assert_eq!(outline.len(), 22);
    assert!(outline.is_closed());
}

#[test]
fn test_boundary_winds_clockwise() {
    // With +y down, a clockwise loop has a positive shoelace sum
    let grid = grid_3x3();
    let outline = outlines(&extract(&grid).unwrap()).remove(0);
    let area: f64 = outline
        .points
        .windows(2)
        .map(|pair| pair[0].x * pair[1].y - pair[1].x * pair[0].y)
        .sum();
    assert!(area > 0.0, "area {} should be positive", area);
    // 9 cells, each with area 3√3/2
    assert_approx_eq!(area / 2.0, 9.0 * 3.0 * 3.0_f64.sqrt() / 2.0);
}

#[test]
fn test_neighbor_directions() {
    let grid = grid_3x3();
    let center = HexCoordinate::new(1, 1);
    let expected = [
        (Direction::E, HexCoordinate::new(2, 1)),
        (Direction::SE, HexCoordinate::new(1, 2)),
        (Direction::SW, HexCoordinate::new(0, 2)),
        (Direction::W, HexCoordinate::new(0, 1)),
        (Direction::NW, HexCoordinate::new(1, 0)),
        (Direction::NE, HexCoordinate::new(2, 0)),
    ];
    for (direction, neighbor) in expected {
        assert_eq!(
            grid.neighbor_of(center, direction, false).unwrap(),
            Some(neighbor)
        );
        // The neighbor really is in that direction in world space
        let from = grid.layout().to_world(center);
        let to = grid.layout().to_world(neighbor);
        match direction {
            Direction::E => assert!(to.x > from.x && to.y == from.y),
            Direction::W => assert!(to.x < from.x && to.y == from.y),
            Direction::SE => assert!(to.x > from.x && to.y > from.y),
            Direction::SW => assert!(to.x < from.x && to.y > from.y),
            Direction::NE => assert!(to.x > from.x && to.y < from.y),
            Direction::NW => assert!(to.x < from.x && to.y < from.y),
            _ => unreachable!(),
        }
    }
    assert!(grid.neighbor_of(center, Direction::S, false).is_err());
}

#[test]
fn test_flat_neighbor_directions() {
    let grid = HexGrid::new(GridConfig {
        layout: LayoutConfig {
            orientation: Orientation::Flat,
            ..Default::default()
        },
        ..Default::default()
    })
    .unwrap();
    let center = HexCoordinate::ORIGIN;
    let north = grid.neighbor_of(center, Direction::N, false).unwrap().unwrap();
    let from = grid.layout().to_world(center);
    let to = grid.layout().to_world(north);
    assert_approx_eq!(to.x, from.x);
    assert!(to.y < from.y);
    assert!(grid.neighbor_of(center, Direction::E, false).is_err());
    assert!(grid.neighbor_of(center, Direction::W, true).is_err());
}

#[test]
fn test_overlay_on_grid() {
    let grid = grid_3x3();
    // Whole 3x3 map fits inside a radius-2 area around the middle cell
    let overlay = Overlay::new(&grid, HexCoordinate::new(1, 1), 4).unwrap();
    assert_eq!(overlay.radius, 2);
    assert_eq!(overlay.cells.len(), 9);
    assert_eq!(overlay.edges.len(), 22);
}

#[test]
fn test_traverse_preserves_layout() {
    let grid = grid_3x3();
    let area = grid.traverse(Spiral::new(HexCoordinate::new(1, 1), 1));
    assert_eq!(area.layout(), grid.layout());
    assert_eq!(area.len(), Some(7));
    for cell in area.to_array().unwrap() {
        assert!(grid.contains(cell));
    }
}
