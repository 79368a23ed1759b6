//! This crate provides WebAssembly bindings for hexmap. Configs cross the
//! boundary as plain JS objects; build a [HexMap] from one, then use it for
//! picking, neighbor lookup and overlays.
//!
//! You probably won't ever want to include this crate in another Rust project.
//! Instead, use `wasm-pack` to build this into an npm package, then import that
//! into your JS project.

mod util;

use crate::util::{to_js, ConfigHelper, ResultExt};
use hexmap::{
    anyhow::anyhow, Direction, GridConfig, HexCoordinate, HexGrid, Overlay,
    Point2, Ring, Spiral,
};
use log::debug;
use std::str::FromStr;
use wasm_bindgen::prelude::*;

type GridConfigHelper = ConfigHelper<GridConfig, GridConfigObject>;

/// Executed when the Wasm module is first loaded
#[wasm_bindgen(start)]
pub fn main() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    wasm_logger::init(wasm_logger::Config::default());
}

/// Get the default grid config as a JS object.
#[wasm_bindgen]
pub fn default_grid_config() -> Result<GridConfigObject, JsValue> {
    GridConfigHelper::new().default()
}

/// Validate the given config and return it as a strictly typed JS object.
/// Any missing values will be populated with defaults. If the given value
/// fails to deserialize, or has any invalid values, this will fail.
#[wasm_bindgen]
pub fn validate_grid_config(
    input: GridConfigObject,
) -> Result<GridConfigObject, JsValue> {
    GridConfigHelper::new().validate(&input)
}

/// A hex grid, ready for spatial queries. All coordinates going in and out
/// are axial `{q, r}` objects, all points are world-space `{x, y}` objects.
#[wasm_bindgen]
pub struct HexMap {
    grid: HexGrid,
}

#[wasm_bindgen]
impl HexMap {
    /// Build a grid from the given config. The config is given as a JS
    /// object. It will be deserialized and validated, and if either of those
    /// fail this will return an error.
    #[wasm_bindgen(constructor)]
    pub fn new(config: GridConfigObject) -> Result<HexMap, JsValue> {
        // Deserialize the config JS object into a Rust value
        let config = GridConfigHelper::new().deserialize(&config)?;
        // This will validate the config
        let grid = HexGrid::new(config).into_js()?;
        debug!("Built grid with {:?} cells", grid.len());
        Ok(Self { grid })
    }

    /// Number of cells in the grid, or `undefined` for unbounded grids
    pub fn len(&self) -> Option<usize> {
        self.grid.len()
    }

    pub fn contains(&self, q: i32, r: i32) -> bool {
        self.grid.contains(HexCoordinate::new(q, r))
    }

    /// Get the cell at a world point, or `null` if it's off the grid
    pub fn point_to_hex(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        to_js(&self.grid.point_to_hex(Point2::new(x, y)))
    }

    /// Get the world-space center of a cell
    pub fn to_world(&self, q: i32, r: i32) -> Result<JsValue, JsValue> {
        to_js(&self.grid.layout().to_world(HexCoordinate::new(q, r)))
    }

    /// Get the six world-space corners of a cell, clockwise
    pub fn corners(&self, q: i32, r: i32) -> Result<JsValue, JsValue> {
        to_js(&self.grid.layout().corners(HexCoordinate::new(q, r)))
    }

    /// Get the neighbor in a compass direction (e.g. `"ne"`), or `null` if
    /// it's off the grid and `allow_outside` isn't set. Fails if the
    /// direction is invalid or ambiguous for the grid's orientation.
    pub fn neighbor(
        &self,
        q: i32,
        r: i32,
        direction: &str,
        allow_outside: bool,
    ) -> Result<JsValue, JsValue> {
        let direction = Direction::from_str(direction)
            .map_err(|_| anyhow!("Unknown direction {:?}", direction))
            .into_js()?;
        let neighbor = self
            .grid
            .neighbor_of(HexCoordinate::new(q, r), direction, allow_outside)
            .into_js()?;
        to_js(&neighbor)
    }

    /// Every cell in the grid. Fails for unbounded grids.
    pub fn to_array(&self) -> Result<JsValue, JsValue> {
        to_js(&self.grid.to_array().into_js()?)
    }

    /// In-grid cells exactly `radius` steps from a cell. Fails for negative
    /// or overly large radii.
    pub fn ring(
        &self,
        q: i32,
        r: i32,
        radius: i32,
    ) -> Result<JsValue, JsValue> {
        let ring = Ring::try_new(HexCoordinate::new(q, r), radius.into())
            .into_js()?;
        to_js(&self.grid.traverse(ring).to_array().into_js()?)
    }

    /// In-grid cells at most `radius` steps from a cell, innermost first.
    /// Fails for negative or overly large radii.
    pub fn spiral(
        &self,
        q: i32,
        r: i32,
        radius: i32,
    ) -> Result<JsValue, JsValue> {
        let spiral = Spiral::try_new(HexCoordinate::new(q, r), radius.into())
            .into_js()?;
        to_js(&self.grid.traverse(spiral).to_array().into_js()?)
    }

    /// Compute an area overlay: covered cells, fill polygons and outlines.
    /// Fails for negative diameters.
    pub fn overlay(
        &self,
        q: i32,
        r: i32,
        diameter: i32,
    ) -> Result<JsValue, JsValue> {
        let diameter = u32::try_from(diameter)
            .map_err(|_| anyhow!("Diameter must not be negative"))
            .into_js()?;
        let overlay =
            Overlay::new(&self.grid, HexCoordinate::new(q, r), diameter)
                .into_js()?;
        to_js(&overlay)
    }

    /// Get the boundary edges of the whole grid. Fails for unbounded grids.
    pub fn boundary(&self) -> Result<JsValue, JsValue> {
        to_js(&hexmap::extract(&self.grid).into_js()?)
    }
}

#[wasm_bindgen(typescript_custom_section)]
const TS_APPEND_CONTENT: &'static str = r#"

export type Orientation = 'pointy' | 'flat';

export interface HexCoordinate {
    q: number;
    r: number;
}

/**
 * See description in the `extern "C"` section below
 */
export interface GridConfigObject {
    layout: {
        orientation: Orientation;
        offset: 'odd' | 'even';
        size: { x: number; y: number };
        origin: { x: number; y: number };
    };
    shape:
        | {
              type: 'rectangle';
              width: number;
              height: number;
              start: { col: number; row: number };
          }
        | { type: 'spiral'; radius: number; center: HexCoordinate }
        | { type: 'unbounded' };
}
"#;

#[wasm_bindgen]
extern "C" {
    /// A TS version of the [GridConfig] type from the core crate. This needs
    /// to be mapped manually because wasm-bindgen can't describe tagged
    /// enums. This type represents what **can be deserialized into a
    /// [GridConfig]**.
    ///
    /// **It is very important that this stays up to date with the
    /// [GridConfig] type**.
    #[wasm_bindgen(typescript_type = "GridConfigObject")]
    pub type GridConfigObject;
}
