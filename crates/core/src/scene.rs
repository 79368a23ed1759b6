//! Serializable records for the tabletop scene graph: scenes, their map
//! levels, and the actors/tokens placed on them. These are plain data; the
//! only logic here is deriving a level's grid from its backdrop image.

use crate::{
    grid::{
        config::{GridConfig, RectangleConfig, ShapeConfig},
        HexGrid,
    },
    hex::{Direction, HexCoordinate, OffsetCoordinate},
    layout::LayoutConfig,
    util::unit::Point2,
};
use anyhow::{bail, Context};
use log::debug;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A playable map, made up of one or more stacked levels
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct Scene {
    pub id: String,
    pub name: String,
    /// Image pixels per grid cell. Levels can override this.
    #[validate(range(min = 0.001))]
    pub ppf: f64,
    #[serde(default)]
    #[validate]
    pub levels: Vec<SceneLevel>,
    /// ID of the level currently shown, if any
    #[serde(default)]
    pub active_level: Option<String>,
}

impl Scene {
    /// Look up the active level. `None` if no level is active, or if the
    /// active ID doesn't match any level.
    pub fn active_level(&self) -> Option<&SceneLevel> {
        let id = self.active_level.as_ref()?;
        self.levels.iter().find(|level| &level.id == id)
    }
}

/// One floor of a scene, with its own backdrop image
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
pub struct SceneLevel {
    pub id: String,
    pub name: String,
    pub image_src: String,
    /// Height of this level above the scene's base, in world units
    #[serde(default)]
    pub elevation: f64,
    /// Overrides the scene's pixels-per-cell, for images drawn at a
    /// different scale
    #[serde(default)]
    #[validate(range(min = 0.001))]
    pub ppf: Option<f64>,
}

impl SceneLevel {
    /// The pixels-per-cell that applies to this level
    pub fn effective_ppf(&self, scene_ppf: f64) -> f64 {
        self.ppf.unwrap_or(scene_ppf)
    }

    /// Build the grid config that covers this level's backdrop image. The
    /// grid is just big enough to cover the whole image, and centered on
    /// the world origin.
    pub fn grid_config(
        &self,
        scene_ppf: f64,
        image_width: u32,
        image_height: u32,
        layout: LayoutConfig,
    ) -> anyhow::Result<GridConfig> {
        let ppf = self.effective_ppf(scene_ppf);
        if !(ppf > 0.0 && ppf.is_finite()) {
            bail!(
                "Level {} has invalid pixels-per-cell {}; must be positive",
                self.id,
                ppf
            );
        }

        let width = (f64::from(image_width) / ppf).ceil() as u32;
        let height = (f64::from(image_height) / ppf).ceil() as u32;
        // Negating the floored half puts the image center on the origin
        let start = OffsetCoordinate::new(
            -((width / 2) as i32),
            -((height / 2) as i32),
        );
        debug!(
            "Level {} image {}x{} px at {} ppf -> {}x{} cells",
            self.id, image_width, image_height, ppf, width, height
        );

        Ok(GridConfig {
            layout,
            shape: ShapeConfig::Rectangle(RectangleConfig {
                start,
                width,
                height,
            }),
        })
    }

    /// Build the grid that covers this level's backdrop image. See
    /// [Self::grid_config].
    pub fn grid(
        &self,
        scene_ppf: f64,
        image_width: u32,
        image_height: u32,
        layout: LayoutConfig,
    ) -> anyhow::Result<HexGrid> {
        let config =
            self.grid_config(scene_ppf, image_width, image_height, layout)?;
        HexGrid::new(config)
            .with_context(|| format!("Cannot build grid for level {}", self.id))
    }
}

/// A character or creature. Tokens are the on-map instances of an actor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
    /// Footprint, in cells across
    pub size: u32,
}

/// A piece on the map
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub id: String,
    /// The actor this token represents
    pub actor_id: String,
    /// Linked tokens share state with their actor, unlinked tokens are
    /// independent copies
    #[serde(default)]
    pub linked: bool,
    /// Footprint, in cells across
    pub size: u32,
    pub position: HexCoordinate,
    pub facing: Direction,
}

impl Token {
    /// Snap the token to the cell under a world point. Returns the new
    /// position, or `None` (leaving the token where it was) if the point is
    /// off the grid.
    pub fn move_to(
        &mut self,
        grid: &HexGrid,
        point: Point2,
    ) -> Option<HexCoordinate> {
        let position = grid.point_to_hex(point)?;
        self.position = position;
        Some(position)
    }
}
