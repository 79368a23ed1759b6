use crate::{
    hex::{HexCoordinate, OffsetCoordinate},
    layout::LayoutConfig,
};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Furthest any rectangle cell can be from offset `[0, 0]`, along either
/// axis. Any cell within this converts to an axial coordinate inside
/// [HexCoordinate::MAX_COMPONENT].
const MAX_OFFSET: i64 = HexCoordinate::MAX_COMPONENT as i64 / 4;

/// Configuration that defines a grid: how it's laid out in world space, and
/// which cells it contains.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate,
)]
#[serde(default)]
pub struct GridConfig {
    /// Config for the world-space layout of cells
    #[validate]
    pub layout: LayoutConfig,

    /// Which cells belong to the grid
    #[validate]
    pub shape: ShapeConfig,
}

/// The set of cells that belong to a grid. In serialized form, the variant is
/// picked by a `type` field, e.g. `{"type": "spiral", "radius": 3}`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeConfig {
    /// A block of cells laid out in offset rows and columns
    Rectangle(RectangleConfig),
    /// Every cell within some distance of a center cell
    Spiral(SpiralConfig),
    /// Every cell. Membership is always true, but there is no finite
    /// iteration order, so whole-grid operations are unavailable.
    Unbounded,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self::Unbounded
    }
}

impl Validate for ShapeConfig {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Rectangle(config) => config.validate(),
            Self::Spiral(config) => config.validate(),
            Self::Unbounded => Ok(()),
        }
    }
}

/// A rectangular block of cells. For pointy layouts this is `height` rows of
/// `width` cells each, with every other row shifted half a cell. Flat layouts
/// do the same with columns. [crate::OffsetParity] decides which lines shift.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_rectangle_bounds"))]
pub struct RectangleConfig {
    /// Number of columns
    #[validate(range(min = 1, max = 100000))]
    pub width: u32,

    /// Number of rows
    #[validate(range(min = 1, max = 100000))]
    pub height: u32,

    /// Offset coordinate of the top-left cell
    pub start: OffsetCoordinate,
}

impl Default for RectangleConfig {
    fn default() -> Self {
        Self {
            start: OffsetCoordinate::new(0, 0),
            width: 10,
            height: 10,
        }
    }
}

/// Every cell of the rectangle has to be within [MAX_OFFSET] of the origin
fn validate_rectangle_bounds(
    config: &RectangleConfig,
) -> Result<(), ValidationError> {
    let in_bounds = |start: i32, len: u32| {
        let start = i64::from(start);
        let end = start + i64::from(len) - 1;
        start >= -MAX_OFFSET && end <= MAX_OFFSET
    };
    if in_bounds(config.start.col, config.width)
        && in_bounds(config.start.row, config.height)
    {
        Ok(())
    } else {
        Err(ValidationError::new("rectangle_bounds"))
    }
}

/// A hexagon-shaped block of cells
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_spiral_bounds"))]
pub struct SpiralConfig {
    /// Distance from the center to the edge (in cells). Signed so that
    /// negative input gets caught by validation, rather than by the
    /// deserializer with a much less helpful message. The upper bound is
    /// [crate::MAX_RADIUS].
    #[validate(range(min = 0, max = 30000))]
    pub radius: i32,

    /// The cell in the middle
    pub center: HexCoordinate,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            center: HexCoordinate::ORIGIN,
            radius: 5,
        }
    }
}

/// Every cell of the spiral has to be within
/// [HexCoordinate::MAX_COMPONENT] of the origin
fn validate_spiral_bounds(
    config: &SpiralConfig,
) -> Result<(), ValidationError> {
    // Widened, since s doesn't fit in i32 for every center
    let (q, r) = (i64::from(config.center.q()), i64::from(config.center.r()));
    let reach = q.abs().max(r.abs()).max((q + r).abs())
        + i64::from(config.radius.max(0));
    if reach <= i64::from(HexCoordinate::MAX_COMPONENT) {
        Ok(())
    } else {
        Err(ValidationError::new("spiral_bounds"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens, assert_tokens, Token};

    #[test]
    fn test_shape_tokens() {
        assert_tokens(
            &ShapeConfig::Unbounded,
            &[
                Token::Struct {
                    name: "ShapeConfig",
                    len: 1,
                },
                Token::Str("type"),
                Token::Str("unbounded"),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_shape_defaults() {
        // Missing fields fall back to the variant's defaults
        assert_de_tokens(
            &ShapeConfig::Spiral(SpiralConfig {
                center: HexCoordinate::ORIGIN,
                radius: 2,
            }),
            &[
                Token::Map { len: None },
                Token::Str("type"),
                Token::Str("spiral"),
                Token::Str("radius"),
                Token::I32(2),
                Token::MapEnd,
            ],
        );
    }

    #[test]
    fn test_shape_json() {
        let shape: ShapeConfig = serde_json::from_str(
            r#"{"type": "rectangle", "width": 3, "height": 4}"#,
        )
        .unwrap();
        assert_eq!(
            shape,
            ShapeConfig::Rectangle(RectangleConfig {
                start: OffsetCoordinate::new(0, 0),
                width: 3,
                height: 4,
            })
        );
    }

    #[test]
    fn test_validate_shape() {
        assert!(ShapeConfig::default().validate().is_ok());
        assert!(ShapeConfig::Rectangle(RectangleConfig::default())
            .validate()
            .is_ok());

        let errors = ShapeConfig::Rectangle(RectangleConfig {
            width: 0,
            ..Default::default()
        })
        .validate()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("width"));

        let errors = ShapeConfig::Spiral(SpiralConfig {
            radius: -1,
            ..Default::default()
        })
        .validate()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("radius"));

        let errors = ShapeConfig::Spiral(SpiralConfig {
            radius: crate::MAX_RADIUS as i32 + 1,
            ..Default::default()
        })
        .validate()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("radius"));
        assert!(ShapeConfig::Spiral(SpiralConfig {
            radius: crate::MAX_RADIUS as i32,
            ..Default::default()
        })
        .validate()
        .is_ok());
    }

    #[test]
    fn test_validate_extent() {
        // Far out, but every cell still fits
        assert!(RectangleConfig {
            width: 10,
            height: 10,
            start: OffsetCoordinate::new(-MAX_OFFSET as i32, 1000),
        }
        .validate()
        .is_ok());

        for start in &[
            OffsetCoordinate::new(i32::MAX - 5, 0),
            OffsetCoordinate::new(0, i32::MIN),
            OffsetCoordinate::new(MAX_OFFSET as i32, 0),
        ] {
            let errors = RectangleConfig {
                width: 10,
                height: 10,
                start: *start,
            }
            .validate()
            .unwrap_err();
            assert!(
                errors.field_errors().contains_key("__all__"),
                "{:?}",
                start
            );
        }

        let errors = SpiralConfig {
            radius: 2,
            center: HexCoordinate::new(i32::MAX, 0),
        }
        .validate()
        .unwrap_err();
        assert!(errors.field_errors().contains_key("__all__"));
        assert!(SpiralConfig {
            radius: 2,
            center: HexCoordinate::new(1000, -5000),
        }
        .validate()
        .is_ok());
    }
}
