//! Lazy walks over groups of cells. Traversals are small `Copy` descriptors;
//! every call to `iter` starts a fresh walk, so the same traversal can be
//! consumed any number of times.

use crate::hex::{HexCoordinate, SIDES, SIDE_VECTORS};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::iter::FusedIterator;

/// Largest radius a traversal can have. A spiral this big has just under
/// 2.7 billion cells, so its length still fits a 32-bit `usize`.
pub const MAX_RADIUS: u32 = 30_000;

/// Number of cells in a spiral (filled hexagon) of the given radius.
/// Saturates at `usize::MAX` if the count doesn't fit.
///
/// `1 + 6 + 12 + ... + 6r = 1 + 3r(r + 1)`
pub fn spiral_len(radius: u32) -> usize {
    let radius = u64::from(radius);
    3u64.checked_mul(radius)
        .and_then(|len| len.checked_mul(radius + 1))
        .and_then(|len| len.checked_add(1))
        .and_then(|len| usize::try_from(len).ok())
        .unwrap_or(usize::MAX)
}

/// Check a radius from an untrusted source, e.g. a signed JS number
fn checked_radius(radius: i64) -> anyhow::Result<u32> {
    if radius < 0 {
        bail!("Traversal radius must not be negative, got {}", radius);
    }
    if radius > i64::from(MAX_RADIUS) {
        bail!(
            "Traversal radius must be at most {}, got {}",
            MAX_RADIUS,
            radius
        );
    }
    Ok(radius as u32)
}

const fn capped(radius: u32) -> u32 {
    if radius > MAX_RADIUS {
        MAX_RADIUS
    } else {
        radius
    }
}

/// All cells exactly `radius` steps from `center`. Radius 0 is just the
/// center cell.
///
/// The walk starts on the cell `radius` steps along side 4 (NW for pointy
/// layouts, N for flat), then goes clockwise all the way around.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ring {
    center: HexCoordinate,
    radius: u32,
}

impl Ring {
    /// Radii beyond [MAX_RADIUS] are capped to it
    pub const fn new(center: HexCoordinate, radius: u32) -> Self {
        Self {
            center,
            radius: capped(radius),
        }
    }

    /// Build a ring from a signed radius. Fails for negative radii and
    /// radii beyond [MAX_RADIUS].
    pub fn try_new(center: HexCoordinate, radius: i64) -> anyhow::Result<Self> {
        Ok(Self::new(center, checked_radius(radius)?))
    }

    pub fn center(&self) -> HexCoordinate {
        self.center
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of cells in the ring
    pub fn len(&self) -> usize {
        if self.radius == 0 {
            1
        } else {
            // Radius is capped, so this always fits
            SIDES * self.radius as usize
        }
    }

    /// Rings always have at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn iter(&self) -> RingIter {
        RingIter {
            current: self.center + SIDE_VECTORS[4] * self.radius as i32,
            radius: self.radius,
            side: 0,
            step: 0,
            remaining: self.len(),
        }
    }
}

impl IntoIterator for Ring {
    type Item = HexCoordinate;
    type IntoIter = RingIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Ring {
    type Item = HexCoordinate;
    type IntoIter = RingIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [Ring]
#[derive(Clone, Debug)]
pub struct RingIter {
    /// The next cell to emit
    current: HexCoordinate,
    radius: u32,
    /// Which side of the ring we're walking along
    side: usize,
    /// How many steps we've taken along the current side
    step: u32,
    remaining: usize,
}

impl Iterator for RingIter {
    type Item = HexCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let next = self.current;
        self.remaining -= 1;

        // A zero-radius ring never moves. For everything else, each side of
        // the ring is `radius` steps long.
        if self.radius > 0 {
            self.current += SIDE_VECTORS[self.side];
            self.step += 1;
            if self.step == self.radius {
                self.step = 0;
                self.side += 1;
            }
        }
        Some(next)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for RingIter {}

impl FusedIterator for RingIter {}

/// All cells at most `radius` steps from `center`, i.e. a filled hexagon.
/// Cells are emitted ring by ring, starting with the center.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Spiral {
    center: HexCoordinate,
    radius: u32,
}

impl Spiral {
    /// Radii beyond [MAX_RADIUS] are capped to it
    pub const fn new(center: HexCoordinate, radius: u32) -> Self {
        Self {
            center,
            radius: capped(radius),
        }
    }

    /// Build a spiral from a signed radius. Fails for negative radii and
    /// radii beyond [MAX_RADIUS].
    pub fn try_new(center: HexCoordinate, radius: i64) -> anyhow::Result<Self> {
        Ok(Self::new(center, checked_radius(radius)?))
    }

    pub fn center(&self) -> HexCoordinate {
        self.center
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Number of cells in the spiral
    pub fn len(&self) -> usize {
        spiral_len(self.radius)
    }

    /// Spirals always have at least one cell
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Is the cell within this spiral? Doesn't walk the spiral.
    pub fn contains(&self, coord: HexCoordinate) -> bool {
        self.center.distance_to(coord) <= self.radius
    }

    /// The rings that make up this spiral, innermost first
    pub fn rings(&self) -> impl Iterator<Item = Ring> {
        let center = self.center;
        (0..=self.radius).map(move |radius| Ring::new(center, radius))
    }

    pub fn iter(&self) -> SpiralIter {
        SpiralIter {
            center: self.center,
            max_radius: self.radius,
            ring: Ring::new(self.center, 0).iter(),
            ring_radius: 0,
            remaining: self.len(),
        }
    }
}

impl IntoIterator for Spiral {
    type Item = HexCoordinate;
    type IntoIter = SpiralIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &Spiral {
    type Item = HexCoordinate;
    type IntoIter = SpiralIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the cells of a [Spiral]
#[derive(Clone, Debug)]
pub struct SpiralIter {
    center: HexCoordinate,
    max_radius: u32,
    /// Walk over the ring we're currently on
    ring: RingIter,
    ring_radius: u32,
    remaining: usize,
}

impl Iterator for SpiralIter {
    type Item = HexCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(coord) = self.ring.next() {
                self.remaining -= 1;
                return Some(coord);
            }
            if self.ring_radius >= self.max_radius {
                return None;
            }
            self.ring_radius += 1;
            self.ring = Ring::new(self.center, self.ring_radius).iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SpiralIter {}

impl FusedIterator for SpiralIter {}
