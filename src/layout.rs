//! Deterministic radial layout for mandalas and their verses.
//!
//! This module implements the closed-form geometry that positions every
//! entity of the dataset:
//! - Mandala `i` of `n` is placed at angle `i/n · 2π` on a circle of radius
//!   `main_radius`, so mandalas are always equally spaced, in order of first
//!   appearance in the source dataset.
//! - Verse `j` of `m` inside a mandala is placed on a phyllotaxis
//!   (sunflower-seed) spiral: radius `sqrt(j/m) · mandala_radius · fill` and
//!   angle `j · GOLDEN_ANGLE`. Successive multiples of the golden angle
//!   modulo 2π are maximally separated, which fills the disk with visually
//!   even density and avoids the radial "arm" artifacts of rational-angle
//!   spirals.
//!
//! The layout is a pure function of the group/item counts and indices: the
//! same inputs always produce the same coordinates, so a relayout after a
//! viewport resize reproduces the previous geometry exactly.
//!
//! All inputs and outputs are in layout space (unscaled world units); the
//! view transform in [`crate::view`] maps them to screen pixels.

use crate::config::LayoutConfig;
use crate::model::Mandala;

/// The golden angle `π(3 − √5)` ≈ 2.399963 rad.
pub fn golden_angle() -> f64 {
    std::f64::consts::PI * (3.0 - 5.0_f64.sqrt())
}

// ────────────────────────────────────────────────────────────────────────────
// Geometry primitives
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2d {
    pub x: f64,
    pub y: f64,
}

impl Vec2d {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectD {
    pub min: Vec2d,
    pub max: Vec2d,
}

impl RectD {
    pub fn from_min_max(min: Vec2d, max: Vec2d) -> Self {
        Self { min, max }
    }

    /// Axis-aligned square around `center` with half-extent `radius`.
    pub fn from_center_radius(center: Vec2d, radius: f64) -> Self {
        Self {
            min: Vec2d::new(center.x - radius, center.y - radius),
            max: Vec2d::new(center.x + radius, center.y + radius),
        }
    }

    pub fn center(&self) -> Vec2d {
        Vec2d::new(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn union(&self, other: RectD) -> Self {
        Self {
            min: Vec2d::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vec2d::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout
// ────────────────────────────────────────────────────────────────────────────

/// Assign `center_x/center_y` to every mandala and `local_x/local_y` to every
/// verse, in place. The side effect is the sole output.
///
/// A single-verse mandala places its verse exactly at the mandala center
/// (`sqrt(0/1) = 0`). Empty input (no mandalas, or a mandala without verses)
/// is a precondition violation upstream; it is guarded here so it never
/// divides by zero.
pub fn layout_mandalas(mandalas: &mut [Mandala], cfg: &LayoutConfig) {
    let num_mandalas = mandalas.len();
    if num_mandalas == 0 {
        return;
    }
    let golden = golden_angle();
    for (i, mandala) in mandalas.iter_mut().enumerate() {
        let angle = (i as f64 / num_mandalas as f64) * std::f64::consts::TAU;
        mandala.center_x = cfg.main_radius * angle.cos();
        mandala.center_y = cfg.main_radius * angle.sin();

        let num_verses = mandala.verses.len();
        if num_verses == 0 {
            continue;
        }
        for (j, verse) in mandala.verses.iter_mut().enumerate() {
            let r = (j as f64 / num_verses as f64).sqrt() * cfg.mandala_radius * cfg.spiral_fill;
            let theta = j as f64 * golden;
            verse.local_x = r * theta.cos();
            verse.local_y = r * theta.sin();
        }
    }
}

/// Union bounding box of the laid-out scene: the central decorative disk plus
/// every mandala disk. Verses lie strictly inside their mandala disk, so they
/// never extend the box.
pub fn scene_bounds(mandalas: &[Mandala], cfg: &LayoutConfig) -> RectD {
    let mut bounds = RectD::from_center_radius(Vec2d::new(0.0, 0.0), cfg.central_radius);
    for m in mandalas {
        bounds = bounds.union(RectD::from_center_radius(
            Vec2d::new(m.center_x, m.center_y),
            cfg.mandala_radius,
        ));
    }
    bounds
}
