//! Simulated blob bodies

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::{ColorError, Hsl, Rgb};
use crate::consts::{DEFORM_RENDER_SCALE, MASS_PER_RADIUS};

/// A circular blob
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Opaque unique id
    pub id: String,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub mass: f32,
    /// Current squash/stretch (cosmetic, never read by physics)
    pub deform: Vec2,
    /// Value `deform` relaxes toward; set by wall hits
    pub target_deform: Vec2,
    /// Mirrors `Interaction`'s drag target; excludes the body from integration
    /// and from positional correction
    pub dragging: bool,
    /// `#rrggbb`
    pub color_hex: String,
    /// CSS `hsl()` string
    pub color_hsl: String,
}

impl Body {
    pub fn new(id: impl Into<String>, pos: Vec2, vel: Vec2, radius: f32) -> Self {
        debug_assert!(radius > 0.0, "body radius must be positive");
        let gray = Rgb::new(0x80, 0x80, 0x80);
        Self {
            id: id.into(),
            pos,
            vel,
            radius,
            mass: radius * MASS_PER_RADIUS,
            deform: Vec2::ZERO,
            target_deform: Vec2::ZERO,
            dragging: false,
            color_hex: gray.to_hex(),
            color_hsl: Hsl::from_rgb(gray).css(),
        }
    }

    /// Builder-style color assignment from an HSL value
    pub fn with_hsl(mut self, hsl: Hsl) -> Self {
        self.color_hex = hsl.to_hex();
        self.color_hsl = hsl.css();
        self
    }

    /// Recolor from a hex string. Kinematics are untouched.
    pub fn set_color(&mut self, hex: &str) -> Result<(), ColorError> {
        self.set_rgb(Rgb::from_hex(hex)?);
        Ok(())
    }

    pub fn set_rgb(&mut self, rgb: Rgb) {
        self.color_hex = rgb.to_hex();
        self.color_hsl = Hsl::from_rgb(rgb).css();
    }

    /// Whether `point` lies strictly inside the circle (no sqrt)
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        crate::distance_squared(self.pos, point) < self.radius * self.radius
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        1.0 / self.mass
    }

    /// Per-axis draw scale derived from the deformation
    pub fn render_scale(&self) -> Vec2 {
        Vec2::ONE + self.deform * DEFORM_RENDER_SCALE
    }
}
