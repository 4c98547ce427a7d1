//! Dropli - physics blobs for exploring color palettes
//!
//! Core modules:
//! - `sim`: Deterministic blob simulation (bodies, collisions, drag, scheduling)
//! - `color`: HEX/HSL conversion and hue-clustered random colors
//! - `palette`: Palette values exchanged with storage and the visualizer
//! - `visualizer`: Soft color-field renderer
//! - `settings`: Persisted user preferences

pub mod color;
pub mod palette;
pub mod settings;
pub mod sim;
pub mod visualizer;

pub use color::{ColorError, Hsl, Rgb};
pub use palette::{Palette, PaletteError};
pub use settings::Settings;

/// Engine configuration constants
pub mod consts {
    /// Velocity damping applied every tick
    pub const FRICTION: f32 = 0.9995;
    /// Velocity retained (and inverted) on wall contact
    pub const WALL_BOUNCE: f32 = 0.6;
    /// Body-body restitution (0 = inelastic, 1 = elastic)
    pub const RESTITUTION: f32 = 0.8;

    /// Fraction of the remaining distance to the target deformation covered per tick
    pub const DEFORM_RECOVERY: f32 = 0.08;
    /// Per-tick decay of the target deformation
    pub const TARGET_DEFORM_DECAY: f32 = 0.9;
    /// Side walls: deformation per unit of rebound speed, and its cap
    pub const SIDE_WALL_DEFORM_SCALE: f32 = 0.5;
    pub const SIDE_WALL_DEFORM_CAP: f32 = 2.0;
    /// Top/bottom walls
    pub const FLOOR_DEFORM_SCALE: f32 = 0.6;
    pub const FLOOR_DEFORM_CAP: f32 = 2.5;
    /// Visual scale per unit of deformation (scale = 1 + deform * this)
    pub const DEFORM_RENDER_SCALE: f32 = 0.3;

    /// Mass = radius * MASS_PER_RADIUS
    pub const MASS_PER_RADIUS: f32 = 0.08;
    /// Spawned blob radius range [MIN, MIN + SPREAD)
    pub const BLOB_MIN_RADIUS: f32 = 70.0;
    pub const BLOB_RADIUS_SPREAD: f32 = 50.0;
    /// Spawned velocity components are in [-SPAWN_SPEED, SPAWN_SPEED)
    pub const SPAWN_SPEED: f32 = 1.0;

    /// Blob count limits (settings slider)
    pub const DEFAULT_BLOB_COUNT: usize = 5;
    pub const MIN_BLOB_COUNT: usize = 1;
    pub const MAX_BLOB_COUNT: usize = 12;

    /// Pointer delta to release velocity factor
    pub const DRAG_VELOCITY_SCALE: f32 = 0.2;
    /// Click push reach (pixels) and peak impulse
    pub const PUSH_RADIUS: f32 = 245.0;
    pub const PUSH_FORCE: f32 = 15.0;

    /// Entropy jitter cadence and factor range [MIN, MIN + SPREAD)
    pub const ENTROPY_INTERVAL_MS: i32 = 3000;
    pub const ENTROPY_MIN_FACTOR: f32 = 0.8;
    pub const ENTROPY_FACTOR_SPREAD: f32 = 0.8;

    /// Hue window around the base hue for generated colors (degrees)
    pub const HUE_RANGE: f32 = 50.0;

    /// Width taken from the scene when the settings panel is open
    pub const SETTINGS_PANEL_WIDTH: f32 = 320.0;
}

/// Squared distance between two points, used wherever a sqrt can be avoided
#[inline]
pub fn distance_squared(a: glam::Vec2, b: glam::Vec2) -> f32 {
    (a - b).length_squared()
}
