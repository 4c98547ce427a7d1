//! Runtime physics tuning
//!
//! Defaults come from `crate::consts`; a JSON override may set any subset.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsParams {
    pub friction: f32,
    pub wall_bounce: f32,
    pub restitution: f32,
    pub deform_recovery: f32,
    pub target_deform_decay: f32,
    pub side_wall_deform_scale: f32,
    pub side_wall_deform_cap: f32,
    pub floor_deform_scale: f32,
    pub floor_deform_cap: f32,
    pub drag_velocity_scale: f32,
    pub push_radius: f32,
    pub push_force: f32,
    pub entropy_min_factor: f32,
    pub entropy_factor_spread: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            friction: FRICTION,
            wall_bounce: WALL_BOUNCE,
            restitution: RESTITUTION,
            deform_recovery: DEFORM_RECOVERY,
            target_deform_decay: TARGET_DEFORM_DECAY,
            side_wall_deform_scale: SIDE_WALL_DEFORM_SCALE,
            side_wall_deform_cap: SIDE_WALL_DEFORM_CAP,
            floor_deform_scale: FLOOR_DEFORM_SCALE,
            floor_deform_cap: FLOOR_DEFORM_CAP,
            drag_velocity_scale: DRAG_VELOCITY_SCALE,
            push_radius: PUSH_RADIUS,
            push_force: PUSH_FORCE,
            entropy_min_factor: ENTROPY_MIN_FACTOR,
            entropy_factor_spread: ENTROPY_FACTOR_SPREAD,
        }
    }
}

impl PhysicsParams {
    /// Parse a (possibly partial) JSON override
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
