//! Cosmetic squash/stretch recovery
//!
//! Runs for every body, dragged or not. Nothing here feeds back into physics.

use super::body::Body;
use super::params::PhysicsParams;

/// Ease `deform` toward `target_deform`, then decay the target toward zero
#[inline]
pub fn relax(body: &mut Body, params: &PhysicsParams) {
    body.deform += (body.target_deform - body.deform) * params.deform_recovery;
    body.target_deform *= params.target_deform_decay;
}
