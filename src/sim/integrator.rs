//! Explicit Euler integration with viewport containment

use glam::Vec2;

use super::body::Body;
use super::params::PhysicsParams;

/// Advance one free body by one tick inside a `bounds.x` by `bounds.y` viewport.
///
/// Dragging bodies are left alone: their position belongs to the pointer.
/// Returns true if the body touched a wall this tick.
pub fn integrate(body: &mut Body, params: &PhysicsParams, bounds: Vec2) -> bool {
    if body.dragging {
        return false;
    }

    body.vel *= params.friction;
    body.pos += body.vel;

    let r = body.radius;
    let mut hit = false;

    // Side walls squash vertically
    if body.pos.x - r < 0.0 {
        body.pos.x = r;
        body.vel.x *= -params.wall_bounce;
        body.target_deform.y =
            (body.vel.x.abs() * params.side_wall_deform_scale).min(params.side_wall_deform_cap);
        hit = true;
    } else if body.pos.x + r > bounds.x {
        body.pos.x = bounds.x - r;
        body.vel.x *= -params.wall_bounce;
        body.target_deform.y =
            (body.vel.x.abs() * params.side_wall_deform_scale).min(params.side_wall_deform_cap);
        hit = true;
    }

    if body.pos.y - r < 0.0 {
        body.pos.y = r;
        body.vel.y *= -params.wall_bounce;
        body.target_deform.x =
            (body.vel.y.abs() * params.floor_deform_scale).min(params.floor_deform_cap);
        hit = true;
    } else if body.pos.y + r > bounds.y {
        body.pos.y = bounds.y - r;
        body.vel.y *= -params.wall_bounce;
        body.target_deform.x =
            (body.vel.y.abs() * params.floor_deform_scale).min(params.floor_deform_cap);
        hit = true;
    }

    hit
}
