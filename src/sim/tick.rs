//! One simulation step
//!
//! Called once per animation frame by the driver (through `Scene`).

use glam::Vec2;

use super::collision::resolve_collisions;
use super::deform::relax;
use super::integrator::integrate;
use super::params::PhysicsParams;
use super::registry::BodyRegistry;

/// What happened during a tick (for logging/diagnostics)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub wall_hits: usize,
    pub contacts: usize,
}

/// Advance every body by one step inside a `width` by `height` viewport
pub fn tick(registry: &mut BodyRegistry, params: &PhysicsParams, width: f32, height: f32) -> TickStats {
    let bounds = Vec2::new(width, height);
    let mut stats = TickStats::default();

    for body in registry.bodies_mut() {
        if integrate(body, params, bounds) {
            stats.wall_hits += 1;
        }
        relax(body, params);
    }

    stats.contacts = resolve_collisions(registry.bodies_mut(), params.restitution);
    stats
}
