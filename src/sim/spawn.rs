//! Blob creation, count changes and entropy jitter
//!
//! All randomness in the simulation comes from the spawner's seeded RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::body::Body;
use super::params::PhysicsParams;
use super::registry::BodyRegistry;
use crate::color::{Hsl, random_near_hue};
use crate::consts::*;

#[derive(Debug, Clone)]
pub struct Spawner {
    seed: u64,
    rng: Pcg32,
    next_serial: u64,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            next_serial: 0,
        }
    }

    fn next_id(&mut self) -> String {
        let id = format!("blob-{}-{}", self.next_serial, self.seed);
        self.next_serial += 1;
        id
    }

    pub fn random_hue(&mut self) -> f32 {
        self.rng.random::<f32>() * 360.0
    }

    /// A fresh body somewhere inside `area`, colored near `base_hue`
    pub fn spawn_body(&mut self, area: Vec2, base_hue: f32) -> Body {
        let radius = BLOB_MIN_RADIUS + self.rng.random::<f32>() * BLOB_RADIUS_SPREAD;
        let x = self.rng.random::<f32>() * (area.x - 2.0 * radius).max(0.0) + radius;
        let y = self.rng.random::<f32>() * (area.y - 2.0 * radius).max(0.0) + radius;
        let vel = Vec2::new(
            (self.rng.random::<f32>() - 0.5) * 2.0 * SPAWN_SPEED,
            (self.rng.random::<f32>() - 0.5) * 2.0 * SPAWN_SPEED,
        );
        let color = random_near_hue(&mut self.rng, base_hue);

        Body::new(self.next_id(), Vec2::new(x, y), vel, radius).with_hsl(color)
    }

    /// Replace the registry contents with `count` new bodies sharing a random base hue
    pub fn populate(&mut self, registry: &mut BodyRegistry, count: usize, area: Vec2) {
        registry.clear();
        let base_hue = self.random_hue();
        for _ in 0..count {
            let body = self.spawn_body(area, base_hue);
            registry.add(body);
        }
        log::info!("Spawned {} blobs around hue {:.0}", count, base_hue);
    }

    /// Grow by appending or shrink by dropping the tail. New bodies follow
    /// the hue of the first existing body so the palette stays coherent.
    pub fn resize(&mut self, registry: &mut BodyRegistry, count: usize, area: Vec2) {
        let current = registry.len();
        if current == count {
            return;
        }

        if current > count {
            registry.truncate(count);
            log::debug!("Trimmed blobs {} -> {}", current, count);
            return;
        }

        let base_hue = match registry.get(0).map(|b| Hsl::from_hex(&b.color_hex)) {
            Some(Ok(hsl)) => hsl.h,
            _ => self.random_hue(),
        };
        for _ in current..count {
            let body = self.spawn_body(area, base_hue);
            registry.add(body);
        }
        log::debug!("Added blobs {} -> {}", current, count);
    }

    /// Entropy: scale each velocity component by a random factor
    pub fn jitter(&mut self, registry: &mut BodyRegistry, params: &PhysicsParams) {
        for body in registry.bodies_mut() {
            body.vel.x *= params.entropy_min_factor + self.rng.random::<f32>() * params.entropy_factor_spread;
            body.vel.y *= params.entropy_min_factor + self.rng.random::<f32>() * params.entropy_factor_spread;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_populate_replaces_contents() {
        let mut spawner = Spawner::new(42);
        let mut registry = BodyRegistry::new();
        spawner.populate(&mut registry, 5, AREA);
        let first_ids: Vec<_> = registry.iter().map(|b| b.id.clone()).collect();

        spawner.populate(&mut registry, 3, AREA);
        assert_eq!(registry.len(), 3);
        assert!(registry.iter().all(|b| !first_ids.contains(&b.id)));
    }

    #[test]
    fn test_spawned_bodies_are_valid() {
        let mut spawner = Spawner::new(1);
        let mut registry = BodyRegistry::new();
        spawner.populate(&mut registry, 12, AREA);

        for body in registry.iter() {
            assert!(body.radius >= BLOB_MIN_RADIUS && body.radius < BLOB_MIN_RADIUS + BLOB_RADIUS_SPREAD);
            assert!((body.mass - body.radius * MASS_PER_RADIUS).abs() < 1e-5);
            assert!(body.pos.x >= body.radius && body.pos.x <= AREA.x - body.radius);
            assert!(body.pos.y >= body.radius && body.pos.y <= AREA.y - body.radius);
            assert!(body.vel.x.abs() <= SPAWN_SPEED && body.vel.y.abs() <= SPAWN_SPEED);
            assert!(body.color_hex.starts_with('#') && body.color_hex.len() == 7);
        }
    }

    #[test]
    fn test_ids_are_unique() {
        let mut spawner = Spawner::new(9);
        let mut registry = BodyRegistry::new();
        spawner.populate(&mut registry, 4, AREA);
        spawner.resize(&mut registry, 8, AREA);

        let mut ids: Vec<_> = registry.iter().map(|b| b.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn test_resize_keeps_existing_prefix() {
        let mut spawner = Spawner::new(3);
        let mut registry = BodyRegistry::new();
        spawner.populate(&mut registry, 6, AREA);
        let before: Vec<_> = registry.iter().map(|b| b.id.clone()).collect();

        spawner.resize(&mut registry, 2, AREA);
        let after: Vec<_> = registry.iter().map(|b| b.id.clone()).collect();
        assert_eq!(after, before[..2]);

        spawner.resize(&mut registry, 4, AREA);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get(0).unwrap().id, before[0]);
    }

    #[test]
    fn test_same_seed_same_bodies() {
        let mut a = BodyRegistry::new();
        let mut b = BodyRegistry::new();
        Spawner::new(77).populate(&mut a, 5, AREA);
        Spawner::new(77).populate(&mut b, 5, AREA);
        assert_eq!(a.bodies(), b.bodies());
    }

    #[test]
    fn test_jitter_scales_within_range() {
        let params = PhysicsParams::default();
        let mut spawner = Spawner::new(5);
        let mut registry = BodyRegistry::new();
        registry.add(Body::new("a", Vec2::new(100.0, 100.0), Vec2::new(10.0, -10.0), 50.0));

        for _ in 0..50 {
            registry.get_mut(0).unwrap().vel = Vec2::new(10.0, -10.0);
            spawner.jitter(&mut registry, &params);
            let vel = registry.get(0).unwrap().vel;
            assert!(vel.x >= 8.0 && vel.x <= 16.0);
            assert!(vel.y <= -8.0 && vel.y >= -16.0);
        }
    }
}
