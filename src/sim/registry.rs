//! Body registry
//!
//! Sole owner of the simulated bodies. Everything else borrows them for the
//! duration of a call; indices are only stable until the next `clear`/`truncate`.

use glam::Vec2;

use super::body::Body;

#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Append a body; insertion order is iteration and collision-pair order
    pub fn add(&mut self, body: Body) {
        self.bodies.push(body);
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Keep the first `len` bodies
    pub fn truncate(&mut self, len: usize) {
        self.bodies.truncate(len);
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// The live list, not a copy
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    /// Index of the first body (insertion order) strictly containing `point`
    pub fn find_at(&self, point: Vec2) -> Option<usize> {
        self.bodies.iter().position(|b| b.contains(point))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn body(id: &str, x: f32, y: f32, r: f32) -> Body {
        Body::new(id, Vec2::new(x, y), Vec2::ZERO, r)
    }

    #[test]
    fn test_find_at_prefers_insertion_order() {
        let mut registry = BodyRegistry::new();
        registry.add(body("big", 100.0, 100.0, 50.0));
        registry.add(body("small", 100.0, 100.0, 30.0));

        let hit = registry.find_at(Vec2::new(100.0, 100.0)).unwrap();
        assert_eq!(registry.get(hit).unwrap().id, "big");
    }

    #[test]
    fn test_find_at_miss() {
        let mut registry = BodyRegistry::new();
        registry.add(body("a", 100.0, 100.0, 50.0));
        assert_eq!(registry.find_at(Vec2::new(300.0, 300.0)), None);
        // On the rim is not inside
        assert_eq!(registry.find_at(Vec2::new(150.0, 100.0)), None);
    }

    #[test]
    fn test_bodies_mut_is_live() {
        let mut registry = BodyRegistry::new();
        registry.add(body("a", 0.0, 0.0, 10.0));
        registry.bodies_mut()[0].pos.x = 42.0;
        assert_eq!(registry.get(0).unwrap().pos.x, 42.0);
    }

    #[test]
    fn test_truncate_keeps_head() {
        let mut registry = BodyRegistry::new();
        for id in ["a", "b", "c"] {
            registry.add(body(id, 0.0, 0.0, 10.0));
        }
        registry.truncate(2);
        let ids: Vec<_> = registry.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    proptest! {
        #[test]
        fn prop_find_at_matches_linear_scan(
            circles in prop::collection::vec((0.0f32..500.0, 0.0f32..500.0, 1.0f32..120.0), 0..12),
            px in 0.0f32..500.0,
            py in 0.0f32..500.0,
        ) {
            let mut registry = BodyRegistry::new();
            for (i, (x, y, r)) in circles.iter().enumerate() {
                registry.add(body(&format!("b{i}"), *x, *y, *r));
            }
            let p = Vec2::new(px, py);
            let expected = circles.iter().position(|(x, y, r)| {
                let dx = x - px;
                let dy = y - py;
                dx * dx + dy * dy < r * r
            });
            prop_assert_eq!(registry.find_at(p), expected);
        }
    }
}
