//! Circle-circle collision detection and impulse response
//!
//! Single pass over every pair (i < j) in registry order. A pair is fixed at
//! most once per tick; overlaps created by an earlier pair are left for the
//! next tick, so dense clusters spread out over several frames.

use glam::Vec2;

use super::body::Body;

/// Separate and bounce one pair. Returns `None` if they don't overlap or
/// their centers coincide (no usable normal).
pub fn resolve_pair(a: &mut Body, b: &mut Body, restitution: f32) -> Option<(Vec2, f32, f32)> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let min_dist = a.radius + b.radius;

    if !(dist > 0.0 && dist < min_dist) {
        return None;
    }

    let penetration = min_dist - dist;
    let normal = delta / dist;
    let sep = penetration * 0.5;

    // A dragged body holds its ground; the other still gets only its half
    if !a.dragging {
        a.pos -= normal * sep;
    }
    if !b.dragging {
        b.pos += normal * sep;
    }

    let rel_vel = (b.vel - a.vel).dot(normal);
    if rel_vel > 0.0 {
        return Some((normal, penetration, 0.0));
    }

    let impulse = -(1.0 + restitution) * rel_vel / (a.inv_mass() + b.inv_mass());
    let j = normal * impulse;

    if !a.dragging {
        a.vel -= j * a.inv_mass();
    }
    if !b.dragging {
        b.vel += j * b.inv_mass();
    }

    Some((normal, penetration, impulse))
}

/// Run the pair pass over `bodies`. Returns how many pairs overlapped.
pub fn resolve_collisions(bodies: &mut [Body], restitution: f32) -> usize {
    let mut contacts = 0;
    let n = bodies.len();

    for i in 0..n {
        for j in (i + 1)..n {
            let (head, tail) = bodies.split_at_mut(j);
            if resolve_pair(&mut head[i], &mut tail[0], restitution).is_some() {
                contacts += 1;
            }
        }
    }

    contacts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f32, y: f32, vx: f32, vy: f32, r: f32) -> Body {
        Body::new("b", Vec2::new(x, y), Vec2::new(vx, vy), r)
    }

    #[test]
    fn test_disjoint_pair_untouched() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 10.0);
        let mut b = body(30.0, 0.0, -1.0, 0.0, 10.0);
        assert!(resolve_pair(&mut a, &mut b, 0.8).is_none());
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_touching_is_not_overlap() {
        let mut a = body(0.0, 0.0, 1.0, 0.0, 10.0);
        let mut b = body(20.0, 0.0, -1.0, 0.0, 10.0);
        assert!(resolve_pair(&mut a, &mut b, 0.8).is_none());
    }

    #[test]
    fn test_coincident_centers_skipped() {
        let mut a = body(5.0, 5.0, 1.0, 0.0, 10.0);
        let mut b = body(5.0, 5.0, -1.0, 0.0, 10.0);
        assert!(resolve_pair(&mut a, &mut b, 0.8).is_none());
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.vel, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_head_on_equal_mass_restitution() {
        let mut a = body(0.0, 0.0, 3.0, 0.0, 10.0);
        let mut b = body(18.0, 0.0, -3.0, 0.0, 10.0);
        let before = (b.vel - a.vel).x;

        let (normal, penetration, impulse) = resolve_pair(&mut a, &mut b, 0.8).unwrap();
        assert_eq!(normal, Vec2::X);
        assert!((penetration - 2.0).abs() < 1e-5);
        assert!(impulse > 0.0);

        let after = (b.vel - a.vel).x;
        assert!((after + 0.8 * before).abs() < 1e-4, "after={after} before={before}");
        // Equal masses: momentum stays zero
        assert!((a.vel.x + b.vel.x).abs() < 1e-5);
        // Each side moved half the overlap
        assert!((a.pos.x + 1.0).abs() < 1e-5);
        assert!((b.pos.x - 19.0).abs() < 1e-5);
    }

    #[test]
    fn test_separating_pair_keeps_velocity() {
        let mut a = body(0.0, 0.0, -2.0, 0.0, 10.0);
        let mut b = body(15.0, 0.0, 2.0, 1.0, 10.0);

        let (_, _, impulse) = resolve_pair(&mut a, &mut b, 0.8).unwrap();
        assert_eq!(impulse, 0.0);
        assert_eq!(a.vel, Vec2::new(-2.0, 0.0));
        assert_eq!(b.vel, Vec2::new(2.0, 1.0));
        // Positional correction still applies
        assert!((a.pos.x + 2.5).abs() < 1e-5);
        assert!((b.pos.x - 17.5).abs() < 1e-5);
    }

    #[test]
    fn test_dragged_body_is_pinned() {
        let mut a = body(0.0, 0.0, 0.0, 0.0, 10.0);
        a.dragging = true;
        let mut b = body(16.0, 0.0, -1.0, 0.0, 10.0);

        resolve_pair(&mut a, &mut b, 0.8).unwrap();
        assert_eq!(a.pos, Vec2::ZERO);
        assert_eq!(a.vel, Vec2::ZERO);
        // b only receives its own half of the overlap
        assert!((b.pos.x - 18.0).abs() < 1e-5);
        // The impulse still uses a's finite mass: -1 + 1.8 * 1 / (2 / 0.8) / 0.8
        assert!((b.vel.x - (-0.1)).abs() < 1e-5, "b.vel.x={}", b.vel.x);
    }

    #[test]
    fn test_light_body_bounces_off_dragged_one() {
        let mut a = body(0.0, 0.0, 0.0, 0.0, 10.0);
        a.dragging = true;
        let mut b = body(11.0, 0.0, -4.0, 0.0, 2.0);

        resolve_pair(&mut a, &mut b, 0.8).unwrap();
        assert_eq!(a.vel, Vec2::ZERO);
        // impulse 1.8 * 4 / (1 / 0.8 + 1 / 0.16) = 0.96, so b gains 6
        assert!((b.vel.x - 2.0).abs() < 1e-4, "b.vel.x={}", b.vel.x);
    }

    #[test]
    fn test_heavier_body_moves_less() {
        let mut a = body(0.0, 0.0, 2.0, 0.0, 40.0);
        let mut b = body(50.0, 0.0, -2.0, 0.0, 20.0);
        resolve_pair(&mut a, &mut b, 0.8).unwrap();
        let dv_a = (a.vel.x - 2.0).abs();
        let dv_b = (b.vel.x + 2.0).abs();
        assert!(dv_a < dv_b);
        // Momentum is conserved
        let p = a.mass * a.vel.x + b.mass * b.vel.x;
        let p0 = a.mass * 2.0 - b.mass * 2.0;
        assert!((p - p0).abs() < 1e-4);
    }

    #[test]
    fn test_pass_counts_overlapping_pairs() {
        let mut bodies = vec![
            body(0.0, 0.0, 0.0, 0.0, 10.0),
            body(15.0, 0.0, 0.0, 0.0, 10.0),
            body(200.0, 0.0, 0.0, 0.0, 10.0),
            body(215.0, 0.0, 0.0, 0.0, 10.0),
            body(500.0, 0.0, 0.0, 0.0, 10.0),
        ];
        assert_eq!(resolve_collisions(&mut bodies, 0.8), 2);
        assert!((bodies[0].pos.x + 2.5).abs() < 1e-5);
        assert!((bodies[3].pos.x - 217.5).abs() < 1e-5);
        assert_eq!(bodies[4].pos.x, 500.0);
    }
}
