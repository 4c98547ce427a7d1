//! Pointer interaction: drag, fling, click-push
//!
//! Single pointer. `DragState` is the only record of which body is held; the
//! `Body::dragging` flag is rewritten from it so the physics loop can read it
//! without knowing about pointers.

use glam::Vec2;

use super::params::PhysicsParams;
use super::registry::BodyRegistry;

/// An active grab
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    /// Registry index of the held body
    pub body: usize,
    /// Pointer minus body center at grab time
    pub offset: Vec2,
    pub last_pointer: Vec2,
    /// Fling velocity handed to the body on release
    pub velocity: Vec2,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(Drag),
}

#[derive(Debug, Clone, Default)]
pub struct Interaction {
    state: DragState,
    /// Set when a drag ends so the click the browser fires right after
    /// mouseup is not treated as a push
    released: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dragged(&self) -> Option<usize> {
        match self.state {
            DragState::Dragging(drag) => Some(drag.body),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged().is_some()
    }

    /// Rewrite every body's `dragging` flag from the drag state
    pub fn sync_flags(&self, registry: &mut BodyRegistry) {
        let held = self.dragged();
        for (i, body) in registry.bodies_mut().iter_mut().enumerate() {
            body.dragging = held == Some(i);
        }
    }

    /// Grab the body under the pointer. Returns true if a drag started.
    pub fn pointer_down(&mut self, registry: &mut BodyRegistry, pointer: Vec2) -> bool {
        self.released = false;
        if self.is_dragging() {
            return false;
        }

        let Some(index) = registry.find_at(pointer) else {
            return false;
        };
        let Some(body) = registry.get(index) else {
            return false;
        };

        let offset = pointer - body.pos;
        log::debug!("Grabbed {} at ({:.0}, {:.0})", body.id, pointer.x, pointer.y);

        self.state = DragState::Dragging(Drag {
            body: index,
            offset,
            last_pointer: pointer,
            velocity: Vec2::ZERO,
        });
        self.sync_flags(registry);
        true
    }

    /// Move the held body with the pointer. The body may leave the viewport
    /// sideways or downward but never above the top edge.
    pub fn pointer_move(&mut self, registry: &mut BodyRegistry, pointer: Vec2, params: &PhysicsParams) {
        let DragState::Dragging(drag) = &mut self.state else {
            return;
        };
        let Some(body) = registry.get_mut(drag.body) else {
            return;
        };

        let target = pointer - drag.offset;
        body.pos = Vec2::new(target.x, target.y.max(body.radius));

        drag.velocity = (pointer - drag.last_pointer) * params.drag_velocity_scale;
        drag.last_pointer = pointer;
    }

    /// Let go (pointer up or pointer leaving the scene). Returns the fling
    /// velocity added to the body, if one was held.
    pub fn pointer_up(&mut self, registry: &mut BodyRegistry) -> Option<Vec2> {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return None;
        };
        self.released = true;
        self.sync_flags(registry);

        let body = registry.get_mut(drag.body)?;
        body.vel += drag.velocity;
        log::debug!("Released {} with fling {:?}", body.id, drag.velocity);
        Some(drag.velocity)
    }

    /// Drop any drag without handing over momentum (the registry is about
    /// to be replaced)
    pub fn cancel(&mut self, registry: &mut BodyRegistry) {
        self.state = DragState::Idle;
        self.released = false;
        self.sync_flags(registry);
    }

    /// Consume the "drag just ended" marker
    pub fn take_release(&mut self) -> bool {
        std::mem::take(&mut self.released)
    }
}

/// One-shot outward kick to every body within `push_radius` of `point`.
/// Returns how many bodies were pushed.
pub fn click_push(registry: &mut BodyRegistry, params: &PhysicsParams, point: Vec2) -> usize {
    let reach_sq = params.push_radius * params.push_radius;
    let mut pushed = 0;

    for body in registry.bodies_mut() {
        let delta = body.pos - point;
        let dist_sq = delta.length_squared();
        if dist_sq >= reach_sq || dist_sq == 0.0 {
            continue;
        }

        let dist = dist_sq.sqrt();
        let force = (params.push_radius - dist) / params.push_radius * params.push_force;
        body.vel += delta / dist * force;
        pushed += 1;
    }

    pushed
}
