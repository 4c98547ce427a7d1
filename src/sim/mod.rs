//! Deterministic blob simulation
//!
//! All physics lives here. This module must stay pure and deterministic:
//! - One step per `tick`, no wall-clock time
//! - Seeded RNG only (spawning and entropy)
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod deform;
pub mod integrator;
pub mod interaction;
pub mod params;
pub mod registry;
pub mod scene;
pub mod spawn;
pub mod tick;

pub use body::Body;
pub use collision::{resolve_collisions, resolve_pair};
pub use deform::relax;
pub use integrator::integrate;
pub use interaction::{Drag, DragState, Interaction, click_push};
pub use params::PhysicsParams;
pub use registry::BodyRegistry;
pub use scene::{Scene, SceneEvent};
pub use spawn::Spawner;
pub use tick::{TickStats, tick};
