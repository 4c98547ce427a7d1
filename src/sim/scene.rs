//! Scene: the single owner of simulation state and its event queue
//!
//! Frame ticks, pointer input, the entropy timer and palette loads all reach
//! the bodies as `SceneEvent`s. The driver pushes events from its callbacks
//! and drains them with `pump` on the same thread, so no two mutators ever
//! interleave.

use std::collections::VecDeque;

use glam::Vec2;

use super::interaction::{Interaction, click_push};
use super::params::PhysicsParams;
use super::registry::BodyRegistry;
use super::spawn::Spawner;
use super::tick::{TickStats, tick};
use crate::color::Rgb;
use crate::consts::*;
use crate::palette::Palette;

/// Everything that can change the scene
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// Advance one animation frame
    Tick,
    /// Viewport size changed (CSS pixels)
    Resize { width: f32, height: f32 },
    /// Settings panel shown/hidden; it takes width away from the scene
    SetPanelOpen(bool),
    /// Periodic velocity jitter
    Entropy,
    PointerDown(Vec2),
    PointerMove(Vec2),
    PointerUp,
    PointerLeave,
    Click(Vec2),
    /// Throw away all blobs and spawn a fresh set
    Regenerate,
    SetBlobCount(usize),
    /// Recolor blobs by index, resizing to the palette length
    ApplyPalette(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Scene {
    registry: BodyRegistry,
    interaction: Interaction,
    spawner: Spawner,
    params: PhysicsParams,
    viewport: Vec2,
    panel_open: bool,
    blob_count: usize,
    queue: VecDeque<SceneEvent>,
    /// Palette applied before there was room to spawn; used by the first real resize
    pending_palette: Option<Vec<Rgb>>,
    ticks: u64,
    last_stats: TickStats,
}

impl Scene {
    pub fn new(seed: u64, params: PhysicsParams) -> Self {
        Self {
            registry: BodyRegistry::new(),
            interaction: Interaction::new(),
            spawner: Spawner::new(seed),
            params,
            viewport: Vec2::ZERO,
            panel_open: false,
            blob_count: DEFAULT_BLOB_COUNT,
            queue: VecDeque::new(),
            pending_palette: None,
            ticks: 0,
            last_stats: TickStats::default(),
        }
    }

    pub fn with_blob_count(mut self, count: usize) -> Self {
        self.blob_count = count.clamp(MIN_BLOB_COUNT, MAX_BLOB_COUNT);
        self
    }

    pub fn registry(&self) -> &BodyRegistry {
        &self.registry
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    pub fn blob_count(&self) -> usize {
        self.blob_count
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn last_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Simulation area: the viewport minus the settings panel
    pub fn area(&self) -> Vec2 {
        let panel = if self.panel_open { SETTINGS_PANEL_WIDTH } else { 0.0 };
        Vec2::new((self.viewport.x - panel).max(0.0), self.viewport.y)
    }

    fn has_area(&self) -> bool {
        let area = self.area();
        area.x > 0.0 && area.y > 0.0
    }

    /// Colors currently shown, in body order
    pub fn palette(&self) -> Palette {
        Palette::from_registry(&self.registry)
    }

    pub fn push(&mut self, event: SceneEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Handle queued events in arrival order. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop_front() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    fn handle(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Tick => {
                if !self.has_area() {
                    return;
                }
                let area = self.area();
                self.interaction.sync_flags(&mut self.registry);
                self.last_stats = tick(&mut self.registry, &self.params, area.x, area.y);
                self.ticks += 1;
            }
            SceneEvent::Resize { width, height } => {
                self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
                if !self.has_area() {
                    return;
                }
                if let Some(colors) = self.pending_palette.take() {
                    self.recolor(&colors);
                } else if self.registry.is_empty() {
                    let area = self.area();
                    self.spawner.populate(&mut self.registry, self.blob_count, area);
                }
            }
            SceneEvent::SetPanelOpen(open) => {
                self.panel_open = open;
            }
            SceneEvent::Entropy => {
                self.spawner.jitter(&mut self.registry, &self.params);
            }
            SceneEvent::PointerDown(p) => {
                self.interaction.pointer_down(&mut self.registry, p);
            }
            SceneEvent::PointerMove(p) => {
                self.interaction.pointer_move(&mut self.registry, p, &self.params);
            }
            SceneEvent::PointerUp | SceneEvent::PointerLeave => {
                self.interaction.pointer_up(&mut self.registry);
            }
            SceneEvent::Click(p) => {
                // The click that ends a drag is not a push
                if self.interaction.is_dragging() || self.interaction.take_release() {
                    return;
                }
                let pushed = click_push(&mut self.registry, &self.params, p);
                log::debug!("Click at ({:.0}, {:.0}) pushed {} blobs", p.x, p.y, pushed);
            }
            SceneEvent::Regenerate => {
                if !self.has_area() {
                    log::debug!("No area yet, regenerate skipped");
                    return;
                }
                self.interaction.cancel(&mut self.registry);
                let area = self.area();
                self.spawner.populate(&mut self.registry, self.blob_count, area);
            }
            SceneEvent::SetBlobCount(count) => {
                self.blob_count = count.clamp(MIN_BLOB_COUNT, MAX_BLOB_COUNT);
                if !self.registry.is_empty() && self.has_area() {
                    self.resize_to(self.blob_count);
                }
            }
            SceneEvent::ApplyPalette(colors) => self.apply_palette(&colors),
        }
    }

    fn resize_to(&mut self, count: usize) {
        if self.interaction.dragged().is_some_and(|i| i >= count) {
            self.interaction.cancel(&mut self.registry);
        }

        let area = self.area();
        if self.registry.is_empty() {
            self.spawner.populate(&mut self.registry, count, area);
        } else {
            self.spawner.resize(&mut self.registry, count, area);
        }
        self.interaction.sync_flags(&mut self.registry);
    }

    fn apply_palette(&mut self, colors: &[String]) {
        let valid: Vec<Rgb> = colors
            .iter()
            .filter_map(|hex| match Rgb::from_hex(hex) {
                Ok(rgb) => Some(rgb),
                Err(e) => {
                    log::warn!("Skipping palette color: {}", e);
                    None
                }
            })
            .take(MAX_BLOB_COUNT)
            .collect();

        if valid.is_empty() {
            log::debug!("Empty palette, nothing to apply");
            return;
        }

        self.blob_count = valid.len();
        if !self.has_area() {
            log::debug!("No area yet, palette of {} colors deferred", valid.len());
            self.pending_palette = Some(valid);
            return;
        }
        self.recolor(&valid);
        log::info!("Applied palette of {} colors", self.blob_count);
    }

    /// Resize to one body per color, then color by index
    fn recolor(&mut self, colors: &[Rgb]) {
        if self.registry.len() != colors.len() {
            self.resize_to(colors.len());
        }
        for (body, rgb) in self.registry.bodies_mut().iter_mut().zip(colors) {
            body.set_rgb(*rgb);
        }
    }
}
