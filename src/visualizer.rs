//! Palette visualizer
//!
//! A few large, slowly drifting blobs whose colors are blended into a soft
//! field. Each pixel is a weighted mean of the blob colors with a falloff
//! that reaches zero at 2.5x the blob radius; pixels outside every blob's
//! reach show the background.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::color::Rgb;

/// Shown where no blob reaches
pub const BACKGROUND: Rgb = Rgb::new(240, 240, 245);
/// Blobs per field
pub const FIELD_BLOBS: usize = 4;
/// Influence radius as a multiple of the blob radius
pub const INFLUENCE_SCALE: f32 = 2.5;
/// Only every SAMPLE_STEP-th pixel is evaluated; the rest copy it
pub const SAMPLE_STEP: usize = 2;
/// Time advanced per update (drives the radius "breathing")
pub const TIME_STEP: f32 = 0.01;

/// Used when no palette is supplied
pub const PRESET_PALETTES: [[Rgb; 4]; 5] = [
    // Pink, light green, peach, plum
    [
        Rgb::new(255, 182, 193),
        Rgb::new(144, 238, 144),
        Rgb::new(255, 218, 185),
        Rgb::new(221, 160, 221),
    ],
    // Red, blue, yellow, teal
    [
        Rgb::new(255, 99, 132),
        Rgb::new(54, 162, 235),
        Rgb::new(255, 205, 86),
        Rgb::new(75, 192, 192),
    ],
    // Orange, purple, pink, blue
    [
        Rgb::new(255, 159, 64),
        Rgb::new(153, 102, 255),
        Rgb::new(255, 99, 132),
        Rgb::new(54, 162, 235),
    ],
    // Gray, red, orange, yellow
    [
        Rgb::new(201, 203, 207),
        Rgb::new(255, 99, 132),
        Rgb::new(255, 159, 64),
        Rgb::new(255, 205, 86),
    ],
    // Teal, purple, orange, red
    [
        Rgb::new(75, 192, 192),
        Rgb::new(153, 102, 255),
        Rgb::new(255, 159, 64),
        Rgb::new(255, 99, 132),
    ],
];

/// RGBA8 pixel, layout-compatible with canvas `ImageData`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl From<Rgb> for Rgba {
    fn from(c: Rgb) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: 255,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldBlob {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub base_radius: f32,
    pub color: Rgb,
}

/// Blend weight at normalized distance `n` (distance / influence radius)
#[inline]
pub fn falloff(n: f32) -> f32 {
    if !(0.0..1.0).contains(&n) {
        return 0.0;
    }
    let smooth = 1.0 - n;
    smooth.powi(6) * (-n * 3.0).exp() * (-(n * 2.0).powi(2)).exp()
}

#[derive(Debug, Clone)]
pub struct Visualizer {
    width: usize,
    height: usize,
    blobs: Vec<FieldBlob>,
    colors: Option<Vec<Rgb>>,
    time: f32,
    rng: Pcg32,
}

impl Visualizer {
    pub fn new(width: usize, height: usize, seed: u64) -> Self {
        let mut vis = Self {
            width,
            height,
            blobs: Vec::new(),
            colors: None,
            time: 0.0,
            rng: Pcg32::seed_from_u64(seed),
        };
        vis.generate();
        vis
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn blobs(&self) -> &[FieldBlob] {
        &self.blobs
    }

    /// Use these colors (cycled) for the next fields; `None` picks presets
    pub fn set_colors(&mut self, colors: Option<Vec<Rgb>>) {
        self.colors = colors.filter(|c| !c.is_empty());
        self.generate();
    }

    /// New canvas size; the field is regenerated to fit
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.generate();
    }

    /// Replace the field with freshly placed blobs
    pub fn generate(&mut self) {
        let palette: Vec<Rgb> = match &self.colors {
            Some(colors) => colors.clone(),
            None => {
                let i = self.rng.random_range(0..PRESET_PALETTES.len());
                PRESET_PALETTES[i].to_vec()
            }
        };

        let w = self.width as f32;
        let h = self.height as f32;
        let min_side = w.min(h);

        self.blobs = (0..FIELD_BLOBS)
            .map(|i| {
                let base_radius = min_side * (0.08 + self.rng.random::<f32>() * 0.15);
                FieldBlob {
                    pos: Vec2::new(self.rng.random::<f32>() * w, self.rng.random::<f32>() * h),
                    vel: Vec2::new(
                        (self.rng.random::<f32>() - 0.5) * 0.5,
                        (self.rng.random::<f32>() - 0.5) * 0.5,
                    ),
                    radius: base_radius,
                    base_radius,
                    color: palette[i % palette.len()],
                }
            })
            .collect();
        log::debug!("Visualizer field regenerated ({}x{})", self.width, self.height);
    }

    /// Drift, bounce inside a half-radius margin, and breathe
    pub fn update(&mut self) {
        self.time += TIME_STEP;
        let w = self.width as f32;
        let h = self.height as f32;

        for (i, blob) in self.blobs.iter_mut().enumerate() {
            blob.pos += blob.vel;

            let padding = blob.radius * 0.5;
            if blob.pos.x < padding || blob.pos.x > w - padding {
                blob.vel.x = -blob.vel.x;
                blob.pos.x = blob.pos.x.min(w - padding).max(padding);
            }
            if blob.pos.y < padding || blob.pos.y > h - padding {
                blob.vel.y = -blob.vel.y;
                blob.pos.y = blob.pos.y.min(h - padding).max(padding);
            }

            blob.radius =
                blob.base_radius + (self.time + i as f32 * 2.0).sin() * blob.base_radius * 0.2;
        }
    }

    /// Blended color at a pixel
    pub fn color_at(&self, x: f32, y: f32) -> Rgb {
        let p = Vec2::new(x, y);
        let mut total = 0.0;
        let mut sum = [0.0f32; 3];

        for blob in &self.blobs {
            let influence = blob.radius * INFLUENCE_SCALE;
            let weight = falloff(p.distance(blob.pos) / influence);
            total += weight;
            sum[0] += blob.color.r as f32 * weight;
            sum[1] += blob.color.g as f32 * weight;
            sum[2] += blob.color.b as f32 * weight;
        }

        if total <= 0.0 {
            return BACKGROUND;
        }
        let channel = |v: f32| (v / total).round().clamp(0.0, 255.0) as u8;
        Rgb::new(channel(sum[0]), channel(sum[1]), channel(sum[2]))
    }

    /// Paint the field into `pixels` (resized to width * height, row-major)
    pub fn render(&self, pixels: &mut Vec<Rgba>) {
        let (w, h) = (self.width, self.height);
        pixels.resize(w * h, Rgba::default());

        for y in (0..h).step_by(SAMPLE_STEP) {
            for x in (0..w).step_by(SAMPLE_STEP) {
                let color = Rgba::from(self.color_at(x as f32, y as f32));
                for yy in y..(y + SAMPLE_STEP).min(h) {
                    let row = yy * w;
                    pixels[row + x..row + (x + SAMPLE_STEP).min(w)].fill(color);
                }
            }
        }
    }
}

/// View a pixel buffer as raw RGBA bytes
pub fn as_bytes(pixels: &[Rgba]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}
