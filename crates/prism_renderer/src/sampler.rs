//! Pixel sampling and frame output.
//!
//! Each pixel is resolved completely (all samples, all bounces) before the
//! next one starts. Finished pixels are emitted as [`PointSample`]s in the
//! configured scan order, ready to be uploaded as a point-list vertex buffer.

use std::f32::consts::TAU;
use std::time::Instant;

use crate::{
    gen_f32, linear_to_gamma, ray_color, Camera, Color, Hittable, Jitter, RenderConfig, ScanOrder,
};
use bytemuck::{Pod, Zeroable};
use prism_math::Interval;
use rand::RngCore;

/// One finished pixel for the display surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointSample {
    /// Pixel center in normalized device coordinates, [-1, 1] on both axes
    /// with +y up
    pub position: [f32; 2],
    /// Gamma-corrected color, each component in [0, 1]
    pub color: [f32; 3],
}

/// Sub-pixel offset of sample `index` out of `count`, in pixels from the
/// pixel center.
fn jitter_offset(jitter: Jitter, index: u32, count: u32, rng: &mut dyn RngCore) -> (f32, f32) {
    match jitter {
        Jitter::Random => (gen_f32(rng) - 0.5, gen_f32(rng) - 0.5),
        Jitter::Circular => {
            let angle = TAU * index as f32 / count as f32;
            (0.5 * angle.sin(), 0.5 * angle.cos())
        }
    }
}

/// Render a single pixel with multi-sampling.
///
/// `(i, j)` is the pixel column and row, with `j = 0` the bottom row.
/// Returns the averaged linear color, before gamma correction.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for sample in 0..config.samples_per_pixel {
        let (dx, dy) = jitter_offset(config.jitter, sample, config.samples_per_pixel, rng);
        let s = (i as f32 + 0.5 + dx) / width as f32;
        let t = (j as f32 + 0.5 + dy) / height as f32;
        let ray = camera.get_ray(s, t);
        pixel_color += ray_color(&ray, world, 0, config, rng);
    }

    // Average the samples
    pixel_color / config.samples_per_pixel as f32
}

/// Gamma-correct and clamp a linear color for display.
fn display_color(linear: Color) -> [f32; 3] {
    [
        Interval::UNIT.clamp(linear_to_gamma(linear.x)),
        Interval::UNIT.clamp(linear_to_gamma(linear.y)),
        Interval::UNIT.clamp(linear_to_gamma(linear.z)),
    ]
}

/// Place pixel `(i, j)` in NDC and convert its color for display.
fn point_sample(i: u32, j: u32, width: u32, height: u32, linear: Color) -> PointSample {
    PointSample {
        position: [
            2.0 * (i as f32 + 0.5) / width as f32 - 1.0,
            2.0 * (j as f32 + 0.5) / height as f32 - 1.0,
        ],
        color: display_color(linear),
    }
}

/// A rendered frame: display-ready samples in scan order.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub scan_order: ScanOrder,
    pub points: Vec<PointSample>,
}

impl Frame {
    /// Index into `points` of the pixel at column `x`, row `y` (0 = top).
    fn index(&self, x: u32, y: u32) -> usize {
        match self.scan_order {
            ScanOrder::RowMajor => (y * self.width + x) as usize,
            ScanOrder::ColumnMajor => (x * self.height + (self.height - 1 - y)) as usize,
        }
    }

    /// Get the display color at column `x`, row `y` (0 = top).
    pub fn get(&self, x: u32, y: u32) -> Color {
        Color::from_array(self.points[self.index(x, y)].color)
    }

    /// Raw bytes of the point buffer, for direct upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.points)
    }

    /// Rearrange into a row-major image, top row first.
    pub fn to_image(&self) -> ImageBuffer {
        let mut image = ImageBuffer::new(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                image.set(x, y, self.get(x, y));
            }
        }
        image
    }
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&to_rgba8(*color));
        }
        bytes
    }
}

/// Convert a display color in [0, 1] to 8-bit RGBA.
pub fn to_rgba8(color: Color) -> [u8; 4] {
    let r = (255.0 * Interval::UNIT.clamp(color.x)).round() as u8;
    let g = (255.0 * Interval::UNIT.clamp(color.y)).round() as u8;
    let b = (255.0 * Interval::UNIT.clamp(color.z)).round() as u8;
    [r, g, b, 255]
}

/// Render the entire scene.
///
/// Single-threaded; with a seeded `rng` the result is reproducible.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    width: u32,
    height: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Frame {
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        width,
        height,
        config.samples_per_pixel,
        config.max_depth
    );
    let start = Instant::now();

    let mut points = Vec::with_capacity((width * height) as usize);
    match config.scan_order {
        ScanOrder::RowMajor => {
            for j in (0..height).rev() {
                for i in 0..width {
                    let color = render_pixel(camera, world, i, j, width, height, config, rng);
                    points.push(point_sample(i, j, width, height, color));
                }
                log::debug!("Finished row {}", height - 1 - j);
            }
        }
        ScanOrder::ColumnMajor => {
            for i in 0..width {
                for j in 0..height {
                    let color = render_pixel(camera, world, i, j, width, height, config, rng);
                    points.push(point_sample(i, j, width, height, color));
                }
                log::debug!("Finished column {}", i);
            }
        }
    }

    log::info!("Rendered in {:?}", start.elapsed());

    Frame {
        width,
        height,
        scan_order: config.scan_order,
        points,
    }
}
