//! Core path tracing integrator.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a hard depth ceiling
//! - Optional per-primitive tinting
//! - Solid or sky-gradient background

use crate::{Color, Hittable, Jitter, Ray, ScanOrder};
use prism_core::{scene::to_vec3, BackgroundDesc, RenderSettings};
use prism_math::Interval;
use rand::RngCore;

/// Smallest accepted hit distance; keeps bounced rays off their own surface.
pub const T_MIN: f32 = 0.001;

/// Color returned for rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Blend from `horizon` (straight down) to `zenith` (straight up)
    Gradient { horizon: Color, zenith: Color },
}

impl Background {
    /// Background seen along `ray`.
    pub fn color(&self, ray: &Ray) -> Color {
        match *self {
            Background::Solid(color) => color,
            Background::Gradient { horizon, zenith } => {
                let unit_direction = ray.direction().normalize();
                let a = 0.5 * (unit_direction.y + 1.0);
                horizon * (1.0 - a) + zenith * a
            }
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::from(&BackgroundDesc::default())
    }
}

impl From<&BackgroundDesc> for Background {
    fn from(desc: &BackgroundDesc) -> Self {
        match *desc {
            BackgroundDesc::Solid { color } => Background::Solid(to_vec3(color)),
            BackgroundDesc::Gradient { horizon, zenith } => Background::Gradient {
                horizon: to_vec3(horizon),
                zenith: to_vec3(zenith),
            },
        }
    }
}

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// What escaping rays see
    pub background: Background,
    /// Multiply each bounce by the hit primitive's color as well as the
    /// material attenuation
    pub tint_by_primitive: bool,
    /// Sub-pixel sample placement
    pub jitter: Jitter,
    /// Order of the emitted point samples
    pub scan_order: ScanOrder,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_depth: 50,
            background: Background::default(),
            tint_by_primitive: false,
            jitter: Jitter::Random,
            scan_order: ScanOrder::RowMajor,
        }
    }
}

impl RenderConfig {
    /// Take quality settings and background from a scene description.
    pub fn from_settings(settings: &RenderSettings, background: &BackgroundDesc) -> Self {
        Self {
            samples_per_pixel: settings.samples_per_pixel,
            max_depth: settings.max_depth,
            background: Background::from(background),
            tint_by_primitive: settings.tint_by_primitive,
            jitter: settings.jitter,
            scan_order: settings.scan_order,
        }
    }
}

/// Compute the color seen by a ray.
///
/// `depth` counts bounces taken so far; camera rays start at 0. A path that
/// reaches `config.max_depth` or is absorbed contributes black, so each call
/// recurses at most `max_depth` more times.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let rec = match world.hit(ray, Interval::new(T_MIN, f32::INFINITY)) {
        Some(rec) => rec,
        None => return config.background.color(ray),
    };

    // Out of bounces: the light is considered fully attenuated
    if depth >= config.max_depth {
        return Color::ZERO;
    }

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => {
            let incoming = ray_color(&result.scattered, world, depth + 1, config, rng);
            let color = incoming * result.attenuation;
            if config.tint_by_primitive {
                color * rec.color
            } else {
                color
            }
        }
        None => Color::ZERO,
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}
