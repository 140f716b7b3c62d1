//! Prism Renderer - CPU Path Tracing
//!
//! A recursive Monte Carlo path tracer over spheres with diffuse, metal and
//! glass materials. Rendering is single-threaded; every random draw comes
//! from a caller-supplied generator, so a seeded generator reproduces a
//! frame exactly.

mod camera;
mod hittable;
mod material;
mod renderer;
mod sampler;
mod scene;
mod sphere;

pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use material::{
    material_from_desc, random_in_unit_sphere, Color, Dielectric, Lambertian, Material, Metal,
    ScatterResult,
};
pub use renderer::{linear_to_gamma, ray_color, Background, RenderConfig, T_MIN};
pub use sampler::{render, render_pixel, to_rgba8, Frame, ImageBuffer, PointSample};
pub use scene::Scene;
pub use sphere::Sphere;

pub use prism_core::{Jitter, ScanOrder};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{reflect, Interval, Ray, Vec3};

use rand::{Rng, RngCore};

/// Draw a uniform `f32` in [0, 1).
#[inline]
pub(crate) fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen::<f32>()
}
