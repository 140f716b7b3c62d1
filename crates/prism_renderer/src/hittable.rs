//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Color, Material, Ray};
use prism_math::{Interval, Vec3};

/// Record of a ray-object intersection.
#[derive(Clone, Copy)]
pub struct HitRecord<'a> {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal as defined by the primitive.
    ///
    /// This is not flipped to face the ray; materials that care about
    /// orientation use `front_face`.
    pub normal: Vec3,
    /// Whether the ray arrived against the normal (`direction · normal <= 0`)
    pub front_face: bool,
    /// Material at the intersection point
    pub material: &'a dyn Material,
    /// Per-primitive tint, independent of the material's albedo
    pub color: Color,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the primitive's normal at the hit point.
    pub fn new(
        ray: &Ray,
        t: f32,
        normal: Vec3,
        material: &'a dyn Material,
        color: Color,
    ) -> Self {
        Self {
            t,
            p: ray.at(t),
            normal,
            front_face: ray.direction().dot(normal) <= 0.0,
            material,
            color,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Find the nearest intersection with `ray_t.min < t < ray_t.max`.
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>>;
}
