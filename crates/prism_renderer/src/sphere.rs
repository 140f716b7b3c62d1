//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Color, Material, Ray,
};
use prism_math::{Interval, Vec3};

/// A sphere primitive.
///
/// The radius may be negative: the surface is the same, but the normal
/// points inward. Nesting a negative sphere inside a glass one models a
/// hollow glass shell.
#[derive(Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    color: Color,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new untinted sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius,
            color: Color::ONE,
            material,
        }
    }

    /// Set the per-primitive tint carried into hit records.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let b = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        // A tangent ray counts as a miss
        let discriminant = b * b - a * c;
        if discriminant <= 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, normal, self.material.as_ref(), self.color))
    }
}
