//! Camera for ray generation.
//!
//! Both camera modes reduce to the same thing: an eye point and an image
//! plane spanned by two edge vectors. Screen parameters `(s, t)` in [0, 1]
//! run left to right and bottom to top across that plane.

use crate::Ray;
use prism_core::{scene::to_vec3, CameraDesc};
use prism_math::Vec3;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left_corner: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
}

impl Camera {
    /// Camera at `origin` looking down -Z.
    ///
    /// The image plane sits `focal_length` in front of the eye and spans
    /// `half_width` / `half_height` either side of the eye's x/y.
    pub fn axis_aligned(
        origin: Vec3,
        focal_length: f32,
        half_width: f32,
        half_height: f32,
    ) -> Self {
        let lower_left_corner = origin + Vec3::new(-half_width, -half_height, -focal_length);
        Self {
            origin,
            lower_left_corner,
            horizontal: Vec3::new(2.0 * half_width, 0.0, 0.0),
            vertical: Vec3::new(0.0, 2.0 * half_height, 0.0),
        }
    }

    /// Fully oriented pinhole camera.
    ///
    /// - `vfov`: vertical field of view in degrees
    /// - `aspect_ratio`: image width / height
    pub fn look_at(
        look_from: Vec3,
        look_at: Vec3,
        vup: Vec3,
        vfov: f32,
        aspect_ratio: f32,
    ) -> Self {
        let theta = vfov.to_radians();
        let half_height = (theta / 2.0).tan();
        let half_width = aspect_ratio * half_height;

        // Calculate camera basis vectors
        let w = (look_from - look_at).normalize();
        let u = vup.cross(w).normalize();
        let v = w.cross(u);

        Self {
            origin: look_from,
            lower_left_corner: look_from - half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
        }
    }

    /// Build a camera from a scene description.
    ///
    /// `aspect_ratio` is used when the description doesn't carry its own.
    pub fn from_desc(desc: &CameraDesc, aspect_ratio: f32) -> Self {
        match *desc {
            CameraDesc::AxisAligned {
                origin,
                focal_length,
                half_width,
                half_height,
            } => Self::axis_aligned(to_vec3(origin), focal_length, half_width, half_height),
            CameraDesc::LookAt {
                look_from,
                look_at,
                vup,
                vfov,
                aspect_ratio: own_aspect,
            } => Self::look_at(
                to_vec3(look_from),
                to_vec3(look_at),
                to_vec3(vup),
                vfov,
                own_aspect.unwrap_or(aspect_ratio),
            ),
        }
    }

    /// Generate the ray through screen point (s, t).
    pub fn get_ray(&self, s: f32, t: f32) -> Ray {
        let target = self.lower_left_corner + s * self.horizontal + t * self.vertical;
        Ray::new(self.origin, target - self.origin)
    }
}
