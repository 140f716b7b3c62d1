//! Material trait for surface scattering.

use std::sync::Arc;

use crate::{gen_f32, hittable::HitRecord, Ray};
use prism_core::MaterialDesc;
use prism_math::{reflect, Vec3};
use rand::RngCore;

/// Color type alias (RGB values typically 0-1)
pub type Color = Vec3;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel energy kept by this bounce
    pub attenuation: Color,
    /// The continuation ray, starting at the hit point
    pub scattered: Ray,
}

/// Trait for materials that describe how light interacts with surfaces.
///
/// Materials hold only their construction parameters, so one instance can be
/// shared by any number of primitives and threads.
pub trait Material: Send + Sync {
    /// Scatter an incoming ray.
    ///
    /// Returns `None` if the ray is absorbed.
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore)
        -> Option<ScatterResult>;
}

/// Build the runtime material for a scene description entry.
pub fn material_from_desc(desc: &MaterialDesc) -> Arc<dyn Material> {
    match *desc {
        MaterialDesc::Lambertian { albedo } => {
            Arc::new(Lambertian::new(Vec3::from_array(albedo)))
        }
        MaterialDesc::Metal { albedo, fuzz } => {
            Arc::new(Metal::new(Vec3::from_array(albedo), fuzz))
        }
        MaterialDesc::Dielectric { refractive_index } => {
            Arc::new(Dielectric::new(refractive_index))
        }
    }
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }
}

impl Material for Lambertian {
    fn scatter(
        &self,
        _ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_in_unit_sphere(rng);

        // Catch degenerate scatter direction
        if scatter_direction.length_squared() < 1e-8 {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        if !(0.0..=1.0).contains(&fuzz) {
            log::warn!("Metal fuzz {} outside [0, 1], clamping", fuzz);
        }
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }
}

impl Material for Metal {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzzed below the surface: absorbed
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    /// Schlick's approximation for reflectance
    fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Material for Dielectric {
    fn scatter(
        &self,
        ray_in: &Ray,
        rec: &HitRecord,
        rng: &mut dyn RngCore,
    ) -> Option<ScatterResult> {
        let unit_direction = ray_in.direction().normalize();

        // Orient the normal against the ray and pick the index ratio
        let (outward_normal, refraction_ratio) = if rec.front_face {
            (rec.normal, 1.0 / self.ior)
        } else {
            (-rec.normal, self.ior)
        };

        let cos_theta = (-unit_direction).dot(outward_normal).min(1.0);
        let discriminant =
            1.0 - refraction_ratio * refraction_ratio * (1.0 - cos_theta * cos_theta);

        let direction = if discriminant <= 0.0 {
            // Total internal reflection
            reflect(unit_direction, outward_normal)
        } else {
            // Schlick wants the angle on the air side of the interface
            let cosine = if rec.front_face {
                cos_theta
            } else {
                discriminant.sqrt()
            };
            if gen_f32(rng) < Self::reflectance(cosine, self.ior) {
                reflect(unit_direction, outward_normal)
            } else {
                refraction_ratio * (unit_direction + cos_theta * outward_normal)
                    - discriminant.sqrt() * outward_normal
            }
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Generate a random point strictly inside the unit sphere.
///
/// Rejection-samples the [-1, 1] cube; about half the draws are kept.
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
            gen_f32(rng) * 2.0 - 1.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Hittable, Sphere};
    use prism_math::Interval;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn record<'a>(material: &'a dyn Material, ray: &Ray, normal: Vec3) -> HitRecord<'a> {
        HitRecord::new(ray, 1.0, normal, material, Color::ONE)
    }

    #[test]
    fn test_random_in_unit_sphere() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length() < 1.0);
        }
    }

    #[test]
    fn test_lambertian_always_scatters() {
        let material = Lambertian::new(Color::new(0.2, 0.4, 0.6));
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::new(0.2, 0.4, 0.6));
            assert_eq!(result.scattered.origin(), rec.p);
            // normal + point inside unit sphere stays in the upper hemisphere
            assert!(result.scattered.direction().dot(rec.normal) >= 0.0);
        }
    }

    #[test]
    fn test_perfect_mirror() {
        let material = Metal::new(Color::splat(0.9), 0.0);
        let ray = Ray::new(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(42);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert!((result.scattered.direction() - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
        assert_eq!(result.attenuation, Color::splat(0.9));
    }

    #[test]
    fn test_fuzz_scales_with_ray_length() {
        let material = Metal::new(Color::ONE, 1.0);
        // Reflection is (10, 1, 0); a fuzz offset shorter than 1 can't push it under
        let ray = Ray::new(Vec3::new(-10.0, 1.0, 0.0), Vec3::new(10.0, -1.0, 0.0));
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(8);

        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert!(result.scattered.direction().y > 0.0);
        }
    }

    #[test]
    fn test_fuzzy_metal_absorbs_below_surface() {
        let material = Metal::new(Color::ONE, 1.0);
        // Grazing incidence: the mirror direction barely clears the surface
        let ray = Ray::new(Vec3::new(-1.0, 0.01, 0.0), Vec3::new(1.0, -0.01, 0.0));
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(3);

        let mut absorbed = 0;
        for _ in 0..500 {
            match material.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_clamps_fuzz() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz, 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz, 0.0);
    }

    #[test]
    fn test_attenuation_within_unit_range() {
        let materials: Vec<Arc<dyn Material>> = vec![
            Arc::new(Lambertian::new(Color::new(0.1, 0.5, 1.0))),
            Arc::new(Metal::new(Color::new(1.0, 0.8, 0.0), 0.3)),
            Arc::new(Dielectric::new(1.5)),
        ];
        let mut rng = StdRng::seed_from_u64(11);

        for material in &materials {
            let ray = Ray::new(Vec3::new(0.3, 1.0, 0.2), Vec3::new(-0.3, -1.0, -0.2));
            let rec = record(material.as_ref(), &ray, Vec3::Y);
            for _ in 0..100 {
                if let Some(result) = material.scatter(&ray, &rec, &mut rng) {
                    let a = result.attenuation;
                    assert!(a.min_element() >= 0.0 && a.max_element() <= 1.0);
                }
            }
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let material = Dielectric::new(1.5);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, -1.0, 0.0));
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(5);

        let mut refracted = 0;
        for _ in 0..1000 {
            let result = material.scatter(&ray, &rec, &mut rng).unwrap();
            assert_eq!(result.attenuation, Color::ONE);
            let dir = result.scattered.direction();
            if dir.y < 0.0 {
                // Normal incidence passes straight through
                assert!((dir - Vec3::NEG_Y).length() < 1e-5);
                refracted += 1;
            } else {
                assert!((dir - Vec3::Y).length() < 1e-5);
            }
        }
        // r0 = 0.04 for glass
        assert!(refracted > 900);
    }

    #[test]
    fn test_dielectric_bends_toward_normal() {
        let material = Dielectric::new(1.5);
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), incoming);
        let rec = record(&material, &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(9);

        for _ in 0..200 {
            let dir = material
                .scatter(&ray, &rec, &mut rng)
                .unwrap()
                .scattered
                .direction();
            if dir.y < 0.0 {
                // Snell: sin(t) = sin(45deg) / 1.5
                let sin_t = dir.x / dir.length();
                assert!((sin_t - (0.5f32.sqrt() / 1.5)).abs() < 1e-4);
            }
        }
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
        let sphere = Sphere::new(Vec3::ZERO, 1.0, glass.clone());

        // From inside the ball, hitting the wall at sin(theta) = 0.9 > 1 / 1.5
        let ray = Ray::new(Vec3::new(0.0, 0.9, 0.0), Vec3::X);
        let rec = sphere
            .hit(&ray, Interval::new(0.001, f32::INFINITY))
            .unwrap();
        assert!(!rec.front_face);

        let expected = reflect(Vec3::X, rec.normal);
        for seed in 0..100 {
            let mut rng = StdRng::seed_from_u64(seed);
            let result = glass.scatter(&ray, &rec, &mut rng).unwrap();
            let dir = result.scattered.direction();
            assert!((dir - expected).length() < 1e-5);
            // Reflected back into the ball
            assert!(dir.dot(rec.normal) < 0.0);
        }
    }

    #[test]
    fn test_schlick() {
        let r0 = Dielectric::reflectance(1.0, 1.5);
        assert!((r0 - 0.04).abs() < 1e-6);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_material_from_desc() {
        let desc = MaterialDesc::Metal {
            albedo: [0.7, 0.6, 0.5],
            fuzz: 0.0,
        };
        let material = material_from_desc(&desc);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let rec = record(material.as_ref(), &ray, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);

        let result = material.scatter(&ray, &rec, &mut rng).unwrap();
        assert_eq!(result.attenuation, Color::new(0.7, 0.6, 0.5));
    }
}
