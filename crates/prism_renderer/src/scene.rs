//! The renderable scene: an ordered list of primitives.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{material_from_desc, Hittable, HitRecord, Material, Ray, Sphere};
use prism_core::{scene::to_vec3, SceneDesc, SceneError, SceneResult};
use prism_math::Interval;

/// A list of hittable objects, searched front to back without acceleration.
pub struct Scene {
    objects: Vec<Box<dyn Hittable>>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Build a scene from a validated description.
    ///
    /// Each named material is instantiated once and shared by every sphere
    /// that refers to it.
    pub fn from_desc(desc: &SceneDesc) -> SceneResult<Self> {
        desc.validate()?;

        let materials: BTreeMap<&str, Arc<dyn Material>> = desc
            .materials
            .iter()
            .map(|(name, material)| (name.as_str(), material_from_desc(material)))
            .collect();

        let mut scene = Scene::new();
        for (index, sphere) in desc.primitives.iter().enumerate() {
            let material = materials
                .get(sphere.material.as_str())
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                })?;
            scene.add(Box::new(
                Sphere::new(to_vec3(sphere.center), sphere.radius, material)
                    .with_color(to_vec3(sphere.color)),
            ));
        }

        log::info!(
            "Built scene '{}': {} primitives, {} shared materials",
            desc.name,
            scene.len(),
            materials.len()
        );

        Ok(scene)
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for Scene {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let mut closest: Option<HitRecord<'a>> = None;

        for object in &self.objects {
            // Nothing past the closest hit so far can win
            let interval = ray_t.with_max(closest.map_or(ray_t.max, |rec| rec.t));
            if let Some(rec) = object.hit(ray, interval) {
                closest = Some(rec);
            }
        }

        closest
    }
}
