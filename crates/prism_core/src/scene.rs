//! Scene description types for Prism.
//!
//! A `SceneDesc` is the renderer-agnostic input to a render: an ordered list
//! of spheres, a table of named materials the spheres share, a camera, a
//! background and the render settings. Everything here is plain data that
//! round-trips through serde; the renderer turns it into live objects.

use std::collections::BTreeMap;

use prism_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Primitive {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Primitive {index} has invalid radius {radius}")]
    InvalidRadius { index: usize, radius: f32 },

    #[error("Material '{name}' has albedo outside [0, 1]: {albedo:?}")]
    InvalidAlbedo { name: String, albedo: [f32; 3] },

    #[error("Primitive {index} has tint outside [0, 1]: {color:?}")]
    InvalidColor { index: usize, color: [f32; 3] },

    #[error("Material '{name}' has fuzz outside [0, 1]: {fuzz}")]
    InvalidFuzz { name: String, fuzz: f32 },

    #[error("Material '{name}' has invalid refractive index {index}")]
    InvalidRefractiveIndex { name: String, index: f32 },

    #[error("Invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Samples per pixel must be at least 1")]
    InvalidSamples,

    #[error("Invalid camera: {0}")]
    InvalidCamera(String),

    #[error("Unknown built-in scene '{0}'")]
    UnknownBuiltin(String),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Convert a serialized RGB/XYZ triple into a vector.
#[inline]
pub fn to_vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}

/// A surface material.
///
/// Materials live in the scene's material table and are referenced by name,
/// so any number of spheres can share one instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Ideal diffuse reflector.
    Lambertian { albedo: [f32; 3] },

    /// Specular reflector; `fuzz` = 0 is a perfect mirror, 1 is very rough.
    Metal {
        albedo: [f32; 3],
        #[serde(default)]
        fuzz: f32,
    },

    /// Clear refractive material (1.0 = air, 1.5 = glass, 2.4 = diamond).
    Dielectric { refractive_index: f32 },
}

impl MaterialDesc {
    fn validate(&self, name: &str) -> SceneResult<()> {
        match *self {
            MaterialDesc::Lambertian { albedo } => validate_albedo(name, albedo),
            MaterialDesc::Metal { albedo, fuzz } => {
                validate_albedo(name, albedo)?;
                if !(0.0..=1.0).contains(&fuzz) {
                    return Err(SceneError::InvalidFuzz {
                        name: name.to_string(),
                        fuzz,
                    });
                }
                Ok(())
            }
            MaterialDesc::Dielectric { refractive_index } => {
                if !refractive_index.is_finite() || refractive_index <= 0.0 {
                    return Err(SceneError::InvalidRefractiveIndex {
                        name: name.to_string(),
                        index: refractive_index,
                    });
                }
                Ok(())
            }
        }
    }
}

fn in_unit_range(rgb: [f32; 3]) -> bool {
    rgb.iter().all(|c| (0.0..=1.0).contains(c))
}

fn validate_albedo(name: &str, albedo: [f32; 3]) -> SceneResult<()> {
    if in_unit_range(albedo) {
        Ok(())
    } else {
        Err(SceneError::InvalidAlbedo {
            name: name.to_string(),
            albedo,
        })
    }
}

/// A sphere primitive.
///
/// A negative radius flips the surface normal inward, which turns the sphere
/// into the inner wall of a hollow shell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: [f32; 3],
    pub radius: f32,
    /// Per-primitive tint, applied on top of the material when the render
    /// settings ask for it.
    #[serde(default = "white")]
    pub color: [f32; 3],
    /// Name of an entry in `SceneDesc::materials`
    pub material: String,
}

impl SphereDesc {
    /// Create a new sphere description with a white tint.
    pub fn new(center: [f32; 3], radius: f32, material: impl Into<String>) -> Self {
        Self {
            center,
            radius,
            color: white(),
            material: material.into(),
        }
    }

    /// Set the per-primitive tint.
    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// How rays are generated from screen coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraDesc {
    /// Eye at `origin` looking down -Z through a plane `focal_length` away.
    AxisAligned {
        origin: [f32; 3],
        focal_length: f32,
        half_width: f32,
        half_height: f32,
    },

    /// Fully oriented pinhole camera.
    LookAt {
        look_from: [f32; 3],
        look_at: [f32; 3],
        #[serde(default = "up")]
        vup: [f32; 3],
        /// Vertical field of view in degrees
        vfov: f32,
        /// Defaults to the render width / height
        #[serde(default)]
        aspect_ratio: Option<f32>,
    },
}

fn up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

impl CameraDesc {
    fn validate(&self) -> SceneResult<()> {
        match *self {
            CameraDesc::AxisAligned {
                focal_length,
                half_width,
                half_height,
                ..
            } => {
                if !(focal_length > 0.0 && half_width > 0.0 && half_height > 0.0) {
                    return Err(SceneError::InvalidCamera(format!(
                        "axis-aligned camera needs positive extents, \
                         got focal_length={} half_width={} half_height={}",
                        focal_length, half_width, half_height
                    )));
                }
                Ok(())
            }
            CameraDesc::LookAt {
                look_from,
                look_at,
                vup,
                vfov,
                aspect_ratio,
            } => {
                let w = to_vec3(look_from) - to_vec3(look_at);
                if w.length_squared() == 0.0 {
                    return Err(SceneError::InvalidCamera(
                        "look_from and look_at coincide".to_string(),
                    ));
                }
                if to_vec3(vup).cross(w).length_squared() == 0.0 {
                    return Err(SceneError::InvalidCamera(
                        "vup is parallel to the view direction".to_string(),
                    ));
                }
                if !(vfov > 0.0 && vfov < 180.0) {
                    return Err(SceneError::InvalidCamera(format!(
                        "vertical field of view must be in (0, 180), got {}",
                        vfov
                    )));
                }
                if let Some(aspect) = aspect_ratio {
                    if !(aspect > 0.0 && aspect.is_finite()) {
                        return Err(SceneError::InvalidCamera(format!(
                            "invalid aspect ratio {}",
                            aspect
                        )));
                    }
                }
                Ok(())
            }
        }
    }
}

/// What a ray sees when it escapes the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackgroundDesc {
    Solid {
        color: [f32; 3],
    },
    /// Vertical blend from `horizon` (looking down) to `zenith` (looking up).
    Gradient {
        horizon: [f32; 3],
        zenith: [f32; 3],
    },
}

impl Default for BackgroundDesc {
    fn default() -> Self {
        BackgroundDesc::Gradient {
            horizon: [1.0, 1.0, 1.0],
            zenith: [0.5, 0.7, 1.0],
        }
    }
}

/// Sub-pixel sample placement for anti-aliasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Jitter {
    /// Uniformly random inside the pixel square
    #[default]
    Random,
    /// Evenly spaced on a circle of half a pixel around the pixel center
    Circular,
}

/// Order in which finished pixels are emitted to the display buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanOrder {
    /// Top row first, left to right within a row
    #[default]
    RowMajor,
    /// Left column first, bottom to top within a column
    ColumnMajor,
}

/// Resolution and quality settings stored with a scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: u32,
    pub height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    /// Multiply each bounce by the primitive's own color
    pub tint_by_primitive: bool,
    pub jitter: Jitter,
    pub scan_order: ScanOrder,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 400,
            height: 200,
            samples_per_pixel: 10,
            max_depth: 50,
            tint_by_primitive: false,
            jitter: Jitter::Random,
            scan_order: ScanOrder::RowMajor,
        }
    }
}

impl RenderSettings {
    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::InvalidSamples);
        }
        Ok(())
    }
}

/// A complete, renderer-agnostic scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SceneDesc {
    #[serde(default)]
    pub name: String,
    pub camera: CameraDesc,
    #[serde(default)]
    pub background: BackgroundDesc,
    #[serde(default)]
    pub render: RenderSettings,
    pub materials: BTreeMap<String, MaterialDesc>,
    pub primitives: Vec<SphereDesc>,
}

impl SceneDesc {
    /// Create an empty scene with default background and settings.
    pub fn new(name: impl Into<String>, camera: CameraDesc) -> Self {
        Self {
            name: name.into(),
            camera,
            background: BackgroundDesc::default(),
            render: RenderSettings::default(),
            materials: BTreeMap::new(),
            primitives: Vec::new(),
        }
    }

    /// Add or replace a named material.
    pub fn with_material(mut self, name: impl Into<String>, material: MaterialDesc) -> Self {
        self.materials.insert(name.into(), material);
        self
    }

    /// Append a primitive. Order only matters for equidistant hits.
    pub fn with_primitive(mut self, sphere: SphereDesc) -> Self {
        self.primitives.push(sphere);
        self
    }

    /// Look up the material a primitive refers to.
    pub fn material_for(&self, index: usize) -> SceneResult<&MaterialDesc> {
        let sphere = &self.primitives[index];
        self.materials
            .get(&sphere.material)
            .ok_or_else(|| SceneError::UnknownMaterial {
                index,
                name: sphere.material.clone(),
            })
    }

    /// Check that the scene can be rendered.
    ///
    /// The tracer itself assumes well-formed input, so every degenerate case
    /// it cannot handle is rejected here.
    pub fn validate(&self) -> SceneResult<()> {
        self.render.validate()?;
        self.camera.validate()?;

        for (name, material) in &self.materials {
            material.validate(name)?;
        }

        for (index, sphere) in self.primitives.iter().enumerate() {
            if sphere.radius == 0.0 || !sphere.radius.is_finite() {
                return Err(SceneError::InvalidRadius {
                    index,
                    radius: sphere.radius,
                });
            }
            if !in_unit_range(sphere.color) {
                return Err(SceneError::InvalidColor {
                    index,
                    color: sphere.color,
                });
            }
            self.material_for(index)?;
        }

        if self.primitives.is_empty() {
            log::warn!("Scene '{}' has no primitives", self.name);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> CameraDesc {
        CameraDesc::LookAt {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aspect_ratio: None,
        }
    }

    fn valid_scene() -> SceneDesc {
        SceneDesc::new("test", camera())
            .with_material(
                "grey",
                MaterialDesc::Lambertian {
                    albedo: [0.5, 0.5, 0.5],
                },
            )
            .with_primitive(SphereDesc::new([0.0, 0.0, -1.0], 0.5, "grey"))
    }

    #[test]
    fn test_valid_scene() {
        assert!(valid_scene().validate().is_ok());
    }

    #[test]
    fn test_negative_radius_is_valid() {
        let scene = valid_scene().with_primitive(SphereDesc::new([0.0, 0.0, -1.0], -0.45, "grey"));
        assert!(scene.validate().is_ok());
    }

    #[test]
    fn test_unknown_material() {
        let scene = valid_scene().with_primitive(SphereDesc::new([0.0, 0.0, -1.0], 0.5, "chrome"));
        match scene.validate() {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 1);
                assert_eq!(name, "chrome");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_radius() {
        let scene = valid_scene().with_primitive(SphereDesc::new([0.0, 0.0, 0.0], 0.0, "grey"));
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidRadius { index: 1, .. })
        ));
    }

    #[test]
    fn test_albedo_out_of_range() {
        let scene = valid_scene().with_material(
            "hot",
            MaterialDesc::Lambertian {
                albedo: [1.2, 0.5, 0.5],
            },
        );
        assert!(matches!(scene.validate(), Err(SceneError::InvalidAlbedo { .. })));
    }

    #[test]
    fn test_tint_out_of_range() {
        let tinted = SphereDesc::new([0.0, 0.0, -3.0], 1.0, "grey").with_color([4.0, 4.0, 4.0]);
        let scene = valid_scene().with_primitive(tinted);
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidColor { index: 1, .. })
        ));

        let tinted = SphereDesc::new([0.0, 0.0, -3.0], 1.0, "grey").with_color([0.0, -0.1, 0.5]);
        let scene = valid_scene().with_primitive(tinted);
        assert!(scene.validate().is_err());
    }

    #[test]
    fn test_fuzz_out_of_range() {
        let scene = valid_scene().with_material(
            "brushed",
            MaterialDesc::Metal {
                albedo: [0.8, 0.8, 0.8],
                fuzz: 1.5,
            },
        );
        assert!(matches!(scene.validate(), Err(SceneError::InvalidFuzz { .. })));
    }

    #[test]
    fn test_refractive_index() {
        let scene = valid_scene().with_material(
            "glass",
            MaterialDesc::Dielectric {
                refractive_index: 0.0,
            },
        );
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidRefractiveIndex { .. })
        ));
    }

    #[test]
    fn test_invalid_resolution_and_samples() {
        let mut scene = valid_scene();
        scene.render.width = 0;
        assert!(matches!(
            scene.validate(),
            Err(SceneError::InvalidResolution { .. })
        ));

        let mut scene = valid_scene();
        scene.render.samples_per_pixel = 0;
        assert!(matches!(scene.validate(), Err(SceneError::InvalidSamples)));
    }

    #[test]
    fn test_degenerate_cameras() {
        let mut scene = valid_scene();
        scene.camera = CameraDesc::LookAt {
            look_from: [1.0, 1.0, 1.0],
            look_at: [1.0, 1.0, 1.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aspect_ratio: None,
        };
        assert!(matches!(scene.validate(), Err(SceneError::InvalidCamera(_))));

        scene.camera = CameraDesc::LookAt {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, -1.0, 0.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aspect_ratio: None,
        };
        assert!(matches!(scene.validate(), Err(SceneError::InvalidCamera(_))));

        scene.camera = CameraDesc::AxisAligned {
            origin: [0.0, 0.0, 2.0],
            focal_length: 0.0,
            half_width: 1.0,
            half_height: 1.0,
        };
        assert!(matches!(scene.validate(), Err(SceneError::InvalidCamera(_))));
    }

    #[test]
    fn test_aspect_ratio() {
        let settings = RenderSettings {
            width: 400,
            height: 200,
            ..Default::default()
        };
        assert_eq!(settings.aspect_ratio(), 2.0);
    }
}
