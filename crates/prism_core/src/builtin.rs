//! Reference scenes that can be rendered without a scene file.

use crate::scene::{
    BackgroundDesc, CameraDesc, Jitter, MaterialDesc, RenderSettings, ScanOrder, SceneDesc,
    SceneError, SceneResult, SphereDesc,
};

/// Names accepted by [`builtin_scene`].
pub const BUILTIN_SCENES: &[&str] = &["showcase", "single"];

/// Look up a built-in scene by name.
pub fn builtin_scene(name: &str) -> SceneResult<SceneDesc> {
    match name {
        "showcase" => Ok(showcase()),
        "single" => Ok(single_sphere()),
        other => Err(SceneError::UnknownBuiltin(other.to_string())),
    }
}

/// A mirror ball and a hollow glass ball in a box of huge wall spheres.
///
/// The walls are plain grey Lambertian; their red/blue/white look comes from
/// the per-primitive tint, so this scene renders with `tint_by_primitive` on.
pub fn showcase() -> SceneDesc {
    let mut scene = SceneDesc::new(
        "showcase",
        CameraDesc::AxisAligned {
            origin: [0.0, 0.0, 2.0],
            focal_length: 3.0,
            half_width: 1.0,
            half_height: 1.0,
        },
    )
    .with_material(
        "wall",
        MaterialDesc::Lambertian {
            albedo: [0.75, 0.75, 0.75],
        },
    )
    .with_material(
        "mirror",
        MaterialDesc::Metal {
            albedo: [1.0, 1.0, 1.0],
            fuzz: 0.0,
        },
    )
    .with_material(
        "glass",
        MaterialDesc::Dielectric {
            refractive_index: 1.5,
        },
    )
    .with_primitive(SphereDesc::new([-1.0, 0.0, -1.0], 0.5, "mirror"))
    .with_primitive(SphereDesc::new([1.0, 0.0, -1.0], 0.5, "glass"))
    // Inner wall of the glass ball
    .with_primitive(SphereDesc::new([1.0, 0.0, -1.0], -0.45, "glass"))
    .with_primitive(
        SphereDesc::new([-1050.0, 0.0, -1.0], 1000.0, "wall").with_color([1.0, 0.0, 0.0]),
    )
    .with_primitive(
        SphereDesc::new([1050.0, 0.0, -1.0], 1000.0, "wall").with_color([0.0, 0.0, 1.0]),
    )
    .with_primitive(SphereDesc::new([0.0, 1050.0, -1.0], 1000.0, "wall"))
    .with_primitive(SphereDesc::new([0.0, -1000.5, -1.0], 1000.0, "wall"));

    scene.background = BackgroundDesc::Solid {
        color: [1.0, 1.0, 1.0],
    };
    scene.render = RenderSettings {
        width: 400,
        height: 400,
        samples_per_pixel: 4,
        max_depth: 5,
        tint_by_primitive: true,
        jitter: Jitter::Circular,
        scan_order: ScanOrder::ColumnMajor,
    };
    scene
}

/// One grey diffuse sphere under a sky gradient.
pub fn single_sphere() -> SceneDesc {
    let mut scene = SceneDesc::new(
        "single",
        CameraDesc::LookAt {
            look_from: [0.0, 0.0, 0.0],
            look_at: [0.0, 0.0, -1.0],
            vup: [0.0, 1.0, 0.0],
            vfov: 90.0,
            aspect_ratio: None,
        },
    )
    .with_material(
        "grey",
        MaterialDesc::Lambertian {
            albedo: [0.5, 0.5, 0.5],
        },
    )
    .with_primitive(SphereDesc::new([0.0, 0.0, -1.0], 0.5, "grey"));

    scene.background = BackgroundDesc::default();
    scene.render = RenderSettings {
        width: 400,
        height: 200,
        samples_per_pixel: 100,
        max_depth: 50,
        ..Default::default()
    };
    scene
}
