//! JSON scene loading.

use std::path::Path;

use crate::scene::{SceneDesc, SceneResult};

/// Load and validate a scene from a JSON file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDesc> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let scene = load_scene_from_str(&text)?;

    log::info!(
        "Loaded scene '{}' from {}: {} primitives, {} materials",
        scene.name,
        path.display(),
        scene.primitives.len(),
        scene.materials.len()
    );

    Ok(scene)
}

/// Parse and validate a scene from a JSON string.
pub fn load_scene_from_str(text: &str) -> SceneResult<SceneDesc> {
    let scene: SceneDesc = serde_json::from_str(text)?;
    scene.validate()?;
    Ok(scene)
}
