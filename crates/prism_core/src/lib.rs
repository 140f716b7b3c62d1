//! Prism Core - scene description for the Prism path tracer.
//!
//! This crate provides:
//!
//! - **Scene descriptors**: `SceneDesc`, `SphereDesc`, `MaterialDesc`,
//!   `CameraDesc`, `BackgroundDesc`, `RenderSettings`
//! - **Loading**: JSON scene files via serde
//! - **Built-in scenes**: reference scenes usable without any file
//!
//! # Example
//!
//! ```ignore
//! use prism_core::load_scene;
//!
//! let scene = load_scene("scene.json")?;
//! println!("Loaded {} primitives sharing {} materials",
//!     scene.primitives.len(),
//!     scene.materials.len());
//! ```

pub mod builtin;
pub mod loader;
pub mod scene;

// Re-export commonly used types
pub use builtin::{builtin_scene, BUILTIN_SCENES};
pub use loader::{load_scene, load_scene_from_str};
pub use scene::{
    BackgroundDesc, CameraDesc, Jitter, MaterialDesc, RenderSettings, ScanOrder, SceneDesc,
    SceneError, SceneResult, SphereDesc,
};
