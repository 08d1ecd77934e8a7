//! Ringed Planet
//!
//! A decorative 3D scene: a tilted planet wrapped in procedural particle
//! rings, three emissive moons on circular orbits and a random starfield,
//! rendered with wgpu and winit.

pub mod animation;
pub mod app;
pub mod config;
pub mod gfx;
pub mod planet_scene;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::PlanetApp;
pub use config::SceneConfig;
pub use gfx::geometry::{RingGenerator, RingPointCloud, RingSpec};
