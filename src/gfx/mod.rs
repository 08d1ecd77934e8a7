//! # Graphics Module
//!
//! Procedural geometry, camera, GPU resources and rendering for the scene.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - ring and starfield point clouds, sphere meshes
//! - **Colors** ([`color`]) - HSL and hex conversions to linear RGB triples
//! - **Camera System** ([`camera`]) - damped orbit camera
//! - **Scene Management** ([`scene`]) - objects, sprite clouds and lights
//! - **Resource Management** ([`resources`]) - uniform buffers, materials, depth buffer
//! - **Rendering Pipeline** ([`rendering`]) - lit meshes plus alpha-blended sprites
//!
//! ## Usage
//!
//! Point clouds can be generated without a GPU:
//!
//! ```
//! use ringed_planet::gfx::geometry::{RingGenerator, RingSpec};
//!
//! let mut rings = RingGenerator::seeded(7);
//! let cloud = rings.generate(&RingSpec::new(2.3, 100, 0.8)).unwrap();
//! assert_eq!(cloud.len(), 100);
//! ```

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
