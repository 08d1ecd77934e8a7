//! # Scene Management Module
//!
//! Everything that gets drawn, and the lights and camera it is drawn with.
//!
//! ## Key Components
//!
//! - [`Scene`] - container for objects, sprite clouds, materials, lights and camera
//! - [`Object`] - a lit mesh with a transform and a material reference
//! - [`SpriteCloud`] - a point cloud drawn as camera-facing sprites
//! - [`LightRig`] - directional, spot and ambient lights
//! - [`Vertex3D`] - mesh vertex with position and normal
//!
//! Objects and sprite clouds own their GPU buffers; call
//! [`Scene::init_gpu_resources`] once the device exists.

pub mod lights;
pub mod object;
pub mod point_sprites;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use lights::{AmbientLight, DirectionalLight, LightRig, SpotLight};
pub use object::{DrawObject, Mesh, Object};
pub use point_sprites::{DrawSpriteCloud, PointInstance, SpriteCloud};
pub use scene::Scene;
pub use vertex::Vertex3D;
