//! GPU resource management
//!
//! Uniform buffers, bind groups and the depth buffer shared by the pipelines.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, GlobalUBOContent};
pub use material::{Material, MaterialBindings, MaterialManager};
pub use texture_resource::TextureResource;
