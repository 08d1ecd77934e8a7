//! Global uniform bindings for camera and scene data
//!
//! Manages GPU uniform buffers and bind groups for global rendering state
//! that is shared across every draw in a frame: camera matrices for both the
//! mesh and sprite pipelines, and the scene's lights.

use crate::{
    gfx::{camera::camera_utils::CameraUniform, scene::lights::LightRig},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// Every light field is a `vec4` so the layout needs no manual padding.
/// MUST match the `Globals` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    view: [[f32; 4]; 4],

    // xyz = direction the light travels
    directional_direction: [f32; 4],
    // rgb = color * intensity
    directional_color: [f32; 4],
    spot_position: [f32; 4],
    // xyz = direction, w = cos(outer cone)
    spot_direction: [f32; 4],
    // rgb = color * intensity, w = cos(inner cone)
    spot_color: [f32; 4],
    ambient_color: [f32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: CameraUniform, lights: &LightRig) -> Self {
        let directional = lights.directional.direction();
        let spot = lights.spot.direction();
        let (cos_outer, cos_inner) = lights.spot.cone_cosines();

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            view: camera.view,
            directional_direction: [directional.x, directional.y, directional.z, 0.0],
            directional_color: scaled(lights.directional.color, lights.directional.intensity, 0.0),
            spot_position: [
                lights.spot.position.x,
                lights.spot.position.y,
                lights.spot.position.z,
                1.0,
            ],
            spot_direction: [spot.x, spot.y, spot.z, cos_outer],
            spot_color: scaled(lights.spot.color, lights.spot.intensity, cos_inner),
            ambient_color: scaled(lights.ambient.color, lights.ambient.intensity, 0.0),
        }
    }
}

fn scaled(color: [f32; 3], intensity: f32, w: f32) -> [f32; 4] {
    [color[0] * intensity, color[1] * intensity, color[2] * intensity, w]
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light data
///
/// Called each frame; the write is skipped when nothing moved.
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &LightRig,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lights));
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    /// Sets up the layout; the bind group itself comes from `create_bind_group()`
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // camera + lights
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_size_matches_shader() {
        // 3 matrices/vectors for the camera plus six vec4 light slots
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 16 + 64 + 64 + 6 * 16);
    }

    #[test]
    fn test_light_packing() {
        let lights = LightRig::default();
        let content = GlobalUBOContent::new(CameraUniform::default(), &lights);

        assert!((content.directional_color[0] - 1.2).abs() < 1e-6);
        let (cos_outer, cos_inner) = lights.spot.cone_cosines();
        assert_eq!(content.spot_direction[3], cos_outer);
        assert_eq!(content.spot_color[3], cos_inner);
        assert_eq!(content.spot_position[..3], [-5.0, 5.0, -5.0]);
    }
}
