//! Point clouds drawn as camera-facing sprites
//!
//! Each particle becomes one instance; the sprite pipeline expands every
//! instance into a quad in the vertex shader, so no per-vertex geometry is
//! uploaded at all.

use wgpu::{util::DeviceExt, Device};

use crate::gfx::geometry::PointCloud;

/// Vertices emitted per sprite (two triangles)
pub const SPRITE_VERTEX_COUNT: u32 = 6;

/// Instance data for a single sprite
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    /// World position [x, y, z, size]
    pub position_size: [f32; 4],
    /// Color [r, g, b, opacity]
    pub color: [f32; 4],
}

impl PointInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

    /// One instance per particle; size and opacity are shared by the whole cloud
    pub fn from_cloud(cloud: &PointCloud) -> Vec<Self> {
        let size = cloud.point_size();
        let opacity = cloud.opacity();
        cloud
            .particles()
            .map(|particle| {
                let [x, y, z] = particle.position;
                let [r, g, b] = particle.color;
                Self {
                    position_size: [x, y, z, size],
                    color: [r, g, b, opacity],
                }
            })
            .collect()
    }

    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// A named point cloud plus its instance buffer once uploaded
pub struct SpriteCloud {
    pub name: String,
    pub visible: bool,
    cloud: PointCloud,
    instance_buffer: Option<wgpu::Buffer>,
}

impl SpriteCloud {
    pub fn new(name: &str, cloud: PointCloud) -> Self {
        Self {
            name: name.to_string(),
            visible: true,
            cloud,
            instance_buffer: None,
        }
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn instance_count(&self) -> u32 {
        self.cloud.len() as u32
    }

    pub fn init_gpu_resources(&mut self, device: &Device) {
        // wgpu rejects zero-sized vertex buffers; an empty cloud simply never draws
        if self.cloud.is_empty() {
            log::debug!("Sprite cloud '{}' is empty, nothing to upload", self.name);
            return;
        }

        let instances = PointInstance::from_cloud(&self.cloud);
        self.instance_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", self.name)),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX,
        }));

        log::debug!(
            "Uploaded sprite cloud '{}': {} particles",
            self.name,
            instances.len()
        );
    }
}

pub trait DrawSpriteCloud<'a> {
    fn draw_sprite_cloud(&mut self, sprites: &'a SpriteCloud);
}

impl<'a, 'b> DrawSpriteCloud<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_sprite_cloud(&mut self, sprites: &'b SpriteCloud) {
        let Some(instance_buffer) = &sprites.instance_buffer else {
            return;
        };
        self.set_vertex_buffer(0, instance_buffer.slice(..));
        self.draw(0..SPRITE_VERTEX_COUNT, 0..sprites.instance_count());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::{RingGenerator, RingSpec};

    #[test]
    fn test_instances_carry_cloud_size_and_opacity() {
        let cloud = RingGenerator::seeded(3)
            .generate(&RingSpec::new(3.0, 10, 0.5))
            .unwrap();
        let instances = PointInstance::from_cloud(&cloud);

        assert_eq!(instances.len(), 10);
        for (instance, particle) in instances.iter().zip(cloud.particles()) {
            assert_eq!(instance.position_size[..3], particle.position);
            assert_eq!(instance.position_size[3], cloud.point_size());
            assert_eq!(instance.color[3], 0.5);
        }
    }

    #[test]
    fn test_instance_layout() {
        let layout = PointInstance::vertex_buffer_layout();
        assert_eq!(layout.array_stride, 32);
        assert_eq!(layout.step_mode, wgpu::VertexStepMode::Instance);
    }
}
