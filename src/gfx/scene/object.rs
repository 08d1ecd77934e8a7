//! Lit mesh objects: geometry buffers, a model transform and a material
//! reference.

use cgmath::{Matrix, Matrix4, SquareMatrix};
use wgpu::{util::DeviceExt, Device};

use super::vertex::Vertex3D;
use crate::{
    gfx::{geometry::GeometryData, resources::material::MaterialId},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

pub struct Mesh {
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    vertex_buffer: Option<wgpu::Buffer>,
    index_buffer: Option<wgpu::Buffer>,
    index_count: u32,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
        }
    }

    pub fn from_geometry(geometry: &GeometryData) -> Self {
        let (vertices, indices) = geometry.to_scene_format();
        Self::new(vertices, indices)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    fn init_gpu_resources(&mut self, device: &Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&self.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        }));
        self.index_buffer = Some(device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&self.indices),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }
}

/// Per-object uniform: model matrix plus the matrix that carries normals to
/// world space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    model: [[f32; 4]; 4],
    normal: [[f32; 4]; 4],
}

impl TransformUniform {
    pub fn new(model: Matrix4<f32>) -> Self {
        // Inverse-transpose keeps normals perpendicular under non-uniform scale
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);
        Self {
            model: model.into(),
            normal: normal.into(),
        }
    }
}

type TransformUBO = UniformBuffer<TransformUniform>;

/// Layout of the per-object transform bind group (slot 1 of the mesh pipeline)
pub fn transform_bind_group_layout(device: &Device) -> BindGroupLayoutWithDesc {
    BindGroupLayoutBuilder::new()
        .next_binding_vertex(binding_types::uniform())
        .create(device, "Transform Bind Group Layout")
}

pub struct ObjectGpuResources {
    transform_ubo: TransformUBO,
    transform_bind_group: wgpu::BindGroup,
}

pub struct Object {
    pub name: String,
    pub mesh: Mesh,
    pub transform: Matrix4<f32>,
    pub visible: bool,
    material_id: Option<MaterialId>,
    gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Creates a visible object with identity transform and the default material
    pub fn new(name: &str, mesh: Mesh) -> Self {
        Self {
            name: name.to_string(),
            mesh,
            transform: Matrix4::identity(),
            visible: true,
            material_id: None,
            gpu_resources: None,
        }
    }

    /// Builder pattern: assign a material by ID
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.set_material(material_id);
        self
    }

    /// Builder pattern: set the initial transform
    pub fn with_transform(mut self, transform: Matrix4<f32>) -> Self {
        self.transform = transform;
        self
    }

    pub fn set_material(&mut self, material_id: &str) {
        self.material_id = Some(material_id.to_string());
    }

    pub fn get_material_id(&self) -> Option<&str> {
        self.material_id.as_deref()
    }

    pub fn has_gpu_resources(&self) -> bool {
        self.gpu_resources.is_some()
    }

    pub fn init_gpu_resources(&mut self, device: &Device, layout: &BindGroupLayoutWithDesc) {
        self.mesh.init_gpu_resources(device, &self.name);

        let transform_ubo = TransformUBO::new_with_data(device, &TransformUniform::new(self.transform));
        let transform_bind_group = BindGroupBuilder::new(layout)
            .resource(transform_ubo.binding_resource())
            .create(device, &format!("{} Transform Bind Group", self.name));

        log::debug!(
            "Uploaded '{}': {} vertices, {} triangles",
            self.name,
            self.mesh.vertex_count(),
            self.mesh.index_count() / 3
        );

        self.gpu_resources = Some(ObjectGpuResources {
            transform_ubo,
            transform_bind_group,
        });
    }

    /// Syncs the current transform to the GPU if resources exist
    pub fn update_transform(&mut self, queue: &wgpu::Queue) {
        let uniform = TransformUniform::new(self.transform);
        if let Some(gpu_resources) = self.gpu_resources.as_mut() {
            gpu_resources.transform_ubo.update_content(queue, uniform);
        }
    }

    pub fn get_transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources
            .as_ref()
            .map(|res| &res.transform_bind_group)
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) = (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return; // Skip drawing if not uploaded
        };

        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &'b Object) {
        let Some(transform_bind_group) = object.get_transform_bind_group() else {
            return;
        };
        self.set_bind_group(1, transform_bind_group, &[]);
        self.draw_mesh(&object.mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_sphere;
    use cgmath::{Rad, Vector3, Vector4};

    #[test]
    fn test_mesh_from_sphere() {
        let mesh = Mesh::from_geometry(&generate_sphere(8, 8));
        assert_eq!(mesh.vertex_count(), 81);
        assert_eq!(mesh.index_count(), 8 * 8 * 6);
    }

    #[test]
    fn test_normal_matrix_undoes_scale() {
        let model = Matrix4::from_translation(Vector3::new(0.0, -2.0, 0.0))
            * Matrix4::from_angle_x(Rad(-std::f32::consts::FRAC_PI_2))
            * Matrix4::from_scale(2.0);
        let uniform = TransformUniform::new(model);
        let normal = Matrix4::from(uniform.normal);

        // The object-space +Y pole tilts to face -Z; translation never leaks in
        let n = normal * Vector4::new(0.0, 1.0, 0.0, 0.0);
        assert!(n.x.abs() < 1e-5);
        assert!(n.y.abs() < 1e-5);
        assert!((n.z + 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_object_material_assignment() {
        let object = Object::new("moon-0", Mesh::from_geometry(&generate_sphere(4, 4)))
            .with_material("moon");
        assert_eq!(object.get_material_id(), Some("moon"));
        assert!(object.visible);
        assert!(!object.has_gpu_resources());
    }
}
