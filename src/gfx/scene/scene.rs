use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    geometry::PointCloud,
    resources::material::{Material, MaterialManager},
    scene::{
        lights::LightRig,
        object::{transform_bind_group_layout, Object},
        point_sprites::SpriteCloud,
    },
};

/// Main scene containing lit objects, sprite clouds, materials, lights and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub sprite_clouds: Vec<SpriteCloud>,
    pub material_manager: MaterialManager,
    pub lights: LightRig,
}

impl Scene {
    /// Creates an empty scene lit by the default light rig
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            sprite_clouds: Vec::new(),
            material_manager: MaterialManager::new(),
            lights: LightRig::default(),
        }
    }

    pub fn with_lights(mut self, lights: LightRig) -> Self {
        self.lights = lights;
        self
    }

    /// Integrates camera input and refreshes camera matrices
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    /// Adds an object and returns its index
    pub fn add_object(&mut self, object: Object) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    pub fn add_sprite_cloud(&mut self, name: &str, cloud: PointCloud) -> usize {
        self.sprite_clouds.push(SpriteCloud::new(name, cloud));
        self.sprite_clouds.len() - 1
    }

    /// Adds a material, replacing any existing one with the same name
    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    pub fn get_object(&self, index: usize) -> Option<&Object> {
        self.objects.get(index)
    }

    pub fn get_object_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.objects.get_mut(index)
    }

    pub fn find_object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Initializes GPU resources for all objects, sprite clouds and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        let transform_layout = transform_bind_group_layout(device);
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, &transform_layout);
        }

        for sprites in self.sprite_clouds.iter_mut() {
            sprites.init_gpu_resources(device);
        }

        self.material_manager
            .update_all_gpu_resources(device, queue);

        let stats = self.get_statistics();
        log::info!(
            "Scene uploaded: {} objects ({} triangles), {} sprite clouds ({} particles), {} materials",
            stats.object_count,
            stats.total_triangles,
            stats.sprite_cloud_count,
            stats.total_particles,
            stats.material_count
        );
    }

    /// Syncs every object's transform to the GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.has_gpu_resources() {
                object.update_transform(queue);
            }
        }
    }

    /// Returns the material assigned to the object, or the default material
    /// if none is assigned or the assigned one doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    pub fn get_statistics(&self) -> SceneStatistics {
        SceneStatistics {
            object_count: self.objects.len(),
            sprite_cloud_count: self.sprite_clouds.len(),
            material_count: self.material_manager.list_materials().len(),
            total_triangles: self.objects.iter().map(|o| o.mesh.index_count() / 3).sum(),
            total_vertices: self.objects.iter().map(|o| o.mesh.vertex_count()).sum(),
            total_particles: self
                .sprite_clouds
                .iter()
                .map(|s| s.cloud().len())
                .sum(),
        }
    }
}

/// Scene statistics for logging
#[derive(Debug, PartialEq)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub sprite_cloud_count: usize,
    pub material_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
    pub total_particles: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        camera::{CameraController, OrbitCamera, OrbitPose},
        geometry::{generate_sphere, RingGenerator, RingSpec},
        scene::object::Mesh,
    };

    fn empty_scene() -> Scene {
        let camera = OrbitCamera::new(OrbitPose::default(), 1.5);
        Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.1)))
    }

    #[test]
    fn test_statistics_count_everything() {
        let mut scene = empty_scene();
        scene.add_material(Material::new("planet", [0.0, 0.5, 1.0, 1.0], 0.1, 0.7));
        let planet = Object::new("planet", Mesh::from_geometry(&generate_sphere(4, 4)))
            .with_material("planet");
        assert_eq!(scene.add_object(planet), 0);

        let ring = RingGenerator::seeded(1)
            .generate(&RingSpec::new(2.3, 50, 0.8))
            .unwrap();
        scene.add_sprite_cloud("ring-0", ring);

        let stats = scene.get_statistics();
        assert_eq!(stats.object_count, 1);
        assert_eq!(stats.sprite_cloud_count, 1);
        assert_eq!(stats.material_count, 1);
        assert_eq!(stats.total_triangles, 4 * 4 * 2);
        assert_eq!(stats.total_particles, 50);
    }

    #[test]
    fn test_material_lookup_and_find() {
        let mut scene = empty_scene();
        scene.add_object(Object::new("moon-0", Mesh::from_geometry(&generate_sphere(4, 4))));

        let moon = scene.find_object("moon-0").unwrap();
        assert_eq!(scene.get_material_for_object(moon).name, "default");
        assert!(scene.find_object("pluto").is_none());
    }
}
