//! Assembles the ringed planet scene from a [`SceneConfig`]
//!
//! Everything here runs once, before the event loop starts: the starfield
//! and ring point clouds are generated, the planet and moon meshes built,
//! and every moving body registered with a [`SceneAnimator`].

use cgmath::{Deg, Rad, Vector3};

use crate::{
    animation::{Motion, Orbit, Placement, SceneAnimator},
    config::{CameraConfig, SceneConfig},
    gfx::{
        camera::{CameraController, CameraManager, OrbitCamera, OrbitCameraBounds, OrbitPose},
        color::hex_to_rgb,
        geometry::{generate_sphere, GenerationError, RingGenerator, StarfieldGenerator},
        resources::material::Material,
        scene::{Mesh, Object, Scene},
    },
};

pub const PLANET_MATERIAL: &str = "planet";
pub const MOON_MATERIAL: &str = "moon";

/// The scene plus the animator that moves its bodies
pub struct PlanetScene {
    pub scene: Scene,
    pub animator: SceneAnimator,
}

impl PlanetScene {
    /// Advances every animated body to `elapsed` seconds
    pub fn animate(&mut self, elapsed: f32) {
        self.animator.apply(&mut self.scene, elapsed);
    }
}

/// Orbit camera and controller described by the camera section
pub fn build_camera(config: &CameraConfig, aspect: f32) -> CameraManager {
    let pose = OrbitPose {
        distance: config.distance,
        ..OrbitPose::default()
    };
    let bounds = OrbitCameraBounds {
        min_distance: Some(config.min_distance),
        max_distance: Some(config.max_distance),
        ..OrbitCameraBounds::default()
    };
    let camera = OrbitCamera::new(pose, aspect)
        .with_projection(Deg(config.fov_degrees), config.near, config.far)
        .with_bounds(bounds);
    let controller =
        CameraController::new(config.rotate_speed, config.zoom_speed).with_damping(config.damping);

    CameraManager::new(camera, controller)
}

/// Builds the complete scene
///
/// # Errors
/// Propagates the first [`GenerationError`] raised by the ring or starfield
/// generators.
pub fn build_scene(config: &SceneConfig, aspect: f32) -> Result<PlanetScene, GenerationError> {
    let mut scene = Scene::new(build_camera(&config.camera, aspect))
        .with_lights(config.lights.light_rig());
    let mut animator = SceneAnimator::new();

    let (rings, mut stars) = match config.seed {
        Some(seed) => {
            log::info!("Generating scene with seed {}", seed);
            (
                RingGenerator::seeded(seed),
                StarfieldGenerator::seeded(seed.wrapping_add(1)),
            )
        }
        None => (RingGenerator::from_os_rng(), StarfieldGenerator::from_os_rng()),
    };

    let starfield = stars.generate(&config.stars.spec())?;
    log::info!("Generated starfield: {} stars", starfield.len());
    scene.add_sprite_cloud("starfield", starfield);

    let mut rings = rings
        .with_strict_opacity(config.rings.strict_opacity)
        .with_plane_height(config.rings.plane_height)
        .with_point_size(config.rings.point_size);
    for (i, layer) in config.rings.layers.iter().enumerate() {
        let ring = rings.generate(&layer.spec())?;
        log::info!(
            "Generated ring {}: {} particles at radius {}",
            i,
            ring.len(),
            layer.radius
        );
        scene.add_sprite_cloud(&format!("ring-{i}"), ring);
    }

    let planet = &config.planet;
    scene.add_material(material_from_hex(
        PLANET_MATERIAL,
        planet.color,
        planet.metalness,
        planet.roughness,
    ));
    let planet_placement = Placement::at(Vector3::from(planet.position), planet.radius)
        .with_tilt(Rad(planet.tilt));
    let planet_index = scene.add_object(
        Object::new(
            "planet",
            Mesh::from_geometry(&generate_sphere(planet.segments, planet.segments)),
        )
        .with_material(PLANET_MATERIAL)
        .with_transform(planet_placement.matrix(Rad(0.0))),
    );
    animator.add_body(planet_index, planet_placement, Motion::Spin(planet.spin_rate));

    let moons = &config.moons;
    scene.add_material(
        material_from_hex(MOON_MATERIAL, moons.color, moons.metalness, moons.roughness)
            .with_emission(hex_to_rgb(moons.emissive), moons.emissive_intensity),
    );
    let moon_geometry = generate_sphere(moons.segments, moons.segments);
    for (i, orbit) in moons.orbits.iter().enumerate() {
        let orbit = Orbit::new(orbit.radius, orbit.period);
        let placement = Placement::at(orbit.position_at(0.0), moons.radius);
        let moon_index = scene.add_object(
            Object::new(&format!("moon-{i}"), Mesh::from_geometry(&moon_geometry))
                .with_material(MOON_MATERIAL)
                .with_transform(placement.matrix(Rad(0.0))),
        );
        animator.add_body(moon_index, placement, Motion::Orbit(orbit));
    }

    log::info!(
        "Scene ready: {} ring layers, {} moons",
        config.rings.layers.len(),
        moons.orbits.len()
    );

    Ok(PlanetScene { scene, animator })
}

fn material_from_hex(name: &str, color: u32, metallic: f32, roughness: f32) -> Material {
    let [r, g, b] = hex_to_rgb(color);
    Material::new(name, [r, g, b, 1.0], metallic, roughness)
}
