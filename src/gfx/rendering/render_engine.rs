//! WGPU-based rendering engine
//!
//! Owns the surface, device and the two pipelines the scene needs: lit
//! meshes for the planet and moons, and alpha-blended camera-facing sprites
//! for the rings and starfield.

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::gfx::{
    camera::CameraUniform,
    resources::{
        global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO},
        material::MaterialBindings,
        texture_resource::TextureResource,
    },
    scene::{
        object::{transform_bind_group_layout, DrawObject},
        point_sprites::{DrawSpriteCloud, PointInstance},
        LightRig, Scene, Vertex3D,
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

pub const MESH_PIPELINE: &str = "Mesh";
pub const POINTS_PIPELINE: &str = "Points";

const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("pipeline creation failed: {}", .0.join("; "))]
    Pipeline(Vec<String>),
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pub pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    /// * `vsync` - Present with `Fifo` when set, otherwise `AutoNoVsync`
    ///
    /// # Errors
    /// Fails when no adapter or device is available, or a pipeline cannot
    /// be built.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<RenderEngine, RenderError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        // Colors are written as-is, so prefer a linear (non-sRGB) target
        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_ubo = GlobalUBO::new(&device);
        let mut global_bindings = GlobalBindings::new(&device);
        global_bindings.create_bind_group(&device, &global_ubo);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("mesh", include_str!("shaders/mesh.wgsl"));
        pipeline_manager.load_shader("points", include_str!("shaders/points.wgsl"));

        let transform_layout = transform_bind_group_layout(&device);
        let material_bindings = MaterialBindings::new(&device);

        pipeline_manager.register_pipeline(
            MESH_PIPELINE,
            PipelineConfig::default()
                .with_label("Mesh Pipeline")
                .with_shader("mesh")
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    transform_layout.layout.clone(),
                    material_bindings.bind_group_layout().clone(),
                ])
                .with_vertex_buffers(vec![Vertex3D::desc()])
                .with_cull_mode(Some(wgpu::Face::Back))
                .with_depth(TextureResource::DEPTH_FORMAT, true)
                .with_color_target(format, Some(wgpu::BlendState::REPLACE)),
        );

        // Sprites overlap freely, so they test depth but never write it
        pipeline_manager.register_pipeline(
            POINTS_PIPELINE,
            PipelineConfig::default()
                .with_label("Points Pipeline")
                .with_shader("points")
                .with_bind_group_layouts(vec![global_bindings.bind_group_layout().clone()])
                .with_vertex_buffers(vec![PointInstance::vertex_buffer_layout()])
                .with_cull_mode(None)
                .with_depth(TextureResource::DEPTH_FORMAT, false)
                .with_color_target(format, Some(wgpu::BlendState::ALPHA_BLENDING)),
        );

        pipeline_manager
            .create_all_pipelines()
            .map_err(RenderError::Pipeline)?;

        let stats = pipeline_manager.get_stats();
        log::info!(
            "Render engine ready: {:?} {}x{}, {} pipelines, {} shaders",
            format,
            config.width,
            config.height,
            stats.total_pipelines,
            stats.loaded_shaders
        );

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
        })
    }

    /// Renders one frame: lit meshes first, then sprite clouds on top
    ///
    /// # Errors
    /// Returns the surface error when no frame could be acquired. `Lost` and
    /// `Outdated` are recovered with [`RenderEngine::reconfigure`].
    pub fn render_frame(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(globals) = self.global_bindings.bind_group() {
                render_pass.set_bind_group(0, globals, &[]);
            }

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(MESH_PIPELINE) {
                render_pass.set_pipeline(pipeline);

                for object in scene.objects.iter().filter(|o| o.visible) {
                    let material = scene.get_material_for_object(object);

                    if let Some(material_bind_group) = material.get_bind_group() {
                        render_pass.set_bind_group(2, material_bind_group, &[]);
                        render_pass.draw_object(object);
                    } else {
                        log::warn!(
                            "Skipping '{}' - material '{}' has no GPU resources",
                            object.name,
                            material.name
                        );
                    }
                }
            }

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(POINTS_PIPELINE) {
                render_pass.set_pipeline(pipeline);

                for sprites in scene.sprite_clouds.iter().filter(|s| s.visible) {
                    render_pass.draw_sprite_cloud(sprites);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Uploads camera and light uniforms for the next frame
    pub fn update(&mut self, camera_uniform: CameraUniform, lights: &LightRig) {
        update_global_ubo(&mut self.global_ubo, &self.queue, camera_uniform, lights);
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// Zero-sized requests (minimized windows) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reapplies the current surface configuration
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_mode_follows_vsync() {
        assert_eq!(present_mode(true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn test_pipeline_error_lists_failures() {
        let err = RenderError::Pipeline(vec!["Pipeline 'Mesh': a".into(), "b".into()]);
        assert_eq!(
            err.to_string(),
            "pipeline creation failed: Pipeline 'Mesh': a; b"
        );
    }
}
