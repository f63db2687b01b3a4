//! WGPU-based rendering engine
//!
//! Owns the surface, device and every GPU resource of the scene pipeline.
//! Scene code never talks to it directly: it records uniforms and draws
//! into the engine's [`DrawQueue`] and uploads textures through its
//! [`TextureSlots`]. [`RenderEngine::render`] then replays the recorded
//! draws in one pass:
//!
//! - bind group 0: [`SceneUniform`] (camera and lights), once per frame
//! - bind group 1: [`ObjectUniform`] at a dynamic offset, once per draw
//! - bind group 2: the draw's texture slot, or the white fallback

use std::sync::Arc;
use wgpu::TextureFormat;

use crate::{
    error::InitError,
    gfx::{
        camera::camera_utils::to_wgpu_projection,
        resources::texture_resource::TextureResource,
        shading::{ObjectUniform, SceneUniform},
    },
    wgpu_utils::{dynamic_uniform, layout_entry, uniform, DynamicUniformBuffer, UniformBuffer},
};

use super::{
    draw_queue::DrawQueue,
    mesh::{DrawMesh, PrimitiveMeshes},
    pipeline_manager::{PipelineConfig, PipelineManager},
    texture_slots::TextureSlots,
};

const SCENE_PIPELINE: &str = "Scene";
/// Object uniforms allocated up front; the buffer grows past this.
const INITIAL_OBJECT_CAPACITY: usize = 64;

/// Prefers a non-sRGB surface so shaded values are written as-is, matching
/// the linear texture format.
fn pick_surface_format(formats: &[TextureFormat]) -> Option<TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first().copied())
}

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,

    scene_buffer: UniformBuffer<SceneUniform>,
    scene_bind_group: wgpu::BindGroup,
    object_buffer: DynamicUniformBuffer<ObjectUniform>,
    object_layout: wgpu::BindGroupLayout,
    object_bind_group: wgpu::BindGroup,

    meshes: PrimitiveMeshes,
    texture_slots: TextureSlots,
    draw_queue: DrawQueue,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Arguments
    /// * `window` - Window surface target for rendering
    /// * `width` - Initial surface width in pixels
    /// * `height` - Initial surface height in pixels
    ///
    /// # Errors
    /// Any failure to create the surface, adapter, device or pipeline.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<RenderEngine, InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .map_err(|e| InitError::Surface(e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| InitError::Adapter(e.to_string()))?;
        log::info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|e| InitError::Device(e.to_string()))?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = pick_surface_format(&surface_capabilities.formats)
            .ok_or_else(|| InitError::Surface("surface reports no formats".to_string()))?;
        log::info!("surface format {:?}", format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
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

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let scene_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                uniform(),
            )],
        });
        let scene_buffer = UniformBuffer::<SceneUniform>::new(&device);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.binding_resource(),
            }],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[layout_entry(
                0,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                dynamic_uniform(std::mem::size_of::<ObjectUniform>() as u64),
            )],
        });
        let object_buffer = DynamicUniformBuffer::new(&device, INITIAL_OBJECT_CAPACITY);
        let object_bind_group = Self::create_object_bind_group(&device, &object_layout, &object_buffer);

        let texture_slots = TextureSlots::new(device.clone(), queue.clone());

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));
        pipeline_manager.register_pipeline(
            SCENE_PIPELINE,
            PipelineConfig::default()
                .with_label("SCENE")
                .with_shader("scene")
                .with_cull_mode(None) // planes are seen from both sides
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_color_format(format)
                .with_bind_group_layouts(vec![
                    scene_layout,
                    object_layout.clone(),
                    texture_slots.layout().clone(),
                ]),
        );
        pipeline_manager
            .create_all_pipelines()
            .map_err(|errors| InitError::Pipeline(errors.join("; ")))?;

        let meshes = PrimitiveMeshes::new(&device);

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline_manager,
            scene_buffer,
            scene_bind_group,
            object_buffer,
            object_layout,
            object_bind_group,
            meshes,
            texture_slots,
            draw_queue: DrawQueue::new(),
        })
    }

    fn create_object_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &DynamicUniformBuffer<ObjectUniform>,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.binding_resource(),
            }],
        })
    }

    /// The texture backend and the frame recorder, borrowed together so
    /// scene preparation can use both at once.
    pub fn resources_mut(&mut self) -> (&mut TextureSlots, &mut DrawQueue) {
        (&mut self.texture_slots, &mut self.draw_queue)
    }

    pub fn draw_queue_mut(&mut self) -> &mut DrawQueue {
        &mut self.draw_queue
    }

    /// Renders the draws recorded since the last frame and presents.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped; a
    /// timeout skips the frame.
    ///
    /// # Errors
    /// Out-of-memory and other unrecoverable surface errors.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let mut scene = *self.draw_queue.scene_uniform();
        scene.projection = to_wgpu_projection(scene.projection);
        self.scene_buffer.update_content(&self.queue, scene);

        let objects: Vec<ObjectUniform> = self
            .draw_queue
            .commands()
            .iter()
            .map(|command| command.object)
            .collect();
        if self
            .object_buffer
            .write_all(&self.device, &self.queue, &objects)
        {
            log::debug!("object buffer grown to {} entries", self.object_buffer.capacity());
            self.object_bind_group =
                Self::create_object_bind_group(&self.device, &self.object_layout, &self.object_buffer);
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.draw_queue.clear();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
                self.draw_queue.clear();
                return Ok(());
            }
            Err(e) => {
                self.draw_queue.clear();
                return Err(e);
            }
        };

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
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
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

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(SCENE_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, &self.scene_bind_group, &[]);

                for (i, command) in self.draw_queue.commands().iter().enumerate() {
                    let Some(mesh) = self.meshes.get(command.kind) else {
                        continue;
                    };
                    render_pass.set_bind_group(1, &self.object_bind_group, &[self.object_buffer.offset(i)]);
                    render_pass.set_bind_group(2, self.texture_slots.bind_group(command.texture_slot), &[]);
                    render_pass.draw_mesh(mesh);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        self.draw_queue.clear();
        Ok(())
    }

    /// Resizes the render engine surface and recreates depth buffer
    ///
    /// Zero-sized requests (a minimised window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Returns current surface dimensions
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Frees the renderer's own textures. Scene textures must already have
    /// been released through [`resources_mut`](Self::resources_mut).
    pub fn destroy(self) {
        self.texture_slots.destroy();
        self.depth_texture.destroy();
    }
}
