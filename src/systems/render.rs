//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Cube pipeline and per-frame instances
//! - Chase camera and frame rendering

use std::sync::Arc;
use winit::window::Window;
use cubehop_core::GameWorld;
use cubehop_render::{
    context::{ContextError, RenderContext},
    pipeline::{CameraUniforms, CubePipeline, PipelineError},
    CameraMode, ChaseCamera, FrameInstances,
};
use crate::config::RenderingConfig;

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// GPU setup failed
    Context(ContextError),
    /// Pipeline creation failed
    Pipeline(PipelineError),
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Context(e) => write!(f, "Render context error: {}", e),
            RenderError::Pipeline(e) => write!(f, "Pipeline error: {}", e),
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Context(e)
    }
}

impl From<PipelineError> for RenderError {
    fn from(e: PipelineError) -> Self {
        RenderError::Pipeline(e)
    }
}

/// Convert a config color to a wgpu clear color
pub fn clear_color(bg: [f32; 4]) -> wgpu::Color {
    wgpu::Color {
        r: bg[0] as f64,
        g: bg[1] as f64,
        b: bg[2] as f64,
        a: bg[3] as f64,
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: CubePipeline,
    camera: ChaseCamera,
    instances: FrameInstances,
    background: wgpu::Color,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: &RenderingConfig,
        camera: ChaseCamera,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut pipeline = CubePipeline::new(&context.device, context.config.format)?;

        // Ensure depth texture exists
        pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        log::info!(
            "Renderer ready: {}x{} {:?}, {} camera",
            context.config.width,
            context.config.height,
            context.config.format,
            camera.mode.name()
        );

        Ok(Self {
            context,
            pipeline,
            camera,
            instances: FrameInstances::new(),
            background: clear_color(render_config.background_color),
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Switch between follow and overhead camera
    pub fn toggle_camera(&mut self) -> CameraMode {
        let mode = self.camera.toggle_mode();
        log::info!("Camera mode: {}", mode.name());
        mode
    }

    /// The chase camera
    pub fn camera(&self) -> &ChaseCamera {
        &self.camera
    }

    /// Render a single frame
    ///
    /// A lost or outdated surface is reconfigured before the error is
    /// returned, so the caller only needs to request another frame.
    pub fn render_frame(&mut self, world: &GameWorld) -> Result<(), RenderError> {
        self.camera.follow(world.player().position);
        self.instances.rebuild(world);

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.context.reconfigure();
                return Err(RenderError::SurfaceLost);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let uniforms = CameraUniforms {
            view_proj: self.camera.view_projection(self.context.aspect_ratio()),
        };
        self.pipeline.update_uniforms(&self.context.queue, &uniforms);
        self.pipeline
            .upload_instances(&self.context.device, &self.context.queue, &self.instances);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.pipeline.render(&mut encoder, &view, self.background);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
