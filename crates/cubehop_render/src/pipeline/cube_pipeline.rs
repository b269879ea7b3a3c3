//! Render pipeline for the board
//!
//! Two meshes share one pipeline: the player cube and the tile cube, each with
//! its own palette. Every tile is an instance of the tile mesh, so a whole frame
//! is two instanced draw calls.

use wgpu::util::DeviceExt;

use super::types::{CameraUniforms, CubeInstance, CubeVertex};
use crate::geometry::{cube_vertices, CUBE_VERTEX_COUNT, PLAYER_PALETTE, TILE_PALETTE};
use crate::renderable::FrameInstances;

/// Smallest instance buffer ever allocated
const MIN_INSTANCE_CAPACITY: usize = 16;

/// Error building the pipeline
#[derive(Debug)]
pub enum PipelineError {
    /// WGSL failed to compile or validate
    Shader(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Shader(msg) => write!(f, "Shader error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

/// Capacity to allocate for `count` instances
pub fn instance_capacity(count: usize) -> usize {
    count.next_power_of_two().max(MIN_INSTANCE_CAPACITY)
}

/// A growable GPU buffer of instances
struct InstanceBuffer {
    label: &'static str,
    buffer: wgpu::Buffer,
    capacity: usize,
    len: u32,
}

impl InstanceBuffer {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<CubeInstance>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            label,
            buffer,
            capacity,
            len: 0,
        }
    }

    fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, instances: &[CubeInstance]) {
        if instances.len() > self.capacity {
            let capacity = instance_capacity(instances.len());
            log::debug!(
                "Growing {} from {} to {} instances",
                self.label,
                self.capacity,
                capacity
            );
            *self = Self::new(device, self.label, capacity);
        }

        if !instances.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(instances));
        }
        self.len = instances.len() as u32;
    }
}

/// Instanced cube renderer
pub struct CubePipeline {
    /// The render pipeline
    pipeline: wgpu::RenderPipeline,
    /// Uniform buffer
    uniform_buffer: wgpu::Buffer,
    /// Bind group for uniforms
    bind_group: wgpu::BindGroup,
    /// Player mesh vertices
    player_mesh: wgpu::Buffer,
    /// Tile mesh vertices
    tile_mesh: wgpu::Buffer,
    player_instances: InstanceBuffer,
    tile_instances: InstanceBuffer,
    /// Depth texture
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl CubePipeline {
    /// Create a new cube pipeline
    ///
    /// The shader is compiled inside a validation error scope so a bad shader
    /// is reported as an error instead of aborting through the device's
    /// uncaptured error handler.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
    ) -> Result<Self, PipelineError> {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Cube Bind Group Layout"),
            entries: &[
                // Camera uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Load shader
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Cube Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../../shaders/cube.wgsl").into()),
        });
        if let Some(e) = pollster::block_on(device.pop_error_scope()) {
            log::error!("Cube shader failed to compile: {}", e);
            return Err(PipelineError::Shader(e.to_string()));
        }

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Cube Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[CubeVertex::layout(), CubeInstance::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                // Mesh winding is mixed
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Cube Uniform Buffer"),
            contents: bytemuck::bytes_of(&CameraUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Cube Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let player_mesh = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Player Mesh"),
            contents: bytemuck::cast_slice(&cube_vertices(&PLAYER_PALETTE)),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let tile_mesh = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Tile Mesh"),
            contents: bytemuck::cast_slice(&cube_vertices(&TILE_PALETTE)),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Ok(Self {
            pipeline,
            uniform_buffer,
            bind_group,
            player_mesh,
            tile_mesh,
            player_instances: InstanceBuffer::new(device, "Player Instances", 1),
            tile_instances: InstanceBuffer::new(device, "Tile Instances", instance_capacity(100)),
            depth_texture: None,
            depth_size: (0, 0),
        })
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &CameraUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Upload this frame's instances, growing buffers as needed
    pub fn upload_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &FrameInstances,
    ) {
        self.player_instances.upload(device, queue, &instances.player);
        self.tile_instances.upload(device, queue, &instances.tiles);
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: width.max(1),
                    height: height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Depth32Float,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture = Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Draw the uploaded instances
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) {
        let Some(depth_view) = self.depth_texture.as_ref() else {
            log::warn!("Skipping frame: depth texture not created");
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Cube Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);

        for (mesh, instances) in [
            (&self.tile_mesh, &self.tile_instances),
            (&self.player_mesh, &self.player_instances),
        ] {
            if instances.len == 0 {
                continue;
            }
            render_pass.set_vertex_buffer(0, mesh.slice(..));
            render_pass.set_vertex_buffer(1, instances.buffer.slice(..));
            render_pass.draw(0..CUBE_VERTEX_COUNT as u32, 0..instances.len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_capacity() {
        assert_eq!(instance_capacity(0), MIN_INSTANCE_CAPACITY);
        assert_eq!(instance_capacity(1), MIN_INSTANCE_CAPACITY);
        assert_eq!(instance_capacity(94), 128);
        assert_eq!(instance_capacity(128), 128);
        assert_eq!(instance_capacity(129), 256);
    }

    #[test]
    fn test_pipeline_error_display() {
        let err = PipelineError::Shader("bad token".to_string());
        assert_eq!(err.to_string(), "Shader error: bad token");
    }
}
