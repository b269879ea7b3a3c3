//! GPU-compatible data types for the cube pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use cubehop_math::{mat4, Mat4};

/// A mesh vertex with position and color
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeVertex {
    /// Position in model space
    pub position: [f32; 3],
    /// RGB color
    pub color: [f32; 3],
}

impl CubeVertex {
    /// Vertex buffer layout (locations 0 and 1)
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // color: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Per-instance model matrix
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct CubeInstance {
    /// Column-major model matrix (64 bytes)
    pub model: Mat4,
}

impl CubeInstance {
    /// Create an instance from a model matrix
    pub fn new(model: Mat4) -> Self {
        Self { model }
    }

    /// Instance buffer layout (locations 2-5, one column each)
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
            2 => Float32x4,
            3 => Float32x4,
            4 => Float32x4,
            5 => Float32x4,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CubeInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

impl Default for CubeInstance {
    fn default() -> Self {
        Self::new(mat4::IDENTITY)
    }
}

/// Camera uniforms
/// Layout: 64 bytes total (must match cube.wgsl CameraUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniforms {
    /// Projection * view (64 bytes)
    pub view_proj: Mat4,
}

impl Default for CameraUniforms {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
        }
    }
}
