//! Rendering pipeline components
//!
//! This module contains the instanced cube pipeline and its GPU data types.

pub mod cube_pipeline;
pub mod types;

// Re-export types
pub use types::{CameraUniforms, CubeInstance, CubeVertex};

// Re-export pipeline
pub use cube_pipeline::{instance_capacity, CubePipeline, PipelineError};
