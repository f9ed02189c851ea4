//! aie_gpu - presents CPU-rendered frames through wgpu.
//!
//! The editor rasterizes every frame in software. This crate owns the
//! surface, uploads the finished RGBA frame into a texture and draws it
//! as a single full-screen triangle.

pub mod bindings;
pub mod config;
pub mod context;
pub mod error;
pub mod pipeline;
pub mod texture;
pub mod uniform;

pub use config::{GpuConfig, TextureConfig};
pub use context::GpuContext;
pub use error::{GpuError, Result};
pub use pipeline::{PipelineBuilder, PresentPipeline};
pub use texture::FrameTexture;
pub use uniform::FrameUniform;
