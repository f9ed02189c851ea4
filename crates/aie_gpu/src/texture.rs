use crate::config::TextureConfig;
use crate::context::GpuContext;
use crate::error::{GpuError, Result};

/// Texture holding the most recent software-rendered frame.
///
/// Recreated only when the frame size changes; otherwise each frame is a
/// plain `write_texture` upload.
pub struct FrameTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub width: u32,
    pub height: u32,
}

impl FrameTexture {
    pub fn new(ctx: &GpuContext, width: u32, height: u32) -> Self {
        Self::with_config(ctx, width, height, TextureConfig::default())
    }

    pub fn with_config(ctx: &GpuContext, width: u32, height: u32, config: TextureConfig) -> Self {
        let width = width.max(1);
        let height = height.max(1);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Frame Texture"),
            size: extent(width, height),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Frame Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: config.mag_filter,
            min_filter: config.min_filter,
            ..Default::default()
        });

        log::debug!("Created frame texture {}x{}", width, height);

        Self {
            texture,
            view,
            sampler,
            width,
            height,
        }
    }

    /// Upload a tightly packed RGBA8 frame of exactly this texture's size.
    pub fn upload(&self, ctx: &GpuContext, rgba: &[u8]) -> Result<()> {
        let expected = self.width as usize * self.height as usize * 4;
        if rgba.len() != expected {
            return Err(GpuError::FrameSize {
                expected,
                actual: rgba.len(),
                width: self.width,
                height: self.height,
            });
        }

        ctx.queue.write_texture(
            self.texture.as_image_copy(),
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * self.width),
                rows_per_image: Some(self.height),
            },
            extent(self.width, self.height),
        );
        Ok(())
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width.max(1) && self.height == height.max(1)
    }
}

fn extent(width: u32, height: u32) -> wgpu::Extent3d {
    wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    }
}
