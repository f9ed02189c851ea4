//! Uniform types for the present pipeline.

use bytemuck::{Pod, Zeroable};

/// Maps surface UVs onto frame UVs.
///
/// The surface and the CPU frame can briefly disagree in size while a
/// resize is in flight; scaling keeps the frame pixel-aligned to the
/// top-left corner instead of stretching it.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniform {
    pub uv_scale: [f32; 2],
    pub _padding: [f32; 2],
}

impl FrameUniform {
    pub fn identity() -> Self {
        Self {
            uv_scale: [1.0, 1.0],
            _padding: [0.0; 2],
        }
    }

    /// Uniform for drawing a `frame_width`x`frame_height` frame onto a
    /// `surface_width`x`surface_height` surface.
    pub fn for_sizes(
        surface_width: u32,
        surface_height: u32,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        if frame_width == 0 || frame_height == 0 {
            return Self::identity();
        }
        Self {
            uv_scale: [
                surface_width as f32 / frame_width as f32,
                surface_height as f32 / frame_height as f32,
            ],
            _padding: [0.0; 2],
        }
    }
}

impl Default for FrameUniform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_sizes_are_identity() {
        assert_eq!(FrameUniform::for_sizes(800, 600, 800, 600), FrameUniform::identity());
    }

    #[test]
    fn test_larger_surface_scales_up() {
        let uniform = FrameUniform::for_sizes(1000, 600, 500, 600);
        assert_eq!(uniform.uv_scale, [2.0, 1.0]);
    }

    #[test]
    fn test_empty_frame_falls_back_to_identity() {
        assert_eq!(FrameUniform::for_sizes(800, 600, 0, 0), FrameUniform::identity());
    }

    #[test]
    fn test_uniform_is_16_bytes() {
        assert_eq!(std::mem::size_of::<FrameUniform>(), 16);
    }
}
