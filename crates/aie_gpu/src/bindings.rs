//! Shader binding constants shared with `shaders/present.wgsl`.
//!
//! The WGSL source hardcodes the same numbers; keep both in sync.

/// Group 0: frame uniform.
pub const UNIFORM_GROUP: u32 = 0;
/// Binding 0 in group 0: [`crate::FrameUniform`].
pub const UNIFORM_FRAME_BINDING: u32 = 0;

/// Group 1: frame texture resources.
pub const TEXTURE_GROUP: u32 = 1;
/// Binding 0 in group 1: frame texture.
pub const TEXTURE_BINDING: u32 = 0;
/// Binding 1 in group 1: sampler.
pub const SAMPLER_BINDING: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bindings_match_shader_layout() {
        let shader = include_str!("shaders/present.wgsl");
        assert!(shader.contains(&format!(
            "@group({}) @binding({})",
            UNIFORM_GROUP, UNIFORM_FRAME_BINDING
        )));
        assert!(shader.contains(&format!(
            "@group({}) @binding({})",
            TEXTURE_GROUP, TEXTURE_BINDING
        )));
        assert!(shader.contains(&format!(
            "@group({}) @binding({})",
            TEXTURE_GROUP, SAMPLER_BINDING
        )));
    }
}
