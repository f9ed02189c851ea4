//! Render pipeline for presenting the CPU frame.

use wgpu::util::DeviceExt;

use crate::bindings::{
    SAMPLER_BINDING, TEXTURE_BINDING, TEXTURE_GROUP, UNIFORM_FRAME_BINDING, UNIFORM_GROUP,
};
use crate::context::GpuContext;
use crate::error::{GpuError, Result};
use crate::texture::FrameTexture;
use crate::uniform::FrameUniform;

/// Builder for 2D render pipelines without vertex buffers.
///
/// ```ignore
/// let pipeline = PipelineBuilder::new(&device, format, &shader)
///     .with_label("Present")
///     .with_bind_group_layouts(&[&uniform_layout, &texture_layout])
///     .build();
/// ```
pub struct PipelineBuilder<'a> {
    device: &'a wgpu::Device,
    format: wgpu::TextureFormat,
    shader: &'a wgpu::ShaderModule,
    label: Option<&'a str>,
    vs_entry: &'a str,
    fs_entry: &'a str,
    bind_group_layouts: Vec<&'a wgpu::BindGroupLayout>,
    blend_state: Option<wgpu::BlendState>,
}

impl<'a> PipelineBuilder<'a> {
    pub fn new(
        device: &'a wgpu::Device,
        format: wgpu::TextureFormat,
        shader: &'a wgpu::ShaderModule,
    ) -> Self {
        Self {
            device,
            format,
            shader,
            label: None,
            vs_entry: "vs_main",
            fs_entry: "fs_main",
            bind_group_layouts: Vec::new(),
            blend_state: None,
        }
    }

    pub fn with_label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    pub fn with_entry_points(mut self, vs_entry: &'a str, fs_entry: &'a str) -> Self {
        self.vs_entry = vs_entry;
        self.fs_entry = fs_entry;
        self
    }

    /// Layouts in group order.
    pub fn with_bind_group_layouts(mut self, layouts: &[&'a wgpu::BindGroupLayout]) -> Self {
        self.bind_group_layouts = layouts.to_vec();
        self
    }

    /// Blend state (default: REPLACE).
    pub fn with_blend_state(mut self, blend: wgpu::BlendState) -> Self {
        self.blend_state = Some(blend);
        self
    }

    pub fn build(self) -> wgpu::RenderPipeline {
        let layout_label = self.label.map(|l| format!("{} Layout", l));
        let pipeline_layout = self
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: layout_label.as_deref(),
                bind_group_layouts: &self.bind_group_layouts,
                push_constant_ranges: &[],
            });

        self.device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: self.label,
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: self.shader,
                    entry_point: Some(self.vs_entry),
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: self.shader,
                    entry_point: Some(self.fs_entry),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: self.format,
                        blend: self.blend_state,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    unclipped_depth: false,
                    conservative: false,
                },
                depth_stencil: None,
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
    }
}

/// Draws a [`FrameTexture`] over the whole surface.
pub struct PresentPipeline {
    render_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    texture_bind_group_layout: wgpu::BindGroupLayout,
    texture_bind_group: Option<wgpu::BindGroup>,
    bound_size: (u32, u32),
    last_uniform: FrameUniform,
}

impl PresentPipeline {
    pub fn new(ctx: &GpuContext) -> Self {
        let shader = ctx
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: Some("Present Shader"),
                source: wgpu::ShaderSource::Wgsl(include_str!("shaders/present.wgsl").into()),
            });

        let uniform = FrameUniform::identity();
        let uniform_buffer = ctx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Frame Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let uniform_bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Frame Uniform Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: UNIFORM_FRAME_BINDING,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let texture_bind_group_layout =
            ctx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Frame Texture Layout"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: TEXTURE_BINDING,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Texture {
                                multisampled: false,
                                view_dimension: wgpu::TextureViewDimension::D2,
                                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            },
                            count: None,
                        },
                        wgpu::BindGroupLayoutEntry {
                            binding: SAMPLER_BINDING,
                            visibility: wgpu::ShaderStages::FRAGMENT,
                            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                            count: None,
                        },
                    ],
                });

        let uniform_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: UNIFORM_FRAME_BINDING,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        // Layout order follows UNIFORM_GROUP, TEXTURE_GROUP.
        let render_pipeline =
            PipelineBuilder::new(&ctx.device, ctx.surface_config.format, &shader)
                .with_label("Present Pipeline")
                .with_bind_group_layouts(&[&uniform_bind_group_layout, &texture_bind_group_layout])
                .build();

        Self {
            render_pipeline,
            uniform_buffer,
            uniform_bind_group,
            texture_bind_group_layout,
            texture_bind_group: None,
            bound_size: (0, 0),
            last_uniform: uniform,
        }
    }

    /// Write a new frame uniform if it changed.
    pub fn update_uniform(&mut self, ctx: &GpuContext, uniform: FrameUniform) {
        if uniform == self.last_uniform {
            return;
        }
        ctx.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));
        self.last_uniform = uniform;
    }

    fn bind_frame(&mut self, ctx: &GpuContext, frame: &FrameTexture) -> wgpu::BindGroup {
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Texture Bind Group"),
            layout: &self.texture_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: TEXTURE_BINDING,
                    resource: wgpu::BindingResource::TextureView(&frame.view),
                },
                wgpu::BindGroupEntry {
                    binding: SAMPLER_BINDING,
                    resource: wgpu::BindingResource::Sampler(&frame.sampler),
                },
            ],
        });
        self.bound_size = (frame.width, frame.height);
        bind_group
    }

    /// Draw `frame` onto the next surface texture and present it.
    ///
    /// A lost or outdated surface is reconfigured and the frame skipped.
    pub fn present(&mut self, ctx: &mut GpuContext, frame: &FrameTexture) -> Result<()> {
        if self.texture_bind_group.is_none() || self.bound_size != (frame.width, frame.height) {
            let bind_group = self.bind_frame(ctx, frame);
            self.texture_bind_group = Some(bind_group);
        }
        self.update_uniform(
            ctx,
            FrameUniform::for_sizes(ctx.width(), ctx.height(), frame.width, frame.height),
        );

        let output = match ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                ctx.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface frame timed out");
                return Ok(());
            }
            Err(e) => return Err(GpuError::Frame(e)),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(&self.render_pipeline);
            pass.set_bind_group(UNIFORM_GROUP, &self.uniform_bind_group, &[]);
            if let Some(bind_group) = &self.texture_bind_group {
                pass.set_bind_group(TEXTURE_GROUP, bind_group, &[]);
            }
            pass.draw(0..3, 0..1);
        }

        ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
