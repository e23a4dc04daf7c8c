//! Point-cloud draw pass over a simulated particle field.
//!
//! Reads the latest position target as a per-vertex position source: each
//! particle is an instanced camera-facing quad whose vertex shader
//! `textureLoad`s its own texel. A pointer-driven repulsion bias is applied
//! here, at draw time, and never written back into the simulation targets.

use crate::gpu::fbo::ParticleFieldGpu;
use crate::gpu::GpuContext;
use crate::uniforms::SIM_UNIFORMS_WGSL;

const PARTICLE_SIZE: f32 = 0.015;

/// Render pipeline drawing a particle field as soft glowing points.
pub struct PointCloud {
    pipeline: wgpu::RenderPipeline,
    /// One bind group per position slot, matching the field's ping-pong.
    bind_groups: [wgpu::BindGroup; 2],
    particle_count: u32,
}

impl PointCloud {
    /// Build the draw pipeline against the host's color target format.
    pub fn new(
        context: &GpuContext,
        field: &ParticleFieldGpu,
        target_format: wgpu::TextureFormat,
    ) -> Self {
        let device = &context.device;

        let shader_src = point_cloud_shader_wgsl();
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Cloud Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Point Cloud Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: false },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
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

        let views = field.slot_views();
        let bind_groups = [0, 1].map(|i| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("Point Cloud Bind Group {}", i)),
                layout: &bind_group_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(views[i]),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: field.uniform_buffer().as_entire_binding(),
                    },
                ],
            })
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Point Cloud Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Point Cloud Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            bind_groups,
            particle_count: field.config().particle_count(),
        }
    }

    /// Record the draw into an open render pass, sampling the field's latest
    /// positions.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, field: &ParticleFieldGpu) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_groups[field.current_index()], &[]);
        pass.draw(0..6, 0..self.particle_count);
    }
}

/// Generate the WGSL for the point-cloud draw pass.
pub fn point_cloud_shader_wgsl() -> String {
    format!(
        r#"{uniforms_struct}

@group(0) @binding(0) var positions: texture_2d<f32>;
@group(0) @binding(1) var<uniform> uniforms: SimUniforms;

struct VertexOutput {{
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) uv: vec2<f32>,
}};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @builtin(instance_index) instance_index: u32,
) -> VertexOutput {{
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let dims = textureDimensions(positions);
    let texel = vec2<i32>(
        i32(instance_index % dims.x),
        i32(instance_index / dims.x),
    );
    let pos = textureLoad(positions, texel, 0).xyz;

    // Draw-time repulsion bias; the simulation targets never see it
    let to_point = pos - uniforms.repel_point;
    let dist = length(to_point);
    let influence = smoothstep(50.0, 0.0, dist) * uniforms.repel_strength;
    var biased = pos;
    if dist > 1.0e-6 {{
        biased = pos + (to_point / dist) * influence;
    }}

    let quad_pos = quad_vertices[vertex_index];
    var clip_pos = uniforms.view_proj * vec4<f32>(biased, 1.0);
    clip_pos.x += quad_pos.x * {size:.3} * clip_pos.w;
    clip_pos.y += quad_pos.y * {size:.3} * clip_pos.w;

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = mix(
        normalize(biased) * 0.5 + 0.5,
        vec3<f32>(1.0, 0.5, 0.8),
        min(influence, 1.0) * 0.8,
    );
    out.uv = quad_pos;
    return out;
}}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {{
    let dist = length(in.uv);
    if dist > 1.0 {{
        discard;
    }}
    let alpha = 1.0 - smoothstep(0.5, 1.0, dist);
    return vec4<f32>(in.color, alpha);
}}
"#,
        uniforms_struct = SIM_UNIFORMS_WGSL,
        size = PARTICLE_SIZE,
    )
}
